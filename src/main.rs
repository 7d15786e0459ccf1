use glam::Vec2;
use std::sync::Arc;
use std::time::{Duration, Instant};
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use portfolio_fx::{
    clipboard::{Clipboard, CopyTarget},
    color,
    config::SiteConfig,
    contact::{self, ContactError, ContactForm},
    keymap::{self, Shortcut},
    stage::{self, Pointer, Stage, TextTarget},
    toast::Toast,
    ui_overlay::UIOverlay,
    CursorGlow, ParticleAnimation, Rearm, Renderer, Scheduler, Theme, ThemeStore, TypingAnimation,
};

struct App {
    config: SiteConfig,
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    overlay: Option<UIOverlay>,
    scheduler: Scheduler,
    stage: Stage,
    theme: Theme,
    theme_store: Option<ThemeStore>,
    toast: Toast,
    clipboard: Clipboard,
    glow_color: [f32; 4],
    // What the window title was last built from
    title_revision: Option<u64>,
    title_toast: Option<String>,
    start_time: Instant,
}

impl App {
    fn new(config: SiteConfig) -> Self {
        let theme_store = ThemeStore::default_location();
        let theme = match theme_store.as_ref().map(ThemeStore::load) {
            Some(Ok(Some(saved))) => saved,
            Some(Err(e)) => {
                log::warn!("Ignoring saved theme: {}", e);
                Theme::default()
            }
            _ => Theme::default(),
        };

        let glow_color = color::parse_hex(&config.glow.color)
            .map(color::srgb_to_linear)
            .unwrap_or([1.0; 4]);

        Self {
            config,
            window: None,
            renderer: None,
            overlay: None,
            scheduler: Scheduler::new(),
            stage: Stage::new(0.0, 0.0),
            theme,
            theme_store,
            toast: Toast::new(),
            clipboard: Clipboard::new(),
            glow_color,
            title_revision: None,
            title_toast: None,
            start_time: Instant::now(),
        }
    }

    /// Attach render targets and mount every effect whose target exists.
    fn mount(&mut self, window: Arc<Window>) {
        let size = window.inner_size();

        match pollster::block_on(Renderer::new(window, self.config.particles.count)) {
            Ok(renderer) => {
                self.overlay = Some(UIOverlay::new(renderer.device(), renderer.format()));
                self.renderer = Some(renderer);
            }
            Err(e) => log::warn!("Rendering disabled: {}", e),
        }

        let mut stage = Stage::new(size.width as f32, size.height as f32).with_text();
        if self.renderer.is_some() {
            stage = stage.with_sprites().with_glow();
        }
        self.stage = stage;

        let typing = TypingAnimation::mount(&self.config.typing, &self.stage);
        self.scheduler.spawn_mounted(typing, Rearm::After(Duration::ZERO));

        let particles = ParticleAnimation::mount(
            &self.config.particles,
            &mut self.stage,
            &mut rand::thread_rng(),
        );
        self.scheduler.spawn_mounted(particles, Rearm::NextFrame);

        let glow = CursorGlow::mount(&self.config.glow, &self.stage);
        self.scheduler.spawn_mounted(glow, Rearm::NextFrame);

        log::info!("{} effects running", self.scheduler.len());
    }

    fn toggle_theme(&mut self, now: Duration) {
        self.theme = self.theme.toggled();
        if let Some(store) = &self.theme_store {
            if let Err(e) = store.save(self.theme) {
                log::warn!("Failed to save theme: {}", e);
            }
        }
        self.toast.show(self.theme.label(), now);
    }

    fn copy_to_clipboard(&mut self, target: CopyTarget, now: Duration) {
        match self.clipboard.copy(target, &self.config.profile) {
            Ok(message) => self.toast.show(message, now),
            Err(e) => {
                log::warn!("{}", e);
                self.toast.show("Copy failed", now);
            }
        }
    }

    fn open_cv(&mut self, now: Duration) {
        match contact::open_cv(&self.config.profile) {
            Ok(()) => {}
            Err(e @ ContactError::CvUnavailable) => self.toast.show(e.to_string(), now),
            Err(e) => log::warn!("{}", e),
        }
    }

    /// Rebuild the title only when the typed text or the toast changed.
    fn refresh_title(&mut self, now: Duration) {
        let Some(window) = &self.window else { return };

        let revision = self.stage.text.as_ref().map(TextTarget::revision);
        let toast = self.toast.visible(now);
        if revision == self.title_revision && toast == self.title_toast.as_deref() {
            return;
        }

        let title = stage::window_title(
            &self.config.window.title,
            self.stage.text.as_ref().map(TextTarget::as_str),
            toast,
        );
        window.set_title(&title);
        self.title_revision = revision;
        self.title_toast = toast.map(String::from);
    }

    fn render(&mut self, event_loop: &ActiveEventLoop, now: Duration) {
        let (Some(renderer), Some(layer)) = (self.renderer.as_mut(), self.stage.sprites.as_ref()) else {
            return;
        };

        let overlay = &mut self.overlay;
        let glow = self.stage.glow;
        let radius = self.config.glow.radius;
        let glow_color = self.glow_color;

        let result = renderer.render(
            layer,
            self.theme.background(),
            now.as_secs_f32(),
            |queue, encoder, view, width, height| {
                if let (Some(overlay), Some(spot)) = (overlay.as_mut(), glow.as_ref()) {
                    overlay.render_glow(queue, encoder, view, spot, radius, glow_color, width, height);
                }
            },
        );

        match result {
            Ok(_) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let size = renderer.size();
                renderer.resize(size);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("GPU out of memory, shutting down");
                event_loop.exit();
            }
            Err(e) => log::warn!("Render error: {:?}", e),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attributes = Window::default_attributes()
            .with_title(&self.config.window.title)
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.config.window.width,
                self.config.window.height,
            ));

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        self.mount(window.clone());
        self.window = Some(window);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::KeyboardInput { event, .. }
                if event.state == ElementState::Pressed && !event.repeat =>
            {
                let now = self.start_time.elapsed();
                match keymap::shortcut_for(&event.logical_key) {
                    Some(Shortcut::Quit) => event_loop.exit(),
                    Some(Shortcut::ToggleTheme) => self.toggle_theme(now),
                    Some(Shortcut::Copy(target)) => self.copy_to_clipboard(target, now),
                    Some(Shortcut::OpenCv) => self.open_cv(now),
                    None => {}
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.stage.pointer = Pointer {
                    position: Vec2::new(position.x as f32, position.y as f32),
                    inside: true,
                };
            }

            WindowEvent::CursorLeft { .. } => {
                self.stage.pointer.inside = false;
            }

            WindowEvent::Resized(physical_size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(physical_size);
                }
                self.stage
                    .resize(physical_size.width as f32, physical_size.height as f32);
            }

            WindowEvent::RedrawRequested => {
                let now = self.start_time.elapsed();
                self.scheduler.frame(&mut self.stage, now);
                self.refresh_title(now);
                self.render(event_loop, now);
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
const USAGE: &str = "usage: portfolio-fx [contact <name> <email> [message...] | links | cv]";

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Set up logging
    env_logger::init();

    let config = SiteConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config: {}. Using defaults.", e);
        SiteConfig::default()
    });

    let args: Vec<String> = std::env::args().skip(1).collect();

    match args.first().map(String::as_str) {
        None => run_window(config),
        Some("contact") => run_contact(&config, &args[1..]),
        Some("links") => print_links(&config),
        Some("cv") => run_cv(&config),
        Some(other) => {
            eprintln!("Unknown command '{}'", other);
            eprintln!("{}", USAGE);
            std::process::exit(2);
        }
    }
}

/// Window mode: particle background, typing title, cursor glow
#[cfg(not(target_arch = "wasm32"))]
fn run_window(config: SiteConfig) {
    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            eprintln!("Failed to start event loop: {}", e);
            std::process::exit(1);
        }
    };
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    if let Err(e) = event_loop.run_app(&mut app) {
        eprintln!("Event loop error: {}", e);
        std::process::exit(1);
    }
}

/// Contact mode: hand the mailto link to the mail client, printing it too
/// in case no handler is registered
#[cfg(not(target_arch = "wasm32"))]
fn run_contact(config: &SiteConfig, args: &[String]) {
    let name = args.first().cloned().unwrap_or_default();
    let email = args.get(1).cloned().unwrap_or_default();
    let message = args.get(2..).map(|rest| rest.join(" ")).unwrap_or_default();

    match ContactForm::new(name, email, message).submit(&config.profile) {
        Ok(url) => {
            eprintln!("Opening email client...");
            if let Err(e) = contact::launch(&url) {
                log::warn!("{}", e);
            }
            println!("{}", url);
        }
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("{}", USAGE);
            std::process::exit(1);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn run_cv(config: &SiteConfig) {
    match contact::open_cv(&config.profile) {
        Ok(()) => {}
        Err(ContactError::CvUnavailable) => {
            eprintln!("{}", ContactError::CvUnavailable);
            std::process::exit(1);
        }
        Err(e) => {
            log::warn!("{}", e);
            if let Some(url) = contact::cv_link(&config.profile) {
                println!("{}", url);
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn print_links(config: &SiteConfig) {
    for (label, url) in contact::social_links(&config.profile) {
        println!("{:<9} {}", label, url);
    }
    if contact::cv_link(&config.profile).is_none() {
        eprintln!("CV link not available yet");
    }
}

// WebAssembly entry point
#[cfg(target_arch = "wasm32")]
fn main() {
    std::panic::set_hook(Box::new(console_error_panic_hook::hook));
    if console_log::init_with_level(log::Level::Warn).is_err() {
        return;
    }

    wasm_bindgen_futures::spawn_local(run());
}

#[cfg(all(target_arch = "wasm32", not(feature = "web")))]
compile_error!("wasm32 builds need the `web` feature");

#[cfg(target_arch = "wasm32")]
async fn run() {
    let Ok(event_loop) = EventLoop::new() else {
        log::error!("Failed to start event loop");
        return;
    };
    let mut app = App::new(SiteConfig::default());
    if let Err(e) = event_loop.run_app(&mut app) {
        log::error!("Event loop error: {}", e);
    }
}
