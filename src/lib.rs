// Library exports for WebAssembly and library usage
pub mod clipboard;
pub mod color;
pub mod config;
pub mod contact;
pub mod cursor_glow;
pub mod keymap;
pub mod particle_system;
pub mod renderer;
pub mod scheduler;
pub mod stage;
pub mod theme;
pub mod toast;
pub mod typing;
pub mod ui_overlay;

// Re-export main types
pub use config::SiteConfig;
pub use cursor_glow::CursorGlow;
pub use particle_system::{Particle, ParticleAnimation, ParticleField};
pub use renderer::Renderer;
pub use scheduler::{Rearm, Scheduler, StopHandle, Task};
pub use stage::Stage;
pub use theme::{Theme, ThemeStore};
pub use typing::{TypingAnimation, TypingCycle};
