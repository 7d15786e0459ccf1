//! Render targets the animation units write into.
//!
//! Targets are optional. A unit whose target is missing refuses to mount.
//! The host reads the targets back after each frame (window title, GPU
//! instance buffer, overlay).

use glam::Vec2;

/// GPU-aligned sprite instance (32 bytes).
/// Copied straight into the instance buffer, field order matches the shader.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Sprite {
    pub position: [f32; 2], // Translation in pixels, top-left origin
    pub size: f32,          // Diameter in pixels
    pub opacity: f32,
    pub color: [f32; 4], // Linear RGBA
}

/// A text display, such as the window title.
#[derive(Debug, Default, Clone)]
pub struct TextTarget {
    text: String,
    revision: u64,
}

impl TextTarget {
    pub fn set(&mut self, text: &str) {
        if self.text != text {
            self.text.clear();
            self.text.push_str(text);
            self.revision += 1;
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Bumped on every change, so hosts can skip redundant redraws.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

/// Container of independently positioned sprites.
#[derive(Debug, Default, Clone)]
pub struct SpriteLayer {
    sprites: Vec<Sprite>,
}

impl SpriteLayer {
    /// Append a sprite and return its handle.
    pub fn append(&mut self, sprite: Sprite) -> usize {
        self.sprites.push(sprite);
        self.sprites.len() - 1
    }

    /// Move an existing sprite. Unknown handles are ignored.
    pub fn translate(&mut self, handle: usize, position: Vec2) {
        if let Some(sprite) = self.sprites.get_mut(handle) {
            sprite.position = position.to_array();
        }
    }

    pub fn sprites(&self) -> &[Sprite] {
        &self.sprites
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    /// Sprites as a byte slice for GPU upload (zero-copy)
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.sprites)
    }
}

/// Soft light spot drawn under the cursor.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct GlowSpot {
    pub position: Vec2,
    pub active: bool,
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Pointer {
    pub position: Vec2,
    /// False once the cursor has left the window
    pub inside: bool,
}

#[derive(Debug, Clone)]
pub struct Stage {
    pub viewport: Vec2,
    pub pointer: Pointer,
    pub text: Option<TextTarget>,
    pub sprites: Option<SpriteLayer>,
    pub glow: Option<GlowSpot>,
}

impl Stage {
    /// A stage with no render targets attached.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            viewport: Vec2::new(width, height),
            pointer: Pointer::default(),
            text: None,
            sprites: None,
            glow: None,
        }
    }

    pub fn with_text(mut self) -> Self {
        self.text = Some(TextTarget::default());
        self
    }

    pub fn with_sprites(mut self) -> Self {
        self.sprites = Some(SpriteLayer::default());
        self
    }

    pub fn with_glow(mut self) -> Self {
        self.glow = Some(GlowSpot::default());
        self
    }

    /// Zero-area sizes (a minimized window) keep the last viewport.
    pub fn resize(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.viewport = Vec2::new(width, height);
        }
    }
}

/// Window title: base title, typed text with a caret, and any live toast.
pub fn window_title(base: &str, typed: Option<&str>, toast: Option<&str>) -> String {
    let mut title = base.to_string();
    if let Some(typed) = typed {
        title.push_str(" | I build things that ");
        title.push_str(typed);
        title.push('▌');
    }
    if let Some(toast) = toast {
        title.push_str("  [");
        title.push_str(toast);
        title.push(']');
    }
    title
}
