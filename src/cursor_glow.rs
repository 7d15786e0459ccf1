use glam::Vec2;
use std::time::Duration;

use crate::config::GlowConfig;
use crate::scheduler::{Rearm, Task};
use crate::stage::Stage;

pub fn lerp(start: Vec2, end: Vec2, factor: f32) -> Vec2 {
    start + (end - start) * factor
}

/// Light spot that trails the pointer, closing `ease` of the gap each frame
pub struct CursorGlow {
    current: Vec2,
    ease: f32,
}

impl CursorGlow {
    /// Not mounted on narrow viewports or when the stage has no glow target.
    pub fn mount(config: &GlowConfig, stage: &Stage) -> Option<Self> {
        if stage.glow.is_none() {
            log::debug!("No glow target on stage, cursor glow disabled");
            return None;
        }
        if stage.viewport.x < config.min_viewport_width {
            log::debug!(
                "Viewport {}px narrower than {}px, cursor glow disabled",
                stage.viewport.x,
                config.min_viewport_width
            );
            return None;
        }

        Some(Self {
            current: Vec2::ZERO,
            ease: config.ease,
        })
    }

    pub fn position(&self) -> Vec2 {
        self.current
    }
}

impl Task for CursorGlow {
    fn name(&self) -> &'static str {
        "cursor-glow"
    }

    fn run(&mut self, stage: &mut Stage, _now: Duration) -> Rearm {
        self.current = lerp(self.current, stage.pointer.position, self.ease);

        if let Some(glow) = stage.glow.as_mut() {
            glow.position = self.current;
            glow.active = stage.pointer.inside;
        }
        Rearm::NextFrame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage::Pointer;

    #[test]
    fn lerp_midpoint() {
        assert_eq!(lerp(Vec2::ZERO, Vec2::new(10.0, 20.0), 0.5), Vec2::new(5.0, 10.0));
    }

    #[test]
    fn skipped_on_narrow_viewport() {
        let stage = Stage::new(600.0, 800.0).with_glow();
        assert!(CursorGlow::mount(&GlowConfig::default(), &stage).is_none());
    }

    #[test]
    fn skipped_without_target() {
        let stage = Stage::new(1280.0, 720.0);
        assert!(CursorGlow::mount(&GlowConfig::default(), &stage).is_none());
    }

    #[test]
    fn eases_toward_pointer() {
        let mut stage = Stage::new(1280.0, 720.0).with_glow();
        let mut glow = CursorGlow::mount(&GlowConfig::default(), &stage).unwrap();
        stage.pointer = Pointer {
            position: Vec2::new(100.0, 0.0),
            inside: true,
        };

        glow.run(&mut stage, Duration::ZERO);
        assert!((glow.position().x - 10.0).abs() < 1e-4);

        for _ in 0..200 {
            glow.run(&mut stage, Duration::ZERO);
        }
        assert!((glow.position().x - 100.0).abs() < 0.01);

        let spot = stage.glow.unwrap();
        assert!(spot.active);
        assert_eq!(spot.position, glow.position());
    }

    #[test]
    fn inactive_after_pointer_leaves() {
        let mut stage = Stage::new(1280.0, 720.0).with_glow();
        let mut glow = CursorGlow::mount(&GlowConfig::default(), &stage).unwrap();
        stage.pointer.inside = false;
        glow.run(&mut stage, Duration::ZERO);
        assert!(!stage.glow.unwrap().active);
    }
}
