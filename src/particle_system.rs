use glam::Vec2;
use rand::Rng;
use std::time::Duration;
use thiserror::Error;

use crate::color;
use crate::config::ParticleConfig;
use crate::scheduler::{Rearm, Task};
use crate::stage::{Sprite, SpriteLayer, Stage};

/// One drifting dot. Velocity is fixed at creation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub size: f32,
    pub color: [f32; 4], // Linear RGBA
    pub opacity: f32,
}

impl Particle {
    pub fn new(position: Vec2, velocity: Vec2, size: f32, color: [f32; 4], opacity: f32) -> Self {
        Self {
            position,
            velocity,
            size,
            color,
            opacity,
        }
    }

    pub fn sprite(&self) -> Sprite {
        Sprite {
            position: self.position.to_array(),
            size: self.size,
            opacity: self.opacity,
            color: self.color,
        }
    }
}

/// Torus wrap: past either edge, jump to the opposite one.
/// The overshoot is dropped, not carried over.
pub fn wrap(value: f32, extent: f32) -> f32 {
    if value < 0.0 {
        extent
    } else if value > extent {
        0.0
    } else {
        value
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ParticleError {
    #[error("{0} must be finite and ordered low..high")]
    BadRange(&'static str),
}

fn sample_range(name: &'static str, [lo, hi]: [f32; 2]) -> Result<(f32, f32), ParticleError> {
    if lo.is_finite() && hi.is_finite() && lo <= hi {
        Ok((lo, hi))
    } else {
        Err(ParticleError::BadRange(name))
    }
}

/// Fixed-size field of particles drifting across the viewport
pub struct ParticleField {
    particles: Vec<Particle>,
}

impl ParticleField {
    /// Scatter `config.count` particles over the viewport.
    ///
    /// Palette entries that fail to parse are skipped. An empty palette falls
    /// back to white. Configuration validation rejects both up front.
    /// Inverted or non-finite ranges are rejected before sampling.
    pub fn new<R: Rng>(
        config: &ParticleConfig,
        viewport: Vec2,
        rng: &mut R,
    ) -> Result<Self, ParticleError> {
        let mut palette: Vec<[f32; 4]> = config
            .colors
            .iter()
            .filter_map(|hex| color::parse_hex(hex).ok())
            .map(color::srgb_to_linear)
            .collect();
        if palette.is_empty() {
            palette.push([1.0; 4]);
        }

        let (size_lo, size_hi) = sample_range("particles.size_range", config.size_range)?;
        let (alpha_lo, alpha_hi) = sample_range("particles.opacity_range", config.opacity_range)?;
        let drift = config.drift_speed.abs();
        sample_range("particles.drift_speed", [0.0, drift])?;
        let width = viewport.x.max(0.0);
        let height = viewport.y.max(0.0);

        let particles = (0..config.count)
            .map(|_| {
                let size = rng.gen_range(size_lo..=size_hi);
                let color = palette[rng.gen_range(0..palette.len())];
                let opacity = rng.gen_range(alpha_lo..=alpha_hi);
                let position = Vec2::new(rng.gen_range(0.0..=width), rng.gen_range(0.0..=height));
                let velocity = Vec2::new(rng.gen_range(-drift..=drift), rng.gen_range(-drift..=drift));

                Particle::new(position, velocity, size, color, opacity)
            })
            .collect();

        Ok(Self { particles })
    }

    pub fn from_particles(particles: Vec<Particle>) -> Self {
        Self { particles }
    }

    /// One frame of Euler integration with unit step, then per-axis wrap
    /// against the viewport as it is right now.
    pub fn advance(&mut self, viewport: Vec2) {
        for particle in &mut self.particles {
            let moved = particle.position + particle.velocity;
            particle.position = Vec2::new(wrap(moved.x, viewport.x), wrap(moved.y, viewport.y));
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

/// Binds a [`ParticleField`] to the stage's sprite layer.
pub struct ParticleAnimation {
    field: ParticleField,
    handles: Vec<usize>,
}

impl ParticleAnimation {
    /// Creates the field and appends one sprite per particle.
    /// Returns `None` when the stage has no sprite layer or the ranges are unusable.
    pub fn mount<R: Rng>(config: &ParticleConfig, stage: &mut Stage, rng: &mut R) -> Option<Self> {
        let viewport = stage.viewport;
        let Some(layer) = stage.sprites.as_mut() else {
            log::debug!("No sprite layer on stage, particle background disabled");
            return None;
        };

        match ParticleField::new(config, viewport, rng) {
            Ok(field) => Some(Self::attach(field, layer)),
            Err(e) => {
                log::warn!("Particle background disabled: {}", e);
                None
            }
        }
    }

    /// Mount an already built field.
    pub fn attach(field: ParticleField, layer: &mut SpriteLayer) -> Self {
        let handles = field
            .particles()
            .iter()
            .map(|particle| layer.append(particle.sprite()))
            .collect();
        log::info!("Mounted {} particles", field.len());
        Self { field, handles }
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }
}

impl Task for ParticleAnimation {
    fn name(&self) -> &'static str {
        "particles"
    }

    fn run(&mut self, stage: &mut Stage, _now: Duration) -> Rearm {
        self.field.advance(stage.viewport);

        if let Some(layer) = stage.sprites.as_mut() {
            for (particle, &handle) in self.field.particles().iter().zip(&self.handles) {
                layer.translate(handle, particle.position);
            }
        }
        Rearm::NextFrame
    }
}
