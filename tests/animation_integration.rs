//! Integration tests for the animation units running on the scheduler
//!
//! These drive the real frame loop on a virtual clock:
//! 1. Typing text reaches the stage with the configured delays
//! 2. Particles keep moving and stay inside the viewport
//! 3. Units without a render target never start
//! 4. Stopping the scheduler freezes every unit

use std::time::Duration;

use portfolio_fx::config::{GlowConfig, ParticleConfig, TypingConfig};
use portfolio_fx::stage::Pointer;
use portfolio_fx::{
    CursorGlow, ParticleAnimation, Rearm, Scheduler, Stage, TypingAnimation,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

const FRAME: Duration = Duration::from_millis(10);

fn typing_config(words: &[&str]) -> TypingConfig {
    TypingConfig {
        words: words.iter().map(|w| w.to_string()).collect(),
        ..TypingConfig::default()
    }
}

fn text(stage: &Stage) -> &str {
    stage.text.as_ref().expect("stage has a text display").as_str()
}

// ==================== Typing ====================

#[test]
fn typing_follows_configured_timeline() {
    let mut scheduler = Scheduler::new();
    let mut stage = Stage::new(1280.0, 720.0).with_text();
    let typing = TypingAnimation::mount(&typing_config(&["hi", "yo"]), &stage);
    scheduler.spawn_mounted(typing, Rearm::After(Duration::ZERO));

    // t=0: "h", next at 100ms
    scheduler.run_frames(&mut stage, 1, FRAME);
    assert_eq!(text(&stage), "h");

    // t=100: "hi", then a 2000ms pause
    scheduler.run_frames(&mut stage, 10, FRAME);
    assert_eq!(text(&stage), "hi");

    // Still holding at t=2000
    scheduler.run_frames(&mut stage, 190, FRAME);
    assert_eq!(text(&stage), "hi");

    // t=2100: "h", t=2150: "" and switch to next phrase
    scheduler.run_frames(&mut stage, 10, FRAME);
    assert_eq!(text(&stage), "h");
    scheduler.run_frames(&mut stage, 5, FRAME);
    assert_eq!(text(&stage), "");

    // t=2450: first letter of the second phrase after the 300ms transition
    scheduler.run_frames(&mut stage, 30, FRAME);
    assert_eq!(text(&stage), "y");
}

#[test]
fn typing_without_text_display_never_starts() {
    let mut scheduler = Scheduler::new();
    let stage = Stage::new(1280.0, 720.0);
    let typing = TypingAnimation::mount(&TypingConfig::default(), &stage);

    assert!(scheduler.spawn_mounted(typing, Rearm::After(Duration::ZERO)).is_none());
    assert!(scheduler.is_empty());
}

// ==================== Particles ====================

#[test]
fn particles_drift_and_stay_on_screen() {
    let mut scheduler = Scheduler::new();
    let mut stage = Stage::new(400.0, 300.0).with_sprites();
    let mut rng = StdRng::seed_from_u64(2024);
    let config = ParticleConfig {
        drift_speed: 3.0,
        ..ParticleConfig::default()
    };

    let particles = ParticleAnimation::mount(&config, &mut stage, &mut rng);
    scheduler.spawn_mounted(particles, Rearm::NextFrame);

    let initial: Vec<[f32; 2]> = stage
        .sprites
        .as_ref()
        .unwrap()
        .sprites()
        .iter()
        .map(|s| s.position)
        .collect();
    assert_eq!(initial.len(), 50);

    for _ in 0..100 {
        scheduler.run_frames(&mut stage, 1, FRAME);
        for sprite in stage.sprites.as_ref().unwrap().sprites() {
            let [x, y] = sprite.position;
            assert!((0.0..=400.0).contains(&x));
            assert!((0.0..=300.0).contains(&y));
        }
    }

    let moved = stage
        .sprites
        .as_ref()
        .unwrap()
        .sprites()
        .iter()
        .zip(&initial)
        .filter(|(sprite, start)| sprite.position != **start)
        .count();
    assert!(moved > 0);
}

#[test]
fn shrinking_viewport_rewraps_on_next_frame() {
    let mut scheduler = Scheduler::new();
    let mut stage = Stage::new(1000.0, 1000.0).with_sprites();
    let mut rng = StdRng::seed_from_u64(5);

    let particles = ParticleAnimation::mount(&ParticleConfig::default(), &mut stage, &mut rng);
    scheduler.spawn_mounted(particles, Rearm::NextFrame);

    stage.resize(100.0, 100.0);
    scheduler.run_frames(&mut stage, 1, FRAME);

    for sprite in stage.sprites.as_ref().unwrap().sprites() {
        let [x, y] = sprite.position;
        assert!((0.0..=100.0).contains(&x));
        assert!((0.0..=100.0).contains(&y));
    }
}

#[test]
fn minimize_and_restore_keeps_field_spread_out() {
    let mut scheduler = Scheduler::new();
    let mut stage = Stage::new(1280.0, 720.0).with_sprites();
    let mut rng = StdRng::seed_from_u64(11);

    let particles = ParticleAnimation::mount(&ParticleConfig::default(), &mut stage, &mut rng);
    scheduler.spawn_mounted(particles, Rearm::NextFrame);
    scheduler.run_frames(&mut stage, 5, FRAME);

    // Minimizing reports a 0x0 size, then the old size comes back
    stage.resize(0.0, 0.0);
    scheduler.run_frames(&mut stage, 1, FRAME);
    stage.resize(1280.0, 720.0);
    scheduler.run_frames(&mut stage, 60, FRAME);

    let near_corner = |x: f32, y: f32| {
        (x < 20.0 || x > 1260.0) && (y < 20.0 || y > 700.0)
    };
    let cornered = stage
        .sprites
        .as_ref()
        .unwrap()
        .sprites()
        .iter()
        .filter(|s| near_corner(s.position[0], s.position[1]))
        .count();
    assert!(cornered < 10, "{cornered}/50 sprites collapsed into corners");
}

#[test]
fn empty_field_stays_scheduled() {
    let mut scheduler = Scheduler::new();
    let mut stage = Stage::new(800.0, 600.0).with_sprites();
    let mut rng = StdRng::seed_from_u64(0);
    let config = ParticleConfig {
        count: 0,
        ..ParticleConfig::default()
    };

    let id = scheduler
        .spawn_mounted(ParticleAnimation::mount(&config, &mut stage, &mut rng), Rearm::NextFrame)
        .unwrap();

    assert_eq!(scheduler.run_frames(&mut stage, 60, FRAME), 60);
    assert!(scheduler.is_scheduled(id));
}

// ==================== Whole page ====================

#[test]
fn all_units_share_one_frame_loop_until_stopped() {
    let mut scheduler = Scheduler::new();
    let mut stage = Stage::new(1280.0, 720.0)
        .with_text()
        .with_sprites()
        .with_glow();
    let mut rng = StdRng::seed_from_u64(9);

    let typing = TypingAnimation::mount(&TypingConfig::default(), &stage);
    scheduler.spawn_mounted(typing, Rearm::After(Duration::ZERO));
    let particles = ParticleAnimation::mount(&ParticleConfig::default(), &mut stage, &mut rng);
    scheduler.spawn_mounted(particles, Rearm::NextFrame);
    let glow = CursorGlow::mount(&GlowConfig::default(), &stage);
    scheduler.spawn_mounted(glow, Rearm::NextFrame);
    assert_eq!(scheduler.len(), 3);

    stage.pointer = Pointer {
        position: glam::Vec2::new(640.0, 360.0),
        inside: true,
    };
    scheduler.run_frames(&mut stage, 50, FRAME);

    assert!("captivate".starts_with(text(&stage)));
    assert!(!text(&stage).is_empty());
    let spot = stage.glow.unwrap();
    assert!(spot.active);
    assert!(spot.position.x > 600.0);

    let stop = scheduler.stop_handle();
    stop.stop();
    let frozen_text = text(&stage).to_string();
    let frozen_sprites = stage.sprites.clone().unwrap();

    assert_eq!(scheduler.run_frames(&mut stage, 100, FRAME), 0);
    assert_eq!(text(&stage), frozen_text);
    assert_eq!(
        stage.sprites.as_ref().unwrap().sprites(),
        frozen_sprites.sprites()
    );
}
