//! Integration tests for the animation pipeline
//!
//! These tests drive a full scene through many frames:
//! 1. Accumulators integrate consistently across variable frame times
//! 2. Draw calls keep table order and the background stays fixed
//! 3. The orbiter stays on its circle around the path follower
//! 4. Identical inputs give bit-identical output

use orbit2d_math::mat4::origin;
use orbit2d_scene::{AnimationState, DrawCall, MotionParams, Scene, SpriteEntry, SpriteRole};

const EPSILON: f32 = 0.0001;

fn default_scene() -> Scene<&'static str> {
    Scene::new(MotionParams::default())
        .with_sprite(SpriteEntry::new("track", SpriteRole::Background, "track.png"))
        .with_sprite(SpriteEntry::new("blue_shell", SpriteRole::Orbiter, "blue_shell.png"))
        .with_sprite(SpriteEntry::new("mario", SpriteRole::PathFollower, "mario.png"))
}

/// Uneven frame times, including a stall and a zero-length frame
fn frame_times() -> Vec<f32> {
    (0..240)
        .map(|i| match i % 7 {
            0 => 0.0,
            3 => 0.05,
            5 => 0.25,
            _ => 1.0 / 60.0,
        })
        .collect()
}

fn run(scene: &Scene<&'static str>, dts: &[f32]) -> Vec<Vec<DrawCall<&'static str>>> {
    let mut state = AnimationState::new();
    dts.iter()
        .map(|&dt| {
            state.advance(scene.motion(), dt);
            scene.draw_calls(&state)
        })
        .collect()
}

// ==================== Integration Tests ====================

#[test]
fn test_accumulators_integrate_step_by_step() {
    let motion = MotionParams::default();
    let mut state = AnimationState::new();

    for dt in frame_times() {
        let before = state;
        state.advance(&motion, dt);

        assert!((state.theta - (before.theta + motion.theta_rate * dt)).abs() < EPSILON);
        assert!(
            (state.rotation_amount - (before.rotation_amount + motion.rotation_rate * dt)).abs()
                < EPSILON
        );
        assert!(
            (state.horizontal_offset - (before.horizontal_offset + state.theta.cos() * dt)).abs()
                < EPSILON
        );
        assert!(
            (state.vertical_offset - (before.vertical_offset + state.theta.sin() * dt)).abs()
                < EPSILON
        );
    }
}

#[test]
fn test_draw_order_and_fixed_background() {
    let scene = default_scene();
    let frames = run(&scene, &frame_times());
    let background = scene.motion().background_transform();

    for draws in &frames {
        let textures: Vec<&str> = draws.iter().map(|d| d.texture).collect();
        assert_eq!(textures, vec!["track.png", "blue_shell.png", "mario.png"]);
        assert_eq!(draws[0].model, background);
    }
}

#[test]
fn test_orbiter_stays_on_breathing_circle() {
    let scene = default_scene();
    let motion = *scene.motion();
    let mut state = AnimationState::new();

    for dt in frame_times() {
        state.advance(&motion, dt);
        let draws = scene.draw_calls(&state);

        let orbiter = origin(draws[1].model);
        let follower = origin(draws[2].model);
        let distance = (orbiter - follower).length();
        let expected = motion.orbit_radius * motion.breathing_scale(state.theta);
        assert!(
            (distance - expected).abs() < 0.001,
            "theta={} distance={} expected={}",
            state.theta,
            distance,
            expected
        );
    }
}

#[test]
fn test_follower_tracks_offsets() {
    let scene = default_scene();
    let motion = *scene.motion();
    let mut state = AnimationState::new();

    for dt in frame_times() {
        state.advance(&motion, dt);
        let follower = origin(scene.draw_calls(&state)[2].model);
        assert!((follower.x - 3.0 * state.horizontal_offset).abs() < EPSILON);
        assert!((follower.y - (-0.7 + state.vertical_offset)).abs() < EPSILON);
    }
}

#[test]
fn test_zero_dt_frames_repeat_previous_frame() {
    let scene = default_scene();
    let frames = run(&scene, &[0.3, 0.0, 0.0, 0.1, 0.0]);

    assert_eq!(frames[0], frames[1]);
    assert_eq!(frames[1], frames[2]);
    assert_ne!(frames[2], frames[3]);
    assert_eq!(frames[3], frames[4]);
}

#[test]
fn test_identical_runs_are_bit_identical() {
    let dts = frame_times();
    assert_eq!(run(&default_scene(), &dts), run(&default_scene(), &dts));
}

#[test]
fn test_swapped_roles_swap_positions() {
    let swapped = Scene::new(MotionParams::default())
        .with_sprite(SpriteEntry::new("track", SpriteRole::Background, "track.png"))
        .with_sprite(SpriteEntry::new("blue_shell", SpriteRole::PathFollower, "blue_shell.png"))
        .with_sprite(SpriteEntry::new("mario", SpriteRole::Orbiter, "mario.png"));

    let dts = frame_times();
    let original = run(&default_scene(), &dts);
    let swapped = run(&swapped, &dts);

    for (a, b) in original.iter().zip(&swapped) {
        assert_eq!(a[1].model, b[2].model);
        assert_eq!(a[2].model, b[1].model);
    }
}
