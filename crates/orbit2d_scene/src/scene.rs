//! Sprite table and per-frame draw list
//!
//! A [`Scene`] is an ordered table of sprites. Each entry names the role whose
//! transform it uses and carries an opaque texture handle `T`, so this crate
//! stays independent of the GPU backend.

use orbit2d_math::Mat4;
use serde::{Serialize, Deserialize};

use crate::{AnimationState, MotionParams};

/// Which transform function a sprite uses
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpriteRole {
    /// Static full-screen backdrop
    Background,
    /// Moves along the sinusoidal path and breathes
    PathFollower,
    /// Circles the path follower while spinning
    Orbiter,
}

impl SpriteRole {
    /// Model matrix for this role at the given animation state
    pub fn transform(self, motion: &MotionParams, state: &AnimationState) -> Mat4 {
        match self {
            SpriteRole::Background => motion.background_transform(),
            SpriteRole::PathFollower => motion.follower_transform(state),
            SpriteRole::Orbiter => motion.orbiter_transform(state),
        }
    }
}

/// One row of the sprite table
#[derive(Clone, Debug, PartialEq)]
pub struct SpriteEntry<T> {
    /// Name used in logs
    pub name: String,
    /// Transform function selector
    pub role: SpriteRole,
    /// Texture handle bound for this sprite's draw
    pub texture: T,
}

impl<T> SpriteEntry<T> {
    pub fn new(name: impl Into<String>, role: SpriteRole, texture: T) -> Self {
        Self {
            name: name.into(),
            role,
            texture,
        }
    }
}

/// A single draw: model matrix plus texture
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawCall<T> {
    pub model: Mat4,
    pub texture: T,
}

/// The ordered sprite table
#[derive(Clone, Debug)]
pub struct Scene<T> {
    entries: Vec<SpriteEntry<T>>,
    motion: MotionParams,
}

impl<T: Copy> Scene<T> {
    /// Create an empty scene
    pub fn new(motion: MotionParams) -> Self {
        Self {
            entries: Vec::new(),
            motion,
        }
    }

    /// Append a sprite; sprites are drawn in insertion order
    pub fn add_sprite(&mut self, entry: SpriteEntry<T>) {
        log::debug!("Added sprite '{}' as {:?}", entry.name, entry.role);
        self.entries.push(entry);
    }

    /// Builder form of [`Scene::add_sprite`]
    pub fn with_sprite(mut self, entry: SpriteEntry<T>) -> Self {
        self.add_sprite(entry);
        self
    }

    /// Motion constants used by every transform
    pub fn motion(&self) -> &MotionParams {
        &self.motion
    }

    /// All sprites in draw order
    pub fn entries(&self) -> &[SpriteEntry<T>] {
        &self.entries
    }

    /// Number of sprites
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the scene has no sprites
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find a sprite by name
    pub fn find(&self, name: &str) -> Option<&SpriteEntry<T>> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Recompute every transform for this frame, in draw order
    pub fn draw_calls(&self, state: &AnimationState) -> Vec<DrawCall<T>> {
        self.entries
            .iter()
            .map(|entry| DrawCall {
                model: entry.role.transform(&self.motion, state),
                texture: entry.texture,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orbit2d_math::mat4::origin;

    fn default_scene() -> Scene<u32> {
        Scene::new(MotionParams::default())
            .with_sprite(SpriteEntry::new("track", SpriteRole::Background, 0))
            .with_sprite(SpriteEntry::new("blue_shell", SpriteRole::Orbiter, 1))
            .with_sprite(SpriteEntry::new("mario", SpriteRole::PathFollower, 2))
    }

    #[test]
    fn test_draw_order_follows_table() {
        let scene = default_scene();
        let draws = scene.draw_calls(&AnimationState::default());
        let textures: Vec<u32> = draws.iter().map(|d| d.texture).collect();
        assert_eq!(textures, vec![0, 1, 2]);
    }

    #[test]
    fn test_background_constant_across_frames() {
        let scene = default_scene();
        let motion = *scene.motion();
        let mut state = AnimationState::default();
        let first = scene.draw_calls(&state)[0].model;
        for _ in 0..10 {
            state.advance(&motion, 0.37);
            assert_eq!(scene.draw_calls(&state)[0].model, first);
        }
    }

    #[test]
    fn test_zero_dt_frames_are_identical() {
        let scene = default_scene();
        let motion = *scene.motion();
        let state = AnimationState::default().advanced(&motion, 1.3);
        let before = scene.draw_calls(&state);
        let after = scene.draw_calls(&state.advanced(&motion, 0.0));
        assert_eq!(before, after);
    }

    #[test]
    fn test_orbit_pairing_is_a_parameter() {
        // Swapping roles swaps which texture follows the path
        let swapped = Scene::new(MotionParams::default())
            .with_sprite(SpriteEntry::new("track", SpriteRole::Background, 0u32))
            .with_sprite(SpriteEntry::new("blue_shell", SpriteRole::PathFollower, 1))
            .with_sprite(SpriteEntry::new("mario", SpriteRole::Orbiter, 2));

        let state = AnimationState::default();
        let draws = swapped.draw_calls(&state);
        assert!((origin(draws[1].model).y - (-0.7)).abs() < 0.0001);
        assert!((origin(draws[2].model).y - 1.3).abs() < 0.0001);
    }

    #[test]
    fn test_find_by_name() {
        let scene = default_scene();
        assert_eq!(scene.find("mario").map(|e| e.role), Some(SpriteRole::PathFollower));
        assert!(scene.find("luigi").is_none());
        assert_eq!(scene.len(), 3);
        assert!(!scene.is_empty());
    }
}
