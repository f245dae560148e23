//! SceneBuilder - sprite table construction
//!
//! Turns the `sprites` config section into a [`Scene`], resolving each image
//! path to a texture handle through a caller-supplied loader.

use orbit2d_scene::{MotionParams, Scene, SpriteEntry, SpriteRole};
use crate::config::SpriteConfig;

/// Builder for the sprite table
///
/// # Example
/// ```ignore
/// let scene = SceneBuilder::new(MotionParams::default())
///     .add_sprite("track", SpriteRole::Background, track_key)
///     .add_sprite("blue_shell", SpriteRole::Orbiter, shell_key)
///     .add_sprite("mario", SpriteRole::PathFollower, mario_key)
///     .build();
/// ```
pub struct SceneBuilder<T> {
    scene: Scene<T>,
}

impl<T: Copy> SceneBuilder<T> {
    /// Create a builder with an empty sprite table
    pub fn new(motion: MotionParams) -> Self {
        Self {
            scene: Scene::new(motion),
        }
    }

    /// Append a sprite; draw order follows insertion order
    pub fn add_sprite(mut self, name: &str, role: SpriteRole, texture: T) -> Self {
        self.scene.add_sprite(SpriteEntry::new(name, role, texture));
        self
    }

    /// Build a scene from config rows, loading each texture with `load`
    ///
    /// Stops at the first loader error.
    pub fn from_config<E, F>(
        sprites: &[SpriteConfig],
        motion: MotionParams,
        mut load: F,
    ) -> Result<Scene<T>, E>
    where
        F: FnMut(&SpriteConfig) -> Result<T, E>,
    {
        let mut builder = Self::new(motion);
        for sprite in sprites {
            let texture = load(sprite)?;
            builder = builder.add_sprite(&sprite.name, sprite.role, texture);
        }

        if !builder.scene.entries().iter().any(|e| e.role == SpriteRole::PathFollower) {
            log::warn!("Sprite table has no path follower; orbiters circle the base offset");
        }

        Ok(builder.build())
    }

    /// Build the scene
    pub fn build(self) -> Scene<T> {
        log::info!("Built scene with {} sprites", self.scene.len());
        self.scene
    }
}
