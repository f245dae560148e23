//! Scene construction utilities
//!
//! Builds the sprite table from configuration.

mod scene_builder;

pub use scene_builder::SceneBuilder;
