//! 2D Sprite Rendering Library
//!
//! This crate provides the wgpu-based pipeline that draws the orbit2d scene.
//!
//! ## Key Components
//!
//! - [`context::RenderContext`] - WGPU device, queue, and surface management
//! - [`texture::TextureStore`] - Decodes sprite images and owns their GPU textures
//! - [`pipeline::SpritePipeline`] - Textured quad pipeline with projection/view/model uniforms

pub mod context;
pub mod pipeline;
pub mod texture;

pub use context::{ContextError, RenderContext};
pub use pipeline::{ShaderError, SpritePipeline};
pub use texture::{
    decode_rgba, DecodedImage, PathIndex, Texture, TextureError, TextureKey, TextureStore,
};

// Re-export scene types for convenience
pub use orbit2d_scene::{DrawCall, Scene, SpriteEntry, SpriteRole};
