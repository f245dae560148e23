//! Sprite rendering pipeline components

pub mod types;
pub mod sprite_pipeline;

// Re-export types
pub use types::{
    CameraUniforms, ModelUniform, SpriteVertex, POSITION_ATTRIBUTE, QUAD_VERTEX_COUNT,
    QUAD_VERTICES, TEX_COORD_ATTRIBUTE,
};

// Re-export pipeline
pub use sprite_pipeline::{aligned_stride, read_shader_source, ShaderError, SpritePipeline};
