//! GPU-compatible data types for the sprite pipeline
//!
//! These types are designed to match the shader layouts exactly.
//! All types derive Pod and Zeroable for safe GPU buffer operations.

use bytemuck::{Pod, Zeroable};
use orbit2d_math::mat4::IDENTITY;

/// Shader location of the 2D position attribute
pub const POSITION_ATTRIBUTE: u32 = 0;

/// Shader location of the texture coordinate attribute
pub const TEX_COORD_ATTRIBUTE: u32 = 1;

/// A vertex of the unit sprite quad
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct SpriteVertex {
    /// Model-space position (x, y)
    pub position: [f32; 2],
    /// Texture coordinate (u, v), v = 0 at the top row of the image
    pub tex_coord: [f32; 2],
}

impl SpriteVertex {
    pub const fn new(position: [f32; 2], tex_coord: [f32; 2]) -> Self {
        Self { position, tex_coord }
    }
}

/// Unit quad centred on the origin, as two triangles
pub const QUAD_VERTICES: [SpriteVertex; 6] = [
    // triangle 1
    SpriteVertex::new([-0.5, -0.5], [0.0, 1.0]),
    SpriteVertex::new([0.5, -0.5], [1.0, 1.0]),
    SpriteVertex::new([0.5, 0.5], [1.0, 0.0]),
    // triangle 2
    SpriteVertex::new([-0.5, -0.5], [0.0, 1.0]),
    SpriteVertex::new([0.5, 0.5], [1.0, 0.0]),
    SpriteVertex::new([-0.5, 0.5], [0.0, 0.0]),
];

/// Number of vertices drawn per sprite
pub const QUAD_VERTEX_COUNT: u32 = QUAD_VERTICES.len() as u32;

/// Projection and view matrices (group 0)
/// Layout: 128 bytes (must match vertex_textured.wgsl Camera)
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct CameraUniforms {
    pub projection_matrix: [[f32; 4]; 4],
    pub view_matrix: [[f32; 4]; 4],
}

impl Default for CameraUniforms {
    fn default() -> Self {
        Self {
            projection_matrix: IDENTITY,
            view_matrix: IDENTITY,
        }
    }
}

/// Per-draw model matrix (group 1, dynamic offset)
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct ModelUniform {
    pub model_matrix: [[f32; 4]; 4],
}

impl Default for ModelUniform {
    fn default() -> Self {
        Self { model_matrix: IDENTITY }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::size_of;

    #[test]
    fn test_sprite_vertex_size() {
        // 2 floats position + 2 floats tex coord = 16 bytes
        assert_eq!(size_of::<SpriteVertex>(), 16);
    }

    #[test]
    fn test_camera_uniforms_size() {
        // 2 matrices * 64 bytes
        assert_eq!(size_of::<CameraUniforms>(), 128);
    }

    #[test]
    fn test_model_uniform_size() {
        assert_eq!(size_of::<ModelUniform>(), 64);
    }

    #[test]
    fn test_quad_covers_unit_square() {
        assert_eq!(QUAD_VERTEX_COUNT, 6);
        for v in QUAD_VERTICES.iter() {
            assert_eq!(v.position[0].abs(), 0.5);
            assert_eq!(v.position[1].abs(), 0.5);
            // Bottom edge samples the last image row
            let expected_v = if v.position[1] < 0.0 { 1.0 } else { 0.0 };
            assert_eq!(v.tex_coord[1], expected_v);
        }
    }

    #[test]
    fn test_quad_triangles_are_counter_clockwise() {
        for tri in QUAD_VERTICES.chunks(3) {
            let [a, b, c] = [tri[0].position, tri[1].position, tri[2].position];
            let cross = (b[0] - a[0]) * (c[1] - a[1]) - (b[1] - a[1]) * (c[0] - a[0]);
            assert!(cross > 0.0);
        }
    }
}
