//! 2D Scene Mathematics Library
//!
//! This crate provides the vector and matrix types used to place sprites in
//! the orbit2d scene.
//!
//! ## Core Types
//!
//! - [`Vec3`] - 3D vector (translation / scale arguments)
//! - [`Mat4`] - 4x4 column-major matrix for model, view and projection transforms

mod vec3;
pub mod mat4;

pub use vec3::Vec3;
pub use mat4::Mat4;
