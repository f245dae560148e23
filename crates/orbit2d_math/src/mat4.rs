//! 4x4 Matrix utilities for 2D sprite transforms
//!
//! Matrices are column-major (`m[column][row]`) so they can be uploaded to
//! WGSL `mat4x4<f32>` uniforms without transposition.
//!
//! The composition helpers ([`translate`], [`scale`], [`rotate_z`]) follow the
//! post-multiplication convention: `translate(m, v)` returns `m * T(v)`, so the
//! last operation in a chain is the first one applied to a vertex.

use crate::Vec3;

/// 4x4 matrix type (column-major)
pub type Mat4 = [[f32; 4]; 4];

/// Identity matrix
pub const IDENTITY: Mat4 = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

/// Create a rotation matrix in the plane spanned by axes `p1` and `p2`.
///
/// # Arguments
/// * `angle` - Rotation angle in radians
/// * `p1`, `p2` - Indices of the axes forming the rotation plane (0=X, 1=Y, 2=Z)
///
/// Rotating in plane (0, 1) with a positive angle turns +X towards +Y
/// (counter-clockwise about +Z).
pub fn plane_rotation(angle: f32, p1: usize, p2: usize) -> Mat4 {
    let cs = angle.cos();
    let sn = angle.sin();

    let mut m = IDENTITY;

    m[p1][p1] = cs;
    m[p2][p2] = cs;
    m[p1][p2] = sn;
    m[p2][p1] = -sn;

    m
}

/// Pure translation matrix
pub fn translation(v: Vec3) -> Mat4 {
    let mut m = IDENTITY;
    m[3][0] = v.x;
    m[3][1] = v.y;
    m[3][2] = v.z;
    m
}

/// Pure (non-uniform) scale matrix
pub fn scaling(v: Vec3) -> Mat4 {
    let mut m = IDENTITY;
    m[0][0] = v.x;
    m[1][1] = v.y;
    m[2][2] = v.z;
    m
}

/// `m * T(v)`
#[inline]
pub fn translate(m: Mat4, v: Vec3) -> Mat4 {
    mul(m, translation(v))
}

/// `m * S(v)`
#[inline]
pub fn scale(m: Mat4, v: Vec3) -> Mat4 {
    mul(m, scaling(v))
}

/// `m * R_z(angle)`, rotation about the +Z axis in radians
#[inline]
pub fn rotate_z(m: Mat4, angle: f32) -> Mat4 {
    mul(m, plane_rotation(angle, 0, 1))
}

/// Right-handed orthographic projection with a `[0, 1]` depth range.
///
/// Maps `left..right` and `bottom..top` to `-1..1`. Eye-space `z = -near`
/// maps to depth 0 and `z = -far` to depth 1.
pub fn orthographic(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Mat4 {
    let rl = 1.0 / (right - left);
    let tb = 1.0 / (top - bottom);
    let fn_ = 1.0 / (far - near);

    [
        [2.0 * rl, 0.0, 0.0, 0.0],
        [0.0, 2.0 * tb, 0.0, 0.0],
        [0.0, 0.0, -fn_, 0.0],
        [-(right + left) * rl, -(top + bottom) * tb, -near * fn_, 1.0],
    ]
}

/// Multiply two 4x4 matrices: result = a * b
///
/// In column-major convention, this applies b first, then a.
#[allow(clippy::needless_range_loop)]
pub fn mul(a: Mat4, b: Mat4) -> Mat4 {
    let mut result = [[0.0f32; 4]; 4];

    for i in 0..4 {
        for j in 0..4 {
            for k in 0..4 {
                result[i][j] += a[k][j] * b[i][k];
            }
        }
    }

    result
}

/// Transform a point (w = 1) by a 4x4 matrix
pub fn transform_point(m: Mat4, p: Vec3) -> Vec3 {
    Vec3::new(
        m[0][0] * p.x + m[1][0] * p.y + m[2][0] * p.z + m[3][0],
        m[0][1] * p.x + m[1][1] * p.y + m[2][1] * p.z + m[3][1],
        m[0][2] * p.x + m[1][2] * p.y + m[2][2] * p.z + m[3][2],
    )
}

/// World-space position of the model origin (the translation column)
#[inline]
pub fn origin(m: Mat4) -> Vec3 {
    Vec3::new(m[3][0], m[3][1], m[3][2])
}
