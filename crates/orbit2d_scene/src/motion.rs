//! Motion parameters and the per-role transform functions
//!
//! Every transform is rebuilt from scratch each frame from an
//! [`AnimationState`] and the constants in [`MotionParams`], so nothing
//! accumulates in the matrices themselves.

use orbit2d_math::mat4::{self, Mat4, IDENTITY};
use orbit2d_math::Vec3;
use serde::{Serialize, Deserialize};

use crate::AnimationState;

/// Constants driving the scene's motion
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionParams {
    /// Angular rate of the orbiter's spin (radians per second)
    pub rotation_rate: f32,
    /// Rate at which `theta` advances (radians per second)
    pub theta_rate: f32,
    /// Fixed offset of the path follower before path displacement
    pub follower_base_offset: [f32; 2],
    /// Multiplier applied to the accumulated horizontal offset
    pub path_x_amplitude: f32,
    /// Multiplier applied to the accumulated vertical offset
    pub path_y_amplitude: f32,
    /// Distance between the orbiter and the path follower
    pub orbit_radius: f32,
    /// `theta` is divided by this before taking the breathing sine
    pub breath_period_divisor: f32,
    /// Amplitude of the breathing scale around 1.0
    pub breath_amplitude: f32,
    /// Background rotation (radians)
    pub background_rotation: f32,
    /// Background non-uniform scale
    pub background_scale: [f32; 2],
}

impl Default for MotionParams {
    fn default() -> Self {
        Self {
            rotation_rate: 45.0f32.to_radians(),
            theta_rate: 1.0,
            follower_base_offset: [0.0, -0.7],
            path_x_amplitude: 3.0,
            path_y_amplitude: 1.0,
            orbit_radius: 2.0,
            breath_period_divisor: 0.5,
            breath_amplitude: 0.5,
            background_rotation: 90.0f32.to_radians(),
            background_scale: [7.5, 10.0],
        }
    }
}

impl MotionParams {
    /// Uniform breathing factor of the path follower at the given `theta`
    #[inline]
    pub fn breathing_scale(&self, theta: f32) -> f32 {
        (theta / self.breath_period_divisor).sin() * self.breath_amplitude + 1.0
    }

    /// Background transform: `R_z(rotation) * S(sx, sy, 0)`
    ///
    /// Depends on constants only, so it is identical every frame.
    pub fn background_transform(&self) -> Mat4 {
        let [sx, sy] = self.background_scale;
        let m = mat4::rotate_z(IDENTITY, self.background_rotation);
        mat4::scale(m, Vec3::new(sx, sy, 0.0))
    }

    /// Path follower transform:
    /// `T(base) * T(ax * horizontal, ay * vertical) * S(b, b, 0)`
    pub fn follower_transform(&self, state: &AnimationState) -> Mat4 {
        let [bx, by] = self.follower_base_offset;
        let breath = self.breathing_scale(state.theta);

        let m = mat4::translate(IDENTITY, Vec3::xy(bx, by));
        let m = mat4::translate(
            m,
            Vec3::xy(
                self.path_x_amplitude * state.horizontal_offset,
                self.path_y_amplitude * state.vertical_offset,
            ),
        );
        mat4::scale(m, Vec3::new(breath, breath, 0.0))
    }

    /// Orbiter transform: the follower's transform, displaced by
    /// `(r sin theta, r cos theta)` in the follower's (scaled) space and spun
    /// by the accumulated rotation.
    pub fn orbiter_transform(&self, state: &AnimationState) -> Mat4 {
        let follower = self.follower_transform(state);
        let r = self.orbit_radius;
        let m = mat4::translate(
            follower,
            Vec3::xy(r * state.theta.sin(), r * state.theta.cos()),
        );
        mat4::rotate_z(m, state.rotation_amount)
    }
}
