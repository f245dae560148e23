//! Animation accumulators
//!
//! The only state that survives between frames. Each field is advanced by
//! `rate * dt`; matrices are derived from these values on demand.

use crate::MotionParams;

/// Scalar animation parameters integrated over time
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AnimationState {
    /// Phase angle driving the path, the orbit, and the breathing scale
    pub theta: f32,
    /// Accumulated spin of the orbiter (radians)
    pub rotation_amount: f32,
    /// Integral of `cos(theta)` over time
    pub horizontal_offset: f32,
    /// Integral of `sin(theta)` over time
    pub vertical_offset: f32,
}

impl AnimationState {
    /// Create a state with every accumulator at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance all accumulators by `dt` seconds.
    ///
    /// `theta` is advanced first; the path offsets integrate the cosine and
    /// sine of the updated phase. A zero `dt` leaves the state unchanged.
    pub fn advance(&mut self, motion: &MotionParams, dt: f32) {
        self.rotation_amount += motion.rotation_rate * dt;
        self.theta += motion.theta_rate * dt;
        self.horizontal_offset += self.theta.cos() * dt;
        self.vertical_offset += self.theta.sin() * dt;
    }

    /// Return a copy advanced by `dt` seconds
    pub fn advanced(mut self, motion: &MotionParams, dt: f32) -> Self {
        self.advance(motion, dt);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 0.00001;

    #[test]
    fn test_zero_dt_is_identity() {
        let motion = MotionParams::default();
        let state = AnimationState {
            theta: 1.2,
            rotation_amount: 0.4,
            horizontal_offset: -0.3,
            vertical_offset: 0.9,
        };
        assert_eq!(state.advanced(&motion, 0.0), state);
    }

    #[test]
    fn test_integration_is_consistent() {
        let motion = MotionParams::default();
        let before = AnimationState {
            theta: 0.5,
            ..AnimationState::default()
        };
        let dt = 0.016;
        let after = before.advanced(&motion, dt);

        assert!((after.rotation_amount - (before.rotation_amount + motion.rotation_rate * dt)).abs() < EPSILON);
        assert!((after.theta - (before.theta + motion.theta_rate * dt)).abs() < EPSILON);
        assert!((after.horizontal_offset - (before.horizontal_offset + after.theta.cos() * dt)).abs() < EPSILON);
        assert!((after.vertical_offset - (before.vertical_offset + after.theta.sin() * dt)).abs() < EPSILON);
    }

    #[test]
    fn test_phase_accumulators_never_decrease() {
        let motion = MotionParams::default();
        let mut state = AnimationState::new();
        let mut previous = state;
        for dt in [0.0, 0.001, 0.016, 0.1, 0.5, 0.0, 2.0] {
            state.advance(&motion, dt);
            assert!(state.theta >= previous.theta);
            assert!(state.rotation_amount >= previous.rotation_amount);
            previous = state;
        }
    }

    #[test]
    fn test_one_second_of_rotation() {
        let motion = MotionParams::default();
        let state = AnimationState::new().advanced(&motion, 1.0);
        assert!((state.rotation_amount - std::f32::consts::FRAC_PI_4).abs() < EPSILON);
        assert!((state.theta - 1.0).abs() < EPSILON);
    }
}
