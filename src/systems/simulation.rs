//! Scene simulation system
//!
//! Manages the per-frame update:
//! - Delta time measurement from a monotonic clock
//! - Advancing the animation accumulators

use std::time::Instant;
use orbit2d_scene::{AnimationState, MotionParams};

/// Owns the frame clock and the animation state
pub struct SimulationSystem {
    last_frame: Instant,
    state: AnimationState,
}

impl SimulationSystem {
    /// Create a new simulation system with all accumulators at zero
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            state: AnimationState::new(),
        }
    }

    /// Seconds elapsed since the previous call (or since construction)
    ///
    /// Not capped: animation speed is tied to wall-clock time.
    pub fn measure_dt(&mut self) -> f32 {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;
        dt
    }

    /// Advance the animation by an explicit delta time
    pub fn step(&mut self, motion: &MotionParams, dt: f32) {
        self.state.advance(motion, dt);
        log::trace!("dt={:.4} state={:?}", dt, self.state);
    }

    /// Current animation state
    pub fn state(&self) -> &AnimationState {
        &self.state
    }
}

impl Default for SimulationSystem {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delta_time_measured() {
        let mut sim = SimulationSystem::new();
        std::thread::sleep(std::time::Duration::from_millis(20));
        let dt = sim.measure_dt();
        assert!(dt >= 0.02, "dt was {}", dt);
        // Clock restarts at each measurement
        assert!(sim.measure_dt() < dt);
    }

    #[test]
    fn test_delta_time_not_capped() {
        let mut sim = SimulationSystem::new();
        std::thread::sleep(std::time::Duration::from_millis(300));
        assert!(sim.measure_dt() >= 0.3);
    }

    #[test]
    fn test_step_advances_state() {
        let motion = MotionParams::default();
        let mut sim = SimulationSystem::default();
        assert_eq!(*sim.state(), AnimationState::default());

        sim.step(&motion, 0.5);
        assert!((sim.state().theta - 0.5).abs() < 0.00001);

        let before = *sim.state();
        sim.step(&motion, 0.0);
        assert_eq!(*sim.state(), before);
    }
}
