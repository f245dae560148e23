//! Frame loop state machine
//!
//! [`FrameLoop`] is the application context threaded through every frame.
//! Input actions are applied as they arrive; each iteration advances the
//! animation, recomputes every sprite transform and hands the draw list to a
//! [`FrameRenderer`].
//!
//! States: `Running` → `Terminated` on a quit action. Actions arrive between
//! iterations, so any iteration already started has completed (update and
//! draw) by the time the quit is handled. Every later iteration returns
//! [`IterationOutcome::Exit`] without drawing.

use orbit2d_scene::{DrawCall, Scene};
use crate::input::InputAction;
use crate::systems::render::RenderError;
use crate::systems::SimulationSystem;

/// Lifecycle of the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppStatus {
    Running,
    Terminated,
}

/// What the caller should do after an iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IterationOutcome {
    /// Keep requesting frames
    Continue,
    /// Stop the event loop
    Exit,
}

/// Something that can present a list of sprite draws
pub trait FrameRenderer<T> {
    /// Clear, draw every sprite in order, and present
    fn render_frame(&mut self, draws: &[DrawCall<T>]) -> Result<(), RenderError>;
}

/// Per-run application context
pub struct FrameLoop<T> {
    status: AppStatus,
    simulation: SimulationSystem,
    scene: Scene<T>,
    frames: u64,
}

impl<T: Copy> FrameLoop<T> {
    pub fn new(scene: Scene<T>) -> Self {
        Self {
            status: AppStatus::Running,
            simulation: SimulationSystem::new(),
            scene,
            frames: 0,
        }
    }

    pub fn status(&self) -> AppStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == AppStatus::Running
    }

    /// Frames rendered so far
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    pub fn scene(&self) -> &Scene<T> {
        &self.scene
    }

    pub fn simulation(&self) -> &SimulationSystem {
        &self.simulation
    }

    /// Apply an input action, returning whether the caller should stop
    ///
    /// Takes effect immediately so a quit does not wait for the next redraw.
    pub fn handle_action(&mut self, action: InputAction) -> IterationOutcome {
        match action {
            InputAction::Quit => {
                if self.status == AppStatus::Running {
                    log::info!("Quit requested");
                }
                self.status = AppStatus::Terminated;
            }
        }
        self.outcome()
    }

    fn outcome(&self) -> IterationOutcome {
        match self.status {
            AppStatus::Running => IterationOutcome::Continue,
            AppStatus::Terminated => IterationOutcome::Exit,
        }
    }

    /// Run one iteration with a delta time measured from the frame clock
    pub fn run_iteration<R: FrameRenderer<T>>(&mut self, renderer: &mut R) -> IterationOutcome {
        if self.status == AppStatus::Terminated {
            return IterationOutcome::Exit;
        }
        let dt = self.simulation.measure_dt();
        self.run_iteration_with_dt(renderer, dt)
    }

    /// Run one iteration with an explicit delta time
    pub fn run_iteration_with_dt<R: FrameRenderer<T>>(
        &mut self,
        renderer: &mut R,
        dt: f32,
    ) -> IterationOutcome {
        if self.status == AppStatus::Terminated {
            return IterationOutcome::Exit;
        }

        // 1. Advance animation
        self.simulation.step(self.scene.motion(), dt);

        // 2. Recompute transforms and draw
        let draws = self.scene.draw_calls(self.simulation.state());
        match renderer.render_frame(&draws) {
            Ok(()) => self.frames += 1,
            Err(RenderError::SurfaceLost) => {
                log::debug!("Surface reconfigured, skipping frame");
            }
            Err(RenderError::OutOfMemory) => {
                log::error!("GPU out of memory, terminating");
                self.status = AppStatus::Terminated;
            }
            Err(e) => log::warn!("{}", e),
        }

        self.outcome()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orbit2d_math::mat4::origin;
    use orbit2d_scene::{MotionParams, SpriteEntry, SpriteRole};

    /// Records every frame; optionally fails with a fixed error kind
    #[derive(Default)]
    struct RecordingRenderer {
        frames: Vec<Vec<DrawCall<u32>>>,
        fail_with_oom: bool,
    }

    impl FrameRenderer<u32> for RecordingRenderer {
        fn render_frame(&mut self, draws: &[DrawCall<u32>]) -> Result<(), RenderError> {
            if self.fail_with_oom {
                return Err(RenderError::OutOfMemory);
            }
            self.frames.push(draws.to_vec());
            Ok(())
        }
    }

    fn test_loop() -> FrameLoop<u32> {
        let scene = Scene::new(MotionParams::default())
            .with_sprite(SpriteEntry::new("track", SpriteRole::Background, 10))
            .with_sprite(SpriteEntry::new("blue_shell", SpriteRole::Orbiter, 11))
            .with_sprite(SpriteEntry::new("mario", SpriteRole::PathFollower, 12));
        FrameLoop::new(scene)
    }

    #[test]
    fn test_starts_running() {
        let frame_loop = test_loop();
        assert_eq!(frame_loop.status(), AppStatus::Running);
        assert!(frame_loop.is_running());
        assert_eq!(frame_loop.frame_count(), 0);
    }

    #[test]
    fn test_draws_in_table_order() {
        let mut frame_loop = test_loop();
        let mut renderer = RecordingRenderer::default();

        assert_eq!(frame_loop.run_iteration_with_dt(&mut renderer, 0.016), IterationOutcome::Continue);

        let textures: Vec<u32> = renderer.frames[0].iter().map(|d| d.texture).collect();
        assert_eq!(textures, vec![10, 11, 12]);
    }

    #[test]
    fn test_quit_after_frame_stops_further_draws() {
        let mut frame_loop = test_loop();
        let mut renderer = RecordingRenderer::default();

        frame_loop.run_iteration_with_dt(&mut renderer, 0.016);
        assert_eq!(renderer.frames.len(), 1);

        // Takes effect without waiting for another iteration
        assert_eq!(frame_loop.handle_action(InputAction::Quit), IterationOutcome::Exit);
        assert_eq!(frame_loop.status(), AppStatus::Terminated);

        // No further draw calls
        assert_eq!(frame_loop.run_iteration_with_dt(&mut renderer, 0.016), IterationOutcome::Exit);
        assert_eq!(frame_loop.run_iteration(&mut renderer), IterationOutcome::Exit);
        assert_eq!(renderer.frames.len(), 1);
        assert_eq!(frame_loop.frame_count(), 1);
    }

    #[test]
    fn test_quit_before_first_frame_draws_nothing() {
        let mut frame_loop = test_loop();
        let mut renderer = RecordingRenderer::default();

        assert_eq!(frame_loop.handle_action(InputAction::Quit), IterationOutcome::Exit);
        // A repeated close request is harmless
        assert_eq!(frame_loop.handle_action(InputAction::Quit), IterationOutcome::Exit);

        assert_eq!(frame_loop.run_iteration_with_dt(&mut renderer, 0.016), IterationOutcome::Exit);
        assert!(renderer.frames.is_empty());
    }

    #[test]
    fn test_zero_dt_keeps_transforms() {
        let mut frame_loop = test_loop();
        let mut renderer = RecordingRenderer::default();

        frame_loop.run_iteration_with_dt(&mut renderer, 0.25);
        frame_loop.run_iteration_with_dt(&mut renderer, 0.0);
        frame_loop.run_iteration_with_dt(&mut renderer, 0.0);

        assert_eq!(renderer.frames[0], renderer.frames[1]);
        assert_eq!(renderer.frames[1], renderer.frames[2]);
    }

    #[test]
    fn test_first_frame_at_rest() {
        let mut frame_loop = test_loop();
        let mut renderer = RecordingRenderer::default();
        frame_loop.run_iteration_with_dt(&mut renderer, 0.0);

        let frame = &renderer.frames[0];
        let orbiter = origin(frame[1].model);
        let follower = origin(frame[2].model);
        assert!((follower.y + 0.7).abs() < 0.0001 && follower.x.abs() < 0.0001);
        assert!((orbiter.y - 1.3).abs() < 0.0001 && orbiter.x.abs() < 0.0001);
    }

    #[test]
    fn test_identical_runs_are_bit_identical() {
        let mut a = test_loop();
        let mut b = test_loop();
        let mut ra = RecordingRenderer::default();
        let mut rb = RecordingRenderer::default();

        for dt in [0.0, 0.016, 0.033, 0.5] {
            a.run_iteration_with_dt(&mut ra, dt);
            b.run_iteration_with_dt(&mut rb, dt);
        }
        assert_eq!(ra.frames, rb.frames);
    }

    #[test]
    fn test_out_of_memory_terminates() {
        let mut frame_loop = test_loop();
        let mut renderer = RecordingRenderer {
            fail_with_oom: true,
            ..Default::default()
        };

        assert_eq!(frame_loop.run_iteration_with_dt(&mut renderer, 0.016), IterationOutcome::Exit);
        assert_eq!(frame_loop.status(), AppStatus::Terminated);
        assert_eq!(frame_loop.frame_count(), 0);
    }

    #[test]
    fn test_measured_iteration_advances_time() {
        let mut frame_loop = test_loop();
        let mut renderer = RecordingRenderer::default();
        std::thread::sleep(std::time::Duration::from_millis(10));
        frame_loop.run_iteration(&mut renderer);
        assert!(frame_loop.simulation().state().theta > 0.0);
    }
}
