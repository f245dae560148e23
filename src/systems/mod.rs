//! Application systems
//!
//! Window, GPU rendering, simulation clock and the frame loop, kept apart
//! from main.rs so each can be tested on its own.

pub mod frame_loop;
mod render;
mod simulation;
mod window;

pub use frame_loop::{AppStatus, FrameLoop, FrameRenderer, IterationOutcome};
pub use render::{RenderError, RenderSystem};
pub use simulation::SimulationSystem;
pub use window::{WindowError, WindowSystem};
