//! Scene state for the orbit2d demo
//!
//! This crate holds everything that changes from frame to frame, and nothing
//! that touches the GPU:
//!
//! - [`AnimationState`] - Time-integrated scalar accumulators
//! - [`MotionParams`] - Motion constants and the per-role transform functions
//! - [`SpriteRole`] - Background, path follower, or orbiter
//! - [`Scene`] - Ordered sprite table producing [`DrawCall`]s each frame

mod animation;
mod motion;
mod scene;

pub use animation::AnimationState;
pub use motion::MotionParams;
pub use scene::{DrawCall, Scene, SpriteEntry, SpriteRole};

// Re-export commonly used math types for convenience
pub use orbit2d_math::{Mat4, Vec3};
