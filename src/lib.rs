//! orbit2d - animated 2D sprite scene
//!
//! Library half of the binary: configuration, input mapping, scene
//! construction and the systems driven by the winit event loop.

pub mod config;
pub mod error;
pub mod input;
pub mod scene;
pub mod systems;

pub use config::AppConfig;
pub use error::StartupError;
