//! Startup error aggregation
//!
//! Everything that can fail before the first frame funnels into
//! [`StartupError`]; `main` logs it and exits with status 1.

use std::fmt;
use orbit2d_render::{ContextError, ShaderError, TextureError};
use crate::systems::WindowError;

/// Fatal initialization error
#[derive(Debug)]
pub enum StartupError {
    /// Window could not be created
    Window(WindowError),
    /// Surface, adapter or device acquisition failed
    Context(ContextError),
    /// Shader source could not be read
    Shader(ShaderError),
    /// Sprite image could not be loaded
    Texture(TextureError),
    /// Event loop could not be created or failed while running
    EventLoop(winit::error::EventLoopError),
}

impl fmt::Display for StartupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StartupError::Window(e) => write!(f, "{}", e),
            StartupError::Context(e) => write!(f, "GPU initialization failed: {}", e),
            StartupError::Shader(e) => write!(f, "{}", e),
            StartupError::Texture(e) => write!(f, "{}", e),
            StartupError::EventLoop(e) => write!(f, "Event loop error: {}", e),
        }
    }
}

impl std::error::Error for StartupError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StartupError::Window(e) => Some(e),
            StartupError::Context(e) => Some(e),
            StartupError::Shader(e) => Some(e),
            StartupError::Texture(e) => Some(e),
            StartupError::EventLoop(e) => Some(e),
        }
    }
}

impl From<WindowError> for StartupError {
    fn from(e: WindowError) -> Self {
        StartupError::Window(e)
    }
}

impl From<ContextError> for StartupError {
    fn from(e: ContextError) -> Self {
        StartupError::Context(e)
    }
}

impl From<ShaderError> for StartupError {
    fn from(e: ShaderError) -> Self {
        StartupError::Shader(e)
    }
}

impl From<TextureError> for StartupError {
    fn from(e: TextureError) -> Self {
        StartupError::Texture(e)
    }
}

impl From<winit::error::EventLoopError> for StartupError {
    fn from(e: winit::error::EventLoopError) -> Self {
        StartupError::EventLoop(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;
    use std::path::PathBuf;

    #[test]
    fn test_from_texture_error() {
        let err: StartupError = TextureError::EmptyImage(PathBuf::from("assets/empty.png")).into();
        assert!(matches!(err, StartupError::Texture(_)));
        assert!(err.source().is_some());
        assert!(err.to_string().contains("assets/empty.png"));
    }

    #[test]
    fn test_from_shader_error() {
        let err: StartupError = ShaderError::Io {
            path: PathBuf::from("shaders/missing.wgsl"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        }
        .into();
        assert!(matches!(err, StartupError::Shader(_)));
        assert!(err.to_string().contains("shaders/missing.wgsl"));
    }

    #[test]
    fn test_from_window_error() {
        let err: StartupError = WindowError::CreationFailed("no display".to_string()).into();
        assert_eq!(err.to_string(), "Window creation failed: no display");
        assert!(err.source().is_some());
    }

    #[test]
    fn test_context_error_prefix() {
        let err: StartupError = ContextError::NoAdapter.into();
        assert!(err.to_string().starts_with("GPU initialization failed: "));
    }
}
