//! Window management system
//!
//! Creates the single fixed-size window the scene renders into.

use std::sync::Arc;
use winit::{
    event_loop::ActiveEventLoop,
    window::Window,
};
use crate::config::WindowConfig;

/// Owns the application window
pub struct WindowSystem {
    window: Arc<Window>,
}

impl WindowSystem {
    /// Create window from config
    pub fn create(
        event_loop: &ActiveEventLoop,
        config: &WindowConfig,
    ) -> Result<Self, WindowError> {
        Self::validate(config)?;

        let attrs = Window::default_attributes()
            .with_title(&config.title)
            .with_inner_size(winit::dpi::PhysicalSize::new(config.width, config.height))
            .with_resizable(false);

        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .map_err(|e| WindowError::CreationFailed(e.to_string()))?,
        );

        log::info!("Created window '{}' ({}x{})", config.title, config.width, config.height);

        Ok(Self { window })
    }

    /// Reject configurations the surface can never be created for
    pub fn validate(config: &WindowConfig) -> Result<(), WindowError> {
        if config.width == 0 || config.height == 0 {
            return Err(WindowError::InvalidSize {
                width: config.width,
                height: config.height,
            });
        }
        Ok(())
    }

    /// Get window reference (for RenderContext creation)
    pub fn window(&self) -> &Arc<Window> {
        &self.window
    }

    /// Request a redraw
    pub fn request_redraw(&self) {
        self.window.request_redraw();
    }
}

#[derive(Debug)]
pub enum WindowError {
    CreationFailed(String),
    /// Width or height is zero
    InvalidSize { width: u32, height: u32 },
}

impl std::fmt::Display for WindowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WindowError::CreationFailed(msg) => write!(f, "Window creation failed: {}", msg),
            WindowError::InvalidSize { width, height } => {
                write!(f, "Invalid window size {}x{}", width, height)
            }
        }
    }
}

impl std::error::Error for WindowError {}
