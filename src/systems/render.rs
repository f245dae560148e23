//! GPU rendering system
//!
//! Manages GPU rendering including:
//! - Render context and surface
//! - Sprite pipeline and its camera uniforms
//! - Sprite textures
//! - Frame rendering

use std::path::Path;
use std::sync::Arc;
use winit::window::Window;
use orbit2d_math::mat4::IDENTITY;
use orbit2d_render::{
    context::RenderContext,
    DrawCall, SpritePipeline, TextureError, TextureKey, TextureStore,
};
use crate::config::{RenderingConfig, ShaderConfig};
use crate::error::StartupError;
use crate::systems::frame_loop::FrameRenderer;

/// Render error types
#[derive(Debug)]
pub enum RenderError {
    /// Surface was lost or outdated and has been reconfigured
    SurfaceLost,
    /// GPU out of memory
    OutOfMemory,
    /// Other surface error
    Other(String),
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::SurfaceLost => write!(f, "Surface lost"),
            RenderError::OutOfMemory => write!(f, "Out of memory"),
            RenderError::Other(msg) => write!(f, "Render error: {}", msg),
        }
    }
}

impl std::error::Error for RenderError {}

/// Manages GPU rendering
pub struct RenderSystem {
    context: RenderContext,
    pipeline: SpritePipeline,
    textures: TextureStore,
    clear_color: wgpu::Color,
}

impl RenderSystem {
    /// Create the render system: GPU context, shaders, and camera uniforms
    pub fn new(
        window: Arc<Window>,
        render_config: &RenderingConfig,
        shader_config: &ShaderConfig,
        vsync: bool,
    ) -> Result<Self, StartupError> {
        let context = pollster::block_on(RenderContext::with_options(
            window,
            vsync,
            render_config.prefer_srgb,
        ))?;

        let textures = TextureStore::new(&context.device);

        let mut pipeline = SpritePipeline::load(
            &context.device,
            context.config.format,
            textures.bind_group_layout(),
            &shader_config.vertex,
            &shader_config.fragment,
        )?;

        pipeline.set_projection_matrix(&context.queue, render_config.projection.matrix());
        pipeline.set_view_matrix(&context.queue, IDENTITY);

        log::info!(
            "Render system ready ({}x{}, {:?})",
            context.size.width,
            context.size.height,
            context.config.format
        );
        log::debug!(
            "Sprite attributes: position @{}, tex_coord @{}; {} model slots",
            pipeline.position_attribute(),
            pipeline.tex_coordinate_attribute(),
            pipeline.model_capacity()
        );

        Ok(Self {
            context,
            pipeline,
            textures,
            clear_color: render_config.clear_color(),
        })
    }

    /// Load a sprite image; the same path always yields the same key
    pub fn load_texture<P: AsRef<Path>>(&mut self, path: P) -> Result<TextureKey, TextureError> {
        self.textures
            .load(&self.context.device, &self.context.queue, path)
    }

    /// Number of distinct textures uploaded
    pub fn texture_count(&self) -> usize {
        self.textures.count()
    }

    /// Handle window resize
    pub fn resize(&mut self, width: u32, height: u32) {
        self.context
            .resize(winit::dpi::PhysicalSize::new(width, height));
    }
}

impl FrameRenderer<TextureKey> for RenderSystem {
    fn render_frame(&mut self, draws: &[DrawCall<TextureKey>]) -> Result<(), RenderError> {
        let output = match self.context.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost) | Err(wgpu::SurfaceError::Outdated) => {
                self.context.resize(self.context.size);
                return Err(RenderError::SurfaceLost);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => return Err(RenderError::OutOfMemory),
            Err(e) => return Err(RenderError::Other(format!("{:?}", e))),
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        self.pipeline.draw(
            &self.context.device,
            &self.context.queue,
            &mut encoder,
            &view,
            self.clear_color,
            draws,
            &self.textures,
        );

        self.context.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_error_display() {
        assert_eq!(format!("{}", RenderError::SurfaceLost), "Surface lost");
        assert_eq!(format!("{}", RenderError::OutOfMemory), "Out of memory");
        assert_eq!(
            format!("{}", RenderError::Other("test".to_string())),
            "Render error: test"
        );
    }
}
