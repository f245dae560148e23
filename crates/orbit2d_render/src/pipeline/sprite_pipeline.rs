//! Textured sprite pipeline
//!
//! Draws every sprite as the same unit quad. Bind groups:
//! - group 0: projection and view matrices
//! - group 1: model matrix, one dynamic-offset slot per draw in the frame
//! - group 2: the sprite's texture and sampler
//!
//! Vertex and fragment stages are compiled from two WGSL files read at
//! startup.

use std::io;
use std::num::NonZeroU64;
use std::path::{Path, PathBuf};

use orbit2d_math::Mat4;
use orbit2d_scene::DrawCall;
use wgpu::util::DeviceExt;

use super::types::{
    CameraUniforms, ModelUniform, SpriteVertex, POSITION_ATTRIBUTE, QUAD_VERTEX_COUNT,
    QUAD_VERTICES, TEX_COORD_ATTRIBUTE,
};
use crate::texture::{TextureKey, TextureStore};

/// Model slots allocated up front
const INITIAL_MODEL_CAPACITY: u32 = 8;

/// Error type for shader loading
#[derive(Debug)]
pub enum ShaderError {
    /// The shader source file could not be read
    Io { path: PathBuf, source: io::Error },
}

impl std::fmt::Display for ShaderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShaderError::Io { path, source } => {
                write!(f, "Unable to read shader '{}': {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for ShaderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ShaderError::Io { source, .. } => Some(source),
        }
    }
}

/// Read a WGSL source file
pub fn read_shader_source<P: AsRef<Path>>(path: P) -> Result<String, ShaderError> {
    let path = path.as_ref();
    std::fs::read_to_string(path).map_err(|source| ShaderError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Round `size` up to the next multiple of `alignment`
pub fn aligned_stride(size: u64, alignment: u64) -> u64 {
    size.div_ceil(alignment) * alignment
}

/// Render pipeline for textured sprites
pub struct SpritePipeline {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    camera: CameraUniforms,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    model_layout: wgpu::BindGroupLayout,
    model_buffer: wgpu::Buffer,
    model_bind_group: wgpu::BindGroup,
    model_stride: u64,
    model_capacity: u32,
}

impl SpritePipeline {
    /// Load the vertex/fragment shader pair and build the pipeline
    pub fn load<P: AsRef<Path>, Q: AsRef<Path>>(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        texture_layout: &wgpu::BindGroupLayout,
        vertex_path: P,
        fragment_path: Q,
    ) -> Result<Self, ShaderError> {
        let vertex_source = read_shader_source(&vertex_path)?;
        let fragment_source = read_shader_source(&fragment_path)?;
        log::info!(
            "Loaded shaders '{}' and '{}'",
            vertex_path.as_ref().display(),
            fragment_path.as_ref().display()
        );

        Ok(Self::from_sources(
            device,
            surface_format,
            texture_layout,
            &vertex_source,
            &fragment_source,
        ))
    }

    /// Build the pipeline from WGSL sources (`vs_main` and `fs_main`)
    pub fn from_sources(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        texture_layout: &wgpu::BindGroupLayout,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Self {
        let vertex_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Sprite Vertex Shader"),
            source: wgpu::ShaderSource::Wgsl(vertex_source.into()),
        });
        let fragment_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Sprite Fragment Shader"),
            source: wgpu::ShaderSource::Wgsl(fragment_source.into()),
        });

        let camera_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Sprite Camera Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let model_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Sprite Model Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: NonZeroU64::new(std::mem::size_of::<ModelUniform>() as u64),
                },
                count: None,
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Sprite Pipeline Layout"),
            bind_group_layouts: &[&camera_layout, &model_layout, texture_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Sprite Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &vertex_shader,
                entry_point: Some("vs_main"),
                buffers: &[Self::vertex_buffer_layout()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &fragment_shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        });

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Sprite Quad Vertex Buffer"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let camera = CameraUniforms::default();
        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Sprite Camera Buffer"),
            contents: bytemuck::bytes_of(&camera),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Sprite Camera Bind Group"),
            layout: &camera_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        let model_stride = aligned_stride(
            std::mem::size_of::<ModelUniform>() as u64,
            device.limits().min_uniform_buffer_offset_alignment as u64,
        );
        let (model_buffer, model_bind_group) =
            Self::create_model_slots(device, &model_layout, model_stride, INITIAL_MODEL_CAPACITY);

        Self {
            pipeline,
            vertex_buffer,
            camera,
            camera_buffer,
            camera_bind_group,
            model_layout,
            model_buffer,
            model_bind_group,
            model_stride,
            model_capacity: INITIAL_MODEL_CAPACITY,
        }
    }

    /// Get the vertex buffer layout for SpriteVertex
    fn vertex_buffer_layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<SpriteVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                // position: vec2<f32>
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x2,
                    offset: 0,
                    shader_location: POSITION_ATTRIBUTE,
                },
                // tex_coord: vec2<f32>
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x2,
                    offset: 8,
                    shader_location: TEX_COORD_ATTRIBUTE,
                },
            ],
        }
    }

    fn create_model_slots(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        stride: u64,
        capacity: u32,
    ) -> (wgpu::Buffer, wgpu::BindGroup) {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Sprite Model Buffer"),
            size: stride * capacity as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Sprite Model Bind Group"),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &buffer,
                    offset: 0,
                    size: NonZeroU64::new(std::mem::size_of::<ModelUniform>() as u64),
                }),
            }],
        });

        (buffer, bind_group)
    }

    /// Shader location of the position attribute
    pub fn position_attribute(&self) -> u32 {
        POSITION_ATTRIBUTE
    }

    /// Shader location of the texture coordinate attribute
    pub fn tex_coordinate_attribute(&self) -> u32 {
        TEX_COORD_ATTRIBUTE
    }

    /// Upload the projection matrix
    pub fn set_projection_matrix(&mut self, queue: &wgpu::Queue, matrix: Mat4) {
        self.camera.projection_matrix = matrix;
        queue.write_buffer(&self.camera_buffer, 0, bytemuck::bytes_of(&self.camera));
    }

    /// Upload the view matrix
    pub fn set_view_matrix(&mut self, queue: &wgpu::Queue, matrix: Mat4) {
        self.camera.view_matrix = matrix;
        queue.write_buffer(&self.camera_buffer, 0, bytemuck::bytes_of(&self.camera));
    }

    /// Number of model slots currently allocated
    pub fn model_capacity(&self) -> u32 {
        self.model_capacity
    }

    /// Grow the model buffer so at least `count` draws fit
    pub fn ensure_model_capacity(&mut self, device: &wgpu::Device, count: u32) {
        if count <= self.model_capacity {
            return;
        }
        let capacity = count.next_power_of_two();
        let (buffer, bind_group) =
            Self::create_model_slots(device, &self.model_layout, self.model_stride, capacity);
        self.model_buffer = buffer;
        self.model_bind_group = bind_group;
        self.model_capacity = capacity;
        log::debug!("Grew sprite model buffer to {} slots", capacity);
    }

    /// Upload the model matrix for draw `slot`
    ///
    /// Slots beyond [`SpritePipeline::model_capacity`] are ignored.
    pub fn set_model_matrix(&self, queue: &wgpu::Queue, slot: u32, matrix: Mat4) {
        if slot >= self.model_capacity {
            log::warn!("Model slot {} out of range ({} allocated)", slot, self.model_capacity);
            return;
        }
        let uniform = ModelUniform { model_matrix: matrix };
        queue.write_buffer(
            &self.model_buffer,
            slot as u64 * self.model_stride,
            bytemuck::bytes_of(&uniform),
        );
    }

    /// Clear the target and draw every sprite in order
    #[allow(clippy::too_many_arguments)]
    pub fn draw(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        clear_color: wgpu::Color,
        draws: &[DrawCall<TextureKey>],
        textures: &TextureStore,
    ) {
        self.ensure_model_capacity(device, draws.len() as u32);
        for (slot, draw) in draws.iter().enumerate() {
            self.set_model_matrix(queue, slot as u32, draw.model);
        }

        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Sprite Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear_color),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));

        for (slot, draw) in draws.iter().enumerate() {
            let Some(texture) = textures.get(draw.texture) else {
                log::warn!("Skipping draw {} with unknown texture", slot);
                continue;
            };
            let offset = (slot as u64 * self.model_stride) as wgpu::DynamicOffset;
            render_pass.set_bind_group(1, &self.model_bind_group, &[offset]);
            render_pass.set_bind_group(2, texture.bind_group(), &[]);
            render_pass.draw(0..QUAD_VERTEX_COUNT, 0..1);
        }
    }
}
