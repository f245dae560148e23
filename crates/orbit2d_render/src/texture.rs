//! Sprite texture loading
//!
//! Images are decoded to tightly packed RGBA8 on the CPU, then uploaded as a
//! single-level 2D texture sampled with nearest filtering. Each distinct image
//! path is uploaded once; [`TextureStore`] hands out a [`TextureKey`] per path.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Opaque handle to a GPU texture owned by a [`TextureStore`]
    pub struct TextureKey;
}

/// Error type for texture loading
#[derive(Debug)]
pub enum TextureError {
    /// The file could not be read
    Io { path: PathBuf, source: io::Error },
    /// The bytes are not a supported image
    Decode { path: PathBuf, source: image::ImageError },
    /// The image has zero width or height
    EmptyImage(PathBuf),
}

impl std::fmt::Display for TextureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TextureError::Io { path, source } => {
                write!(f, "Unable to read image '{}': {}", path.display(), source)
            }
            TextureError::Decode { path, source } => {
                write!(f, "Unable to decode image '{}': {}", path.display(), source)
            }
            TextureError::EmptyImage(path) => {
                write!(f, "Image '{}' has no pixels", path.display())
            }
        }
    }
}

impl std::error::Error for TextureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TextureError::Io { source, .. } => Some(source),
            TextureError::Decode { source, .. } => Some(source),
            TextureError::EmptyImage(_) => None,
        }
    }
}

/// A decoded image ready for upload
#[derive(Clone, Debug, PartialEq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    /// RGBA8 pixels, row-major, `width * 4` bytes per row
    pub pixels: Vec<u8>,
}

/// Decode an image file into RGBA8
pub fn decode_rgba<P: AsRef<Path>>(path: P) -> Result<DecodedImage, TextureError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| TextureError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    decode_rgba_bytes(&bytes, path)
}

/// Decode in-memory image bytes; `origin` is only used for error messages
pub fn decode_rgba_bytes(bytes: &[u8], origin: &Path) -> Result<DecodedImage, TextureError> {
    let img = image::load_from_memory(bytes).map_err(|source| TextureError::Decode {
        path: origin.to_path_buf(),
        source,
    })?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(TextureError::EmptyImage(origin.to_path_buf()));
    }

    Ok(DecodedImage {
        width,
        height,
        pixels: rgba.into_raw(),
    })
}

/// A sprite texture on the GPU with its bind group
pub struct Texture {
    #[allow(dead_code)] // kept alive for the view and bind group
    texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
    width: u32,
    height: u32,
}

impl Texture {
    /// Bind group layout shared by every sprite texture: texture at binding 0,
    /// sampler at binding 1, both visible to the fragment stage.
    pub fn bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Sprite Texture Bind Group Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        })
    }

    /// Upload a decoded image
    pub fn from_decoded(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        image: &DecodedImage,
        label: &str,
    ) -> Self {
        let size = wgpu::Extent3d {
            width: image.width,
            height: image.height,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &image.pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * image.width),
                rows_per_image: Some(image.height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some(label),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        Self {
            texture,
            bind_group,
            width: image.width,
            height: image.height,
        }
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// Maps image files to texture keys, one key per file on disk
///
/// Paths are canonicalized, so `./assets/a.png` and `assets/../assets/a.png`
/// resolve to the same entry. Paths that cannot be canonicalized (missing
/// files) are kept as given.
#[derive(Debug, Default)]
pub struct PathIndex {
    by_path: HashMap<PathBuf, TextureKey>,
}

impl PathIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lookup key for a path
    pub fn normalize(path: &Path) -> PathBuf {
        std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
    }

    pub fn get(&self, path: &Path) -> Option<TextureKey> {
        self.by_path.get(&Self::normalize(path)).copied()
    }

    pub fn insert(&mut self, path: &Path, key: TextureKey) {
        self.by_path.insert(Self::normalize(path), key);
    }
}

/// Owns every sprite texture for the lifetime of the renderer
pub struct TextureStore {
    layout: wgpu::BindGroupLayout,
    textures: SlotMap<TextureKey, Texture>,
    index: PathIndex,
}

impl TextureStore {
    pub fn new(device: &wgpu::Device) -> Self {
        Self {
            layout: Texture::bind_group_layout(device),
            textures: SlotMap::with_key(),
            index: PathIndex::new(),
        }
    }

    /// Layout the sprite pipeline must use for texture bind groups
    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.layout
    }

    /// Load an image file, returning the existing key if it was already loaded
    pub fn load<P: AsRef<Path>>(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        path: P,
    ) -> Result<TextureKey, TextureError> {
        let path = path.as_ref();
        if let Some(key) = self.index.get(path) {
            log::debug!("Reusing texture for '{}'", path.display());
            return Ok(key);
        }

        let image = decode_rgba(path)?;
        let label = path.display().to_string();
        let texture = Texture::from_decoded(device, queue, &self.layout, &image, &label);
        let (width, height) = texture.size();
        log::info!("Loaded texture '{}' ({}x{})", label, width, height);

        let key = self.textures.insert(texture);
        self.index.insert(path, key);
        Ok(key)
    }

    pub fn get(&self, key: TextureKey) -> Option<&Texture> {
        self.textures.get(key)
    }

    /// Number of distinct textures uploaded
    pub fn count(&self) -> usize {
        self.textures.len()
    }
}
