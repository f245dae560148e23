//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. Built-in defaults (the values below)
//! 2. `config/default.toml` (version controlled)
//! 3. `config/user.toml` (gitignored, user overrides)
//! 4. Environment variables (`ORBIT2D_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env, Serialized}};
use orbit2d_math::mat4::{self, Mat4};
use orbit2d_scene::{MotionParams, SpriteRole};
use serde::{Serialize, Deserialize};
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Window configuration
    #[serde(default)]
    pub window: WindowConfig,
    /// Rendering configuration
    #[serde(default)]
    pub rendering: RenderingConfig,
    /// Shader source paths
    #[serde(default)]
    pub shaders: ShaderConfig,
    /// Sprite table, in draw order
    #[serde(default = "default_sprites")]
    pub sprites: Vec<SpriteConfig>,
    /// Motion constants
    #[serde(default)]
    pub motion: MotionParams,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            rendering: RenderingConfig::default(),
            shaders: ShaderConfig::default(),
            sprites: default_sprites(),
            motion: MotionParams::default(),
            debug: DebugConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. Built-in defaults
    /// 2. `config/default.toml`
    /// 3. `config/user.toml`
    /// 4. Environment variables (`ORBIT2D_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::from(Serialized::defaults(AppConfig::default()));

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        // Load user config (optional)
        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // Environment variables override everything
        // ORBIT2D_WINDOW__TITLE=Test -> window.title = "Test"
        figment = figment.merge(Env::prefixed("ORBIT2D_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }
}

/// Window configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Window width in pixels
    pub width: u32,
    /// Window height in pixels
    pub height: u32,
    /// Enable VSync
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Cursed by First!".to_string(),
            width: 640 * 2,
            height: 480 * 2,
            vsync: true,
        }
    }
}

/// Orthographic projection bounds in world units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            left: -5.0,
            right: 5.0,
            bottom: -3.75,
            top: 3.75,
            near: -1.0,
            far: 1.0,
        }
    }
}

impl ProjectionConfig {
    pub fn matrix(&self) -> Mat4 {
        mat4::orthographic(self.left, self.right, self.bottom, self.top, self.near, self.far)
    }
}

/// Rendering configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderingConfig {
    /// Clear color [r, g, b, a]
    pub background_color: [f32; 4],
    /// Projection bounds
    pub projection: ProjectionConfig,
    /// Use an sRGB surface when available
    pub prefer_srgb: bool,
}

impl Default for RenderingConfig {
    fn default() -> Self {
        Self {
            background_color: [0.827, 0.827, 0.827, 1.0],
            projection: ProjectionConfig::default(),
            prefer_srgb: false,
        }
    }
}

impl RenderingConfig {
    /// Clear color as a wgpu color
    pub fn clear_color(&self) -> wgpu::Color {
        let bg = &self.background_color;
        wgpu::Color {
            r: bg[0] as f64,
            g: bg[1] as f64,
            b: bg[2] as f64,
            a: bg[3] as f64,
        }
    }
}

/// Shader source paths
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShaderConfig {
    /// Vertex stage (`vs_main`)
    pub vertex: PathBuf,
    /// Fragment stage (`fs_main`)
    pub fragment: PathBuf,
}

impl Default for ShaderConfig {
    fn default() -> Self {
        Self {
            vertex: PathBuf::from("shaders/vertex_textured.wgsl"),
            fragment: PathBuf::from("shaders/fragment_textured.wgsl"),
        }
    }
}

/// One row of the sprite table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpriteConfig {
    /// Name used in logs
    pub name: String,
    /// Image file
    pub path: PathBuf,
    /// Which transform the sprite follows
    pub role: SpriteRole,
}

impl SpriteConfig {
    pub fn new(name: &str, path: &str, role: SpriteRole) -> Self {
        Self {
            name: name.to_string(),
            path: PathBuf::from(path),
            role,
        }
    }
}

fn default_sprites() -> Vec<SpriteConfig> {
    vec![
        SpriteConfig::new("track", "assets/track.png", SpriteRole::Background),
        SpriteConfig::new("blue_shell", "assets/blue_shell.png", SpriteRole::Orbiter),
        SpriteConfig::new("mario", "assets/mario.png", SpriteRole::PathFollower),
    ]
}

/// Debug configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}
