//! orbit2d - animated 2D sprite scene
//!
//! Draws a background, a sprite following a sinusoidal path, and a second
//! sprite orbiting the first.

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::WindowId,
};

use orbit2d::config::AppConfig;
use orbit2d::error::StartupError;
use orbit2d::input::InputMapper;
use orbit2d::scene::SceneBuilder;
use orbit2d::systems::{FrameLoop, IterationOutcome, RenderSystem, WindowSystem};
use orbit2d_render::TextureKey;

/// Main application state
struct App {
    /// Application configuration
    config: AppConfig,
    window: Option<WindowSystem>,
    renderer: Option<RenderSystem>,
    frame_loop: Option<FrameLoop<TextureKey>>,
    /// Set when initialization failed; the process exits with status 1
    startup_error: Option<StartupError>,
}

impl App {
    fn new(config: AppConfig) -> Self {
        Self {
            config,
            window: None,
            renderer: None,
            frame_loop: None,
            startup_error: None,
        }
    }

    /// Create the window, GPU resources and sprite table
    fn initialize(&mut self, event_loop: &ActiveEventLoop) -> Result<(), StartupError> {
        let window = WindowSystem::create(event_loop, &self.config.window)?;

        let mut renderer = RenderSystem::new(
            window.window().clone(),
            &self.config.rendering,
            &self.config.shaders,
            self.config.window.vsync,
        )?;

        let scene = SceneBuilder::from_config(&self.config.sprites, self.config.motion, |sprite| {
            let key = renderer.load_texture(&sprite.path)?;
            log::debug!("Sprite '{}' uses {:?} as {:?}", sprite.name, sprite.path, sprite.role);
            Ok::<_, StartupError>(key)
        })?;

        log::info!(
            "Loaded {} sprites ({} textures)",
            scene.len(),
            renderer.texture_count()
        );

        self.frame_loop = Some(FrameLoop::new(scene));
        self.renderer = Some(renderer);
        self.window = Some(window);
        Ok(())
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.startup_error.is_some() {
            return;
        }

        if let Err(e) = self.initialize(event_loop) {
            log::error!("{}", e);
            self.startup_error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let Some(action) = InputMapper::map_window_event(&event) {
            let outcome = match &mut self.frame_loop {
                Some(frame_loop) => frame_loop.handle_action(action),
                None => IterationOutcome::Exit,
            };
            if outcome == IterationOutcome::Exit {
                event_loop.exit();
            }
            return;
        }

        match event {
            WindowEvent::Resized(size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => {
                if let (Some(frame_loop), Some(renderer)) =
                    (&mut self.frame_loop, &mut self.renderer)
                {
                    if frame_loop.run_iteration(renderer) == IterationOutcome::Exit {
                        log::info!("Exiting after {} frames", frame_loop.frame_count());
                        event_loop.exit();
                    }
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() {
    let config = AppConfig::load();
    let log_level = match &config {
        Ok(config) => config.debug.log_level.clone(),
        Err(_) => AppConfig::default().debug.log_level,
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = config.unwrap_or_else(|e| {
        log::warn!("Failed to load config: {}. Using defaults.", e);
        AppConfig::default()
    });
    log::info!("Configuration loaded ({} sprites)", config.sprites.len());

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            log::error!("{}", StartupError::from(e));
            std::process::exit(1);
        }
    };
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    if let Err(e) = event_loop.run_app(&mut app) {
        log::error!("{}", StartupError::from(e));
        std::process::exit(1);
    }

    if app.startup_error.is_some() {
        std::process::exit(1);
    }
}
