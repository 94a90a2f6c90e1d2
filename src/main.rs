//! fractal3d - software-rendered 3D fractals
//!
//! Renders a Menger sponge or Sierpinski pyramid on a checkerboard with a
//! CPU rasterizer and presents each frame through a wgpu surface.

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::WindowId,
};

use fractal3d::config::AppConfig;
use fractal3d::input::{InputAction, InputMapper};
use fractal3d::scene::Scene;
use fractal3d::systems::{PresentError, PresentSystem, WindowSystem};
use fractal3d_input::ViewController;
use fractal3d_raster::{Engine, FpsCounter, Profiler};

/// Main application state
struct App {
    /// Application configuration
    config: AppConfig,
    window: Option<WindowSystem>,
    present: Option<PresentSystem>,
    engine: Engine,
    scene: Scene,
    controller: ViewController,
    profiler: Profiler,
    fps: FpsCounter,
    last_vertices: usize,
    last_frame: std::time::Instant,
}

impl App {
    fn new() -> Self {
        // Load configuration
        let config = AppConfig::load().unwrap_or_else(|e| {
            log::warn!("Failed to load config: {}. Using defaults.", e);
            AppConfig::default()
        });

        let engine = Engine::with_config(
            config.window.width,
            config.window.height,
            config.engine.clone(),
        );
        let scene = Scene::new(config.scene.figure, config.scene.inverse);
        log::info!("Scene: {:?} (inverse: {})", scene.figure(), scene.inverse());

        // Configure controller from config
        let controller = ViewController::new()
            .with_rotation_step(config.input.rotation_step)
            .with_translation_step(config.input.translation_step);

        let profiler = if config.debug.profile {
            Profiler::new()
        } else {
            Profiler::disabled()
        };

        Self {
            config,
            window: None,
            present: None,
            engine,
            scene,
            controller,
            profiler,
            fps: FpsCounter::new(),
            last_vertices: 0,
            last_frame: std::time::Instant::now(),
        }
    }

    fn handle_action(&mut self, action: InputAction, event_loop: &ActiveEventLoop) {
        match action {
            InputAction::Exit => event_loop.exit(),
            InputAction::ToggleRenderMode => {
                let mode = self.engine.toggle_render_mode();
                log::info!("Render mode: {:?}", mode);
            }
            InputAction::ToggleLighting => {
                let enabled = self.engine.toggle_lighting();
                log::info!("Lighting: {}", if enabled { "ON" } else { "OFF" });
            }
            InputAction::AddLevel => {
                if !self.scene.add_level() {
                    log::info!("Level cap reached at level {}", self.scene.level());
                }
            }
            InputAction::SelectFigure(figure) => {
                self.scene = Scene::new(figure, self.scene.inverse());
                self.controller.reset();
                log::info!("Scene: {:?}", figure);
            }
            InputAction::ToggleInverse => {
                let inverse = !self.scene.inverse();
                self.scene = Scene::new(self.scene.figure(), inverse);
                log::info!("Inverse: {}", inverse);
            }
            InputAction::ResetView => {
                self.controller.reset();
                log::info!("View reset");
            }
            InputAction::ProfileReport => self.profiler.log_report(),
        }
    }

    /// Render one frame into the engine and present it
    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let now = std::time::Instant::now();
        let dt = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;

        if self.fps.tick(dt) {
            if let Some(window) = &self.window {
                window.update_title(self.fps.fps(), self.last_vertices);
            }
        }

        self.engine.begin_frame_profiled(&mut self.profiler);
        self.engine.load_identity();
        self.controller.apply(&mut self.engine);

        self.profiler.start("scene");
        self.scene.render(&mut self.engine);
        self.profiler.stop("scene");

        let stats = self.engine.end_frame_profiled(&mut self.profiler);
        self.last_vertices = stats.vertices;

        if let Some(present) = &mut self.present {
            self.profiler.start("present");
            let result = present.present(self.engine.framebuffer());
            self.profiler.stop("present");

            match result {
                Ok(()) => {}
                Err(PresentError::SurfaceLost) => log::debug!("Surface reconfigured"),
                Err(PresentError::OutOfMemory) => {
                    log::error!("GPU out of memory");
                    event_loop.exit();
                    return;
                }
                Err(e) => log::warn!("{}", e),
            }
        }

        // Request next frame
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match WindowSystem::create(event_loop, &self.config.window) {
            Ok(window) => window,
            Err(e) => {
                log::error!("{}", e);
                event_loop.exit();
                return;
            }
        };

        match PresentSystem::new(window.window().clone(), self.config.window.vsync) {
            Ok(present) => self.present = Some(present),
            Err(e) => {
                log::error!("{}", e);
                event_loop.exit();
                return;
            }
        }

        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(physical_size) => {
                if let Some(present) = &mut self.present {
                    present.resize(physical_size.width, physical_size.height);
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    match InputMapper::map_keyboard(key, event.state) {
                        Some(action) => self.handle_action(action, event_loop),
                        // Pass to controller for view keys
                        None => {
                            self.controller.process_keyboard(key, event.state);
                        }
                    }
                }
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.profiler.log_report();
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::init();
    log::info!("Starting fractal3d");

    // Create event loop
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    // Create and run application
    let mut app = App::new();
    event_loop.run_app(&mut app)?;
    Ok(())
}
