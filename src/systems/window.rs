//! Window management system
//!
//! Handles window creation and the stats title.

use std::sync::Arc;
use winit::{
    event_loop::ActiveEventLoop,
    window::Window,
};
use crate::config::WindowConfig;

/// Manages the application window
pub struct WindowSystem {
    window: Arc<Window>,
    base_title: String,
}

impl WindowSystem {
    /// Create a fixed-size window from config
    pub fn create(
        event_loop: &ActiveEventLoop,
        config: &WindowConfig,
    ) -> Result<Self, WindowError> {
        let attrs = Window::default_attributes()
            .with_title(&config.title)
            .with_inner_size(winit::dpi::PhysicalSize::new(
                config.width,
                config.height,
            ))
            .with_resizable(false);

        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .map_err(|e| WindowError::CreationFailed(e.to_string()))?,
        );

        log::info!("Created {}x{} window", config.width, config.height);

        Ok(Self {
            window,
            base_title: config.title.clone(),
        })
    }

    /// Get window reference (for PresentSystem creation)
    pub fn window(&self) -> &Arc<Window> {
        &self.window
    }

    /// Update window title with frame rate and vertex count
    pub fn update_title(&self, fps: u32, vertices: usize) {
        self.window.set_title(&stats_title(&self.base_title, fps, vertices));
    }

    /// Request a redraw
    pub fn request_redraw(&self) {
        self.window.request_redraw();
    }
}

fn stats_title(base: &str, fps: u32, vertices: usize) -> String {
    format!("{} - Frames per second: {} Vertices: {}", base, fps, vertices)
}

#[derive(Debug)]
pub enum WindowError {
    CreationFailed(String),
}

impl std::fmt::Display for WindowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WindowError::CreationFailed(msg) => write!(f, "Window creation failed: {}", msg),
        }
    }
}

impl std::error::Error for WindowError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_formatting() {
        // Can't test actual window without event loop
        let title = stats_title("3D fractals!", 57, 1944);
        assert_eq!(title, "3D fractals! - Frames per second: 57 Vertices: 1944");
    }

    #[test]
    fn test_window_error_display() {
        let err = WindowError::CreationFailed("no display".to_string());
        assert_eq!(err.to_string(), "Window creation failed: no display");
    }
}
