//! Input mapping from raw events to semantic actions
//!
//! Maps keyboard input to high-level actions like ToggleRenderMode, Exit, etc.
//! View keys (arrows, Z/X, keypad) are NOT mapped here - they go directly to ViewController.

use winit::event::ElementState;
use winit::keyboard::KeyCode;

use crate::scene::Figure;

/// Actions triggered by special input (not view movement)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Exit application (Escape)
    Exit,
    /// Switch between wireframe and filled (W key)
    ToggleRenderMode,
    /// Switch flat shading on/off (L key)
    ToggleLighting,
    /// Subdivide the fractal once more (Space)
    AddLevel,
    /// Replace the fractal (1 = cube, 2 = pyramid)
    SelectFigure(Figure),
    /// Rebuild the fractal with the opposite inverse flag (I key)
    ToggleInverse,
    /// Reset view rotation and offset (R key)
    ResetView,
    /// Log the profiler report (P key)
    ProfileReport,
}

/// Maps raw input events to semantic actions
///
/// View keys (arrows, Z/X, keypad) are NOT mapped here - they go directly
/// to the ViewController. This mapper handles "special" keys only.
pub struct InputMapper;

impl InputMapper {
    /// Map keyboard input to an action
    ///
    /// Returns `Some(action)` for special keys, `None` for view keys
    pub fn map_keyboard(key: KeyCode, state: ElementState) -> Option<InputAction> {
        // Only handle key presses, not releases
        if state != ElementState::Pressed {
            return None;
        }

        match key {
            KeyCode::Escape => Some(InputAction::Exit),
            KeyCode::KeyW => Some(InputAction::ToggleRenderMode),
            KeyCode::KeyL => Some(InputAction::ToggleLighting),
            KeyCode::Space => Some(InputAction::AddLevel),
            KeyCode::Digit1 => Some(InputAction::SelectFigure(Figure::Cube)),
            KeyCode::Digit2 => Some(InputAction::SelectFigure(Figure::Pyramid)),
            KeyCode::KeyI => Some(InputAction::ToggleInverse),
            KeyCode::KeyR => Some(InputAction::ResetView),
            KeyCode::KeyP => Some(InputAction::ProfileReport),
            _ => None, // View keys handled by controller
        }
    }
}
