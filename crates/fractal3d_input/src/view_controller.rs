//! View controller for keyboard-driven scene rotation
//!
//! Controls:
//! - Left/Right: rotate around Y
//! - Up/Down: rotate around X
//! - Z/X: rotate around Z
//! - Keypad 4/6: move along X
//! - Keypad 8/5: move along Y
//! - Keypad +/-: move along Z
//!
//! Every press moves by one fixed step. Angles wrap into [0, 359].

use fractal3d_raster::{Axis, Engine};
use winit::event::ElementState;
use winit::keyboard::KeyCode;

/// Default rotation per key press, in degrees
pub const DEFAULT_ROTATION_STEP: f32 = 5.0;
/// Default translation per key press, in model units
pub const DEFAULT_TRANSLATION_STEP: f32 = 25.0;

/// Accumulated view rotation and offset
pub struct ViewController {
    angle_x: f32,
    angle_y: f32,
    angle_z: f32,
    offset_x: f32,
    offset_y: f32,
    offset_z: f32,

    // Configuration
    pub rotation_step: f32,
    pub translation_step: f32,
}

impl Default for ViewController {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewController {
    pub fn new() -> Self {
        Self {
            angle_x: 0.0,
            angle_y: 0.0,
            angle_z: 0.0,
            offset_x: 0.0,
            offset_y: 0.0,
            offset_z: 0.0,

            rotation_step: DEFAULT_ROTATION_STEP,
            translation_step: DEFAULT_TRANSLATION_STEP,
        }
    }

    /// Process keyboard input
    ///
    /// Only presses count; releases are ignored. Returns true if the key is
    /// a view key.
    pub fn process_keyboard(&mut self, key: KeyCode, state: ElementState) -> bool {
        if state != ElementState::Pressed {
            return false;
        }

        let r = self.rotation_step;
        let t = self.translation_step;

        match key {
            KeyCode::ArrowLeft => self.angle_y = wrap_angle(self.angle_y + r),
            KeyCode::ArrowRight => self.angle_y = wrap_angle(self.angle_y - r),
            KeyCode::ArrowUp => self.angle_x = wrap_angle(self.angle_x - r),
            KeyCode::ArrowDown => self.angle_x = wrap_angle(self.angle_x + r),
            KeyCode::KeyZ => self.angle_z = wrap_angle(self.angle_z + r),
            KeyCode::KeyX => self.angle_z = wrap_angle(self.angle_z - r),
            KeyCode::NumpadAdd => self.offset_z += t,
            KeyCode::NumpadSubtract => self.offset_z -= t,
            KeyCode::Numpad6 => self.offset_x -= t,
            KeyCode::Numpad4 => self.offset_x += t,
            KeyCode::Numpad8 => self.offset_y -= t,
            KeyCode::Numpad5 => self.offset_y += t,
            _ => return false,
        }
        true
    }

    /// Push the view transform into `target`: translate, then rotate X, Y, Z
    pub fn apply<T: ViewTransform>(&self, target: &mut T) {
        target.translate(self.offset_x, self.offset_y, self.offset_z);
        target.rotate(self.angle_x, Axis::X);
        target.rotate(self.angle_y, Axis::Y);
        target.rotate(self.angle_z, Axis::Z);
    }

    /// Back to no rotation and no offset
    pub fn reset(&mut self) {
        self.angle_x = 0.0;
        self.angle_y = 0.0;
        self.angle_z = 0.0;
        self.offset_x = 0.0;
        self.offset_y = 0.0;
        self.offset_z = 0.0;
    }

    /// Current (x, y, z) angles in degrees
    pub fn angles(&self) -> (f32, f32, f32) {
        (self.angle_x, self.angle_y, self.angle_z)
    }

    /// Current (x, y, z) offset
    pub fn offset(&self) -> (f32, f32, f32) {
        (self.offset_x, self.offset_y, self.offset_z)
    }

    /// Builder: set rotation step in degrees
    pub fn with_rotation_step(mut self, step: f32) -> Self {
        self.rotation_step = step;
        self
    }

    /// Builder: set translation step
    pub fn with_translation_step(mut self, step: f32) -> Self {
        self.translation_step = step;
        self
    }
}

/// Past 359 wraps to 0, below 0 wraps to 359
fn wrap_angle(angle: f32) -> f32 {
    if angle > 359.0 {
        0.0
    } else if angle < 0.0 {
        359.0
    } else {
        angle
    }
}

/// Trait for the transform the view is applied to
/// Allows the controller to drive the engine or a test recorder
pub trait ViewTransform {
    fn translate(&mut self, dx: f32, dy: f32, dz: f32);
    fn rotate(&mut self, degrees: f32, axis: Axis);
}

impl ViewTransform for Engine {
    fn translate(&mut self, dx: f32, dy: f32, dz: f32) {
        Engine::translate(self, dx, dy, dz);
    }

    fn rotate(&mut self, degrees: f32, axis: Axis) {
        Engine::rotate(self, degrees, axis);
    }
}
