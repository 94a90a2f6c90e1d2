//! Model-view transform
//!
//! A single current matrix, no stack. Every call right-multiplies a new
//! matrix into it, so transforms apply to vertices in reverse call order.
//! The caller resets it explicitly once per frame.

use fractal3d_math::{Axis, Mat4, Vec4};

/// The active model-view matrix for one viewport
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformPipeline {
    width: u32,
    height: u32,
    current: Mat4,
}

impl TransformPipeline {
    /// Create a pipeline already reset for a `width x height` viewport
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            current: Self::centering(width, height),
        }
    }

    /// Translation that puts the model origin at the viewport midpoint
    pub fn centering(width: u32, height: u32) -> Mat4 {
        Mat4::translation((width / 2) as f32, (height / 2) as f32, 0.0)
    }

    /// Identity composed with the viewport-centering translation
    pub fn reset(&mut self) {
        self.current = Mat4::IDENTITY * Self::centering(self.width, self.height);
    }

    pub fn translate(&mut self, dx: f32, dy: f32, dz: f32) {
        self.current = self.current * Mat4::translation(dx, dy, dz);
    }

    /// Rotate around one principal axis, angle in degrees
    pub fn rotate(&mut self, degrees: f32, axis: Axis) {
        self.current = self.current * Mat4::rotation(axis, degrees);
    }

    /// Flag-style rotate: the first set flag in X, Y, Z order selects the
    /// axis. With no flag set the matrix is left unchanged.
    pub fn rotate_flags(&mut self, degrees: f32, x: bool, y: bool, z: bool) {
        if let Some(axis) = Axis::from_flags(x, y, z) {
            self.rotate(degrees, axis);
        }
    }

    /// Right-multiply an arbitrary matrix
    pub fn apply(&mut self, m: Mat4) {
        self.current = self.current * m;
    }

    /// The current matrix, by value
    pub fn matrix(&self) -> Mat4 {
        self.current
    }

    /// Transform a raw point by the current matrix
    pub fn transform_point(&self, x: f32, y: f32, z: f32) -> Vec4 {
        self.current * Vec4::point(x, y, z)
    }
}
