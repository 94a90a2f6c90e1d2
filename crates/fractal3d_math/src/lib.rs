//! 3D Mathematics Library
//!
//! Homogeneous vector and matrix types for the fractal3d software renderer.
//!
//! ## Core Types
//!
//! - [`Vec4`] - homogeneous point/direction with x, y, z, w components
//! - [`Mat4`] - row-major 4x4 matrix for affine transforms
//! - [`Axis`] - principal axis selector for rotations

mod vec4;
pub mod mat4;

pub use vec4::Vec4;
pub use mat4::{Axis, Mat4};
