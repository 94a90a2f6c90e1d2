//! Software Rasterization Library
//!
//! This crate turns an immediate-mode stream of colored vertices into a
//! resolved depth/color grid, entirely on the CPU.
//!
//! ## Key Components
//!
//! - [`engine::Engine`] - Vertex queue, render state, frame lifecycle
//! - [`transform::TransformPipeline`] - The single model-view matrix
//! - [`projector::Projector`] - Perspective projection to pixel coordinates
//! - [`lighting::Lighting`] - Per-face flat shading
//! - [`rasterizer`] - Scanline triangle fill and Bresenham lines
//! - [`framebuffer::FrameBuffer`] - Depth and color per pixel
//! - [`timing::Profiler`] - Caller-owned section timings
//!
//! Presenting the frame buffer is left to the host.

pub mod color;
pub mod engine;
pub mod framebuffer;
pub mod lighting;
pub mod projector;
pub mod rasterizer;
pub mod timing;
pub mod transform;
pub mod vertex;

pub use color::{Color, Rgba8};
pub use engine::{Engine, EngineConfig, FrameStats, RenderMode, TriangleMode};
pub use framebuffer::{DepthCell, FrameBuffer};
pub use lighting::Lighting;
pub use projector::{Projector, ScreenPoint};
pub use timing::{FpsCounter, ProfileEntry, Profiler};
pub use transform::TransformPipeline;
pub use vertex::{Face, Vertex};

// Re-export the math types producers need
pub use fractal3d_math::{Axis, Mat4, Vec4};
