//! Color types
//!
//! [`Color`] is the floating point paint color carried by vertices and
//! interpolated across spans. [`Rgba8`] is what the frame buffer stores once a
//! pixel is resolved.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// RGBA intensity, each channel nominally in [0, 1]
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl Color {
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    /// Create a color without clamping
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create a color with every channel clamped to [0, 1]
    pub fn clamped(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self::new(r, g, b, a).clamp()
    }

    /// Clamp every channel to [0, 1]. Idempotent.
    pub fn clamp(self) -> Self {
        Self {
            r: clamp_channel(self.r),
            g: clamp_channel(self.g),
            b: clamp_channel(self.b),
            a: clamp_channel(self.a),
        }
    }

    /// Scale r, g, b by `factor`; alpha is left alone
    pub fn scale_rgb(self, factor: f32) -> Self {
        Self::new(self.r * factor, self.g * factor, self.b * factor, self.a)
    }

    /// Linear interpolation of r, g, b, a
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self::new(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
            self.a + (other.a - self.a) * t,
        )
    }

    /// Resolve to an opaque 8-bit pixel (channels truncated, out of range saturates)
    pub fn to_rgba8(self) -> Rgba8 {
        Rgba8::new(
            (self.r * 255.0) as u8,
            (self.g * 255.0) as u8,
            (self.b * 255.0) as u8,
            255,
        )
    }
}

/// NaN clamps to 0 so a bad input never poisons the buffer
fn clamp_channel(v: f32) -> f32 {
    if v > 1.0 {
        1.0
    } else if v >= 0.0 {
        v
    } else {
        0.0
    }
}

/// Resolved 8-bit pixel color
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable, Serialize, Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from r, g, b
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Same pixel with red and blue swapped, for BGRA surfaces
    pub const fn to_bgra(self) -> Self {
        Self::new(self.b, self.g, self.r, self.a)
    }
}
