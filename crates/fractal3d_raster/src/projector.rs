//! Perspective projection to screen space

use crate::color::Color;
use crate::vertex::Vertex;

/// Default distance from the eye to the projection plane
pub const DEFAULT_PERSPECTIVE_RATIO: f32 = 2500.0;

/// A vertex after projection
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenPoint {
    pub x: i32,
    pub y: i32,
    /// `1 / (perspective_ratio + z)`, larger is nearer
    pub depth: f32,
    pub color: Color,
}

impl ScreenPoint {
    pub fn new(x: i32, y: i32, depth: f32, color: Color) -> Self {
        Self { x, y, depth, color }
    }
}

/// Perspective divide with a y-flip so that the origin is the top-left corner
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projector {
    perspective_ratio: f32,
    viewport_height: f32,
}

impl Projector {
    pub fn new(perspective_ratio: f32, viewport_height: u32) -> Self {
        Self {
            perspective_ratio,
            viewport_height: viewport_height as f32,
        }
    }

    pub fn perspective_ratio(&self) -> f32 {
        self.perspective_ratio
    }

    /// Project one vertex.
    ///
    /// Screen coordinates truncate toward zero and saturate at the i32 range.
    /// A denominator near zero (`z` close to `-perspective_ratio`) is not
    /// guarded; the rasterizer copes with saturated coordinates.
    pub fn project(&self, vertex: &Vertex) -> ScreenPoint {
        let p = vertex.point;
        let denom = self.perspective_ratio + p.z;
        let scale = self.perspective_ratio / denom;

        ScreenPoint {
            x: (p.x * scale) as i32,
            y: ((self.viewport_height - p.y) * scale) as i32,
            depth: 1.0 / denom,
            color: vertex.color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fractal3d_math::Vec4;

    fn vertex(x: f32, y: f32, z: f32) -> Vertex {
        Vertex::new(Vec4::point(x, y, z), Color::WHITE)
    }

    #[test]
    fn test_project_on_plane() {
        // z = 0 means scale = 1
        let p = Projector::new(2500.0, 600);
        let s = p.project(&vertex(400.0, 300.0, 0.0));
        assert_eq!(s.x, 400);
        assert_eq!(s.y, 300);
        assert_eq!(s.depth, 1.0 / 2500.0);
        assert_eq!(s.color, Color::WHITE);
    }

    #[test]
    fn test_y_flip() {
        let p = Projector::new(2500.0, 600);
        assert_eq!(p.project(&vertex(0.0, 600.0, 0.0)).y, 0);
        assert_eq!(p.project(&vertex(0.0, 0.0, 0.0)).y, 600);
    }

    #[test]
    fn test_farther_points_shrink_and_have_smaller_depth() {
        let p = Projector::new(2500.0, 600);
        let near = p.project(&vertex(500.0, 100.0, 0.0));
        let far = p.project(&vertex(500.0, 100.0, 2500.0));
        // scale = 0.5
        assert_eq!(far.x, 250);
        assert_eq!(far.y, 250);
        assert!(far.depth < near.depth);
    }

    #[test]
    fn test_truncates_toward_zero() {
        let p = Projector::new(100.0, 10);
        // scale = 100 / 300
        let s = p.project(&vertex(10.0, 10.0, 200.0));
        assert_eq!(s.x, 3);
        assert_eq!(s.y, 0);
    }
}
