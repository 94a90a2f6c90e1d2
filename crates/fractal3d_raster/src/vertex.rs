//! Queued vertices and the faces built from them

use fractal3d_math::Vec4;

use crate::color::Color;

/// A colored point in model-view (accumulated transform) space
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex {
    pub point: Vec4,
    pub color: Color,
}

impl Vertex {
    pub fn new(point: Vec4, color: Color) -> Self {
        Self { point, color }
    }
}

/// Three vertices forming one triangle
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Face {
    pub a: Vertex,
    pub b: Vertex,
    pub c: Vertex,
}

impl Face {
    pub fn new(a: Vertex, b: Vertex, c: Vertex) -> Self {
        Self { a, b, c }
    }

    pub fn vertices(&self) -> [Vertex; 3] {
        [self.a, self.b, self.c]
    }

    /// Mean of the three points
    pub fn centroid(&self) -> Vec4 {
        let sum = self.a.point + self.b.point + self.c.point;
        Vec4::point(sum.x / 3.0, sum.y / 3.0, sum.z / 3.0)
    }

    /// Apply `f` to the color of each vertex
    pub fn map_colors(self, f: impl Fn(Color) -> Color) -> Self {
        Self {
            a: Vertex::new(self.a.point, f(self.a.color)),
            b: Vertex::new(self.b.point, f(self.b.color)),
            c: Vertex::new(self.c.point, f(self.c.color)),
        }
    }
}
