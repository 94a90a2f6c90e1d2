//! Flat shading
//!
//! One intensity per face: the alignment between the face normal and the
//! direction from the eye to the face centroid. The eye sits at
//! `z = -perspective_ratio`, so the centroid is pushed along +z by the same
//! amount before normalizing.
//!
//! Shading is a pure function of the face. Shading an already shaded face
//! attenuates it twice; callers shade each face once.

use fractal3d_math::Vec4;

use crate::vertex::Face;

/// Default scale applied on top of the face intensity
pub const DEFAULT_LIGHT_COEFFICIENT: f32 = 0.89;

/// Flat-shading parameters
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lighting {
    pub perspective_ratio: f32,
    pub coefficient: f32,
}

impl Lighting {
    pub fn new(perspective_ratio: f32, coefficient: f32) -> Self {
        Self { perspective_ratio, coefficient }
    }

    /// Normalized direction from the eye to the face centroid
    pub fn view_direction(&self, face: &Face) -> Vec4 {
        let c = face.centroid();
        Vec4::direction(c.x, c.y, c.z + self.perspective_ratio).normalized()
    }

    /// `|normal . view_direction|`, in [0, 1]. Degenerate faces give 0.
    pub fn face_intensity(&self, face: &Face) -> f32 {
        let edge1 = face.b.point - face.a.point;
        let edge2 = face.c.point - face.a.point;
        let normal = edge1.cross(edge2).normalized();

        normal.dot(self.view_direction(face)).abs()
    }

    /// Scale every vertex's r, g, b by `coefficient * intensity`
    pub fn shade_face(&self, face: Face) -> Face {
        let factor = self.coefficient * self.face_intensity(&face);
        face.map_colors(|c| c.scale_rgb(factor))
    }
}

impl Default for Lighting {
    fn default() -> Self {
        Self::new(crate::projector::DEFAULT_PERSPECTIVE_RATIO, DEFAULT_LIGHT_COEFFICIENT)
    }
}
