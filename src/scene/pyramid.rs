//! Sierpinski pyramid producer
//!
//! Each level replaces every square-based pyramid with five half-size
//! pyramids: one on the apex and four on the base corners. The four slanted
//! faces and the base of every pyramid are emitted as triangle lists.

use fractal3d_raster::{Color, Engine, TriangleMode, Vec4};

use super::FACE_PALETTE;

/// Half-height of the level 1 pyramid
pub const PYRAMID_HALF_SIZE: f32 = 120.0;

/// Widens the level 1 base slightly past the apex slope
const BASE_SPREAD: f32 = 1.99;

/// Color of every base once the pyramid has been subdivided
const SUBDIVIDED_BASE_COLOR: Color = Color::new(0.0, 1.0, 1.0, 1.0);

#[derive(Clone, Copy, Debug, PartialEq)]
struct Triangle {
    corners: [Vec4; 3],
    color: Color,
}

/// Horizontal base square, corners emitted as (a, b, c) and (b, c, d)
#[derive(Clone, Copy, Debug, PartialEq)]
struct Base {
    corners: [Vec4; 4],
    color: Color,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Pyramid {
    /// Front, back, left, right
    faces: [Triangle; 4],
    /// Full height
    size: f32,
}

impl Pyramid {
    fn apex(&self) -> Vec4 {
        self.faces[0].corners[0]
    }

    /// Pyramid of height `s` below `apex`, base spanning +-`s` in x and z
    fn at(apex: Vec4, s: f32, colors: [Color; 4]) -> Self {
        let corner = |x: f32, z: f32| apex + Vec4::direction(x * s, -s, z * s);
        let tri = |b: Vec4, c: Vec4, color: Color| Triangle { corners: [apex, b, c], color };

        Self {
            faces: [
                tri(corner(-1.0, 1.0), corner(1.0, 1.0), colors[0]),
                tri(corner(-1.0, -1.0), corner(1.0, -1.0), colors[1]),
                tri(corner(-1.0, 1.0), corner(-1.0, -1.0), colors[2]),
                tri(corner(1.0, 1.0), corner(1.0, -1.0), colors[3]),
            ],
            size: s,
        }
    }

    fn base(&self, s: f32, color: Color) -> Base {
        let apex = self.apex();
        let corner = |x: f32, z: f32| apex + Vec4::direction(x * s, -s, z * s);
        Base {
            corners: [corner(-1.0, -1.0), corner(-1.0, 1.0), corner(1.0, -1.0), corner(1.0, 1.0)],
            color,
        }
    }

    /// Five half-size pyramids plus their bases
    fn subdivide(&self, pyramids: &mut Vec<Pyramid>, bases: &mut Vec<Base>) {
        let s = self.size / 2.0;
        let colors = self.faces.map(|f| f.color);
        let apex = self.apex();

        let apexes = [
            apex,
            apex + Vec4::direction(-s, -s, -s),
            apex + Vec4::direction(s, -s, -s),
            apex + Vec4::direction(s, -s, s),
            apex + Vec4::direction(-s, -s, s),
        ];

        for a in apexes {
            let child = Pyramid::at(a, s, colors);
            bases.push(child.base(s, SUBDIVIDED_BASE_COLOR));
            pyramids.push(child);
        }
    }
}

/// Sierpinski pyramid
#[derive(Clone, Debug)]
pub struct SierpinskiPyramid {
    pyramids: Vec<Pyramid>,
    bases: Vec<Base>,
    level: u32,
    inverse: bool,
}

impl SierpinskiPyramid {
    /// Level 1: a single pyramid with a slightly spread base
    pub fn new(inverse: bool) -> Self {
        let h = PYRAMID_HALF_SIZE;
        let w = BASE_SPREAD * h;
        let apex = Vec4::point(0.0, h, 0.0);
        let corner = |x: f32, z: f32| Vec4::point(x * w, -h, z * w);
        let tri = |b: Vec4, c: Vec4, color: Color| Triangle { corners: [apex, b, c], color };

        let base_pyramid = Pyramid {
            faces: [
                tri(corner(-1.0, 1.0), corner(1.0, 1.0), FACE_PALETTE[0]),
                tri(corner(-1.0, -1.0), corner(1.0, -1.0), FACE_PALETTE[1]),
                tri(corner(-1.0, -1.0), corner(-1.0, 1.0), FACE_PALETTE[2]),
                tri(corner(1.0, 1.0), corner(1.0, -1.0), FACE_PALETTE[3]),
            ],
            size: 2.0 * h,
        };
        let base = Base {
            corners: [corner(-1.0, 1.0), corner(1.0, 1.0), corner(-1.0, -1.0), corner(1.0, -1.0)],
            color: FACE_PALETTE[4],
        };

        Self {
            pyramids: vec![base_pyramid],
            bases: vec![base],
            level: 1,
            inverse,
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn inverse(&self) -> bool {
        self.inverse
    }

    /// Highest reachable level
    pub fn max_level(&self) -> u32 {
        if self.inverse { 5 } else { 7 }
    }

    pub fn pyramid_count(&self) -> usize {
        self.pyramids.len()
    }

    /// Subdivide once. Returns false at the level cap.
    pub fn add_level(&mut self) -> bool {
        if self.level >= self.max_level() {
            return false;
        }

        let mut pyramids = Vec::with_capacity(self.pyramids.len() * 5);
        let mut bases = Vec::with_capacity(self.pyramids.len() * 5);
        for pyramid in &self.pyramids {
            pyramid.subdivide(&mut pyramids, &mut bases);
        }
        self.pyramids = pyramids;
        self.bases = bases;
        self.level += 1;

        log::info!("Sierpinski pyramid level {}: {} pyramids", self.level, self.pyramids.len());
        true
    }

    /// Emit bases, then faces, as triangle lists
    pub fn render(&self, engine: &mut Engine) {
        engine.set_triangle_mode(TriangleMode::List);

        for base in &self.bases {
            let [a, b, c, d] = base.corners;
            engine.set_color_rgb(base.color.r, base.color.g, base.color.b);
            for p in [a, b, c, b, c, d] {
                engine.add_vertex(p.x, p.y, p.z);
            }
        }

        for pyramid in &self.pyramids {
            for face in &pyramid.faces {
                engine.set_color_rgb(face.color.r, face.color.g, face.color.b);
                for p in &face.corners {
                    engine.add_vertex(p.x, p.y, p.z);
                }
            }
        }
    }
}
