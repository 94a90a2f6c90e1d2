//! Menger sponge producer
//!
//! Each level splits every cube into a 3x3x3 grid and drops the cubes on the
//! center cross (20 remain). In inverse mode only the cross is kept (7
//! remain). Faces are emitted as quads in strip mode.

use fractal3d_raster::{Color, Engine, TriangleMode, Vec4};

use super::FACE_PALETTE;

/// Half-extent of the level 1 cube
pub const CUBE_HALF_SIZE: f32 = 180.0;

/// One cube face, corners in strip order: a-b-c then b-c-d
#[derive(Clone, Copy, Debug, PartialEq)]
struct Quad {
    corners: [Vec4; 4],
    color: Color,
}

impl Quad {
    fn offset(self, d: Vec4) -> Self {
        Self {
            corners: self.corners.map(|p| p + d),
            color: self.color,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Cube {
    /// Front, back, top, bottom, left, right
    faces: [Quad; 6],
    /// Full edge length
    size: f32,
}

impl Cube {
    /// Axis-aligned cube whose front-top-left corner is `origin`; it extends
    /// +x, -y and +z from there
    fn at(origin: Vec4, size: f32, colors: [Color; 6]) -> Self {
        let dx = Vec4::direction(size, 0.0, 0.0);
        let dy = Vec4::direction(0.0, size, 0.0);
        let dz = Vec4::direction(0.0, 0.0, size);

        let front = Quad {
            corners: [origin, origin - dy, origin + dx, origin + dx - dy],
            color: colors[0],
        };
        let back = Quad { color: colors[1], ..front.offset(dz) };
        let top = Quad {
            corners: [back.corners[0], front.corners[0], back.corners[2], front.corners[2]],
            color: colors[2],
        };
        let bottom = Quad { color: colors[3], ..top.offset(-dy) };
        let left = Quad {
            corners: [back.corners[0], back.corners[1], front.corners[0], front.corners[1]],
            color: colors[4],
        };
        let right = Quad { color: colors[5], ..left.offset(dx) };

        Self {
            faces: [front, back, top, bottom, left, right],
            size,
        }
    }

    fn colors(&self) -> [Color; 6] {
        self.faces.map(|f| f.color)
    }

    /// Split into a 3x3x3 grid, keeping either the cross or everything else
    fn subdivide(&self, inverse: bool, out: &mut Vec<Cube>) {
        let size = self.size / 3.0;
        let start = self.faces[0].corners[0];
        let colors = self.colors();

        for zi in 0..3 {
            for yi in 0..3 {
                for xi in 0..3 {
                    let on_cross = (yi == 1 && xi == 1) || (yi == 1 && zi == 1) || (xi == 1 && zi == 1);
                    if on_cross != inverse {
                        continue;
                    }
                    let origin = start
                        + Vec4::direction(size * xi as f32, -size * yi as f32, size * zi as f32);
                    out.push(Cube::at(origin, size, colors));
                }
            }
        }
    }
}

/// Menger sponge (or its inverse)
#[derive(Clone, Debug)]
pub struct MengerCube {
    cubes: Vec<Cube>,
    level: u32,
    inverse: bool,
}

impl MengerCube {
    /// Level 1: a single cube of half-extent [`CUBE_HALF_SIZE`]
    pub fn new(inverse: bool) -> Self {
        let h = CUBE_HALF_SIZE;
        let base = Cube::at(Vec4::point(-h, h, -h), 2.0 * h, FACE_PALETTE);
        Self {
            cubes: vec![base],
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
        if self.inverse { 5 } else { 4 }
    }

    pub fn cube_count(&self) -> usize {
        self.cubes.len()
    }

    /// Subdivide once. Returns false at the level cap.
    pub fn add_level(&mut self) -> bool {
        if self.level >= self.max_level() {
            return false;
        }

        let per_cube = if self.inverse { 7 } else { 20 };
        let mut next = Vec::with_capacity(self.cubes.len() * per_cube);
        for cube in &self.cubes {
            cube.subdivide(self.inverse, &mut next);
        }
        self.cubes = next;
        self.level += 1;

        log::info!("Menger cube level {}: {} cubes", self.level, self.cubes.len());
        true
    }

    /// Emit every face as a strip quad
    pub fn render(&self, engine: &mut Engine) {
        engine.set_triangle_mode(TriangleMode::Strip);
        for cube in &self.cubes {
            for face in &cube.faces {
                engine.set_color_rgb(face.color.r, face.color.g, face.color.b);
                for p in &face.corners {
                    engine.add_vertex(p.x, p.y, p.z);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_one_is_single_cube() {
        let cube = MengerCube::new(false);
        assert_eq!(cube.level(), 1);
        assert_eq!(cube.cube_count(), 1);
    }

    #[test]
    fn test_subdivision_counts() {
        let mut cube = MengerCube::new(false);
        assert!(cube.add_level());
        assert_eq!(cube.cube_count(), 20);
        assert!(cube.add_level());
        assert_eq!(cube.cube_count(), 400);

        let mut inverse = MengerCube::new(true);
        assert!(inverse.add_level());
        assert_eq!(inverse.cube_count(), 7);
    }

    #[test]
    fn test_level_cap() {
        let mut cube = MengerCube::new(false);
        while cube.add_level() {}
        assert_eq!(cube.level(), 4);
        assert_eq!(cube.cube_count(), 8000);
        assert!(!cube.add_level());

        let mut inverse = MengerCube::new(true);
        while inverse.add_level() {}
        assert_eq!(inverse.level(), 5);
        assert_eq!(inverse.cube_count(), 7usize.pow(4));
    }

    #[test]
    fn test_sub_cubes_tile_the_parent() {
        let mut cube = MengerCube::new(false);
        cube.add_level();

        // All sub-cubes are a third of the size and inside the parent bounds
        for c in &cube.cubes {
            assert_eq!(c.size, 120.0);
            for face in &c.faces {
                for p in &face.corners {
                    assert!(p.x >= -180.0 && p.x <= 180.0);
                    assert!(p.y >= -180.0 && p.y <= 180.0);
                    assert!(p.z >= -180.0 && p.z <= 180.0);
                }
            }
        }

        // The center cube is gone
        let has_center = cube.cubes.iter().any(|c| c.faces[0].corners[0] == Vec4::point(-60.0, 60.0, -60.0));
        assert!(!has_center);
    }

    #[test]
    fn test_render_emits_strip_quads() {
        let cube = MengerCube::new(false);
        let mut engine = Engine::new(800, 600);
        engine.begin_frame();
        cube.render(&mut engine);

        assert_eq!(engine.triangle_mode(), TriangleMode::Strip);
        assert_eq!(engine.pending().len(), 6 * 4);
        // Front face color on its first vertex
        assert_eq!(engine.pending()[0].color, FACE_PALETTE[0]);
    }

    #[test]
    fn test_faces_are_planar_squares() {
        let cube = Cube::at(Vec4::point(0.0, 0.0, 0.0), 10.0, FACE_PALETTE);
        for face in &cube.faces {
            let [a, b, c, d] = face.corners;
            assert_eq!((b - a).length(), 10.0);
            assert_eq!((c - a).length(), 10.0);
            assert_eq!((d - a).length(), (200.0f32).sqrt());
        }
    }
}
