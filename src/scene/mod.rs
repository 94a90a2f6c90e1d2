//! Demo scene: a fractal on a checkerboard
//!
//! Producers only talk to the engine through color, vertex and triangle
//! mode calls. They never touch the frame buffer.

mod board;
mod menger;
mod pyramid;

use serde::{Deserialize, Serialize};

use fractal3d_raster::{Color, Engine};

pub use board::Board;
pub use menger::MengerCube;
pub use pyramid::SierpinskiPyramid;

/// Per-face colors shared by both fractals
pub(crate) const FACE_PALETTE: [Color; 6] = [
    Color::new(200.0 / 255.0, 80.0 / 255.0, 60.0 / 255.0, 1.0),
    Color::new(70.0 / 255.0, 160.0 / 255.0, 220.0 / 255.0, 1.0),
    Color::new(230.0 / 255.0, 200.0 / 255.0, 70.0 / 255.0, 1.0),
    Color::new(90.0 / 255.0, 190.0 / 255.0, 110.0 / 255.0, 1.0),
    Color::new(170.0 / 255.0, 100.0 / 255.0, 200.0 / 255.0, 1.0),
    Color::new(240.0 / 255.0, 140.0 / 255.0, 60.0 / 255.0, 1.0),
];

/// Which fractal to show
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Figure {
    #[default]
    Cube,
    Pyramid,
}

#[derive(Clone, Debug)]
enum Fractal {
    Cube(MengerCube),
    Pyramid(SierpinskiPyramid),
}

/// The board plus one fractal
#[derive(Clone, Debug)]
pub struct Scene {
    figure: Figure,
    board: Board,
    fractal: Fractal,
}

impl Scene {
    pub fn new(figure: Figure, inverse: bool) -> Self {
        let fractal = match figure {
            Figure::Cube => Fractal::Cube(MengerCube::new(inverse)),
            Figure::Pyramid => Fractal::Pyramid(SierpinskiPyramid::new(inverse)),
        };
        Self {
            figure,
            board: Board::for_figure(figure),
            fractal,
        }
    }

    pub fn figure(&self) -> Figure {
        self.figure
    }

    pub fn inverse(&self) -> bool {
        match &self.fractal {
            Fractal::Cube(c) => c.inverse(),
            Fractal::Pyramid(p) => p.inverse(),
        }
    }

    pub fn level(&self) -> u32 {
        match &self.fractal {
            Fractal::Cube(c) => c.level(),
            Fractal::Pyramid(p) => p.level(),
        }
    }

    /// Subdivide the fractal once. Returns false at the level cap.
    pub fn add_level(&mut self) -> bool {
        match &mut self.fractal {
            Fractal::Cube(c) => c.add_level(),
            Fractal::Pyramid(p) => p.add_level(),
        }
    }

    /// Emit the board, flush it, then emit the fractal
    pub fn render(&self, engine: &mut Engine) {
        self.board.render(engine);
        engine.flush();

        match &self.fractal {
            Fractal::Cube(c) => c.render(engine),
            Fractal::Pyramid(p) => p.render(engine),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fractal3d_raster::RenderMode;

    #[test]
    fn test_palette_in_range() {
        for c in FACE_PALETTE {
            for v in [c.r, c.g, c.b] {
                assert!((50.0 / 255.0..=250.0 / 255.0).contains(&v));
            }
        }
    }

    #[test]
    fn test_scene_levels() {
        let mut scene = Scene::new(Figure::Pyramid, false);
        assert_eq!(scene.figure(), Figure::Pyramid);
        assert_eq!(scene.level(), 1);
        assert!(scene.add_level());
        assert_eq!(scene.level(), 2);
        assert!(!scene.inverse());
    }

    #[test]
    fn test_full_frame_renders_without_discards() {
        for figure in [Figure::Cube, Figure::Pyramid] {
            let mut engine = Engine::new(800, 600);
            engine.set_render_mode(RenderMode::Filled);
            let mut scene = Scene::new(figure, false);
            scene.add_level();

            engine.begin_frame();
            scene.render(&mut engine);
            let stats = engine.end_frame();

            assert_eq!(stats.discarded, 0, "{:?}", figure);
            assert!(stats.pixels > 0, "{:?}", figure);
        }
    }
}
