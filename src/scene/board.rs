//! Checkerboard floor under the fractal

use fractal3d_raster::{Color, Engine, TriangleMode};

use super::Figure;

/// Checkerboard of alternating black and white squares at a fixed height
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Board {
    /// Half-extent in x and z
    pub half_size: f32,
    /// Square edge length
    pub step: f32,
    /// Height of the board
    pub y: f32,
    /// How squares are emitted
    pub mode: TriangleMode,
}

impl Default for Board {
    fn default() -> Self {
        Self {
            half_size: 800.0,
            step: 200.0,
            y: 0.0,
            mode: TriangleMode::List,
        }
    }
}

impl Board {
    /// Board sitting just under `figure`, emitted in the figure's mode
    pub fn for_figure(figure: Figure) -> Self {
        match figure {
            Figure::Cube => Self::default().with_y(-182.0).with_mode(TriangleMode::Strip),
            Figure::Pyramid => Self::default().with_y(-122.0).with_mode(TriangleMode::List),
        }
    }

    /// Builder: set height
    pub fn with_y(mut self, y: f32) -> Self {
        self.y = y;
        self
    }

    /// Builder: set triangle mode
    pub fn with_mode(mut self, mode: TriangleMode) -> Self {
        self.mode = mode;
        self
    }

    /// Squares along one edge
    pub fn squares_per_side(&self) -> usize {
        (2.0 * self.half_size / self.step) as usize + 1
    }

    /// Emit every square, alternating black and white
    pub fn render(&self, engine: &mut Engine) {
        engine.set_triangle_mode(self.mode);

        let n = self.squares_per_side();
        let y = self.y;
        for (count, (xi, zi)) in (0..n).flat_map(|i| (0..n).map(move |j| (i, j))).enumerate() {
            let color = if count % 2 == 0 { Color::BLACK } else { Color::WHITE };
            engine.set_color_rgb(color.r, color.g, color.b);

            let x0 = -self.half_size + xi as f32 * self.step;
            let z0 = -self.half_size + zi as f32 * self.step;
            let (x1, z1) = (x0 + self.step, z0 + self.step);

            match self.mode {
                TriangleMode::Strip => {
                    engine.add_vertex(x0, y, z0);
                    engine.add_vertex(x1, y, z0);
                    engine.add_vertex(x0, y, z1);
                    engine.add_vertex(x1, y, z1);
                }
                TriangleMode::List => {
                    engine.add_vertex(x0, y, z0);
                    engine.add_vertex(x1, y, z0);
                    engine.add_vertex(x0, y, z1);

                    engine.add_vertex(x1, y, z0);
                    engine.add_vertex(x0, y, z1);
                    engine.add_vertex(x1, y, z1);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_per_figure() {
        let cube = Board::for_figure(Figure::Cube);
        assert_eq!(cube.y, -182.0);
        assert_eq!(cube.mode, TriangleMode::Strip);

        let pyramid = Board::for_figure(Figure::Pyramid);
        assert_eq!(pyramid.y, -122.0);
        assert_eq!(pyramid.mode, TriangleMode::List);
    }

    #[test]
    fn test_square_count() {
        // -800..=800 in steps of 200
        assert_eq!(Board::default().squares_per_side(), 9);
    }

    #[test]
    fn test_strip_board_vertices() {
        let board = Board::for_figure(Figure::Cube);
        let mut engine = Engine::new(800, 600);
        engine.begin_frame();
        board.render(&mut engine);
        assert_eq!(engine.pending().len(), 81 * 4);

        let stats = engine.flush();
        assert_eq!(stats.triangles, 81 * 2);
        assert_eq!(stats.discarded, 0);
    }

    #[test]
    fn test_list_board_vertices_and_colors() {
        let board = Board::for_figure(Figure::Pyramid);
        let mut engine = Engine::new(800, 600);
        engine.begin_frame();
        board.render(&mut engine);

        let pending = engine.pending();
        assert_eq!(pending.len(), 81 * 6);
        assert_eq!(pending[0].color, Color::BLACK);
        assert_eq!(pending[6].color, Color::WHITE);
        assert_eq!(pending[12].color, Color::BLACK);
    }
}
