//! Frame/depth buffer
//!
//! One contiguous grid of [`DepthCell`]s sized to the viewport. The buffer is
//! allocated once and only ever reset by [`FrameBuffer::clear`].
//!
//! # Depth
//!
//! Cells store reciprocal depth, `1 / (perspective_ratio + z)`. Larger values
//! are nearer, so the depth test keeps the larger value and a cleared buffer
//! starts at 0.
//!
//! # Bounds
//!
//! Only the strict interior of the viewport is writable: `0 < x < width` and
//! `0 < y < height`. Column 0 and row 0 are never written. Writes elsewhere are
//! silent no-ops.

use crate::color::{Color, Rgba8};

/// One frame buffer pixel
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DepthCell {
    /// Reciprocal depth of the nearest filled write this frame (0 = empty)
    pub depth: f32,
    /// Resolved color of the pixel
    pub color: Rgba8,
}

/// Owned depth + color grid
#[derive(Clone, Debug)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    background: Rgba8,
    cells: Vec<DepthCell>,
}

impl FrameBuffer {
    /// Allocate a cleared buffer of `width * height` cells
    pub fn new(width: u32, height: u32, background: Rgba8) -> Self {
        let cell = DepthCell { depth: 0.0, color: background };
        Self {
            width,
            height,
            background,
            cells: vec![cell; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn background(&self) -> Rgba8 {
        self.background
    }

    /// Strict-interior visibility test used for pixel writes and triangle culling
    #[inline]
    pub fn in_view(&self, x: i32, y: i32) -> bool {
        x > 0 && (x as i64) < self.width as i64 && y > 0 && (y as i64) < self.height as i64
    }

    /// Map (x, y) to a cell index, `None` outside the writable interior
    #[inline]
    pub fn index(&self, x: i32, y: i32) -> Option<usize> {
        if self.in_view(x, y) {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Read a cell. Border cells (x = 0 or y = 0) are readable, only never written.
    pub fn cell(&self, x: u32, y: u32) -> Option<&DepthCell> {
        if x < self.width && y < self.height {
            self.cells.get(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Reset every cell to depth 0 and the background color
    pub fn clear(&mut self) {
        let cell = DepthCell { depth: 0.0, color: self.background };
        self.cells.fill(cell);
    }

    /// Depth-tested write used by filled triangles.
    ///
    /// Wins when `depth >= stored depth`, replacing both depth and color.
    /// Returns whether the pixel was written.
    #[inline]
    pub fn write_if_closer(&mut self, x: i32, y: i32, color: Color, depth: f32) -> bool {
        let Some(idx) = self.index(x, y) else {
            return false;
        };
        let cell = &mut self.cells[idx];
        if cell.depth <= depth {
            cell.depth = depth;
            cell.color = color.to_rgba8();
            true
        } else {
            false
        }
    }

    /// Unconditional color write used by wireframe lines.
    ///
    /// Depth is neither compared nor updated.
    #[inline]
    pub fn write_unconditional(&mut self, x: i32, y: i32, color: Color) -> bool {
        let Some(idx) = self.index(x, y) else {
            return false;
        };
        self.cells[idx].color = color.to_rgba8();
        true
    }

    /// All cells in row-major order
    pub fn cells(&self) -> &[DepthCell] {
        &self.cells
    }

    /// Resolved colors in row-major order
    pub fn pixels(&self) -> impl Iterator<Item = Rgba8> + '_ {
        self.cells.iter().map(|c| c.color)
    }

    /// Copy the resolved image into `out` as tightly packed RGBA8 rows
    pub fn copy_rgba8(&self, out: &mut Vec<Rgba8>) {
        out.clear();
        out.extend(self.pixels());
    }

    /// Copy the resolved image into `out` as tightly packed BGRA8 rows
    pub fn copy_bgra8(&self, out: &mut Vec<Rgba8>) {
        out.clear();
        out.extend(self.pixels().map(Rgba8::to_bgra));
    }

    /// Number of cells whose depth was written this frame
    pub fn covered_count(&self) -> usize {
        self.cells.iter().filter(|c| c.depth > 0.0).count()
    }
}
