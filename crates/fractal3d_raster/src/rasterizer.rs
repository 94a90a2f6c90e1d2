//! Scanline triangle fill and Bresenham line drawing
//!
//! Filled triangles go through [`FrameBuffer::write_if_closer`]; wireframe
//! edges go through [`FrameBuffer::write_unconditional`] and never touch depth.
//! Lines drawn over a filled frame therefore always show, regardless of what
//! they are behind.
//!
//! Interpolation always uses the unclipped endpoints. Scanline loops are
//! clamped to the writable interior and line walks start and stop at the
//! part of the segment that can reach it, so the cost of a face is bounded by
//! the viewport even when projection yields saturated coordinates.

use crate::color::Color;
use crate::framebuffer::FrameBuffer;
use crate::projector::ScreenPoint;

/// One end of a horizontal span
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpanEnd {
    pub x: i32,
    pub depth: f32,
    pub color: Color,
}

/// Horizontal run of pixels on one scanline, `left.x <= right.x`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Span {
    pub y: i32,
    pub left: SpanEnd,
    pub right: SpanEnd,
}

/// Any-point-in-view rejection test.
///
/// Not clipping: a triangle with one visible corner is rasterized in full and
/// relies on per-pixel bounds checks.
pub fn triangle_in_view(fb: &FrameBuffer, points: &[ScreenPoint; 3]) -> bool {
    points.iter().any(|p| fb.in_view(p.x, p.y))
}

/// Sort three points by ascending y with pairwise swaps (a/b, a/c, b/c)
pub fn sort_by_y(mut a: ScreenPoint, mut b: ScreenPoint, mut c: ScreenPoint) -> [ScreenPoint; 3] {
    if a.y > b.y {
        std::mem::swap(&mut a, &mut b);
    }
    if a.y > c.y {
        std::mem::swap(&mut a, &mut c);
    }
    if b.y > c.y {
        std::mem::swap(&mut b, &mut c);
    }
    [a, b, c]
}

/// Intersection of the edge `from -> to` with scanline `y`.
///
/// A horizontal edge uses 1 as its y-extent. x uses integer arithmetic and
/// truncates toward zero; the product is widened to i128 since both factors
/// can span the full i32 range.
fn edge_at(from: &ScreenPoint, to: &ScreenPoint, y: i32) -> SpanEnd {
    let dy = match to.y as i128 - from.y as i128 {
        0 => 1,
        d => d,
    };
    let step = y as i128 - from.y as i128;
    let dx = to.x as i128 - from.x as i128;
    let x = from.x as i128 + dx * step / dy;
    let t = step as f32 / dy as f32;

    SpanEnd {
        x: x.clamp(i32::MIN as i128, i32::MAX as i128) as i32,
        depth: from.depth + (to.depth - from.depth) * t,
        color: from.color.lerp(to.color, t),
    }
}

/// Span of a y-sorted triangle at scanline `y`.
///
/// The long edge runs top to bottom. The short edge is top to middle above
/// the middle point and middle to bottom from it on. Ends are swapped
/// together (x, depth, color) when out of order.
pub fn scanline_span(sorted: &[ScreenPoint; 3], y: i32) -> Span {
    let [top, mid, bottom] = sorted;

    let long = edge_at(top, bottom, y);
    let short = if y >= mid.y {
        edge_at(mid, bottom, y)
    } else {
        edge_at(top, mid, y)
    };

    let (left, right) = if long.x > short.x { (short, long) } else { (long, short) };
    Span { y, left, right }
}

/// Draw one span with depth testing. Returns the number of pixels written.
pub fn draw_span(fb: &mut FrameBuffer, span: &Span) -> usize {
    let Span { y, left, right } = *span;
    let dx = match right.x as i64 - left.x as i64 {
        0 => 1,
        d => d,
    };

    let first = left.x.max(1);
    let last = right.x.min(fb.width() as i32 - 1);

    let mut written = 0;
    for x in first..=last {
        let t = (x as i64 - left.x as i64) as f32 / dx as f32;
        let depth = left.depth + (right.depth - left.depth) * t;
        let color = left.color.lerp(right.color, t);
        if fb.write_if_closer(x, y, color, depth) {
            written += 1;
        }
    }
    written
}

/// Scan-convert a filled triangle. Returns the number of pixels written.
pub fn fill_triangle(fb: &mut FrameBuffer, a: ScreenPoint, b: ScreenPoint, c: ScreenPoint) -> usize {
    let sorted = sort_by_y(a, b, c);
    let first = sorted[0].y.max(1);
    let last = sorted[2].y.min(fb.height() as i32 - 1);

    let mut written = 0;
    for y in first..=last {
        written += draw_span(fb, &scanline_span(&sorted, y));
    }
    written
}

/// Parameter range `[t0, t1]` of `origin + t * delta`, `t` in [0, 1], that
/// lies inside the rectangle `[min, max]` (Liang-Barsky).
fn clip_range(origin: (f64, f64), delta: (f64, f64), min: (f64, f64), max: (f64, f64)) -> Option<(f64, f64)> {
    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;
    let edges = [
        (-delta.0, origin.0 - min.0),
        (delta.0, max.0 - origin.0),
        (-delta.1, origin.1 - min.1),
        (delta.1, max.1 - origin.1),
    ];

    for (p, q) in edges {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }
    Some((t0, t1))
}

/// Integer line from `from` to `to`, color interpolated per step.
///
/// Pixels are written without a depth test. The walk covers only the steps
/// whose pixels can land in the interior; the position at the first of them
/// is computed directly, so the result is the same as walking the whole
/// segment. Returns the number of pixels written.
pub fn draw_line(fb: &mut FrameBuffer, from: ScreenPoint, to: ScreenPoint) -> usize {
    let (x1, y1) = (from.x as i64, from.y as i64);
    let (x2, y2) = (to.x as i64, to.y as i64);
    let dx = (x2 - x1).abs();
    let dy = (y2 - y1).abs();

    let sx = if x2 >= x1 { 1 } else { -1 };
    let sy = if y2 >= y1 { 1 } else { -1 };

    // Major axis steps every pixel, minor axis steps when the error overflows
    let (mut xinc1, mut yinc1, mut xinc2, mut yinc2) = (sx, sy, sx, sy);
    let (den, num_start, numadd, numpixels) = if dx >= dy {
        xinc1 = 0;
        yinc2 = 0;
        (dx, dx / 2, dy, dx)
    } else {
        xinc2 = 0;
        yinc1 = 0;
        (dy, dy / 2, dx, dy)
    };

    // The minor axis stays within one pixel of the ideal line, so a one pixel
    // margin around the interior catches every step that can be written.
    let Some((t0, t1)) = clip_range(
        (x1 as f64, y1 as f64),
        ((x2 - x1) as f64, (y2 - y1) as f64),
        (0.0, 0.0),
        (fb.width() as f64, fb.height() as f64),
    ) else {
        return 0;
    };
    let first = ((t0 * numpixels as f64).floor() as i64 - 1).max(0);
    let last = ((t1 * numpixels as f64).ceil() as i64 + 1).min(numpixels);

    // Bresenham state after `first` steps
    let acc = num_start as i128 + first as i128 * numadd as i128;
    let (minor, mut num) = if den == 0 {
        (0, 0)
    } else {
        ((acc / den as i128) as i64, (acc % den as i128) as i64)
    };
    let mut x = x1 + minor * xinc1 + first * xinc2;
    let mut y = y1 + minor * yinc1 + first * yinc2;

    let mut written = 0;
    let mut entered = false;

    for px in first..=last {
        let inside = x > 0 && x < fb.width() as i64 && y > 0 && y < fb.height() as i64;
        if inside {
            let t = if numpixels == 0 { 0.0 } else { px as f32 / numpixels as f32 };
            fb.write_unconditional(x as i32, y as i32, from.color.lerp(to.color, t));
            written += 1;
            entered = true;
        } else if entered {
            // A segment crosses the viewport at most once
            break;
        }

        num += numadd;
        if num >= den {
            num -= den;
            x += xinc1;
            y += yinc1;
        }
        x += xinc2;
        y += yinc2;
    }
    written
}

/// Outline a triangle: a-b, b-c, c-a
pub fn draw_wireframe(fb: &mut FrameBuffer, a: ScreenPoint, b: ScreenPoint, c: ScreenPoint) -> usize {
    draw_line(fb, a, b) + draw_line(fb, b, c) + draw_line(fb, c, a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba8;

    const BG: Rgba8 = Rgba8::rgb(128, 128, 128);

    fn pt(x: i32, y: i32) -> ScreenPoint {
        ScreenPoint::new(x, y, 0.5, Color::WHITE)
    }

    fn colored(x: i32, y: i32, color: Color) -> ScreenPoint {
        ScreenPoint::new(x, y, 0.5, color)
    }

    fn is_set(fb: &FrameBuffer, x: u32, y: u32) -> bool {
        fb.cell(x, y).map(|c| c.color != BG).unwrap_or(false)
    }

    #[test]
    fn test_sort_by_y() {
        let [a, b, c] = sort_by_y(pt(0, 9), pt(1, 2), pt(2, 5));
        assert_eq!((a.y, b.y, c.y), (2, 5, 9));
    }

    #[test]
    fn test_triangle_in_view() {
        let fb = FrameBuffer::new(10, 10, BG);
        assert!(triangle_in_view(&fb, &[pt(-5, -5), pt(50, 50), pt(3, 3)]));
        // Corners on the border do not count as visible
        assert!(!triangle_in_view(&fb, &[pt(0, 0), pt(10, 5), pt(-1, 20)]));
    }

    #[test]
    fn test_span_left_le_right() {
        // A handful of triangles with both winding orders
        let tris = [
            [pt(1, 1), pt(30, 10), pt(5, 30)],
            [pt(30, 1), pt(1, 10), pt(25, 30)],
            [pt(10, 1), pt(10, 20), pt(2, 20)],
            [pt(-40, 3), pt(60, 3), pt(7, 50)],
            [pt(5, 5), pt(5, 5), pt(5, 5)],
        ];
        for [a, b, c] in tris {
            let sorted = sort_by_y(a, b, c);
            for y in sorted[0].y..=sorted[2].y {
                let span = scanline_span(&sorted, y);
                assert!(span.left.x <= span.right.x, "y={} span={:?}", y, span);
            }
        }
    }

    #[test]
    fn test_span_swaps_depth_and_color_with_x() {
        let red = Color::new(1.0, 0.0, 0.0, 1.0);
        let blue = Color::new(0.0, 0.0, 1.0, 1.0);
        // Long edge on the right, short edges on the left
        let sorted = sort_by_y(
            ScreenPoint::new(10, 0, 0.1, red),
            ScreenPoint::new(0, 5, 0.9, blue),
            ScreenPoint::new(10, 10, 0.1, red),
        );
        let span = scanline_span(&sorted, 5);
        assert_eq!(span.left.x, 0);
        assert_eq!(span.left.color, blue);
        assert_eq!(span.left.depth, 0.9);
        assert_eq!(span.right.x, 10);
        assert_eq!(span.right.color, red);
    }

    #[test]
    fn test_flat_top_triangle_guarded() {
        // top and middle share a row; no division by zero
        let sorted = sort_by_y(pt(2, 2), pt(12, 2), pt(7, 12));
        let span = scanline_span(&sorted, 2);
        assert_eq!((span.left.x, span.right.x), (2, 12));
    }

    #[test]
    fn test_fill_covers_interior() {
        let mut fb = FrameBuffer::new(32, 32, BG);
        let written = fill_triangle(&mut fb, pt(2, 2), pt(20, 2), pt(2, 20));
        assert!(written > 0);
        assert!(is_set(&fb, 5, 5));
        assert!(is_set(&fb, 2, 2));
        assert!(!is_set(&fb, 19, 19));
        assert_eq!(fb.covered_count(), written);
    }

    #[test]
    fn test_fill_interpolates_color() {
        let mut fb = FrameBuffer::new(32, 8, BG);
        let black = Color::new(0.0, 0.0, 0.0, 1.0);
        // Degenerate-in-y strip, so the span is the whole row
        fill_triangle(&mut fb, colored(1, 4, black), colored(21, 4, Color::WHITE), colored(11, 4, black));
        let left = fb.cell(1, 4).unwrap().color;
        let right = fb.cell(21, 4).unwrap().color;
        let mid = fb.cell(11, 4).unwrap().color;
        assert_eq!(left, Rgba8::rgb(0, 0, 0));
        assert_eq!(right, Rgba8::rgb(255, 255, 255));
        assert!(mid.r > 100 && mid.r < 160);
    }

    #[test]
    fn test_fill_respects_depth() {
        let mut fb = FrameBuffer::new(16, 16, BG);
        let near = Color::new(1.0, 0.0, 0.0, 1.0);
        let far = Color::new(0.0, 1.0, 0.0, 1.0);

        let n = |x, y| ScreenPoint::new(x, y, 0.8, near);
        let f = |x, y| ScreenPoint::new(x, y, 0.2, far);

        fill_triangle(&mut fb, n(1, 1), n(14, 1), n(1, 14));
        fill_triangle(&mut fb, f(1, 1), f(14, 1), f(1, 14));
        assert_eq!(fb.cell(3, 3).unwrap().color, Rgba8::rgb(255, 0, 0));
    }

    #[test]
    fn test_fill_offscreen_parts_are_skipped() {
        let mut fb = FrameBuffer::new(16, 16, BG);
        fill_triangle(&mut fb, pt(-1000, -1000), pt(1000, -1000), pt(8, 1000));
        // Whole interior is covered, border row/column untouched
        assert_eq!(fb.covered_count(), 15 * 15);
        assert!(!is_set(&fb, 0, 5));
        assert!(!is_set(&fb, 5, 0));
    }

    #[test]
    fn test_draw_line_horizontal() {
        let mut fb = FrameBuffer::new(16, 16, BG);
        let written = draw_line(&mut fb, pt(2, 3), pt(9, 3));
        assert_eq!(written, 8);
        for x in 2..=9 {
            assert!(is_set(&fb, x, 3));
        }
    }

    #[test]
    fn test_draw_line_steep_and_reversed() {
        let mut fb = FrameBuffer::new(16, 16, BG);
        let written = draw_line(&mut fb, pt(8, 12), pt(6, 2));
        // One pixel per row on the major axis
        assert_eq!(written, 11);
        assert!(is_set(&fb, 8, 12));
        assert!(is_set(&fb, 6, 2));
    }

    #[test]
    fn test_draw_line_interpolates_endpoint_colors() {
        let mut fb = FrameBuffer::new(16, 16, BG);
        let red = Color::new(1.0, 0.0, 0.0, 1.0);
        let blue = Color::new(0.0, 0.0, 1.0, 1.0);
        draw_line(&mut fb, colored(1, 1, red), colored(11, 1, blue));
        assert_eq!(fb.cell(1, 1).unwrap().color, Rgba8::rgb(255, 0, 0));
        assert_eq!(fb.cell(11, 1).unwrap().color, Rgba8::rgb(0, 0, 255));
        let mid = fb.cell(6, 1).unwrap().color;
        assert!(mid.r > 100 && mid.b > 100);
    }

    #[test]
    fn test_line_ignores_and_keeps_depth() {
        let mut fb = FrameBuffer::new(16, 16, BG);
        fb.write_if_closer(4, 4, Color::WHITE, 0.9);
        draw_line(&mut fb, colored(1, 4, Color::BLACK), colored(8, 4, Color::BLACK));
        let cell = fb.cell(4, 4).unwrap();
        assert_eq!(cell.color, Rgba8::rgb(0, 0, 0));
        assert_eq!(cell.depth, 0.9);
    }

    #[test]
    fn test_draw_line_single_point() {
        let mut fb = FrameBuffer::new(8, 8, BG);
        assert_eq!(draw_line(&mut fb, pt(3, 3), pt(3, 3)), 1);
    }

    /// Bresenham over every step of the segment, no skipping
    fn walk_every_step(fb: &mut FrameBuffer, from: ScreenPoint, to: ScreenPoint) {
        let (x1, y1) = (from.x as i64, from.y as i64);
        let (x2, y2) = (to.x as i64, to.y as i64);
        let (dx, dy) = ((x2 - x1).abs(), (y2 - y1).abs());
        let sx = if x2 >= x1 { 1 } else { -1 };
        let sy = if y2 >= y1 { 1 } else { -1 };
        let n = dx.max(dy);
        let (mut x, mut y) = (x1, y1);
        let mut num = n / 2;
        for px in 0..=n {
            if x > 0 && y > 0 && x < fb.width() as i64 && y < fb.height() as i64 {
                let t = if n == 0 { 0.0 } else { px as f32 / n as f32 };
                fb.write_unconditional(x as i32, y as i32, from.color.lerp(to.color, t));
            }
            num += dx.min(dy);
            if num >= n {
                num -= n;
                if dx >= dy { y += sy } else { x += sx }
            }
            if dx >= dy { x += sx } else { y += sy }
        }
    }

    #[test]
    fn test_draw_line_matches_full_walk_when_clipped() {
        let red = Color::new(1.0, 0.0, 0.0, 1.0);
        let blue = Color::new(0.0, 0.0, 1.0, 1.0);
        let lines = [
            ((-500, -300), (700, 450)),
            ((150, -900), (20, 900)),
            ((-50, 100), (300, 100)),
            ((199, -5), (-3, 250)),
            ((40, 40), (-4000, 37)),
        ];
        for ((ax, ay), (bx, by)) in lines {
            let mut clipped = FrameBuffer::new(200, 120, BG);
            let mut full = FrameBuffer::new(200, 120, BG);
            let (a, b) = (colored(ax, ay, red), colored(bx, by, blue));
            let written = draw_line(&mut clipped, a, b);
            walk_every_step(&mut full, a, b);

            assert!(written > 0, "{:?} -> {:?}", (ax, ay), (bx, by));
            assert_eq!(clipped.cells(), full.cells(), "{:?} -> {:?}", (ax, ay), (bx, by));
        }
    }

    #[test]
    fn test_draw_line_far_segment_missing_viewport() {
        let mut fb = FrameBuffer::new(200, 200, BG);
        // Passes the top-left corner without entering the interior
        let written = draw_line(&mut fb, pt(1_000_000_000, -1_000_000_000), pt(-1_000_000_000, 1_000_000_000));
        assert_eq!(written, 0);

        // Entirely to the right of the viewport
        let written = draw_line(&mut fb, pt(i32::MAX, i32::MIN), pt(i32::MAX - 7, i32::MAX));
        assert_eq!(written, 0);
    }

    #[test]
    fn test_draw_line_saturated_endpoints_crossing() {
        let mut fb = FrameBuffer::new(200, 200, BG);
        let written = draw_line(&mut fb, pt(i32::MIN, i32::MIN), pt(i32::MAX, i32::MAX));
        // The diagonal, minus the unwritable corner
        assert_eq!(written, 199);
        assert!(is_set(&fb, 100, 100));
    }

    #[test]
    fn test_span_with_saturated_corners() {
        let sorted = sort_by_y(pt(i32::MIN, i32::MIN), pt(100, 100), pt(i32::MAX, i32::MAX));
        for y in [1, 50, 100, 150, 199] {
            let span = scanline_span(&sorted, y);
            assert!(span.left.x <= span.right.x, "y={} span={:?}", y, span);
        }

        let mut fb = FrameBuffer::new(200, 200, BG);
        let written = fill_triangle(&mut fb, pt(i32::MIN, i32::MIN), pt(100, 100), pt(i32::MAX, i32::MAX));
        assert!(written <= 199 * 199);
    }

    #[test]
    fn test_wireframe_outline_only() {
        let mut fb = FrameBuffer::new(32, 32, BG);
        draw_wireframe(&mut fb, pt(2, 2), pt(20, 2), pt(2, 20));
        assert!(is_set(&fb, 10, 2));
        assert!(is_set(&fb, 2, 10));
        assert!(!is_set(&fb, 5, 5));
        assert_eq!(fb.covered_count(), 0);
    }
}
