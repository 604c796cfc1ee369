//! Line rasterization.
//!
//! Two drawers share the [`LineRasterizer`] contract:
//!
//! # Parametric stepping
//!
//! The segment is driven along its longer axis. Steep lines (`|dx| < |dy|`)
//! are transposed so the loop always runs over the larger range, and the
//! endpoints are ordered left to right. For every integer step along the
//! driving axis:
//!
//! ```text
//! t = (x - x0) / (x1 - x0)
//! y = round(y0 * (1 - t) + y1 * t)
//! ```
//!
//! which yields exactly one pixel per step, so the line has no gaps. Because
//! the endpoints are normalized before stepping, drawing `a -> b` and
//! `b -> a` produce the same pixels.
//!
//! # Slope scan
//!
//! The slope-intercept form `y = slope * x + intercept` is evaluated for
//! every pixel of the line's bounding box, and pixels closer than `margin`
//! to the ideal line are colored. This is an approximation: with a thin
//! margin, steep and shallow lines show gaps where no pixel center falls
//! within the margin.

use super::LineRasterizer;
use crate::math::Vec2i;
use crate::render::target::RenderTarget;

/// Default distance margin for [`SlopeScanLine`].
///
/// Thinner margins leave more gaps on near-vertical and near-horizontal lines.
pub const DEFAULT_SLOPE_MARGIN: f32 = 0.1;

/// Canonical line drawer: parametric stepping along the longer axis.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParametricLine;

impl LineRasterizer for ParametricLine {
    fn draw_line(&self, target: &mut RenderTarget, from: Vec2i, to: Vec2i, color: u32) {
        let (mut x0, mut y0, mut x1, mut y1) = (from.x, from.y, to.x, to.y);

        // Transpose steep lines so x is always the driving axis
        let steep = (x0 as i64 - x1 as i64).abs() < (y0 as i64 - y1 as i64).abs();
        if steep {
            std::mem::swap(&mut x0, &mut y0);
            std::mem::swap(&mut x1, &mut y1);
        }

        // Left to right
        if x0 > x1 {
            std::mem::swap(&mut x0, &mut x1);
            std::mem::swap(&mut y0, &mut y1);
        }

        // Steps outside [0, max(width, height)] can never land in the buffer
        // under either orientation.
        let reach = target.width().max(target.height()) as i32;
        let first = x0.max(0);
        let last = x1.min(reach);

        let span = (x1 as i64 - x0 as i64) as f32;
        for x in first..=last {
            let t = if span == 0.0 {
                0.0
            } else {
                (x as i64 - x0 as i64) as f32 / span
            };
            let y = (y0 as f32 * (1.0 - t) + y1 as f32 * t).round() as i32;

            if steep {
                target.set_pixel(y, x, color);
            } else {
                target.set_pixel(x, y, color);
            }
        }
    }
}

/// Slope-intercept scan over the clamped bounding box.
#[derive(Debug, Clone, Copy)]
pub struct SlopeScanLine {
    margin: f32,
}

impl SlopeScanLine {
    pub fn new(margin: f32) -> Self {
        Self { margin }
    }

    pub fn margin(&self) -> f32 {
        self.margin
    }
}

impl Default for SlopeScanLine {
    fn default() -> Self {
        Self::new(DEFAULT_SLOPE_MARGIN)
    }
}

impl LineRasterizer for SlopeScanLine {
    fn draw_line(&self, target: &mut RenderTarget, from: Vec2i, to: Vec2i, color: u32) {
        // Top to bottom
        let (from, to) = if from.y > to.y { (to, from) } else { (from, to) };

        // Y is clamped in drawing space to the rows that survive the flip.
        let (first_row, last_row) = target.visible_rows();
        let min_x = from.x.min(to.x).max(0);
        let max_x = from.x.max(to.x).min(target.width() as i32 - 1);
        let min_y = from.y.max(first_row);
        let max_y = to.y.min(last_row);

        // Vertical and zero-length segments have no slope.
        if from.x == to.x {
            for y in min_y..=max_y {
                target.set_pixel(from.x, y, color);
            }
            return;
        }

        let slope = (to.y as i64 - from.y as i64) as f32 / (to.x as i64 - from.x as i64) as f32;
        let intercept = from.y as f32 - slope * from.x as f32;

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let ideal = slope * x as f32 + intercept;
                if (y as f32 - ideal).abs() < self.margin {
                    target.set_pixel(x, y, color);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{DepthBuffer, Framebuffer, Orientation};
    use std::collections::BTreeSet;

    const INK: u32 = 0xFFFFFFFF;

    fn draw(
        line: &dyn LineRasterizer,
        size: (u32, u32),
        from: (i32, i32),
        to: (i32, i32),
    ) -> BTreeSet<(i32, i32)> {
        let mut fb = Framebuffer::new(size.0, size.1);
        let mut depth = DepthBuffer::new(size.0, size.1);
        fb.clear(0);
        let mut target = RenderTarget::new(&mut fb, &mut depth, Orientation::TopDown);
        line.draw_line(
            &mut target,
            Vec2i::new(from.0, from.1),
            Vec2i::new(to.0, to.1),
            INK,
        );
        let mut lit = BTreeSet::new();
        for y in 0..size.1 as i32 {
            for x in 0..size.0 as i32 {
                if fb.read_pixel(x, y) == Some(INK) {
                    lit.insert((x, y));
                }
            }
        }
        lit
    }

    fn horizontal(y: i32, xs: std::ops::RangeInclusive<i32>) -> BTreeSet<(i32, i32)> {
        xs.map(|x| (x, y)).collect()
    }

    #[test]
    fn parametric_horizontal_line_is_exact() {
        let lit = draw(&ParametricLine, (64, 32), (0, 10), (50, 10));
        assert_eq!(lit, horizontal(10, 0..=50));
    }

    #[test]
    fn slope_scan_horizontal_line_is_exact() {
        let lit = draw(&SlopeScanLine::default(), (64, 32), (0, 10), (50, 10));
        assert_eq!(lit, horizontal(10, 0..=50));
    }

    #[test]
    fn parametric_is_symmetric() {
        let cases = [
            ((13, 20), (80, 40)),
            ((20, 13), (40, 80)),
            ((50, 60), (100, 40)),
            ((50, 90), (60, 10)),
            ((3, 3), (90, 90)),
        ];
        for (a, b) in cases {
            assert_eq!(
                draw(&ParametricLine, (128, 128), a, b),
                draw(&ParametricLine, (128, 128), b, a),
                "asymmetric for {a:?} {b:?}"
            );
        }
    }

    #[test]
    fn parametric_steep_line_has_one_pixel_per_row() {
        let lit = draw(&ParametricLine, (64, 64), (10, 0), (14, 40));
        assert_eq!(lit.len(), 41);
        for y in 0..=40 {
            assert_eq!(lit.iter().filter(|p| p.1 == y).count(), 1);
        }
    }

    #[test]
    fn degenerate_line_draws_a_point() {
        assert_eq!(
            draw(&ParametricLine, (8, 8), (3, 4), (3, 4)),
            BTreeSet::from([(3, 4)])
        );
        assert_eq!(
            draw(&SlopeScanLine::default(), (8, 8), (3, 4), (3, 4)),
            BTreeSet::from([(3, 4)])
        );
    }

    #[test]
    fn slope_scan_vertical_line() {
        let lit = draw(&SlopeScanLine::default(), (8, 8), (2, 6), (2, 1));
        assert_eq!(lit, (1..=6).map(|y| (2, y)).collect::<BTreeSet<_>>());
    }

    #[test]
    fn slope_scan_diagonal() {
        let lit = draw(&SlopeScanLine::default(), (16, 16), (0, 0), (9, 9));
        assert_eq!(lit, (0..=9).map(|i| (i, i)).collect::<BTreeSet<_>>());
    }

    #[test]
    fn slope_scan_thin_margin_leaves_gaps() {
        // slope 2: odd rows are never within 0.1 of an integer x
        let lit = draw(&SlopeScanLine::default(), (16, 16), (0, 0), (5, 10));
        assert_eq!(lit.len(), 6);
        assert!(lit.iter().all(|&(_, y)| y % 2 == 0));
    }

    #[test]
    fn extreme_endpoints_do_not_overflow() {
        let far = [
            ((i32::MIN, 0), (i32::MAX, 1)),
            ((0, i32::MIN), (1, i32::MAX)),
            ((i32::MIN, i32::MIN), (i32::MAX, i32::MAX)),
        ];
        for (a, b) in far {
            draw(&SlopeScanLine::default(), (8, 8), a, b);
            draw(&ParametricLine, (8, 8), a, b);
        }
    }

    #[test]
    fn both_algorithms_agree_bottom_up() {
        let draw_flipped = |line: &dyn LineRasterizer, y: i32| {
            let mut fb = Framebuffer::new(8, 8);
            let mut depth = DepthBuffer::new(8, 8);
            fb.clear(0);
            let mut target = RenderTarget::new(&mut fb, &mut depth, Orientation::BottomUp);
            line.draw_line(&mut target, Vec2i::new(0, y), Vec2i::new(7, y), INK);
            target.pixels_written()
        };
        // Row 8 is memory row 0, row 0 falls outside.
        assert_eq!(draw_flipped(&ParametricLine, 8), 8);
        assert_eq!(draw_flipped(&SlopeScanLine::default(), 8), 8);
        assert_eq!(draw_flipped(&ParametricLine, 0), 0);
        assert_eq!(draw_flipped(&SlopeScanLine::default(), 0), 0);

        let mut fb = Framebuffer::new(8, 8);
        let mut depth = DepthBuffer::new(8, 8);
        fb.clear(0);
        let mut target = RenderTarget::new(&mut fb, &mut depth, Orientation::BottomUp);
        SlopeScanLine::default().draw_line(&mut target, Vec2i::new(3, 0), Vec2i::new(3, 8), INK);
        assert_eq!(target.pixels_written(), 8);
        assert_eq!(fb.read_pixel(3, 0), Some(INK));
    }

    #[test]
    fn lines_clip_to_buffer() {
        let lit = draw(&ParametricLine, (10, 10), (-20, 5), (30, 5));
        assert_eq!(lit, horizontal(5, 0..=9));
        let lit = draw(&SlopeScanLine::default(), (10, 10), (-20, 5), (30, 5));
        assert_eq!(lit, horizontal(5, 0..=9));
    }
}
