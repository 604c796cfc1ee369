//! Bounding-box triangle fill with a barycentric inside test.
//!
//! # Algorithm Overview
//!
//! 1. Compute the triangle's bounding box, clamped to the buffer
//! 2. For every pixel in the box compute barycentric weights
//! 3. Write the pixel if all three weights are non-negative
//!
//! # Barycentric Weights
//!
//! For vertices `A, B, C` and point `P`, the weights come from one cross
//! product of the x-differences and y-differences:
//!
//! ```text
//! u = (Cx-Ax, Bx-Ax, Ax-Px) x (Cy-Ay, By-Ay, Ay-Py)
//! weights = (1 - (u.x + u.y) / u.z, u.y / u.z, u.x / u.z)
//! ```
//!
//! `u.z` is twice the signed area of the triangle. Edges are inclusive
//! (weight `>= 0`), so pixels on an edge shared by two triangles are written
//! by both. That is harmless for opaque fills.
//!
//! # Depth
//!
//! With [`DepthMode::Test`] the pixel's z is the weighted sum of the vertex
//! z values and the pixel is written only if that z is greater than the stored
//! depth (greater = nearer, the buffer starts at negative infinity).

use super::{Rasterizer, Triangle};
use crate::math::{Vec2f, Vec3f};
use crate::render::target::RenderTarget;

/// Minimum `|u.z|` for a triangle to count as non-degenerate.
///
/// Screen-space vertices are whole pixels, so `u.z` is an integer and anything
/// below 1 is zero area. Vertices with fractional coordinates would need a
/// threshold relative to the triangle's size instead.
pub const DEGENERATE_THRESHOLD: f32 = 1.0;

/// Whether a fill consults the depth buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DepthMode {
    /// Always write.
    #[default]
    Overwrite,
    /// Write only when the interpolated depth beats the stored depth.
    Test,
}

/// Barycentric weights of `p` with respect to `points`.
///
/// Returns `None` for a degenerate (zero-area) triangle, meaning no point is
/// inside. Weights may be negative; the point is inside iff all are `>= 0`.
pub fn barycentric(points: &[Vec3f; 3], p: Vec2f) -> Option<Vec3f> {
    let [a, b, c] = *points;
    let xs = Vec3f::new(c.x - a.x, b.x - a.x, a.x - p.x);
    let ys = Vec3f::new(c.y - a.y, b.y - a.y, a.y - p.y);
    let u = xs.cross(ys);

    if u.z.abs() < DEGENERATE_THRESHOLD {
        return None;
    }

    Some(Vec3f::new(1.0 - (u.x + u.y) / u.z, u.y / u.z, u.x / u.z))
}

/// Triangle rasterizer using a bounding box and barycentric inside test.
#[derive(Debug, Clone, Copy, Default)]
pub struct BarycentricRasterizer;

impl BarycentricRasterizer {
    pub fn new() -> Self {
        Self
    }
}

impl Rasterizer for BarycentricRasterizer {
    fn fill_triangle(
        &self,
        triangle: &Triangle,
        target: &mut RenderTarget,
        depth_mode: DepthMode,
    ) -> usize {
        let [v0, v1, v2] = triangle.points;
        let written_before = target.pixels_written();

        // Bounding box, clamped to [0, width-1] x [0, height-1]
        let max_x = target.width() as f32 - 1.0;
        let max_y = target.height() as f32 - 1.0;
        let min_x = v0.x.min(v1.x).min(v2.x).max(0.0).ceil() as i32;
        let min_y = v0.y.min(v1.y).min(v2.y).max(0.0).ceil() as i32;
        let max_x = v0.x.max(v1.x).max(v2.x).min(max_x).floor() as i32;
        let max_y = v0.y.max(v1.y).max(v2.y).min(max_y).floor() as i32;

        for x in min_x..=max_x {
            for y in min_y..=max_y {
                let Some(weights) = barycentric(&triangle.points, Vec2f::new(x as f32, y as f32))
                else {
                    // Degenerate: nothing is inside, skip the whole box
                    return 0;
                };
                if weights.x < 0.0 || weights.y < 0.0 || weights.z < 0.0 {
                    continue;
                }

                match depth_mode {
                    DepthMode::Overwrite => target.set_pixel(x, y, triangle.color),
                    DepthMode::Test => {
                        let z = v0.z * weights.x + v1.z * weights.y + v2.z * weights.z;
                        target.set_pixel_with_depth(x, y, z, triangle.color);
                    }
                }
            }
        }

        target.pixels_written() - written_before
    }
}
