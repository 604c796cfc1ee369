//! Orthographic mapping from normalized coordinates to screen space.
//!
//! Model vertices are expected in `[-1, 1]` on x and y. There is no perspective
//! divide and no near/far clipping; z is carried through untouched so the
//! depth test can compare it later.

use crate::math::{Vec2f, Vec2i, Vec3f};

/// Maps `v` from `[-1, 1]` to `[0, width] x [0, height]` pixel coordinates.
///
/// x and y are rounded to the nearest pixel, z is passed through.
pub fn world_to_screen(v: Vec3f, width: u32, height: u32) -> Vec3f {
    Vec3f::new(
        ((v.x + 1.0) * width as f32 / 2.0).round(),
        ((v.y + 1.0) * height as f32 / 2.0).round(),
        v.z,
    )
}

/// Screen-space pixel position of `v`, dropping depth. Used for wireframes.
pub fn world_to_pixel(v: Vec3f, width: u32, height: u32) -> Vec2i {
    let s = world_to_screen(v, width, height);
    Vec2f::new(s.x, s.y).round()
}
