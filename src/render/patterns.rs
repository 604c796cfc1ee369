//! Full-screen calibration patterns.
//!
//! Each pattern repaints every pixel: the background everywhere except one
//! marker row or column. Useful for checking orientation and pitch handling
//! on a new presenter.

use super::target::RenderTarget;

/// Paints `background` everywhere and `ink` on row `marker_y`.
pub fn horizontal_marker(target: &mut RenderTarget, marker_y: i32, background: u32, ink: u32) {
    for y in 0..target.height() as i32 {
        for x in 0..target.width() as i32 {
            let color = if y == marker_y { ink } else { background };
            target.set_pixel(x, y, color);
        }
    }
}

/// Paints `background` everywhere and `ink` on column `marker_x`.
pub fn vertical_marker(target: &mut RenderTarget, marker_x: i32, background: u32, ink: u32) {
    for y in 0..target.height() as i32 {
        for x in 0..target.width() as i32 {
            let color = if x == marker_x { ink } else { background };
            target.set_pixel(x, y, color);
        }
    }
}
