//! Borrowed draw-pass view over the color and depth buffers.
//!
//! A [`RenderTarget`] bundles what every rasterization primitive needs: the
//! framebuffer, the depth buffer and the orientation of the coordinate space
//! being drawn in. It is created for one pass and dropped afterwards, so the
//! orientation can never leak from one pass into the next.

use super::depth::DepthBuffer;
use super::framebuffer::{Framebuffer, Orientation};

pub struct RenderTarget<'a> {
    color: &'a mut Framebuffer,
    depth: &'a mut DepthBuffer,
    orientation: Orientation,
    pixels_written: usize,
}

impl<'a> RenderTarget<'a> {
    /// Create a draw-pass view.
    ///
    /// # Panics
    /// Panics in debug builds if the buffers disagree on dimensions.
    pub fn new(
        color: &'a mut Framebuffer,
        depth: &'a mut DepthBuffer,
        orientation: Orientation,
    ) -> Self {
        debug_assert_eq!(
            (color.width(), color.height()),
            (depth.width(), depth.height()),
            "Depth buffer size doesn't match framebuffer"
        );
        Self {
            color,
            depth,
            orientation,
            pixels_written: 0,
        }
    }

    pub fn width(&self) -> u32 {
        self.color.width()
    }

    pub fn height(&self) -> u32 {
        self.color.height()
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Drawing-space rows `(first, last)` that land in the buffer under this orientation.
    pub fn visible_rows(&self) -> (i32, i32) {
        self.orientation.visible_rows(self.height())
    }

    /// Number of color writes that landed inside the buffer during this pass.
    pub fn pixels_written(&self) -> usize {
        self.pixels_written
    }

    /// Writes a pixel without depth testing (lines, overlays, no-depth fills).
    ///
    /// The orientation is applied first, then the bounds check.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        let y = self.orientation.map_y(y, self.height());
        if self.color.contains(x, y) {
            self.color.write_pixel(x, y, color);
            self.pixels_written += 1;
        }
    }

    /// Writes a pixel only if `depth` is nearer than what is stored.
    ///
    /// Depth is indexed by the same memory position as the color, so both
    /// buffers stay in step under either orientation.
    #[inline]
    pub fn set_pixel_with_depth(&mut self, x: i32, y: i32, depth: f32, color: u32) {
        let y = self.orientation.map_y(y, self.height());
        if self.depth.test_and_set(x, y, depth) {
            self.color.write_pixel(x, y, color);
            self.pixels_written += 1;
        }
    }

    /// Get the color at drawing-space (x, y), or None if out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<u32> {
        self.color
            .read_pixel(x, self.orientation.map_y(y, self.height()))
    }
}
