//! Owned, pitch-aligned pixel memory.
//!
//! The framebuffer is a single contiguous byte region of `pitch * height`
//! bytes. Each row holds `width` packed ARGB8888 pixels followed by padding up
//! to the row alignment, so every row traversal steps by [`Framebuffer::pitch`]
//! and never by `width * 4`.
//!
//! ```text
//!  row 0: [px][px][px]...[px][pad]
//!  row 1: [px][px][px]...[px][pad]
//!         |<- width*4 bytes ->|
//!         |<------- pitch ------->|
//! ```

/// Bytes in one packed pixel.
pub const BYTES_PER_PIXEL: usize = 4;

/// Default row alignment in bytes.
pub const DEFAULT_ROW_ALIGNMENT: usize = 4;

/// Rounds `value` up to the next multiple of `alignment`.
///
/// `alignment` must be a power of two.
#[inline]
pub const fn align_up(value: usize, alignment: usize) -> usize {
    (value + alignment - 1) & !(alignment - 1)
}

/// Which way increasing row indices run in the presented image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Row 0 is the top of the image. Memory and drawing coordinates agree.
    #[default]
    TopDown,
    /// Origin at the bottom-left. A drawing `y` lands on memory row
    /// `height - y`, so `y = 0` falls just outside the buffer.
    BottomUp,
}

impl Orientation {
    /// Maps a drawing-space row to a memory row.
    #[inline]
    pub fn map_y(self, y: i32, height: u32) -> i32 {
        match self {
            Orientation::TopDown => y,
            Orientation::BottomUp => {
                (height as i64 - y as i64).clamp(i32::MIN as i64, i32::MAX as i64) as i32
            }
        }
    }

    /// Inclusive range of drawing-space rows that land in memory.
    #[inline]
    pub fn visible_rows(self, height: u32) -> (i32, i32) {
        let height = height.min(i32::MAX as u32) as i32;
        match self {
            Orientation::TopDown => (0, height - 1),
            Orientation::BottomUp => (1, height),
        }
    }
}

/// Pixel memory owned by the rasterizer.
///
/// The presenter only ever reads it through [`Framebuffer::as_bytes`] together
/// with `width`, `height` and `pitch`.
#[derive(Debug, Clone)]
pub struct Framebuffer {
    memory: Vec<u8>,
    width: u32,
    height: u32,
    pitch: usize,
    row_alignment: usize,
}

impl Framebuffer {
    /// Allocates a `width` x `height` buffer with the default 4-byte row alignment.
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_row_alignment(width, height, DEFAULT_ROW_ALIGNMENT)
    }

    /// Allocates a buffer whose rows are padded to `row_alignment` bytes.
    ///
    /// # Panics
    /// Panics if `row_alignment` is not a power of two.
    pub fn with_row_alignment(width: u32, height: u32, row_alignment: usize) -> Self {
        assert!(
            row_alignment.is_power_of_two(),
            "row alignment must be a power of two, got {row_alignment}"
        );
        let mut framebuffer = Self {
            memory: Vec::new(),
            width: 0,
            height: 0,
            pitch: 0,
            row_alignment,
        };
        framebuffer.resize(width, height);
        framebuffer
    }

    /// Releases the current allocation and allocates one for the new size.
    ///
    /// Pixel contents are zeroed, not cleared to any color; callers clear
    /// explicitly before drawing.
    pub fn resize(&mut self, width: u32, height: u32) {
        // Release first so old and new allocations never coexist.
        self.memory = Vec::new();

        self.width = width;
        self.height = height;
        self.pitch = align_up(width as usize * BYTES_PER_PIXEL, self.row_alignment);
        self.memory = vec![0; self.pitch * height as usize];
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Byte stride between the starts of consecutive rows.
    pub fn pitch(&self) -> usize {
        self.pitch
    }

    pub fn row_alignment(&self) -> usize {
        self.row_alignment
    }

    /// Returns true if `(x, y)` addresses a pixel in memory coordinates.
    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32
    }

    #[inline]
    fn offset(&self, x: i32, y: i32) -> usize {
        y as usize * self.pitch + x as usize * BYTES_PER_PIXEL
    }

    /// Fills every pixel with `color`, walking rows by `pitch`.
    ///
    /// Row padding is left untouched.
    pub fn clear(&mut self, color: u32) {
        if self.pitch == 0 {
            return;
        }
        let row_bytes = self.width as usize * BYTES_PER_PIXEL;
        let packed = color.to_ne_bytes();
        for row in self.memory.chunks_exact_mut(self.pitch) {
            for pixel in row[..row_bytes].chunks_exact_mut(BYTES_PER_PIXEL) {
                pixel.copy_from_slice(&packed);
            }
        }
    }

    /// Writes a packed pixel in memory coordinates.
    /// Silently ignores out-of-bounds coordinates.
    #[inline]
    pub fn write_pixel(&mut self, x: i32, y: i32, color: u32) {
        if self.contains(x, y) {
            let offset = self.offset(x, y);
            self.memory[offset..offset + BYTES_PER_PIXEL].copy_from_slice(&color.to_ne_bytes());
        }
    }

    /// Reads a packed pixel, or `None` if out of bounds.
    #[inline]
    pub fn read_pixel(&self, x: i32, y: i32) -> Option<u32> {
        if self.contains(x, y) {
            let offset = self.offset(x, y);
            let mut bytes = [0u8; BYTES_PER_PIXEL];
            bytes.copy_from_slice(&self.memory[offset..offset + BYTES_PER_PIXEL]);
            Some(u32::from_ne_bytes(bytes))
        } else {
            None
        }
    }

    /// One row of pixels, without the padding.
    pub fn row(&self, y: u32) -> Option<&[u8]> {
        if y >= self.height {
            return None;
        }
        let start = y as usize * self.pitch;
        Some(&self.memory[start..start + self.width as usize * BYTES_PER_PIXEL])
    }

    /// The raw backing memory, `pitch * height` bytes, for presentation.
    pub fn as_bytes(&self) -> &[u8] {
        &self.memory
    }

    /// Converts the visible pixels to an RGBA image for capture.
    ///
    /// The image is in memory row order, which is what the presenter shows.
    pub fn to_rgba_image(&self) -> image::RgbaImage {
        image::RgbaImage::from_fn(self.width, self.height, |x, y| {
            let argb = self.read_pixel(x as i32, y as i32).unwrap_or(0);
            let [a, r, g, b] = argb.to_be_bytes();
            image::Rgba([r, g, b, a])
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn align_up_rounds_to_power_of_two() {
        assert_eq!(align_up(0, 4), 0);
        assert_eq!(align_up(1, 4), 4);
        assert_eq!(align_up(12, 4), 12);
        assert_eq!(align_up(13, 256), 256);
    }

    #[test]
    fn pitch_and_allocation_size() {
        let fb = Framebuffer::new(7, 3);
        assert_eq!(fb.pitch(), 28);
        assert_eq!(fb.as_bytes().len(), 28 * 3);

        let padded = Framebuffer::with_row_alignment(7, 3, 64);
        assert_eq!(padded.pitch(), 64);
        assert_eq!(padded.as_bytes().len(), 64 * 3);
    }

    #[test]
    fn clear_then_read_every_pixel() {
        let mut fb = Framebuffer::new(5, 4);
        fb.clear(0xFF123456);
        for y in 0..4 {
            for x in 0..5 {
                assert_eq!(fb.read_pixel(x, y), Some(0xFF123456));
            }
        }
    }

    #[test]
    fn clear_walks_by_pitch_and_skips_padding() {
        let mut fb = Framebuffer::with_row_alignment(3, 4, 32);
        fb.clear(0xFFABCDEF);
        for y in 0..4 {
            for x in 0..3 {
                assert_eq!(fb.read_pixel(x, y), Some(0xFFABCDEF));
            }
            let start = y as usize * fb.pitch();
            let padding = &fb.as_bytes()[start + 12..start + fb.pitch()];
            assert!(padding.iter().all(|&b| b == 0));
        }
    }

    #[test]
    fn out_of_bounds_write_is_noop() {
        let mut fb = Framebuffer::new(4, 4);
        fb.clear(0);
        let before = fb.as_bytes().to_vec();
        for (x, y) in [(-1, 0), (0, -1), (4, 0), (0, 4), (i32::MAX, 2), (2, i32::MIN)] {
            fb.write_pixel(x, y, 0xFFFFFFFF);
        }
        assert_eq!(fb.as_bytes(), &before[..]);
        assert_eq!(fb.read_pixel(4, 0), None);
    }

    #[test]
    fn write_lands_on_pitched_row() {
        let mut fb = Framebuffer::with_row_alignment(2, 2, 16);
        fb.write_pixel(1, 1, 0x01020304);
        let offset = fb.pitch() + 4;
        assert_eq!(
            &fb.as_bytes()[offset..offset + 4],
            &0x01020304u32.to_ne_bytes()
        );
        assert_eq!(fb.row(1).map(|r| r.len()), Some(8));
        assert_eq!(fb.row(2), None);
    }

    #[test]
    fn resize_reallocates_with_new_pitch() {
        let mut fb = Framebuffer::new(2, 2);
        fb.clear(0xFFFFFFFF);
        fb.resize(10, 5);
        assert_eq!((fb.width(), fb.height(), fb.pitch()), (10, 5, 40));
        assert_eq!(fb.as_bytes().len(), 200);
        assert_eq!(fb.read_pixel(9, 4), Some(0));
    }

    #[test]
    fn bottom_up_maps_rows() {
        assert_eq!(Orientation::TopDown.map_y(3, 10), 3);
        assert_eq!(Orientation::BottomUp.map_y(3, 10), 7);
        assert_eq!(Orientation::BottomUp.map_y(0, 10), 10);
        assert_eq!(Orientation::BottomUp.map_y(i32::MIN, 10), i32::MAX);
        assert_eq!(Orientation::BottomUp.map_y(i32::MAX, 10), 10 - i32::MAX);
    }

    #[test]
    fn visible_rows_follow_orientation() {
        assert_eq!(Orientation::TopDown.visible_rows(8), (0, 7));
        assert_eq!(Orientation::BottomUp.visible_rows(8), (1, 8));
        for y in 1..=8 {
            assert!(Framebuffer::new(1, 8).contains(0, Orientation::BottomUp.map_y(y, 8)));
        }
    }

    #[test]
    fn rgba_image_reorders_channels() {
        let mut fb = Framebuffer::new(1, 1);
        fb.write_pixel(0, 0, 0x80112233);
        let img = fb.to_rgba_image();
        assert_eq!(img.get_pixel(0, 0).0, [0x11, 0x22, 0x33, 0x80]);
    }
}
