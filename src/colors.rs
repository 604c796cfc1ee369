//! Color model and pixel packing.
//!
//! Every pixel in the framebuffer is a packed ARGB8888 `u32`:
//!
//! ```text
//! bits 31..24  23..16  15..8   7..0
//!      alpha   red     green   blue
//! ```
//!
//! This single order is used by clear, line, triangle and [`Color::pack`].
//! It is what SDL's `ARGB8888` streaming textures and Win32 `BI_RGB` DIBs
//! expect when the `u32` is stored in native (little-endian) byte order.

use std::ops::Mul;

/// Opaque black.
pub const BLACK: u32 = 0xFF000000;
/// Opaque white.
pub const WHITE: u32 = 0xFFFFFFFF;
/// Opaque red.
pub const RED: u32 = 0xFFFF0000;
/// Opaque blue.
pub const BLUE: u32 = 0xFF0000FF;

/// Normalized-float RGBA color.
///
/// Channels are expected in `[0, 1]`; [`Color::pack`] clamps anything outside.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const RED: Self = Self::rgb(1.0, 0.0, 0.0);
    pub const BLUE: Self = Self::rgb(0.0, 0.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from red, green and blue.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Packs into ARGB8888, rounding each channel to the nearest 8-bit value.
    pub fn pack(&self) -> u32 {
        (channel_to_u8(self.a) << 24)
            | (channel_to_u8(self.r) << 16)
            | (channel_to_u8(self.g) << 8)
            | channel_to_u8(self.b)
    }

    /// Inverse of [`Color::pack`].
    pub fn unpack(packed: u32) -> Self {
        Self {
            a: ((packed >> 24) & 0xFF) as f32 / 255.0,
            r: ((packed >> 16) & 0xFF) as f32 / 255.0,
            g: ((packed >> 8) & 0xFF) as f32 / 255.0,
            b: (packed & 0xFF) as f32 / 255.0,
        }
    }
}

#[inline]
fn channel_to_u8(value: f32) -> u32 {
    // NaN clamps to 0
    let clamped = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
    (clamped * 255.0).round() as u32
}

/// Intensity scaling: scales r, g, b and leaves alpha alone.
impl Mul<f32> for Color {
    type Output = Color;

    fn mul(self, intensity: f32) -> Self::Output {
        Self {
            r: self.r * intensity,
            g: self.g * intensity,
            b: self.b * intensity,
            a: self.a,
        }
    }
}
