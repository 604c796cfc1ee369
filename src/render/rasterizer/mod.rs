//! Line and triangle rasterization algorithms.
//!
//! Line drawers can be swapped at runtime for comparison and benchmarking:
//! - [`ParametricLine`]: one pixel per step along the longer axis (canonical)
//! - [`SlopeScanLine`]: slope-intercept distance test over the bounding box
//!
//! Triangles are filled by [`BarycentricRasterizer`], with or without a depth test.

mod line;
mod triangle;

pub use line::{ParametricLine, SlopeScanLine, DEFAULT_SLOPE_MARGIN};
pub use triangle::{barycentric, BarycentricRasterizer, DepthMode, DEGENERATE_THRESHOLD};

use super::target::RenderTarget;
use crate::math::{Vec2i, Vec3f};

/// A triangle ready for rasterization in screen space.
///
/// `x` and `y` are pixel coordinates; `z` only feeds the depth test.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    pub points: [Vec3f; 3],
    pub color: u32,
}

impl Triangle {
    pub fn new(points: [Vec3f; 3], color: u32) -> Self {
        Self { points, color }
    }
}

/// Trait for triangle fill algorithms.
pub trait Rasterizer {
    /// Fill a triangle into the render target.
    ///
    /// Returns the number of pixels written.
    fn fill_triangle(
        &self,
        triangle: &Triangle,
        target: &mut RenderTarget,
        depth_mode: DepthMode,
    ) -> usize;
}

/// Trait for line drawing algorithms.
pub trait LineRasterizer {
    /// Draw the segment `from`-`to` inclusive of both endpoints.
    fn draw_line(&self, target: &mut RenderTarget, from: Vec2i, to: Vec2i, color: u32);
}

/// Available line algorithms.
///
/// Use this enum to select which line drawer the engine uses.
/// Can be changed at runtime via `Engine::set_line_algorithm`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum LineAlgorithm {
    /// Parametric left-to-right stepping. Gap-free, symmetric under endpoint swap.
    #[default]
    Parametric,
    /// Slope-intercept scan with a distance margin. Leaves gaps on steep lines.
    SlopeScan,
}

impl std::fmt::Display for LineAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LineAlgorithm::Parametric => write!(f, "Parametric"),
            LineAlgorithm::SlopeScan => write!(f, "SlopeScan"),
        }
    }
}

/// Holds both line implementations and forwards to the active one.
pub struct LineDispatcher {
    parametric: ParametricLine,
    slope_scan: SlopeScanLine,
    active: LineAlgorithm,
}

impl LineDispatcher {
    pub fn new(algorithm: LineAlgorithm, slope_margin: f32) -> Self {
        Self {
            parametric: ParametricLine,
            slope_scan: SlopeScanLine::new(slope_margin),
            active: algorithm,
        }
    }

    pub fn set_type(&mut self, algorithm: LineAlgorithm) {
        self.active = algorithm;
    }

    pub fn active_type(&self) -> LineAlgorithm {
        self.active
    }
}

impl Default for LineDispatcher {
    fn default() -> Self {
        Self::new(LineAlgorithm::default(), DEFAULT_SLOPE_MARGIN)
    }
}

impl LineRasterizer for LineDispatcher {
    #[inline]
    fn draw_line(&self, target: &mut RenderTarget, from: Vec2i, to: Vec2i, color: u32) {
        match self.active {
            LineAlgorithm::Parametric => self.parametric.draw_line(target, from, to, color),
            LineAlgorithm::SlopeScan => self.slope_scan.draw_line(target, from, to, color),
        }
    }
}
