//! Runtime configuration for the viewer.
//!
//! Defaults live in constants so the library, the viewer and the benchmarks
//! agree on them; [`Config`] lets the command line override each one.

use std::path::PathBuf;

use clap::Parser;

use crate::math::Vec3f;
use crate::render::framebuffer::DEFAULT_ROW_ALIGNMENT;
use crate::render::rasterizer::DEFAULT_SLOPE_MARGIN;
use crate::render::LineAlgorithm;

pub const WINDOW_WIDTH: u32 = 512;
pub const WINDOW_HEIGHT: u32 = 512;
pub const FPS: u64 = 60;
pub const FRAME_TARGET_TIME: f64 = 1000.0 / FPS as f64;

/// CPU rasterizer viewer.
///
/// Keys: C clear, L line set, W wireframe, S shaded, D shaded with depth test,
/// H/V marker patterns, P save capture, Esc quit.
#[derive(Debug, Clone, Parser)]
#[command(name = "softblit", version, about)]
pub struct Config {
    /// Window and framebuffer width in pixels
    #[arg(long, default_value_t = WINDOW_WIDTH)]
    pub width: u32,

    /// Window and framebuffer height in pixels
    #[arg(long, default_value_t = WINDOW_HEIGHT)]
    pub height: u32,

    /// Wavefront OBJ model with coordinates in [-1, 1]; a cube is used if omitted
    #[arg(long)]
    pub model: Option<PathBuf>,

    /// Line drawing algorithm
    #[arg(long, value_enum, default_value_t = LineAlgorithm::Parametric)]
    pub line: LineAlgorithm,

    /// Distance margin for the slope-scan line algorithm
    #[arg(long, default_value_t = DEFAULT_SLOPE_MARGIN)]
    pub slope_margin: f32,

    /// Framebuffer row alignment in bytes (power of two)
    #[arg(long, default_value_t = DEFAULT_ROW_ALIGNMENT, value_parser = parse_alignment)]
    pub row_alignment: usize,

    /// Light direction as three comma-separated numbers, e.g. 0,0,-1
    #[arg(long, default_value = "0,0,-1", value_parser = parse_direction, allow_hyphen_values = true)]
    pub light: Vec3f,

    /// Directory for PNG captures
    #[arg(long, default_value = ".")]
    pub capture_dir: PathBuf,
}

impl Config {
    pub fn light_direction(&self) -> Vec3f {
        self.light
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: WINDOW_WIDTH,
            height: WINDOW_HEIGHT,
            model: None,
            line: LineAlgorithm::default(),
            slope_margin: DEFAULT_SLOPE_MARGIN,
            row_alignment: DEFAULT_ROW_ALIGNMENT,
            light: Vec3f::BACK,
            capture_dir: PathBuf::from("."),
        }
    }
}

fn parse_alignment(s: &str) -> Result<usize, String> {
    let value: usize = s.parse().map_err(|e| format!("{e}"))?;
    if value.is_power_of_two() {
        Ok(value)
    } else {
        Err(format!("{value} is not a power of two"))
    }
}

fn parse_direction(s: &str) -> Result<Vec3f, String> {
    let parts = s
        .split(',')
        .map(|part| part.trim().parse::<f32>().map_err(|e| format!("{part:?}: {e}")))
        .collect::<Result<Vec<_>, _>>()?;
    match parts[..] {
        [x, y, z] => Ok(Vec3f::new(x, y, z)),
        _ => Err(format!("expected three components, got {}", parts.len())),
    }
}
