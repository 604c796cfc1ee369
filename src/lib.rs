//! A CPU software rasterizer for lines and flat-shaded triangles.
//!
//! All drawing happens on the CPU into a packed ARGB8888 [`Framebuffer`]
//! with an optional depth buffer. SDL2 is used only to show the result.
//!
//! # Quick Start
//!
//! ```ignore
//! use softblit::prelude::*;
//!
//! let mut engine = Engine::new(512, 512);
//! engine.execute(DrawCommand::ShadedDepth, &Model::cube());
//! engine.save_capture(std::path::Path::new("cube.png"))?;
//! ```

// Public API - exposed to library consumers
pub mod colors;
pub mod config;
pub mod engine;
pub mod light;
pub mod math;
pub mod model;
pub mod projection;
pub mod render;
pub mod window;

// Re-export commonly needed types at crate root for convenience
pub use config::Config;
pub use engine::{DrawCommand, Engine, FrameStats};
pub use model::{LoadError, MeshSource, Model};
pub use render::{DepthBuffer, Framebuffer, Orientation};

/// Prelude module for convenient imports.
///
/// # Example
/// ```ignore
/// use softblit::prelude::*;
/// ```
pub mod prelude {
    // Engine
    pub use crate::engine::{DrawCommand, Engine, FrameStats};

    // Model
    pub use crate::model::{MeshSource, Model};

    // Shading
    pub use crate::colors::Color;
    pub use crate::light::DirectionalLight;

    // Math
    pub use crate::math::{Vec2f, Vec2i, Vec3f, Vec3i};

    // Rendering
    pub use crate::render::{DepthMode, Framebuffer, LineAlgorithm, Orientation};

    // Window & Input
    pub use crate::window::{FrameLimiter, Key, Window, WindowEvent};
}
