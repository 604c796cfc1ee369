//! Low-level rendering primitives.
//!
//! The owning buffers ([`Framebuffer`], [`DepthBuffer`]), the per-pass
//! [`RenderTarget`] view, and the rasterization algorithms that draw into it.

pub mod framebuffer;
pub mod patterns;
pub mod rasterizer;

mod depth;
mod target;

pub use depth::DepthBuffer;
pub use framebuffer::{align_up, Framebuffer, Orientation, BYTES_PER_PIXEL};
pub use rasterizer::{
    barycentric, BarycentricRasterizer, DepthMode, LineAlgorithm, LineDispatcher,
    LineRasterizer, ParametricLine, Rasterizer, SlopeScanLine, Triangle,
};
pub use target::RenderTarget;
