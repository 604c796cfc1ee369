//! Small fixed-size vector types used throughout the rasterizer.
//!
//! Both [`Vec2`](vec2::Vec2) and [`Vec3`](vec3::Vec3) are generic over their
//! component type so screen-space pixel positions (`i32`) and model-space
//! positions (`f32`) share one implementation.

use std::ops::{Add, Mul, Sub};

pub mod vec2;
pub mod vec3;

pub use vec2::{Vec2, Vec2f, Vec2i};
pub use vec3::{Vec3, Vec3f, Vec3i};

/// Numeric component type for the vector types.
///
/// Implemented for every `Copy` type with the ring operations, which covers
/// the primitive integers and floats.
pub trait Scalar:
    Copy + Default + PartialEq + Add<Output = Self> + Sub<Output = Self> + Mul<Output = Self>
{
}

impl<T> Scalar for T where
    T: Copy + Default + PartialEq + Add<Output = T> + Sub<Output = T> + Mul<Output = T>
{
}
