use std::ops::{Add, Mul, Sub};

use super::Scalar;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2<T> {
    pub x: T,
    pub y: T,
}

pub type Vec2f = Vec2<f32>;
pub type Vec2i = Vec2<i32>;

impl<T: Scalar> Vec2<T> {
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }

    pub fn dot(&self, other: Self) -> T {
        self.x * other.x + self.y * other.y
    }
}

impl Vec2<f32> {
    pub fn length(&self) -> f32 {
        self.dot(*self).sqrt()
    }

    /// Normalizes in place. The result is NaN when the length is zero.
    pub fn normalize(&mut self) -> &mut Self {
        let inv = 1.0 / self.length();
        self.x *= inv;
        self.y *= inv;
        self
    }

    pub fn normalized(mut self) -> Self {
        self.normalize();
        self
    }

    /// Rounds both components to the nearest pixel.
    pub fn round(&self) -> Vec2i {
        Vec2i::new(self.x.round() as i32, self.y.round() as i32)
    }
}

impl<T: Scalar> Add for Vec2<T> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl<T: Scalar> Sub for Vec2<T> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl<T: Scalar> Mul<T> for Vec2<T> {
    type Output = Self;

    fn mul(self, rhs: T) -> Self::Output {
        Self::new(self.x * rhs, self.y * rhs)
    }
}
