//! Flat per-triangle Lambertian lighting.

use crate::math::Vec3f;

/// Default light direction: along -Z.
pub const DEFAULT_LIGHT_DIRECTION: Vec3f = Vec3f::BACK;

/// A directional light that illuminates the scene uniformly from a direction.
///
/// Directional lights are ideal for simulating distant light sources like the sun,
/// where all rays are effectively parallel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    /// Normalized light direction. A face is lit when its normal points along it.
    pub direction: Vec3f,
}

impl DirectionalLight {
    /// Create a new directional light with the given direction.
    /// The direction will be normalized automatically; a zero vector falls
    /// back to [`DEFAULT_LIGHT_DIRECTION`].
    pub fn new(direction: Vec3f) -> Self {
        DirectionalLight {
            direction: direction
                .try_normalized()
                .unwrap_or(DEFAULT_LIGHT_DIRECTION),
        }
    }

    /// Lambert intensity of the face `v0, v1, v2` (model space).
    ///
    /// The face normal is `(v2 - v0) x (v1 - v0)`, normalized. Returns `None`
    /// when the intensity is `<= 0` (the face turns away from the light or is
    /// edge-on) or the face has zero area; such faces are not drawn at all.
    pub fn flat_intensity(&self, v0: Vec3f, v1: Vec3f, v2: Vec3f) -> Option<f32> {
        let normal = (v2 - v0).cross(v1 - v0).try_normalized()?;
        let intensity = normal.dot(self.direction);
        (intensity > 0.0).then_some(intensity)
    }
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self::new(DEFAULT_LIGHT_DIRECTION)
    }
}
