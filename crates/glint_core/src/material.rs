//! Surface coefficients for the local and global illumination model.

use glint_math::DVec3;

/// Color type alias (linear RGB, non-negative, not clamped).
pub type Color = DVec3;

/// Per-channel attenuation checks on coefficient triples.
pub trait Attenuation {
    /// True when every channel is below `threshold`.
    fn lower_than(&self, threshold: f64) -> bool;
}

impl Attenuation for DVec3 {
    #[inline]
    fn lower_than(&self, threshold: f64) -> bool {
        self.x < threshold && self.y < threshold && self.z < threshold
    }
}

/// Physical coefficients of a surface.
///
/// Each coefficient is a per-channel triple, conceptually in `[0, 1]`.
/// The default material absorbs everything and has no highlight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Diffuse reflection
    pub kd: DVec3,
    /// Specular reflection
    pub ks: DVec3,
    /// Transmission (transparency)
    pub kt: DVec3,
    /// Mirror reflection
    pub kr: DVec3,
    /// Phong shininess exponent
    pub shininess: u32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            kd: DVec3::ZERO,
            ks: DVec3::ZERO,
            kt: DVec3::ZERO,
            kr: DVec3::ZERO,
            shininess: 0,
        }
    }
}

impl Material {
    /// Create a fully absorbing material.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_kd(mut self, kd: DVec3) -> Self {
        self.kd = kd;
        self
    }

    pub fn with_ks(mut self, ks: DVec3) -> Self {
        self.ks = ks;
        self
    }

    pub fn with_kt(mut self, kt: DVec3) -> Self {
        self.kt = kt;
        self
    }

    pub fn with_kr(mut self, kr: DVec3) -> Self {
        self.kr = kr;
        self
    }

    pub fn with_shininess(mut self, shininess: u32) -> Self {
        self.shininess = shininess;
        self
    }

    /// True if light passes through the surface at all.
    pub fn is_transparent(&self) -> bool {
        self.kt.max_element() > 0.0
    }

    /// True if the surface mirrors any light.
    pub fn is_reflective(&self) -> bool {
        self.kr.max_element() > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_material_absorbs() {
        let m = Material::default();
        assert_eq!(m.kd, DVec3::ZERO);
        assert_eq!(m.ks, DVec3::ZERO);
        assert_eq!(m.kt, DVec3::ZERO);
        assert_eq!(m.kr, DVec3::ZERO);
        assert_eq!(m.shininess, 0);
        assert!(!m.is_transparent());
        assert!(!m.is_reflective());
    }

    #[test]
    fn test_material_builder() {
        let m = Material::new()
            .with_kd(DVec3::splat(0.5))
            .with_ks(DVec3::new(0.2, 0.3, 0.4))
            .with_kt(DVec3::splat(0.6))
            .with_shininess(30);

        assert_eq!(m.kd, DVec3::splat(0.5));
        assert_eq!(m.ks, DVec3::new(0.2, 0.3, 0.4));
        assert_eq!(m.shininess, 30);
        assert!(m.is_transparent());
        assert!(!m.is_reflective());
    }

    #[test]
    fn test_lower_than_requires_every_channel() {
        assert!(DVec3::splat(0.0005).lower_than(0.001));
        assert!(!DVec3::new(0.0005, 0.5, 0.0005).lower_than(0.001));
        assert!(!DVec3::ONE.lower_than(0.001));
    }
}
