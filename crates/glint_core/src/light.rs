//! Light sources consumed by the ray tracer.

use crate::Color;
use glint_math::{align_zero, is_zero, DVec3, Point, Vector};

/// A light that illuminates surface points.
pub trait LightSource: Send + Sync {
    /// Light intensity arriving at `p`.
    fn intensity(&self, p: Point) -> Color;

    /// Unit direction from the light toward `p`.
    ///
    /// Returns the zero vector when the direction is undefined (the point
    /// coincides with the light), which the shading code treats as unlit.
    fn direction(&self, p: Point) -> DVec3;

    /// Distance from `p` to the light.
    fn distance(&self, p: Point) -> f64;
}

/// Uniform light added once to every visible surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    intensity: Color,
}

impl AmbientLight {
    /// No ambient contribution.
    pub const NONE: AmbientLight = AmbientLight {
        intensity: DVec3::ZERO,
    };

    /// Ambient light with intensity `ia` scaled per channel by `ka`.
    pub fn new(ia: Color, ka: DVec3) -> Self {
        Self { intensity: ia * ka }
    }

    /// Ambient light with a single scale factor for every channel.
    pub fn uniform(ia: Color, ka: f64) -> Self {
        Self::new(ia, DVec3::splat(ka))
    }

    pub fn intensity(&self) -> Color {
        self.intensity
    }
}

impl Default for AmbientLight {
    fn default() -> Self {
        Self::NONE
    }
}

/// Omnidirectional light at a position, attenuated with distance.
#[derive(Debug, Clone, Copy)]
pub struct PointLight {
    intensity: Color,
    position: Point,
    kc: f64,
    kl: f64,
    kq: f64,
}

impl PointLight {
    /// Create a point light with no distance falloff (kc=1, kl=0, kq=0).
    pub fn new(intensity: Color, position: Point) -> Self {
        Self {
            intensity,
            position,
            kc: 1.0,
            kl: 0.0,
            kq: 0.0,
        }
    }

    /// Constant attenuation factor.
    pub fn with_kc(mut self, kc: f64) -> Self {
        self.kc = kc;
        self
    }

    /// Linear attenuation factor.
    pub fn with_kl(mut self, kl: f64) -> Self {
        self.kl = kl;
        self
    }

    /// Quadratic attenuation factor.
    pub fn with_kq(mut self, kq: f64) -> Self {
        self.kq = kq;
        self
    }

    pub fn position(&self) -> Point {
        self.position
    }

    /// `kc + kl*d + kq*d^2` for a point at distance `d`.
    fn attenuation(&self, d: f64) -> f64 {
        self.kc + self.kl * d + self.kq * d * d
    }
}

impl LightSource for PointLight {
    fn intensity(&self, p: Point) -> Color {
        let factor = self.attenuation(self.position.distance(p));
        // An all-zero attenuation has no meaningful falloff; leave the light unscaled.
        if is_zero(factor) {
            return self.intensity;
        }
        self.intensity / factor
    }

    fn direction(&self, p: Point) -> DVec3 {
        (p - self.position).normalize_or_zero()
    }

    fn distance(&self, p: Point) -> f64 {
        self.position.distance(p)
    }
}

/// Point light that shines mostly along one direction.
#[derive(Debug, Clone, Copy)]
pub struct SpotLight {
    light: PointLight,
    beam: DVec3,
    narrow_beam: u32,
}

impl SpotLight {
    pub fn new(intensity: Color, position: Point, beam: Vector) -> Self {
        Self {
            light: PointLight::new(intensity, position),
            beam: beam.normalize().into(),
            narrow_beam: 1,
        }
    }

    pub fn with_kc(mut self, kc: f64) -> Self {
        self.light = self.light.with_kc(kc);
        self
    }

    pub fn with_kl(mut self, kl: f64) -> Self {
        self.light = self.light.with_kl(kl);
        self
    }

    pub fn with_kq(mut self, kq: f64) -> Self {
        self.light = self.light.with_kq(kq);
        self
    }

    /// Exponent applied to the beam falloff; larger values give a tighter beam.
    pub fn with_narrow_beam(mut self, narrow_beam: u32) -> Self {
        self.narrow_beam = narrow_beam;
        self
    }
}

impl LightSource for SpotLight {
    fn intensity(&self, p: Point) -> Color {
        let projection = align_zero(self.beam.dot(self.light.direction(p)));
        if projection <= 0.0 {
            return Color::ZERO;
        }
        let exponent = i32::try_from(self.narrow_beam).unwrap_or(i32::MAX);
        self.light.intensity(p) * projection.powi(exponent)
    }

    fn direction(&self, p: Point) -> DVec3 {
        self.light.direction(p)
    }

    fn distance(&self, p: Point) -> f64 {
        self.light.distance(p)
    }
}

/// Light arriving from infinitely far away along a fixed direction.
#[derive(Debug, Clone, Copy)]
pub struct DirectionalLight {
    intensity: Color,
    direction: DVec3,
}

impl DirectionalLight {
    pub fn new(intensity: Color, direction: Vector) -> Self {
        Self {
            intensity,
            direction: direction.normalize().into(),
        }
    }
}

impl LightSource for DirectionalLight {
    fn intensity(&self, _p: Point) -> Color {
        self.intensity
    }

    fn direction(&self, _p: Point) -> DVec3 {
        self.direction
    }

    fn distance(&self, _p: Point) -> f64 {
        f64::INFINITY
    }
}
