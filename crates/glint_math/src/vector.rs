//! Non-zero direction vectors.
//!
//! Points are plain `DVec3` values. Directions go through [`Vector`], which
//! refuses the zero tuple at construction so that normalizing one can never
//! divide by zero.

use crate::{MathError, Result};
use glam::DVec3;
use std::fmt;
use std::ops::Neg;

/// A 3D vector that is guaranteed to have a finite, non-zero length.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Vector(DVec3);

impl Vector {
    pub const X: Vector = Vector(DVec3::X);
    pub const Y: Vector = Vector(DVec3::Y);
    pub const Z: Vector = Vector(DVec3::Z);
    pub const NEG_X: Vector = Vector(DVec3::NEG_X);
    pub const NEG_Y: Vector = Vector(DVec3::NEG_Y);
    pub const NEG_Z: Vector = Vector(DVec3::NEG_Z);

    /// Create a vector from components.
    pub fn new(x: f64, y: f64, z: f64) -> Result<Self> {
        Self::try_from_dvec(DVec3::new(x, y, z))
    }

    /// Wrap a raw `DVec3`, rejecting zero-length and non-finite values.
    pub fn try_from_dvec(v: DVec3) -> Result<Self> {
        if !v.is_finite() {
            return Err(MathError::NonFinite);
        }
        // A length that rounds to zero is as bad as an exact zero tuple.
        let len = v.length();
        if len == 0.0 || !len.is_finite() {
            return Err(MathError::ZeroVector);
        }
        Ok(Self(v))
    }

    /// The underlying components.
    #[inline]
    pub fn as_dvec(&self) -> DVec3 {
        self.0
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.0.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.0.y
    }

    #[inline]
    pub fn z(&self) -> f64 {
        self.0.z
    }

    #[inline]
    pub fn length_squared(&self) -> f64 {
        self.0.length_squared()
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.0.length()
    }

    #[inline]
    pub fn dot(&self, other: &Vector) -> f64 {
        self.0.dot(other.0)
    }

    /// Sum of two vectors. Fails when they cancel out.
    pub fn checked_add(&self, other: &Vector) -> Result<Vector> {
        Self::try_from_dvec(self.0 + other.0)
    }

    /// Scale by a scalar. Fails for a zero factor.
    pub fn scale(&self, factor: f64) -> Result<Vector> {
        Self::try_from_dvec(self.0 * factor)
    }

    /// Cross product. Fails when the vectors are parallel.
    pub fn cross(&self, other: &Vector) -> Result<Vector> {
        Self::try_from_dvec(self.0.cross(other.0))
    }

    /// Unit-length copy of this vector.
    ///
    /// Total: the constructor already guarantees a non-zero finite length.
    pub fn normalize(&self) -> Vector {
        Vector(self.0 / self.0.length())
    }

    /// Returns true if the vector has unit length within tolerance.
    pub fn is_normalized(&self) -> bool {
        crate::is_zero(self.0.length() - 1.0)
    }
}

impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        Vector(-self.0)
    }
}

impl From<Vector> for DVec3 {
    fn from(v: Vector) -> DVec3 {
        v.0
    }
}

impl TryFrom<DVec3> for Vector {
    type Error = MathError;

    fn try_from(v: DVec3) -> Result<Vector> {
        Vector::try_from_dvec(v)
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.0.x, self.0.y, self.0.z)
    }
}
