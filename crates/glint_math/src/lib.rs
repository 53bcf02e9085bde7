// Re-export glam for convenience
pub use glam::*;

// Glint math types
mod aabb;
mod error;
mod interval;
mod ray;
mod vector;

pub use aabb::Aabb;
pub use error::{MathError, Result};
pub use interval::Interval;
pub use ray::{Ray, DELTA};
pub use vector::Vector;

/// A position in 3D space.
pub type Point = DVec3;

/// Values whose magnitude is below this are treated as zero.
pub const EPSILON: f64 = 1e-10;

/// Returns true if `x` is close enough to zero to be considered zero.
#[inline]
pub fn is_zero(x: f64) -> bool {
    x.abs() < EPSILON
}

/// Snaps `x` to exactly zero when it is within [`EPSILON`] of zero.
#[inline]
pub fn align_zero(x: f64) -> f64 {
    if is_zero(x) {
        0.0
    } else {
        x
    }
}
