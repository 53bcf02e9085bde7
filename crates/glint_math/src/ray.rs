use crate::{align_zero, Point, Vector};
use glam::DVec3;

/// Distance a secondary ray's origin is pushed along the surface normal.
pub const DELTA: f64 = 0.1;

/// A ray in 3D space with an origin and a unit direction.
///
/// Rays are used for raytracing - they represent a half-line starting at
/// `origin` and traveling along `direction`. Equality is structural.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    origin: Point,
    direction: DVec3,
}

impl Ray {
    /// Create a new ray. The direction is normalized.
    pub fn new(origin: Point, direction: Vector) -> Self {
        Self {
            origin,
            direction: direction.normalize().into(),
        }
    }

    /// Create a secondary ray leaving a surface.
    ///
    /// The origin is moved by [`DELTA`] along `normal`, toward the side of the
    /// surface that `direction` points to, so the new ray does not hit the
    /// surface it starts on. A direction tangent to the surface keeps the
    /// original point.
    pub fn offset(point: Point, direction: Vector, normal: DVec3) -> Self {
        let direction: DVec3 = direction.normalize().into();
        let nv = align_zero(normal.dot(direction));
        let origin = if nv == 0.0 {
            point
        } else {
            point + normal * DELTA.copysign(nv)
        };
        Self { origin, direction }
    }

    /// Get the origin point of the ray.
    #[inline]
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Get the unit direction of the ray.
    #[inline]
    pub fn direction(&self) -> DVec3 {
        self.direction
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn point_at(&self, t: f64) -> Point {
        if t == 0.0 {
            return self.origin;
        }
        self.origin + self.direction * t
    }

    /// Returns the point closest to the ray origin, if any.
    pub fn find_closest_point(&self, points: &[Point]) -> Option<Point> {
        self.find_closest_by(points, |p| *p)
    }

    /// Returns the item whose position is closest to the ray origin.
    ///
    /// Shared by bare points and richer intersection records.
    pub fn find_closest_by<T, F>(&self, items: &[T], position: F) -> Option<T>
    where
        T: Clone,
        F: Fn(&T) -> Point,
    {
        items
            .iter()
            .map(|item| (self.origin.distance_squared(position(item)), item))
            .min_by(|(a, _), (b, _)| a.total_cmp(b))
            .map(|(_, item)| item.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_normalizes_direction() {
        let ray = Ray::new(Point::ZERO, Vector::new(0.0, 3.0, 4.0).unwrap());
        assert!((ray.direction().length() - 1.0).abs() < 1e-12);
        assert!((ray.direction() - DVec3::new(0.0, 0.6, 0.8)).length() < 1e-12);
    }

    #[test]
    fn test_ray_point_at() {
        let ray = Ray::new(Point::new(1.0, 0.0, 0.0), Vector::X);

        assert_eq!(ray.point_at(0.0), Point::new(1.0, 0.0, 0.0));
        assert_eq!(ray.point_at(1.0), Point::new(2.0, 0.0, 0.0));
        assert_eq!(ray.point_at(-1.0), Point::ZERO);
    }

    #[test]
    fn test_ray_offset_follows_direction_side() {
        let normal = DVec3::Z;

        // Leaving the surface on the normal side
        let out = Ray::offset(Point::ZERO, Vector::new(1.0, 0.0, 1.0).unwrap(), normal);
        assert_eq!(out.origin(), Point::new(0.0, 0.0, DELTA));

        // Entering the surface
        let inward = Ray::offset(Point::ZERO, Vector::NEG_Z, normal);
        assert_eq!(inward.origin(), Point::new(0.0, 0.0, -DELTA));

        // Tangent direction keeps the point
        let tangent = Ray::offset(Point::ZERO, Vector::X, normal);
        assert_eq!(tangent.origin(), Point::ZERO);
    }

    #[test]
    fn test_find_closest_point() {
        let ray = Ray::new(Point::ZERO, Vector::X);
        let points = [
            Point::new(3.0, 0.0, 0.0),
            Point::new(1.0, 0.0, 0.0),
            Point::new(2.0, 0.0, 0.0),
        ];

        assert_eq!(ray.find_closest_point(&points), Some(Point::new(1.0, 0.0, 0.0)));
        assert_eq!(ray.find_closest_point(&[]), None);
    }

    #[test]
    fn test_ray_equality() {
        let a = Ray::new(Point::ZERO, Vector::new(0.0, 0.0, 2.0).unwrap());
        let b = Ray::new(Point::ZERO, Vector::Z);
        assert_eq!(a, b);
        assert_ne!(a, Ray::new(Point::ONE, Vector::Z));
    }
}
