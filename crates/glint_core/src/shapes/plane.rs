//! Infinite plane.

use crate::error::{GeometryError, Result};
use crate::geometry::{within, GeoPoint, Geometry, Intersectable, Surface};
use glint_math::{align_zero, is_zero, Aabb, DVec3, Point, Ray, Vector};

/// A plane through a reference point with a unit normal.
#[derive(Debug, Clone)]
pub struct Plane {
    q: Point,
    normal: DVec3,
    surface: Surface,
}

impl Plane {
    /// Create a plane through `q` with the given normal (normalized here).
    pub fn new(q: Point, normal: Vector) -> Self {
        Self {
            q,
            normal: normal.normalize().into(),
            surface: Surface::default(),
        }
    }

    /// Create the plane through three points.
    ///
    /// Fails when the points are collinear or coincide.
    pub fn from_points(a: Point, b: Point, c: Point) -> Result<Self> {
        let normal = plane_normal(a, b, c)?;
        Ok(Self {
            q: a,
            normal,
            surface: Surface::default(),
        })
    }

    /// Reference point on the plane.
    pub fn point(&self) -> Point {
        self.q
    }

    /// Unit normal of the plane.
    pub fn normal(&self) -> DVec3 {
        self.normal
    }
}

/// Unit normal `(a - b) x (a - c)` of the plane through three points.
pub(crate) fn plane_normal(a: Point, b: Point, c: Point) -> Result<DVec3> {
    let v1 = Vector::try_from(a - b)?;
    let v2 = Vector::try_from(a - c)?;
    let cross = v1.as_dvec().cross(v2.as_dvec());
    if is_zero(cross.length()) {
        return Err(GeometryError::DegenerateVertices);
    }
    Ok(cross.normalize())
}

/// Intersect a ray with the plane through `q` with unit normal `n`.
///
/// Misses when the ray is parallel to the plane, when it starts exactly at
/// `q`, or when the hit lies behind the origin or beyond `max_distance`.
pub(crate) fn intersect_plane(q: Point, n: DVec3, ray: &Ray, max_distance: f64) -> Option<Point> {
    let origin = ray.origin();
    if origin == q {
        return None;
    }

    let nv = n.dot(ray.direction());
    if is_zero(nv) {
        return None;
    }

    let t = align_zero(n.dot(q - origin) / nv);
    within(t, max_distance).then(|| ray.point_at(t))
}

impl Intersectable for Plane {
    fn find_intersections(&self, ray: &Ray, max_distance: f64) -> Vec<GeoPoint<'_>> {
        intersect_plane(self.q, self.normal, ray, max_distance)
            .map(|p| GeoPoint::new(self, p))
            .into_iter()
            .collect()
    }

    fn bounding_box(&self) -> Option<Aabb> {
        None
    }
}

impl Geometry for Plane {
    fn normal(&self, _p: Point) -> DVec3 {
        self.normal
    }

    fn surface(&self) -> &Surface {
        &self.surface
    }

    fn surface_mut(&mut self) -> &mut Surface {
        &mut self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_math::MathError;

    fn approx(a: Point, b: Point) -> bool {
        (a - b).length() < 1e-9
    }

    #[test]
    fn test_plane_from_points() {
        let plane = Plane::from_points(
            Point::new(1.0, 0.0, 0.0),
            Point::new(0.0, 1.0, 0.0),
            Point::new(0.0, 0.0, 1.0),
        )
        .unwrap();

        let n = plane.normal();
        assert!((n.length() - 1.0).abs() < 1e-12);
        let expected = DVec3::ONE.normalize();
        assert!(approx(n, expected) || approx(n, -expected));

        // Normal is perpendicular to the plane's edges
        assert!(n.dot(Point::new(1.0, -1.0, 0.0)).abs() < 1e-12);
        assert!(n.dot(Point::new(0.0, 1.0, -1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_plane_from_degenerate_points() {
        // Coinciding points
        let err = Plane::from_points(Point::ZERO, Point::ZERO, Point::ONE).unwrap_err();
        assert_eq!(err, GeometryError::Math(MathError::ZeroVector));

        // Collinear points
        let err = Plane::from_points(Point::ZERO, Point::ONE, Point::splat(2.0)).unwrap_err();
        assert_eq!(err, GeometryError::DegenerateVertices);
    }

    #[test]
    fn test_plane_normal_is_constant() {
        let plane = Plane::new(Point::ZERO, Vector::new(0.0, 0.0, 3.0).unwrap());
        assert_eq!(Geometry::normal(&plane, Point::new(5.0, -2.0, 0.0)), DVec3::Z);
    }

    #[test]
    fn test_ray_crosses_plane() {
        let plane = Plane::new(Point::new(0.0, 0.0, 1.0), Vector::Z);
        let ray = Ray::new(Point::ZERO, Vector::new(1.0, 0.0, 1.0).unwrap());
        let points = plane.find_points(&ray);

        assert_eq!(points.len(), 1);
        assert!(approx(points[0], Point::new(1.0, 0.0, 1.0)));
    }

    #[test]
    fn test_ray_away_from_plane() {
        let plane = Plane::new(Point::new(0.0, 0.0, 1.0), Vector::Z);
        let ray = Ray::new(Point::ZERO, Vector::NEG_Z);
        assert!(plane.find_points(&ray).is_empty());
    }

    #[test]
    fn test_ray_parallel_to_plane() {
        let plane = Plane::new(Point::new(0.0, 0.0, 1.0), Vector::Z);

        // Off the plane
        let ray = Ray::new(Point::ZERO, Vector::X);
        assert!(plane.find_points(&ray).is_empty());

        // Inside the plane
        let ray = Ray::new(Point::new(0.0, 5.0, 1.0), Vector::X);
        assert!(plane.find_points(&ray).is_empty());
    }

    #[test]
    fn test_ray_starts_on_plane() {
        let plane = Plane::new(Point::new(0.0, 0.0, 1.0), Vector::Z);

        // Orthogonal, starting on the plane
        let ray = Ray::new(Point::new(2.0, 3.0, 1.0), Vector::Z);
        assert!(plane.find_points(&ray).is_empty());

        // Starting exactly at the reference point
        let ray = Ray::new(Point::new(0.0, 0.0, 1.0), Vector::new(1.0, 0.0, 1.0).unwrap());
        assert!(plane.find_points(&ray).is_empty());
    }

    #[test]
    fn test_plane_max_distance() {
        let plane = Plane::new(Point::new(0.0, 0.0, 4.0), Vector::Z);
        let ray = Ray::new(Point::ZERO, Vector::Z);

        assert_eq!(plane.find_intersections(&ray, 4.0).len(), 1);
        assert!(plane.find_intersections(&ray, 3.9).is_empty());
    }

    #[test]
    fn test_plane_is_unbounded() {
        let plane = Plane::new(Point::ZERO, Vector::Y);
        assert!(plane.bounding_box().is_none());
    }
}
