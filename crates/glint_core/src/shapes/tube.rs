//! Infinite tube around an axis ray.

use crate::error::{GeometryError, Result};
use crate::geometry::{within, GeoPoint, Geometry, Intersectable, Surface};
use glint_math::{align_zero, is_zero, Aabb, DVec3, Point, Ray};

/// An infinite tube: every point at distance `radius` from the axis line.
#[derive(Debug, Clone)]
pub struct Tube {
    radius: f64,
    axis: Ray,
    surface: Surface,
}

impl Tube {
    /// Create a tube. The radius must be positive.
    pub fn new(radius: f64, axis: Ray) -> Result<Self> {
        if !(radius > 0.0 && radius.is_finite()) {
            return Err(GeometryError::InvalidRadius(radius));
        }
        Ok(Self {
            radius,
            axis,
            surface: Surface::default(),
        })
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn axis(&self) -> &Ray {
        &self.axis
    }

    /// Ray parameters where `ray` crosses the wall, nearest first.
    ///
    /// Only positive parameters are returned. A ray parallel to the axis never
    /// crosses the wall, and a ray that only grazes it counts as a miss.
    pub(crate) fn wall_ts(&self, ray: &Ray) -> Vec<f64> {
        let va = self.axis.direction();
        let v = ray.direction();
        let dp = ray.origin() - self.axis.origin();

        // Components perpendicular to the axis
        let v_perp = v - va * v.dot(va);
        let dp_perp = dp - va * dp.dot(va);

        let a = v_perp.length_squared();
        if is_zero(a) {
            return Vec::new();
        }
        let b = 2.0 * v_perp.dot(dp_perp);
        let c = dp_perp.length_squared() - self.radius * self.radius;

        let discriminant = align_zero(b * b - 4.0 * a * c);
        if discriminant <= 0.0 {
            return Vec::new();
        }

        let sqrtd = discriminant.sqrt();
        [(-b - sqrtd) / (2.0 * a), (-b + sqrtd) / (2.0 * a)]
            .into_iter()
            .filter(|&t| align_zero(t) > 0.0)
            .collect()
    }

    /// Outward normal at `p`, measured from the closest point on the axis.
    pub(crate) fn radial_normal(&self, p: Point) -> DVec3 {
        let va = self.axis.direction();
        let o = self.axis.point_at((p - self.axis.origin()).dot(va));
        (p - o)
            .try_normalize()
            .unwrap_or_else(|| va.any_orthonormal_vector())
    }
}

impl Intersectable for Tube {
    fn find_intersections(&self, ray: &Ray, max_distance: f64) -> Vec<GeoPoint<'_>> {
        self.wall_ts(ray)
            .into_iter()
            .filter(|&t| within(t, max_distance))
            .map(|t| GeoPoint::new(self, ray.point_at(t)))
            .collect()
    }

    fn bounding_box(&self) -> Option<Aabb> {
        None
    }
}

impl Geometry for Tube {
    fn normal(&self, p: Point) -> DVec3 {
        self.radial_normal(p)
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
    use glint_math::Vector;

    fn z_tube() -> Tube {
        Tube::new(1.0, Ray::new(Point::ZERO, Vector::Z)).unwrap()
    }

    #[test]
    fn test_tube_rejects_bad_radius() {
        let axis = Ray::new(Point::ZERO, Vector::Z);
        assert_eq!(
            Tube::new(-1.0, axis).unwrap_err(),
            GeometryError::InvalidRadius(-1.0)
        );
    }

    #[test]
    fn test_tube_normal() {
        let tube = z_tube();
        let n = tube.normal(Point::new(1.0, 0.0, 2.0));
        assert!((n - DVec3::X).length() < 1e-12);

        let n = tube.normal(Point::new(0.0, -1.0, -7.0));
        assert!((n - DVec3::NEG_Y).length() < 1e-12);

        // On the axis: any unit vector perpendicular to it
        let n = tube.normal(Point::new(0.0, 0.0, 3.0));
        assert!((n.length() - 1.0).abs() < 1e-12);
        assert!(n.dot(DVec3::Z).abs() < 1e-12);
    }

    #[test]
    fn test_ray_through_tube() {
        let tube = z_tube();
        let ray = Ray::new(Point::new(-3.0, 0.0, 5.0), Vector::X);
        let mut points = tube.find_points(&ray);
        points.sort_by(|a, b| a.x.total_cmp(&b.x));

        assert_eq!(points.len(), 2);
        assert!((points[0] - Point::new(-1.0, 0.0, 5.0)).length() < 1e-9);
        assert!((points[1] - Point::new(1.0, 0.0, 5.0)).length() < 1e-9);
    }

    #[test]
    fn test_ray_from_inside_tube() {
        let tube = z_tube();
        let ray = Ray::new(Point::ZERO, Vector::new(1.0, 0.0, 1.0).unwrap());
        let points = tube.find_points(&ray);

        assert_eq!(points.len(), 1);
        assert!((points[0] - Point::new(1.0, 0.0, 1.0)).length() < 1e-9);
    }

    #[test]
    fn test_ray_misses_tube() {
        let tube = z_tube();

        // Passing beside
        let ray = Ray::new(Point::new(-3.0, 2.0, 0.0), Vector::X);
        assert!(tube.find_points(&ray).is_empty());

        // Grazing the wall
        let ray = Ray::new(Point::new(-3.0, 1.0, 0.0), Vector::X);
        assert!(tube.find_points(&ray).is_empty());

        // Parallel to the axis, inside and outside
        let ray = Ray::new(Point::new(0.5, 0.0, 0.0), Vector::Z);
        assert!(tube.find_points(&ray).is_empty());
        let ray = Ray::new(Point::new(2.0, 0.0, 0.0), Vector::NEG_Z);
        assert!(tube.find_points(&ray).is_empty());

        // Tube behind the ray
        let ray = Ray::new(Point::new(3.0, 0.0, 0.0), Vector::X);
        assert!(tube.find_points(&ray).is_empty());
    }

    #[test]
    fn test_tube_is_unbounded() {
        assert!(z_tube().bounding_box().is_none());
    }
}
