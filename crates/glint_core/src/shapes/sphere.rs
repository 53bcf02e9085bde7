//! Sphere primitive.

use crate::error::{GeometryError, Result};
use crate::geometry::{within, GeoPoint, Geometry, Intersectable, Surface};
use glint_math::{align_zero, Aabb, DVec3, Point, Ray};

/// A sphere given by its radius and center.
#[derive(Debug, Clone)]
pub struct Sphere {
    radius: f64,
    center: Point,
    bbox: Aabb,
    surface: Surface,
}

impl Sphere {
    /// Create a new sphere. The radius must be positive.
    pub fn new(radius: f64, center: Point) -> Result<Self> {
        if !(radius > 0.0 && radius.is_finite()) {
            return Err(GeometryError::InvalidRadius(radius));
        }
        let rvec = DVec3::splat(radius);
        Ok(Self {
            radius,
            center,
            bbox: Aabb::from_points(center - rvec, center + rvec),
            surface: Surface::default(),
        })
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn center(&self) -> Point {
        self.center
    }
}

impl Intersectable for Sphere {
    fn find_intersections(&self, ray: &Ray, max_distance: f64) -> Vec<GeoPoint<'_>> {
        let origin = ray.origin();
        let dir = ray.direction();

        // Starting at the center, the only hit is straight out along the ray
        if origin == self.center {
            if within(self.radius, max_distance) {
                return vec![GeoPoint::new(self, ray.point_at(self.radius))];
            }
            return Vec::new();
        }

        let u = self.center - origin;
        let tm = u.dot(dir);
        let d_squared = (u.length_squared() - tm * tm).max(0.0);
        let d = d_squared.sqrt();

        // Tangent or outside: no hit
        if align_zero(d - self.radius) >= 0.0 {
            return Vec::new();
        }

        let th = (self.radius * self.radius - d_squared).sqrt();
        [tm - th, tm + th]
            .into_iter()
            .filter(|&t| within(t, max_distance))
            .map(|t| GeoPoint::new(self, ray.point_at(t)))
            .collect()
    }

    fn bounding_box(&self) -> Option<Aabb> {
        Some(self.bbox)
    }
}

impl Geometry for Sphere {
    fn normal(&self, p: Point) -> DVec3 {
        (p - self.center).try_normalize().unwrap_or(DVec3::Z)
    }

    fn surface(&self) -> &Surface {
        &self.surface
    }

    fn surface_mut(&mut self) -> &mut Surface {
        &mut self.surface
    }
}
