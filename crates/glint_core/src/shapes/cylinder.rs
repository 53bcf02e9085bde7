//! Finite capped cylinder.

use super::plane::intersect_plane;
use super::Tube;
use crate::error::{GeometryError, Result};
use crate::geometry::{within, GeoPoint, Geometry, Intersectable, Surface};
use glint_math::{align_zero, Aabb, DVec3, Point, Ray};

/// A tube cut to `height` along its axis and closed by two flat caps.
///
/// The bottom cap is centered on the axis origin, the top cap `height`
/// further along the axis direction.
#[derive(Debug, Clone)]
pub struct Cylinder {
    tube: Tube,
    height: f64,
    bbox: Aabb,
}

impl Cylinder {
    /// Create a cylinder. Radius and height must be positive.
    pub fn new(radius: f64, axis: Ray, height: f64) -> Result<Self> {
        if !(height > 0.0 && height.is_finite()) {
            return Err(GeometryError::InvalidHeight(height));
        }
        let tube = Tube::new(radius, axis)?;

        let bottom = axis.origin();
        let top = axis.point_at(height);
        let va = axis.direction();
        let extent = DVec3::new(
            radius * (1.0 - va.x * va.x).max(0.0).sqrt(),
            radius * (1.0 - va.y * va.y).max(0.0).sqrt(),
            radius * (1.0 - va.z * va.z).max(0.0).sqrt(),
        );
        let bbox = Aabb::from_points(bottom.min(top) - extent, bottom.max(top) + extent);

        Ok(Self { tube, height, bbox })
    }

    pub fn radius(&self) -> f64 {
        self.tube.radius()
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn axis(&self) -> &Ray {
        self.tube.axis()
    }

    /// Signed distance of `p` along the axis from the bottom cap.
    fn axial(&self, p: Point) -> f64 {
        let axis = self.tube.axis();
        align_zero((p - axis.origin()).dot(axis.direction()))
    }

    /// Cap hit on the plane through `center`, kept only strictly inside the rim.
    fn cap_hit(&self, center: Point, ray: &Ray, max_distance: f64) -> Option<Point> {
        let p = intersect_plane(center, self.tube.axis().direction(), ray, max_distance)?;
        let r = self.tube.radius();
        (align_zero(p.distance_squared(center) - r * r) < 0.0).then_some(p)
    }
}

impl Intersectable for Cylinder {
    fn find_intersections(&self, ray: &Ray, max_distance: f64) -> Vec<GeoPoint<'_>> {
        let mut hits: Vec<GeoPoint<'_>> = self
            .tube
            .wall_ts(ray)
            .into_iter()
            .filter(|&t| within(t, max_distance))
            .map(|t| ray.point_at(t))
            .filter(|&p| {
                let s = self.axial(p);
                s > 0.0 && align_zero(s - self.height) < 0.0
            })
            .map(|p| GeoPoint::new(self, p))
            .collect();

        // A ray can cross the wall at most twice
        if hits.len() == 2 {
            return hits;
        }

        let axis = self.tube.axis();
        for center in [axis.origin(), axis.point_at(self.height)] {
            if let Some(p) = self.cap_hit(center, ray, max_distance) {
                hits.push(GeoPoint::new(self, p));
            }
        }
        hits
    }

    fn bounding_box(&self) -> Option<Aabb> {
        Some(self.bbox)
    }
}

impl Geometry for Cylinder {
    fn normal(&self, p: Point) -> DVec3 {
        let va = self.tube.axis().direction();
        let s = self.axial(p);
        if s <= 0.0 {
            -va
        } else if align_zero(s - self.height) >= 0.0 {
            va
        } else {
            self.tube.radial_normal(p)
        }
    }

    fn surface(&self) -> &Surface {
        self.tube.surface()
    }

    fn surface_mut(&mut self) -> &mut Surface {
        self.tube.surface_mut()
    }
}
