//! Triangle primitive.

use super::Polygon;
use crate::error::Result;
use crate::geometry::{GeoPoint, Geometry, Intersectable, Surface};
use glint_math::{Aabb, DVec3, Point, Ray};

/// A three-vertex polygon.
#[derive(Debug, Clone)]
pub struct Triangle(Polygon);

impl Triangle {
    /// Create a triangle. Fails on collinear or repeated vertices.
    pub fn new(a: Point, b: Point, c: Point) -> Result<Self> {
        Ok(Self(Polygon::new(vec![a, b, c])?))
    }

    pub fn vertices(&self) -> [Point; 3] {
        let v = self.0.vertices();
        [v[0], v[1], v[2]]
    }
}

impl Intersectable for Triangle {
    fn find_intersections(&self, ray: &Ray, max_distance: f64) -> Vec<GeoPoint<'_>> {
        self.0
            .intersect_point(ray, max_distance)
            .map(|p| GeoPoint::new(self, p))
            .into_iter()
            .collect()
    }

    fn bounding_box(&self) -> Option<Aabb> {
        self.0.bounding_box()
    }
}

impl Geometry for Triangle {
    fn normal(&self, p: Point) -> DVec3 {
        self.0.normal(p)
    }

    fn surface(&self) -> &Surface {
        self.0.surface()
    }

    fn surface_mut(&mut self) -> &mut Surface {
        self.0.surface_mut()
    }
}
