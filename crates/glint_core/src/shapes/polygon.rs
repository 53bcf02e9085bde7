//! Convex planar polygon.

use super::plane::{intersect_plane, plane_normal};
use crate::error::{GeometryError, Result};
use crate::geometry::{GeoPoint, Geometry, Intersectable, Surface};
use glint_math::{align_zero, is_zero, Aabb, DVec3, Point, Ray};

/// A convex polygon with three or more coplanar vertices given in order.
#[derive(Debug, Clone)]
pub struct Polygon {
    vertices: Vec<Point>,
    normal: DVec3,
    bbox: Aabb,
    surface: Surface,
}

impl Polygon {
    /// Create a polygon from its vertices, in order around the boundary.
    ///
    /// Validates that there are at least three vertices, that they all lie in
    /// the plane of the first three, and that the outline is strictly convex.
    pub fn new(vertices: Vec<Point>) -> Result<Self> {
        let n = vertices.len();
        if n < 3 {
            return Err(GeometryError::TooFewVertices(n));
        }

        let normal = plane_normal(vertices[0], vertices[1], vertices[2])?;

        for (i, v) in vertices.iter().enumerate().skip(3) {
            if !is_zero(normal.dot(*v - vertices[0])) {
                return Err(GeometryError::NonPlanarPolygon(i));
            }
        }

        // Consecutive edges must turn the same way around the normal
        let mut orientation = 0.0;
        for i in 0..n {
            let a = vertices[i];
            let b = vertices[(i + 1) % n];
            let c = vertices[(i + 2) % n];
            let turn = align_zero((b - a).cross(c - b).dot(normal));
            if turn == 0.0 {
                return Err(GeometryError::DegenerateVertices);
            }
            if orientation != 0.0 && turn.signum() != orientation {
                return Err(GeometryError::NonConvexPolygon((i + 1) % n));
            }
            orientation = turn.signum();
        }

        let bbox = Aabb::enclosing(&vertices).ok_or(GeometryError::TooFewVertices(n))?;

        Ok(Self {
            vertices,
            normal,
            bbox,
            surface: Surface::default(),
        })
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// The point where `ray` crosses the polygon's interior, if any.
    ///
    /// Hits on an edge or a vertex are misses.
    pub(crate) fn intersect_point(&self, ray: &Ray, max_distance: f64) -> Option<Point> {
        let p = intersect_plane(self.vertices[0], self.normal, ray, max_distance)?;

        let n = self.vertices.len();
        let mut side = 0.0;
        for i in 0..n {
            let a = self.vertices[i];
            let b = self.vertices[(i + 1) % n];
            let s = align_zero((b - a).cross(p - a).dot(self.normal));
            if s == 0.0 {
                return None;
            }
            if side != 0.0 && s.signum() != side {
                return None;
            }
            side = s.signum();
        }

        Some(p)
    }
}

impl Intersectable for Polygon {
    fn find_intersections(&self, ray: &Ray, max_distance: f64) -> Vec<GeoPoint<'_>> {
        self.intersect_point(ray, max_distance)
            .map(|p| GeoPoint::new(self, p))
            .into_iter()
            .collect()
    }

    fn bounding_box(&self) -> Option<Aabb> {
        Some(self.bbox)
    }
}

impl Geometry for Polygon {
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
    use glint_math::Vector;

    fn square() -> Polygon {
        Polygon::new(vec![
            Point::new(0.0, 0.0, 1.0),
            Point::new(1.0, 0.0, 0.0),
            Point::new(0.0, 1.0, 0.0),
            Point::new(-1.0, 1.0, 1.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_polygon_validation() {
        assert_eq!(
            Polygon::new(vec![Point::ZERO, Point::X]).unwrap_err(),
            GeometryError::TooFewVertices(2)
        );

        // Last vertex off the plane
        let err = Polygon::new(vec![
            Point::new(0.0, 0.0, 1.0),
            Point::new(1.0, 0.0, 0.0),
            Point::new(0.0, 1.0, 0.0),
            Point::new(0.0, 0.5, 0.1),
        ])
        .unwrap_err();
        assert_eq!(err, GeometryError::NonPlanarPolygon(3));

        // Concave outline (arrow head)
        let err = Polygon::new(vec![
            Point::new(0.0, 0.0, 0.0),
            Point::new(2.0, 1.0, 0.0),
            Point::new(0.0, 2.0, 0.0),
            Point::new(0.5, 1.0, 0.0),
        ])
        .unwrap_err();
        assert!(matches!(err, GeometryError::NonConvexPolygon(_)));

        // Repeated vertex
        let err = Polygon::new(vec![
            Point::new(0.0, 0.0, 1.0),
            Point::new(1.0, 0.0, 0.0),
            Point::new(0.0, 1.0, 0.0),
            Point::new(0.0, 1.0, 0.0),
        ])
        .unwrap_err();
        assert_eq!(err, GeometryError::DegenerateVertices);
    }

    #[test]
    fn test_polygon_normal() {
        let polygon = square();
        let n = polygon.normal(Point::new(0.0, 0.0, 1.0));
        let expected = DVec3::ONE.normalize();

        assert!((n.length() - 1.0).abs() < 1e-12);
        assert!((n - expected).length() < 1e-9 || (n + expected).length() < 1e-9);
    }

    #[test]
    fn test_polygon_intersections() {
        let polygon = Polygon::new(vec![
            Point::new(-1.0, -1.0, 0.0),
            Point::new(1.0, -1.0, 0.0),
            Point::new(1.0, 1.0, 0.0),
            Point::new(-1.0, 1.0, 0.0),
        ])
        .unwrap();

        // Inside
        let ray = Ray::new(Point::new(0.5, 0.5, 2.0), Vector::NEG_Z);
        assert_eq!(polygon.find_points(&ray), vec![Point::new(0.5, 0.5, 0.0)]);

        // Outside
        let ray = Ray::new(Point::new(2.0, 0.5, 2.0), Vector::NEG_Z);
        assert!(polygon.find_points(&ray).is_empty());

        // On an edge
        let ray = Ray::new(Point::new(1.0, 0.0, 2.0), Vector::NEG_Z);
        assert!(polygon.find_points(&ray).is_empty());

        // On a vertex
        let ray = Ray::new(Point::new(1.0, 1.0, 2.0), Vector::NEG_Z);
        assert!(polygon.find_points(&ray).is_empty());
    }

    #[test]
    fn test_polygon_bounding_box() {
        let bbox = square().bounding_box().unwrap();
        assert_eq!(bbox.min(), Point::new(-1.0, 0.0, 0.0));
        assert_eq!(bbox.max(), Point::new(1.0, 1.0, 1.0));
    }
}
