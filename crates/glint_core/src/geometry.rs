//! Intersectable and Geometry traits plus the GeoPoint hit record.

use crate::{Color, Material};
use glint_math::{align_zero, Aabb, DVec3, Point, Ray};
use std::fmt;

/// Anything a ray can be intersected with: single shapes and composites.
pub trait Intersectable: Send + Sync {
    /// All intersections with `ray` at a distance in `(0, max_distance]`.
    ///
    /// The order of the returned points is unspecified.
    fn find_intersections(&self, ray: &Ray, max_distance: f64) -> Vec<GeoPoint<'_>>;

    /// Bounding box for BVH construction.
    ///
    /// `None` marks an unbounded shape, which can never be pruned.
    fn bounding_box(&self) -> Option<Aabb>;

    /// All intersections along the whole ray.
    fn find_geo_intersections(&self, ray: &Ray) -> Vec<GeoPoint<'_>> {
        self.find_intersections(ray, f64::INFINITY)
    }

    /// Intersection points without the shapes they belong to.
    fn find_points(&self, ray: &Ray) -> Vec<Point> {
        self.find_geo_intersections(ray)
            .into_iter()
            .map(|gp| gp.point)
            .collect()
    }
}

/// Appearance shared by every shape.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Surface {
    /// Light emitted by the surface itself
    pub emission: Color,
    pub material: Material,
}

/// A single shape with a surface that can be shaded.
pub trait Geometry: Intersectable {
    /// Unit outward normal at a point on the surface.
    fn normal(&self, p: Point) -> DVec3;

    fn surface(&self) -> &Surface;

    fn surface_mut(&mut self) -> &mut Surface;

    fn emission(&self) -> Color {
        self.surface().emission
    }

    fn material(&self) -> &Material {
        &self.surface().material
    }

    fn with_emission(mut self, emission: Color) -> Self
    where
        Self: Sized,
    {
        self.surface_mut().emission = emission;
        self
    }

    fn with_material(mut self, material: Material) -> Self
    where
        Self: Sized,
    {
        self.surface_mut().material = material;
        self
    }
}

/// A shape paired with a point where a ray hit it.
#[derive(Clone, Copy)]
pub struct GeoPoint<'a> {
    pub geometry: &'a dyn Geometry,
    pub point: Point,
}

impl<'a> GeoPoint<'a> {
    pub fn new(geometry: &'a dyn Geometry, point: Point) -> Self {
        Self { geometry, point }
    }

    /// Surface normal of the hit shape at the hit point.
    pub fn normal(&self) -> DVec3 {
        self.geometry.normal(self.point)
    }
}

impl PartialEq for GeoPoint<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(self.geometry, other.geometry) && self.point == other.point
    }
}

impl fmt::Debug for GeoPoint<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeoPoint")
            .field("geometry", &(self.geometry as *const dyn Geometry as *const ()))
            .field("point", &self.point)
            .finish()
    }
}

/// True if a ray parameter lies in `(0, max_distance]` after snapping near-zero values.
#[inline]
pub(crate) fn within(t: f64, max_distance: f64) -> bool {
    align_zero(t) > 0.0 && align_zero(t - max_distance) <= 0.0
}
