//! Composite of intersectables, optionally accelerated by a BVH.

use crate::bvh::Bvh;
use crate::geometry::{GeoPoint, Intersectable};
use glint_math::{Aabb, Ray};

/// A flat list of shapes (or nested composites) intersected as one.
#[derive(Default)]
pub struct Geometries {
    members: Vec<Box<dyn Intersectable>>,
    bvh: Option<Bvh>,
}

impl Geometries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a member. Any existing BVH is dropped and must be rebuilt.
    pub fn add(&mut self, member: impl Intersectable + 'static) {
        self.push(Box::new(member));
    }

    /// Add an already boxed member. Any existing BVH is dropped.
    pub fn push(&mut self, member: Box<dyn Intersectable>) {
        self.members.push(member);
        self.bvh = None;
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Build the BVH over the current members.
    pub fn build_bvh(&mut self) {
        let boxes: Vec<Option<Aabb>> = self.members.iter().map(|m| m.bounding_box()).collect();
        self.bvh = Some(Bvh::build(&boxes));
    }

    pub fn is_bvh_enabled(&self) -> bool {
        self.bvh.is_some()
    }

    pub fn bvh(&self) -> Option<&Bvh> {
        self.bvh.as_ref()
    }
}

impl Intersectable for Geometries {
    fn find_intersections(&self, ray: &Ray, max_distance: f64) -> Vec<GeoPoint<'_>> {
        let mut hits = Vec::new();
        match &self.bvh {
            Some(bvh) => bvh.visit(ray, max_distance, |i| {
                hits.extend(self.members[i].find_intersections(ray, max_distance));
            }),
            None => {
                for member in &self.members {
                    hits.extend(member.find_intersections(ray, max_distance));
                }
            }
        }
        hits
    }

    /// Union of the members' boxes; `None` if empty or any member is unbounded.
    fn bounding_box(&self) -> Option<Aabb> {
        let (first, rest) = self.members.split_first()?;
        rest.iter().try_fold(first.bounding_box()?, |acc, m| {
            m.bounding_box().map(|b| Aabb::surrounding(&acc, &b))
        })
    }
}
