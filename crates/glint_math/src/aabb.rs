use crate::{Interval, MathError, Point, Ray, Result, EPSILON};

/// Axis-Aligned Bounding Box for spatial acceleration structures (BVH).
///
/// An AABB is defined by three intervals (one per axis) that bound a 3D volume.
/// Every axis satisfies `min <= max`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    x: Interval,
    y: Interval,
    z: Interval,
}

impl Aabb {
    /// Create an AABB from its minimum and maximum corners.
    ///
    /// Fails if `min` exceeds `max` on any axis.
    pub fn new(min: Point, max: Point) -> Result<Self> {
        for axis in 0..3 {
            if min[axis] > max[axis] || min[axis].is_nan() || max[axis].is_nan() {
                return Err(MathError::InvalidBox {
                    axis,
                    min: min[axis],
                    max: max[axis],
                });
            }
        }
        Ok(Self {
            x: Interval::new(min.x, max.x),
            y: Interval::new(min.y, max.y),
            z: Interval::new(min.z, max.z),
        })
    }

    /// Create an AABB from two arbitrary corner points.
    pub fn from_points(a: Point, b: Point) -> Self {
        Self {
            x: Interval::new(a.x.min(b.x), a.x.max(b.x)),
            y: Interval::new(a.y.min(b.y), a.y.max(b.y)),
            z: Interval::new(a.z.min(b.z), a.z.max(b.z)),
        }
    }

    /// Create the tightest AABB around a set of points.
    ///
    /// Returns `None` for an empty set.
    pub fn enclosing(points: &[Point]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let min = rest.iter().fold(*first, |acc, p| acc.min(*p));
        let max = rest.iter().fold(*first, |acc, p| acc.max(*p));
        Some(Self::from_points(min, max))
    }

    /// Create an AABB that surrounds two other AABBs.
    pub fn surrounding(box0: &Aabb, box1: &Aabb) -> Self {
        Self {
            x: Interval::surrounding(&box0.x, &box1.x),
            y: Interval::surrounding(&box0.y, &box1.y),
            z: Interval::surrounding(&box0.z, &box1.z),
        }
    }

    /// Minimum corner.
    pub fn min(&self) -> Point {
        Point::new(self.x.min, self.y.min, self.z.min)
    }

    /// Maximum corner.
    pub fn max(&self) -> Point {
        Point::new(self.x.max, self.y.max, self.z.max)
    }

    /// Get the interval for a specific axis (0=X, 1=Y, 2=Z).
    pub fn axis_interval(&self, n: usize) -> Interval {
        match n {
            0 => self.x,
            1 => self.y,
            _ => self.z,
        }
    }

    /// Test if a ray enters this AABB at a distance in `[0, max_distance]`.
    ///
    /// Slab method: intersect the per-axis entry/exit intervals. A ray parallel
    /// to a slab only passes if its origin lies between the slab planes. The
    /// far bound gets the same [`EPSILON`] slack shapes use for their hits.
    pub fn hit(&self, ray: &Ray, max_distance: f64) -> bool {
        let origin = ray.origin();
        let dir = ray.direction();
        let mut ray_t = Interval::new(0.0, max_distance + EPSILON);

        for axis in 0..3 {
            let slab = self.axis_interval(axis);
            if dir[axis] == 0.0 {
                if !slab.contains(origin[axis]) {
                    return false;
                }
                continue;
            }

            let inv = 1.0 / dir[axis];
            let mut t0 = (slab.min - origin[axis]) * inv;
            let mut t1 = (slab.max - origin[axis]) * inv;
            if inv < 0.0 {
                std::mem::swap(&mut t0, &mut t1);
            }

            ray_t = ray_t.intersect(&Interval::new(t0, t1));
            if ray_t.is_empty() {
                return false;
            }
        }

        true
    }

    /// Returns the index (0=X, 1=Y, 2=Z) of the axis with the longest extent.
    ///
    /// Ties go to the lower axis index.
    pub fn longest_axis(&self) -> usize {
        let x_size = self.x.size();
        let y_size = self.y.size();
        let z_size = self.z.size();

        if x_size >= y_size && x_size >= z_size {
            0
        } else if y_size >= z_size {
            1
        } else {
            2
        }
    }

    /// Returns the center point of the bounding box.
    pub fn centroid(&self) -> Point {
        Point::new(self.x.center(), self.y.center(), self.z.center())
    }
}
