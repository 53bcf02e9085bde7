//! Bounding Volume Hierarchy (BVH) over a list of shapes.
//!
//! Nodes live in a flat arena and refer to each other by index. Leaves store
//! indices into the shape list owned by [`Geometries`](crate::Geometries),
//! so the tree never owns or copies shapes.

use glint_math::{Aabb, Ray};

/// Maximum shapes per leaf node before splitting.
pub const LEAF_MAX_SIZE: usize = 4;

/// BVH node - either a branch with two children or a leaf with shape indices.
#[derive(Debug, Clone, PartialEq)]
pub enum BvhNode {
    /// Internal node; children are arena indices.
    Branch { bbox: Aabb, left: usize, right: usize },
    /// Leaf node with at most [`LEAF_MAX_SIZE`] shape indices.
    Leaf { bbox: Aabb, items: Vec<usize> },
}

impl BvhNode {
    pub fn bbox(&self) -> &Aabb {
        match self {
            BvhNode::Branch { bbox, .. } | BvhNode::Leaf { bbox, .. } => bbox,
        }
    }
}

/// Immutable BVH built once from the shapes' bounding boxes.
#[derive(Debug, Clone, Default)]
pub struct Bvh {
    nodes: Vec<BvhNode>,
    root: Option<usize>,
    /// Shapes without a bounding box; tested for every ray.
    unbounded: Vec<usize>,
}

impl Bvh {
    /// Build a BVH from per-shape bounding boxes, indexed like the shape list.
    ///
    /// Median split: sort the shapes by box center along the longest axis of
    /// their combined bounds, split in half, recurse.
    pub fn build(boxes: &[Option<Aabb>]) -> Self {
        let mut bvh = Bvh::default();
        let mut bounded = Vec::with_capacity(boxes.len());

        for (i, bbox) in boxes.iter().enumerate() {
            match bbox {
                Some(b) => bounded.push((i, *b)),
                None => bvh.unbounded.push(i),
            }
        }

        if !bounded.is_empty() {
            bvh.root = Some(bvh.build_node(bounded));
        }

        log::info!(
            "BVH built: {} nodes, {} leaves, {} unbounded shapes",
            bvh.nodes.len(),
            bvh.leaf_count(),
            bvh.unbounded.len()
        );

        bvh
    }

    /// Recursive construction; returns the arena index of the new node.
    fn build_node(&mut self, mut items: Vec<(usize, Aabb)>) -> usize {
        let bbox = items
            .iter()
            .skip(1)
            .fold(items[0].1, |acc, (_, b)| Aabb::surrounding(&acc, b));

        if items.len() <= LEAF_MAX_SIZE {
            self.nodes.push(BvhNode::Leaf {
                bbox,
                items: items.into_iter().map(|(i, _)| i).collect(),
            });
            return self.nodes.len() - 1;
        }

        let axis = bbox.longest_axis();
        items.sort_by(|(_, a), (_, b)| a.centroid()[axis].total_cmp(&b.centroid()[axis]));

        let right_items = items.split_off(items.len() / 2);
        let left = self.build_node(items);
        let right = self.build_node(right_items);

        self.nodes.push(BvhNode::Branch { bbox, left, right });
        self.nodes.len() - 1
    }

    pub fn nodes(&self) -> &[BvhNode] {
        &self.nodes
    }

    pub fn root(&self) -> Option<&BvhNode> {
        self.root.map(|i| &self.nodes[i])
    }

    pub fn unbounded(&self) -> &[usize] {
        &self.unbounded
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| matches!(n, BvhNode::Leaf { .. }))
            .count()
    }

    /// Call `f` with the index of every shape the ray may hit within `max_distance`.
    ///
    /// Unbounded shapes are always visited. A subtree is skipped when the ray
    /// misses its box.
    pub fn visit<F: FnMut(usize)>(&self, ray: &Ray, max_distance: f64, mut f: F) {
        self.unbounded.iter().copied().for_each(&mut f);

        let mut stack: Vec<usize> = self.root.into_iter().collect();
        while let Some(index) = stack.pop() {
            let node = &self.nodes[index];
            if !node.bbox().hit(ray, max_distance) {
                continue;
            }
            match node {
                BvhNode::Leaf { items, .. } => items.iter().copied().for_each(&mut f),
                BvhNode::Branch { left, right, .. } => {
                    stack.push(*right);
                    stack.push(*left);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_math::{Point, Vector};

    fn unit_box(center: Point) -> Option<Aabb> {
        Some(Aabb::from_points(center - 0.5, center + 0.5))
    }

    fn visited(bvh: &Bvh, ray: &Ray) -> Vec<usize> {
        let mut out = Vec::new();
        bvh.visit(ray, f64::INFINITY, |i| out.push(i));
        out.sort_unstable();
        out
    }

    #[test]
    fn test_small_set_is_single_leaf() {
        let boxes: Vec<_> = (0..LEAF_MAX_SIZE)
            .map(|i| unit_box(Point::new(i as f64 * 2.0, 0.0, 0.0)))
            .collect();
        let bvh = Bvh::build(&boxes);

        assert_eq!(bvh.nodes().len(), 1);
        match bvh.root() {
            Some(BvhNode::Leaf { items, .. }) => assert_eq!(items, &vec![0, 1, 2, 3]),
            other => panic!("expected leaf, got {:?}", other),
        }
    }

    #[test]
    fn test_split_along_longest_axis() {
        // Spread along y; the first split must separate low y from high y
        let boxes: Vec<_> = (0..8)
            .map(|i| unit_box(Point::new(0.0, (7 - i) as f64 * 3.0, 0.0)))
            .collect();
        let bvh = Bvh::build(&boxes);

        assert_eq!(bvh.leaf_count(), 2);
        let Some(BvhNode::Branch { left, right, .. }) = bvh.root() else {
            panic!("expected branch at root");
        };
        let BvhNode::Leaf { items: low, .. } = &bvh.nodes()[*left] else {
            panic!("expected leaf");
        };
        let BvhNode::Leaf { items: high, .. } = &bvh.nodes()[*right] else {
            panic!("expected leaf");
        };

        let mut low = low.clone();
        let mut high = high.clone();
        low.sort_unstable();
        high.sort_unstable();
        assert_eq!(low, vec![4, 5, 6, 7]);
        assert_eq!(high, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_leaves_respect_max_size() {
        let _ = env_logger::builder().is_test(true).try_init();

        let boxes: Vec<_> = (0..37)
            .map(|i| unit_box(Point::new((i % 5) as f64, (i / 5) as f64 * 2.0, i as f64)))
            .collect();
        let bvh = Bvh::build(&boxes);

        let mut all = Vec::new();
        for node in bvh.nodes() {
            if let BvhNode::Leaf { items, .. } = node {
                assert!(!items.is_empty() && items.len() <= LEAF_MAX_SIZE);
                all.extend(items.iter().copied());
            }
        }
        all.sort_unstable();
        assert_eq!(all, (0..37).collect::<Vec<_>>());
    }

    #[test]
    fn test_visit_prunes_missed_boxes() {
        let boxes: Vec<_> = (0..10)
            .map(|i| unit_box(Point::new(i as f64 * 10.0, 0.0, 0.0)))
            .collect();
        let bvh = Bvh::build(&boxes);

        // A ray down the z axis through the first box only
        let ray = Ray::new(Point::new(0.0, 0.0, -5.0), Vector::Z);
        let hits = visited(&bvh, &ray);
        assert!(hits.contains(&0));
        assert!(hits.len() < 10);

        // A ray that misses everything
        let ray = Ray::new(Point::new(0.0, 50.0, -5.0), Vector::Z);
        assert!(visited(&bvh, &ray).is_empty());
    }

    #[test]
    fn test_unbounded_always_visited() {
        let boxes = vec![unit_box(Point::ZERO), None, unit_box(Point::splat(10.0)), None];
        let bvh = Bvh::build(&boxes);
        assert_eq!(bvh.unbounded(), &[1, 3]);

        let ray = Ray::new(Point::new(0.0, 100.0, 0.0), Vector::Y);
        assert_eq!(visited(&bvh, &ray), vec![1, 3]);
    }

    #[test]
    fn test_empty_bvh() {
        let bvh = Bvh::build(&[]);
        assert!(bvh.root().is_none());
        assert!(visited(&bvh, &Ray::new(Point::ZERO, Vector::X)).is_empty());
    }
}
