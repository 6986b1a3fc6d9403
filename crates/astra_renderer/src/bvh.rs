//! Bounding Volume Hierarchy (BVH) acceleration structure.
//!
//! Median-split binary tree over the snapshot's spheres, stored as a
//! flat arena of nodes addressed by index. Traversal descends into the
//! nearer child first and prunes the farther subtree whenever the best
//! hit so far already beats its box entry distance, which keeps the
//! common case at O(log n) visited nodes.

use astra_core::{SceneError, SceneResult, Sphere};
use astra_math::{Aabb, Ray};

use crate::sphere::intersect_sphere;

/// Result of a nearest-hit query. `t` is `f32::INFINITY` on a miss.
#[derive(Debug, Copy, Clone)]
pub struct Hit {
    /// Index of the hit sphere in the snapshot's sphere list
    pub sphere: Option<usize>,
    /// Ray parameter at the hit
    pub t: f32,
}

impl Hit {
    const MISS: Hit = Hit {
        sphere: None,
        t: f32::INFINITY,
    };

    /// True when the query found a sphere.
    pub fn is_hit(&self) -> bool {
        self.sphere.is_some()
    }
}

/// A node in the arena: a leaf wrapping one sphere, or a branch whose
/// box is exactly the union of its children's boxes.
#[derive(Debug, Copy, Clone)]
pub enum BvhNode {
    Leaf {
        sphere: usize,
        bounds: Aabb,
    },
    Branch {
        left: usize,
        right: usize,
        bounds: Aabb,
    },
}

impl BvhNode {
    fn bounds(&self) -> Aabb {
        match self {
            BvhNode::Leaf { bounds, .. } => *bounds,
            BvhNode::Branch { bounds, .. } => *bounds,
        }
    }
}

/// The spatial index built once per render request.
///
/// Nodes reference spheres by index into the sphere list the tree was
/// built from; the same list must be passed back to [`Bvh::intersect`].
#[derive(Debug)]
pub struct Bvh {
    nodes: Vec<BvhNode>,
    root: usize,
}

impl Bvh {
    /// Build the tree over a sphere list.
    ///
    /// The list is not reordered; the builder sorts a scratch index
    /// list instead. An empty list is rejected up front.
    pub fn build(spheres: &[Sphere]) -> SceneResult<Self> {
        if spheres.is_empty() {
            return Err(SceneError::EmptyScene);
        }

        let mut nodes = Vec::with_capacity(2 * spheres.len() - 1);
        let mut order: Vec<usize> = (0..spheres.len()).collect();
        let root = build_node(&mut nodes, spheres, &mut order);

        log::debug!("built BVH: {} spheres, {} nodes", spheres.len(), nodes.len());
        Ok(Self { nodes, root })
    }

    /// The box bounding the whole scene.
    pub fn bounds(&self) -> Aabb {
        self.nodes[self.root].bounds()
    }

    /// Find the nearest sphere hit by a ray, if any.
    pub fn intersect(&self, spheres: &[Sphere], ray: &Ray) -> Hit {
        self.hit_node(self.root, spheres, ray)
    }

    fn hit_node(&self, index: usize, spheres: &[Sphere], ray: &Ray) -> Hit {
        let node = &self.nodes[index];

        // Cheap reject before touching anything below this node
        if node.bounds().entry_distance(ray).is_none() {
            return Hit::MISS;
        }

        match *node {
            BvhNode::Leaf { sphere, .. } => {
                let t = intersect_sphere(ray, &spheres[sphere]);
                if t.is_finite() {
                    Hit {
                        sphere: Some(sphere),
                        t,
                    }
                } else {
                    Hit::MISS
                }
            }

            BvhNode::Branch { left, right, .. } => {
                let entry = |child: usize| {
                    self.nodes[child]
                        .bounds()
                        .entry_distance(ray)
                        .unwrap_or(f32::INFINITY)
                };

                // Visit the nearer box first
                let mut near = left;
                let mut far = right;
                let mut t_near = entry(near);
                let mut t_far = entry(far);
                if t_far < t_near {
                    std::mem::swap(&mut near, &mut far);
                    std::mem::swap(&mut t_near, &mut t_far);
                }

                let first = self.hit_node(near, spheres, ray);

                // Nothing in the farther subtree can beat a hit that is
                // closer than the farther box's entry point
                if first.t < t_far {
                    return first;
                }

                let second = self.hit_node(far, spheres, ray);
                if first.t < second.t {
                    first
                } else {
                    second
                }
            }
        }
    }
}

/// Recursive builder over a scratch range of sphere indices. Returns
/// the arena index of the subtree root.
fn build_node(nodes: &mut Vec<BvhNode>, spheres: &[Sphere], order: &mut [usize]) -> usize {
    if order.len() == 1 {
        let sphere = order[0];
        nodes.push(BvhNode::Leaf {
            sphere,
            bounds: spheres[sphere].bounds(),
        });
        return nodes.len() - 1;
    }

    // Split axis comes from the spread of sphere centers, not radii
    let mut centroid_bounds = Aabb::EMPTY;
    for &i in order.iter() {
        centroid_bounds.grow_to_include(spheres[i].center);
    }
    let axis = centroid_bounds.longest_axis();

    order.sort_unstable_by(|&a, &b| {
        spheres[a].center[axis]
            .partial_cmp(&spheres[b].center[axis])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mid = order.len() / 2;
    let (left_half, right_half) = order.split_at_mut(mid);
    let left = build_node(nodes, spheres, left_half);
    let right = build_node(nodes, spheres, right_half);

    let bounds = nodes[left].bounds().union(&nodes[right].bounds());
    nodes.push(BvhNode::Branch {
        left,
        right,
        bounds,
    });
    nodes.len() - 1
}
