use crate::{Ray, Vec3};

/// Ray direction components smaller than this are treated as parallel
/// to the slab axis.
const DEAD_AXIS_EPS: f32 = 1e-6;

/// Axis-Aligned Bounding Box for spatial acceleration structures (BVH).
///
/// Stored as min/max corners. Boxes are either derived from a single
/// sphere or from the union of two child boxes, so `min[i] <= max[i]`
/// holds on every axis for any non-empty box.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// An empty AABB (contains nothing). Identity element for `union`.
    pub const EMPTY: Aabb = Aabb {
        min: Vec3::splat(f32::INFINITY),
        max: Vec3::splat(f32::NEG_INFINITY),
    };

    /// Create an AABB from two corner points.
    pub fn from_points(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// The box exactly enclosing a sphere: center +/- radius on each axis.
    pub fn around_sphere(center: Vec3, radius: f32) -> Self {
        let rvec = Vec3::splat(radius);
        Self {
            min: center - rvec,
            max: center + rvec,
        }
    }

    /// Create an AABB that surrounds two other AABBs.
    ///
    /// Component-wise min of mins and max of maxes; associative and
    /// commutative, so parent boxes can be folded bottom-up in any order.
    pub fn union(&self, other: &Aabb) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Test a ray against this box with the slab method.
    ///
    /// Returns the parametric distance at which the ray enters the box
    /// (clamped to 0 when the origin is already inside), or `None` when
    /// the ray misses or the box lies entirely behind the origin.
    ///
    /// An axis whose direction component is below `DEAD_AXIS_EPS` is a
    /// dead axis: the ray can never cross its slab planes, so it misses
    /// unless the origin already sits inside that slab.
    pub fn entry_distance(&self, ray: &Ray) -> Option<f32> {
        let mut t_near = f32::NEG_INFINITY;
        let mut t_far = f32::INFINITY;

        for axis in 0..3 {
            let origin = ray.origin[axis];
            let dir = ray.direction[axis];
            if dir.abs() < DEAD_AXIS_EPS {
                if origin < self.min[axis] || origin > self.max[axis] {
                    return None;
                }
            } else {
                let mut t0 = (self.min[axis] - origin) / dir;
                let mut t1 = (self.max[axis] - origin) / dir;
                if t0 > t1 {
                    std::mem::swap(&mut t0, &mut t1);
                }
                t_near = t_near.max(t0);
                t_far = t_far.min(t1);
                if t_near > t_far {
                    return None;
                }
            }
        }

        if t_far < 0.0 {
            return None;
        }
        Some(t_near.max(0.0))
    }

    /// Returns the index (0=X, 1=Y, 2=Z) of the axis with the largest
    /// extent. X wins ties against Y, and the X/Y winner wins ties
    /// against Z.
    pub fn longest_axis(&self) -> usize {
        let extent = self.max - self.min;
        let mut axis = 0;
        if extent.y > extent.x {
            axis = 1;
        }
        if extent.z > extent[axis] {
            axis = 2;
        }
        axis
    }

    /// Returns the center point of the bounding box.
    pub fn centroid(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Grow the box to contain a single point.
    pub fn grow_to_include(&mut self, point: Vec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_points() {
        let aabb = Aabb::from_points(Vec3::new(10.0, 0.0, 3.0), Vec3::new(0.0, 10.0, -3.0));

        assert_eq!(aabb.min, Vec3::new(0.0, 0.0, -3.0));
        assert_eq!(aabb.max, Vec3::new(10.0, 10.0, 3.0));
    }

    #[test]
    fn test_around_sphere() {
        let aabb = Aabb::around_sphere(Vec3::new(1.0, 2.0, 3.0), 0.5);

        assert_eq!(aabb.min, Vec3::new(0.5, 1.5, 2.5));
        assert_eq!(aabb.max, Vec3::new(1.5, 2.5, 3.5));
    }

    #[test]
    fn test_union_contains_both() {
        let a = Aabb::from_points(Vec3::ZERO, Vec3::new(5.0, 5.0, 5.0));
        let b = Aabb::from_points(Vec3::new(3.0, -1.0, 3.0), Vec3::new(10.0, 4.0, 10.0));
        let u = a.union(&b);

        for aabb in [&a, &b] {
            for axis in 0..3 {
                assert!(u.min[axis] <= aabb.min[axis]);
                assert!(u.max[axis] >= aabb.max[axis]);
            }
        }
    }

    #[test]
    fn test_union_with_empty_is_identity() {
        let a = Aabb::from_points(Vec3::new(-1.0, -2.0, -3.0), Vec3::new(1.0, 2.0, 3.0));

        assert_eq!(Aabb::EMPTY.union(&a), a);
        assert_eq!(a.union(&Aabb::EMPTY), a);
    }

    #[test]
    fn test_entry_distance_hit() {
        let aabb = Aabb::from_points(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0));

        // Ray pointing at the box enters at z = -1, four units away
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, 1.0));
        let t = aabb.entry_distance(&ray);
        assert!((t.unwrap() - 4.0).abs() < 1e-5);

        // Ray pointing away
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(aabb.entry_distance(&ray), None);

        // Ray missing the box
        let ray = Ray::new(Vec3::new(10.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(aabb.entry_distance(&ray), None);
    }

    #[test]
    fn test_entry_distance_origin_inside() {
        let aabb = Aabb::from_points(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0));
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 1.0));

        assert_eq!(aabb.entry_distance(&ray), Some(0.0));
    }

    #[test]
    fn test_entry_distance_dead_axis() {
        let aabb = Aabb::from_points(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0));

        // Direction has no y component; origin inside the y slab -> hit
        let ray = Ray::new(Vec3::new(0.0, 0.5, -5.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(aabb.entry_distance(&ray).is_some());

        // Origin outside the y slab -> the ray can never enter it
        let ray = Ray::new(Vec3::new(0.0, 2.0, -5.0), Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(aabb.entry_distance(&ray), None);
    }

    #[test]
    fn test_longest_axis() {
        let aabb_x = Aabb::from_points(Vec3::ZERO, Vec3::new(10.0, 1.0, 1.0));
        assert_eq!(aabb_x.longest_axis(), 0);

        let aabb_y = Aabb::from_points(Vec3::ZERO, Vec3::new(1.0, 10.0, 1.0));
        assert_eq!(aabb_y.longest_axis(), 1);

        let aabb_z = Aabb::from_points(Vec3::ZERO, Vec3::new(1.0, 1.0, 10.0));
        assert_eq!(aabb_z.longest_axis(), 2);

        // Ties prefer x
        let aabb_tie = Aabb::from_points(Vec3::ZERO, Vec3::splat(1.0));
        assert_eq!(aabb_tie.longest_axis(), 0);
    }

    #[test]
    fn test_centroid() {
        let aabb = Aabb::from_points(Vec3::ZERO, Vec3::new(10.0, 10.0, 10.0));
        assert_eq!(aabb.centroid(), Vec3::new(5.0, 5.0, 5.0));
    }
}
