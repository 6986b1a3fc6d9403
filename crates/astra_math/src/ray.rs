use crate::Vec3;

/// A ray in 3D space with origin and direction.
///
/// Rays are used for raytracing - they represent a line starting at `origin`
/// and traveling in `direction`. Primary rays carry a unit-length direction;
/// a degenerate (near-zero) direction is a caller precondition violation.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}
