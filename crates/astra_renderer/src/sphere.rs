//! Ray/sphere intersection.

use astra_core::Sphere;
use astra_math::Ray;

/// Test a ray against a sphere.
///
/// Solves the quadratic `a t^2 + b t + c = 0` for the ray `O + tD` and
/// sphere `(C, r)`. Returns the smaller positive root, or
/// `f32::INFINITY` when the ray misses or the sphere lies entirely
/// behind the origin.
pub fn intersect_sphere(ray: &Ray, sphere: &Sphere) -> f32 {
    let oc = ray.origin - sphere.center;
    let a = ray.direction.dot(ray.direction);
    let b = 2.0 * oc.dot(ray.direction);
    let c = oc.dot(oc) - sphere.radius * sphere.radius;

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return f32::INFINITY;
    }

    let sqrt_d = discriminant.sqrt();
    let near = (-b - sqrt_d) / (2.0 * a);
    let far = (-b + sqrt_d) / (2.0 * a);

    if near > 0.0 {
        near
    } else if far > 0.0 {
        far
    } else {
        f32::INFINITY
    }
}
