//! Stylized per-pixel lighting.
//!
//! Ambient + diffuse + Phong specular over the flattened light list,
//! tuned for visual glow rather than physical accuracy. Bodies painted
//! the reserved nebula-magenta sentinel get a flat intensity boost so
//! core nebulae stand out in stills the way they do in the live viewer.

use astra_core::{PointLight, Rgb8, Sphere};
use astra_math::{Ray, Vec3};

use crate::bvh::Bvh;

const AMBIENT_STRENGTH: f32 = 0.6;
const DIFFUSE_STRENGTH: f32 = 0.9;
const SPECULAR_STRENGTH: f32 = 0.9;
const SHININESS: i32 = 32;
const NEBULA_BOOST: f32 = 1.5;

/// Final brightness multiplier applied before clamping.
const BRIGHTNESS: f32 = 1.5;

/// Guard for a future recursive bounce chain; no recursion happens
/// inside the traversal today.
const MAX_TRACE_DEPTH: u32 = 2;

/// Color of rays that hit nothing: a dark blue-gray sky.
pub const BACKGROUND: Rgb8 = Rgb8::new(25, 25, 35);

/// Compute the color of a surface point.
///
/// `view_origin` is the camera position, passed explicitly - the
/// specular term must not reach into any shared camera state.
pub fn shade(
    hit_point: Vec3,
    normal: Vec3,
    base_color: Rgb8,
    lights: &[PointLight],
    view_origin: Vec3,
) -> Rgb8 {
    let boost = if base_color.is_nebula_magenta() {
        NEBULA_BOOST
    } else {
        1.0
    };
    let base = Vec3::new(
        base_color.r as f32,
        base_color.g as f32,
        base_color.b as f32,
    );

    let mut color = base * AMBIENT_STRENGTH * boost;

    for light in lights {
        let light_dir = (light.position - hit_point).normalize_or_zero();

        let diffuse = normal.dot(light_dir).max(0.0) * light.intensity;
        color += base * diffuse * DIFFUSE_STRENGTH * boost;

        let view_dir = (view_origin - hit_point).normalize_or_zero();
        let reflect_dir = 2.0 * normal.dot(light_dir) * normal - light_dir;
        let specular = view_dir.dot(reflect_dir).max(0.0).powi(SHININESS)
            * SPECULAR_STRENGTH
            * light.intensity;
        color += Vec3::splat(specular * 255.0 * boost);
    }

    let total = color * BRIGHTNESS;
    Rgb8::new(
        total.x.min(255.0) as u8,
        total.y.min(255.0) as u8,
        total.z.min(255.0) as u8,
    )
}

/// Trace one ray into the scene and shade what it hits.
///
/// `depth` only guards a future recursive call chain; callers start at
/// zero. Misses return [`BACKGROUND`].
pub fn trace(
    ray: &Ray,
    bvh: &Bvh,
    spheres: &[Sphere],
    lights: &[PointLight],
    view_origin: Vec3,
    depth: u32,
) -> Rgb8 {
    if depth > MAX_TRACE_DEPTH {
        return Rgb8::new(0, 0, 0);
    }

    let hit = bvh.intersect(spheres, ray);
    let Some(index) = hit.sphere else {
        return BACKGROUND;
    };

    let sphere = &spheres[index];
    let hit_point = ray.at(hit.t);
    let normal = (hit_point - sphere.center).normalize_or_zero();
    shade(hit_point, normal, sphere.color, lights, view_origin)
}
