//! Frozen scene snapshot handed from the live galaxy layer to the
//! offline renderer.
//!
//! The live scene keeps stars, nebulae, and haze as sprites with their
//! own update loops; when a still render is triggered, each body is
//! reduced to a colored sphere and the light rig is captured alongside.
//! Everything here is immutable for the duration of one render.

use astra_math::{Aabb, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::Rgb8;

/// Distance of the synthetic pole lights a hemisphere light turns into,
/// far above and below the galactic plane.
const HEMISPHERE_POLE_DISTANCE: f32 = 10_000.0;

/// Errors in a scene snapshot that make a render impossible.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("scene snapshot contains no spheres")]
    EmptyScene,
}

pub type SceneResult<T> = Result<T, SceneError>;

/// A spherical body: one star, nebula core, or haze particle.
///
/// `radius > 0` is guaranteed by the producing layer; the renderer does
/// not re-validate per-body geometry, so non-finite coordinates show up
/// as image artifacts rather than errors.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sphere {
    /// Center position in world space
    pub center: Vec3,

    /// Radius in world units
    pub radius: f32,

    /// Base color used by the shader
    pub color: Rgb8,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Vec3, radius: f32, color: Rgb8) -> Self {
        Self {
            center,
            radius,
            color,
        }
    }

    /// The box exactly enclosing this sphere.
    pub fn bounds(&self) -> Aabb {
        Aabb::around_sphere(self.center, self.radius)
    }
}

/// A point light captured from the live scene graph.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointLight {
    /// Position in world space
    pub position: Vec3,

    /// Intensity scalar, >= 0
    pub intensity: f32,
}

impl PointLight {
    /// Create a new point light.
    pub fn new(position: Vec3, intensity: f32) -> Self {
        Self {
            position,
            intensity,
        }
    }
}

/// The ambient sky/ground light of the live scene. At most one exists.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct HemisphereLight {
    /// Intensity scalar, >= 0
    pub intensity: f32,
}

/// The light rig captured with a snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Lighting {
    /// Point lights, captured as-is
    pub points: Vec<PointLight>,

    /// Optional ambient hemisphere light
    pub hemisphere: Option<HemisphereLight>,
}

impl Lighting {
    /// Flatten the rig into the point-light list the shader consumes.
    ///
    /// Point lights pass through unchanged. A hemisphere light becomes
    /// two synthetic point lights far above and below the galactic
    /// plane, each carrying half its intensity.
    pub fn flatten(&self) -> Vec<PointLight> {
        let mut lights = self.points.clone();
        if let Some(hemisphere) = self.hemisphere {
            let half = hemisphere.intensity / 2.0;
            lights.push(PointLight::new(
                Vec3::new(0.0, 0.0, HEMISPHERE_POLE_DISTANCE),
                half,
            ));
            lights.push(PointLight::new(
                Vec3::new(0.0, 0.0, -HEMISPHERE_POLE_DISTANCE),
                half,
            ));
        }
        log::debug!(
            "flattened light rig: {} point + {} synthetic",
            self.points.len(),
            lights.len() - self.points.len()
        );
        lights
    }
}

/// A complete frozen scene: every renderable body plus the light rig.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneSnapshot {
    /// All spherical bodies visible to the offline renderer
    pub spheres: Vec<Sphere>,

    /// The captured light rig
    pub lighting: Lighting,
}

impl SceneSnapshot {
    /// Create a snapshot from bodies and lights.
    pub fn new(spheres: Vec<Sphere>, lighting: Lighting) -> Self {
        Self { spheres, lighting }
    }

    /// Check the preconditions a render depends on.
    ///
    /// An empty sphere list is rejected here rather than left as
    /// undefined behavior inside the BVH builder.
    pub fn validate(&self) -> SceneResult<()> {
        if self.spheres.is_empty() {
            return Err(SceneError::EmptyScene);
        }
        Ok(())
    }
}
