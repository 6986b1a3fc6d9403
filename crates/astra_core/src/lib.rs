//! Astra Core - scene snapshot types for the offline galaxy renderer.
//!
//! This crate defines the frozen scene representation the live galaxy
//! layer hands to the offline ray tracer:
//!
//! - **Geometry**: `Sphere` (one per star, nebula core, or haze particle)
//! - **Colors**: `Rgb8` with the reserved nebula-magenta sentinel
//! - **Lights**: `PointLight`, `HemisphereLight`, and the flattened
//!   `Lighting` rig the shader consumes
//!
//! A snapshot is taken once when a render is triggered and is immutable
//! for the lifetime of that render.

pub mod color;
pub mod scene;

// Re-export commonly used types
pub use color::{Rgb8, NEBULA_MAGENTA};
pub use scene::{
    HemisphereLight, Lighting, PointLight, SceneError, SceneResult, SceneSnapshot, Sphere,
};
