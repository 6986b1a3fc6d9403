//! Astra Renderer - offline BVH ray tracing for galaxy stills.
//!
//! Converts a frozen [`SceneSnapshot`] of the live galaxy (thousands of
//! sphere-shaped stars, nebulae, and haze bodies plus its light rig)
//! into a still raster image. Rendering runs as a cooperative,
//! progress-reporting, cancellable row-by-row computation, deliberately
//! separate from any real-time draw loop.
//!
//! Not a physical simulation: the shading model is stylized for visual
//! glow, matching what the live viewer produces.

mod bvh;
mod camera;
mod frame;
mod raster;
mod shading;
mod sphere;

pub use bvh::{Bvh, BvhNode, Hit};
pub use camera::{CameraBasis, PinholeCamera};
pub use frame::{
    render_image, CancelFlag, RenderError, RenderRequest, RenderResult, RenderTask, RowProgress,
};
pub use raster::Raster;
pub use shading::{shade, trace, BACKGROUND};
pub use sphere::intersect_sphere;

/// Re-export the snapshot model and math types used at the API surface
pub use astra_core::{
    HemisphereLight, Lighting, PointLight, Rgb8, SceneError, SceneSnapshot, Sphere, NEBULA_MAGENTA,
};
pub use astra_math::{Aabb, Ray, Vec3};
