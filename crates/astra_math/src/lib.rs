// Re-export glam for convenience
pub use glam::*;

// Astra math types
mod aabb;
mod ray;

pub use aabb::Aabb;
pub use ray::Ray;
