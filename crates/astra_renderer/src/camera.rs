//! Pinhole camera for primary ray generation.
//!
//! Still renders are always aimed at the scene origin - the galaxy
//! center - regardless of where the live viewport camera happens to
//! point. Output resolution is fixed by the request, independent of the
//! viewport size.

use astra_math::{Ray, Vec3};

/// Camera description for one render request.
#[derive(Debug, Clone, PartialEq)]
pub struct PinholeCamera {
    /// Position in world space
    pub position: Vec3,
    /// World up reference used to build the basis
    pub up: Vec3,
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Output width in pixels
    pub width: u32,
    /// Output height in pixels
    pub height: u32,
}

impl PinholeCamera {
    /// Create a camera with the live viewer's defaults.
    pub fn new() -> Self {
        Self {
            position: Vec3::new(0.0, 100.0, 100.0),
            up: Vec3::Z,
            fov_degrees: 60.0,
            width: 400,
            height: 400,
        }
    }

    /// Set the camera position.
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Set the world up reference.
    pub fn with_up(mut self, up: Vec3) -> Self {
        self.up = up;
        self
    }

    /// Set the vertical field of view in degrees.
    pub fn with_fov(mut self, fov_degrees: f32) -> Self {
        self.fov_degrees = fov_degrees;
        self
    }

    /// Set output resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Compute the cached basis used for every primary ray of a render.
    pub fn basis(&self) -> CameraBasis {
        let forward = (-self.position).normalize_or_zero();
        let right = forward.cross(self.up).normalize_or_zero();
        let local_up = right.cross(forward).normalize_or_zero();
        let fov_scale = (self.fov_degrees * std::f32::consts::PI / 360.0).tan();

        CameraBasis {
            position: self.position,
            forward,
            right,
            local_up,
            fov_scale,
            aspect: self.width as f32 / self.height as f32,
            width: self.width,
            height: self.height,
        }
    }
}

impl Default for PinholeCamera {
    fn default() -> Self {
        Self::new()
    }
}

/// Orthonormal basis plus field-of-view scale, computed once per render.
#[derive(Debug, Clone, Copy)]
pub struct CameraBasis {
    pub position: Vec3,
    forward: Vec3,
    right: Vec3,
    local_up: Vec3,
    fov_scale: f32,
    aspect: f32,
    width: u32,
    height: u32,
}

impl CameraBasis {
    /// The primary ray through pixel `(x, y)`.
    ///
    /// Pixel (0, 0) is the top-left corner; rows run top to bottom.
    pub fn primary_ray(&self, x: u32, y: u32) -> Ray {
        let u = (x as f32 / self.width as f32 - 0.5) * self.aspect;
        let v = 0.5 - y as f32 / self.height as f32;

        let direction = (self.forward
            + self.right * (u * self.fov_scale)
            + self.local_up * (v * self.fov_scale))
            .normalize();
        Ray::new(self.position, direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basis_is_orthonormal() {
        let basis = PinholeCamera::new()
            .with_position(Vec3::new(30.0, 100.0, 70.0))
            .basis();

        assert!((basis.forward.length() - 1.0).abs() < 1e-5);
        assert!((basis.right.length() - 1.0).abs() < 1e-5);
        assert!((basis.local_up.length() - 1.0).abs() < 1e-5);
        assert!(basis.forward.dot(basis.right).abs() < 1e-5);
        assert!(basis.forward.dot(basis.local_up).abs() < 1e-5);
        assert!(basis.right.dot(basis.local_up).abs() < 1e-5);
    }

    #[test]
    fn test_forward_aims_at_scene_origin() {
        let position = Vec3::new(0.0, 100.0, 100.0);
        let basis = PinholeCamera::new().with_position(position).basis();

        let expected = (-position).normalize();
        assert!((basis.forward - expected).length() < 1e-5);
    }

    #[test]
    fn test_center_pixel_ray_points_forward() {
        let basis = PinholeCamera::new()
            .with_position(Vec3::new(0.0, 0.0, 5.0))
            .with_up(Vec3::Y)
            .with_resolution(400, 400)
            .basis();

        // u and v are both exactly zero at (width/2, height/2)
        let ray = basis.primary_ray(200, 200);
        assert_eq!(ray.origin, Vec3::new(0.0, 0.0, 5.0));
        assert!((ray.direction - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-5);
    }

    #[test]
    fn test_fov_scale_matches_half_angle() {
        let basis = PinholeCamera::new().with_fov(60.0).basis();

        // tan(60deg * pi / 360) = tan(30deg)
        assert!((basis.fov_scale - (30.0f32).to_radians().tan()).abs() < 1e-5);
    }

    #[test]
    fn test_rays_fan_out_across_the_image() {
        let basis = PinholeCamera::new()
            .with_position(Vec3::new(0.0, 0.0, 5.0))
            .with_up(Vec3::Y)
            .with_resolution(400, 400)
            .basis();

        let left = basis.primary_ray(0, 200);
        let right = basis.primary_ray(399, 200);
        let top = basis.primary_ray(200, 0);

        // Left half of the image looks toward -x, right toward +x
        assert!(left.direction.x < 0.0);
        assert!(right.direction.x > 0.0);
        // Top of the image looks up
        assert!(top.direction.y > 0.0);
    }
}
