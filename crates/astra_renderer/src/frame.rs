//! Progressive frame driver.
//!
//! A render is a resumable task: the BVH, light list, and camera basis
//! are fixed up front, then the image is produced one scan-line per
//! [`RenderTask::step_row`] call. The caller's scheduler decides what
//! runs between rows - a UI event loop, another task, or nothing at
//! all via [`render_image`]. Cancellation is an explicit flag checked
//! at the top of every row, so an abandoned render stops at the next
//! row boundary instead of living on as orphaned work.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use astra_core::{PointLight, SceneError, SceneSnapshot, Sphere};
use thiserror::Error;

use crate::bvh::Bvh;
use crate::camera::{CameraBasis, PinholeCamera};
use crate::raster::Raster;
use crate::shading::trace;

/// Errors that can end a render early.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error("render cancelled")]
    Cancelled,
}

pub type RenderResult<T> = Result<T, RenderError>;

/// Everything a render needs, frozen at trigger time.
#[derive(Debug, Clone)]
pub struct RenderRequest {
    pub snapshot: SceneSnapshot,
    pub camera: PinholeCamera,
}

/// Cloneable cancellation handle shared with whoever may want to
/// abandon the render.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    /// Request that the render stop at the next row boundary.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// True once cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Outcome of rendering one scan-line.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RowProgress {
    /// A row was rendered; `percent` is 0-100 and never decreases.
    Rendered { percent: u8 },
    /// All rows are done; the raster is complete.
    Finished,
}

/// One in-flight render, exclusively owning its BVH and raster.
pub struct RenderTask {
    spheres: Vec<Sphere>,
    lights: Vec<PointLight>,
    bvh: Bvh,
    basis: CameraBasis,
    raster: Raster,
    next_row: u32,
    cancel: CancelFlag,
}

impl RenderTask {
    /// Validate the snapshot and do the per-render setup: build the
    /// BVH once, flatten the light rig, cache the camera basis.
    pub fn new(request: RenderRequest) -> RenderResult<Self> {
        request.snapshot.validate()?;
        let RenderRequest { snapshot, camera } = request;

        let bvh = Bvh::build(&snapshot.spheres)?;
        let lights = snapshot.lighting.flatten();
        let basis = camera.basis();

        log::info!(
            "render task: {} spheres, {} lights, {}x{}",
            snapshot.spheres.len(),
            lights.len(),
            camera.width,
            camera.height
        );

        Ok(Self {
            spheres: snapshot.spheres,
            lights,
            bvh,
            basis,
            raster: Raster::new(camera.width, camera.height),
            next_row: 0,
            cancel: CancelFlag::default(),
        })
    }

    /// Handle for cancelling this task from elsewhere.
    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }

    /// Render the next scan-line, left to right.
    ///
    /// Returns the completion percentage after the row, or
    /// [`RowProgress::Finished`] once no rows remain. Calling again
    /// after completion stays `Finished`.
    pub fn step_row(&mut self) -> RenderResult<RowProgress> {
        if self.next_row >= self.raster.height {
            return Ok(RowProgress::Finished);
        }
        if self.cancel.is_cancelled() {
            log::info!("render cancelled at row {}", self.next_row);
            return Err(RenderError::Cancelled);
        }

        let y = self.next_row;
        for x in 0..self.raster.width {
            let ray = self.basis.primary_ray(x, y);
            let color = trace(
                &ray,
                &self.bvh,
                &self.spheres,
                &self.lights,
                self.basis.position,
                0,
            );
            self.raster.set(x, y, color);
        }

        self.next_row += 1;
        let percent = (self.next_row * 100 / self.raster.height) as u8;
        log::debug!("rendered row {}/{}", self.next_row, self.raster.height);
        if self.next_row == self.raster.height {
            log::info!("render complete");
        }
        Ok(RowProgress::Rendered { percent })
    }

    /// Hand off the raster. Complete only if the last `step_row`
    /// returned `Finished`.
    pub fn into_raster(self) -> Raster {
        self.raster
    }
}

/// Drive a request to completion with an explicit stepping loop.
///
/// `on_progress` is invoked once per completed row with the monotone
/// percentage; the final call reports 100. The completed raster is the
/// return value.
pub fn render_image(
    request: RenderRequest,
    mut on_progress: impl FnMut(u8),
) -> RenderResult<Raster> {
    let mut task = RenderTask::new(request)?;
    loop {
        match task.step_row()? {
            RowProgress::Rendered { percent } => on_progress(percent),
            RowProgress::Finished => break,
        }
    }
    Ok(task.into_raster())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shading::BACKGROUND;
    use astra_core::{HemisphereLight, Lighting, PointLight, Rgb8};
    use astra_math::Vec3;

    const WHITE: Rgb8 = Rgb8::new(255, 255, 255);

    fn single_sphere_request() -> RenderRequest {
        // Unit sphere at the origin, one light straight above it,
        // camera five units out on +z looking back at the origin
        RenderRequest {
            snapshot: SceneSnapshot::new(
                vec![Sphere::new(Vec3::ZERO, 1.0, WHITE)],
                Lighting {
                    points: vec![PointLight::new(Vec3::new(0.0, 0.0, 10.0), 1.0)],
                    hemisphere: None,
                },
            ),
            camera: PinholeCamera::new()
                .with_position(Vec3::new(0.0, 0.0, 5.0))
                .with_up(Vec3::Y)
                .with_resolution(9, 9),
        }
    }

    #[test]
    fn test_empty_scene_is_rejected() {
        let request = RenderRequest {
            snapshot: SceneSnapshot::default(),
            camera: PinholeCamera::new(),
        };

        let err = RenderTask::new(request).err().expect("must fail");
        assert!(matches!(err, RenderError::Scene(SceneError::EmptyScene)));
    }

    #[test]
    fn test_center_pixel_brighter_than_background() {
        let raster = render_image(single_sphere_request(), |_| {}).expect("render");

        let [r, g, b, a] = raster.get(4, 4);
        assert_eq!(a, 255);
        assert!(r > BACKGROUND.r);
        assert!(g > BACKGROUND.g);
        assert!(b > BACKGROUND.b);
    }

    #[test]
    fn test_all_misses_yield_exact_background() {
        // The only sphere sits behind the camera, so every primary ray
        // misses
        let request = RenderRequest {
            snapshot: SceneSnapshot::new(
                vec![Sphere::new(Vec3::new(0.0, 0.0, 50.0), 1.0, WHITE)],
                Lighting::default(),
            ),
            camera: PinholeCamera::new()
                .with_position(Vec3::new(0.0, 0.0, 5.0))
                .with_up(Vec3::Y)
                .with_resolution(8, 6),
        };

        let raster = render_image(request, |_| {}).expect("render");
        for y in 0..6 {
            for x in 0..8 {
                assert_eq!(
                    raster.get(x, y),
                    [BACKGROUND.r, BACKGROUND.g, BACKGROUND.b, 255]
                );
            }
        }
    }

    #[test]
    fn test_progress_is_monotone_and_ends_at_100() {
        let mut percents = Vec::new();
        render_image(single_sphere_request(), |p| percents.push(p)).expect("render");

        assert_eq!(percents.len(), 9);
        for pair in percents.windows(2) {
            assert!(pair[0] <= pair[1]);
        }
        assert_eq!(*percents.last().expect("at least one row"), 100);
    }

    #[test]
    fn test_rendering_twice_is_bit_identical() {
        let request = RenderRequest {
            snapshot: SceneSnapshot::new(
                vec![
                    Sphere::new(Vec3::new(0.0, 0.5, 0.0), 1.0, WHITE),
                    Sphere::new(Vec3::new(2.0, -1.0, 1.0), 0.7, Rgb8::new(255, 170, 100)),
                    Sphere::new(Vec3::new(-2.0, 0.0, -1.0), 1.3, astra_core::NEBULA_MAGENTA),
                ],
                Lighting {
                    points: vec![PointLight::new(Vec3::new(5.0, 5.0, 5.0), 2.0)],
                    hemisphere: Some(HemisphereLight { intensity: 1.0 }),
                },
            ),
            camera: PinholeCamera::new()
                .with_position(Vec3::new(0.0, 8.0, 8.0))
                .with_up(Vec3::Z)
                .with_resolution(24, 16),
        };

        let first = render_image(request.clone(), |_| {}).expect("render");
        let second = render_image(request, |_| {}).expect("render");
        assert_eq!(first.to_bytes(), second.to_bytes());
    }

    #[test]
    fn test_cancellation_stops_before_next_row() {
        let mut task = RenderTask::new(single_sphere_request()).expect("task");

        assert!(matches!(
            task.step_row(),
            Ok(RowProgress::Rendered { .. })
        ));

        task.cancel_flag().cancel();
        assert!(matches!(task.step_row(), Err(RenderError::Cancelled)));
    }

    #[test]
    fn test_step_after_finish_stays_finished() {
        let mut task = RenderTask::new(single_sphere_request()).expect("task");
        loop {
            match task.step_row().expect("no cancel") {
                RowProgress::Rendered { .. } => continue,
                RowProgress::Finished => break,
            }
        }
        assert!(matches!(task.step_row(), Ok(RowProgress::Finished)));
    }
}
