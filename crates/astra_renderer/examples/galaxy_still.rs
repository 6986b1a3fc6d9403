//! Offline galaxy still example.
//!
//! Stands in for the live galaxy layer: fabricates a spiral-galaxy
//! snapshot the way the viewer's generator lays one out, renders a
//! 400x400 still with row-by-row progress, and encodes it to PNG.

use std::io::Write;

use anyhow::Result;
use astra_renderer::{
    render_image, HemisphereLight, Lighting, PinholeCamera, PointLight, Rgb8, RenderRequest,
    SceneSnapshot, Sphere, Vec3, NEBULA_MAGENTA,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const NUM_STARS: usize = 1200;
const NUM_NEBULAE: usize = 30;
const NUM_HAZE: usize = 300;
const NUM_POINT_LIGHTS: usize = 30;
const POINT_LIGHT_INTENSITY: f32 = 5000.0;
const HEMISPHERE_LIGHT_INTENSITY: f32 = 1.0;

const ARMS: usize = 5;
const CORE_RADIUS: f32 = 66.0;
const ARM_REACH: f32 = 338.0;
const GALAXY_THICKNESS: f32 = 10.0;

/// Approximate star body colors, hot to cool.
const STAR_COLORS: [Rgb8; 5] = [
    Rgb8::new(155, 176, 255),
    Rgb8::new(170, 191, 255),
    Rgb8::new(255, 244, 234),
    Rgb8::new(255, 210, 161),
    Rgb8::new(255, 204, 111),
];

/// Haze particles reuse the viewer's pale blue sprite color.
const HAZE_COLOR: Rgb8 = Rgb8::new(0, 130, 255);

fn main() -> Result<()> {
    env_logger::init();

    let mut rng = StdRng::seed_from_u64(7);
    let snapshot = build_galaxy(&mut rng);
    let camera = PinholeCamera::new();

    println!(
        "rendering {} bodies at {}x{}...",
        snapshot.spheres.len(),
        camera.width,
        camera.height
    );

    let started = std::time::Instant::now();
    let raster = render_image(RenderRequest { snapshot, camera }, |percent| {
        print!("\r{percent:>3}% complete");
        std::io::stdout().flush().ok();
    })?;
    println!("\nrendered in {:?}", started.elapsed());

    raster.to_image().save("galaxy_still.png")?;
    println!("saved to galaxy_still.png");
    Ok(())
}

fn build_galaxy(rng: &mut StdRng) -> SceneSnapshot {
    let mut spheres = Vec::with_capacity(NUM_STARS + NUM_NEBULAE + NUM_HAZE);

    // Stars along loosely wound spiral arms
    for i in 0..NUM_STARS {
        let arm = (i % ARMS) as f32;
        let t: f32 = rng.gen();
        let reach = CORE_RADIUS + t * (ARM_REACH - CORE_RADIUS);
        let angle = arm * std::f32::consts::TAU / ARMS as f32
            + t * 2.2
            + rng.gen_range(-0.25..0.25);

        let center = Vec3::new(
            reach * angle.cos() + rng.gen_range(-15.0..15.0),
            reach * angle.sin() + rng.gen_range(-15.0..15.0),
            rng.gen_range(-GALAXY_THICKNESS..GALAXY_THICKNESS),
        );
        let color = STAR_COLORS[rng.gen_range(0..STAR_COLORS.len())];
        spheres.push(Sphere::new(center, rng.gen_range(0.2..1.2), color));
    }

    // Magenta nebula cores clustered around the bulge
    for _ in 0..NUM_NEBULAE {
        let center = Vec3::new(
            rng.gen_range(-CORE_RADIUS..CORE_RADIUS),
            rng.gen_range(-CORE_RADIUS..CORE_RADIUS),
            rng.gen_range(-GALAXY_THICKNESS..GALAXY_THICKNESS),
        );
        spheres.push(Sphere::new(center, rng.gen_range(2.5..7.5), NEBULA_MAGENTA));
    }

    // Fine haze dust scattered across the disk
    for _ in 0..NUM_HAZE {
        let center = Vec3::new(
            rng.gen_range(-ARM_REACH..ARM_REACH),
            rng.gen_range(-ARM_REACH..ARM_REACH),
            rng.gen_range(-GALAXY_THICKNESS..GALAXY_THICKNESS),
        );
        spheres.push(Sphere::new(center, 0.1, HAZE_COLOR));
    }

    // The viewer's light rig: random point lights over the outer core
    // plus one soft hemisphere
    let mut points = Vec::with_capacity(NUM_POINT_LIGHTS);
    for _ in 0..NUM_POINT_LIGHTS {
        points.push(PointLight::new(
            Vec3::new(
                rng.gen_range(-ARM_REACH..ARM_REACH),
                rng.gen_range(-ARM_REACH..ARM_REACH),
                0.0,
            ),
            POINT_LIGHT_INTENSITY,
        ));
    }

    SceneSnapshot::new(
        spheres,
        Lighting {
            points,
            hemisphere: Some(HemisphereLight {
                intensity: HEMISPHERE_LIGHT_INTENSITY,
            }),
        },
    )
}
