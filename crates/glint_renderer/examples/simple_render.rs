//! Simple ray tracer example.
//!
//! Renders a few reflective and transparent shapes above a mirror floor and
//! saves the result as a PNG.
//!
//! Usage: `cargo run --example simple_render --release [output.png]`

use anyhow::Context;
use glint_core::{
    AmbientLight, Color, Cylinder, Geometry, Material, Plane, PointLight, Scene, Sphere,
    SpotLight, Triangle,
};
use glint_math::{Point, Ray, Vector};
use glint_renderer::{Camera, ImageSink, PngWriter, Progress, RayTracer, ThreadMode};

const WIDTH: u32 = 800;
const HEIGHT: u32 = 600;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let output = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "output/simple_render.png".to_string());

    let scene = build_scene()?;

    let camera = Camera::builder()
        .location(Point::new(0.0, 1.0, 12.0))
        .direction(Vector::NEG_Z, Vector::Y)
        .vp_size(8.0, 6.0)
        .vp_distance(10.0)
        .antialiasing(3)
        .thread_mode(ThreadMode::Parallel)
        .print_interval(10.0)
        .build()
        .context("invalid camera")?;

    let mut png = PngWriter::new(&output, WIDTH, HEIGHT);
    let progress = Progress::new();
    camera.render(&RayTracer::new(&scene), &mut png, &progress)?;
    png.finish()
        .with_context(|| format!("failed to write {}", output))?;

    Ok(())
}

fn build_scene() -> anyhow::Result<Scene> {
    let matte = Material::new().with_kd(Color::splat(0.5)).with_ks(Color::splat(0.3)).with_shininess(60);
    let mirror = matte.with_kr(Color::splat(0.4));
    let glass = matte.with_kt(Color::splat(0.6));

    let mut builder = Scene::builder("simple_render")
        .background(Color::new(0.05, 0.07, 0.12))
        .ambient_light(AmbientLight::uniform(Color::ONE, 0.15))
        .geometry(
            Plane::new(Point::new(0.0, -2.0, 0.0), Vector::Y)
                .with_emission(Color::splat(0.05))
                .with_material(mirror),
        )
        .geometry(
            Sphere::new(1.5, Point::new(-2.0, -0.5, -2.0))?
                .with_emission(Color::new(0.4, 0.05, 0.05))
                .with_material(glass),
        )
        .geometry(
            Sphere::new(0.8, Point::new(-2.0, -0.5, -2.0))?
                .with_emission(Color::new(0.05, 0.3, 0.05))
                .with_material(matte),
        )
        .geometry(
            Cylinder::new(0.7, Ray::new(Point::new(2.0, -2.0, -3.0), Vector::Y), 2.5)?
                .with_emission(Color::new(0.05, 0.1, 0.4))
                .with_material(mirror),
        )
        .geometry(
            Triangle::new(
                Point::new(-6.0, -2.0, -10.0),
                Point::new(6.0, -2.0, -10.0),
                Point::new(0.0, 6.0, -10.0),
            )?
            .with_emission(Color::new(0.1, 0.08, 0.02))
            .with_material(mirror),
        )
        .light(
            PointLight::new(Color::new(0.8, 0.7, 0.6), Point::new(-5.0, 6.0, 4.0))
                .with_kl(0.001)
                .with_kq(0.0002),
        )
        .light(
            SpotLight::new(
                Color::new(0.6, 0.6, 0.9),
                Point::new(4.0, 5.0, 2.0),
                Vector::new(-1.0, -1.5, -1.0)?,
            )
            .with_narrow_beam(8)
            .with_kl(0.001),
        );

    // A row of small spheres so the BVH has something to split
    for k in 0..12 {
        let x = -5.5 + k as f64;
        builder = builder.geometry(
            Sphere::new(0.35, Point::new(x, -1.65, 1.5))?
                .with_emission(Color::new(0.03 * k as f64, 0.15, 0.3 - 0.02 * k as f64))
                .with_material(matte),
        );
    }

    Ok(builder.bvh(true).build())
}
