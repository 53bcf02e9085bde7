//! End-to-end renders of small scenes.

use glint_core::{
    AmbientLight, Color, Cylinder, DirectionalLight, Geometry, Material, Plane, PointLight,
    Polygon, Scene, Sphere, SpotLight, Triangle,
};
use glint_math::{Point, Ray, Vector};
use glint_renderer::{Camera, ImageBuffer, ImageSink, Progress, RayTracer, ThreadMode};

const WIDTH: u32 = 40;
const HEIGHT: u32 = 30;

fn v(x: f64, y: f64, z: f64) -> Vector {
    Vector::new(x, y, z).unwrap()
}

fn build_scene(bvh: bool) -> Scene {
    let shiny = Material::new()
        .with_kd(Color::splat(0.4))
        .with_ks(Color::splat(0.3))
        .with_shininess(30);

    let mut builder = Scene::builder("integration")
        .background(Color::new(0.05, 0.05, 0.1))
        .ambient_light(AmbientLight::uniform(Color::ONE, 0.1))
        .geometry(
            Plane::new(Point::new(0.0, -2.0, 0.0), Vector::Y)
                .with_material(Material::new().with_kd(Color::splat(0.5)).with_kr(Color::splat(0.2))),
        )
        .geometry(
            Sphere::new(1.0, Point::new(0.0, -1.0, -6.0))
                .unwrap()
                .with_emission(Color::new(0.3, 0.0, 0.0))
                .with_material(shiny.with_kt(Color::splat(0.5))),
        )
        .geometry(
            Triangle::new(
                Point::new(-4.0, -2.0, -9.0),
                Point::new(-1.0, -2.0, -9.0),
                Point::new(-2.5, 1.0, -9.0),
            )
            .unwrap()
            .with_emission(Color::new(0.0, 0.2, 0.0))
            .with_material(shiny),
        )
        .geometry(
            Polygon::new(vec![
                Point::new(1.0, -2.0, -8.0),
                Point::new(3.0, -2.0, -8.0),
                Point::new(3.0, 0.0, -8.0),
                Point::new(1.0, 0.0, -8.0),
            ])
            .unwrap()
            .with_emission(Color::new(0.0, 0.0, 0.2))
            .with_material(shiny.with_kr(Color::splat(0.5))),
        )
        .geometry(
            Cylinder::new(0.5, Ray::new(Point::new(2.5, -1.5, -5.0), Vector::Y), 1.5)
                .unwrap()
                .with_material(shiny),
        )
        .light(PointLight::new(Color::splat(0.6), Point::new(-3.0, 4.0, 0.0)).with_kl(0.01))
        .light(
            SpotLight::new(Color::splat(0.8), Point::new(3.0, 3.0, -2.0), v(-1.0, -1.0, -1.0))
                .with_narrow_beam(4),
        )
        .light(DirectionalLight::new(Color::splat(0.2), v(0.0, -1.0, -0.5)));

    // Enough small spheres to give the BVH several levels
    for k in 0..24 {
        let x = -3.0 + (k % 6) as f64 * 1.2;
        let y = 1.0 + (k / 6) as f64 * 0.8;
        builder = builder.geometry(
            Sphere::new(0.3, Point::new(x, y, -10.0))
                .unwrap()
                .with_emission(Color::new(0.02 * k as f64, 0.1, 0.1))
                .with_material(shiny),
        );
    }

    builder.bvh(bvh).build()
}

fn camera(mode: ThreadMode, antialiasing: u32) -> Camera {
    Camera::builder()
        .location(Point::ZERO)
        .direction(Vector::NEG_Z, Vector::Y)
        .vp_size(4.0, 3.0)
        .vp_distance(2.0)
        .thread_mode(mode)
        .antialiasing(antialiasing)
        .bucket_size(8)
        .print_interval(25.0)
        .build()
        .unwrap()
}

fn render(scene: &Scene, camera: &Camera) -> ImageBuffer {
    let mut image = ImageBuffer::new(WIDTH, HEIGHT);
    let progress = Progress::new();
    camera
        .render(&RayTracer::new(scene), &mut image, &progress)
        .unwrap();
    assert_eq!(progress.done(), u64::from(WIDTH * HEIGHT));
    image.finish().unwrap();
    image
}

fn assert_images_close(a: &ImageBuffer, b: &ImageBuffer) {
    assert_eq!(a.pixels.len(), b.pixels.len());
    for (i, (pa, pb)) in a.pixels.iter().zip(&b.pixels).enumerate() {
        assert!(
            (*pa - *pb).abs().max_element() < 1e-9,
            "pixel {} differs: {:?} vs {:?}",
            i,
            pa,
            pb
        );
    }
}

#[test]
fn test_render_is_not_empty() {
    let _ = env_logger::builder().is_test(true).try_init();

    let scene = build_scene(false);
    let image = render(&scene, &camera(ThreadMode::Single, 1));

    let background = scene.background();
    let covered = image.pixels.iter().filter(|&&c| c != background).count();
    assert!(covered > image.pixels.len() / 3);
    assert!(image.pixels.iter().all(|c| c.is_finite()));
}

#[test]
fn test_thread_modes_match() {
    let scene = build_scene(true);

    let single = render(&scene, &camera(ThreadMode::Single, 1));
    let parallel = render(&scene, &camera(ThreadMode::Parallel, 1));
    let pooled = render(&scene, &camera(ThreadMode::Threads(3), 1));

    assert_eq!(single.pixels, parallel.pixels);
    assert_eq!(single.pixels, pooled.pixels);
}

#[test]
fn test_bvh_matches_brute_force() {
    let brute = render(&build_scene(false), &camera(ThreadMode::Parallel, 1));
    let accelerated = render(&build_scene(true), &camera(ThreadMode::Parallel, 1));

    assert_images_close(&brute, &accelerated);
}

#[test]
fn test_antialiasing_is_deterministic() {
    let scene = build_scene(true);

    let first = render(&scene, &camera(ThreadMode::Parallel, 3));
    let second = render(&scene, &camera(ThreadMode::Threads(2), 3));
    assert_eq!(first.pixels, second.pixels);

    // The jittered average differs from single-sample rendering somewhere
    let plain = render(&scene, &camera(ThreadMode::Parallel, 1));
    assert!(first.pixels.iter().zip(&plain.pixels).any(|(a, b)| a != b));
}

#[test]
fn test_background_only_scene() {
    let background = Color::new(0.3, 0.6, 0.9);
    let scene = Scene::builder("empty").background(background).build();
    let image = render(&scene, &camera(ThreadMode::Parallel, 2));

    assert!(image
        .pixels
        .iter()
        .all(|c| (*c - background).abs().max_element() < 1e-12));
}
