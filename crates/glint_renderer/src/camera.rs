//! Pinhole camera and the bucketed render loop.
//!
//! The camera maps pixel indices to points on a viewport plane placed
//! `distance` units along the forward axis, and casts primary rays through
//! them. Rendering splits the image into buckets, traces them on the
//! configured thread mode, and writes the finished pixels to an
//! [`ImageSink`] from the calling thread.

use crate::bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
use crate::{CameraError, ImageSink, Progress, RayTracer, RenderError};
use glint_core::Color;
use glint_math::{is_zero, Point, Ray, Vector};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use std::time::Instant;

/// How the render loop distributes buckets over threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThreadMode {
    /// Render every bucket on the calling thread.
    Single,
    /// Use rayon's global thread pool.
    #[default]
    Parallel,
    /// Use a dedicated pool with this many workers. Zero lets rayon choose.
    Threads(usize),
}

/// Default progress print interval, in percent.
pub const DEFAULT_PRINT_INTERVAL: f64 = 10.0;

/// A validated, immutable camera.
#[derive(Debug, Clone)]
pub struct Camera {
    location: Point,
    v_to: Vector,
    v_up: Vector,
    v_right: Vector,
    width: f64,
    height: f64,
    distance: f64,
    antialiasing: u32,
    thread_mode: ThreadMode,
    bucket_size: u32,
    print_interval: f64,
}

impl Camera {
    pub fn builder() -> CameraBuilder {
        CameraBuilder::new()
    }

    pub fn location(&self) -> Point {
        self.location
    }

    /// Forward direction.
    pub fn v_to(&self) -> Vector {
        self.v_to
    }

    pub fn v_up(&self) -> Vector {
        self.v_up
    }

    /// `v_to × v_up`.
    pub fn v_right(&self) -> Vector {
        self.v_right
    }

    /// Viewport size as `(width, height)`.
    pub fn viewport(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Sub-pixel grid size per axis; 1 means one ray per pixel.
    pub fn antialiasing(&self) -> u32 {
        self.antialiasing
    }

    pub fn thread_mode(&self) -> ThreadMode {
        self.thread_mode
    }

    pub fn bucket_size(&self) -> u32 {
        self.bucket_size
    }

    pub fn print_interval(&self) -> f64 {
        self.print_interval
    }

    /// Point on the viewport for fractional pixel coordinates `(x, y)`.
    ///
    /// Integer coordinates give pixel centers. Row 0 is at the top.
    fn viewport_point(&self, nx: u32, ny: u32, x: f64, y: f64) -> Point {
        let rx = self.width / nx as f64;
        let ry = self.height / ny as f64;
        let xj = (x - (nx as f64 - 1.0) / 2.0) * rx;
        let yi = -(y - (ny as f64 - 1.0) / 2.0) * ry;

        let mut p = self.location + self.v_to.as_dvec() * self.distance;
        if !is_zero(xj) {
            p += self.v_right.as_dvec() * xj;
        }
        if !is_zero(yi) {
            p += self.v_up.as_dvec() * yi;
        }
        p
    }

    fn ray_through(&self, p: Point) -> Ray {
        // The viewport sits `distance > 0` ahead, so this only falls back on overflow
        let direction = Vector::try_from(p - self.location).unwrap_or(self.v_to);
        Ray::new(self.location, direction)
    }

    /// Ray through the center of pixel `(j, i)` of an `nx` x `ny` image.
    pub fn construct_ray(&self, nx: u32, ny: u32, j: u32, i: u32) -> Ray {
        self.ray_through(self.viewport_point(nx, ny, j as f64, i as f64))
    }

    /// Jittered rays over an N x N sub-pixel grid of pixel `(j, i)`.
    ///
    /// Each ray passes through a random point of its own sub-cell. With no
    /// anti-aliasing this is the single center ray.
    pub fn construct_rays<R: Rng>(
        &self,
        nx: u32,
        ny: u32,
        j: u32,
        i: u32,
        rng: &mut R,
    ) -> Vec<Ray> {
        let n = self.antialiasing;
        if n <= 1 {
            return vec![self.construct_ray(nx, ny, j, i)];
        }

        let step = 1.0 / n as f64;
        let mut rays = Vec::with_capacity((n * n) as usize);
        for sub_i in 0..n {
            for sub_j in 0..n {
                let y = i as f64 - 0.5 + (sub_i as f64 + rng.gen::<f64>()) * step;
                let x = j as f64 - 0.5 + (sub_j as f64 + rng.gen::<f64>()) * step;
                rays.push(self.ray_through(self.viewport_point(nx, ny, x, y)));
            }
        }
        rays
    }

    /// Color of pixel `(j, i)`, averaged over all its rays.
    ///
    /// The jitter generator is seeded from the pixel coordinates, so the
    /// result does not depend on which thread renders the pixel.
    pub fn render_pixel(&self, tracer: &RayTracer<'_>, nx: u32, ny: u32, j: u32, i: u32) -> Color {
        if self.antialiasing <= 1 {
            return tracer.trace_ray(&self.construct_ray(nx, ny, j, i));
        }

        let mut rng = StdRng::seed_from_u64((u64::from(i) << 32) | u64::from(j));
        let rays = self.construct_rays(nx, ny, j, i, &mut rng);
        let sum: Color = rays.iter().map(|ray| tracer.trace_ray(ray)).sum();
        sum / rays.len() as f64
    }

    /// Render the whole image into `sink`.
    ///
    /// The sink is not finished, so overlays such as [`Camera::print_grid`]
    /// can still be drawn before calling [`ImageSink::finish`].
    pub fn render(
        &self,
        tracer: &RayTracer<'_>,
        sink: &mut dyn ImageSink,
        progress: &Progress,
    ) -> Result<(), RenderError> {
        let (nx, ny) = sink.resolution();
        if nx == 0 || ny == 0 {
            return Err(RenderError::InvalidResolution {
                width: nx,
                height: ny,
            });
        }

        let buckets = generate_buckets(nx, ny, self.bucket_size);
        progress.reset(u64::from(nx) * u64::from(ny));

        log::info!(
            "Rendering '{}' at {}x{} ({:?}, {} buckets, {}x AA)",
            tracer.scene().name(),
            nx,
            ny,
            self.thread_mode,
            buckets.len(),
            self.antialiasing
        );
        let start = Instant::now();

        let render = |bucket: &Bucket| render_bucket(bucket, self, tracer, (nx, ny), progress);
        let results: Vec<BucketResult> = match self.thread_mode {
            ThreadMode::Single => buckets.iter().map(render).collect(),
            ThreadMode::Parallel => buckets.par_iter().map(render).collect(),
            ThreadMode::Threads(n) => {
                let pool = rayon::ThreadPoolBuilder::new().num_threads(n).build()?;
                log::debug!("Using dedicated pool of {} threads", pool.current_num_threads());
                pool.install(|| buckets.par_iter().map(render).collect())
            }
        };

        for result in &results {
            for (x, y, color) in result.iter() {
                sink.write_pixel(x, y, color);
            }
        }

        log::info!(
            "Render complete in {:.2}s ({} pixels)",
            start.elapsed().as_secs_f64(),
            progress.done()
        );
        Ok(())
    }

    /// Draw grid lines every `interval` pixels in `color`.
    pub fn print_grid(&self, sink: &mut dyn ImageSink, interval: u32, color: Color) {
        if interval == 0 {
            log::warn!("Grid interval must be positive, skipping grid");
            return;
        }

        let (nx, ny) = sink.resolution();
        for y in 0..ny {
            for x in 0..nx {
                if x % interval == 0 || y % interval == 0 {
                    sink.write_pixel(x, y, color);
                }
            }
        }
    }
}

/// Builder for [`Camera`]; validation runs once in [`CameraBuilder::build`].
#[derive(Debug, Clone)]
pub struct CameraBuilder {
    location: Option<Point>,
    direction: Option<(Vector, Vector)>,
    size: Option<(f64, f64)>,
    distance: Option<f64>,
    antialiasing: u32,
    thread_mode: ThreadMode,
    bucket_size: u32,
    print_interval: f64,
}

impl Default for CameraBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraBuilder {
    pub fn new() -> Self {
        Self {
            location: None,
            direction: None,
            size: None,
            distance: None,
            antialiasing: 1,
            thread_mode: ThreadMode::default(),
            bucket_size: DEFAULT_BUCKET_SIZE,
            print_interval: DEFAULT_PRINT_INTERVAL,
        }
    }

    pub fn location(mut self, location: Point) -> Self {
        self.location = Some(location);
        self
    }

    /// Forward and up directions. They must be orthogonal unit vectors.
    pub fn direction(mut self, v_to: Vector, v_up: Vector) -> Self {
        self.direction = Some((v_to, v_up));
        self
    }

    /// Viewport width and height, in scene units.
    pub fn vp_size(mut self, width: f64, height: f64) -> Self {
        self.size = Some((width, height));
        self
    }

    /// Distance from the camera to the viewport plane.
    pub fn vp_distance(mut self, distance: f64) -> Self {
        self.distance = Some(distance);
        self
    }

    /// Trace an `n` x `n` jittered grid per pixel. 1 disables anti-aliasing.
    pub fn antialiasing(mut self, n: u32) -> Self {
        self.antialiasing = n;
        self
    }

    pub fn thread_mode(mut self, mode: ThreadMode) -> Self {
        self.thread_mode = mode;
        self
    }

    pub fn bucket_size(mut self, size: u32) -> Self {
        self.bucket_size = size;
        self
    }

    /// Log progress every `percent` percent; zero or less disables it.
    pub fn print_interval(mut self, percent: f64) -> Self {
        self.print_interval = percent;
        self
    }

    pub fn build(self) -> Result<Camera, CameraError> {
        let location = self.location.ok_or(CameraError::Missing("location"))?;
        let (v_to, v_up) = self.direction.ok_or(CameraError::Missing("direction"))?;
        let (width, height) = self.size.ok_or(CameraError::Missing("viewport size"))?;
        let distance = self.distance.ok_or(CameraError::Missing("viewport distance"))?;

        if !(width > 0.0 && width.is_finite()) {
            return Err(CameraError::InvalidViewport("width"));
        }
        if !(height > 0.0 && height.is_finite()) {
            return Err(CameraError::InvalidViewport("height"));
        }
        if !(distance > 0.0 && distance.is_finite()) {
            return Err(CameraError::InvalidViewport("distance"));
        }

        if !is_zero(v_to.dot(&v_up)) {
            return Err(CameraError::NotOrthogonal);
        }
        if !v_to.is_normalized() || !v_up.is_normalized() {
            return Err(CameraError::NotNormalized);
        }
        let v_right = v_to.cross(&v_up)?.normalize();

        if self.antialiasing == 0 {
            return Err(CameraError::InvalidSupersampling(0));
        }

        Ok(Camera {
            location,
            v_to,
            v_up,
            v_right,
            width,
            height,
            distance,
            antialiasing: self.antialiasing,
            thread_mode: self.thread_mode,
            bucket_size: self.bucket_size,
            print_interval: self.print_interval,
        })
    }
}
