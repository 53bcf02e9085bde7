//! Glint Renderer - Whitted-style CPU ray tracing.
//!
//! Turns a [`glint_core::Scene`] into pixels:
//!
//! - [`RayTracer`] computes the color along a ray: emission, Phong shading
//!   with shadow transparency, and recursive reflection and refraction
//! - [`Camera`] casts primary rays and renders buckets on rayon threads
//! - [`ImageSink`] receives the pixels, in memory or as a PNG file
//!
//! # Example
//!
//! ```ignore
//! use glint_renderer::{Camera, ImageSink, PngWriter, Progress, RayTracer};
//!
//! let camera = Camera::builder()
//!     .location(Point::new(0.0, 0.0, 10.0))
//!     .direction(Vector::NEG_Z, Vector::Y)
//!     .vp_size(4.0, 4.0)
//!     .vp_distance(10.0)
//!     .build()?;
//! let mut png = PngWriter::new("out.png", 400, 400);
//! camera.render(&RayTracer::new(&scene), &mut png, &Progress::new())?;
//! png.finish()?;
//! ```

mod bucket;
mod camera;
mod error;
mod progress;
mod sink;
mod tracer;

pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use camera::{Camera, CameraBuilder, ThreadMode, DEFAULT_PRINT_INTERVAL};
pub use error::{CameraError, RenderError};
pub use progress::Progress;
pub use sink::{clamp_01, color_to_rgba, ImageBuffer, ImageSink, PngWriter};
pub use tracer::{RayTracer, MAX_CALC_COLOR_LEVEL, MIN_CALC_COLOR_K};
