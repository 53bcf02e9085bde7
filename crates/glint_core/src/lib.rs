//! Glint Core - scene description for the Glint ray tracer.
//!
//! This crate provides:
//!
//! - **Shapes**: `Sphere`, `Plane`, `Polygon`, `Triangle`, `Tube`, `Cylinder`
//! - **Composites**: `Geometries`, optionally accelerated by a `Bvh`
//! - **Surfaces and lights**: `Material`, `PointLight`, `SpotLight`, `DirectionalLight`
//! - **Scenes**: `Scene`, assembled once through `SceneBuilder`
//!
//! # Example
//!
//! ```ignore
//! use glint_core::{Geometry, Material, PointLight, Scene, Sphere};
//! use glint_math::{DVec3, Point};
//!
//! let scene = Scene::builder("demo")
//!     .geometry(Sphere::new(1.0, Point::new(0.0, 0.0, -3.0))?
//!         .with_material(Material::new().with_kd(DVec3::splat(0.5))))
//!     .light(PointLight::new(DVec3::ONE, Point::new(0.0, 5.0, 0.0)))
//!     .bvh(true)
//!     .build();
//! ```

pub mod bvh;
pub mod error;
pub mod geometries;
pub mod geometry;
pub mod light;
pub mod material;
pub mod scene;
pub mod shapes;

// Re-export commonly used types
pub use bvh::{Bvh, BvhNode, LEAF_MAX_SIZE};
pub use error::{GeometryError, Result};
pub use geometries::Geometries;
pub use geometry::{GeoPoint, Geometry, Intersectable, Surface};
pub use light::{AmbientLight, DirectionalLight, LightSource, PointLight, SpotLight};
pub use material::{Attenuation, Color, Material};
pub use scene::{Scene, SceneBuilder};
pub use shapes::{Cylinder, Plane, Polygon, Sphere, Triangle, Tube};
