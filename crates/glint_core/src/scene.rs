//! Scene description consumed by the ray tracer.
//!
//! A scene is assembled once through [`SceneBuilder`] and is read-only
//! afterwards, which is what lets render threads share it without locks.

use crate::{AmbientLight, Color, Geometries, Intersectable, LightSource};

/// A complete scene: shapes, lights, and the colors around them.
pub struct Scene {
    name: String,
    background: Color,
    ambient_light: AmbientLight,
    geometries: Geometries,
    lights: Vec<Box<dyn LightSource>>,
}

impl Scene {
    /// Start assembling a scene with the given name.
    pub fn builder(name: impl Into<String>) -> SceneBuilder {
        SceneBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Color seen by rays that hit nothing.
    pub fn background(&self) -> Color {
        self.background
    }

    pub fn ambient_light(&self) -> &AmbientLight {
        &self.ambient_light
    }

    pub fn geometries(&self) -> &Geometries {
        &self.geometries
    }

    pub fn lights(&self) -> &[Box<dyn LightSource>] {
        &self.lights
    }

    pub fn is_bvh_enabled(&self) -> bool {
        self.geometries.is_bvh_enabled()
    }
}

/// Builder for [`Scene`].
///
/// Defaults: black background, no ambient light, no shapes, no lights, BVH off.
pub struct SceneBuilder {
    name: String,
    background: Color,
    ambient_light: AmbientLight,
    geometries: Geometries,
    lights: Vec<Box<dyn LightSource>>,
    bvh: bool,
}

impl SceneBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            background: Color::ZERO,
            ambient_light: AmbientLight::NONE,
            geometries: Geometries::new(),
            lights: Vec::new(),
            bvh: false,
        }
    }

    pub fn background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    pub fn ambient_light(mut self, ambient_light: AmbientLight) -> Self {
        self.ambient_light = ambient_light;
        self
    }

    /// Add a shape or a nested composite.
    pub fn geometry(mut self, geometry: impl Intersectable + 'static) -> Self {
        self.geometries.add(geometry);
        self
    }

    /// Add an existing composite as one nested member.
    pub fn geometries(mut self, geometries: Geometries) -> Self {
        self.geometries.add(geometries);
        self
    }

    pub fn light(mut self, light: impl LightSource + 'static) -> Self {
        self.lights.push(Box::new(light));
        self
    }

    /// Enable BVH-accelerated intersection.
    pub fn bvh(mut self, enabled: bool) -> Self {
        self.bvh = enabled;
        self
    }

    /// Finish the scene, building the BVH if enabled.
    pub fn build(self) -> Scene {
        let mut geometries = self.geometries;
        if self.bvh {
            geometries.build_bvh();
        }

        log::info!(
            "Scene '{}': {} shapes, {} lights, BVH {}",
            self.name,
            geometries.len(),
            self.lights.len(),
            if self.bvh { "enabled" } else { "disabled" }
        );

        Scene {
            name: self.name,
            background: self.background,
            ambient_light: self.ambient_light,
            geometries,
            lights: self.lights,
        }
    }
}
