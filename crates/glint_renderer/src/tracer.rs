//! Whitted-style recursive ray tracer.
//!
//! Color at a hit = emission + local effects (diffuse and Phong specular
//! from each light, attenuated by shadow transparency) + global effects
//! (recursive reflection and refraction). Recursion stops at a fixed depth
//! or when the accumulated attenuation drops below a threshold.

use glint_core::{Attenuation, Color, GeoPoint, Geometry, Intersectable, LightSource, Scene};
use glint_math::{align_zero, DVec3, Ray, Vector, DELTA};

/// Maximum recursion depth for reflected and refracted rays.
pub const MAX_CALC_COLOR_LEVEL: u32 = 10;

/// Contributions whose accumulated attenuation is below this are dropped.
pub const MIN_CALC_COLOR_K: f64 = 0.001;

/// Starting attenuation for a primary ray.
const INITIAL_K: DVec3 = DVec3::ONE;

/// Traces rays through a read-only scene.
#[derive(Clone, Copy)]
pub struct RayTracer<'a> {
    scene: &'a Scene,
}

impl<'a> RayTracer<'a> {
    pub fn new(scene: &'a Scene) -> Self {
        Self { scene }
    }

    pub fn scene(&self) -> &'a Scene {
        self.scene
    }

    /// Color seen along a primary ray.
    pub fn trace_ray(&self, ray: &Ray) -> Color {
        match self.find_closest_intersection(ray) {
            Some(gp) => {
                self.calc_color(&gp, ray, MAX_CALC_COLOR_LEVEL, INITIAL_K)
                    + self.scene.ambient_light().intensity()
            }
            None => self.scene.background(),
        }
    }

    /// Color at a hit point, recursing `level - 1` more times for global effects.
    ///
    /// `k` is the attenuation accumulated along the path so far. At level 1
    /// only emission and local effects contribute.
    pub fn calc_color(&self, gp: &GeoPoint<'_>, ray: &Ray, level: u32, k: DVec3) -> Color {
        let color = gp.geometry.emission() + self.calc_local_effects(gp, ray, k);
        if level <= 1 {
            return color;
        }
        color + self.calc_global_effects(gp, ray, level, k)
    }

    /// Closest hit along the ray, if any.
    pub fn find_closest_intersection(&self, ray: &Ray) -> Option<GeoPoint<'a>> {
        let hits = self.scene.geometries().find_geo_intersections(ray);
        ray.find_closest_by(&hits, |gp| gp.point)
    }

    fn calc_local_effects(&self, gp: &GeoPoint<'_>, ray: &Ray, k: DVec3) -> Color {
        let v = ray.direction();
        let n = gp.normal();
        let nv = align_zero(n.dot(v));
        if nv == 0.0 {
            return Color::ZERO;
        }

        let material = gp.geometry.material();
        let mut color = Color::ZERO;

        for light in self.scene.lights() {
            let l = light.direction(gp.point);
            let nl = align_zero(n.dot(l));
            // Light and viewer must be on the same side of the surface
            if nl * nv <= 0.0 {
                continue;
            }

            let ktr = self.transparency(gp, light.as_ref(), l, n);
            if (ktr * k).lower_than(MIN_CALC_COLOR_K) {
                continue;
            }

            let il = light.intensity(gp.point) * ktr;
            let diffuse = material.kd * nl.abs();
            let specular = calc_specular(material.ks, material.shininess, n, l, v);
            color += il * diffuse + il * specular;
        }

        color
    }

    fn calc_global_effects(&self, gp: &GeoPoint<'_>, ray: &Ray, level: u32, k: DVec3) -> Color {
        let material = gp.geometry.material();
        let n = gp.normal();
        let v = ray.direction();

        let mut color = Color::ZERO;
        if material.is_reflective() {
            let reflected = v - n * (2.0 * align_zero(v.dot(n)));
            color += self.calc_ray_effect(gp, reflected, n, level, k, material.kr);
        }
        if material.is_transparent() {
            color += self.calc_ray_effect(gp, v, n, level, k, material.kt);
        }
        color
    }

    /// One reflected or refracted contribution.
    ///
    /// A hit is scaled by `k_effect`; a ray that escapes sees the background as is.
    fn calc_ray_effect(
        &self,
        gp: &GeoPoint<'_>,
        direction: DVec3,
        n: DVec3,
        level: u32,
        k: DVec3,
        k_effect: DVec3,
    ) -> Color {
        if k_effect.lower_than(MIN_CALC_COLOR_K) {
            return Color::ZERO;
        }
        let kk = k * k_effect;
        if kk.lower_than(MIN_CALC_COLOR_K) {
            return Color::ZERO;
        }

        let Ok(direction) = Vector::try_from(direction) else {
            return Color::ZERO;
        };
        let effect_ray = Ray::offset(gp.point, direction, n);

        match self.find_closest_intersection(&effect_ray) {
            Some(effect_gp) => self.calc_color(&effect_gp, &effect_ray, level - 1, kk) * k_effect,
            None => self.scene.background(),
        }
    }

    /// Fraction of a light's intensity that reaches `gp` through the shapes in between.
    ///
    /// Each occluder multiplies the result by its transmission coefficient.
    fn transparency(&self, gp: &GeoPoint<'_>, light: &dyn LightSource, l: DVec3, n: DVec3) -> DVec3 {
        let Ok(to_light) = Vector::try_from(-l) else {
            return DVec3::ONE;
        };
        let shadow_ray = Ray::offset(gp.point, to_light, n);
        let light_distance = light.distance(gp.point);

        // The offset origin can sit up to DELTA closer to the light
        let hits = self
            .scene
            .geometries()
            .find_intersections(&shadow_ray, light_distance + DELTA);

        let mut ktr = DVec3::ONE;
        for hit in hits {
            if align_zero(hit.point.distance(gp.point) - light_distance) <= 0.0 {
                ktr *= hit.geometry.material().kt;
                if ktr.lower_than(MIN_CALC_COLOR_K) {
                    return DVec3::ZERO;
                }
            }
        }
        ktr
    }
}

/// Phong specular term `ks * max(0, -v.r)^shininess`, with `r` the reflection of `l`.
fn calc_specular(ks: DVec3, shininess: u32, n: DVec3, l: DVec3, v: DVec3) -> DVec3 {
    let r = l - n * (2.0 * l.dot(n));
    let minus_vr = -v.dot(r);
    if align_zero(minus_vr) <= 0.0 {
        return DVec3::ZERO;
    }
    ks * minus_vr.powi(i32::try_from(shininess).unwrap_or(i32::MAX))
}
