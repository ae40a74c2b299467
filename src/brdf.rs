//! Cook-Torrance BRDF evaluation on the CPU.
//!
//! This is the reference implementation of the shading math used by
//! `shaders/pbr.wgsl`; the WGSL fragment shader mirrors these functions term
//! for term. Keeping the evaluator here lets the numeric properties (energy
//! conservation, lobe shape, grazing-angle guards) be tested without a GPU.

use glam::Vec3;
use std::f32::consts::PI;

/// Guard against divide-by-zero in the specular term at grazing angles.
const SPECULAR_EPSILON: f32 = 1e-4;

/// Reflectance of dielectrics at normal incidence. Metals use their albedo.
const DIELECTRIC_F0: f32 = 0.04;

/// A point light emitting linear radiance, attenuated by inverse-square
/// falloff. No ambient/diffuse/specular split and no attenuation curve.
#[derive(Debug, Clone, Copy)]
pub struct PointLight {
    pub position: Vec3,
    /// Linear color scaled by intensity, e.g. `(150.0, 150.0, 150.0)`.
    pub color: Vec3,
}

impl PointLight {
    pub fn new(position: Vec3, color: Vec3) -> Self {
        Self { position, color }
    }
}

/// Material parameters at a single shaded point, in linear color space.
#[derive(Debug, Clone, Copy)]
pub struct MaterialSample {
    pub albedo: Vec3,
    pub metallic: f32,
    pub roughness: f32,
    pub ao: f32,
}

impl MaterialSample {
    /// Base reflectivity: 4% for dielectrics, tinted by albedo for metals.
    pub fn f0(&self) -> Vec3 {
        Vec3::splat(DIELECTRIC_F0).lerp(self.albedo, self.metallic)
    }
}

/// Trowbridge-Reitz GGX normal distribution function.
///
/// Approximates the relative area of microfacets aligned with the halfway
/// vector, with `alpha = roughness^2`.
pub fn distribution_ggx(n_dot_h: f32, roughness: f32) -> f32 {
    let alpha = roughness * roughness;
    let alpha2 = alpha * alpha;

    let n_dot_h = n_dot_h.max(0.0);
    let denom = n_dot_h * n_dot_h * (alpha2 - 1.0) + 1.0;
    let denom = PI * denom * denom;

    alpha2 / denom
}

/// Schlick-GGX geometry term for a single direction.
pub fn geometry_schlick_ggx(n_dot_x: f32, k: f32) -> f32 {
    n_dot_x / (n_dot_x * (1.0 - k) + k)
}

/// Smith's method: self-shadowing from the view direction (obstruction) and
/// the light direction (shadowing) combined.
///
/// Uses the direct-lighting roughness remap `k = (r + 1)^2 / 8` throughout;
/// there is no specular IBL path in this renderer, so the `r^2 / 2` remap
/// never applies.
pub fn geometry_smith(n_dot_v: f32, n_dot_l: f32, roughness: f32) -> f32 {
    let r = roughness + 1.0;
    let k = r * r / 8.0;

    geometry_schlick_ggx(n_dot_v.max(0.0), k) * geometry_schlick_ggx(n_dot_l.max(0.0), k)
}

/// Schlick's approximation of Fresnel reflectance.
///
/// `cos_theta` is the dot product between the halfway vector and the view
/// direction; `f0` the base reflectivity looking straight at the surface.
pub fn fresnel_schlick(cos_theta: f32, f0: Vec3) -> Vec3 {
    f0 + (Vec3::ONE - f0) * (1.0 - cos_theta.max(0.0)).powi(5)
}

/// Cook-Torrance specular plus Lambertian diffuse for one light direction.
///
/// All inputs are unit vectors; `v` points from the shaded point to the eye,
/// `l` from the point to the light. Back-facing configurations contribute
/// zero, never negative energy. The result has no `n_dot_l` or radiance
/// factor applied yet.
pub fn evaluate(n: Vec3, v: Vec3, l: Vec3, material: &MaterialSample) -> Vec3 {
    let h = (v + l).normalize();

    let n_dot_v = n.dot(v).max(0.0);
    let n_dot_l = n.dot(l).max(0.0);
    let n_dot_h = n.dot(h).max(0.0);
    let h_dot_v = h.dot(v).max(0.0);

    let d = distribution_ggx(n_dot_h, material.roughness);
    let g = geometry_smith(n_dot_v, n_dot_l, material.roughness);
    let f = fresnel_schlick(h_dot_v, material.f0());

    let specular = d * g * f / (4.0 * n_dot_v * n_dot_l + SPECULAR_EPSILON);

    // Fresnel already tells us the specular fraction; what remains refracts
    // and diffuses. Metals absorb refracted light, so they get no diffuse.
    let k_d = (Vec3::ONE - f) * (1.0 - material.metallic);
    let diffuse = k_d * material.albedo / PI;

    diffuse + specular
}

/// Outgoing linear radiance at `position` toward `view_pos`, summed over all
/// lights. The caller applies ambient/IBL terms, tone mapping and gamma.
pub fn shade(
    position: Vec3,
    normal: Vec3,
    view_pos: Vec3,
    material: &MaterialSample,
    lights: &[PointLight],
) -> Vec3 {
    let n = normal.normalize();
    let v = (view_pos - position).normalize();

    let mut outgoing = Vec3::ZERO;
    for light in lights {
        let to_light = light.position - position;
        let distance_sq = to_light.length_squared().max(SPECULAR_EPSILON);
        let l = to_light / distance_sq.sqrt();

        let n_dot_l = n.dot(l).max(0.0);
        if n_dot_l <= 0.0 {
            continue;
        }

        let radiance = light.color / distance_sq;
        outgoing += evaluate(n, v, l, material) * radiance * n_dot_l;
    }

    outgoing
}
