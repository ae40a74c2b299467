//! Image-based lighting preprocessing.
//!
//! An equirectangular HDR image becomes an environment cubemap, which is
//! then convolved into a diffuse irradiance cubemap. Both steps run exactly
//! once, before the first frame; the per-frame renderer only samples the
//! results.

mod capture;
mod equirect;
mod hdr;
mod irradiance;

pub use capture::{capture_projection, capture_view_proj, capture_views, Cubemap, CUBEMAP_FORMAT};
pub use equirect::{spherical_uv, EquirectPass};
pub use hdr::HdrImage;
pub use irradiance::{IrradiancePass, DEFAULT_SAMPLE_DELTA};

use std::path::PathBuf;

use anyhow::Result;

use crate::mesh::CubeMesh;

/// Per-face resolution of the environment cubemap.
pub const ENVIRONMENT_CUBEMAP_SIZE: u32 = 512;

/// Per-face resolution of the irradiance cubemap. Deliberately small;
/// irradiance is low-frequency.
pub const IRRADIANCE_CUBEMAP_SIZE: u32 = 32;

/// Where the environment radiance comes from.
#[derive(Debug, Clone)]
pub enum EnvironmentSource {
    /// Equirectangular Radiance `.hdr` file on disk.
    HdrPath(PathBuf),
    /// Built-in procedural gradient, used when no file is given.
    Synthetic,
}

/// The one-shot result of environment preprocessing.
///
/// Building this is the explicit "prepare" phase: expensive relative to a
/// frame (twelve full cubemap-face renders) and never repeated unless the
/// environment itself changes. The renderer takes it by reference each frame.
pub struct PreparedEnvironment {
    pub environment: Cubemap,
    pub irradiance: Cubemap,
}

impl PreparedEnvironment {
    pub fn build(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        cube: &CubeMesh,
        source: &EnvironmentSource,
    ) -> Result<Self> {
        let hdr = match source {
            EnvironmentSource::HdrPath(path) => HdrImage::load(path)?,
            EnvironmentSource::Synthetic => HdrImage::synthetic_gradient(256, 128),
        };

        log::info!(
            "preparing environment: {}x{} source, {} px faces",
            hdr.width,
            hdr.height,
            ENVIRONMENT_CUBEMAP_SIZE
        );

        let equirect_pass = EquirectPass::new(device);
        let environment =
            equirect_pass.convert(device, queue, cube, &hdr, ENVIRONMENT_CUBEMAP_SIZE)?;

        let irradiance_pass = IrradiancePass::new(device);
        let irradiance =
            irradiance_pass.convolve(device, queue, cube, &environment, IRRADIANCE_CUBEMAP_SIZE)?;

        Ok(Self {
            environment,
            irradiance,
        })
    }
}

#[cfg(test)]
mod tests;
