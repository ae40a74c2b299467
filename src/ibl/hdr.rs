use std::path::Path;

use anyhow::{Context, Result};

/// A decoded equirectangular radiance image, RGBA with f32 channels.
#[derive(Debug)]
pub struct HdrImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<f32>,
}

impl HdrImage {
    /// Decodes a Radiance `.hdr` (or any image the `image` crate handles)
    /// into linear floating-point pixels. A missing or undecodable file is a
    /// fatal setup error for the IBL path; the failing path is carried in the
    /// error chain instead of falling back to a black environment.
    pub fn load(path: &Path) -> Result<Self> {
        let img = image::open(path)
            .with_context(|| format!("failed to decode HDR environment {}", path.display()))?;
        let rgba = img.to_rgba32f();
        let (width, height) = (rgba.width(), rgba.height());

        Ok(Self {
            width,
            height,
            pixels: rgba.into_raw(),
        })
    }

    /// Wraps raw RGBA f32 pixels, e.g. a synthetic test gradient.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<f32>) -> Self {
        assert_eq!(pixels.len(), (width * height * 4) as usize);
        Self {
            width,
            height,
            pixels,
        }
    }

    /// A small procedural sky gradient so the viewer runs without any asset
    /// on disk: bright towards the top row, dimming towards the bottom.
    pub fn synthetic_gradient(width: u32, height: u32) -> Self {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            // saturating: a single-row (or empty) image must not underflow
            let t = y as f32 / height.saturating_sub(1).max(1) as f32;
            let sky = glam::Vec3::new(1.6, 1.9, 2.4).lerp(glam::Vec3::new(0.25, 0.2, 0.15), t);
            for _ in 0..width {
                pixels.extend_from_slice(&[sky.x, sky.y, sky.z, 1.0]);
            }
        }
        Self::from_pixels(width, height, pixels)
    }

    /// Uploads the image into an `Rgba32Float` texture for sampling.
    pub fn upload(&self, device: &wgpu::Device, queue: &wgpu::Queue) -> wgpu::Texture {
        let size = wgpu::Extent3d {
            width: self.width,
            height: self.height,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Equirectangular HDR Texture"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba32Float,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            texture.as_image_copy(),
            bytemuck::cast_slice(&self.pixels),
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(self.width * 16),
                rows_per_image: Some(self.height),
            },
            size,
        );

        texture
    }
}
