use std::path::Path;

use anyhow::{Context, Result};

/// A decoded LDR material texture, RGBA8 in sRGB space.
#[derive(Debug)]
pub struct TextureImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl TextureImage {
    /// Decodes a PNG/JPEG from disk. A bad path or undecodable file is a
    /// setup error carried with the failing path, same policy as the HDR
    /// environment loader.
    pub fn load(path: &Path) -> Result<Self> {
        let rgba = image::open(path)
            .with_context(|| format!("failed to decode texture {}", path.display()))?
            .to_rgba8();
        let (width, height) = (rgba.width(), rgba.height());

        Ok(Self {
            width,
            height,
            pixels: rgba.into_raw(),
        })
    }

    /// Uploads the image as an `Rgba8UnormSrgb` texture and returns its view.
    pub fn upload(&self, device: &wgpu::Device, queue: &wgpu::Queue, label: &str) -> wgpu::TextureView {
        let size = wgpu::Extent3d {
            width: self.width,
            height: self.height,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            texture.as_image_copy(),
            &self.pixels,
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(self.width * 4),
                rows_per_image: None,
            },
            size,
        );

        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    #[test]
    fn load_decodes_written_png() {
        let tmp = assert_fs::TempDir::new().unwrap();
        let file = tmp.child("albedo.png");
        let pixels: [u8; 16] = [
            255, 0, 0, 255, //
            0, 255, 0, 255, //
            0, 0, 255, 255, //
            255, 255, 255, 255,
        ];
        image::save_buffer(file.path(), &pixels, 2, 2, image::ColorType::Rgba8).unwrap();

        let texture = TextureImage::load(file.path()).unwrap();
        assert_eq!((texture.width, texture.height), (2, 2));
        assert_eq!(texture.pixels, pixels);
    }

    #[test]
    fn load_reports_failing_path() {
        let err = TextureImage::load(Path::new("/nonexistent/albedo.png"))
            .expect_err("loading a missing file must fail");
        assert!(err.to_string().contains("/nonexistent/albedo.png"));
    }
}
