use std::f32::consts::PI;
use std::sync::Arc;

use approx::assert_relative_eq;
use glam::{Vec3, Vec4};

use super::*;
use crate::mesh::CubeMesh;

#[test]
fn capture_views_are_rotations() {
    for view in capture_views() {
        // A pure rotation (the eye is at the origin) has an orthonormal
        // upper 3x3 block and determinant 1.
        let m = glam::Mat3::from_mat4(view);
        assert_relative_eq!(m.determinant(), 1.0, epsilon = 1e-5);
        assert_relative_eq!(m.x_axis.length(), 1.0, epsilon = 1e-5);
        assert_relative_eq!(m.y_axis.length(), 1.0, epsilon = 1e-5);
        assert_relative_eq!(m.z_axis.length(), 1.0, epsilon = 1e-5);
        assert_relative_eq!(m.x_axis.dot(m.y_axis), 0.0, epsilon = 1e-5);
    }
}

#[test]
fn capture_views_face_their_axes() {
    let targets = [
        Vec3::X,
        -Vec3::X,
        Vec3::Y,
        -Vec3::Y,
        Vec3::Z,
        -Vec3::Z,
    ];
    for (view, target) in capture_views().iter().zip(targets) {
        // Right-handed view space looks down -Z, so the face direction must
        // land on the negative view-space z axis.
        let v = view.transform_vector3(target);
        assert_relative_eq!(v.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(v.y, 0.0, epsilon = 1e-5);
        assert_relative_eq!(v.z, -1.0, epsilon = 1e-5);
    }
}

#[test]
fn capture_view_proj_keeps_face_directions_centered() {
    for face in 0..6 {
        let targets = [
            Vec3::X,
            -Vec3::X,
            Vec3::Y,
            -Vec3::Y,
            Vec3::Z,
            -Vec3::Z,
        ];
        let clip = capture_view_proj(face) * Vec4::from((targets[face], 1.0));
        // The face direction projects to the center of its own face.
        assert_relative_eq!(clip.x / clip.w, 0.0, epsilon = 1e-4);
        assert_relative_eq!(clip.y / clip.w, 0.0, epsilon = 1e-4);
    }
}

#[test]
fn spherical_uv_maps_cardinal_directions() {
    // +X is the azimuth origin, offset to the middle of the u range.
    assert_relative_eq!(spherical_uv(Vec3::X)[0], 0.5, epsilon = 1e-6);
    assert_relative_eq!(spherical_uv(Vec3::X)[1], 0.5, epsilon = 1e-6);
    // +Z and -Z sit a quarter turn either side of +X.
    assert_relative_eq!(spherical_uv(Vec3::Z)[0], 0.75, epsilon = 1e-6);
    assert_relative_eq!(spherical_uv(-Vec3::Z)[0], 0.25, epsilon = 1e-6);
    // The poles collapse to the top and bottom rows.
    assert_relative_eq!(spherical_uv(Vec3::Y)[1], 0.0, epsilon = 1e-6);
    assert_relative_eq!(spherical_uv(-Vec3::Y)[1], 1.0, epsilon = 1e-6);
}

#[test]
fn spherical_uv_stays_in_unit_square() {
    for i in 0..64 {
        let t = i as f32 / 64.0;
        let dir = Vec3::new(
            (t * 11.0).sin(),
            (t * 7.0).cos() * 0.9,
            (t * 5.0).cos(),
        );
        if dir.length() < 1e-3 {
            continue;
        }
        let [u, v] = spherical_uv(dir);
        assert!((0.0..=1.0).contains(&u), "u out of range: {u}");
        assert!((0.0..=1.0).contains(&v), "v out of range: {v}");
    }
}

/// CPU replica of the convolution loops in irradiance.wgsl: for a uniform
/// environment of radiance `c`, the cosine-weighted sum normalized by
/// `pi / count` must give back `c`.
#[test]
fn convolution_normalization_preserves_uniform_radiance() {
    let c = 2.5_f32;
    let delta = DEFAULT_SAMPLE_DELTA;

    let mut sum = 0.0_f32;
    let mut count = 0u32;
    let mut phi = 0.0_f32;
    while phi < 2.0 * PI {
        let mut theta = 0.0_f32;
        while theta < 0.5 * PI {
            sum += c * theta.cos() * theta.sin();
            count += 1;
            theta += delta;
        }
        phi += delta;
    }
    let irradiance = PI * sum / count as f32;

    assert_relative_eq!(irradiance, c, max_relative = 0.02);
}

#[test]
fn synthetic_gradient_is_brighter_at_the_top() {
    let hdr = HdrImage::synthetic_gradient(64, 32);
    assert_eq!(hdr.pixels.len(), 64 * 32 * 4);

    let top = Vec3::new(hdr.pixels[0], hdr.pixels[1], hdr.pixels[2]);
    let bottom_row = ((32 - 1) * 64 * 4) as usize;
    let bottom = Vec3::new(
        hdr.pixels[bottom_row],
        hdr.pixels[bottom_row + 1],
        hdr.pixels[bottom_row + 2],
    );
    assert!(top.length() > bottom.length());
}

#[test]
fn synthetic_gradient_handles_degenerate_heights() {
    let single_row = HdrImage::synthetic_gradient(4, 1);
    assert_eq!(single_row.pixels.len(), 16);
    assert!(single_row.pixels.iter().all(|p| p.is_finite()));

    let empty = HdrImage::synthetic_gradient(4, 0);
    assert!(empty.pixels.is_empty());
}

#[test]
fn hdr_load_rejects_undecodable_file() {
    use assert_fs::prelude::*;

    let tmp = assert_fs::TempDir::new().unwrap();
    let file = tmp.child("broken.hdr");
    file.write_binary(b"definitely not radiance data").unwrap();

    let err = HdrImage::load(file.path()).expect_err("decoding garbage must fail");
    assert!(err.to_string().contains("broken.hdr"));
}

#[test]
fn hdr_load_reports_missing_file() {
    let err = HdrImage::load(std::path::Path::new("/nonexistent/env.hdr"))
        .expect_err("loading a missing file must fail");
    assert!(err.to_string().contains("/nonexistent/env.hdr"));
}

// --- GPU round trips ---------------------------------------------------
//
// These run the real passes on whatever adapter is available and read the
// results back. On machines with no usable adapter they skip instead of
// failing, so CI without a GPU stays green.

fn request_test_device() -> Option<(Arc<wgpu::Device>, Arc<wgpu::Queue>)> {
    let instance = wgpu::Instance::default();
    let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
        power_preference: wgpu::PowerPreference::LowPower,
        compatible_surface: None,
        force_fallback_adapter: false,
    }))?;
    let (device, queue) = pollster::block_on(adapter.request_device(
        &wgpu::DeviceDescriptor {
            label: Some("IBL Test Device"),
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::downlevel_defaults(),
            memory_hints: wgpu::MemoryHints::default(),
        },
        None,
    ))
    .ok()?;
    Some((Arc::new(device), Arc::new(queue)))
}

/// Reads one cubemap face back as RGBA f32. Faces in these tests are 32 px,
/// so each row is exactly 256 bytes and needs no padding.
fn read_face(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    cubemap: &Cubemap,
    face: u32,
) -> Vec<f32> {
    let resolution = cubemap.resolution;
    let bytes_per_row = resolution * 8;
    assert_eq!(bytes_per_row % wgpu::COPY_BYTES_PER_ROW_ALIGNMENT, 0);

    let buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Face Readback Buffer"),
        size: (bytes_per_row * resolution) as u64,
        usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
        mapped_at_creation: false,
    });

    let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
        label: Some("Face Readback Encoder"),
    });
    encoder.copy_texture_to_buffer(
        wgpu::ImageCopyTexture {
            texture: &cubemap.texture,
            mip_level: 0,
            origin: wgpu::Origin3d {
                x: 0,
                y: 0,
                z: face,
            },
            aspect: wgpu::TextureAspect::All,
        },
        wgpu::ImageCopyBuffer {
            buffer: &buffer,
            layout: wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(bytes_per_row),
                rows_per_image: Some(resolution),
            },
        },
        wgpu::Extent3d {
            width: resolution,
            height: resolution,
            depth_or_array_layers: 1,
        },
    );
    queue.submit(Some(encoder.finish()));

    let slice = buffer.slice(..);
    slice.map_async(wgpu::MapMode::Read, |result| {
        result.expect("readback map failed");
    });
    let _ = device.poll(wgpu::Maintain::Wait);

    let data = slice.get_mapped_range();
    let halves: &[half::f16] = bytemuck::cast_slice(&data[..]);
    let floats = halves.iter().map(|h| h.to_f32()).collect();
    drop(data);
    buffer.unmap();
    floats
}

#[test]
fn equirect_conversion_preserves_constant_radiance() {
    let Some((device, queue)) = request_test_device() else {
        eprintln!("no wgpu adapter available, skipping");
        return;
    };

    let c = [0.25_f32, 0.5, 0.75];
    let mut pixels = Vec::new();
    for _ in 0..8 * 4 {
        pixels.extend_from_slice(&[c[0], c[1], c[2], 1.0]);
    }
    let hdr = HdrImage::from_pixels(8, 4, pixels);

    let cube = CubeMesh::new(&device);
    let pass = EquirectPass::new(&device);
    let cubemap = pass
        .convert(&device, &queue, &cube, &hdr, 32)
        .expect("conversion failed");

    for face in 0..6 {
        let texels = read_face(&device, &queue, &cubemap, face);
        // Sample the face center; a constant source must come out constant.
        let center = ((16 * 32 + 16) * 4) as usize;
        assert_relative_eq!(texels[center], c[0], max_relative = 0.01);
        assert_relative_eq!(texels[center + 1], c[1], max_relative = 0.01);
        assert_relative_eq!(texels[center + 2], c[2], max_relative = 0.01);
    }
}

#[test]
fn irradiance_of_uniform_environment_is_uniform() {
    let Some((device, queue)) = request_test_device() else {
        eprintln!("no wgpu adapter available, skipping");
        return;
    };

    let c = [0.5_f32, 1.0, 1.5];
    let mut pixels = Vec::new();
    for _ in 0..8 * 4 {
        pixels.extend_from_slice(&[c[0], c[1], c[2], 1.0]);
    }
    let hdr = HdrImage::from_pixels(8, 4, pixels);

    let cube = CubeMesh::new(&device);
    let equirect = EquirectPass::new(&device);
    let environment = equirect
        .convert(&device, &queue, &cube, &hdr, 32)
        .expect("conversion failed");

    // A coarser sample step keeps the test quick; the normalization divides
    // the count back out, so the expected value is unchanged.
    let pass = IrradiancePass::with_sample_delta(&device, 0.1);
    let irradiance = pass
        .convolve(&device, &queue, &cube, &environment, 32)
        .expect("convolution failed");

    for face in 0..6 {
        let texels = read_face(&device, &queue, &irradiance, face);
        for corner in [(1u32, 1u32), (30, 1), (1, 30), (30, 30), (16, 16)] {
            let i = ((corner.1 * 32 + corner.0) * 4) as usize;
            assert_relative_eq!(texels[i], c[0], max_relative = 0.1);
            assert_relative_eq!(texels[i + 1], c[1], max_relative = 0.1);
            assert_relative_eq!(texels[i + 2], c[2], max_relative = 0.1);
        }
    }
}

#[test]
fn prepared_environment_builds_from_synthetic_source() {
    let Some((device, queue)) = request_test_device() else {
        eprintln!("no wgpu adapter available, skipping");
        return;
    };

    let cube = CubeMesh::new(&device);
    let prepared =
        PreparedEnvironment::build(&device, &queue, &cube, &EnvironmentSource::Synthetic)
            .expect("prepare failed");

    assert_eq!(prepared.environment.resolution, ENVIRONMENT_CUBEMAP_SIZE);
    assert_eq!(prepared.irradiance.resolution, IRRADIANCE_CUBEMAP_SIZE);
}
