use glam::{Mat4, Vec3};

/// Per-face pixel format for capture targets. Radiance needs headroom, so
/// faces store half-float channels.
pub const CUBEMAP_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba16Float;

/// Shared 90 degree square-aspect projection for all six capture renders.
pub fn capture_projection() -> Mat4 {
    Mat4::perspective_rh(90.0_f32.to_radians(), 1.0, 0.1, 10.0)
}

/// The six capture orientations, indexed in cubemap face order
/// +X, -X, +Y, -Y, +Z, -Z, all placed at the cube's center.
///
/// Both the equirectangular conversion and the irradiance convolution consume
/// this exact set; sharing it keeps face orientation consistent between the
/// environment map and its convolution. The up-vectors match the original
/// captures (Y flipped for the horizontal faces), so none is parallel to its
/// view direction.
pub fn capture_views() -> [Mat4; 6] {
    let eye = Vec3::ZERO;
    [
        Mat4::look_at_rh(eye, Vec3::X, -Vec3::Y),
        Mat4::look_at_rh(eye, -Vec3::X, -Vec3::Y),
        Mat4::look_at_rh(eye, Vec3::Y, Vec3::Z),
        Mat4::look_at_rh(eye, -Vec3::Y, -Vec3::Z),
        Mat4::look_at_rh(eye, Vec3::Z, -Vec3::Y),
        Mat4::look_at_rh(eye, -Vec3::Z, -Vec3::Y),
    ]
}

/// View-projection matrix for one capture face.
pub fn capture_view_proj(face: usize) -> Mat4 {
    capture_projection() * capture_views()[face]
}

/// An HDR cubemap plus the views needed to render into and sample from it.
pub struct Cubemap {
    pub texture: wgpu::Texture,
    /// Cube-dimension view for sampling.
    pub view: wgpu::TextureView,
    /// One 2D view per face, render-pass attachment targets.
    pub face_views: [wgpu::TextureView; 6],
    pub sampler: wgpu::Sampler,
    pub resolution: u32,
}

impl Cubemap {
    pub fn new(device: &wgpu::Device, resolution: u32, label: &str) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width: resolution,
                height: resolution,
                depth_or_array_layers: 6,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: CUBEMAP_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT
                | wgpu::TextureUsages::TEXTURE_BINDING
                | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });

        let view = texture.create_view(&wgpu::TextureViewDescriptor {
            label: Some(label),
            dimension: Some(wgpu::TextureViewDimension::Cube),
            ..Default::default()
        });

        let face_views = std::array::from_fn(|face| {
            texture.create_view(&wgpu::TextureViewDescriptor {
                label: Some(label),
                dimension: Some(wgpu::TextureViewDimension::D2),
                base_array_layer: face as u32,
                array_layer_count: Some(1),
                ..Default::default()
            })
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        Self {
            texture,
            view,
            face_views,
            sampler,
            resolution,
        }
    }
}
