use anyhow::Result;
use wgpu::util::DeviceExt;

use super::capture::{capture_view_proj, Cubemap, CUBEMAP_FORMAT};
use crate::mesh::{CubeMesh, MeshVertex};

/// Angular step, in radians, of the nested hemisphere sampling loops.
///
/// Smaller steps raise the sample count and the preprocessing cost without
/// changing the expected mean; the cosine-weighted normalization divides the
/// count back out.
pub const DEFAULT_SAMPLE_DELTA: f32 = 0.025;

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct ConvolveUniform {
    view_proj: [[f32; 4]; 4],
    /// x = angular sample step; yzw unused.
    params: [f32; 4],
}

/// Convolves an environment cubemap into a diffuse irradiance cubemap.
///
/// Same six-face capture structure as the equirectangular conversion, but at
/// a much lower resolution since irradiance varies smoothly. Each texel
/// integrates incoming radiance over the hemisphere around the direction it
/// represents, cosine-weighted and normalized by `pi / sample_count`.
pub struct IrradiancePass {
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    sample_delta: f32,
}

impl IrradiancePass {
    pub fn new(device: &wgpu::Device) -> Self {
        Self::with_sample_delta(device, DEFAULT_SAMPLE_DELTA)
    }

    pub fn with_sample_delta(device: &wgpu::Device, sample_delta: f32) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Irradiance Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../shaders/irradiance.wgsl").into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Irradiance Bind Group Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::Cube,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Irradiance Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Irradiance Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[MeshVertex::desc()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: CUBEMAP_FORMAT,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        Self {
            pipeline,
            bind_group_layout,
            sample_delta,
        }
    }

    /// Produces the irradiance cubemap for `environment` at `resolution` per
    /// face. Runs once per environment, not per frame.
    pub fn convolve(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        cube: &CubeMesh,
        environment: &Cubemap,
        resolution: u32,
    ) -> Result<Cubemap> {
        let irradiance = Cubemap::new(device, resolution, "Irradiance Cubemap");

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Irradiance Convolve Encoder"),
        });

        for face in 0..6 {
            let uniform = ConvolveUniform {
                view_proj: capture_view_proj(face).to_cols_array_2d(),
                params: [self.sample_delta, 0.0, 0.0, 0.0],
            };
            let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Irradiance Capture Uniform"),
                contents: bytemuck::cast_slice(&[uniform]),
                usage: wgpu::BufferUsages::UNIFORM,
            });

            let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Irradiance Bind Group"),
                layout: &self.bind_group_layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: uniform_buffer.as_entire_binding(),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::TextureView(&environment.view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 2,
                        resource: wgpu::BindingResource::Sampler(&environment.sampler),
                    },
                ],
            });

            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Irradiance Face Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &irradiance.face_views[face],
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_pipeline(&self.pipeline);
            render_pass.set_bind_group(0, &bind_group, &[]);
            cube.draw(&mut render_pass);
        }

        queue.submit(Some(encoder.finish()));
        Ok(irradiance)
    }
}
