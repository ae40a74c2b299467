use std::collections::HashMap;
use std::f32::consts::PI;
use std::sync::Arc;

use wgpu::util::DeviceExt;

use super::vertex::MeshVertex;

/// CPU-side geometry for a UV sphere, indexed as one triangle strip.
#[derive(Debug, Clone)]
pub struct SphereGeometry {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

/// Builds a unit UV sphere with its poles on the y axis.
///
/// Produces `(x_segments + 1) * (y_segments + 1)` vertices; the first and
/// last longitude columns share position and normal but carry different u
/// coordinates (the texture seam). Indices form one triangle-strip row per
/// latitude band and must be drawn with `PrimitiveTopology::TriangleStrip`.
///
/// Both segment counts must be non-zero; zero would yield a degenerate mesh.
pub fn generate_sphere(x_segments: u32, y_segments: u32) -> SphereGeometry {
    debug_assert!(x_segments > 0 && y_segments > 0);

    let mut vertices = Vec::with_capacity(((x_segments + 1) * (y_segments + 1)) as usize);
    for y in 0..=y_segments {
        for x in 0..=x_segments {
            let y_segment = y as f32 / y_segments as f32;
            let x_segment = x as f32 / x_segments as f32;

            let x_pos = (y_segment * PI).sin() * (x_segment * 2.0 * PI).cos();
            let y_pos = (y_segment * PI).cos();
            let z_pos = (y_segment * PI).sin() * (x_segment * 2.0 * PI).sin();

            vertices.push(MeshVertex {
                position: [x_pos, y_pos, z_pos],
                tex_coords: [x_segment, y_segment],
                // unit sphere: the position already is the outward normal
                normal: [x_pos, y_pos, z_pos],
            });
        }
    }

    // One strip row per latitude band: current vertex, then the vertex on
    // the band below, wrapping all the way around the longitude.
    let mut indices = Vec::with_capacity((y_segments * (x_segments + 1) * 2) as usize);
    for y in 0..y_segments {
        for x in 0..=x_segments {
            indices.push(y * (x_segments + 1) + x);
            indices.push((y + 1) * (x_segments + 1) + x);
        }
    }

    SphereGeometry { vertices, indices }
}

/// A sphere uploaded to the GPU, drawable as a triangle strip.
pub struct SphereMesh {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub num_indices: u32,
}

impl SphereMesh {
    pub fn new(device: &wgpu::Device, x_segments: u32, y_segments: u32) -> Self {
        let geometry = generate_sphere(x_segments, y_segments);

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Sphere Vertex Buffer"),
            contents: bytemuck::cast_slice(&geometry.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Sphere Index Buffer"),
            contents: bytemuck::cast_slice(&geometry.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            vertex_buffer,
            index_buffer,
            num_indices: geometry.indices.len() as u32,
        }
    }

    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        render_pass.draw_indexed(0..self.num_indices, 0, 0..1);
    }
}

/// Memoizes generated spheres per segment-count pair so repeated draws with
/// the same tessellation reuse one GPU mesh.
#[derive(Default)]
pub struct SphereCache {
    meshes: HashMap<(u32, u32), Arc<SphereMesh>>,
}

impl SphereCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_create(
        &mut self,
        device: &wgpu::Device,
        x_segments: u32,
        y_segments: u32,
    ) -> Arc<SphereMesh> {
        self.meshes
            .entry((x_segments, y_segments))
            .or_insert_with(|| Arc::new(SphereMesh::new(device, x_segments, y_segments)))
            .clone()
    }
}
