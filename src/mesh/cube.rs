use wgpu::util::DeviceExt;

use super::vertex::MeshVertex;

/// Unit cube spanning [-1, 1] on every axis, 36 vertices, outward normals.
///
/// Substrate for the cubemap capture passes (drawn from its center with
/// culling disabled) and the skybox draw.
#[rustfmt::skip]
pub const CUBE_VERTICES: [MeshVertex; 36] = [
    // -Z face
    v([-1.0, -1.0, -1.0], [0.0, 0.0], [0.0, 0.0, -1.0]),
    v([ 1.0,  1.0, -1.0], [1.0, 1.0], [0.0, 0.0, -1.0]),
    v([ 1.0, -1.0, -1.0], [1.0, 0.0], [0.0, 0.0, -1.0]),
    v([ 1.0,  1.0, -1.0], [1.0, 1.0], [0.0, 0.0, -1.0]),
    v([-1.0, -1.0, -1.0], [0.0, 0.0], [0.0, 0.0, -1.0]),
    v([-1.0,  1.0, -1.0], [0.0, 1.0], [0.0, 0.0, -1.0]),
    // +Z face
    v([-1.0, -1.0,  1.0], [0.0, 0.0], [0.0, 0.0, 1.0]),
    v([ 1.0, -1.0,  1.0], [1.0, 0.0], [0.0, 0.0, 1.0]),
    v([ 1.0,  1.0,  1.0], [1.0, 1.0], [0.0, 0.0, 1.0]),
    v([ 1.0,  1.0,  1.0], [1.0, 1.0], [0.0, 0.0, 1.0]),
    v([-1.0,  1.0,  1.0], [0.0, 1.0], [0.0, 0.0, 1.0]),
    v([-1.0, -1.0,  1.0], [0.0, 0.0], [0.0, 0.0, 1.0]),
    // -X face
    v([-1.0,  1.0,  1.0], [1.0, 0.0], [-1.0, 0.0, 0.0]),
    v([-1.0,  1.0, -1.0], [1.0, 1.0], [-1.0, 0.0, 0.0]),
    v([-1.0, -1.0, -1.0], [0.0, 1.0], [-1.0, 0.0, 0.0]),
    v([-1.0, -1.0, -1.0], [0.0, 1.0], [-1.0, 0.0, 0.0]),
    v([-1.0, -1.0,  1.0], [0.0, 0.0], [-1.0, 0.0, 0.0]),
    v([-1.0,  1.0,  1.0], [1.0, 0.0], [-1.0, 0.0, 0.0]),
    // +X face
    v([ 1.0,  1.0,  1.0], [1.0, 0.0], [1.0, 0.0, 0.0]),
    v([ 1.0, -1.0, -1.0], [0.0, 1.0], [1.0, 0.0, 0.0]),
    v([ 1.0,  1.0, -1.0], [1.0, 1.0], [1.0, 0.0, 0.0]),
    v([ 1.0, -1.0, -1.0], [0.0, 1.0], [1.0, 0.0, 0.0]),
    v([ 1.0,  1.0,  1.0], [1.0, 0.0], [1.0, 0.0, 0.0]),
    v([ 1.0, -1.0,  1.0], [0.0, 0.0], [1.0, 0.0, 0.0]),
    // -Y face
    v([-1.0, -1.0, -1.0], [0.0, 1.0], [0.0, -1.0, 0.0]),
    v([ 1.0, -1.0, -1.0], [1.0, 1.0], [0.0, -1.0, 0.0]),
    v([ 1.0, -1.0,  1.0], [1.0, 0.0], [0.0, -1.0, 0.0]),
    v([ 1.0, -1.0,  1.0], [1.0, 0.0], [0.0, -1.0, 0.0]),
    v([-1.0, -1.0,  1.0], [0.0, 0.0], [0.0, -1.0, 0.0]),
    v([-1.0, -1.0, -1.0], [0.0, 1.0], [0.0, -1.0, 0.0]),
    // +Y face
    v([-1.0,  1.0, -1.0], [0.0, 1.0], [0.0, 1.0, 0.0]),
    v([ 1.0,  1.0,  1.0], [1.0, 0.0], [0.0, 1.0, 0.0]),
    v([ 1.0,  1.0, -1.0], [1.0, 1.0], [0.0, 1.0, 0.0]),
    v([ 1.0,  1.0,  1.0], [1.0, 0.0], [0.0, 1.0, 0.0]),
    v([-1.0,  1.0, -1.0], [0.0, 1.0], [0.0, 1.0, 0.0]),
    v([-1.0,  1.0,  1.0], [0.0, 0.0], [0.0, 1.0, 0.0]),
];

const fn v(position: [f32; 3], tex_coords: [f32; 2], normal: [f32; 3]) -> MeshVertex {
    MeshVertex {
        position,
        tex_coords,
        normal,
    }
}

pub struct CubeMesh {
    pub vertex_buffer: wgpu::Buffer,
    pub num_vertices: u32,
}

impl CubeMesh {
    pub fn new(device: &wgpu::Device) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Cube Vertex Buffer"),
            contents: bytemuck::cast_slice(&CUBE_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });

        Self {
            vertex_buffer,
            num_vertices: CUBE_VERTICES.len() as u32,
        }
    }

    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.draw(0..self.num_vertices, 0..1);
    }
}
