use super::*;
use approx::assert_relative_eq;
use glam::Vec3;

#[test]
fn test_mesh_vertex_size() {
    assert_eq!(
        std::mem::size_of::<MeshVertex>(),
        32, // 3 * 4 (position) + 2 * 4 (tex_coords) + 3 * 4 (normal)
        "MeshVertex size should be 32 bytes"
    );
}

#[test]
fn test_sphere_vertex_count() {
    let sphere = generate_sphere(4, 4);
    assert_eq!(sphere.vertices.len(), 25, "(4+1) * (4+1) vertices");
}

#[test]
fn test_sphere_normals_are_unit_length() {
    let sphere = generate_sphere(16, 16);
    for vertex in &sphere.vertices {
        let length = Vec3::from_array(vertex.normal).length();
        assert_relative_eq!(length, 1.0, epsilon = 1e-5);
    }
}

#[test]
fn test_sphere_strip_index_count() {
    // Two indices per longitude step, one strip row per latitude band.
    for (x_segments, y_segments) in [(4, 4), (8, 6), (64, 64)] {
        let sphere = generate_sphere(x_segments, y_segments);
        assert_eq!(
            sphere.indices.len() as u32,
            y_segments * (x_segments + 1) * 2
        );
    }
}

#[test]
fn test_sphere_indices_in_bounds() {
    let sphere = generate_sphere(8, 8);
    let vertex_count = sphere.vertices.len() as u32;
    assert!(sphere.indices.iter().all(|&i| i < vertex_count));
}

#[test]
fn test_sphere_poles() {
    let sphere = generate_sphere(4, 4);
    // First row sits on the +Y pole, last row on the -Y pole.
    for vertex in &sphere.vertices[..5] {
        assert_relative_eq!(vertex.position[1], 1.0, epsilon = 1e-6);
    }
    for vertex in &sphere.vertices[20..] {
        assert_relative_eq!(vertex.position[1], -1.0, epsilon = 1e-6);
    }
}

#[test]
fn test_sphere_seam_shares_position_but_not_u() {
    let x_segments = 8;
    let sphere = generate_sphere(x_segments, 8);

    // Middle latitude band: column 0 and the wrapped final column.
    let row = 4 * (x_segments + 1) as usize;
    let first = sphere.vertices[row];
    let last = sphere.vertices[row + x_segments as usize];

    for axis in 0..3 {
        assert_relative_eq!(first.position[axis], last.position[axis], epsilon = 1e-5);
        assert_relative_eq!(first.normal[axis], last.normal[axis], epsilon = 1e-5);
    }
    assert_relative_eq!(first.tex_coords[0], 0.0, epsilon = 1e-6);
    assert_relative_eq!(last.tex_coords[0], 1.0, epsilon = 1e-6);
}

#[test]
fn test_cube_vertex_count() {
    assert_eq!(CUBE_VERTICES.len(), 36, "12 triangles, 36 vertices");
}

#[test]
fn test_cube_normals_point_outward() {
    for vertex in &CUBE_VERTICES {
        let position = Vec3::from_array(vertex.position);
        let normal = Vec3::from_array(vertex.normal);
        assert!(
            position.dot(normal) > 0.0,
            "normal {normal:?} does not face outward at {position:?}"
        );
    }
}

#[test]
fn test_cube_faces_are_planar() {
    // Every group of 6 vertices shares one normal and a constant coordinate
    // along that normal.
    for face in CUBE_VERTICES.chunks(6) {
        let normal = face[0].normal;
        for vertex in face {
            assert_eq!(vertex.normal, normal);
            let projected = Vec3::from_array(vertex.position).dot(Vec3::from_array(normal));
            assert_relative_eq!(projected, 1.0, epsilon = 1e-6);
        }
    }
}
