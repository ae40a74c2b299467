mod cube;
mod sphere;
mod vertex;

pub use cube::{CubeMesh, CUBE_VERTICES};
pub use sphere::{generate_sphere, SphereCache, SphereGeometry, SphereMesh};
pub use vertex::MeshVertex;

#[cfg(test)]
mod tests;
