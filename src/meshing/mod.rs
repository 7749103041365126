pub mod grid;
pub mod normals;

pub use grid::build_grid;
pub use normals::estimate_normals;

use bevy::{
    prelude::*,
    render::{mesh::Indices, render_resource::PrimitiveTopology},
};

use crate::field::SampleField;

pub struct TerrainMeshData {
    pub vertices: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub triangles: Vec<UVec3>,
}

/// One full rebuild: grid vertices and indices from the field, then the
/// estimated normals for the same row-major order.
pub fn build_terrain_mesh(
    n: u32,
    m: u32,
    field: &SampleField,
    height_scale: f32,
) -> TerrainMeshData {
    let (vertices, triangles) = build_grid(n, m, field, height_scale);
    let normals = estimate_normals(&vertices, n, m);

    TerrainMeshData {
        vertices,
        normals,
        triangles,
    }
}

impl TerrainMeshData {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Hands the built grid to the renderer: position + normal per vertex,
    /// u32 index triples. The returned mesh replaces the previous asset
    /// wholesale on every rebuild.
    pub fn into_render_mesh(self) -> Mesh {
        let mut mesh = Mesh::new(PrimitiveTopology::TriangleList);

        mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, self.vertices);
        mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, self.normals);

        let indices = self
            .triangles
            .iter()
            .flat_map(|tri| tri.to_array())
            .collect::<Vec<u32>>();
        mesh.set_indices(Some(Indices::U32(indices)));

        mesh
    }
}
