//! Geometry store: meshes own their vertices, triangles refer to them by index.

use crate::point2d::Point2D;
use crate::point3d::Point3D;
use crate::triangle::Triangle;

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("mesh {mesh} has {count} indices, which is not a multiple of 3")]
    PartialTriangle { mesh: usize, count: usize },
    #[error("mesh {mesh} references vertex {index} but only has {len} vertices")]
    IndexOutOfRange { mesh: usize, index: u32, len: usize },
    #[error("model contains no triangles")]
    Empty,
    #[error("model has {0} triangles, more than a frame can address")]
    TooManyTriangles(usize),
}

#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Vertex {
    pub position: Point3D,
    pub normal: Point3D,
    pub tex_coord: Point2D,
}

impl Vertex {
    pub fn new(position: Point3D, normal: Point3D, tex_coord: Point2D) -> Self {
        Self { position, normal, tex_coord }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    /// Consecutive triples form triangles, in draw order.
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// A loaded model plus the triangle list rendered from it every frame.
///
/// Triangles are validated once here, so per-frame lookups never go out of bounds.
#[derive(Debug, Clone)]
pub struct Model {
    meshes: Vec<Mesh>,
    triangles: Vec<Triangle>,
}

impl Model {
    pub fn new(meshes: Vec<Mesh>) -> Result<Self, ModelError> {
        let mut triangles = Vec::with_capacity(meshes.iter().map(Mesh::triangle_count).sum());
        for (mesh_index, mesh) in meshes.iter().enumerate() {
            if mesh.indices.len() % 3 != 0 {
                return Err(ModelError::PartialTriangle { mesh: mesh_index, count: mesh.indices.len() });
            }
            if let Some(&index) = mesh.indices.iter().find(|&&i| i as usize >= mesh.vertices.len()) {
                return Err(ModelError::IndexOutOfRange { mesh: mesh_index, index, len: mesh.vertices.len() });
            }
            triangles.extend(
                mesh.indices
                    .chunks_exact(3)
                    .map(|idx| Triangle { mesh: mesh_index as u32, vertices: [idx[0], idx[1], idx[2]] }),
            );
        }
        if triangles.is_empty() {
            return Err(ModelError::Empty);
        }
        // Owner ids are stored as i32 with -1 reserved for background
        if i32::try_from(triangles.len()).is_err() {
            return Err(ModelError::TooManyTriangles(triangles.len()));
        }
        Ok(Self { meshes, triangles })
    }

    pub fn meshes(&self) -> &[Mesh] {
        &self.meshes
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn vertex_count(&self) -> usize {
        self.meshes.iter().map(|m| m.vertices.len()).sum()
    }

    #[inline]
    pub fn triangle_vertices(&self, triangle: &Triangle) -> [&Vertex; 3] {
        let vertices = &self.meshes[triangle.mesh as usize].vertices;
        triangle.vertices.map(|i| &vertices[i as usize])
    }

    #[inline]
    pub fn triangle_positions(&self, triangle: &Triangle) -> [Point3D; 3] {
        self.triangle_vertices(triangle).map(|v| v.position)
    }

    #[inline]
    pub fn triangle_tex_coords(&self, triangle: &Triangle) -> [Point2D; 3] {
        self.triangle_vertices(triangle).map(|v| v.tex_coord)
    }
}
