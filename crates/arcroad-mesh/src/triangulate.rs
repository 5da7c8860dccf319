//! Indexed triangle meshes with per-vertex normals and texture coordinates.

use arcroad_curve::Vertex;
use arcroad_math::{Aabb3, Point2, Point3, Vector3};

/// GPU-ready triangle mesh with separate vertex attribute streams.
#[derive(Debug, Clone, Default)]
pub struct TriangleMesh {
    pub positions: Vec<Point3>,
    pub normals: Vec<Vector3>,
    pub indices: Vec<u32>,
    pub uvs: Vec<Point2>,
}

impl TriangleMesh {
    /// Mesh holding `vertices` and no triangles yet.
    pub fn from_vertices(vertices: &[Vertex]) -> Self {
        let mut mesh = Self::default();
        for v in vertices {
            mesh.push_vertex(v);
        }
        mesh
    }

    /// Number of vertices in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Append a vertex and return its index.
    pub fn push_vertex(&mut self, v: &Vertex) -> u32 {
        let index = self.positions.len() as u32;
        self.positions.push(v.position);
        self.normals.push(v.normal);
        self.uvs.push(v.tex_coord);
        index
    }

    pub fn push_triangle(&mut self, tri: [u32; 3]) {
        self.indices.extend_from_slice(&tri);
    }

    /// Index triplets, one per triangle.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Unnormalized normal of triangle `tri` from its winding.
    pub fn face_normal(&self, tri: [u32; 3]) -> Vector3 {
        let p0 = self.positions[tri[0] as usize];
        let p1 = self.positions[tri[1] as usize];
        let p2 = self.positions[tri[2] as usize];
        (p1 - p0).cross(p2 - p0)
    }

    /// Merge another mesh into this one, offsetting indices appropriately.
    pub fn merge(&mut self, other: &TriangleMesh) {
        let offset = self.positions.len() as u32;
        self.positions.extend_from_slice(&other.positions);
        self.normals.extend_from_slice(&other.normals);
        self.uvs.extend_from_slice(&other.uvs);
        self.indices
            .extend(other.indices.iter().map(|&i| i + offset));
    }

    /// Replace the vertex normals with area-weighted face normals.
    pub fn compute_normals(&mut self) {
        let n = self.positions.len();
        self.normals.clear();
        self.normals.resize(n, Vector3::ZERO);

        for tri in self.indices.chunks_exact(3) {
            let normal = self.face_normal([tri[0], tri[1], tri[2]]);
            for &i in tri {
                self.normals[i as usize] += normal;
            }
        }

        for n in &mut self.normals {
            let len = n.length();
            if len > 1e-12 {
                *n /= len;
            }
        }
    }

    /// Compute the axis-aligned bounding box of all positions.
    pub fn bounding_box(&self) -> Aabb3 {
        Aabb3::from_points(&self.positions).unwrap_or(Aabb3::new(Point3::ZERO, Point3::ZERO))
    }
}
