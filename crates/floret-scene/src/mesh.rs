//! Polygon mesh data for sheet objects.

use floret_math::{Aabb, Point3};

/// Polygon mesh data: the representation of a sheet.
///
/// Vertices are 3D positions; edges are unordered pairs of vertex indices;
/// faces are vertex-index loops. No adjacency structure is stored; the
/// queries the pipeline needs are computed on demand.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    /// Vertex positions.
    pub vertices: Vec<Point3>,
    /// Edges as unordered pairs of vertex indices.
    pub edges: Vec<[u32; 2]>,
    /// Faces as vertex-index loops.
    pub faces: Vec<Vec<u32>>,
}

impl MeshData {
    /// An axis-aligned square sheet of the given side length, centered at
    /// the origin in the Z = 0 plane, as a single quad face.
    pub fn quad(side: f64) -> Self {
        let h = side / 2.0;
        Self {
            vertices: vec![
                Point3::new(-h, -h, 0.0),
                Point3::new(h, -h, 0.0),
                Point3::new(h, h, 0.0),
                Point3::new(-h, h, 0.0),
            ],
            edges: vec![[0, 1], [1, 2], [2, 3], [3, 0]],
            faces: vec![vec![0, 1, 2, 3]],
        }
    }

    /// Endpoint positions of edge `index`, or `None` if the edge or either
    /// of its vertex indices is out of range.
    pub fn edge_endpoints(&self, index: usize) -> Option<(Point3, Point3)> {
        let [a, b] = *self.edges.get(index)?;
        Some((
            *self.vertices.get(a as usize)?,
            *self.vertices.get(b as usize)?,
        ))
    }

    /// Number of faces whose boundary loop contains edge `index`.
    ///
    /// An edge belongs to a face when its two vertex indices appear as a
    /// consecutive (wrapping) pair in the face loop. Boundary edges of a
    /// sheet have exactly one linked face, interior edges two.
    pub fn edge_face_count(&self, index: usize) -> usize {
        let Some(&[a, b]) = self.edges.get(index) else {
            return 0;
        };
        self.faces
            .iter()
            .filter(|face| {
                face.len() >= 2
                    && face.iter().enumerate().any(|(i, &v)| {
                        let next = face[(i + 1) % face.len()];
                        (v == a && next == b) || (v == b && next == a)
                    })
            })
            .count()
    }

    /// Bounding box of the vertices, or `None` for an empty mesh.
    pub fn bounds(&self) -> Option<Aabb> {
        Aabb::from_points(self.vertices.iter())
    }
}
