use serde::{Deserialize, Serialize};

/// A closed polyhedral mesh: vertex positions and polygonal faces indexing
/// into them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    /// Vertex positions (x, y, z).
    pub vertices: Vec<[f64; 3]>,
    /// Faces as vertex index loops.
    pub faces: Vec<Vec<usize>>,
}

impl Mesh {
    pub fn with_capacity(vertices: usize, faces: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            faces: Vec::with_capacity(faces),
        }
    }

    /// Append a horizontal ring at height `z` and return the index of its
    /// first vertex.
    pub fn push_ring(&mut self, ring: &[[f64; 2]], z: f64) -> usize {
        let start = self.vertices.len();
        self.vertices
            .extend(ring.iter().map(|&[x, y]| [x, y, z]));
        start
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Flat `x0 y0 x1 y1 ...` list of the first face (the bottom cap).
    /// Indices with no matching vertex are skipped.
    pub fn bottom_face_coords(&self) -> Vec<f64> {
        self.faces
            .first()
            .map(|face| {
                face.iter()
                    .filter_map(|&i| self.vertices.get(i))
                    .flat_map(|v| [v[0], v[1]])
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Faces in the flat VTK cell layout: each face as its vertex count
    /// followed by its indices.
    pub fn to_cell_array(&self) -> Vec<usize> {
        let mut cells = Vec::with_capacity(self.faces.iter().map(|f| f.len() + 1).sum());
        for face in &self.faces {
            cells.push(face.len());
            cells.extend_from_slice(face);
        }
        cells
    }
}
