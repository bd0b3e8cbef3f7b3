use crate::layout::{DEFAULT_FACE_UNKNOWN1, DEFAULT_FACE_UNKNOWN2};

/// A triangle referencing three vertices.
///
/// `indices` are in display winding order. The file stores them as
/// `(i0, i2, i1)`; the decoder and encoder perform the swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Face {
    /// Opaque per-face value, usually 3.
    pub unknown1: u16,
    /// Opaque per-face value, usually 3 or 7.
    pub unknown2: u16,
    pub indices: [u32; 3],
}

impl Face {
    /// A face carrying the unknown values found in most shipped files.
    pub fn new(indices: [u32; 3]) -> Self {
        Self {
            unknown1: DEFAULT_FACE_UNKNOWN1,
            unknown2: DEFAULT_FACE_UNKNOWN2,
            indices,
        }
    }

    /// Indices in the order they are stored on disk.
    pub fn stored_indices(&self) -> [u32; 3] {
        let [a, b, c] = self.indices;
        [a, c, b]
    }

    /// Builds the display order from indices read off disk.
    pub fn from_stored(unknown1: u16, unknown2: u16, stored: [u32; 3]) -> Self {
        let [a, b, c] = stored;
        Self {
            unknown1,
            unknown2,
            indices: [a, c, b],
        }
    }
}

/// A vertex with position, normal and texture coordinate.
///
/// `v` follows the interchange convention (origin at the bottom of the
/// image). The file stores `1 - v`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub u: f32,
    pub v: f32,
}

impl Vertex {
    pub fn new(position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            u: uv[0],
            v: uv[1],
        }
    }

    pub fn uv(&self) -> [f32; 2] {
        [self.u, self.v]
    }
}

/// Inverts a V coordinate between the file and interchange conventions.
/// The operation is its own inverse.
#[inline]
pub fn flip_v(v: f32) -> f32 {
    1.0 - v
}

/// Faces and vertices of one mesh.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MeshData {
    faces: Vec<Face>,
    vertices: Vec<Vertex>,
}

impl MeshData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(faces: Vec<Face>, vertices: Vec<Vertex>) -> Self {
        Self { faces, vertices }
    }

    pub fn add_face(&mut self, face: Face) {
        self.faces.push(face);
    }

    pub fn add_vertex(&mut self, vertex: Vertex) -> u32 {
        self.vertices.push(vertex);
        (self.vertices.len() - 1) as u32
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty() && self.vertices.is_empty()
    }

    pub fn into_parts(self) -> (Vec<Face>, Vec<Vertex>) {
        (self.faces, self.vertices)
    }

    /// Returns the first face index that does not reference a vertex.
    pub fn find_invalid_index(&self) -> Option<(usize, u32)> {
        let n = self.vertices.len();
        self.faces.iter().enumerate().find_map(|(i, f)| {
            f.indices
                .iter()
                .find(|&&idx| idx as usize >= n)
                .map(|&idx| (i, idx))
        })
    }
}
