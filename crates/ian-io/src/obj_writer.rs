//! OBJ text output.
//!
//! Vertices are written as three parallel blocks (`v`, `vt`, `vn`) so every
//! face corner uses the same index for position, UV and normal.

use std::fmt;

use ian_core::mesh::MeshData;

use crate::error::Result;
use crate::traits::Writer;

/// OBJ format writer.
///
/// ```
/// use ian_core::mesh::{Face, MeshData, Vertex};
/// use ian_io::ObjWriter;
///
/// let mut mesh = MeshData::new();
/// mesh.add_vertex(Vertex::new([1.0, 2.0, 3.0], [0.0, 0.0, 1.0], [0.5, 0.5]));
/// mesh.add_face(Face::new([0, 0, 0]));
///
/// let text = ObjWriter::from_mesh(&mesh, Some("test")).to_obj_string();
/// assert_eq!(text, "o test\nv 1 -2 3\nvt 0.5 0.5\nvn 0 0 1\nf 1/1/1 1/1/1 1/1/1");
/// ```
#[derive(Debug, Clone)]
pub struct ObjWriter {
    name: Option<String>,
    mesh: MeshData,
    flip_y: bool,
}

impl Default for ObjWriter {
    fn default() -> Self {
        Self {
            name: None,
            mesh: MeshData::new(),
            flip_y: true,
        }
    }
}

impl ObjWriter {
    pub fn from_mesh(mesh: &MeshData, name: Option<&str>) -> Self {
        Self {
            name: name.map(str::to_owned),
            mesh: mesh.clone(),
            ..Self::default()
        }
    }

    /// Negate Y on output. On by default: the game's up axis points the
    /// other way from what modelling tools expect.
    pub fn with_flip_y(mut self, flip_y: bool) -> Self {
        self.flip_y = flip_y;
        self
    }

    pub fn flip_y(&self) -> bool {
        self.flip_y
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Render the mesh. Lines are separated by `\n`, with no newline after
    /// the last one. The `o` line is left out for unnamed meshes.
    pub fn to_obj_string(&self) -> String {
        let vertices = self.mesh.vertices();
        let faces = self.mesh.faces();
        let mut lines = Vec::with_capacity(1 + vertices.len() * 3 + faces.len());

        if let Some(name) = &self.name {
            lines.push(format!("o {}", name));
        }

        let y_sign = if self.flip_y { -1.0 } else { 1.0 };
        for v in vertices {
            let [x, y, z] = v.position;
            lines.push(format!("v {} {} {}", Num(x), Num(y * y_sign), Num(z)));
        }
        for v in vertices {
            lines.push(format!("vt {} {}", Num(v.u), Num(v.v)));
        }
        for v in vertices {
            let [nx, ny, nz] = v.normal;
            lines.push(format!("vn {} {} {}", Num(nx), Num(ny), Num(nz)));
        }
        for face in faces {
            let [a, b, c] = face.indices.map(|i| u64::from(i) + 1);
            lines.push(format!("f {a}/{a}/{a} {b}/{b}/{b} {c}/{c}/{c}"));
        }

        tracing::debug!(
            vertices = vertices.len(),
            faces = faces.len(),
            flip_y = self.flip_y,
            "formatted obj"
        );
        lines.join("\n")
    }
}

impl Writer for ObjWriter {
    fn new() -> Self {
        Self::default()
    }

    fn add_mesh(&mut self, mesh: &MeshData, name: Option<&str>) -> Result<()> {
        self.mesh = mesh.clone();
        self.name = name.map(str::to_owned);
        Ok(())
    }

    fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(self.to_obj_string().into_bytes())
    }

    fn vertex_count(&self) -> usize {
        self.mesh.num_vertices()
    }

    fn face_count(&self) -> usize {
        self.mesh.num_faces()
    }
}

/// Shortest representation that parses back to the same `f32`. Integral
/// values have no fraction and negative zero prints as `0`.
struct Num(f32);

impl fmt::Display for Num {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0.0 {
            f.write_str("0")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// Formats a mesh as OBJ text with default settings.
pub fn write_obj_string(mesh: &MeshData, name: &str) -> String {
    ObjWriter::from_mesh(mesh, Some(name)).to_obj_string()
}
