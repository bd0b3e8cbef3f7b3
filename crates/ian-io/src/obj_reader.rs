//! OBJ format reader.
//!
//! Provides both a struct-based API (`ObjReader`) and a convenience function
//! (`parse_obj`).

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use ian_core::mesh::{Face, MeshData, Vertex};
use ian_core::status::IanError;

use crate::error::Result;
use crate::traits::{NamedMesh, Reader};

/// OBJ format reader.
///
/// Every distinct `v/vt/vn` corner becomes one output vertex. Polygons are
/// split into triangle fans.
#[derive(Debug, Clone)]
pub struct ObjReader {
    source: String,
    flip_y: bool,
}

impl ObjReader {
    /// Read an OBJ file into memory.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let bytes = fs::read(path)?;
        Ok(Self::from_string(String::from_utf8(bytes)?))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(Self::from_str(std::str::from_utf8(bytes)?))
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(text: &str) -> Self {
        Self::from_string(text.to_owned())
    }

    fn from_string(source: String) -> Self {
        Self {
            source,
            flip_y: true,
        }
    }

    /// Negate Y while reading, undoing the flip applied by [`ObjWriter`].
    /// On by default.
    ///
    /// [`ObjWriter`]: crate::obj_writer::ObjWriter
    pub fn with_flip_y(mut self, flip_y: bool) -> Self {
        self.flip_y = flip_y;
        self
    }

    pub fn parse(&self) -> std::result::Result<NamedMesh, IanError> {
        ObjParser::new(self.flip_y).parse(&self.source)
    }
}

impl Reader for ObjReader {
    fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        ObjReader::open(path)
    }

    fn read_mesh(&mut self) -> Result<NamedMesh> {
        Ok(self.parse()?)
    }
}

/// Parses OBJ text with default settings.
pub fn parse_obj(text: &str) -> std::result::Result<NamedMesh, IanError> {
    ObjParser::new(true).parse(text)
}

struct ObjParser<'a> {
    flip_y: bool,
    name: Option<String>,
    positions: Vec<[f32; 3]>,
    normals: Vec<[f32; 3]>,
    uvs: Vec<[f32; 2]>,
    /// Corner string -> output vertex index.
    corners: HashMap<&'a str, u32>,
    mesh: MeshData,
}

impl<'a> ObjParser<'a> {
    fn new(flip_y: bool) -> Self {
        Self {
            flip_y,
            name: None,
            positions: Vec::new(),
            normals: Vec::new(),
            uvs: Vec::new(),
            corners: HashMap::new(),
            mesh: MeshData::new(),
        }
    }

    fn parse(mut self, text: &'a str) -> std::result::Result<NamedMesh, IanError> {
        for (i, raw) in text.lines().enumerate() {
            let line_no = i + 1;
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut tokens = line.split_whitespace();
            let Some(keyword) = tokens.next() else {
                continue;
            };

            match keyword.to_ascii_lowercase().as_str() {
                "o" => {
                    let name = line[keyword.len()..].trim();
                    if self.name.is_none() && !name.is_empty() {
                        self.name = Some(name.to_owned());
                    }
                }
                "v" => {
                    let [x, y, z] = parse_floats::<3>(&mut tokens, line_no, "v")?;
                    let y = if self.flip_y { -y } else { y };
                    self.positions.push([x, y, z]);
                }
                "vn" => {
                    let normal = parse_floats::<3>(&mut tokens, line_no, "vn")?;
                    self.normals.push(normal);
                }
                "vt" => {
                    let u = parse_float(tokens.next(), line_no, "vt")?;
                    let v = match tokens.next() {
                        Some(token) => parse_float(Some(token), line_no, "vt")?,
                        None => 0.0,
                    };
                    self.uvs.push([u, v]);
                }
                "f" => {
                    let corners = tokens
                        .map(|corner| self.intern_corner(corner, line_no))
                        .collect::<std::result::Result<Vec<u32>, IanError>>()?;
                    if corners.len() < 3 {
                        return Err(IanError::malformed(
                            line_no,
                            format!("face needs at least 3 corners, found {}", corners.len()),
                        ));
                    }
                    // Fan around the first corner.
                    for k in 1..corners.len() - 1 {
                        self.mesh
                            .add_face(Face::new([corners[0], corners[k], corners[k + 1]]));
                    }
                }
                other => tracing::trace!(line = line_no, directive = other, "ignored obj directive"),
            }
        }

        tracing::debug!(
            name = ?self.name,
            positions = self.positions.len(),
            vertices = self.mesh.num_vertices(),
            faces = self.mesh.num_faces(),
            "parsed obj"
        );
        Ok(NamedMesh::new(self.name, self.mesh))
    }

    fn intern_corner(&mut self, corner: &'a str, line_no: usize) -> std::result::Result<u32, IanError> {
        if let Some(&index) = self.corners.get(corner) {
            return Ok(index);
        }

        let mut parts = corner.split('/');
        let position = match parts.next() {
            Some(p) if !p.is_empty() => self.positions[resolve(p, self.positions.len(), line_no, "position")?],
            _ => {
                return Err(IanError::malformed(
                    line_no,
                    format!("face corner {:?} has no position index", corner),
                ))
            }
        };
        let uv = match parts.next() {
            Some(t) if !t.is_empty() => self.uvs[resolve(t, self.uvs.len(), line_no, "texture coordinate")?],
            _ => [0.0, 0.0],
        };
        let normal = match parts.next() {
            Some(n) if !n.is_empty() => self.normals[resolve(n, self.normals.len(), line_no, "normal")?],
            _ => [0.0, 0.0, 0.0],
        };

        let index = self.mesh.add_vertex(Vertex::new(position, normal, uv));
        self.corners.insert(corner, index);
        Ok(index)
    }
}

/// Converts a 1-based OBJ index into a checked 0-based one.
fn resolve(token: &str, len: usize, line_no: usize, what: &str) -> std::result::Result<usize, IanError> {
    let index = usize::from_str(token).map_err(|_| {
        IanError::malformed(line_no, format!("invalid {} index {:?}", what, token))
    })?;
    if index == 0 || index > len {
        return Err(IanError::malformed(
            line_no,
            format!("{} index {} is out of range, {} defined", what, index, len),
        ));
    }
    Ok(index - 1)
}

fn parse_float(token: Option<&str>, line_no: usize, directive: &str) -> std::result::Result<f32, IanError> {
    let token = token.ok_or_else(|| {
        IanError::malformed(line_no, format!("missing component in {} directive", directive))
    })?;
    f32::from_str(token).map_err(|_| {
        IanError::malformed(line_no, format!("invalid number {:?} in {} directive", token, directive))
    })
}

fn parse_floats<'t, const N: usize>(
    tokens: &mut impl Iterator<Item = &'t str>,
    line_no: usize,
    directive: &str,
) -> std::result::Result<[f32; N], IanError> {
    let mut out = [0.0f32; N];
    for value in out.iter_mut() {
        *value = parse_float(tokens.next(), line_no, directive)?;
    }
    Ok(out)
}
