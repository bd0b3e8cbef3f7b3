use crate::encoder_buffer::EncoderBuffer;
use crate::header::FileHeader;
use crate::layout::{
    faces_offset_for_name, vertices_offset_for, FACE_INDEX_PADDING, FACE_RECORD_SIZE,
    VERTEX_RECORD_SIZE,
};
use crate::mesh::{flip_v, MeshData, Vertex};
use crate::status::{FieldContext, IanError, Status};

/// Encoder settings.
#[derive(Debug, Clone, Default)]
pub struct EncoderOptions {
    file_id: Option<u32>,
}

impl EncoderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fixes the 32-bit id written at offset 12. A random id is used
    /// otherwise.
    pub fn with_file_id(mut self, file_id: u32) -> Self {
        self.file_id = Some(file_id);
        self
    }

    pub fn file_id(&self) -> Option<u32> {
        self.file_id
    }
}

/// Writes a mesh in the .ian layout.
///
/// The output reproduces the header copies, padding bytes and fixed values
/// of shipped game files. The end data block is not
/// reconstructed: its count and offset stay zero, so files are close to,
/// not byte-identical with, shipped assets.
#[derive(Debug, Clone, Default)]
pub struct MeshEncoder {
    options: EncoderOptions,
}

impl MeshEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: EncoderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &EncoderOptions {
        &self.options
    }

    /// Checks that the mesh and name can be represented in the format.
    pub fn validate(&self, mesh: &MeshData, name: &str) -> Status {
        if !name.is_ascii() || name.contains('\0') {
            return Err(IanError::InvalidMesh(format!(
                "name must be ASCII without NUL bytes: {:?}",
                name
            )));
        }
        if let Some((face, index)) = mesh.find_invalid_index() {
            return Err(IanError::InvalidMesh(format!(
                "face {} references vertex {} but the mesh has {} vertices",
                face,
                index,
                mesh.num_vertices()
            )));
        }
        Ok(())
    }

    /// Computes the header for `mesh`: offsets follow directly from the
    /// name length and the face count.
    pub fn build_header(&self, mesh: &MeshData, name: &str) -> Result<FileHeader, IanError> {
        let faces_offset = faces_offset_for_name(name.len());
        let vertices_offset = mesh
            .num_faces()
            .checked_mul(FACE_RECORD_SIZE)
            .and_then(|size| size.checked_add(faces_offset))
            .ok_or_else(|| IanError::InvalidMesh("too many faces".into()))?;
        debug_assert_eq!(vertices_offset, vertices_offset_for(faces_offset, mesh.num_faces()));

        let file_id = self.options.file_id.unwrap_or_else(rand::random);
        let mut header = FileHeader::new(name, file_id);
        header.face_count = to_u32(mesh.num_faces(), "face count")?;
        header.vertex_count = to_u32(mesh.num_vertices(), "vertex count")?;
        header.faces_offset = to_u32(faces_offset, "faces offset")?;
        header.vertices_offset = to_u32(vertices_offset, "vertices offset")?;
        Ok(header)
    }

    /// Total size of the encoded file.
    pub fn encoded_size(&self, mesh: &MeshData, name: &str) -> Result<usize, IanError> {
        let header_size = faces_offset_for_name(name.len());
        mesh.num_faces()
            .checked_mul(FACE_RECORD_SIZE)
            .and_then(|faces| {
                mesh.num_vertices()
                    .checked_mul(VERTEX_RECORD_SIZE)
                    .and_then(|vertices| faces.checked_add(vertices))
            })
            .and_then(|body| body.checked_add(header_size))
            .ok_or_else(|| IanError::InvalidMesh("mesh is too large".into()))
    }

    pub fn encode(&self, mesh: &MeshData, name: &str) -> Result<EncoderBuffer, IanError> {
        self.validate(mesh, name)?;
        let header = self.build_header(mesh, name)?;
        let size = self.encoded_size(mesh, name)?;
        // Offsets are stored as u32, so the file must stay addressable.
        to_u32(size, "file size")?;

        let mut out_buffer = EncoderBuffer::with_size(size);
        header.encode(&mut out_buffer).field("header")?;
        debug_assert_eq!(out_buffer.position(), header.faces_offset as usize);

        self.encode_faces(mesh, &mut out_buffer)?;
        debug_assert_eq!(out_buffer.position(), header.vertices_offset as usize);

        self.encode_vertices(mesh, &mut out_buffer)?;
        debug_assert_eq!(out_buffer.remaining_size(), 0);

        tracing::debug!(
            name,
            faces = header.face_count,
            vertices = header.vertex_count,
            faces_offset = header.faces_offset,
            vertices_offset = header.vertices_offset,
            size,
            "encoded ian"
        );
        Ok(out_buffer)
    }

    fn encode_faces(&self, mesh: &MeshData, out_buffer: &mut EncoderBuffer) -> Status {
        for (i, face) in mesh.faces().iter().enumerate() {
            out_buffer
                .encode_u16(face.unknown1)
                .field_with(|| format!("face {} unknown1", i))?;
            out_buffer
                .encode_u16(face.unknown2)
                .field_with(|| format!("face {} unknown2", i))?;
            for (k, index) in face.stored_indices().into_iter().enumerate() {
                out_buffer
                    .encode_u32(index)
                    .field_with(|| format!("face {} index {}", i, k))?;
                out_buffer
                    .encode(&FACE_INDEX_PADDING)
                    .field_with(|| format!("face {} index {} padding", i, k))?;
            }
        }
        Ok(())
    }

    fn encode_vertices(&self, mesh: &MeshData, out_buffer: &mut EncoderBuffer) -> Status {
        for (i, vertex) in mesh.vertices().iter().enumerate() {
            encode_vertex(vertex, out_buffer).field_with(|| format!("vertex {}", i))?;
        }
        Ok(())
    }
}

fn encode_vertex(vertex: &Vertex, out_buffer: &mut EncoderBuffer) -> Status {
    out_buffer.encode_vec3(vertex.position)?;
    out_buffer.encode_vec3(vertex.normal)?;
    out_buffer.encode_f32(vertex.u)?;
    out_buffer.encode_f32(flip_v(vertex.v))
}

fn to_u32(value: usize, what: &str) -> Result<u32, IanError> {
    u32::try_from(value)
        .map_err(|_| IanError::InvalidMesh(format!("{} {} does not fit in 32 bits", what, value)))
}

/// Encodes a mesh with default options.
pub fn encode_ian(mesh: &MeshData, name: &str) -> Result<Vec<u8>, IanError> {
    MeshEncoder::new().encode(mesh, name).map(EncoderBuffer::into_vec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::HEADER_FLAGS;
    use crate::mesh::Face;

    fn quad() -> MeshData {
        let mut mesh = MeshData::new();
        mesh.add_vertex(Vertex::new([0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 0.0]));
        mesh.add_vertex(Vertex::new([1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0]));
        mesh.add_vertex(Vertex::new([1.0, 1.0, 0.0], [0.0, 0.0, 1.0], [1.0, 1.0]));
        mesh.add_vertex(Vertex::new([0.0, 1.0, 0.0], [0.0, 0.0, 1.0], [0.0, 0.3]));
        mesh.add_face(Face::new([0, 1, 2]));
        mesh.add_face(Face::new([0, 2, 3]));
        mesh
    }

    fn u32_at(bytes: &[u8], at: usize) -> u32 {
        u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
    }

    fn f32_at(bytes: &[u8], at: usize) -> f32 {
        f32::from_bits(u32_at(bytes, at))
    }

    #[test]
    fn test_layout() {
        let encoder = MeshEncoder::with_options(EncoderOptions::new().with_file_id(0xCAFEBABE));
        let bytes = encoder.encode(&quad(), "quad").unwrap().into_vec();

        let faces_offset = 120 + 4 + 1;
        let vertices_offset = faces_offset + 2 * 28;
        assert_eq!(bytes.len(), vertices_offset + 4 * 32);

        assert_eq!(&bytes[0..8], &[0; 8]);
        assert_eq!(&bytes[8..12], &[0x78, 0, 0, 0]);
        assert_eq!(u32_at(&bytes, 12), 0xCAFEBABE);
        assert_eq!(&bytes[16..20], &[0; 4]);
        for record in 0..4 {
            let at = 20 + record * 20;
            assert_eq!(u32_at(&bytes, at), 2);
            assert_eq!(u32_at(&bytes, at + 4), 4);
            assert_eq!(u32_at(&bytes, at + 8), vertices_offset as u32);
            assert_eq!(u32_at(&bytes, at + 12), faces_offset as u32);
            assert_eq!(u32_at(&bytes, at + 16), 0);
        }
        assert_eq!(&bytes[100..104], &HEADER_FLAGS);
        assert_eq!(&bytes[104..112], &[0; 8]);
        assert_eq!(u32_at(&bytes, 112), faces_offset as u32);
        assert_eq!(&bytes[116..120], &[0; 4]);
        assert_eq!(&bytes[120..125], b"quad\0");
    }

    #[test]
    fn test_face_records() {
        let bytes = encode_ian(&quad(), "quad").unwrap();
        let second = 125 + 28;
        assert_eq!(&bytes[second..second + 4], &[0x03, 0x00, 0x07, 0x00]);
        // Face (0, 2, 3) is stored as (0, 3, 2).
        assert_eq!(u32_at(&bytes, second + 4), 0);
        assert_eq!(&bytes[second + 8..second + 12], &[0x00, 0x00, 0x00, 0xCD]);
        assert_eq!(u32_at(&bytes, second + 12), 3);
        assert_eq!(u32_at(&bytes, second + 20), 2);
        assert_eq!(&bytes[second + 24..second + 28], &[0x00, 0x00, 0x00, 0xCD]);
    }

    #[test]
    fn test_vertex_records_flip_v() {
        let bytes = encode_ian(&quad(), "quad").unwrap();
        let last = 125 + 2 * 28 + 3 * 32;
        assert_eq!(f32_at(&bytes, last + 4), 1.0);
        assert_eq!(f32_at(&bytes, last + 20), 1.0);
        assert_eq!(f32_at(&bytes, last + 24), 0.0);
        assert!((f32_at(&bytes, last + 28) - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_preserves_face_unknowns() {
        let (mut faces, vertices) = quad().into_parts();
        faces[0].unknown2 = 3;
        let mesh = MeshData::from_parts(faces, vertices);
        let bytes = encode_ian(&mesh, "q").unwrap();
        assert_eq!(&bytes[122..126], &[0x03, 0x00, 0x03, 0x00]);
    }

    #[test]
    fn test_random_file_id_when_not_fixed() {
        let encoder = MeshEncoder::new();
        let header = encoder.build_header(&quad(), "quad").unwrap();
        assert_eq!(header.faces_offset, 125);
        assert_eq!(header.vertices_offset, 181);
        assert!(encoder.options().file_id().is_none());
    }

    #[test]
    fn test_rejects_bad_input() {
        let mut mesh = quad();
        mesh.add_face(Face::new([0, 1, 4]));
        assert!(matches!(
            encode_ian(&mesh, "quad"),
            Err(IanError::InvalidMesh(_))
        ));
        assert!(matches!(
            encode_ian(&quad(), "qu\u{e4}d"),
            Err(IanError::InvalidMesh(_))
        ));
        assert!(matches!(
            encode_ian(&quad(), "a\0b"),
            Err(IanError::InvalidMesh(_))
        ));
    }

    #[test]
    fn test_empty_mesh() {
        let bytes = encode_ian(&MeshData::new(), "").unwrap();
        assert_eq!(bytes.len(), 121);
        assert_eq!(u32_at(&bytes, 112), 121);
        assert_eq!(bytes[120], 0);
    }
}
