//! The fixed .ian file header.
//!
//! ```text
//! offset  size  field
//! 0       8     reserved (zero)
//! 8       4     version (120)
//! 12      4     file id
//! 16      4     reserved
//! 20      80    mesh header record x4 (identical copies)
//! 100     4     flags (unknown)
//! 104     4     end data count
//! 108     4     end data offset
//! 112     4     faces offset (duplicate)
//! 116     4     unknown count
//! 120     n+1   name, null terminated
//! ```

#[cfg(feature = "decoder")]
use crate::decoder_buffer::DecoderBuffer;
#[cfg(feature = "encoder")]
use crate::encoder_buffer::EncoderBuffer;
use crate::layout::{FIXED_HEADER_SIZE, HEADER_FLAGS, IAN_VERSION, MESH_HEADER_COUNT};
#[cfg(feature = "decoder")]
use crate::layout::{MESH_HEADERS_OFFSET, RESERVED_PREFIX_SIZE};
use crate::status::IanError;
#[cfg(feature = "decoder")]
use crate::status::{FieldContext, FACES_OFFSET_MISMATCH, MESH_HEADER_MISMATCH};

/// One of the four redundant mesh header records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MeshHeader {
    pub face_count: u32,
    pub vertex_count: u32,
    pub vertices_offset: u32,
    pub faces_offset: u32,
    pub unknown: u32,
}

impl MeshHeader {
    #[cfg(feature = "decoder")]
    fn decode(in_buffer: &mut DecoderBuffer, index: usize) -> Result<Self, IanError> {
        let mut read = |name: &'static str| {
            in_buffer
                .decode_u32()
                .field_with(|| format!("mesh header {} {}", index, name))
        };
        Ok(Self {
            face_count: read("face count")?,
            vertex_count: read("vertex count")?,
            vertices_offset: read("vertices offset")?,
            faces_offset: read("faces offset")?,
            unknown: read("unknown")?,
        })
    }

    #[cfg(feature = "encoder")]
    fn encode(&self, out_buffer: &mut EncoderBuffer) -> Result<(), IanError> {
        out_buffer.encode_u32(self.face_count)?;
        out_buffer.encode_u32(self.vertex_count)?;
        out_buffer.encode_u32(self.vertices_offset)?;
        out_buffer.encode_u32(self.faces_offset)?;
        out_buffer.encode_u32(self.unknown)
    }
}

/// Validated file header.
///
/// Counts and offsets come from the first mesh header record. The opaque
/// fields are kept so a decoded header can be inspected or written back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHeader {
    pub reserved_prefix: [u8; 8],
    pub version: u32,
    pub file_id: u32,
    pub reserved: [u8; 4],
    pub face_count: u32,
    pub vertex_count: u32,
    pub vertices_offset: u32,
    pub faces_offset: u32,
    /// Fifth field of the mesh header record.
    pub mesh_header_unknown: u32,
    pub flags: [u8; 4],
    pub end_data_count: u32,
    pub end_data_offset: u32,
    pub unknown_count: u32,
    pub name: String,
}

impl FileHeader {
    /// Header for a freshly encoded file. End data fields stay zero.
    pub fn new(name: impl Into<String>, file_id: u32) -> Self {
        Self {
            reserved_prefix: [0; 8],
            version: IAN_VERSION,
            file_id,
            reserved: [0; 4],
            face_count: 0,
            vertex_count: 0,
            vertices_offset: 0,
            faces_offset: 0,
            mesh_header_unknown: 0,
            flags: HEADER_FLAGS,
            end_data_count: 0,
            end_data_offset: 0,
            unknown_count: 0,
            name: name.into(),
        }
    }

    /// The mesh header record this header was read from or will write.
    pub fn mesh_header(&self) -> MeshHeader {
        MeshHeader {
            face_count: self.face_count,
            vertex_count: self.vertex_count,
            vertices_offset: self.vertices_offset,
            faces_offset: self.faces_offset,
            unknown: self.mesh_header_unknown,
        }
    }

    /// Size of the header including the name and its terminator.
    pub fn encoded_size(&self) -> usize {
        FIXED_HEADER_SIZE + self.name.len() + 1
    }

    /// Reads and validates the header from the start of the buffer.
    ///
    /// On success the cursor sits right after the name terminator.
    #[cfg(feature = "decoder")]
    pub fn decode(in_buffer: &mut DecoderBuffer) -> Result<Self, IanError> {
        in_buffer.set_position(0)?;

        let mut reserved_prefix = [0u8; RESERVED_PREFIX_SIZE];
        in_buffer
            .decode_bytes(&mut reserved_prefix)
            .field("reserved prefix")?;

        let version = in_buffer.decode_u32().field("version")?;
        if version != IAN_VERSION {
            return Err(IanError::InvalidVersion { found: version });
        }

        let file_id = in_buffer.decode_u32().field("file id")?;
        let mut reserved = [0u8; 4];
        in_buffer.decode_bytes(&mut reserved).field("reserved")?;
        debug_assert_eq!(in_buffer.position(), MESH_HEADERS_OFFSET);

        let first = MeshHeader::decode(in_buffer, 0)?;
        for i in 1..MESH_HEADER_COUNT {
            let copy = MeshHeader::decode(in_buffer, i)?;
            if copy != first {
                tracing::debug!(record = i, ?first, ?copy, "mesh header copy differs");
                return Err(IanError::InvalidMeshHeader(MESH_HEADER_MISMATCH.into()));
            }
        }

        let mut flags = [0u8; 4];
        in_buffer.decode_bytes(&mut flags).field("header flags")?;

        let end_data_count = in_buffer.decode_u32().field("end data count")?;
        let end_data_offset = in_buffer.decode_u32().field("end data offset")?;

        let faces_offset_copy = in_buffer.decode_u32().field("faces offset copy")?;
        if faces_offset_copy != first.faces_offset {
            tracing::debug!(
                header = first.faces_offset,
                copy = faces_offset_copy,
                "faces offset copy differs"
            );
            return Err(IanError::InvalidMeshHeader(FACES_OFFSET_MISMATCH.into()));
        }

        let unknown_count = in_buffer.decode_u32().field("unknown count")?;
        let name = in_buffer.decode_string()?;

        tracing::debug!(
            name = %name,
            faces = first.face_count,
            faces_offset = first.faces_offset,
            vertices = first.vertex_count,
            vertices_offset = first.vertices_offset,
            end_data_count,
            end_data_offset,
            "read ian header"
        );

        Ok(Self {
            reserved_prefix,
            version,
            file_id,
            reserved,
            face_count: first.face_count,
            vertex_count: first.vertex_count,
            vertices_offset: first.vertices_offset,
            faces_offset: first.faces_offset,
            mesh_header_unknown: first.unknown,
            flags,
            end_data_count,
            end_data_offset,
            unknown_count,
            name,
        })
    }

    /// Writes the header, all four mesh header copies and the name.
    #[cfg(feature = "encoder")]
    pub fn encode(&self, out_buffer: &mut EncoderBuffer) -> Result<(), IanError> {
        out_buffer.encode(&self.reserved_prefix)?;
        out_buffer.encode_u32(self.version)?;
        out_buffer.encode_u32(self.file_id)?;
        out_buffer.encode(&self.reserved)?;

        let record = self.mesh_header();
        for _ in 0..MESH_HEADER_COUNT {
            record.encode(out_buffer)?;
        }

        out_buffer.encode(&self.flags)?;
        out_buffer.encode_u32(self.end_data_count)?;
        out_buffer.encode_u32(self.end_data_offset)?;
        out_buffer.encode_u32(self.faces_offset)?;
        out_buffer.encode_u32(self.unknown_count)?;
        out_buffer.encode(self.name.as_bytes())?;
        // terminator
        out_buffer.skip(1)
    }
}
