// Fixed layout of the .ian container.
//
// All multi-byte values are little-endian. Offsets are absolute within the
// file buffer.

// =============================================================================
// Version
// =============================================================================

/// The only version value observed in shipped files.
pub const IAN_VERSION: u32 = 120;

// =============================================================================
// Header offsets
// =============================================================================

/// Leading reserved bytes, always zero in observed files.
pub const RESERVED_PREFIX_SIZE: usize = 8;

pub const VERSION_OFFSET: usize = 8;

/// Seemingly random per-file identifier.
pub const FILE_ID_OFFSET: usize = 12;

pub const RESERVED_OFFSET: usize = 16;

/// Start of the four redundant mesh header records.
pub const MESH_HEADERS_OFFSET: usize = 20;

pub const MESH_HEADER_COUNT: usize = 4;

/// Five u32 fields per record.
pub const MESH_HEADER_SIZE: usize = 20;

/// Unknown four bytes following the mesh header records.
pub const HEADER_FLAGS_OFFSET: usize = 100;

pub const END_DATA_COUNT_OFFSET: usize = 104;

pub const END_DATA_OFFSET_OFFSET: usize = 108;

pub const FACES_OFFSET_DUPLICATE_OFFSET: usize = 112;

pub const UNKNOWN_COUNT_OFFSET: usize = 116;

/// The name string starts right after the fixed header.
pub const NAME_OFFSET: usize = 120;

/// Size of the fixed part of the header, excluding the name.
pub const FIXED_HEADER_SIZE: usize = 120;

// =============================================================================
// Records
// =============================================================================

/// unknown1 (2) + unknown2 (2) + 3 × (index (4) + padding (4)).
pub const FACE_RECORD_SIZE: usize = 28;

/// Padding following each stored face index.
pub const FACE_INDEX_PADDING_SIZE: usize = 4;

/// position (12) + normal (12) + u (4) + v (4).
pub const VERTEX_RECORD_SIZE: usize = 32;

/// Three floats followed by 20 padding bytes.
pub const END_DATA_RECORD_SIZE: usize = 32;

pub const END_DATA_PADDING_SIZE: usize = 20;

// =============================================================================
// Values found in shipped files
// =============================================================================

/// Bytes found at offset 100 of exported files.
pub const HEADER_FLAGS: [u8; 4] = [0x01, 0x00, 0xAF, 0xDE];

/// Default `unknown1` of a face record (stored bytes `03 00`).
pub const DEFAULT_FACE_UNKNOWN1: u16 = 3;

/// Default `unknown2` of a face record (stored bytes `07 00`).
pub const DEFAULT_FACE_UNKNOWN2: u16 = 7;

/// Padding written after every face index: three null bytes and `0xCD`.
pub const FACE_INDEX_PADDING: [u8; 4] = [0x00, 0x00, 0x00, 0xCD];

/// Byte offset of the face table for a given name.
pub const fn faces_offset_for_name(name_len: usize) -> usize {
    FIXED_HEADER_SIZE + name_len + 1
}

/// Byte offset of the vertex table following `face_count` face records.
pub const fn vertices_offset_for(faces_offset: usize, face_count: usize) -> usize {
    faces_offset + FACE_RECORD_SIZE * face_count
}

/// End of the vertex table. Also the fallback start of the end data.
pub const fn vertices_end(vertices_offset: usize, vertex_count: usize) -> usize {
    vertices_offset + VERTEX_RECORD_SIZE * vertex_count
}
