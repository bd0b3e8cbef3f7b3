//! IAN Core Library
//!
//! Data types, decoder and encoder for the `.ian` mesh container used by the
//! game *Incoming*.
//!
//! # Example
//!
//! ```
//! use ian_core::mesh::{Face, MeshData, Vertex};
//! use ian_core::mesh_decoder::decode_ian;
//! use ian_core::mesh_encoder::encode_ian;
//!
//! let mut mesh = MeshData::new();
//! mesh.add_vertex(Vertex::new([0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 0.0]));
//! mesh.add_vertex(Vertex::new([1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0]));
//! mesh.add_vertex(Vertex::new([0.0, 1.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0]));
//! mesh.add_face(Face::new([0, 1, 2]));
//!
//! let bytes = encode_ian(&mesh, "triangle").unwrap();
//! let file = decode_ian(&bytes).unwrap();
//! assert_eq!(file.name(), "triangle");
//! assert_eq!(file.mesh, mesh);
//! ```

// =============================================================================
// Core modules - always available
// =============================================================================

pub mod end_data;
pub mod header;
pub mod ian_file;
pub mod layout;
pub mod mesh;
pub mod status;

// =============================================================================
// Decoder-only modules
// =============================================================================

#[cfg(feature = "decoder")]
pub mod decoder_buffer;
#[cfg(feature = "decoder")]
pub mod mesh_decoder;

// =============================================================================
// Encoder-only modules
// =============================================================================

#[cfg(feature = "encoder")]
pub mod encoder_buffer;
#[cfg(feature = "encoder")]
pub mod mesh_encoder;

// =============================================================================
// Re-exports
// =============================================================================

pub use end_data::{EndData, EndDataRecord};
pub use header::{FileHeader, MeshHeader};
pub use ian_file::IanFile;
pub use mesh::{Face, MeshData, Vertex};
pub use status::{IanError, Status};

#[cfg(feature = "decoder")]
pub use decoder_buffer::DecoderBuffer;
#[cfg(feature = "decoder")]
pub use mesh_decoder::{decode_ian, DecoderOptions, MeshDecoder};

#[cfg(feature = "encoder")]
pub use encoder_buffer::EncoderBuffer;
#[cfg(feature = "encoder")]
pub use mesh_encoder::{encode_ian, EncoderOptions, MeshEncoder};
