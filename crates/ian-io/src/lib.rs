//! File-level readers and writers for `.ian` meshes and their OBJ form.
//!
//! # Supported Formats
//!
//! | Format | Read | Write |
//! |--------|------|-------|
//! | IAN    | ✓    | ✓     |
//! | OBJ    | ✓    | ✓     |
//!
//! # Unified Trait API
//!
//! All readers implement [`Reader`] and all writers implement [`Writer`]:
//!
//! ```no_run
//! use ian_io::{IanReader, ObjWriter, Reader, Writer};
//!
//! let named = IanReader::open("ship.ian")?.read_mesh()?;
//! let mut obj = ObjWriter::new();
//! obj.add_mesh(&named.mesh, named.name.as_deref())?;
//! obj.write("ship.obj")?;
//! # Ok::<(), ian_io::Error>(())
//! ```
//!
//! # Axis conventions
//!
//! OBJ output negates Y and OBJ input negates it back, so a mesh survives
//! IAN → OBJ → IAN unchanged. Both sides can turn this off with
//! `with_flip_y(false)`.

pub mod error;
pub mod traits;

#[cfg(feature = "decoder")]
pub mod ian_reader;
#[cfg(feature = "encoder")]
pub mod ian_writer;
pub mod obj_reader;
pub mod obj_writer;

pub use error::{Error, Result};
pub use traits::{NamedMesh, Reader, Writer};

#[cfg(feature = "decoder")]
pub use ian_reader::IanReader;
#[cfg(feature = "encoder")]
pub use ian_writer::IanWriter;
pub use obj_reader::{parse_obj, ObjReader};
pub use obj_writer::{write_obj_string, ObjWriter};
