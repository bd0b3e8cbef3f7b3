//! Common traits for readers and writers.
//!
//! Both formats implement the same pair of traits, so conversions can be
//! written once:
//!
//! ```no_run
//! use ian_io::{IanReader, ObjWriter, Reader, Writer};
//!
//! fn convert<R: Reader, W: Writer>(input: &str, output: &str) -> ian_io::Result<()> {
//!     let named = R::open(input)?.read_mesh()?;
//!     let mut writer = W::new();
//!     writer.add_mesh(&named.mesh, named.name.as_deref())?;
//!     writer.write(output)
//! }
//!
//! convert::<IanReader, ObjWriter>("model.ian", "model.obj").unwrap();
//! ```

use std::path::Path;

use ian_core::mesh::MeshData;

use crate::error::Result;

/// A mesh together with the object name stored alongside it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NamedMesh {
    pub name: Option<String>,
    pub mesh: MeshData,
}

impl NamedMesh {
    pub fn new(name: Option<String>, mesh: MeshData) -> Self {
        Self { name, mesh }
    }
}

/// Common interface for mesh writers.
pub trait Writer: Sized {
    /// Create a new writer instance.
    fn new() -> Self;

    /// Set the mesh to be written. Both formats hold a single object, so a
    /// second call replaces the first.
    fn add_mesh(&mut self, mesh: &MeshData, name: Option<&str>) -> Result<()>;

    /// Serialize the current mesh.
    fn to_bytes(&self) -> Result<Vec<u8>>;

    /// Write the current mesh to a file.
    fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let bytes = self.to_bytes()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    fn vertex_count(&self) -> usize;

    fn face_count(&self) -> usize;
}

/// Common interface for mesh readers.
pub trait Reader: Sized {
    /// Open a file for reading.
    fn open<P: AsRef<Path>>(path: P) -> Result<Self>;

    /// Decode the mesh held by this reader.
    fn read_mesh(&mut self) -> Result<NamedMesh>;
}
