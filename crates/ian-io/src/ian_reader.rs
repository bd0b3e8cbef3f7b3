use std::fs;
use std::path::Path;

use ian_core::decoder_buffer::DecoderBuffer;
use ian_core::ian_file::IanFile;
use ian_core::mesh_decoder::{DecoderOptions, MeshDecoder};

use crate::error::Result;
use crate::traits::{NamedMesh, Reader};

/// Reads `.ian` files.
#[derive(Debug, Clone)]
pub struct IanReader {
    data: Vec<u8>,
    options: DecoderOptions,
}

impl IanReader {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read(path)?;
        tracing::debug!(path = %path.display(), size = data.len(), "loaded ian file");
        Ok(Self::from_bytes(data))
    }

    pub fn from_bytes(data: impl Into<Vec<u8>>) -> Self {
        Self {
            data: data.into(),
            options: DecoderOptions::default(),
        }
    }

    pub fn with_options(mut self, options: DecoderOptions) -> Self {
        self.options = options;
        self
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Decode header, mesh and end data.
    pub fn read_file(&self) -> Result<IanFile> {
        let decoder = MeshDecoder::with_options(self.options.clone());
        let mut in_buffer = DecoderBuffer::new(&self.data);
        Ok(decoder.decode(&mut in_buffer)?)
    }
}

impl Reader for IanReader {
    fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        IanReader::open(path)
    }

    fn read_mesh(&mut self) -> Result<NamedMesh> {
        let file = self.read_file()?;
        let name = Some(file.header.name).filter(|name| !name.is_empty());
        Ok(NamedMesh::new(name, file.mesh))
    }
}
