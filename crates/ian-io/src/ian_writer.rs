use ian_core::mesh::MeshData;
use ian_core::mesh_encoder::{EncoderOptions, MeshEncoder};

use crate::error::Result;
use crate::traits::Writer;

/// Writes `.ian` files.
///
/// Unnamed meshes are written with an empty name.
#[derive(Debug, Clone, Default)]
pub struct IanWriter {
    name: String,
    mesh: MeshData,
    options: EncoderOptions,
}

impl IanWriter {
    pub fn with_options(mut self, options: EncoderOptions) -> Self {
        self.options = options;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Writer for IanWriter {
    fn new() -> Self {
        Self::default()
    }

    fn add_mesh(&mut self, mesh: &MeshData, name: Option<&str>) -> Result<()> {
        let name = name.unwrap_or_default();
        MeshEncoder::with_options(self.options.clone()).validate(mesh, name)?;
        self.mesh = mesh.clone();
        self.name = name.to_owned();
        Ok(())
    }

    fn to_bytes(&self) -> Result<Vec<u8>> {
        let encoder = MeshEncoder::with_options(self.options.clone());
        Ok(encoder.encode(&self.mesh, &self.name)?.into_vec())
    }

    fn vertex_count(&self) -> usize {
        self.mesh.num_vertices()
    }

    fn face_count(&self) -> usize {
        self.mesh.num_faces()
    }
}
