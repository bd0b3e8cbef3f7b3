use crate::end_data::EndData;
use crate::header::FileHeader;
use crate::mesh::MeshData;

/// Everything read from one .ian file.
#[derive(Debug, Clone, PartialEq)]
pub struct IanFile {
    pub header: FileHeader,
    pub mesh: MeshData,
    pub end_data: EndData,
}

impl IanFile {
    pub fn name(&self) -> &str {
        &self.header.name
    }

    pub fn into_mesh(self) -> MeshData {
        self.mesh
    }
}
