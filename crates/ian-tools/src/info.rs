//! Info command - print what a .ian file contains

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use ian_core::ian_file::IanFile;
use ian_io::IanReader;

/// Arguments for the info command
#[derive(Args)]
pub struct InfoArgs {
    /// Input .ian file
    pub input: PathBuf,
}

/// Execute the info command
pub fn execute(args: InfoArgs) -> Result<()> {
    let reader = IanReader::open(&args.input)
        .with_context(|| format!("Failed to open {}", args.input.display()))?;
    let file = reader
        .read_file()
        .with_context(|| format!("Failed to decode {}", args.input.display()))?;

    println!("{}", args.input.display());
    print!("{}", describe(&file, reader.data().len()));
    Ok(())
}

fn describe(file: &IanFile, file_size: usize) -> String {
    let header = &file.header;
    let end_data = &file.end_data;

    let mut out = String::new();
    out.push_str(&format!("  name:            {}\n", header.name));
    out.push_str(&format!("  size:            {} bytes\n", file_size));
    out.push_str(&format!("  version:         {}\n", header.version));
    out.push_str(&format!("  file id:         0x{:08X}\n", header.file_id));
    out.push_str(&format!("  faces:           {} at {}\n", header.face_count, header.faces_offset));
    out.push_str(&format!(
        "  vertices:        {} at {}\n",
        header.vertex_count, header.vertices_offset
    ));
    out.push_str(&format!("  flags:           {:02X?}\n", header.flags));
    out.push_str(&format!("  unknown count:   {}\n", header.unknown_count));
    out.push_str(&format!(
        "  end data:        {} declared, {} read",
        header.end_data_count,
        end_data.len()
    ));
    match end_data.offset {
        Some(offset) if end_data.offset_corrected => out.push_str(&format!(
            " at {} (corrected from {})\n",
            offset, header.end_data_offset
        )),
        Some(offset) => out.push_str(&format!(" at {}\n", offset)),
        None => out.push('\n'),
    }
    if end_data.trailing_bytes > 0 {
        out.push_str(&format!("  trailing bytes:  {}\n", end_data.trailing_bytes));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ian_core::mesh::{Face, MeshData, Vertex};
    use ian_core::mesh_decoder::decode_ian;
    use ian_core::mesh_encoder::{EncoderOptions, MeshEncoder};

    #[test]
    fn test_describe() {
        let mut mesh = MeshData::new();
        mesh.add_vertex(Vertex::new([0.0; 3], [0.0, 0.0, 1.0], [0.0, 0.0]));
        mesh.add_face(Face::new([0, 0, 0]));
        let bytes = MeshEncoder::with_options(EncoderOptions::new().with_file_id(0xAB))
            .encode(&mesh, "dot")
            .unwrap()
            .into_vec();
        let file = decode_ian(&bytes).unwrap();

        let text = describe(&file, bytes.len());
        assert!(text.contains("name:            dot\n"));
        assert!(text.contains("file id:         0x000000AB\n"));
        assert!(text.contains("faces:           1 at 124\n"));
        assert!(text.contains("vertices:        1 at 152\n"));
        assert!(text.contains("flags:           [01, 00, AF, DE]\n"));
        assert!(text.contains("end data:        0 declared, 0 read\n"));
    }
}
