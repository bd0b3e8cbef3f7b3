//! Import command - .obj to .ian

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use ian_core::mesh_encoder::EncoderOptions;
use ian_io::{IanWriter, ObjReader, Reader, Writer};

/// Arguments for the import command
#[derive(Args)]
pub struct ImportArgs {
    /// Input .obj file
    pub input: PathBuf,

    /// Output .ian path (defaults to the input path with an .ian extension)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Mesh name stored in the file (defaults to the output file stem)
    #[arg(long)]
    pub name: Option<String>,

    /// Fixed file id, decimal or 0x-prefixed hex (random when omitted)
    #[arg(long, value_parser = parse_file_id)]
    pub file_id: Option<u32>,

    /// Read Y as written instead of negating it
    #[arg(long)]
    pub no_flip_y: bool,
}

/// Execute the import command
pub fn execute(args: ImportArgs) -> Result<()> {
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| args.input.with_extension("ian"));
    let name = match &args.name {
        Some(name) => name.clone(),
        None => default_name(&output),
    };

    let named = ObjReader::open(&args.input)
        .map(|reader| reader.with_flip_y(!args.no_flip_y))
        .and_then(|mut reader| reader.read_mesh())
        .with_context(|| format!("Failed to parse {}", args.input.display()))?;

    let mut options = EncoderOptions::new();
    if let Some(file_id) = args.file_id {
        options = options.with_file_id(file_id);
    }
    let mut writer = IanWriter::new().with_options(options);
    writer
        .add_mesh(&named.mesh, Some(&name))
        .with_context(|| format!("Cannot encode mesh from {}", args.input.display()))?;
    writer
        .write(&output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!(
        "Imported {} -> {} ({}: {} vertices, {} faces)",
        args.input.display(),
        output.display(),
        name,
        writer.vertex_count(),
        writer.face_count()
    );
    Ok(())
}

/// File stem of the output path, or an empty name.
fn default_name(output: &Path) -> String {
    output
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Accepts `1234` or `0x4D2`.
pub fn parse_file_id(value: &str) -> Result<u32, String> {
    let parsed = match value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
    {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => value.parse::<u32>(),
    };
    parsed.map_err(|e| format!("invalid file id {:?}: {}", value, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ian_io::IanReader;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_parse_file_id() {
        assert_eq!(parse_file_id("1234"), Ok(1234));
        assert_eq!(parse_file_id("0xCAFEBABE"), Ok(0xCAFEBABE));
        assert_eq!(parse_file_id("0X10"), Ok(16));
        assert!(parse_file_id("0x1_0000_0000").is_err());
        assert!(parse_file_id("-1").is_err());
    }

    #[test]
    fn test_import_uses_output_stem_as_name() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.obj");
        let output = dir.path().join("Hull_01.ian");
        fs::write(&input, "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n").unwrap();

        execute(ImportArgs {
            input,
            output: Some(output.clone()),
            name: None,
            file_id: Some(5),
            no_flip_y: false,
        })
        .unwrap();

        let file = IanReader::open(&output).unwrap().read_file().unwrap();
        assert_eq!(file.name(), "Hull_01");
        assert_eq!(file.header.file_id, 5);
        assert_eq!(file.mesh.num_faces(), 1);
        let named = IanReader::open(&output).unwrap().read_mesh().unwrap();
        assert_eq!(named.mesh.vertices()[2].position, [0.0, -1.0, 0.0]);
    }

    #[test]
    fn test_bad_obj_reports_line() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.obj");
        let output = dir.path().join("out.ian");
        fs::write(&input, "v 0 0 0\nf 1 2 3\n").unwrap();

        let err = execute(ImportArgs {
            input,
            output: Some(output.clone()),
            name: Some("x".into()),
            file_id: None,
            no_flip_y: false,
        })
        .unwrap_err();
        assert!(format!("{:#}", err).contains("line 2"));
        assert!(!output.exists());
    }
}
