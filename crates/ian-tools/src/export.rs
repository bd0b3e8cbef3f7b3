//! Export command - .ian to .obj

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use ian_io::{IanReader, ObjWriter};

/// Arguments for the export command
#[derive(Args)]
pub struct ExportArgs {
    /// Input .ian file
    pub input: PathBuf,

    /// Output .obj path (defaults to the input path with an .obj extension)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write Y as stored instead of negating it
    #[arg(long)]
    pub no_flip_y: bool,
}

/// What one export produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub name: String,
    pub vertices: usize,
    pub faces: usize,
}

/// Execute the export command
pub fn execute(args: ExportArgs) -> Result<()> {
    let output = args
        .output
        .unwrap_or_else(|| args.input.with_extension("obj"));
    let summary = export_file(&args.input, &output, !args.no_flip_y)?;

    println!(
        "Exported {} -> {} ({}: {} vertices, {} faces)",
        args.input.display(),
        output.display(),
        summary.name,
        summary.vertices,
        summary.faces
    );
    Ok(())
}

/// Converts one file. Nothing is written unless decoding succeeded.
pub fn export_file(input: &Path, output: &Path, flip_y: bool) -> Result<ExportSummary> {
    let file = IanReader::open(input)
        .and_then(|reader| reader.read_file())
        .with_context(|| format!("Failed to read {}", input.display()))?;

    if file.end_data.offset_corrected {
        tracing::warn!(input = %input.display(), "end data offset was corrected while reading");
    }

    let text = ObjWriter::from_mesh(&file.mesh, Some(file.name()))
        .with_flip_y(flip_y)
        .to_obj_string();
    fs::write(output, text).with_context(|| format!("Failed to write {}", output.display()))?;

    tracing::debug!(input = %input.display(), output = %output.display(), "exported");
    Ok(ExportSummary {
        name: file.header.name.clone(),
        vertices: file.mesh.num_vertices(),
        faces: file.mesh.num_faces(),
    })
}
