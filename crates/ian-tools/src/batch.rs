//! Batch command - export every .ian file below a folder
//!
//! The folder layout is mirrored under the output folder. A file that fails
//! to convert is logged and skipped; the command reports the failures at
//! the end.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use walkdir::WalkDir;

use crate::export::export_file;

/// Arguments for the batch command
#[derive(Args)]
pub struct BatchArgs {
    /// Folder to search for .ian files
    pub input: PathBuf,

    /// Output folder (defaults to ian_export_<unix timestamp>)
    pub output: Option<PathBuf>,

    /// Write Y as stored instead of negating it
    #[arg(long)]
    pub no_flip_y: bool,
}

/// Counts for one batch run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchReport {
    pub converted: usize,
    pub failed: usize,
}

/// Execute the batch command
pub fn execute(args: BatchArgs) -> Result<()> {
    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(format!("ian_export_{}", chrono::Utc::now().timestamp())));

    let report = export_dir(&args.input, &output, !args.no_flip_y)?;
    println!(
        "Converted {} file(s) into {}",
        report.converted,
        output.display()
    );
    if report.failed > 0 {
        anyhow::bail!("{} file(s) failed to convert", report.failed);
    }
    Ok(())
}

/// Finds `.ian` files (case-insensitive extension) in sorted order.
pub fn find_ian_files(input: &Path) -> Vec<PathBuf> {
    WalkDir::new(input)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!("Skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file() && is_ian(entry.path()))
        .map(|entry| entry.into_path())
        .collect()
}

fn is_ian(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("ian"))
}

pub fn export_dir(input: &Path, output: &Path, flip_y: bool) -> Result<BatchReport> {
    if !input.is_dir() {
        anyhow::bail!("{} is not a folder", input.display());
    }

    let files = find_ian_files(input);
    tracing::info!(count = files.len(), input = %input.display(), "found ian files");

    let mut report = BatchReport::default();
    for path in files {
        let relative = path.strip_prefix(input).unwrap_or(&path);
        let target = output.join(relative).with_extension("obj");

        match export_one(&path, &target, flip_y) {
            Ok(()) => {
                tracing::info!(file = %relative.display(), "converted");
                report.converted += 1;
            }
            Err(e) => {
                tracing::error!(file = %relative.display(), "{:#}", e);
                report.failed += 1;
            }
        }
    }
    Ok(report)
}

fn export_one(path: &Path, target: &Path, flip_y: bool) -> Result<()> {
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    export_file(path, target, flip_y)?;
    Ok(())
}
