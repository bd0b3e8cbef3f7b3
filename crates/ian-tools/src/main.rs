//! ian - converter for `.ian` meshes from *Incoming*
//!
//! # Commands
//!
//! - `ian export` - Convert one .ian file to .obj
//! - `ian import` - Convert one .obj file to .ian
//! - `ian batch` - Convert every .ian file below a folder to .obj
//! - `ian info` - Print header fields and counts of a .ian file
//!
//! # Usage
//!
//! ```bash
//! ian export ship.ian -o ship.obj
//! ian import ship.obj -o ship.ian --file-id 0x1234
//! ian batch game/data exported
//! ian -v info ship.ian
//! ```
//!
//! Logging goes to stderr. `RUST_LOG` overrides the level chosen with `-v`.

mod batch;
mod export;
mod import;
mod info;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Converter for .ian mesh files
#[derive(Parser)]
#[command(name = "ian")]
#[command(about = "Convert .ian meshes to and from Wavefront OBJ")]
#[command(version)]
struct Cli {
    /// More log output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a .ian file to .obj
    Export(export::ExportArgs),

    /// Convert a .obj file to .ian
    Import(import::ImportArgs),

    /// Convert every .ian file below a folder to .obj
    Batch(batch::BatchArgs),

    /// Print header fields and counts of a .ian file
    Info(info::InfoArgs),
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Export(args) => export::execute(args),
        Commands::Import(args) => import::execute(args),
        Commands::Batch(args) => batch::execute(args),
        Commands::Info(args) => info::execute(args),
    }
}
