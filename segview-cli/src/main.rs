//! segview CLI
//!
//! Inspects and maintains the directory of derived segment artifacts
//! (masks, meshes, STL exports) without opening the viewer.
#![allow(clippy::uninlined_format_args)]

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use log::debug;
use segview_app::AppConfig;
use segview_cache::{ArtifactPaths, ArtifactStatus};
use segview_core::LabelValue;
use thiserror::Error;

/// Result type for CLI operations.
type Result<T> = std::result::Result<T, CliError>;

/// CLI error types.
#[derive(Error, Debug)]
enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cache error: {0}")]
    Cache(#[from] segview_cache::Error),

    #[error("{0}")]
    App(#[from] segview_app::AppError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Derived-artifact maintenance for the segview CT segment viewer.
#[derive(Parser)]
#[command(name = "segview")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the artifact paths of a label
    Paths {
        /// Artifact directory (defaults to the configured one)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Label value
        #[arg(short, long)]
        label: LabelValue,
    },

    /// Report which artifacts exist and whether they match the source
    Status {
        /// Artifact directory (defaults to the configured one)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Source label volume to check fingerprints against
        #[arg(short, long)]
        source: Option<PathBuf>,

        /// Label values (defaults to the configured segments)
        #[arg(short, long)]
        label: Vec<LabelValue>,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Delete the derived artifacts of one or more labels
    Invalidate {
        /// Artifact directory (defaults to the configured one)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Label values
        #[arg(short, long, required = true)]
        label: Vec<LabelValue>,
    },

    /// Print the segment table
    Labels,
}

fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    match path {
        Some(path) => {
            debug!("loading config {}", path.display());
            Ok(AppConfig::from_file(path)?)
        }
        None => Ok(AppConfig::default()),
    }
}

/// Explicit labels, or every distinct label of the segment table.
fn status_labels(config: &AppConfig, labels: Vec<LabelValue>) -> Vec<LabelValue> {
    if !labels.is_empty() {
        return labels;
    }
    let mut out: Vec<LabelValue> = Vec::new();
    for segment in config.segments.iter() {
        if !out.contains(&segment.label) {
            out.push(segment.label);
        }
    }
    out
}

fn collect_status(
    output_dir: &Path,
    source: Option<&Path>,
    labels: &[LabelValue],
) -> Result<Vec<ArtifactStatus>> {
    labels
        .iter()
        .map(|&label| Ok(ArtifactStatus::inspect(output_dir, source, label)?))
        .collect()
}

fn invalidate(output_dir: &Path, labels: &[LabelValue]) -> Result<usize> {
    let mut removed = 0;
    for &label in labels {
        removed += ArtifactPaths::for_label(output_dir, label).remove()?;
    }
    Ok(removed)
}

fn mark(present: bool) -> &'static str {
    if present {
        "yes"
    } else {
        "-"
    }
}

fn freshness(fresh: Option<bool>) -> &'static str {
    match fresh {
        Some(true) => "fresh",
        Some(false) => "stale",
        None => "unknown",
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Paths { output_dir, label } => {
            let dir = output_dir.unwrap_or_else(|| config.output_dir.clone());
            let paths = ArtifactPaths::for_label(&dir, label);
            println!("mask: {}", paths.mask.display());
            println!("mesh: {}", paths.mesh.display());
            println!("stl:  {}", paths.stl.display());
        }

        Commands::Status {
            output_dir,
            source,
            label,
            json,
        } => {
            let dir = output_dir.unwrap_or_else(|| config.output_dir.clone());
            let source = source.or_else(|| config.source_volume.clone());
            let labels = status_labels(&config, label);
            let statuses = collect_status(&dir, source.as_deref(), &labels)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&statuses)?);
            } else {
                println!("Artifacts in {}", dir.display());
                println!(
                    "{:<10} {:>6} {:>6} {:>6} {:>9}",
                    "Label", "Mask", "Mesh", "STL", "Source"
                );
                println!("{:-<41}", "");
                for s in &statuses {
                    println!(
                        "{:<10} {:>6} {:>6} {:>6} {:>9}",
                        s.label,
                        mark(s.mask),
                        mark(s.mesh),
                        mark(s.stl),
                        freshness(s.fresh)
                    );
                }
            }
        }

        Commands::Invalidate { output_dir, label } => {
            let dir = output_dir.unwrap_or_else(|| config.output_dir.clone());
            let removed = invalidate(&dir, &label)?;
            println!("Removed {} file(s) from {}", removed, dir.display());
        }

        Commands::Labels => {
            for (index, segment) in config.segments.iter().enumerate() {
                println!("{:>3}  {:<24} {}", index, segment.name, segment.label);
            }
            println!("  *  {:<24} {}", "(fallback)", config.segments.fallback());
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    run(Cli::parse())
}
