mod document;
#[cfg(test)]
mod proptest_helpers;
mod record;
mod render;
mod reverse;
mod serial;
mod zone;

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser};
use document::ZoneDocument;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use zone::{RenderedZone, Zone};

#[derive(Parser, Debug)]
#[command(name = "zonegen", version)]
#[command(about = "Generate a BIND zone file from a YAML zone description")]
#[command(group(ArgGroup::new("input").required(true).args(["filename", "example"])))]
struct Cli {
    /// YAML zone description
    filename: Option<PathBuf>,

    /// Convert the built-in example zone instead of a file
    #[arg(long)]
    example: bool,

    /// Write the zone file here instead of standard output
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<ExitCode> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging, to stderr since stdout carries the zone file
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("zonegen={}", cli.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load the zone description
    let document = load_document(&cli)?;

    // Resolve the origin, stamp the serial and check every record
    let zone = Zone::from_document(document, serial::current_serial())
        .context("Failed to build zone")?;

    // Render the whole zone before writing anything
    let rendered = zone.render();
    write_output(cli.output.as_deref(), &rendered.text)?;

    if !rendered.is_clean() {
        tracing::warn!(
            "{} record(s) in zone {} could not be converted",
            rendered.failures,
            zone.origin
        );
    }

    Ok(exit_code(&rendered))
}

/// Unconverted records still produce a zone file but fail the run.
fn exit_code(rendered: &RenderedZone) -> ExitCode {
    if rendered.is_clean() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn load_document(cli: &Cli) -> Result<ZoneDocument> {
    match &cli.filename {
        Some(path) => {
            tracing::info!("Loading zone description from {}", path.display());
            ZoneDocument::from_file(path)
                .context(format!("Failed to load zone description from {}", path.display()))
        }
        None => {
            tracing::info!("Using built-in example zone");
            ZoneDocument::example()
        }
    }
}

fn write_output(path: Option<&Path>, text: &str) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, text)
            .context(format!("Failed to write zone file {}", path.display())),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(text.as_bytes())
                .and_then(|_| stdout.flush())
                .context("Failed to write zone file to stdout")
        }
    }
}
