//! Command line front end for the quickdown converter.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

/// Convert a Markdown document into an HTML fragment on stdout.
#[derive(Parser)]
#[command(name = "quickdown", version, about)]
struct Cli {
    /// Markdown file to convert.
    input: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let html = quickdown_core::convert_file(&cli.input)
        .with_context(|| format!("converting {}", cli.input.display()))?;
    println!("{html}");
    Ok(())
}
