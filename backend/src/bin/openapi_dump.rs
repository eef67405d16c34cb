//! Print the OpenAPI document as JSON, or write it to a file.

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Context, Result};
use swissparcel::doc::ApiDoc;
use utoipa::OpenApi;

/// Export the SwissParcel OpenAPI document.
#[derive(Debug, Parser)]
#[command(name = "openapi-dump", version, about)]
struct Cli {
    /// Write the document here instead of standard output.
    #[arg(long, short)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    let json = ApiDoc::openapi()
        .to_pretty_json()
        .wrap_err("failed to serialise the OpenAPI document")?;
    match cli.output {
        Some(path) => fs::write(&path, json)
            .with_context(|| format!("failed to write OpenAPI document to {path:?}"))?,
        None => println!("{json}"),
    }
    Ok(())
}
