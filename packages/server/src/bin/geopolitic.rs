//! CLI for running the research pipeline once
//!
//! Prints the rendered report to stdout. Logs go to stderr.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use geopolitic::{sanitize_output, Infosphere, SeedSources};
use server_core::{kernel::build_pipeline, telemetry, Config};

#[derive(Parser)]
#[command(name = "geopolitic")]
#[command(about = "Run the multi-perspective research pipeline for one query")]
struct Cli {
    /// Query to analyze
    query: String,

    /// Which infosphere sources to use: english or polish
    #[arg(long, default_value = "english")]
    infosphere: String,

    /// Run the four lens branches concurrently
    #[arg(long)]
    parallel: bool,

    /// JSON file with seed sources: one list for every scope, or an object
    /// keyed by left, centrist, right, people and fact
    #[arg(long)]
    seeds: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    telemetry::init_tracing();

    let cli = Cli::parse();

    let mut config = Config::from_env().context("Failed to load configuration")?;
    config.parallel_lenses |= cli.parallel;

    let infosphere: Infosphere = cli.infosphere.parse()?;
    let seeds = cli.seeds.as_deref().map(load_seeds).transpose()?;

    let pipeline = build_pipeline(&config)?;
    let report = pipeline.run(&cli.query, seeds.as_ref(), infosphere).await?;

    println!("{}", report);
    Ok(())
}

fn load_seeds(path: &Path) -> Result<SeedSources> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read seed file {}", path.display()))?;
    serde_json::from_str(&sanitize_output(&bytes))
        .with_context(|| format!("Invalid seed file {}", path.display()))
}
