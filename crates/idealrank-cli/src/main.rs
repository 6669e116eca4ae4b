//! idealrank — rank candidates by similarity to the ideal solution.
//! Entry point for the command-line binary.

mod config;

use std::fs::File;
use std::io::{BufWriter, Write};

use anyhow::Context;
use clap::Parser;
use idealrank_common::RunConfig;
use idealrank_ranker::{load_path, LoaderOptions, RenderOptions, RunParams, Topsis};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("idealrank=info,idealrank_ranker=info,warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    // stdout carries the ranking
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(config: &RunConfig) -> anyhow::Result<()> {
    let input = config
        .input
        .path
        .as_ref()
        .context("No input table configured")?;

    let table = load_path(input, &LoaderOptions::from(&config.input))
        .with_context(|| format!("Failed to load decision table from {}", input.display()))?;
    let params = RunParams::try_from(&config.criteria).context("Invalid attribute weights")?;
    debug!(weights = ?params.weights.as_slice(), costs = ?params.costs, "run parameters");

    let topsis = Topsis::new(table).context("Failed to normalise decision table")?;
    let outcome = topsis.run(&params).context("TOPSIS run failed")?;

    let mut ranking = outcome.ranking;
    if let Some(n) = config.output.top_n {
        ranking.truncate(n);
    }

    let options = RenderOptions::from(&config.output);
    match &config.output.path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file {}", path.display()))?;
            let mut out = BufWriter::new(file);
            idealrank_ranker::render(&ranking, &options, &mut out)?;
            out.flush()?;
            info!("Wrote {} ranking to {}", options.format, path.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            idealrank_ranker::render(&ranking, &options, &mut out)?;
            out.flush()?;
        }
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = config::Cli::parse();
    init_logging(cli.verbose);

    info!("idealrank v{}", env!("CARGO_PKG_VERSION"));

    let config = cli.resolve()?;
    run(&config)
}
