//! # Main: CLI Entry Point
//!
//! Parses the audit parameters, layers them over an optional TOML config file,
//! configures logging and the rayon pool, runs the audit against GMP's
//! probable-prime test, and turns an overall failure into a non-zero exit.
//!
//! ## Arguments
//!
//! Positional, all optional: `UPPER_BOUND` (default 1299709), `CERTAINTY`
//! (default 100), `PARALLEL` (default true).
//!
//! ## Options
//!
//! - `--config` / `PRIMEAUDIT_CONFIG`: TOML file with any audit setting.
//! - `--samples` / `PRIMEAUDIT_SAMPLES`: random candidates for the non-prime check.
//! - `--seed`: fixed RNG seed for reproducible sampling.
//! - `--threads`: Rayon thread pool size (0 = all cores).
//! - `--json`: print the final report as JSON on stdout.
//!
//! `LOG_FORMAT=json` switches logs to JSON; `RUST_LOG` sets the filter.

mod cli;

use anyhow::Result;
use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(
    name = "primeaudit",
    about = "Audit a probabilistic primality test against a sieved ground truth"
)]
struct Cli {
    /// Largest integer to sieve (inclusive)
    upper_bound: Option<u32>,

    /// Certainty parameter: the test claims error at most 4^-floor(c/2)
    certainty: Option<u32>,

    /// Evaluate the accuracy check in parallel (true/false)
    #[arg(action = ArgAction::Set, value_parser = BoolishValueParser::new())]
    parallel: Option<bool>,

    /// TOML file with audit settings (overridden by command-line values)
    #[arg(long, env = "PRIMEAUDIT_CONFIG")]
    config: Option<PathBuf>,

    /// Number of random candidates drawn by the non-prime check
    #[arg(long, env = "PRIMEAUDIT_SAMPLES")]
    samples: Option<usize>,

    /// Seed for the sampling RNG (defaults to OS entropy)
    #[arg(long)]
    seed: Option<u64>,

    /// Number of rayon worker threads (defaults to all logical cores)
    #[arg(long)]
    threads: Option<usize>,

    /// Print the final report as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    // Initialize structured logging: LOG_FORMAT=json for machine ingestion, human-readable otherwise
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_default();
    if log_format == "json" {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    }

    let cli = Cli::parse();
    let config = cli::resolve_config(&cli)?;
    cli::configure_rayon(config.threads);
    cli::run_audit(&config, cli.json)
}
