//! # CLI Execution Functions
//!
//! Extracted from `main.rs` to keep the entry point slim: config layering,
//! rayon configuration, and console reporting around [`audit::run`].

use anyhow::Result;
use primeaudit::config::{self, AuditConfig};
use primeaudit::{audit, AuditReport, GmpPredicate};
use tracing::{error, info, warn};

use super::Cli;

// ── Configuration ───────────────────────────────────────────────

/// Merge defaults, the optional TOML file, and command-line values, then
/// validate. Any error here aborts before sieving.
pub fn resolve_config(cli: &Cli) -> Result<AuditConfig> {
    let mut config = match &cli.config {
        Some(path) => config::parse_toml_file(path)?,
        None => AuditConfig::default(),
    };
    if let Some(upper_bound) = cli.upper_bound {
        config.upper_bound = upper_bound;
    }
    if let Some(certainty) = cli.certainty {
        config.certainty = certainty;
    }
    if let Some(parallel) = cli.parallel {
        config.parallel = parallel;
    }
    if let Some(samples) = cli.samples {
        config.samples = samples;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    if cli.threads.is_some() {
        config.threads = cli.threads;
    }
    config.validate()?;
    Ok(config)
}

// ── Audit ───────────────────────────────────────────────────────

/// Run the audit with the GMP predicate and report on stdout. Returns an
/// error if either check failed.
pub fn run_audit(config: &AuditConfig, json: bool) -> Result<()> {
    info!(
        cores = rayon::current_num_threads(),
        upper_bound = config.upper_bound,
        certainty = config.certainty,
        parallel = config.parallel,
        "primeaudit starting"
    );

    if !json {
        println!("Upper bound = {}", config.upper_bound);
        println!("Certainty = {}", config.certainty);
        println!("Parallel = {}", config.parallel);
    }

    let report = audit::run(config, &GmpPredicate);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    if !report.success {
        error!("Primality audit failed");
        anyhow::bail!("primality audit FAILED");
    }
    Ok(())
}

fn verdict(success: bool) -> &'static str {
    if success {
        "SUCCESS"
    } else {
        "FAILURE"
    }
}

fn print_report(report: &AuditReport) {
    println!("Created {} primes", report.prime_count);
    println!(
        "Prime test result: {} ({} of {} reported prime)",
        verdict(report.accuracy.success),
        report.accuracy.passed,
        report.accuracy.total
    );
    println!(
        "Non-prime test result: {} ({} sampled, {} rejected)",
        verdict(report.non_prime.success),
        report.non_prime.sampled,
        report.non_prime.rejected
    );
    for value in &report.non_prime.contradictions {
        println!("Prime value thought to be non-prime: {}", value);
    }
    if report.success {
        println!("Primality audit succeeded!");
    }
}

// ── Rayon Configuration ─────────────────────────────────────────

/// Configure the rayon global thread pool size (`None` or 0 = all cores).
pub fn configure_rayon(threads: Option<usize>) {
    let num_threads = threads.unwrap_or(0);
    if num_threads > 0 {
        if let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
        {
            warn!(error = %e, "Could not configure rayon thread pool");
        }
    }
}
