//! # Audit: Sieve, Collect, Verify
//!
//! Runs the whole pipeline for one configuration: sieve the ground truth,
//! collect it into a [`PrimeSet`], then run the accuracy and non-prime checks
//! independently. The overall verdict is the conjunction of the two.

use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::Serialize;
use std::time::Instant;
use tracing::info;

use crate::accuracy::{self, AccuracyReport};
use crate::config::AuditConfig;
use crate::non_prime::{self, NonPrimeReport};
use crate::predicate::PrimalityPredicate;
use crate::prime_set::PrimeSet;

/// Combined result of both checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditReport {
    pub upper_bound: u32,
    pub certainty: u32,
    pub parallel: bool,
    /// Size of the prime set, sentinel included.
    pub prime_count: usize,
    pub accuracy: AccuracyReport,
    pub non_prime: NonPrimeReport,
    pub success: bool,
}

/// Run both checks against `predicate`. The configuration is assumed valid.
pub fn run<P>(config: &AuditConfig, predicate: &P) -> AuditReport
where
    P: PrimalityPredicate + ?Sized,
{
    let start = Instant::now();
    let primes = PrimeSet::generate(config.upper_bound);
    info!(
        count = primes.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Prime set ready"
    );

    let accuracy = accuracy::verify(&primes, config.certainty, config.parallel, predicate);

    let non_prime = match config.seed {
        Some(seed) => non_prime::verify_with_rng(
            &primes,
            config.certainty,
            config.samples,
            config.upper_bound,
            predicate,
            &mut SmallRng::seed_from_u64(seed),
        ),
        None => non_prime::verify(
            &primes,
            config.certainty,
            config.samples,
            config.upper_bound,
            predicate,
        ),
    };

    let success = accuracy.success && non_prime.success;
    info!(
        success,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Audit complete"
    );

    AuditReport {
        upper_bound: config.upper_bound,
        certainty: config.certainty,
        parallel: config.parallel,
        prime_count: primes.len(),
        accuracy,
        non_prime,
        success,
    }
}
