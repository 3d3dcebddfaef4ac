//! # Accuracy: False-Negative Rate Against the Certainty Bound
//!
//! Every member of a [`PrimeSet`] is run through the test under audit. With
//! certainty `c` the test promises to misreport a prime with probability at
//! most `4^-floor(c/2)`, so over `n` members the observed pass count `p` must
//! satisfy
//!
//! ```text
//! p / n >= 1 - 1/C        where C = 4^floor(c/2)
//! p * C >= n * (C - 1)    (cleared of fractions)
//! ```
//!
//! `C` has `2 * floor(c/2)` bits, far beyond `f64` for any realistic
//! certainty, so the comparison is carried out in `rug::Integer`.
//!
//! Evaluation fans out over rayon when `parallel` is set. The predicate is
//! pure and the only reduction is a count, so both paths agree exactly.

use rayon::prelude::*;
use rug::Integer;
use serde::Serialize;
use tracing::{error, info};

use crate::predicate::PrimalityPredicate;
use crate::prime_set::PrimeSet;

/// Outcome of the accuracy check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccuracyReport {
    pub total: u64,
    pub passed: u64,
    pub certainty: u32,
    pub parallel: bool,
    pub success: bool,
}

/// `C = 4^floor(certainty/2)`, computed as a shift.
pub fn error_denominator(certainty: u32) -> Integer {
    Integer::from(1u32) << (2 * (certainty / 2))
}

/// Exact acceptance test: `passed * C >= total * (C - 1)`.
pub fn meets_bound(passed: u64, total: u64, certainty: u32) -> bool {
    let c = error_denominator(certainty);
    let left = Integer::from(passed) * &c;
    let right = Integer::from(total) * (c - 1u32);
    left >= right
}

/// Count the members the predicate reports as prime.
pub fn count_passes<P>(primes: &PrimeSet, certainty: u32, parallel: bool, predicate: &P) -> u64
where
    P: PrimalityPredicate + ?Sized,
{
    let passed = if parallel {
        primes
            .members()
            .par_iter()
            .filter(|n| predicate.is_probable_prime(n, certainty))
            .count()
    } else {
        primes
            .iter()
            .filter(|n| predicate.is_probable_prime(n, certainty))
            .count()
    };
    passed as u64
}

/// Run the accuracy check over every member of `primes`.
pub fn verify<P>(primes: &PrimeSet, certainty: u32, parallel: bool, predicate: &P) -> AccuracyReport
where
    P: PrimalityPredicate + ?Sized,
{
    let total = primes.len() as u64;
    let passed = count_passes(primes, certainty, parallel, predicate);
    let success = meets_bound(passed, total, certainty);

    if success {
        info!(passed, total, certainty, "Probable prime certainty test passed");
    } else {
        error!(passed, total, certainty, "Probable prime certainty test failed");
    }

    AccuracyReport {
        total,
        passed,
        certainty,
        parallel,
        success,
    }
}
