//! # Non-Prime Sampling: Cross-Checking Rejections Against the Sieve
//!
//! Draws random integers from `[2, max_prime)`, keeps the ones the test under
//! audit calls composite, and looks each of them up in the sieved prime set.
//! A hit means the test rejected a value the sieve proves prime, which is a
//! hard failure regardless of certainty.
//!
//! The sampling domain is 32-bit. `max_prime` is the largest member of the
//! set narrowed to `i32`; if that does not fit, the configured sieve bound is
//! used instead and the run carries on.
//!
//! The generator is `SmallRng` seeded from OS entropy. Callers that need a
//! reproducible draw pass their own RNG to [`verify_with_rng`].

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rug::Integer;
use serde::Serialize;
use tracing::{error, info, warn};

use crate::predicate::PrimalityPredicate;
use crate::prime_set::PrimeSet;

/// Default number of random candidates per run.
pub const DEFAULT_SAMPLES: usize = 10_000;

/// Lowest value in the sampling domain.
const SAMPLE_FLOOR: i32 = 2;

/// Outcome of the non-prime check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NonPrimeReport {
    /// Candidates drawn.
    pub sampled: usize,
    /// Candidates the predicate reported composite.
    pub rejected: usize,
    /// Exclusive upper end of the sampling domain.
    pub sample_bound: i32,
    /// Rejected candidates that are in the prime set, as decimal strings.
    pub contradictions: Vec<String>,
    pub success: bool,
}

/// Exclusive upper end of the sampling domain.
///
/// `largest` (the top of the prime set) if it fits in an `i32`, otherwise
/// `fallback` clamped into `i32`.
pub fn sample_bound(largest: Option<&Integer>, fallback: u32) -> i32 {
    match largest.and_then(Integer::to_i32) {
        Some(max) => max,
        None => {
            let bound = i32::try_from(fallback).unwrap_or(i32::MAX);
            warn!(
                fallback = bound,
                "Largest prime does not fit the sampling range, using configured bound"
            );
            bound
        }
    }
}

/// Draw `count` uniform values from `[2, bound)`. Empty if the range is empty.
pub fn draw_candidates<R: Rng>(rng: &mut R, count: usize, bound: i32) -> Vec<Integer> {
    if bound <= SAMPLE_FLOOR {
        return Vec::new();
    }
    (0..count)
        .map(|_| Integer::from(rng.gen_range(SAMPLE_FLOOR..bound)))
        .collect()
}

/// Run the non-prime check with an entropy-seeded generator.
pub fn verify<P>(
    primes: &PrimeSet,
    certainty: u32,
    samples: usize,
    fallback: u32,
    predicate: &P,
) -> NonPrimeReport
where
    P: PrimalityPredicate + ?Sized,
{
    let mut rng = SmallRng::from_entropy();
    verify_with_rng(primes, certainty, samples, fallback, predicate, &mut rng)
}

/// Run the non-prime check, drawing candidates from `rng`.
pub fn verify_with_rng<P, R>(
    primes: &PrimeSet,
    certainty: u32,
    samples: usize,
    fallback: u32,
    predicate: &P,
    rng: &mut R,
) -> NonPrimeReport
where
    P: PrimalityPredicate + ?Sized,
    R: Rng,
{
    let bound = sample_bound(primes.last(), fallback);
    let candidates = draw_candidates(rng, samples, bound);
    if candidates.is_empty() {
        warn!(bound, "Sampling range is empty, no candidates drawn");
    }
    check_candidates(primes, certainty, bound, candidates, predicate)
}

/// Filter `candidates` down to those the predicate rejects and look each one
/// up in `primes`.
pub fn check_candidates<P>(
    primes: &PrimeSet,
    certainty: u32,
    bound: i32,
    candidates: Vec<Integer>,
    predicate: &P,
) -> NonPrimeReport
where
    P: PrimalityPredicate + ?Sized,
{
    let sampled = candidates.len();

    let rejected: Vec<Integer> = candidates
        .into_iter()
        .filter(|n| !predicate.is_probable_prime(n, certainty))
        .collect();

    let contradictions: Vec<String> = rejected
        .iter()
        .filter(|n| primes.contains(n))
        .map(|n| n.to_string())
        .collect();

    for value in &contradictions {
        error!(value = %value, "Prime value thought to be non-prime");
    }

    let success = contradictions.is_empty();
    info!(
        sampled,
        rejected = rejected.len(),
        bound,
        success,
        "Non-prime sampling complete"
    );

    NonPrimeReport {
        sampled,
        rejected: rejected.len(),
        sample_bound: bound,
        contradictions,
        success,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicate::GmpPredicate;

    fn seeded() -> SmallRng {
        SmallRng::seed_from_u64(0x5eed)
    }

    // ── Sampling Domain ─────────────────────────────────────────────

    /// The sentinel fits in an i32, so it sets the domain.
    #[test]
    fn bound_is_sentinel_when_it_fits() {
        let primes = PrimeSet::generate(100);
        assert_eq!(sample_bound(primes.last(), 100), i32::MAX);
    }

    /// A top value past i32::MAX falls back to the configured bound.
    #[test]
    fn oversized_top_falls_back() {
        let too_big = Integer::from(i32::MAX) + 1u32;
        assert_eq!(sample_bound(Some(&too_big), 1_299_709), 1_299_709);
        assert_eq!(sample_bound(Some(&too_big), u32::MAX), i32::MAX);
        assert_eq!(sample_bound(None, 500), 500);
    }

    #[test]
    fn draws_stay_in_range() {
        let mut rng = seeded();
        let values = draw_candidates(&mut rng, 5000, 10);
        assert_eq!(values.len(), 5000);
        assert!(values.iter().all(|v| *v >= 2 && *v < 10));
        // All eight values in [2, 10) should appear in 5000 draws
        for k in 2..10 {
            assert!(values.iter().any(|v| *v == k), "{} never drawn", k);
        }
    }

    #[test]
    fn empty_domain_draws_nothing() {
        let mut rng = seeded();
        assert!(draw_candidates(&mut rng, 100, 2).is_empty());
        assert!(draw_candidates(&mut rng, 100, -5).is_empty());
    }

    // ── Verification ────────────────────────────────────────────────

    #[test]
    fn gmp_never_rejects_a_known_prime() {
        let primes = PrimeSet::generate(100_000);
        let report = verify(&primes, 100, 10_000, 100_000, &GmpPredicate);
        assert!(report.success);
        assert!(report.contradictions.is_empty());
        assert_eq!(report.sampled, 10_000);
        assert_eq!(report.sample_bound, i32::MAX);
    }

    /// A test that calls everything composite must be caught as soon as a
    /// draw lands on a sieved prime. Within [2, 100) a quarter of all
    /// values are primes.
    #[test]
    fn broken_predicate_is_caught() {
        let primes = PrimeSet::generate(100);
        let always_composite = |_: &Integer, _: u32| false;
        let candidates = draw_candidates(&mut seeded(), 1000, 100);

        let report = check_candidates(&primes, 50, 100, candidates, &always_composite);
        assert_eq!(report.sampled, 1000);
        assert_eq!(report.rejected, 1000);
        assert!(!report.success);
        assert!(report
            .contradictions
            .iter()
            .all(|v| primes.contains(&v.parse::<Integer>().unwrap())));
    }

    /// Over the full 32-bit domain the same broken test still rejects every
    /// draw, and the outcome tracks whether any draw hit the sieve.
    #[test]
    fn broken_predicate_full_domain() {
        let primes = PrimeSet::generate(1000);
        let always_composite = |_: &Integer, _: u32| false;
        let report = verify_with_rng(&primes, 50, 1000, 1000, &always_composite, &mut seeded());
        assert_eq!(report.rejected, 1000);
        assert_eq!(report.success, report.contradictions.is_empty());
    }

    /// A test that accepts everything rejects nothing and cannot contradict
    /// the sieve.
    #[test]
    fn accepting_predicate_passes_vacuously() {
        let primes = PrimeSet::generate(1000);
        let always_prime = |_: &Integer, _: u32| true;
        let report = verify_with_rng(&primes, 50, 500, 1000, &always_prime, &mut seeded());
        assert_eq!(report.rejected, 0);
        assert!(report.success);
    }

    /// Contradictions are exactly the rejected values that are sieved primes.
    #[test]
    fn contradictions_are_rejected_primes() {
        let primes = PrimeSet::generate(1000);
        // Wrongly rejects 997, the largest prime below 1000
        let misses_997 = |n: &Integer, c: u32| *n != 997 && GmpPredicate.is_probable_prime(n, c);
        let candidates: Vec<Integer> = [4u32, 997, 991, 999, 997]
            .iter()
            .map(|&v| Integer::from(v))
            .collect();
        let report = check_candidates(&primes, 40, 1000, candidates, &misses_997);
        assert_eq!(report.sampled, 5);
        assert_eq!(report.rejected, 4); // 4, 997, 999, 997
        assert_eq!(report.contradictions, vec!["997", "997"]);
        assert!(!report.success);
    }

    #[test]
    fn same_seed_same_report() {
        let primes = PrimeSet::generate(1000);
        let a = verify_with_rng(&primes, 20, 300, 1000, &GmpPredicate, &mut seeded());
        let b = verify_with_rng(&primes, 20, 300, 1000, &GmpPredicate, &mut seeded());
        assert_eq!(a, b);
    }
}
