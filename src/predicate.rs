//! # Predicate: the Primality Test Under Audit
//!
//! The audit never looks inside a primality test. Everything it needs is the
//! signature `(candidate, certainty) -> bool` and the documented contract that
//! a test with certainty `c` errs with probability at most `4^-floor(c/2)`.
//!
//! [`GmpPredicate`] is the default collaborator: GMP's `mpz_probab_prime_p`
//! through `rug`, with `ceil(c/2)` Miller-Rabin rounds. Each round has error
//! at most 1/4, so `ceil(c/2)` rounds meet the `2^-c` bound. Closures also
//! implement the trait, which is how tests inject deliberately broken tests.

use rug::integer::IsPrime;
use rug::Integer;

/// A probabilistic primality test.
///
/// Implementations must be pure: the answer may only depend on `candidate`,
/// `certainty` and internal randomness, never on shared mutable state. The
/// accuracy check evaluates them from many rayon workers at once.
pub trait PrimalityPredicate: Sync {
    fn is_probable_prime(&self, candidate: &Integer, certainty: u32) -> bool;
}

impl<F> PrimalityPredicate for F
where
    F: Fn(&Integer, u32) -> bool + Sync,
{
    fn is_probable_prime(&self, candidate: &Integer, certainty: u32) -> bool {
        self(candidate, certainty)
    }
}

/// GMP-backed probable-prime test.
#[derive(Debug, Clone, Copy, Default)]
pub struct GmpPredicate;

impl GmpPredicate {
    /// Miller-Rabin rounds needed for an error bound of `2^-certainty`.
    pub fn rounds_for(certainty: u32) -> u32 {
        certainty.div_ceil(2).max(1)
    }
}

impl PrimalityPredicate for GmpPredicate {
    fn is_probable_prime(&self, candidate: &Integer, certainty: u32) -> bool {
        // A non-positive certainty demands nothing, so every value passes
        if certainty == 0 {
            return true;
        }
        candidate.is_probably_prime(Self::rounds_for(certainty)) != IsPrime::No
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_for_rounds_up() {
        assert_eq!(GmpPredicate::rounds_for(1), 1);
        assert_eq!(GmpPredicate::rounds_for(2), 1);
        assert_eq!(GmpPredicate::rounds_for(3), 2);
        assert_eq!(GmpPredicate::rounds_for(100), 50);
    }

    #[test]
    fn gmp_accepts_known_primes() {
        for &p in &[2u32, 3, 5, 7, 101, 1009, 10007, 1_299_709, 2_147_483_647] {
            assert!(
                GmpPredicate.is_probable_prime(&Integer::from(p), 100),
                "GMP rejected prime {}",
                p
            );
        }
    }

    #[test]
    fn gmp_rejects_composites() {
        // 561 and 1105 are Carmichael numbers; 2^32 + 1 = 641 * 6700417
        let composites = [
            Integer::from(0u32),
            Integer::from(1u32),
            Integer::from(4u32),
            Integer::from(561u32),
            Integer::from(1105u32),
            Integer::from(1_299_709u64 * 1_299_721),
            (Integer::from(1u32) << 32) + 1u32,
        ];
        for c in &composites {
            assert!(
                !GmpPredicate.is_probable_prime(c, 100),
                "GMP accepted composite {}",
                c
            );
        }
    }

    #[test]
    fn zero_certainty_accepts_everything() {
        assert!(GmpPredicate.is_probable_prime(&Integer::from(4u32), 0));
    }

    #[test]
    fn closures_are_predicates() {
        let always_composite = |_: &Integer, _: u32| false;
        assert!(!always_composite.is_probable_prime(&Integer::from(7u32), 10));
    }
}
