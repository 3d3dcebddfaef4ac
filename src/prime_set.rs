//! # Prime Set: Ordered Ground Truth plus Sentinel
//!
//! Turns a sieve map into the ordered set of `rug::Integer` values that both
//! audit checks consume. Alongside the sieved primes the set always carries
//! [`SENTINEL`] (`i32::MAX`), which exercises the test under audit at the edge
//! of the 32-bit range. The sentinel is inserted unconditionally and is never
//! checked against the sieve: it is the one member not vouched for as prime.
//! (It happens to be the Mersenne prime 2^31 - 1, but nothing relies on it.)
//!
//! The set is immutable once built and is shared read-only across rayon
//! workers during the accuracy check.

use rug::Integer;
use std::collections::btree_set;
use std::collections::BTreeSet;
use tracing::info;

use crate::sieve::{self, BitSieve};

/// Boundary value appended to every prime set.
pub const SENTINEL: i32 = i32::MAX;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimeSet {
    members: BTreeSet<Integer>,
}

impl PrimeSet {
    /// Sieve `[2, upper_bound]` and collect the result.
    pub fn generate(upper_bound: u32) -> Self {
        Self::from_bitmap(&sieve::prime_bitmap(upper_bound))
    }

    /// Collect a prime map (bit `i` set iff `i + 2` is prime) and append the
    /// sentinel.
    pub fn from_bitmap(bitmap: &BitSieve) -> Self {
        let mut members: BTreeSet<Integer> = bitmap
            .iter_set_bits()
            .map(|i| Integer::from(sieve::value_at(i)))
            .collect();
        members.insert(Integer::from(SENTINEL));

        let set = PrimeSet { members };
        info!(count = set.len(), "Created {} primes", set.len());
        set
    }

    /// Number of members, sentinel included.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always false for a built set, since the sentinel is always present.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, candidate: &Integer) -> bool {
        self.members.contains(candidate)
    }

    /// Largest member.
    pub fn last(&self) -> Option<&Integer> {
        self.members.last()
    }

    /// Members in ascending order.
    pub fn iter(&self) -> btree_set::Iter<'_, Integer> {
        self.members.iter()
    }

    /// Borrow the underlying ordered set (used for rayon iteration).
    pub fn members(&self) -> &BTreeSet<Integer> {
        &self.members
    }
}
