//! # Sieve: Ground-Truth Prime Generation
//!
//! Produces the exact set of primes in `[2, upper_bound]` that every audit
//! check is judged against. No randomness is involved; two runs with the same
//! bound produce bit-identical maps.
//!
//! ## Algorithm: Sieve of Eratosthenes, offset 2
//!
//! Bit `i` of a map represents the integer `i + 2`, so a bound `n` needs
//! `n - 1` bits and the values 0 and 1 are never stored. Construction is two
//! explicit phases:
//!
//! 1. [`mark_composites`] sets bit `i` iff `i + 2` is composite. For each
//!    unmarked `p` with `p² <= n`, all multiples `p², p² + p, ...` are marked.
//! 2. [`prime_bitmap`] derives the complementary view, where a set bit means
//!    prime.
//!
//! Complexity: O(n log log n) time, O(n/64) words of space.
//!
//! ## References
//!
//! - Eratosthenes of Cyrene, ~240 BCE.
//! - OEIS A000720: pi(n), the prime counting function.

/// Offset between a bit index and the integer it represents.
pub const INDEX_OFFSET: u64 = 2;

/// Mark every composite in `[2, upper_bound]`.
///
/// Bit `i` of the result is set iff `i + 2` is composite. Bounds below 2
/// produce an empty map.
pub fn mark_composites(upper_bound: u32) -> BitSieve {
    if upper_bound < 2 {
        return BitSieve::new_all_clear(0);
    }
    let limit = upper_bound as u64;
    let mut composites = BitSieve::new_all_clear((limit - 1) as usize);

    let mut p: u64 = 2;
    while p * p <= limit {
        let mut m = p * p;
        while m <= limit {
            composites.set((m - INDEX_OFFSET) as usize);
            m += p;
        }
        // Skip to the next unmarked candidate
        p += 1;
        while p <= limit && composites.get((p - INDEX_OFFSET) as usize) {
            p += 1;
        }
    }
    composites
}

/// Primes in `[2, upper_bound]` as a bitmap: bit `i` is set iff `i + 2` is prime.
pub fn prime_bitmap(upper_bound: u32) -> BitSieve {
    mark_composites(upper_bound).complement()
}

/// Integer represented by bit `index` of a sieve map.
#[inline]
pub fn value_at(index: usize) -> u64 {
    index as u64 + INDEX_OFFSET
}

/// Packed bit array for sieve results.
///
/// 8× memory reduction over `Vec<bool>`: the default 1.3M bound fits in
/// ~160 KB. Uses hardware `POPCNT` (via `count_ones()`) for O(n/64) counting.
///
/// Bit layout: bit `i` is stored in word `i / 64`, bit position `i % 64`.
/// Bits past `len` in the last word are always clear.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BitSieve {
    words: Vec<u64>,
    len: usize,
}

impl BitSieve {
    /// Create a sieve of `len` bits, all cleared to 0.
    pub fn new_all_clear(len: usize) -> Self {
        BitSieve {
            words: vec![0u64; len.div_ceil(64)],
            len,
        }
    }

    /// Number of bits in this sieve.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if sieve has zero length.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Get bit `index`.
    ///
    /// # Panics
    /// Panics if `index >= len`.
    #[inline]
    pub fn get(&self, index: usize) -> bool {
        debug_assert!(
            index < self.len,
            "BitSieve index out of bounds: {} >= {}",
            index,
            self.len
        );
        let word = self.words[index / 64];
        word & (1u64 << (index % 64)) != 0
    }

    /// Set bit `index` to 1.
    #[inline]
    pub fn set(&mut self, index: usize) {
        debug_assert!(index < self.len);
        self.words[index / 64] |= 1u64 << (index % 64);
    }

    /// Count the number of set bits using hardware POPCNT.
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// A new map of the same length with every bit inverted.
    pub fn complement(&self) -> BitSieve {
        let mut inverted = BitSieve {
            words: self.words.iter().map(|w| !w).collect(),
            len: self.len,
        };
        inverted.mask_tail();
        inverted
    }

    /// Iterate over the indices of all set bits in ascending order.
    pub fn iter_set_bits(&self) -> impl Iterator<Item = usize> + '_ {
        self.words.iter().enumerate().flat_map(|(wi, &word)| {
            let base = wi * 64;
            BitIter { word, base }
        })
    }

    fn mask_tail(&mut self) {
        let extra = self.words.len() * 64 - self.len;
        if extra > 0 {
            if let Some(last) = self.words.last_mut() {
                *last &= u64::MAX >> extra;
            }
        }
    }
}

/// Iterator over set bits within a single u64 word.
struct BitIter {
    word: u64,
    base: usize,
}

impl Iterator for BitIter {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.word == 0 {
            return None;
        }
        let tz = self.word.trailing_zeros() as usize;
        self.word &= self.word - 1; // clear lowest set bit
        Some(self.base + tz)
    }
}
