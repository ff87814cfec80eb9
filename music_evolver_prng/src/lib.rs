// Deterministic, portable pseudo-random number generator.
//
// Implements xoshiro256++ (Blackman & Vigna, 2019) with SplitMix64 seeding.
// Hand-rolled with zero external dependencies so that a given seed produces
// the same composition on every platform.
//
// `music_evolver` never touches a process-wide random source. Every call that
// needs randomness (melody seeding, the scale walk) takes a `&mut SeededRng`
// owned by the caller, so concurrent requests each carry their own stream and
// tests pin the stream with `SeededRng::new(seed)`.
//
// **Critical constraint: determinism.** Every method on `SeededRng` must
// produce identical output given the same prior state, regardless of platform,
// compiler version, or optimization level. No floating-point arithmetic in the
// core generator.

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Xoshiro256++ PRNG: the composer's only source of randomness.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SeededRng {
    s: [u64; 4],
}

impl SeededRng {
    /// Create a new PRNG seeded from a `u64`.
    ///
    /// Uses SplitMix64 to expand the seed into the 256-bit internal state.
    /// Two `SeededRng` instances created with the same seed will produce
    /// identical output sequences.
    pub fn new(seed: u64) -> Self {
        let mut sm = seed;
        Self {
            s: [
                splitmix64(&mut sm),
                splitmix64(&mut sm),
                splitmix64(&mut sm),
                splitmix64(&mut sm),
            ],
        }
    }

    /// Create a PRNG from the wall clock, for runs that don't ask for a
    /// reproducible seed. Returns the seed alongside the generator so the
    /// caller can report it and the run can be replayed later.
    pub fn from_entropy() -> (Self, u64) {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0);
        let mut sm = nanos ^ u64::from(std::process::id()).rotate_left(32);
        let seed = splitmix64(&mut sm);
        (Self::new(seed), seed)
    }

    /// Generate the next `u64` in the sequence.
    pub fn next_u64(&mut self) -> u64 {
        let result = (self.s[0].wrapping_add(self.s[3]))
            .rotate_left(23)
            .wrapping_add(self.s[0]);

        let t = self.s[1] << 17;

        self.s[2] ^= self.s[0];
        self.s[3] ^= self.s[1];
        self.s[1] ^= self.s[2];
        self.s[0] ^= self.s[3];

        self.s[2] ^= t;
        self.s[3] = self.s[3].rotate_left(45);

        result
    }

    /// Generate a uniform random integer in `[low, high)`.
    ///
    /// Uses rejection sampling to avoid modulo bias.
    /// Panics if `low >= high`.
    pub fn range_u64(&mut self, low: u64, high: u64) -> u64 {
        assert!(low < high, "range_u64: low must be less than high");
        let range = high - low;
        if range.is_power_of_two() {
            return low + (self.next_u64() & (range - 1));
        }
        let threshold = range.wrapping_neg() % range; // = (2^64 - range) % range
        loop {
            let r = self.next_u64();
            if r >= threshold {
                return low + (r % range);
            }
        }
    }

    /// Generate a uniform random `usize` in `[low, high)`.
    ///
    /// Panics if `low >= high`.
    pub fn range_usize(&mut self, low: usize, high: usize) -> usize {
        self.range_u64(low as u64, high as u64) as usize
    }

    /// Pick one element uniformly from a slice, or `None` if it is empty.
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        items.get(self.range_usize(0, items.len()))
    }
}

/// SplitMix64, used for seeding xoshiro256++ from a single `u64`.
fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn determinism_same_seed_same_output() {
        let mut a = SeededRng::new(42);
        let mut b = SeededRng::new(42);
        for _ in 0..1000 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn different_seeds_different_output() {
        let mut a = SeededRng::new(42);
        let mut b = SeededRng::new(43);
        assert_ne!(a.next_u64(), b.next_u64());
    }

    #[test]
    fn range_u64_within_bounds() {
        let mut rng = SeededRng::new(999);
        for _ in 0..10_000 {
            let v = rng.range_u64(10, 20);
            assert!((10..20).contains(&v), "range_u64 out of range: {v}");
        }
    }

    #[test]
    fn range_usize_hits_every_value() {
        let mut rng = SeededRng::new(555);
        let mut seen = [false; 5];
        for _ in 0..10_000 {
            let v = rng.range_usize(0, 5);
            assert!(v < 5, "range_usize out of range: {v}");
            seen[v] = true;
        }
        assert!(seen.iter().all(|&s| s), "every bucket should be reachable");
    }

    #[test]
    fn choose_returns_member() {
        let mut rng = SeededRng::new(7);
        let items = [60u8, 62, 64, 65, 67, 69, 71];
        for _ in 0..1000 {
            let picked = rng.choose(&items).copied();
            assert!(picked.is_some_and(|p| items.contains(&p)));
        }
    }

    #[test]
    fn choose_empty_is_none() {
        let mut rng = SeededRng::new(7);
        let items: [u8; 0] = [];
        assert_eq!(rng.choose(&items), None);
    }

    #[test]
    fn from_entropy_reports_replayable_seed() {
        let (mut rng, seed) = SeededRng::from_entropy();
        let mut replay = SeededRng::new(seed);
        for _ in 0..100 {
            assert_eq!(rng.next_u64(), replay.next_u64());
        }
    }

    #[test]
    fn serialization_roundtrip() {
        let mut rng = SeededRng::new(42);
        for _ in 0..100 {
            rng.next_u64();
        }
        let json = serde_json::to_string(&rng).unwrap();
        let mut restored: SeededRng = serde_json::from_str(&json).unwrap();
        for _ in 0..100 {
            assert_eq!(rng.next_u64(), restored.next_u64());
        }
    }
}
