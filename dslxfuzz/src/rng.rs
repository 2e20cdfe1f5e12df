//! Random sources.
//!
//! Every generator in this crate draws through [`RandomSource`], which is
//! implemented for any [`rand::Rng`]. Fuzzing runs use [`FuzzRng`]: a
//! ChaCha8 stream whose output for a given seed does not depend on the
//! platform or the `rand` release, so a logged seed reproduces a sample.

use num_bigint::{BigUint, RandBigInt};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// The seeded generator used for reproducible fuzzing runs.
pub type FuzzRng = ChaCha8Rng;

/// Creates a generator whose stream is fully determined by `seed`.
pub fn seeded_rng(seed: u64) -> FuzzRng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// The random operations the value generators rely on.
pub trait RandomSource {
    /// Uniform real in `[0, 1)`.
    fn random(&mut self) -> f64;

    /// Uniform integer in `[0, limit)`. `limit` must be non-zero.
    fn below(&mut self, limit: u64) -> u64;

    /// Uniform integer in `[low, high]`.
    fn range_inclusive(&mut self, low: u64, high: u64) -> u64;

    /// Uniform index into a collection of `len` elements. `len` must be
    /// non-zero.
    fn choose_index(&mut self, len: usize) -> usize;

    /// Uniform integer in `[0, 2^bits)`.
    fn random_biguint(&mut self, bits: u64) -> BigUint;

    /// Triangular distribution over `[low, high]` with its peak at `mode`.
    fn triangular(&mut self, low: f64, high: f64, mode: f64) -> f64 {
        let mut u = self.random();
        if high == low {
            return low;
        }
        let mut c = (mode - low) / (high - low);
        let (mut low, mut high) = (low, high);
        if u > c {
            u = 1.0 - u;
            c = 1.0 - c;
            std::mem::swap(&mut low, &mut high);
        }
        low + (high - low) * (u * c).sqrt()
    }
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn random(&mut self) -> f64 {
        self.gen::<f64>()
    }

    fn below(&mut self, limit: u64) -> u64 {
        self.gen_range(0..limit)
    }

    fn range_inclusive(&mut self, low: u64, high: u64) -> u64 {
        self.gen_range(low..=high)
    }

    fn choose_index(&mut self, len: usize) -> usize {
        self.gen_range(0..len)
    }

    fn random_biguint(&mut self, bits: u64) -> BigUint {
        self.gen_biguint(bits)
    }
}

/// Integer in `[0, limit)` drawn from a triangular distribution peaking at
/// zero, so small results are far more likely than large ones.
pub fn biased_towards_zero<R: RandomSource + ?Sized>(limit: usize, rng: &mut R) -> usize {
    let high = limit.saturating_sub(1) as f64;
    rng.triangular(0.0, high, 0.0) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = seeded_rng(1234);
        let mut b = seeded_rng(1234);
        for bits in [1, 64, 65, 200] {
            assert_eq!(a.random_biguint(bits), b.random_biguint(bits));
        }
        assert_eq!(a.random().to_bits(), b.random().to_bits());
    }

    #[test]
    fn test_different_seeds_diverge() {
        let mut a = seeded_rng(1);
        let mut b = seeded_rng(2);
        assert_ne!(a.random_biguint(256), b.random_biguint(256));
    }

    #[test]
    fn test_random_unit_interval() {
        let mut rng = seeded_rng(3);
        for _ in 0..1000 {
            let p = rng.random();
            assert!((0.0..1.0).contains(&p));
        }
    }

    #[test]
    fn test_range_inclusive_hits_both_ends() {
        let mut rng = seeded_rng(4);
        let draws: Vec<u64> = (0..500).map(|_| rng.range_inclusive(1, 10)).collect();
        assert!(draws.iter().all(|d| (1..=10).contains(d)));
        assert!(draws.contains(&1));
        assert!(draws.contains(&10));
    }

    #[test]
    fn test_triangular_degenerate_range() {
        let mut rng = seeded_rng(5);
        assert_eq!(rng.triangular(0.0, 0.0, 0.0), 0.0);
    }

    #[test]
    fn test_biased_towards_zero_bounds_and_skew() {
        let mut rng = seeded_rng(6);
        assert_eq!(biased_towards_zero(1, &mut rng), 0);

        let draws: Vec<usize> = (0..4000).map(|_| biased_towards_zero(32, &mut rng)).collect();
        assert!(draws.iter().all(|&d| d < 32));
        let low = draws.iter().filter(|&&d| d < 8).count();
        let high = draws.iter().filter(|&&d| d >= 24).count();
        assert!(low > high * 4, "low={} high={}", low, high);
    }
}
