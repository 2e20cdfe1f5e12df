//! Single bit-vector synthesis.

use crate::patterns::PatternCatalog;
use crate::rng::RandomSource;
use crate::value::{Bits, Value};

use super::ArgumentGenerator;

/// Share of draws taken from the pattern catalog rather than uniformly.
const INTERESTING_PATTERN_PROBABILITY: f64 = 0.9;

impl<C: PatternCatalog> ArgumentGenerator<C> {
    /// Produces a fresh bits value of `width` bits, usually one of the
    /// catalog's interesting patterns and otherwise a uniform draw.
    pub fn synthesize_bits<R: RandomSource + ?Sized>(
        &self,
        width: usize,
        signed: bool,
        rng: &mut R,
    ) -> Value {
        Value::Bits {
            signed,
            bits: self.synthesize_raw(width, rng),
        }
    }

    pub(super) fn synthesize_raw<R: RandomSource + ?Sized>(
        &self,
        width: usize,
        rng: &mut R,
    ) -> Bits {
        let p = rng.random();
        if p < INTERESTING_PATTERN_PROBABILITY {
            let mut patterns = self.catalog.patterns(width);
            if !patterns.is_empty() {
                let chosen = patterns.swap_remove(rng.choose_index(patterns.len()));
                debug_assert_eq!(
                    chosen.width(),
                    width,
                    "catalog returned a pattern of the wrong width"
                );
                return chosen;
            }
        }
        Bits::random(width, rng)
    }
}
