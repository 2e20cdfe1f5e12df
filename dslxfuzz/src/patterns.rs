//! Catalogs of "interesting" bit patterns.
//!
//! The bit value synthesizer picks most of its values from a catalog of
//! boundary patterns for the requested width, since those are the values
//! most likely to shake out overflow, sign and shift bugs in the compiler.

use crate::value::Bits;

/// Supplies the interesting bit patterns for a width.
///
/// Every returned vector must be exactly `width` bits wide.
pub trait PatternCatalog {
    fn patterns(&self, width: usize) -> Vec<Bits>;
}

impl<F> PatternCatalog for F
where
    F: Fn(usize) -> Vec<Bits>,
{
    fn patterns(&self, width: usize) -> Vec<Bits> {
        self(width)
    }
}

/// The default catalog: zero, all ones, lowest bit, signed extremes and the
/// two alternating patterns.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardPatterns;

impl PatternCatalog for StandardPatterns {
    fn patterns(&self, width: usize) -> Vec<Bits> {
        if width == 0 {
            return vec![Bits::zero(0)];
        }
        let high = width - 1;
        let candidates = [
            Bits::zero(width),
            Bits::all_ones(width),
            // Lowest bit set.
            Bits::from_fn(width, |i| i == 0),
            // Signed minimum.
            Bits::from_fn(width, |i| i == high),
            // Signed maximum.
            Bits::from_fn(width, |i| i < high),
            // ...0101
            Bits::from_fn(width, |i| i % 2 == 0),
            // ...1010
            Bits::from_fn(width, |i| i % 2 == 1),
        ];

        let mut patterns: Vec<Bits> = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            if !patterns.contains(&candidate) {
                patterns.push(candidate);
            }
        }
        patterns
    }
}
