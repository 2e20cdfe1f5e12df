//! Fixed-width bit vectors.
//!
//! DSLX bit types may be far wider than any native integer, so the payload
//! is a [`BigUint`] paired with the declared width. The payload is always
//! below `2^width`.

use std::fmt;

use num_bigint::BigUint;
use num_traits::{One, ToPrimitive};

use crate::rng::RandomSource;

/// Digits between `_` separators in hex text.
const SEPARATOR_PERIOD: usize = 4;

fn mask(width: usize) -> BigUint {
    (BigUint::one() << width) - 1u32
}

/// An unsigned bit vector of a fixed width.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Bits {
    width: usize,
    value: BigUint,
}

impl Bits {
    pub fn zero(width: usize) -> Self {
        Self {
            width,
            value: BigUint::default(),
        }
    }

    pub fn all_ones(width: usize) -> Self {
        Self {
            width,
            value: mask(width),
        }
    }

    /// Builds a vector from a `u64`, or `None` if `value` needs more than
    /// `width` bits.
    pub fn from_u64(width: usize, value: u64) -> Option<Self> {
        let value = BigUint::from(value);
        (value.bits() <= width as u64).then_some(Self { width, value })
    }

    /// Builds a vector by asking `f` for every bit index, lowest first.
    pub fn from_fn(width: usize, mut f: impl FnMut(usize) -> bool) -> Self {
        let mut bits = Self::zero(width);
        for index in 0..width {
            if f(index) {
                bits.value.set_bit(index as u64, true);
            }
        }
        bits
    }

    /// Draws a vector uniformly from `[0, 2^width)`.
    pub fn random<R: RandomSource + ?Sized>(width: usize, rng: &mut R) -> Self {
        Self {
            width,
            value: rng.random_biguint(width as u64),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn count_ones(&self) -> usize {
        self.value.count_ones() as usize
    }

    /// Returns bit `index` (0 is the least significant bit).
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.width()`.
    pub fn bit(&self, index: usize) -> bool {
        assert!(
            index < self.width,
            "bit index {} out of range for width {}",
            index,
            self.width
        );
        self.value.bit(index as u64)
    }

    /// Inverts bit `index` in place.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.width()`.
    pub fn flip_bit(&mut self, index: usize) {
        let set = !self.bit(index);
        self.value.set_bit(index as u64, set);
    }

    /// Keeps the low-order `width` bits, discarding everything above.
    ///
    /// # Panics
    ///
    /// Panics if `width > self.width()`.
    pub fn slice_low(&self, width: usize) -> Bits {
        assert!(width <= self.width, "cannot slice {} bits out of {}", width, self.width);
        Bits {
            width,
            value: &self.value & mask(width),
        }
    }

    /// Places `high` above `self`: the result's low `self.width()` bits are
    /// `self` and the next `high.width()` bits are `high`.
    pub fn concat_above(&self, high: &Bits) -> Bits {
        Bits {
            width: self.width + high.width,
            value: &self.value | (&high.value << self.width),
        }
    }

    /// Concatenates `parts` with the first part in the most significant
    /// position.
    pub fn concat(parts: &[Bits]) -> Bits {
        parts
            .iter()
            .rev()
            .fold(Bits::zero(0), |acc, part| acc.concat_above(part))
    }

    pub fn to_u64(&self) -> Option<u64> {
        self.value.to_u64()
    }

    /// Hex rendering in the IR style: `0x` prefix, leading zero digits
    /// dropped, and `_` before every fourth digit counted from the right.
    pub fn to_hex_string(&self) -> String {
        let digits = self.value.to_str_radix(16);
        let count = digits.len();
        let mut out = String::with_capacity(2 + count + count / SEPARATOR_PERIOD);
        out.push_str("0x");
        for (i, digit) in digits.chars().enumerate() {
            let digit_no = count - 1 - i;
            if i > 0 && (digit_no + 1) % SEPARATOR_PERIOD == 0 {
                out.push('_');
            }
            out.push(digit);
        }
        out
    }
}

impl fmt::Display for Bits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex_string())
    }
}

impl fmt::Debug for Bits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bits[{}]:{}", self.width, self.to_hex_string())
    }
}
