//! Structured inputs for fuzzing argument generation.
//!
//! `FuzzType` implements `Arbitrary` to produce bounded parameter types:
//! nesting stops at [`MAX_DEPTH`], widths stay at or below [`MAX_WIDTH`] and
//! arrays are short, so a single input cannot ask for gigabytes of values.

use arbitrary::{Arbitrary, Unstructured};
use dslxfuzz::ConcreteType;

pub const MAX_DEPTH: usize = 3;
pub const MAX_WIDTH: usize = 300;
pub const MAX_ARRAY_LENGTH: usize = 6;
pub const MAX_TUPLE_MEMBERS: usize = 5;
pub const MAX_PARAMS: usize = 6;
pub const MAX_CALLS: usize = 4;

/// A parameter type with bounded size.
#[derive(Debug, Clone)]
pub struct FuzzType(pub ConcreteType);

impl FuzzType {
    fn arbitrary_at(u: &mut Unstructured<'_>, depth: usize) -> arbitrary::Result<ConcreteType> {
        let kind: u8 = if depth >= MAX_DEPTH { 0 } else { u.int_in_range(0..=3)? };
        match kind {
            // Weighted towards bits so most inputs bottom out quickly.
            0 | 1 => {
                let width = u.int_in_range(1..=MAX_WIDTH)?;
                Ok(ConcreteType::bits(width, u.arbitrary()?))
            }
            2 => {
                let length = u.int_in_range(0..=MAX_ARRAY_LENGTH)?;
                Ok(ConcreteType::array(Self::arbitrary_at(u, depth + 1)?, length))
            }
            _ => {
                let count = u.int_in_range(0..=MAX_TUPLE_MEMBERS)?;
                let members = (0..count)
                    .map(|_| Self::arbitrary_at(u, depth + 1))
                    .collect::<arbitrary::Result<Vec<_>>>()?;
                Ok(ConcreteType::tuple(members))
            }
        }
    }
}

impl<'a> Arbitrary<'a> for FuzzType {
    fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        Self::arbitrary_at(u, 0).map(FuzzType)
    }
}

/// A parameter list, RNG seed and call count.
#[derive(Debug, Clone)]
pub struct FuzzSignature {
    pub params: Vec<ConcreteType>,
    pub seed: u64,
    pub calls_per_sample: usize,
}

impl<'a> Arbitrary<'a> for FuzzSignature {
    fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        let count = u.int_in_range(0..=MAX_PARAMS)?;
        let params = (0..count)
            .map(|_| FuzzType::arbitrary(u).map(|t| t.0))
            .collect::<arbitrary::Result<Vec<_>>>()?;
        Ok(FuzzSignature {
            params,
            seed: u.arbitrary()?,
            calls_per_sample: u.int_in_range(0..=MAX_CALLS)?,
        })
    }
}
