//! Type-directed argument generation.
//!
//! [`ArgumentGenerator`] builds values that match a [`ConcreteType`] exactly.
//! Bits leaves are either synthesized fresh or derived from a value generated
//! earlier in the same argument batch (the "prior pool"): the earlier value's
//! bit pattern is resized to the requested width and a few of its bits are
//! flipped. This makes later arguments correlated with earlier ones, which is
//! what exposes comparison and aliasing bugs that independent random inputs
//! rarely hit.
//!
//! ## Batches
//!
//! ```text
//! build_batches(types, n)
//!   └─ n × build_arguments(types)        fresh pool per call
//!        └─ generate_argument(ty, pool)  pool = values so far, left to right
//! ```

mod synth;

use crate::error::FuzzError;
use crate::patterns::{PatternCatalog, StandardPatterns};
use crate::rng::{biased_towards_zero, RandomSource};
use crate::types::ConcreteType;
use crate::value::{Bits, Value};

/// Chance that a bits leaf is synthesized fresh even though the prior pool
/// has material to mutate.
const FRESH_VALUE_PROBABILITY: f64 = 0.5;

/// Generates argument values for concrete types, drawing interesting bit
/// patterns from its catalog.
#[derive(Debug, Clone)]
pub struct ArgumentGenerator<C = StandardPatterns> {
    catalog: C,
}

impl ArgumentGenerator<StandardPatterns> {
    /// A generator using [`StandardPatterns`].
    pub fn standard() -> Self {
        Self::new(StandardPatterns)
    }
}

impl Default for ArgumentGenerator<StandardPatterns> {
    fn default() -> Self {
        Self::standard()
    }
}

impl<C: PatternCatalog> ArgumentGenerator<C> {
    pub fn new(catalog: C) -> Self {
        Self { catalog }
    }

    /// Generates a value of type `ty`.
    ///
    /// Every bits leaf may be a mutation of a randomly chosen value from
    /// `prior`; tuple members and array elements all see the same pool.
    pub fn generate_argument<R: RandomSource + ?Sized>(
        &self,
        ty: &ConcreteType,
        rng: &mut R,
        prior: &[Value],
    ) -> Result<Value, FuzzError> {
        match ty {
            ConcreteType::Tuple { members } => members
                .iter()
                .map(|member| self.generate_argument(member, rng, prior))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Tuple),
            ConcreteType::Array { element, length } => (0..*length)
                .map(|_| self.generate_argument(element, rng, prior))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            ConcreteType::Bits { width, signed } => {
                if prior.is_empty() || rng.random() < FRESH_VALUE_PROBABILITY {
                    return Ok(self.synthesize_bits(*width, *signed, rng));
                }
                Ok(Value::Bits {
                    signed: *signed,
                    bits: self.mutate_prior(*width, rng, prior),
                })
            }
            ConcreteType::Token | ConcreteType::Function { .. } => {
                Err(FuzzError::UnsupportedType { ty: ty.clone() })
            }
        }
    }

    /// Generates one value per type, left to right. Each value may mutate
    /// any value generated before it in this call.
    pub fn build_arguments<R: RandomSource + ?Sized>(
        &self,
        types: &[ConcreteType],
        rng: &mut R,
    ) -> Result<Vec<Value>, FuzzError> {
        let mut args = Vec::with_capacity(types.len());
        for ty in types {
            let value = self.generate_argument(ty, rng, &args)?;
            args.push(value);
        }
        Ok(args)
    }

    /// Runs [`build_arguments`](Self::build_arguments) `calls_per_sample`
    /// times. Batches share the random stream but never each other's pools.
    pub fn build_batches<R: RandomSource + ?Sized>(
        &self,
        types: &[ConcreteType],
        rng: &mut R,
        calls_per_sample: usize,
    ) -> Result<Vec<Vec<Value>>, FuzzError> {
        (0..calls_per_sample)
            .map(|_| self.build_arguments(types, rng))
            .collect()
    }

    fn mutate_prior<R: RandomSource + ?Sized>(
        &self,
        width: usize,
        rng: &mut R,
        prior: &[Value],
    ) -> Bits {
        let source = prior[rng.choose_index(prior.len())].flatten();
        let mut bits = self.resize(source, width, rng);
        assert_eq!(bits.width(), width, "resized mutation source has the wrong width");

        // Repeated indices are allowed, so a bit can be flipped back.
        for _ in 0..biased_towards_zero(width, rng) {
            bits.flip_bit(rng.below(width as u64) as usize);
        }
        bits
    }

    /// Grows `source` with freshly synthesized high-order bits, or truncates
    /// it to its low-order `width` bits.
    fn resize<R: RandomSource + ?Sized>(&self, source: Bits, width: usize, rng: &mut R) -> Bits {
        if width > source.width() {
            let addendum = self.synthesize_raw(width - source.width(), rng);
            source.concat_above(&addendum)
        } else {
            source.slice_low(width)
        }
    }
}

/// [`ArgumentGenerator::generate_argument`] with the standard catalog.
pub fn generate_argument<R: RandomSource + ?Sized>(
    ty: &ConcreteType,
    rng: &mut R,
    prior: &[Value],
) -> Result<Value, FuzzError> {
    ArgumentGenerator::standard().generate_argument(ty, rng, prior)
}

/// [`ArgumentGenerator::build_arguments`] with the standard catalog.
pub fn build_arguments<R: RandomSource + ?Sized>(
    types: &[ConcreteType],
    rng: &mut R,
) -> Result<Vec<Value>, FuzzError> {
    ArgumentGenerator::standard().build_arguments(types, rng)
}

/// [`ArgumentGenerator::build_batches`] with the standard catalog.
pub fn build_batches<R: RandomSource + ?Sized>(
    types: &[ConcreteType],
    rng: &mut R,
    calls_per_sample: usize,
) -> Result<Vec<Vec<Value>>, FuzzError> {
    ArgumentGenerator::standard().build_batches(types, rng, calls_per_sample)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::seeded_rng;
    use pretty_assertions::assert_eq;

    fn zeros_only() -> ArgumentGenerator<impl PatternCatalog> {
        ArgumentGenerator::new(|width: usize| vec![Bits::zero(width)])
    }

    #[test]
    fn test_same_seed_same_values() {
        let types: Vec<ConcreteType> = ["u8", "(s3, u17[4])", "u100"]
            .iter()
            .map(|t| t.parse().unwrap())
            .collect();
        let a = build_batches(&types, &mut seeded_rng(99), 5).unwrap();
        let b = build_batches(&types, &mut seeded_rng(99), 5).unwrap();
        assert_eq!(a, b);

        let c = build_batches(&types, &mut seeded_rng(100), 5).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn test_empty_pool_skips_coin_flip() {
        // Without prior values the generator goes straight to synthesis, so
        // it consumes exactly the draws a direct synthesis would.
        let generator = ArgumentGenerator::standard();
        for seed in 0..20 {
            let generated = generator
                .generate_argument(&ConcreteType::ubits(12), &mut seeded_rng(seed), &[])
                .unwrap();
            let synthesized = generator.synthesize_bits(12, false, &mut seeded_rng(seed));
            assert_eq!(generated, synthesized);
        }
    }

    #[test]
    fn test_resize_grow_keeps_low_bits() {
        let generator = ArgumentGenerator::standard();
        let mut rng = seeded_rng(21);
        let source = Bits::from_u64(5, 0b10110).unwrap();
        for width in [6, 8, 64, 65, 130] {
            let resized = generator.resize(source.clone(), width, &mut rng);
            assert_eq!(resized.width(), width);
            assert_eq!(resized.slice_low(5), source);
        }
    }

    #[test]
    fn test_resize_shrink_keeps_low_bits() {
        let generator = ArgumentGenerator::standard();
        let mut rng = seeded_rng(22);
        let source = Bits::from_u64(16, 0xbeef).unwrap();
        assert_eq!(generator.resize(source.clone(), 4, &mut rng).to_u64(), Some(0xf));
        assert_eq!(generator.resize(source.clone(), 12, &mut rng).to_u64(), Some(0xeef));
        assert_eq!(generator.resize(source.clone(), 16, &mut rng), source);
    }

    #[test]
    fn test_later_arguments_mutate_earlier_ones() {
        // With a catalog of only zeros, any value with most bits set must
        // have come from mutating the all-ones prior.
        let generator = zeros_only();
        let prior = vec![Value::make_ubits(Bits::all_ones(16))];
        let mut rng = seeded_rng(23);
        let draws = 2000;
        let mostly_ones = (0..draws)
            .filter(|_| {
                let value = generator
                    .generate_argument(&ConcreteType::ubits(16), &mut rng, &prior)
                    .unwrap();
                value.as_bits().unwrap().count_ones() >= 12
            })
            .count();
        assert!(mostly_ones > draws / 5, "mostly_ones={}", mostly_ones);
        assert!(mostly_ones < draws * 3 / 5, "mostly_ones={}", mostly_ones);
    }

    #[test]
    fn test_mutation_from_aggregate_prior() {
        let generator = zeros_only();
        let prior = vec![Value::Tuple(vec![
            Value::make_ubits(Bits::all_ones(3)),
            Value::Array(vec![Value::make_sbits(Bits::all_ones(2)); 2]),
        ])];
        let mut rng = seeded_rng(24);
        for _ in 0..200 {
            let value = generator
                .generate_argument(&ConcreteType::sbits(9), &mut rng, &prior)
                .unwrap();
            assert!(value.conforms_to(&ConcreteType::sbits(9)));
        }
    }

    #[test]
    fn test_build_arguments_length_matches() {
        let types = vec![
            ConcreteType::ubits(1),
            ConcreteType::sbits(64),
            ConcreteType::tuple(vec![]),
        ];
        let args = build_arguments(&types, &mut seeded_rng(25)).unwrap();
        assert_eq!(args.len(), types.len());
        for (arg, ty) in args.iter().zip(&types) {
            assert!(arg.conforms_to(ty));
        }
        assert!(build_arguments(&[], &mut seeded_rng(25)).unwrap().is_empty());
    }

    #[test]
    fn test_batches_start_with_empty_pool() {
        // If a batch could see the previous batch's values, its first
        // argument would flip a coin the standalone call does not.
        let types = vec![ConcreteType::ubits(8), ConcreteType::ubits(8), ConcreteType::ubits(8)];
        let generator = ArgumentGenerator::standard();
        for seed in 0..10 {
            let batches = generator.build_batches(&types, &mut seeded_rng(seed), 3).unwrap();
            let mut rng = seeded_rng(seed);
            let separate: Vec<Vec<Value>> = (0..3)
                .map(|_| generator.build_arguments(&types, &mut rng).unwrap())
                .collect();
            assert_eq!(batches, separate);
        }
    }

    #[test]
    fn test_unsupported_types_fail() {
        let mut rng = seeded_rng(26);
        let err = generate_argument(&ConcreteType::Token, &mut rng, &[]).unwrap_err();
        assert!(matches!(err, FuzzError::UnsupportedType { ty: ConcreteType::Token }));

        let nested = ConcreteType::tuple(vec![ConcreteType::ubits(2), ConcreteType::Token]);
        let err = build_batches(&[nested], &mut rng, 2).unwrap_err();
        assert!(matches!(err, FuzzError::UnsupportedType { ty: ConcreteType::Token }));
    }

    #[test]
    fn test_zero_length_array() {
        let ty = ConcreteType::array(ConcreteType::ubits(8), 0);
        let value = generate_argument(&ty, &mut seeded_rng(27), &[]).unwrap();
        assert_eq!(value, Value::Array(vec![]));
    }
}
