//! # dslxfuzz
//!
//! Value synthesis for fuzzing the DSLX compiler.
//!
//! Given the parameter types of a generated DSLX function, this crate
//! produces argument batches that lean on boundary bit patterns and on
//! bit-level mutations of earlier arguments, plus randomized codegen flags.
//! Everything is driven by an explicitly passed, seeded RNG so a sample can
//! be regenerated from its seed.
//!
//! ## Module Structure
//!
//! - [`types`] - Concrete parameter types and their text syntax
//! - [`value`] - Generated values and arbitrary-width bit vectors
//! - [`rng`] - Random source trait and the seeded generator
//! - [`patterns`] - Interesting bit pattern catalogs
//! - [`argument`] - Type-directed value generation and argument batches
//! - [`codegen_flags`] - Random codegen driver flags
//! - [`sample`] - Samples and sample options
//! - [`generator`] - Sample orchestration over a program generator and front end
//!
//! # Example
//!
//! ```
//! use dslxfuzz::{build_batches, seeded_rng, ConcreteType};
//!
//! let types: Vec<ConcreteType> = vec!["u8".parse().unwrap(), "(u4, s2[3])".parse().unwrap()];
//! let mut rng = seeded_rng(0);
//! let batches = build_batches(&types, &mut rng, 3).unwrap();
//!
//! assert_eq!(batches.len(), 3);
//! for batch in &batches {
//!     for (value, ty) in batch.iter().zip(&types) {
//!         assert!(value.conforms_to(ty));
//!     }
//! }
//! ```

pub mod argument;
pub mod codegen_flags;
pub mod error;
pub mod generator;
pub mod patterns;
pub mod rng;
pub mod sample;
pub mod types;
pub mod value;

pub use argument::{build_arguments, build_batches, generate_argument, ArgumentGenerator};
pub use codegen_flags::generate_codegen_flags;
pub use error::{FrontEndError, FuzzError, ProgramGenerationError, Span};
pub use generator::{
    AstGeneratorOptions, FrontEnd, GeneratedProgram, ParseRequest, ProgramGenerator,
    SampleGenerator,
};
pub use patterns::{PatternCatalog, StandardPatterns};
pub use rng::{seeded_rng, FuzzRng, RandomSource};
pub use sample::{args_batch_to_text, Sample, SampleOptions};
pub use types::{ConcreteType, TypeParseError};
pub use value::{Bits, Value};
