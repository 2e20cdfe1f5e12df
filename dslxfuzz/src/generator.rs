//! Sample generation.
//!
//! [`SampleGenerator`] turns one RNG stream into one fuzz sample:
//!
//! 1. The program generator writes a DSLX function `main` in module `test`.
//! 2. The front end re-parses that exact text and reports `main`'s
//!    parameter types. The text is parsed again rather than reusing the
//!    generator's AST so that error messages point at real positions.
//! 3. Argument batches are generated for those types.
//! 4. Codegen flags are generated if codegen is on and none were given.
//!
//! Both collaborators are traits; any failure aborts the sample.

use std::path::PathBuf;

use rand::RngCore;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::argument::ArgumentGenerator;
use crate::codegen_flags::generate_codegen_flags;
use crate::error::{FrontEndError, FuzzError, ProgramGenerationError};
use crate::patterns::{PatternCatalog, StandardPatterns};
use crate::sample::{Sample, SampleOptions};
use crate::types::ConcreteType;

/// Name of the generated entry function.
pub const ENTRY_FUNCTION_NAME: &str = "main";

/// Name of the generated module.
pub const MODULE_NAME: &str = "test";

/// File name the generated text is parsed under.
pub const FAKE_FILENAME: &str = "/fake/test.x";

/// Options passed through to the program generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AstGeneratorOptions {
    pub disallow_divide: bool,
    pub emit_loops: bool,
    pub max_width_bits_types: usize,
    pub max_width_aggregate_types: usize,
    pub emit_signed_types: bool,
    pub short_samples: bool,
    /// Only emit operations the codegen backend supports.
    pub codegen_ops_only: bool,
}

impl Default for AstGeneratorOptions {
    fn default() -> Self {
        Self {
            disallow_divide: false,
            emit_loops: true,
            max_width_bits_types: 64,
            max_width_aggregate_types: 1024,
            emit_signed_types: true,
            short_samples: false,
            codegen_ops_only: false,
        }
    }
}

/// A generated program: its text and where the entry function lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedProgram {
    pub source_text: String,
    pub module_name: String,
    pub function_name: String,
}

/// Writes random DSLX programs.
pub trait ProgramGenerator {
    fn generate_function_in_module(
        &mut self,
        rng: &mut dyn RngCore,
        options: &AstGeneratorOptions,
        function_name: &str,
        module_name: &str,
    ) -> Result<GeneratedProgram, ProgramGenerationError>;
}

/// What the front end is asked to parse.
#[derive(Debug, Clone, Copy)]
pub struct ParseRequest<'a> {
    pub source: &'a str,
    pub module_name: &'a str,
    pub function_name: &'a str,
    pub filename: &'a str,
    pub search_paths: &'a [PathBuf],
}

/// Parses and type-checks DSLX text.
pub trait FrontEnd {
    /// Returns the concrete type of each parameter of the requested
    /// function, in declaration order.
    fn parameter_types(
        &mut self,
        request: &ParseRequest<'_>,
    ) -> Result<Vec<ConcreteType>, FrontEndError>;
}

/// Composes a program generator and a front end with argument and codegen
/// flag generation.
#[derive(Debug)]
pub struct SampleGenerator<P, F, C = StandardPatterns> {
    program_generator: P,
    front_end: F,
    arguments: ArgumentGenerator<C>,
    search_paths: Vec<PathBuf>,
}

impl<P: ProgramGenerator, F: FrontEnd> SampleGenerator<P, F, StandardPatterns> {
    pub fn new(program_generator: P, front_end: F) -> Self {
        Self::with_arguments(program_generator, front_end, ArgumentGenerator::standard())
    }
}

impl<P: ProgramGenerator, F: FrontEnd, C: PatternCatalog> SampleGenerator<P, F, C> {
    pub fn with_arguments(
        program_generator: P,
        front_end: F,
        arguments: ArgumentGenerator<C>,
    ) -> Self {
        Self {
            program_generator,
            front_end,
            arguments,
            search_paths: Vec::new(),
        }
    }

    /// Extra import search paths handed to the front end.
    pub fn with_search_paths(mut self, search_paths: Vec<PathBuf>) -> Self {
        self.search_paths = search_paths;
        self
    }

    /// Generates one sample. Nothing is returned unless every step succeeds.
    pub fn generate_sample<R: RngCore>(
        &mut self,
        rng: &mut R,
        ast_options: &AstGeneratorOptions,
        calls_per_sample: usize,
        base_options: &SampleOptions,
    ) -> Result<Sample, FuzzError> {
        let ast_options = AstGeneratorOptions {
            codegen_ops_only: base_options.codegen,
            ..ast_options.clone()
        };
        let program = self.program_generator.generate_function_in_module(
            rng,
            &ast_options,
            ENTRY_FUNCTION_NAME,
            MODULE_NAME,
        )?;
        debug!(
            "Generated {}::{} ({} bytes)",
            program.module_name,
            program.function_name,
            program.source_text.len()
        );

        let param_types = self.front_end.parameter_types(&ParseRequest {
            source: &program.source_text,
            module_name: &program.module_name,
            function_name: &program.function_name,
            filename: FAKE_FILENAME,
            search_paths: &self.search_paths,
        })?;
        debug!(
            "Parameter types: [{}]",
            param_types
                .iter()
                .map(ConcreteType::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        );

        let args_batch = self.arguments.build_batches(&param_types, rng, calls_per_sample)?;

        // The sample text is always DSLX.
        let mut options = SampleOptions {
            input_is_dslx: true,
            ..base_options.clone()
        };
        if options.needs_codegen_args() {
            let flags = generate_codegen_flags(options.use_system_verilog, rng);
            debug!("Generated codegen flags: {}", flags.join(" "));
            options.codegen_args = Some(flags);
        }

        Ok(Sample::new(program.source_text, param_types, options, args_batch))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Span;
    use crate::rng::seeded_rng;

    /// Emits fixed text and records the options it was called with.
    struct FixedProgram {
        text: &'static str,
        seen_options: Vec<AstGeneratorOptions>,
    }

    impl ProgramGenerator for FixedProgram {
        fn generate_function_in_module(
            &mut self,
            rng: &mut dyn RngCore,
            options: &AstGeneratorOptions,
            function_name: &str,
            module_name: &str,
        ) -> Result<GeneratedProgram, ProgramGenerationError> {
            // Real generators consume randomness; make sure the stream is shared.
            rng.next_u64();
            self.seen_options.push(options.clone());
            Ok(GeneratedProgram {
                source_text: self.text.to_string(),
                module_name: module_name.to_string(),
                function_name: function_name.to_string(),
            })
        }
    }

    struct FixedTypes(Vec<ConcreteType>);

    impl FrontEnd for FixedTypes {
        fn parameter_types(
            &mut self,
            request: &ParseRequest<'_>,
        ) -> Result<Vec<ConcreteType>, FrontEndError> {
            assert_eq!(request.filename, FAKE_FILENAME);
            assert_eq!(request.function_name, ENTRY_FUNCTION_NAME);
            Ok(self.0.clone())
        }
    }

    fn fixed(
        text: &'static str,
        types: Vec<ConcreteType>,
    ) -> SampleGenerator<FixedProgram, FixedTypes> {
        SampleGenerator::new(
            FixedProgram {
                text,
                seen_options: Vec::new(),
            },
            FixedTypes(types),
        )
    }

    #[test]
    fn test_codegen_ops_only_follows_codegen() {
        let mut generator = fixed("fn main() -> () { () }", vec![]);
        let mut rng = seeded_rng(41);
        let options = SampleOptions {
            codegen: true,
            ..SampleOptions::default()
        };
        generator
            .generate_sample(&mut rng, &AstGeneratorOptions::default(), 1, &options)
            .unwrap();
        generator
            .generate_sample(
                &mut rng,
                &AstGeneratorOptions::default(),
                1,
                &SampleOptions::default(),
            )
            .unwrap();
        let seen = &generator.program_generator.seen_options;
        assert!(seen[0].codegen_ops_only);
        assert!(!seen[1].codegen_ops_only);
    }

    #[test]
    fn test_front_end_error_aborts_sample() {
        struct Broken;
        impl FrontEnd for Broken {
            fn parameter_types(
                &mut self,
                request: &ParseRequest<'_>,
            ) -> Result<Vec<ConcreteType>, FrontEndError> {
                Err(FrontEndError::new(Span::new(request.filename, 1, 4), "expected `(`"))
            }
        }

        let mut generator = SampleGenerator::new(
            FixedProgram {
                text: "fn main",
                seen_options: Vec::new(),
            },
            Broken,
        );
        let err = generator
            .generate_sample(
                &mut seeded_rng(42),
                &AstGeneratorOptions::default(),
                1,
                &SampleOptions::default(),
            )
            .unwrap_err();
        match err {
            FuzzError::FrontEnd(e) => {
                assert_eq!(e.span, Span::new("/fake/test.x", 1, 4));
            }
            other => panic!("unexpected error: {}", other),
        }
    }
}
