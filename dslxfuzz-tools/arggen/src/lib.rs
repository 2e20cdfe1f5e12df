//! DSLX Argument Generator
//!
//! Generates fuzz argument batches (and optionally codegen flags) for a list
//! of parameter types written in DSLX type syntax, e.g. `u8` or
//! `(uN[4], sN[2][3])`.
//!
//! # Example
//!
//! ```
//! use dslx_arggen::{generate, parse_types, Config};
//!
//! let types = parse_types(["u8", "(u4, s2[3])"]).unwrap();
//! let config = Config { seed: Some(7), calls_per_sample: 2, ..Config::default() };
//! let report = generate(&types, &config, 7).unwrap();
//! assert_eq!(report.to_string().lines().count(), 2);
//! ```

pub mod config;

use std::fmt;

use dslxfuzz::{
    args_batch_to_text, build_batches, generate_codegen_flags, seeded_rng, ConcreteType, FuzzError,
    TypeParseError, Value,
};
use thiserror::Error;
use tracing::debug;

pub use config::Config;

/// Errors from the argument generator.
#[derive(Debug, Error)]
pub enum ArgGenError {
    #[error("invalid type `{text}`: {source}")]
    InvalidType {
        text: String,
        #[source]
        source: TypeParseError,
    },

    #[error(transparent)]
    Generation(#[from] FuzzError),
}

/// Parses each parameter type, reporting the first one that fails.
pub fn parse_types<I, S>(texts: I) -> Result<Vec<ConcreteType>, ArgGenError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    texts
        .into_iter()
        .map(|text| {
            let text = text.as_ref();
            text.parse::<ConcreteType>().map_err(|source| ArgGenError::InvalidType {
                text: text.to_string(),
                source,
            })
        })
        .collect()
}

/// What one run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub seed: u64,
    pub args_batch: Vec<Vec<Value>>,
    pub codegen_flags: Option<Vec<String>>,
}

impl fmt::Display for Report {
    /// The args-batch text, then the codegen flags on their own line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.args_batch.is_empty() {
            writeln!(f, "{}", args_batch_to_text(&self.args_batch))?;
        }
        if let Some(flags) = &self.codegen_flags {
            writeln!(f, "{}", flags.join(" "))?;
        }
        Ok(())
    }
}

/// Generates batches for `types` from `seed`. The config's own seed is
/// ignored here; callers resolve it first.
pub fn generate(types: &[ConcreteType], config: &Config, seed: u64) -> Result<Report, ArgGenError> {
    let mut rng = seeded_rng(seed);
    let args_batch = build_batches(types, &mut rng, config.calls_per_sample)?;
    debug!("Generated {} batch(es) of {} argument(s)", args_batch.len(), types.len());

    let codegen_flags = config
        .codegen
        .then(|| generate_codegen_flags(config.use_system_verilog, &mut rng));

    Ok(Report {
        seed,
        args_batch,
        codegen_flags,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_types_reports_bad_text() {
        let err = parse_types(["u8", "f32"]).unwrap_err();
        match err {
            ArgGenError::InvalidType { text, source } => {
                assert_eq!(text, "f32");
                assert_eq!(source.offset, 0);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_report_lines() {
        let types = parse_types(["u8", "s3[2]"]).unwrap();
        let config = Config {
            calls_per_sample: 3,
            codegen: true,
            use_system_verilog: false,
            ..Config::default()
        };
        let report = generate(&types, &config, 99).unwrap();
        let text = report.to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        for line in &lines[..3] {
            let args: Vec<&str> = line.split("; ").collect();
            assert_eq!(args.len(), 2);
            assert!(args[0].starts_with("bits[8]:0x"));
            assert!(args[1].starts_with("[bits[3]:0x"));
        }
        assert!(lines[3].starts_with("--nouse_system_verilog --generator="));
    }

    #[test]
    fn test_same_seed_same_report() {
        let types = parse_types(["(u4, u65)", "u32[3]"]).unwrap();
        let config = Config {
            calls_per_sample: 4,
            codegen: true,
            ..Config::default()
        };
        let first = generate(&types, &config, 5).unwrap();
        assert_eq!(first, generate(&types, &config, 5).unwrap());
    }

    #[test]
    fn test_no_codegen_no_flag_line() {
        let types = parse_types(["u1"]).unwrap();
        let report = generate(&types, &Config::default(), 0).unwrap();
        assert_eq!(report.codegen_flags, None);
        assert_eq!(report.to_string().lines().count(), 1);
    }

    #[test]
    fn test_token_is_rejected() {
        let types = parse_types(["token"]).unwrap();
        let err = generate(&types, &Config::default(), 0).unwrap_err();
        assert!(matches!(err, ArgGenError::Generation(FuzzError::UnsupportedType { .. })));
    }
}
