//! Error types for sample generation.

use std::fmt;

use thiserror::Error;

use crate::types::ConcreteType;

/// Errors that can occur while generating a fuzz sample.
#[derive(Debug, Error)]
pub enum FuzzError {
    /// The generator has no way to produce a value of this type. This points
    /// at a gap between the front end's type system and the generator.
    #[error("cannot generate an argument of type {ty}")]
    UnsupportedType { ty: ConcreteType },

    #[error(transparent)]
    ProgramGeneration(#[from] ProgramGenerationError),

    #[error(transparent)]
    FrontEnd(#[from] FrontEndError),
}

/// Failure reported by the program generator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("program generation failed: {message}")]
pub struct ProgramGenerationError {
    pub message: String,
}

impl ProgramGenerationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A position in a source file. Lines and columns are 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub filename: String,
    pub line: u32,
    pub column: u32,
}

impl Span {
    pub fn new(filename: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            filename: filename.into(),
            line,
            column,
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.filename, self.line, self.column)
    }
}

/// Parse or type error reported by the front end, with the position it
/// refers to.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{span}: {message}")]
pub struct FrontEndError {
    pub span: Span,
    pub message: String,
}

impl FrontEndError {
    pub fn new(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
        }
    }
}
