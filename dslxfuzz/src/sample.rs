//! Fuzz samples and their options.

use serde::{Deserialize, Serialize};

use crate::types::ConcreteType;
use crate::value::Value;

/// Options controlling how a sample is run downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SampleOptions {
    /// The sample text is DSLX rather than IR.
    pub input_is_dslx: bool,

    /// Convert the DSLX to IR.
    pub convert_to_ir: bool,

    /// Run the IR optimizer.
    pub optimize_ir: bool,

    /// Evaluate with the JIT as well as the interpreter.
    pub use_jit: bool,

    /// Generate Verilog.
    pub codegen: bool,

    /// Flags for the codegen driver. Generated when `codegen` is set and
    /// none are given.
    pub codegen_args: Option<Vec<String>>,

    /// Simulate the generated Verilog.
    pub simulate: bool,

    /// Simulator to use when `simulate` is set.
    pub simulator: Option<String>,

    /// Emit SystemVerilog rather than Verilog.
    pub use_system_verilog: bool,

    /// Per-sample timeout for the downstream runner.
    pub timeout_seconds: Option<u64>,

    /// Number of argument batches to generate.
    pub calls_per_sample: usize,
}

impl Default for SampleOptions {
    fn default() -> Self {
        Self {
            input_is_dslx: true,
            convert_to_ir: true,
            optimize_ir: true,
            use_jit: true,
            codegen: false,
            codegen_args: None,
            simulate: false,
            simulator: None,
            use_system_verilog: true,
            timeout_seconds: None,
            calls_per_sample: 1,
        }
    }
}

impl SampleOptions {
    /// Returns true if codegen is requested but no flags were supplied.
    pub fn needs_codegen_args(&self) -> bool {
        self.codegen && self.codegen_args.as_ref().map_or(true, Vec::is_empty)
    }
}

/// One fuzzing unit: program text, its parameter types, the argument
/// batches to call it with, and the options to run it under.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    input_text: String,
    param_types: Vec<ConcreteType>,
    options: SampleOptions,
    args_batch: Vec<Vec<Value>>,
}

impl Sample {
    pub fn new(
        input_text: String,
        param_types: Vec<ConcreteType>,
        options: SampleOptions,
        args_batch: Vec<Vec<Value>>,
    ) -> Self {
        Self {
            input_text,
            param_types,
            options,
            args_batch,
        }
    }

    pub fn input_text(&self) -> &str {
        &self.input_text
    }

    pub fn param_types(&self) -> &[ConcreteType] {
        &self.param_types
    }

    pub fn options(&self) -> &SampleOptions {
        &self.options
    }

    pub fn args_batch(&self) -> &[Vec<Value>] {
        &self.args_batch
    }

    /// The argument batch in text form; see [`args_batch_to_text`].
    pub fn args_batch_text(&self) -> String {
        args_batch_to_text(&self.args_batch)
    }
}

/// Renders an argument batch one call per line, with each call's arguments
/// in IR text form separated by `"; "`.
pub fn args_batch_to_text(args_batch: &[Vec<Value>]) -> String {
    args_batch
        .iter()
        .map(|args| {
            args.iter()
                .map(Value::to_string)
                .collect::<Vec<_>>()
                .join("; ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Bits;
    use pretty_assertions::assert_eq;

    fn ubits(width: usize, value: u64) -> Value {
        Value::make_ubits(Bits::from_u64(width, value).unwrap())
    }

    #[test]
    fn test_default_options() {
        let options = SampleOptions::default();
        assert!(options.input_is_dslx);
        assert!(options.convert_to_ir);
        assert!(options.optimize_ir);
        assert!(options.use_jit);
        assert!(!options.codegen);
        assert!(options.use_system_verilog);
        assert_eq!(options.calls_per_sample, 1);
    }

    #[test]
    fn test_needs_codegen_args() {
        let mut options = SampleOptions::default();
        assert!(!options.needs_codegen_args());
        options.codegen = true;
        assert!(options.needs_codegen_args());
        options.codegen_args = Some(vec![]);
        assert!(options.needs_codegen_args());
        options.codegen_args = Some(vec!["--generator=combinational".to_string()]);
        assert!(!options.needs_codegen_args());
    }

    #[test]
    fn test_options_json_fills_defaults() {
        let options: SampleOptions =
            serde_json::from_str(r#"{"codegen": true, "calls_per_sample": 4}"#).unwrap();
        assert!(options.codegen);
        assert_eq!(options.calls_per_sample, 4);
        assert!(options.use_system_verilog);
        assert_eq!(options.codegen_args, None);
    }

    #[test]
    fn test_args_batch_text() {
        let batch = vec![
            vec![ubits(8, 0xff), Value::Tuple(vec![ubits(1, 0)])],
            vec![ubits(8, 0x01), Value::Tuple(vec![ubits(1, 1)])],
        ];
        assert_eq!(
            args_batch_to_text(&batch),
            "bits[8]:0xff; (bits[1]:0x0)\nbits[8]:0x1; (bits[1]:0x1)"
        );
        assert_eq!(args_batch_to_text(&[]), "");
    }
}
