//! Argument generator configuration.

use serde::{Deserialize, Serialize};

/// Configuration for `dslx-arggen`. Fields missing from a config file take
/// their default values; command-line options override the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// RNG seed. A fresh seed is drawn for every run when unset.
    pub seed: Option<u64>,

    /// Number of argument batches to generate.
    pub calls_per_sample: usize,

    /// Also generate codegen flags.
    pub codegen: bool,

    /// Emit the SystemVerilog dialect flag rather than plain Verilog.
    pub use_system_verilog: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            calls_per_sample: 1,
            codegen: false,
            use_system_verilog: true,
        }
    }
}
