//! Random code generation flags.
//!
//! Samples that go through Verilog generation get a randomly chosen
//! generator: either a purely combinational module or a feed-forward
//! pipeline with 1 to 10 stages.

use crate::rng::RandomSource;

/// Chance of choosing the combinational generator over a pipeline.
const COMBINATIONAL_PROBABILITY: f64 = 0.2;

pub const MIN_PIPELINE_STAGES: u64 = 1;
pub const MAX_PIPELINE_STAGES: u64 = 10;

pub const USE_SYSTEM_VERILOG_FLAG: &str = "--use_system_verilog";
pub const NO_SYSTEM_VERILOG_FLAG: &str = "--nouse_system_verilog";
pub const COMBINATIONAL_FLAG: &str = "--generator=combinational";
pub const PIPELINE_FLAG: &str = "--generator=pipeline";
pub const PIPELINE_STAGES_PREFIX: &str = "--pipeline_stages=";

/// Returns the flags to pass to the codegen driver: the dialect flag first,
/// then the generator flag(s).
pub fn generate_codegen_flags<R: RandomSource + ?Sized>(
    use_system_verilog: bool,
    rng: &mut R,
) -> Vec<String> {
    let mut flags = Vec::with_capacity(3);
    flags.push(
        if use_system_verilog {
            USE_SYSTEM_VERILOG_FLAG
        } else {
            NO_SYSTEM_VERILOG_FLAG
        }
        .to_string(),
    );
    if rng.random() < COMBINATIONAL_PROBABILITY {
        flags.push(COMBINATIONAL_FLAG.to_string());
    } else {
        let stages = rng.range_inclusive(MIN_PIPELINE_STAGES, MAX_PIPELINE_STAGES);
        flags.push(PIPELINE_FLAG.to_string());
        flags.push(format!("{}{}", PIPELINE_STAGES_PREFIX, stages));
    }
    flags
}
