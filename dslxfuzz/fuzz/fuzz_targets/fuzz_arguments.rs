//! Fuzz target for argument generation.
//!
//! Every generated value must match its parameter type, and the same seed
//! must produce the same batches.

#![no_main]

use dslxfuzz::{build_batches, seeded_rng};
use dslxfuzz_fuzz::FuzzSignature;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|sig: FuzzSignature| {
    let batches = build_batches(&sig.params, &mut seeded_rng(sig.seed), sig.calls_per_sample)
        .expect("bounded bits/array/tuple types are always generatable");
    assert_eq!(batches.len(), sig.calls_per_sample);

    for batch in &batches {
        assert_eq!(batch.len(), sig.params.len());
        for (value, ty) in batch.iter().zip(&sig.params) {
            assert!(value.conforms_to(ty), "{} does not conform to {}", value, ty);
        }
    }

    let again = build_batches(&sig.params, &mut seeded_rng(sig.seed), sig.calls_per_sample)
        .expect("second run");
    assert_eq!(batches, again);
});
