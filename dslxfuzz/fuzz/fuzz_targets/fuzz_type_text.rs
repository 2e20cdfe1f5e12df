//! Fuzz target for the type text parser.
//!
//! Arbitrary text must never panic the parser, and anything it accepts must
//! print back to text that parses to the same type.

#![no_main]

use dslxfuzz::ConcreteType;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|text: &str| {
    if let Ok(ty) = text.parse::<ConcreteType>() {
        let printed = ty.to_string();
        let reparsed: ConcreteType = printed.parse().expect("printed type must parse");
        assert_eq!(reparsed, ty);
    }
});
