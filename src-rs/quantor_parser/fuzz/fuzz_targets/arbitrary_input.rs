#![no_main]

use libfuzzer_sys::fuzz_target;
use quantor_parser::{parse_dimension, parse_quantity};

fuzz_target!(|input: &str| {
    if let Ok(dimension) = parse_dimension(input, None) {
        let canonical = dimension.to_canonical_string();
        let reparsed = parse_dimension(&canonical, None)
            .unwrap_or_else(|error| panic!("`{canonical}` should parse: {error}"));
        assert_eq!(reparsed, dimension);
    }

    if let Err(error) = parse_quantity(input, None) {
        assert_eq!(error.input(), input);
    }
});
