#![no_main]

use libfuzzer_sys::{arbitrary, fuzz_target};
use quantor_dimension::SIDimension;
use quantor_parser::parse_dimension;

#[derive(Debug, Clone, PartialEq, arbitrary::Arbitrary)]
enum FuzzData {
    Canonical { dimension: SIDimension },
    Dotted { dimension: SIDimension },
    Compact { dimension: SIDimension },
}

fuzz_target!(|data: FuzzData| {
    let (dimension, text) = match data {
        FuzzData::Canonical { dimension } => (dimension, dimension.to_canonical_string()),
        FuzzData::Dotted { dimension } => (dimension, dimension.format(false, ".")),
        FuzzData::Compact { dimension } => (dimension, dimension.format(false, "")),
    };

    // i8::MIN cannot be negated when it lands in a denominator
    if dimension.exponents().contains(&i8::MIN) {
        return;
    }

    let parsed = parse_dimension(&text, None)
        .unwrap_or_else(|error| panic!("`{text}` should parse: {error}"));
    assert_eq!(parsed, dimension, "round trip through `{text}`");
});
