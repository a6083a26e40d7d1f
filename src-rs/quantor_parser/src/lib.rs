#![cfg_attr(doc, doc = include_str!("../README.md"))]
//! Parsers for SI dimension signatures and quantity literals

use quantor_dimension::SIDimension;

mod config;
mod error;
mod token;

mod util;
use util::{InputSpan, Result as InternalResult};

mod dimension;
mod quantity;

pub use config::Config;
pub use error::{FormatError, FormatErrorKind, ParseError, ParseErrorKind};
pub use quantity::QuantityLiteral;

use error::SyntaxError;

/// Parses an SI dimension signature such as `kgm2/s2`.
///
/// # Errors
///
/// Returns a [`FormatError`] holding the signature if it contains more than
/// one `/`, an unknown symbol, or an exponent that is malformed or out of
/// range.
pub fn parse_dimension(input: &str, config: Option<Config>) -> Result<SIDimension, FormatError> {
    parse(input, config, dimension::parse_complete)
        .map_err(|error| error.into_format_error(input))
}

/// Parses a quantity literal such as `80 mm` into its number and unit text.
///
/// # Errors
///
/// Returns a [`ParseError`] holding the input if the number is malformed or
/// the unit is missing.
pub fn parse_quantity(
    input: &str,
    config: Option<Config>,
) -> Result<QuantityLiteral, ParseError> {
    parse(input, config, quantity::parse_complete).map_err(|error| error.into_parse_error(input))
}

/// Internal parsing function that handles the common parsing logic.
fn parse<T>(
    input: &str,
    config: Option<Config>,
    parser: impl Fn(InputSpan<'_>) -> InternalResult<'_, T>,
) -> Result<T, SyntaxError> {
    let config = config.unwrap_or_default();
    let input = InputSpan::new_extra(input, config);
    let result = parser(input);

    match result {
        Ok((_rest, parsed)) => Ok(parsed),
        Err(nom::Err::Incomplete(_needed)) => unreachable!(
            "This should never happen because we use `complete` combinators rather than `stream` combinators"
        ),
        Err(nom::Err::Error(e) | nom::Err::Failure(e)) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use quantor_dimension::BaseDimension;

    #[test]
    fn speed_signature_from_multiplication() {
        let length = parse_dimension("m", None).expect("should parse length");
        let per_second = parse_dimension("s-1", None).expect("should parse frequency");
        assert_eq!((length * per_second).to_canonical_string(), "m/s");
    }

    proptest! {
        #[test]
        fn canonical_string_parses_back(exponents in prop::array::uniform8(-9_i8..=9)) {
            let dimension = SIDimension::new(exponents);
            let canonical = dimension.to_canonical_string();
            let reparsed = parse_dimension(&canonical, None).expect("canonical string should parse");
            prop_assert_eq!(reparsed, dimension);
            prop_assert_eq!(reparsed.to_canonical_string(), canonical);
        }

        #[test]
        fn inline_format_parses_back(exponents in prop::array::uniform8(-9_i8..=9)) {
            let dimension = SIDimension::new(exponents);
            let dotted = dimension.format(false, ".");
            prop_assert_eq!(parse_dimension(&dotted, None).expect("dotted string should parse"), dimension);
        }

        #[test]
        fn canonicalization_is_idempotent(
            terms in prop::collection::vec((0..BaseDimension::COUNT, -4_i8..=4), 0..6)
        ) {
            let signature: String = terms
                .iter()
                .map(|(axis, exponent)| format!("{}^{}", BaseDimension::ALL[*axis].symbol(), exponent))
                .collect::<Vec<_>>()
                .join(".");
            let once = parse_dimension(&signature, None).expect("generated signature should parse");
            let twice = parse_dimension(&once.to_canonical_string(), None)
                .expect("canonical string should parse");
            prop_assert_eq!(once, twice);
        }
    }
}
