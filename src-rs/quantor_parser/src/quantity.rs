//! Parser for quantity literals such as `80 mm`

use nom::{Parser as _, combinator::rest as remaining};

use crate::{
    error::{ErrorHandlingParser, SyntaxError, SyntaxErrorKind},
    token::{number, whitespace},
    util::{InputSpan, Result},
};

/// A number together with the unit abbreviation written after it.
///
/// The abbreviation is not resolved; that needs a unit registry.
#[derive(Debug, Clone, PartialEq)]
pub struct QuantityLiteral {
    /// The numeric value, expressed in the unit named by `abbreviation`
    pub value: f64,
    /// The unit abbreviation with surrounding whitespace removed
    pub abbreviation: String,
}

/// Parses a complete quantity literal.
///
/// Everything after the number, trimmed, is taken as the abbreviation. An
/// empty abbreviation is an error unless the configuration allows it.
pub fn parse_complete(input: InputSpan<'_>) -> Result<'_, QuantityLiteral> {
    let (rest, _) = whitespace(input)?;
    let (rest, lexeme) = number
        .or_fail_with(SyntaxError::expected_number)
        .parse(rest)?;

    // the number grammar is a subset of the `f64` grammar
    let Ok(value) = lexeme.fragment().parse::<f64>() else {
        return Err(nom::Err::Failure(SyntaxError::new(
            SyntaxErrorKind::ExpectedNumber,
            lexeme,
        )));
    };

    let (rest, _) = whitespace(rest)?;
    let (rest, unit_text) = remaining.parse(rest)?;
    let abbreviation = unit_text.fragment().trim_end();

    if abbreviation.is_empty() && !unit_text.extra.allow_missing_unit {
        return Err(nom::Err::Failure(SyntaxError::new(
            SyntaxErrorKind::MissingUnit,
            unit_text,
        )));
    }

    Ok((
        rest,
        QuantityLiteral {
            value,
            abbreviation: abbreviation.to_string(),
        },
    ))
}
