//! Lexical pieces shared by the dimension and quantity parsers

use nom::{
    Parser as _,
    bytes::complete::tag,
    character::complete::{digit1, multispace0, one_of},
    combinator::{opt, recognize},
};

use crate::{
    error::{ErrorHandlingParser, SyntaxError},
    util::{InputSpan, Result},
};

/// Parses any amount of whitespace, including none.
pub fn whitespace(input: InputSpan<'_>) -> Result<'_, InputSpan<'_>> {
    multispace0.parse(input)
}

/// Parses a number literal, supporting optional sign, decimal, and exponent.
///
/// The grammar is `[+-]? digits ('.' digits?)? ([eE] [+-]? digits)?`, so a
/// bare trailing decimal point (`8.`) is accepted. Every lexeme it accepts
/// is also accepted by `str::parse::<f64>`.
///
/// The decimal and exponent parts backtrack when incomplete: in `5EUR` only
/// `5` is consumed, leaving `EUR` for the unit.
pub fn number(input: InputSpan<'_>) -> Result<'_, InputSpan<'_>> {
    // Optional sign (+ or -) at the beginning
    let opt_sign = opt(one_of("+-"));

    // Optional decimal part (e.g., ".1415" or a bare ".")
    let opt_decimal = opt((tag("."), opt(digit1)));

    // Optional exponent part (e.g., "e10", "E-3")
    let opt_exponent = opt((one_of("eE"), opt(one_of("+-")), digit1));

    recognize((opt_sign, digit1, opt_decimal, opt_exponent))
        .convert_error_to(SyntaxError::expected_number)
        .parse(input)
}
