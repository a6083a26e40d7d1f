//! Parser for SI dimension signatures such as `kgm2/s2`

use nom::{
    Parser as _,
    bytes::complete::tag,
    character::complete::{digit1, space0},
    combinator::{opt, recognize},
    multi::many0,
    sequence::preceded,
};
use quantor_dimension::{BaseDimension, SIDimension};

use crate::{
    error::{ErrorHandlingParser, SyntaxError, SyntaxErrorKind},
    util::{InputSpan, Result},
};

/// Parses a complete dimension signature.
///
/// The grammar is a numerator group, optionally followed by a single `/` and
/// a denominator group. A group is a sequence of `<symbol><exponent>?` terms,
/// optionally separated by `.`. An exponent is written `n`, `-n`, `^n` or
/// `^-n` and defaults to 1. Exponents in the denominator are negated.
/// Repeated symbols accumulate, so `m.m` is `m2`. A numerator of `1`, or an
/// empty signature, is dimensionless.
pub fn parse_complete(input: InputSpan<'_>) -> Result<'_, SIDimension> {
    let (rest, _) = space0.parse(input)?;

    let (rest, numerator) = opt(numerator).parse(rest)?;

    let (rest, denominator) = opt(preceded(
        (space0, tag("/"), space0),
        group.or_fail_with(SyntaxError::expected_symbol),
    ))
    .parse(rest)?;

    let (rest, _) = space0.parse(rest)?;

    if rest.starts_with('/') {
        return Err(nom::Err::Failure(SyntaxError::new(
            SyntaxErrorKind::MultipleSlashes,
            rest,
        )));
    }

    if !rest.is_empty() {
        return Err(nom::Err::Failure(SyntaxError::new(
            SyntaxErrorKind::ExpectedSymbol,
            rest,
        )));
    }

    let mut exponents = [0_i8; BaseDimension::COUNT];
    let terms = numerator
        .into_iter()
        .flatten()
        .map(|term| (term, false))
        .chain(denominator.into_iter().flatten().map(|term| (term, true)));

    for (Term { axis, exponent, span }, negate) in terms {
        let exponent = if negate {
            exponent.checked_neg()
        } else {
            Some(exponent)
        };
        let accumulated = exponent.and_then(|exponent| exponents[axis.index()].checked_add(exponent));
        let Some(accumulated) = accumulated else {
            return Err(nom::Err::Failure(SyntaxError::new(
                SyntaxErrorKind::ExponentOverflow,
                span,
            )));
        };
        exponents[axis.index()] = accumulated;
    }

    Ok((rest, SIDimension::new(exponents)))
}

#[derive(Debug, Clone, Copy)]
struct Term<'a> {
    axis: BaseDimension,
    exponent: i8,
    span: InputSpan<'a>,
}

/// Parses the part before the `/`, which is either `1` or a group.
fn numerator(input: InputSpan<'_>) -> Result<'_, Vec<Term<'_>>> {
    if let Ok((rest, _)) = tag::<_, _, SyntaxError>("1").parse(input) {
        return Ok((rest, Vec::new()));
    }
    group(input)
}

fn group(input: InputSpan<'_>) -> Result<'_, Vec<Term<'_>>> {
    let (rest, first) = term(input)?;
    let (rest, others) = many0(preceded(opt(tag(".")), term)).parse(rest)?;

    let mut terms = Vec::with_capacity(others.len() + 1);
    terms.push(first);
    terms.extend(others);
    Ok((rest, terms))
}

fn term(input: InputSpan<'_>) -> Result<'_, Term<'_>> {
    let (rest, axis) = symbol(input)?;
    let (rest, exponent) = exponent(rest)?;
    Ok((
        rest,
        Term {
            axis,
            exponent,
            span: input,
        },
    ))
}

fn symbol(input: InputSpan<'_>) -> Result<'_, BaseDimension> {
    for axis in BaseDimension::longest_symbol_first() {
        if let Ok((rest, _)) = tag::<_, _, SyntaxError>(axis.symbol()).parse(input) {
            return Ok((rest, axis));
        }
    }
    Err(nom::Err::Error(SyntaxError::new(
        SyntaxErrorKind::ExpectedSymbol,
        input,
    )))
}

fn exponent(input: InputSpan<'_>) -> Result<'_, i8> {
    let signed_digits = || recognize((opt(tag("-")), digit1));

    let (rest, caret) = opt(tag("^")).parse(input)?;
    let (rest, digits) = match caret {
        Some(caret_span) => {
            let (rest, digits) = signed_digits()
                .or_fail_with(SyntaxError::invalid_exponent(caret_span))
                .parse(rest)?;
            (rest, Some(digits))
        }
        None => opt(signed_digits()).parse(rest)?,
    };

    let Some(digits) = digits else {
        return Ok((rest, 1));
    };

    digits.fragment().parse::<i8>().map_or_else(
        |_| {
            Err(nom::Err::Failure(SyntaxError::new(
                SyntaxErrorKind::ExponentOverflow,
                digits,
            )))
        },
        |exponent| Ok((rest, exponent)),
    )
}
