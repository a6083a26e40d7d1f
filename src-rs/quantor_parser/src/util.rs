use nom::{IResult, Parser as NomParser};
use nom_locate::LocatedSpan;

use crate::{config::Config, error::SyntaxError};

/// A span of text in the input string.
///
/// The span contains both the text content and the configuration for the parser.
pub type InputSpan<'a> = LocatedSpan<&'a str, Config>;

/// A result type for parser operations.
pub type Result<'a, O, E = SyntaxError> = IResult<InputSpan<'a>, O, E>;

/// A trait for parser implementations that work with our custom span type.
///
/// This trait is automatically implemented for any type that implements nom's Parser trait
/// with our custom span type.
pub trait Parser<'a, O, E = SyntaxError>:
    NomParser<InputSpan<'a>, Output = O, Error = E>
{
}

impl<'a, O, E, P> Parser<'a, O, E> for P where P: NomParser<InputSpan<'a>, Output = O, Error = E> {}
