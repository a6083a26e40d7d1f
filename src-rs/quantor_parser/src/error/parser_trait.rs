use nom::{Parser, error::ParseError};

/// Extends nom's `Parser` with control over whether an error is recoverable.
///
/// A recoverable error (`nom::Err::Error`) lets combinators such as `opt`
/// and `alt` backtrack. An unrecoverable one (`nom::Err::Failure`) stops the
/// whole parse, which is what we want once the input has committed to a
/// construct, for example after a `^` that must be followed by an exponent.
pub trait ErrorHandlingParser<I, O, E>: Parser<I, Output = O, Error = E>
where
    E: ParseError<I>,
{
    /// Replaces recoverable errors using `convert_error`, leaving failures untouched.
    fn convert_error_to(
        mut self,
        convert_error: impl Fn(E) -> E,
    ) -> impl Parser<I, Output = O, Error = E>
    where
        Self: Sized,
    {
        move |input| {
            self.parse(input).map_err(|e| match e {
                nom::Err::Error(e) => nom::Err::Error(convert_error(e)),
                nom::Err::Failure(e) => nom::Err::Failure(e),
                nom::Err::Incomplete(e) => nom::Err::Incomplete(e),
            })
        }
    }

    /// Turns recoverable errors into failures using `convert_error`.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let parser = signed_digits.or_fail_with(SyntaxError::invalid_exponent(caret_span));
    /// ```
    fn or_fail_with(
        mut self,
        convert_error: impl Fn(E) -> E,
    ) -> impl Parser<I, Output = O, Error = E>
    where
        Self: Sized,
    {
        move |input| {
            self.parse(input).map_err(|e| match e {
                nom::Err::Error(e) => nom::Err::Failure(convert_error(e)),
                nom::Err::Failure(e) => nom::Err::Failure(e),
                nom::Err::Incomplete(e) => nom::Err::Incomplete(e),
            })
        }
    }
}

impl<I, O, E, P> ErrorHandlingParser<I, O, E> for P
where
    P: Parser<I, Output = O, Error = E>,
    E: ParseError<I>,
{
}
