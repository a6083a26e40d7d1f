//! Errors produced by the quantor parsers

mod parser_trait;

pub use parser_trait::ErrorHandlingParser;

use crate::util::InputSpan;

/// A dimension signature could not be parsed.
///
/// The offending signature is retained for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid dimension signature `{signature}`: {kind}")]
pub struct FormatError {
    signature: String,
    kind: FormatErrorKind,
}

/// The reason a dimension signature was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FormatErrorKind {
    /// The signature contains more than one `/`
    #[error("more than one `/`")]
    MultipleSlashes,
    /// No base dimension symbol starts at the offset
    #[error("unknown symbol at offset {offset}")]
    UnknownSymbol {
        /// The byte offset of the unknown text
        offset: usize,
    },
    /// A `^` is not followed by an integer exponent
    #[error("invalid exponent at offset {offset}")]
    InvalidExponent {
        /// The byte offset of the `^`
        offset: usize,
    },
    /// An exponent does not fit in the range of a dimension exponent
    #[error("exponent out of range at offset {offset}")]
    ExponentOverflow {
        /// The byte offset of the exponent
        offset: usize,
    },
}

impl FormatError {
    /// Creates a new format error for `signature`.
    #[must_use]
    pub fn new(signature: impl Into<String>, kind: FormatErrorKind) -> Self {
        Self {
            signature: signature.into(),
            kind,
        }
    }

    /// Returns the signature that failed to parse.
    #[must_use]
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// Returns why the signature was rejected.
    #[must_use]
    pub const fn kind(&self) -> FormatErrorKind {
        self.kind
    }
}

/// A quantity literal could not be parsed or its unit could not be resolved.
///
/// The original input is retained for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot parse `{input}`: {kind}")]
pub struct ParseError {
    input: String,
    kind: ParseErrorKind,
}

/// The reason a quantity literal was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseErrorKind {
    /// The literal does not start with a well-formed number
    #[error("expected a number at offset {offset}")]
    InvalidNumber {
        /// The byte offset where the number was expected
        offset: usize,
    },
    /// The number is not followed by a unit abbreviation
    #[error("missing unit")]
    MissingUnit,
    /// The unit abbreviation is not registered
    #[error("unknown unit `{abbreviation}`")]
    UnknownUnit {
        /// The abbreviation as written
        abbreviation: String,
    },
    /// The unit was found but cannot hold absolute values
    #[error("unit `{abbreviation}` is not an absolute unit")]
    NotAbsoluteUnit {
        /// The abbreviation as written
        abbreviation: String,
    },
}

impl ParseError {
    /// Creates a new parse error for `input`.
    #[must_use]
    pub fn new(input: impl Into<String>, kind: ParseErrorKind) -> Self {
        Self {
            input: input.into(),
            kind,
        }
    }

    /// Creates an error for an abbreviation that matched no unit.
    #[must_use]
    pub fn unknown_unit(input: impl Into<String>, abbreviation: impl Into<String>) -> Self {
        Self::new(
            input,
            ParseErrorKind::UnknownUnit {
                abbreviation: abbreviation.into(),
            },
        )
    }

    /// Creates an error for an abbreviation whose unit is not absolute.
    #[must_use]
    pub fn not_absolute_unit(input: impl Into<String>, abbreviation: impl Into<String>) -> Self {
        Self::new(
            input,
            ParseErrorKind::NotAbsoluteUnit {
                abbreviation: abbreviation.into(),
            },
        )
    }

    /// Returns the input that failed to parse.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Returns why the input was rejected.
    #[must_use]
    pub const fn kind(&self) -> &ParseErrorKind {
        &self.kind
    }
}

/// An error raised inside the nom parsers.
///
/// It only records what went wrong and where; the public error types attach
/// the full input once parsing has stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyntaxError {
    pub kind: SyntaxErrorKind,
    pub offset: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    ExpectedSymbol,
    InvalidExponent,
    ExponentOverflow,
    MultipleSlashes,
    ExpectedNumber,
    MissingUnit,
    /// A low-level nom parsing error
    NomError(nom::error::ErrorKind),
}

impl SyntaxError {
    pub fn new(kind: SyntaxErrorKind, span: InputSpan<'_>) -> Self {
        Self {
            kind,
            offset: span.location_offset(),
        }
    }

    fn update_kind(self, kind: SyntaxErrorKind) -> Self {
        Self { kind, ..self }
    }

    pub fn expected_symbol(error: Self) -> Self {
        error.update_kind(SyntaxErrorKind::ExpectedSymbol)
    }

    pub fn expected_number(error: Self) -> Self {
        error.update_kind(SyntaxErrorKind::ExpectedNumber)
    }

    pub fn invalid_exponent(caret_span: InputSpan<'_>) -> impl Fn(Self) -> Self {
        move |_error: Self| Self::new(SyntaxErrorKind::InvalidExponent, caret_span)
    }

    /// Converts the error into the public error for a dimension signature.
    pub fn into_format_error(self, signature: &str) -> FormatError {
        let kind = match self.kind {
            SyntaxErrorKind::InvalidExponent => FormatErrorKind::InvalidExponent {
                offset: self.offset,
            },
            SyntaxErrorKind::ExponentOverflow => FormatErrorKind::ExponentOverflow {
                offset: self.offset,
            },
            SyntaxErrorKind::MultipleSlashes => FormatErrorKind::MultipleSlashes,
            SyntaxErrorKind::ExpectedSymbol
            | SyntaxErrorKind::ExpectedNumber
            | SyntaxErrorKind::MissingUnit
            | SyntaxErrorKind::NomError(_) => FormatErrorKind::UnknownSymbol {
                offset: self.offset,
            },
        };
        FormatError::new(signature, kind)
    }

    /// Converts the error into the public error for a quantity literal.
    pub fn into_parse_error(self, input: &str) -> ParseError {
        let kind = match self.kind {
            SyntaxErrorKind::MissingUnit => ParseErrorKind::MissingUnit,
            SyntaxErrorKind::ExpectedSymbol
            | SyntaxErrorKind::InvalidExponent
            | SyntaxErrorKind::ExponentOverflow
            | SyntaxErrorKind::MultipleSlashes
            | SyntaxErrorKind::ExpectedNumber
            | SyntaxErrorKind::NomError(_) => ParseErrorKind::InvalidNumber {
                offset: self.offset,
            },
        };
        ParseError::new(input, kind)
    }
}

impl nom::error::ParseError<InputSpan<'_>> for SyntaxError {
    fn from_error_kind(input: InputSpan<'_>, kind: nom::error::ErrorKind) -> Self {
        Self::new(SyntaxErrorKind::NomError(kind), input)
    }

    fn append(_input: InputSpan<'_>, _kind: nom::error::ErrorKind, other: Self) -> Self {
        other
    }
}
