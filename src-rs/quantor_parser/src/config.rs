/// Configuration for the quantor parsers.
///
/// The configuration travels with the input span, so every sub-parser can
/// read it without it being threaded through by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Config {
    /// Accept a bare number such as `"12"`, producing an empty abbreviation.
    pub allow_missing_unit: bool,
    /// Ask the caller to resolve abbreviations leniently (ignoring spaces,
    /// dots and carets, and accepting dimension signatures).
    ///
    /// The parser itself never resolves units, so this flag is only read by
    /// callers of [`parse_quantity`](crate::parse_quantity).
    pub lenient_unit_lookup: bool,
}

impl Config {
    /// Creates a new configuration with default settings.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            allow_missing_unit: false,
            lenient_unit_lookup: false,
        }
    }

    /// Sets whether a quantity literal may omit its unit.
    #[must_use]
    pub const fn with_allow_missing_unit(self, allow_missing_unit: bool) -> Self {
        Self {
            allow_missing_unit,
            ..self
        }
    }

    /// Sets whether unit abbreviations should be resolved leniently.
    #[must_use]
    pub const fn with_lenient_unit_lookup(self, lenient_unit_lookup: bool) -> Self {
        Self {
            lenient_unit_lookup,
            ..self
        }
    }
}
