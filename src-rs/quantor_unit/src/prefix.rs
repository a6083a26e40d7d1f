/// A decimal SI prefix such as kilo or micro.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SiPrefix {
    /// The full name, prepended to unit names (e.g. "kilo")
    pub name: &'static str,
    /// The symbol used for display (e.g. "k", "µ")
    pub symbol: &'static str,
    /// The ASCII spelling of the symbol (e.g. "k", "mu")
    pub textual: &'static str,
    /// The multiplier (e.g. 1000 for kilo)
    pub factor: f64,
}

/// Which SI prefixes are generated when a unit is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub enum SiPrefixes {
    /// No prefixed units
    #[default]
    None,
    /// Every prefix, applied to the unit itself (m to km, mm, ...)
    Unit,
    /// Every prefix, applied to the unit with its leading kilo removed
    /// (kg to mg, Mg, ...)
    Kilo,
}

macro_rules! si_prefixes {
    ($($constant:ident => $name:literal, $symbol:literal, $textual:literal, $factor:literal;)*) => {
        impl SiPrefix {
            $(
                #[doc = concat!("The `", $name, "` prefix")]
                pub const $constant: Self = Self {
                    name: $name,
                    symbol: $symbol,
                    textual: $textual,
                    factor: $factor,
                };
            )*

            /// All SI prefixes from quecto to quetta.
            pub const ALL: &'static [Self] = &[$(Self::$constant),*];
        }
    };
}

si_prefixes! {
    QUECTO => "quecto", "q", "q", 1e-30;
    RONTO => "ronto", "r", "r", 1e-27;
    YOCTO => "yocto", "y", "y", 1e-24;
    ZEPTO => "zepto", "z", "z", 1e-21;
    ATTO => "atto", "a", "a", 1e-18;
    FEMTO => "femto", "f", "f", 1e-15;
    PICO => "pico", "p", "p", 1e-12;
    NANO => "nano", "n", "n", 1e-9;
    MICRO => "micro", "µ", "mu", 1e-6;
    MILLI => "milli", "m", "m", 1e-3;
    CENTI => "centi", "c", "c", 1e-2;
    DECI => "deci", "d", "d", 1e-1;
    DECA => "deca", "da", "da", 1e1;
    HECTO => "hecto", "h", "h", 1e2;
    KILO => "kilo", "k", "k", 1e3;
    MEGA => "mega", "M", "M", 1e6;
    GIGA => "giga", "G", "G", 1e9;
    TERA => "tera", "T", "T", 1e12;
    PETA => "peta", "P", "P", 1e15;
    EXA => "exa", "E", "E", 1e18;
    ZETTA => "zetta", "Z", "Z", 1e21;
    YOTTA => "yotta", "Y", "Y", 1e24;
    RONNA => "ronna", "R", "R", 1e27;
    QUETTA => "quetta", "Q", "Q", 1e30;
}

impl SiPrefix {
    /// Finds a prefix by its display symbol or its ASCII spelling.
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .find(|prefix| prefix.symbol == symbol || prefix.textual == symbol)
            .copied()
    }

    /// Finds a prefix by its full name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().find(|prefix| prefix.name == name).copied()
    }

    /// Checks whether this is the kilo prefix.
    #[must_use]
    pub fn is_kilo(&self) -> bool {
        self.name == Self::KILO.name
    }
}
