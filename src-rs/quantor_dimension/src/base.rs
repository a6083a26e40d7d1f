use std::fmt;

/// One axis of an [`SIDimension`](crate::SIDimension).
///
/// The declaration order is the canonical axis order used when rendering
/// dimension signatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub enum BaseDimension {
    /// Base unit is 'kilogram'
    Mass,
    /// Base unit is 'meter'
    Length,
    /// Base unit is 'second'
    Time,
    /// Base unit is 'ampere'
    Current,
    /// Base unit is 'kelvin'
    Temperature,
    /// Base unit is 'mole'
    Amount,
    /// Base unit is 'candela'
    LuminousIntensity,
    /// Base unit is 'dollar'
    Money,
}

impl BaseDimension {
    /// All axes in canonical order.
    pub const ALL: [Self; 8] = [
        Self::Mass,
        Self::Length,
        Self::Time,
        Self::Current,
        Self::Temperature,
        Self::Amount,
        Self::LuminousIntensity,
        Self::Money,
    ];

    /// The number of axes in a dimension vector.
    pub const COUNT: usize = Self::ALL.len();

    /// Returns the symbol of the axis as it appears in a signature string.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Mass => "kg",
            Self::Length => "m",
            Self::Time => "s",
            Self::Current => "A",
            Self::Temperature => "K",
            Self::Amount => "mol",
            Self::LuminousIntensity => "cd",
            Self::Money => "$",
        }
    }

    /// Returns the position of the axis in a dimension vector.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Finds the axis whose symbol is exactly `symbol`.
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|axis| axis.symbol() == symbol)
    }

    /// Returns the axes ordered so that no symbol is shadowed by a shorter
    /// one sharing its prefix (`mol` is tried before `m`).
    #[must_use]
    pub fn longest_symbol_first() -> [Self; Self::COUNT] {
        let mut axes = Self::ALL;
        axes.sort_by_key(|axis| std::cmp::Reverse(axis.symbol().len()));
        axes
    }
}

impl fmt::Display for BaseDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
