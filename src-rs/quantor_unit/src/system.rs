use std::fmt;

/// The system of units a unit belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub enum UnitSystem {
    /// One of the seven SI base units, or the money base unit
    SiBase,
    /// A coherent unit derived from the SI base units
    SiDerived,
    /// A unit accepted for use with SI, such as the hour or the litre
    SiAccepted,
    /// The centimetre-gram-second system
    Cgs,
    /// The British imperial system
    Imperial,
    /// United States customary units
    UsCustomary,
    /// Any other unit
    Other,
}

impl UnitSystem {
    /// Checks whether the system is part of, or accepted by, SI.
    #[must_use]
    pub const fn is_si(self) -> bool {
        matches!(self, Self::SiBase | Self::SiDerived | Self::SiAccepted)
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::SiBase => "SI base",
            Self::SiDerived => "SI derived",
            Self::SiAccepted => "SI accepted",
            Self::Cgs => "CGS",
            Self::Imperial => "imperial",
            Self::UsCustomary => "US customary",
            Self::Other => "other",
        };
        f.write_str(name)
    }
}
