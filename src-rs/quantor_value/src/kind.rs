use std::fmt;

use quantor_unit::{AbsoluteUnit, Unit};

mod private {
    pub trait Sealed {}
    impl Sealed for super::Absolute {}
    impl Sealed for super::Relative {}
}

/// Whether a value is a point on a scale or a difference between points.
///
/// The kind is part of a value's type, so adding two absolute values does
/// not compile.
pub trait ValueKind:
    private::Sealed + fmt::Debug + Clone + Copy + PartialEq + Send + Sync + 'static
{
    /// The unit type values of this kind are displayed in.
    type Unit: Clone + fmt::Debug + PartialEq + AsRef<Unit> + Send + Sync;

    /// A short label used by verbose formatting.
    const LABEL: &'static str;

    /// Prepares a unit for values of this kind.
    fn normalize(unit: Self::Unit) -> Self::Unit;

    /// Converts a plain unit to the unit type of this kind, if possible.
    fn from_unit(unit: Unit) -> Option<Self::Unit>;
}

/// A point on a scale, such as a temperature reading or an instant.
///
/// Absolute values are displayed in [`AbsoluteUnit`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Absolute {}

/// A magnitude or a difference, such as a length or a duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relative {}

impl ValueKind for Absolute {
    type Unit = AbsoluteUnit;

    const LABEL: &'static str = "Abs";

    fn normalize(unit: Self::Unit) -> Self::Unit {
        unit
    }

    fn from_unit(unit: Unit) -> Option<Self::Unit> {
        AbsoluteUnit::try_from(unit).ok()
    }
}

impl ValueKind for Relative {
    type Unit = Unit;

    const LABEL: &'static str = "Rel";

    /// An absolute unit is replaced by the unit measuring its differences,
    /// so a relative value in degrees Celsius has no offset.
    fn normalize(unit: Self::Unit) -> Self::Unit {
        unit.relative_unit().cloned().unwrap_or(unit)
    }

    fn from_unit(unit: Unit) -> Option<Self::Unit> {
        Some(Self::normalize(unit))
    }
}
