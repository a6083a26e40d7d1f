use std::{
    fmt, ops,
    sync::{Arc, Weak},
};

use quantor_dimension::SIDimension;

use crate::{Scale, SiPrefixes, UnitBase, UnitSystem, base::BaseInner};

/// A unit of measurement, such as the metre or the degree Celsius.
///
/// Units are immutable and cheap to clone. A unit refers back to the
/// [`UnitBase`] that registered it without owning it, so dropping the
/// family releases its units even while values still display in them.
///
/// Units are created with a [`UnitBuilder`](crate::UnitBuilder) or derived
/// through a [`UnitBase`].
#[derive(Clone)]
pub struct Unit(Arc<UnitData>);

pub struct UnitData {
    pub id: String,
    pub name: String,
    pub abbreviations: Vec<String>,
    pub display_abbreviation: String,
    pub system: UnitSystem,
    pub scale: Scale,
    pub dimension: SIDimension,
    pub quantity: String,
    pub base: Weak<BaseInner>,
    pub relative: Option<Unit>,
    pub prefixes: SiPrefixes,
    pub generated: bool,
}

/// The quantity name given to units that belong to no family.
pub const ANONYMOUS_QUANTITY: &str = "SI";

impl Unit {
    pub(crate) fn from_data(data: UnitData) -> Self {
        Self(Arc::new(data))
    }

    /// Creates a unit that belongs to no family, carrying only a dimension.
    ///
    /// Such units have the identity scale, so values displayed in them show
    /// their SI value. They are used when arithmetic produces a dimension for
    /// which no family is registered.
    #[must_use]
    pub fn anonymous(dimension: SIDimension) -> Self {
        let signature = dimension.to_canonical_string();
        Self::from_data(UnitData {
            id: signature.clone(),
            name: signature.clone(),
            abbreviations: vec![signature.clone()],
            display_abbreviation: signature,
            system: UnitSystem::SiDerived,
            scale: Scale::IDENTITY,
            dimension,
            quantity: ANONYMOUS_QUANTITY.to_string(),
            base: Weak::new(),
            relative: None,
            prefixes: SiPrefixes::None,
            generated: true,
        })
    }

    /// Returns the id, unique within the unit's family.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.0.id
    }

    /// Returns the display name (e.g. "kilometer").
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Returns every abbreviation the unit can be looked up by.
    #[must_use]
    pub fn abbreviations(&self) -> &[String] {
        &self.0.abbreviations
    }

    /// Returns the first abbreviation, which is the ASCII spelling.
    #[must_use]
    pub fn default_abbreviation(&self) -> &str {
        self.0
            .abbreviations
            .first()
            .map_or(self.0.id.as_str(), String::as_str)
    }

    /// Returns the abbreviation used when formatting values.
    #[must_use]
    pub fn display_abbreviation(&self) -> &str {
        &self.0.display_abbreviation
    }

    /// Returns the system of units the unit belongs to.
    #[must_use]
    pub fn unit_system(&self) -> UnitSystem {
        self.0.system
    }

    /// Returns the conversion to SI.
    #[must_use]
    pub fn scale(&self) -> &Scale {
        &self.0.scale
    }

    /// Returns the physical dimension.
    #[must_use]
    pub fn dimension(&self) -> SIDimension {
        self.0.dimension
    }

    /// Returns the name of the unit's family (e.g. "Length").
    #[must_use]
    pub fn quantity(&self) -> &str {
        &self.0.quantity
    }

    /// Returns the family that registered the unit, if it still exists.
    #[must_use]
    pub fn base(&self) -> Option<UnitBase> {
        self.0.base.upgrade().map(UnitBase::from_inner)
    }

    /// Returns the SI unit of the unit's family.
    ///
    /// This is not necessarily `self`: the standard unit of the kilometre is
    /// the metre. A unit whose family has no standard unit, or that belongs
    /// to no family, is its own standard unit.
    #[must_use]
    pub fn standard_unit(&self) -> Self {
        self.base()
            .and_then(|base| base.standard_unit())
            .unwrap_or_else(|| self.clone())
    }

    /// Converts a value in this unit to the SI value.
    #[must_use]
    pub fn to_standard(&self, value: f64) -> f64 {
        self.0.scale.to_standard(value)
    }

    /// Converts an SI value to a value in this unit.
    #[must_use]
    pub fn from_standard(&self, si: f64) -> f64 {
        self.0.scale.from_standard(si)
    }

    /// Checks whether the unit measures points on a scale rather than
    /// differences.
    #[must_use]
    pub fn is_absolute(&self) -> bool {
        self.0.relative.is_some()
    }

    /// Returns the unit that measures differences between values of this
    /// absolute unit (the kelvin for absolute kelvin, the degree Celsius
    /// difference for the Celsius temperature).
    #[must_use]
    pub fn relative_unit(&self) -> Option<&Self> {
        self.0.relative.as_ref()
    }

    /// Returns which prefixed units were generated from this unit.
    #[must_use]
    pub fn si_prefixes(&self) -> SiPrefixes {
        self.0.prefixes
    }

    /// Checks whether the unit was generated from another one rather than
    /// registered explicitly.
    #[must_use]
    pub fn is_generated(&self) -> bool {
        self.0.generated
    }

    /// Checks whether the unit is an SI unit with a base scale.
    #[must_use]
    pub fn is_base_si_unit(&self) -> bool {
        self.0.scale.is_base_scale() && self.0.system.is_si()
    }

    pub(crate) fn belongs_to(&self, base: &UnitBase) -> bool {
        self.0.base.ptr_eq(&base.downgrade())
    }
}

impl PartialEq for Unit {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
            || (self.0.id == other.0.id
                && self.0.quantity == other.0.quantity
                && self.0.dimension == other.0.dimension
                && self.0.scale == other.0.scale)
    }
}

impl AsRef<Self> for Unit {
    fn as_ref(&self) -> &Self {
        self
    }
}

impl fmt::Debug for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Unit")
            .field("id", &self.0.id)
            .field("quantity", &self.0.quantity)
            .field("dimension", &self.0.dimension)
            .field("scale", &self.0.scale)
            .field("relative", &self.0.relative.as_ref().map(Self::id))
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_abbreviation())
    }
}

/// A unit that is known to be absolute.
///
/// Obtained from a [`Unit`] with `TryFrom`, which hands the unit back if it
/// has no relative counterpart.
#[derive(Clone, PartialEq)]
pub struct AbsoluteUnit {
    unit: Unit,
    relative: Unit,
}

impl AbsoluteUnit {
    /// Returns the unit that measures differences of this unit.
    #[must_use]
    pub const fn relative_unit(&self) -> &Unit {
        &self.relative
    }

    /// Returns the unit itself.
    #[must_use]
    pub const fn as_unit(&self) -> &Unit {
        &self.unit
    }

    /// Returns the unit itself, consuming the wrapper.
    #[must_use]
    pub fn into_unit(self) -> Unit {
        self.unit
    }
}

impl TryFrom<Unit> for AbsoluteUnit {
    type Error = Unit;

    fn try_from(unit: Unit) -> Result<Self, Self::Error> {
        match unit.relative_unit().cloned() {
            Some(relative) => Ok(Self { unit, relative }),
            None => Err(unit),
        }
    }
}

impl ops::Deref for AbsoluteUnit {
    type Target = Unit;

    fn deref(&self) -> &Self::Target {
        &self.unit
    }
}

impl AsRef<Unit> for AbsoluteUnit {
    fn as_ref(&self) -> &Unit {
        &self.unit
    }
}

impl fmt::Debug for AbsoluteUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.unit, f)
    }
}

impl fmt::Display for AbsoluteUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.unit, f)
    }
}
