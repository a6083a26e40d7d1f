use crate::{
    ConstructionError, Scale, SiPrefixes, Unit, UnitBase, UnitSystem,
    unit::UnitData,
};

/// Builds a [`Unit`] for a [`UnitBase`].
///
/// The id and name are given up front; the unit system, scale and base are
/// required before [`build`](Self::build). When a reference unit is given,
/// the scale is read as relative to that unit, so a foot can be defined as
/// `linear(12.0)` on top of the inch.
///
/// ```
/// use quantor_unit::{Scale, UnitBase, UnitBuilder, UnitSystem};
///
/// let length = UnitBase::new("Length", "m").expect("valid signature");
/// let meter = UnitBuilder::new("m", "meter")
///     .unit_system(UnitSystem::SiBase)
///     .scale(Scale::IDENTITY)
///     .base(&length)
///     .register()
///     .expect("meter should register");
///
/// let inch = UnitBuilder::new("in", "inch")
///     .unit_system(UnitSystem::Imperial)
///     .scale(Scale::linear(0.0254).expect("non-zero factor"))
///     .base(&length)
///     .register()
///     .expect("inch should register");
///
/// let foot = UnitBuilder::new("ft", "foot")
///     .unit_system(UnitSystem::Imperial)
///     .scale(Scale::linear(12.0).expect("non-zero factor"))
///     .reference(&inch)
///     .base(&length)
///     .register()
///     .expect("foot should register");
///
/// assert!((foot.to_standard(1.0) - 0.3048).abs() < 1e-12);
/// assert_eq!(foot.standard_unit(), meter);
/// ```
#[derive(Debug, Clone)]
#[must_use]
pub struct UnitBuilder {
    id: String,
    name: String,
    abbreviations: Vec<String>,
    display_abbreviation: Option<String>,
    system: Option<UnitSystem>,
    scale: Option<Scale>,
    base: Option<UnitBase>,
    reference: Option<Unit>,
    relative: Option<Unit>,
    absolute: bool,
    prefixes: SiPrefixes,
    generated: bool,
}

impl UnitBuilder {
    /// Starts building a unit with an id and a display name.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            abbreviations: Vec::new(),
            display_abbreviation: None,
            system: None,
            scale: None,
            base: None,
            reference: None,
            relative: None,
            absolute: false,
            prefixes: SiPrefixes::None,
            generated: false,
        }
    }

    /// Sets the system of units.
    pub const fn unit_system(mut self, system: UnitSystem) -> Self {
        self.system = Some(system);
        self
    }

    /// Sets the scale, relative to the reference unit if there is one.
    pub const fn scale(mut self, scale: Scale) -> Self {
        self.scale = Some(scale);
        self
    }

    /// Sets the family the unit belongs to.
    pub fn base(mut self, base: &UnitBase) -> Self {
        self.base = Some(base.clone());
        self
    }

    /// Defines the scale relative to another unit of the same family.
    pub fn reference(mut self, reference: &Unit) -> Self {
        self.reference = Some(reference.clone());
        self
    }

    /// Adds an abbreviation. The first one added is the default.
    ///
    /// Without any, the id is the only abbreviation.
    pub fn abbreviation(mut self, abbreviation: impl Into<String>) -> Self {
        self.abbreviations.push(abbreviation.into());
        self
    }

    /// Adds several abbreviations.
    pub fn abbreviations<I, S>(mut self, abbreviations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.abbreviations
            .extend(abbreviations.into_iter().map(Into::into));
        self
    }

    /// Sets the abbreviation used for display, which defaults to the first
    /// abbreviation.
    pub fn display_abbreviation(mut self, abbreviation: impl Into<String>) -> Self {
        self.display_abbreviation = Some(abbreviation.into());
        self
    }

    /// Marks the unit as absolute, with `relative` measuring its differences.
    pub fn relative_unit(mut self, relative: &Unit) -> Self {
        self.relative = Some(relative.clone());
        self.absolute = true;
        self
    }

    /// Marks the unit as absolute.
    ///
    /// Building fails unless a relative unit is also given.
    pub const fn absolute(mut self) -> Self {
        self.absolute = true;
        self
    }

    /// Sets which prefixed units are generated on registration.
    pub const fn si_prefixes(mut self, prefixes: SiPrefixes) -> Self {
        self.prefixes = prefixes;
        self
    }

    /// Marks the unit as generated, so explicitly registered units take
    /// precedence over it.
    pub const fn generated(mut self, generated: bool) -> Self {
        self.generated = generated;
        self
    }

    /// Builds the unit without registering it.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstructionError`] if:
    /// - the unit system, scale or base is missing
    /// - the reference unit has another dimension, or its scale cannot be
    ///   composed with the unit's scale
    /// - the unit is absolute without a relative unit of the same dimension
    pub fn build(self) -> Result<Unit, ConstructionError> {
        let missing = |field| ConstructionError::MissingField {
            id: self.id.clone(),
            field,
        };
        let system = self.system.ok_or_else(|| missing("unit system"))?;
        let scale = self.scale.ok_or_else(|| missing("scale"))?;
        let base = self.base.clone().ok_or_else(|| missing("base"))?;

        let scale = match &self.reference {
            None => scale,
            Some(reference) => {
                if reference.dimension() != base.dimension() {
                    return Err(ConstructionError::DimensionMismatch {
                        id: reference.id().to_string(),
                        expected: base.dimension(),
                        found: reference.dimension(),
                    });
                }
                scale.relative_to(reference.scale()).ok_or_else(|| {
                    ConstructionError::IncompatibleScale {
                        id: self.id.clone(),
                    }
                })?
            }
        };

        let relative = if self.absolute {
            let Some(relative) = self.relative else {
                return Err(ConstructionError::MissingRelativeUnit { id: self.id });
            };
            if relative.is_absolute() {
                return Err(ConstructionError::MissingRelativeUnit { id: self.id });
            }
            if relative.dimension() != base.dimension() {
                return Err(ConstructionError::RelativeDimensionMismatch {
                    id: self.id,
                    expected: base.dimension(),
                    found: relative.dimension(),
                });
            }
            Some(relative)
        } else {
            None
        };

        let abbreviations = if self.abbreviations.is_empty() {
            vec![self.id.clone()]
        } else {
            self.abbreviations
        };
        let display_abbreviation = self
            .display_abbreviation
            .unwrap_or_else(|| abbreviations[0].clone());

        Ok(Unit::from_data(UnitData {
            id: self.id,
            name: self.name,
            abbreviations,
            display_abbreviation,
            system,
            scale,
            dimension: base.dimension(),
            quantity: base.name().to_string(),
            base: base.downgrade(),
            relative,
            prefixes: self.prefixes,
            generated: self.generated,
        }))
    }

    /// Builds the unit and registers it with its base.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstructionError`] if building fails (see
    /// [`build`](Self::build)) or if the base rejects the unit (see
    /// [`UnitBase::register`]).
    pub fn register(self) -> Result<Unit, ConstructionError> {
        let unit = self.build()?;
        if let Some(base) = unit.base() {
            base.register(unit.clone())?;
        }
        Ok(unit)
    }
}
