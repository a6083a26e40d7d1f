use std::{
    fmt,
    hash::{Hash, Hasher},
    sync::{Arc, Weak},
};

use indexmap::IndexMap;
use parking_lot::RwLock;
use quantor_dimension::SIDimension;
use quantor_parser::{FormatError, parse_dimension};
use tracing::{debug, trace, warn};

use crate::{ConstructionError, Scale, SiPrefix, SiPrefixes, Unit, UnitBuilder, UnitSystem};

/// The family of units sharing one physical dimension, such as all length
/// units.
///
/// A base owns its units: it maps ids and abbreviations to units and
/// designates the standard (SI) unit, which is the first registered unit
/// with a base scale. Units can be registered and unregistered at any time.
/// Reads and writes are guarded by a reader-writer lock, so a base can be
/// shared between threads.
///
/// `UnitBase` is a handle; clones refer to the same family.
#[derive(Clone)]
pub struct UnitBase(Arc<BaseInner>);

pub struct BaseInner {
    name: String,
    dimension: SIDimension,
    table: RwLock<UnitTable>,
}

#[derive(Default)]
struct UnitTable {
    by_id: IndexMap<String, Unit>,
    by_abbreviation: IndexMap<String, Unit>,
}

impl UnitTable {
    fn remove(&mut self, id: &str) -> Option<Unit> {
        let removed = self.by_id.shift_remove(id)?;
        self.by_abbreviation
            .retain(|_abbreviation, unit| unit.id() != removed.id());

        // A generated unit may have been shadowed by the removed unit.
        for abbreviation in removed.abbreviations() {
            if self.by_abbreviation.contains_key(abbreviation) {
                continue;
            }
            let heir = self
                .by_id
                .values()
                .find(|unit| unit.abbreviations().contains(abbreviation))
                .cloned();
            if let Some(heir) = heir {
                self.by_abbreviation.insert(abbreviation.clone(), heir);
            }
        }
        Some(removed)
    }
}

impl UnitBase {
    /// Creates an empty family for the dimension given as a signature string
    /// such as `"kgm2/s2"`.
    ///
    /// # Errors
    ///
    /// Returns a [`FormatError`] if the signature is malformed.
    pub fn new(name: impl Into<String>, signature: &str) -> Result<Self, FormatError> {
        let dimension = parse_dimension(signature, None)?;
        Ok(Self::with_dimension(name, dimension))
    }

    /// Creates an empty family for a dimension.
    #[must_use]
    pub fn with_dimension(name: impl Into<String>, dimension: SIDimension) -> Self {
        Self(Arc::new(BaseInner {
            name: name.into(),
            dimension,
            table: RwLock::new(UnitTable::default()),
        }))
    }

    pub(crate) const fn from_inner(inner: Arc<BaseInner>) -> Self {
        Self(inner)
    }

    pub(crate) fn downgrade(&self) -> Weak<BaseInner> {
        Arc::downgrade(&self.0)
    }

    /// Returns the name of the family (e.g. "Length").
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Returns the dimension shared by every unit of the family.
    #[must_use]
    pub fn dimension(&self) -> SIDimension {
        self.0.dimension
    }

    /// Registers a unit built for this family.
    ///
    /// An explicitly registered unit replaces a generated unit with the same
    /// id and takes over its abbreviations. A generated unit never replaces
    /// an existing unit and never takes an abbreviation already in use; it
    /// is skipped instead.
    ///
    /// Registering an explicit unit whose [`SiPrefixes`] is not `None` also
    /// registers the generated prefixed units.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstructionError`] if:
    /// - the unit was built for another family
    /// - an explicit unit with the same id is already registered
    /// - one of the unit's abbreviations already names another explicit unit
    pub fn register(&self, unit: Unit) -> Result<(), ConstructionError> {
        if !unit.belongs_to(self) {
            return Err(ConstructionError::ForeignUnit {
                id: unit.id().to_string(),
                expected: unit.quantity().to_string(),
                found: self.name().to_string(),
            });
        }

        {
            let mut table = self.0.table.write();

            if let Some(existing) = table.by_id.get(unit.id()) {
                if unit.is_generated() {
                    warn!(
                        quantity = self.name(),
                        id = unit.id(),
                        "skipping generated unit, the id is already registered"
                    );
                    return Ok(());
                }
                if !existing.is_generated() {
                    return Err(ConstructionError::DuplicateUnitId {
                        quantity: self.name().to_string(),
                        id: unit.id().to_string(),
                    });
                }
            }

            if !unit.is_generated() {
                for abbreviation in unit.abbreviations() {
                    if let Some(holder) = table.by_abbreviation.get(abbreviation)
                        && !holder.is_generated()
                    {
                        return Err(ConstructionError::DuplicateAbbreviation {
                            id: unit.id().to_string(),
                            abbreviation: abbreviation.clone(),
                            existing: holder.id().to_string(),
                        });
                    }
                }
                if table.remove(unit.id()).is_some() {
                    debug!(
                        quantity = self.name(),
                        id = unit.id(),
                        "explicit unit replaces generated unit"
                    );
                }
            }

            for abbreviation in unit.abbreviations() {
                if unit.is_generated() && table.by_abbreviation.contains_key(abbreviation) {
                    warn!(
                        quantity = self.name(),
                        id = unit.id(),
                        abbreviation = abbreviation.as_str(),
                        "skipping abbreviation of generated unit, it is already in use"
                    );
                    continue;
                }
                table
                    .by_abbreviation
                    .insert(abbreviation.clone(), unit.clone());
            }
            table.by_id.insert(unit.id().to_string(), unit.clone());
        }

        if unit.is_generated() {
            trace!(quantity = self.name(), id = unit.id(), "registered generated unit");
        } else {
            debug!(quantity = self.name(), id = unit.id(), "registered unit");
            self.register_prefixed(&unit);
        }

        Ok(())
    }

    /// Removes a unit and its abbreviations.
    ///
    /// Removing an id that is not registered does nothing, so this is safe
    /// to call for units that were probably never registered.
    pub fn unregister(&self, id: &str) -> Option<Unit> {
        let removed = self.0.table.write().remove(id);
        if removed.is_some() {
            debug!(quantity = self.name(), id, "unregistered unit");
        }
        removed
    }

    /// Looks up a unit by id.
    #[must_use]
    pub fn lookup_by_id(&self, id: &str) -> Option<Unit> {
        self.0.table.read().by_id.get(id).cloned()
    }

    /// Looks up a unit by one of its abbreviations, matching exactly.
    #[must_use]
    pub fn lookup_by_abbreviation(&self, abbreviation: &str) -> Option<Unit> {
        self.0.table.read().by_abbreviation.get(abbreviation).cloned()
    }

    /// Looks up a unit by abbreviation, forgiving some spelling variations.
    ///
    /// The exact abbreviation is tried first, then the abbreviation with all
    /// spaces, dots and carets removed (so `"m^2"` finds `"m2"`). Finally, if
    /// the text is a dimension signature equal to this family's dimension,
    /// the standard unit is returned (so `"kgm2/s2"` finds the joule).
    #[must_use]
    pub fn lookup_lenient(&self, text: &str) -> Option<Unit> {
        if let Some(unit) = self.lookup_by_abbreviation(text) {
            return Some(unit);
        }

        let compact: String = text
            .chars()
            .filter(|c| !matches!(c, ' ' | '.' | '^'))
            .collect();
        if let Some(unit) = self.lookup_by_abbreviation(&compact) {
            trace!(quantity = self.name(), text, "found unit after removing separators");
            return Some(unit);
        }

        let dimension = parse_dimension(text, None).ok()?;
        if dimension != self.dimension() {
            return None;
        }
        trace!(quantity = self.name(), text, "found standard unit from signature");
        self.standard_unit()
    }

    /// Returns the standard unit: the first registered unit with a base
    /// scale.
    #[must_use]
    pub fn standard_unit(&self) -> Option<Unit> {
        self.0
            .table
            .read()
            .by_id
            .values()
            .find(|unit| unit.scale().is_base_scale())
            .cloned()
    }

    /// Returns every registered unit in registration order.
    #[must_use]
    pub fn units(&self) -> Vec<Unit> {
        self.0.table.read().by_id.values().cloned().collect()
    }

    /// Returns the number of registered units.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.table.read().by_id.len()
    }

    /// Checks whether no unit is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.table.read().by_id.is_empty()
    }

    /// Derives and registers an SI-prefixed version of the standard unit.
    ///
    /// When the standard unit is a kilo unit with [`SiPrefixes::Kilo`] (the
    /// kilogram), this is [`derive_si_kilo`](Self::derive_si_kilo).
    ///
    /// # Errors
    ///
    /// Returns a [`ConstructionError`] if there is no standard unit, or if the
    /// derived unit cannot be registered.
    pub fn derive_si(&self, prefix: &SiPrefix) -> Result<Unit, ConstructionError> {
        let standard = self.require_standard_unit()?;
        if standard.si_prefixes() == SiPrefixes::Kilo {
            return self.derive_si_kilo(prefix);
        }
        let unit = prefixed(&standard, prefix, false)?.register()?;
        debug!(quantity = self.name(), id = unit.id(), "derived SI unit");
        Ok(unit)
    }

    /// Derives and registers a prefixed unit from a standard unit that
    /// already carries the kilo prefix, replacing that prefix. For the
    /// kilogram, `MILLI` gives the milligram.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstructionError`] if there is no standard unit, if its
    /// id does not start with `k`, or if the derived unit cannot be
    /// registered.
    pub fn derive_si_kilo(&self, prefix: &SiPrefix) -> Result<Unit, ConstructionError> {
        let standard = self.require_standard_unit()?;
        let unit = prefixed(&standard, prefix, true)?.register()?;
        debug!(quantity = self.name(), id = unit.id(), "derived SI unit");
        Ok(unit)
    }

    /// Derives and registers a unit that is `factor` times the standard
    /// unit.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstructionError`] if the factor is zero or not finite,
    /// if there is no linear standard unit, or if the unit cannot be
    /// registered.
    pub fn derive_linear(
        &self,
        factor: f64,
        id: &str,
        name: &str,
        system: UnitSystem,
    ) -> Result<Unit, ConstructionError> {
        let standard = self.require_standard_unit()?;
        if !standard.scale().is_linear() {
            return Err(ConstructionError::NotLinear {
                id: standard.id().to_string(),
            });
        }
        UnitBuilder::new(id, name)
            .unit_system(system)
            .scale(Scale::linear(factor)?)
            .reference(&standard)
            .base(self)
            .register()
    }

    /// Derives and registers an absolute unit with an offset-linear scale
    /// against the standard unit, such as the degree Celsius against the
    /// kelvin.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstructionError`] if the scale parameters are invalid,
    /// if there is no standard unit, if `relative_unit` is not a relative
    /// unit of this dimension, or if the unit cannot be registered.
    pub fn derive_linear_offset(
        &self,
        ratio: f64,
        offset: f64,
        relative_unit: &Unit,
        id: &str,
        name: &str,
        system: UnitSystem,
    ) -> Result<Unit, ConstructionError> {
        let standard = self.require_standard_unit()?;
        UnitBuilder::new(id, name)
            .unit_system(system)
            .scale(Scale::offset_linear(ratio, offset)?)
            .reference(&standard)
            .relative_unit(relative_unit)
            .base(self)
            .register()
    }

    fn require_standard_unit(&self) -> Result<Unit, ConstructionError> {
        self.standard_unit()
            .ok_or_else(|| ConstructionError::NoStandardUnit {
                quantity: self.name().to_string(),
            })
    }

    fn register_prefixed(&self, unit: &Unit) {
        let kilo = match unit.si_prefixes() {
            SiPrefixes::None => return,
            SiPrefixes::Unit => false,
            SiPrefixes::Kilo => true,
        };

        for prefix in SiPrefix::ALL {
            if kilo && prefix.is_kilo() {
                continue;
            }
            let result = prefixed(unit, prefix, kilo)
                .map(|builder| builder.generated(true))
                .and_then(UnitBuilder::register);
            if let Err(error) = result {
                trace!(
                    quantity = self.name(),
                    id = unit.id(),
                    prefix = prefix.name,
                    %error,
                    "no prefixed unit generated"
                );
            }
        }
    }
}

/// Prepares the builder for `unit` with `prefix` applied.
///
/// With `replace_kilo`, the leading kilo of the unit is removed first, so
/// the factor is relative to the unprefixed unit.
fn prefixed(
    unit: &Unit,
    prefix: &SiPrefix,
    replace_kilo: bool,
) -> Result<UnitBuilder, ConstructionError> {
    let not_kilo = || ConstructionError::NotKiloUnit {
        id: unit.id().to_string(),
    };
    let strip = |text: &str, kilo: &str| -> Result<String, ConstructionError> {
        if replace_kilo {
            text.strip_prefix(kilo).map(str::to_string).ok_or_else(not_kilo)
        } else {
            Ok(text.to_string())
        }
    };

    let id = strip(unit.id(), SiPrefix::KILO.textual)?;
    let name = strip(unit.name(), SiPrefix::KILO.name)?;
    let display = strip(unit.display_abbreviation(), SiPrefix::KILO.symbol)?;
    let abbreviations = unit
        .abbreviations()
        .iter()
        .map(|abbreviation| strip(abbreviation.as_str(), SiPrefix::KILO.textual))
        .collect::<Result<Vec<_>, _>>()?;

    let factor = if replace_kilo {
        prefix.factor / SiPrefix::KILO.factor
    } else {
        prefix.factor
    };

    let mut prefixed_abbreviations = Vec::with_capacity(abbreviations.len() * 2);
    for abbreviation in &abbreviations {
        prefixed_abbreviations.push(format!("{}{abbreviation}", prefix.textual));
        if prefix.symbol != prefix.textual {
            prefixed_abbreviations.push(format!("{}{abbreviation}", prefix.symbol));
        }
    }

    let Some(base) = unit.base() else {
        return Err(ConstructionError::MissingField {
            id: unit.id().to_string(),
            field: "base",
        });
    };

    let mut builder = UnitBuilder::new(
        format!("{}{id}", prefix.textual),
        format!("{}{name}", prefix.name),
    )
    .abbreviations(prefixed_abbreviations)
    .display_abbreviation(format!("{}{display}", prefix.symbol))
    .unit_system(unit.unit_system())
    .scale(Scale::linear(factor)?)
    .reference(unit)
    .base(&base);

    if let Some(relative) = unit.relative_unit() {
        let relative_id = format!(
            "{}{}",
            prefix.textual,
            strip(relative.id(), SiPrefix::KILO.textual)?
        );
        let relative_prefixed = relative
            .base()
            .and_then(|relative_base| relative_base.lookup_by_id(&relative_id))
            .ok_or_else(|| ConstructionError::MissingRelativeUnit {
                id: format!("{}{id}", prefix.textual),
            })?;
        builder = builder.relative_unit(&relative_prefixed);
    }

    Ok(builder)
}

impl PartialEq for UnitBase {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for UnitBase {}

impl Hash for UnitBase {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.name.hash(state);
    }
}

impl fmt::Debug for UnitBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnitBase")
            .field("name", &self.0.name)
            .field("dimension", &self.0.dimension)
            .field("units", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::is_close;

    fn length() -> (UnitBase, Unit) {
        let base = UnitBase::new("Length", "m").expect("valid signature");
        let meter = UnitBuilder::new("m", "meter")
            .unit_system(UnitSystem::SiBase)
            .scale(Scale::IDENTITY)
            .si_prefixes(SiPrefixes::Unit)
            .base(&base)
            .register()
            .expect("meter should register");
        (base, meter)
    }

    fn mass() -> UnitBase {
        let base = UnitBase::new("Mass", "kg").expect("valid signature");
        UnitBuilder::new("kg", "kilogram")
            .unit_system(UnitSystem::SiBase)
            .scale(Scale::IDENTITY)
            .si_prefixes(SiPrefixes::Kilo)
            .base(&base)
            .register()
            .expect("kilogram should register");
        base
    }

    mod success_tests {
        use super::*;

        #[test]
        fn first_base_scale_unit_is_standard() {
            let (base, meter) = length();
            assert_eq!(base.standard_unit(), Some(meter));
        }

        #[test]
        fn prefixes_are_generated() {
            let (base, _meter) = length();
            let millimeter = base
                .lookup_by_abbreviation("mm")
                .expect("millimeter should be generated");
            assert!(millimeter.is_generated());
            assert_eq!(millimeter.name(), "millimeter");
            assert!(is_close(millimeter.to_standard(80.0), 0.08));

            let kilometer = base.lookup_by_id("km").expect("kilometer should be generated");
            assert!(is_close(kilometer.to_standard(1.0), 1000.0));
        }

        #[test]
        fn micro_has_two_spellings() {
            let (base, _meter) = length();
            let by_ascii = base.lookup_by_abbreviation("mum").expect("ascii spelling");
            let by_symbol = base.lookup_by_abbreviation("µm").expect("symbol spelling");
            assert_eq!(by_ascii, by_symbol);
            assert_eq!(by_ascii.display_abbreviation(), "µm");
        }

        #[test]
        fn kilo_prefixes_rebase_on_gram() {
            let base = mass();
            let milligram = base.lookup_by_id("mg").expect("milligram should be generated");
            assert_eq!(milligram.name(), "milligram");
            assert!(is_close(milligram.to_standard(1.0), 1e-6));
            assert!(base.lookup_by_id("kkg").is_none());
            assert!(base.lookup_by_id("mkg").is_none());
        }

        #[test]
        fn derive_si_on_kilo_family() {
            let base = mass();
            let megagram = base.derive_si(&SiPrefix::MEGA).expect("should derive");
            assert_eq!(megagram.id(), "Mg");
            assert!(!megagram.is_generated());
            assert!(is_close(megagram.to_standard(1.0), 1000.0));
        }

        #[test]
        fn derive_si_replaces_generated_unit() {
            let (base, _meter) = length();
            let kilometer = base.derive_si(&SiPrefix::KILO).expect("should derive");
            assert!(!kilometer.is_generated());
            assert_eq!(base.lookup_by_id("km"), Some(kilometer.clone()));
            assert!(
                !base
                    .lookup_by_abbreviation("km")
                    .expect("abbreviation should be kept")
                    .is_generated()
            );
        }

        #[test]
        fn derive_linear_from_standard() {
            let (base, _meter) = length();
            let yard = base
                .derive_linear(0.9144, "yd", "yard", UnitSystem::Imperial)
                .expect("should derive");
            assert_eq!(base.lookup_by_abbreviation("yd"), Some(yard.clone()));
            assert!(is_close(yard.to_standard(1.0), 0.9144));
        }

        #[test]
        fn derive_linear_offset_for_absolute_family() {
            let temperature = UnitBase::new("Temperature", "K").expect("valid signature");
            let kelvin = UnitBuilder::new("K", "kelvin")
                .unit_system(UnitSystem::SiBase)
                .scale(Scale::IDENTITY)
                .base(&temperature)
                .register()
                .expect("kelvin should register");
            let absolute = UnitBase::new("AbsoluteTemperature", "K").expect("valid signature");
            UnitBuilder::new("K", "kelvin")
                .unit_system(UnitSystem::SiBase)
                .scale(Scale::IDENTITY)
                .relative_unit(&kelvin)
                .base(&absolute)
                .register()
                .expect("absolute kelvin should register");

            let celsius = absolute
                .derive_linear_offset(
                    1.0,
                    273.15,
                    &kelvin,
                    "degC",
                    "degree Celsius",
                    UnitSystem::SiDerived,
                )
                .expect("should derive");
            assert!(celsius.is_absolute());
            assert!(is_close(celsius.to_standard(0.0), 273.15));
            assert!(is_close(celsius.to_standard(100.0), 373.15));
        }

        #[test]
        fn unregister_is_idempotent() {
            let (base, _meter) = length();
            assert!(base.unregister("km").is_some());
            assert!(base.unregister("km").is_none());
            assert!(base.lookup_by_abbreviation("km").is_none());
            assert!(base.unregister("never-registered").is_none());
        }

        #[test]
        fn unregister_restores_shadowed_abbreviation() {
            let (base, _meter) = length();
            let millimeter = base
                .lookup_by_abbreviation("mm")
                .expect("millimeter should be generated");

            let custom = UnitBuilder::new("custom-mm", "custom millimeter")
                .abbreviation("mm")
                .unit_system(UnitSystem::Other)
                .scale(Scale::linear(1e-3).expect("valid factor"))
                .base(&base)
                .register()
                .expect("explicit unit should take over the abbreviation");
            assert_eq!(base.lookup_by_abbreviation("mm"), Some(custom));

            assert!(base.unregister("custom-mm").is_some());
            assert_eq!(base.lookup_by_abbreviation("mm"), Some(millimeter));
        }

        #[test]
        fn lenient_lookup() {
            let base = UnitBase::new("Area", "m2").expect("valid signature");
            let square_meter = UnitBuilder::new("m2", "square meter")
                .unit_system(UnitSystem::SiDerived)
                .scale(Scale::IDENTITY)
                .base(&base)
                .register()
                .expect("should register");

            assert_eq!(base.lookup_by_abbreviation("m^2"), None);
            assert_eq!(base.lookup_lenient("m^2"), Some(square_meter.clone()));
            assert_eq!(base.lookup_lenient("m.m"), Some(square_meter));
            assert_eq!(base.lookup_lenient("m3"), None);
        }

        #[test]
        fn units_in_registration_order() {
            let (base, _meter) = length();
            let ids: Vec<String> = base
                .units()
                .iter()
                .take(3)
                .map(|unit| unit.id().to_string())
                .collect();
            assert_eq!(ids, ["m", "qm", "rm"]);
        }
    }

    mod error_tests {
        use super::*;

        #[test]
        fn malformed_signature() {
            assert!(UnitBase::new("Broken", "m//s").is_err());
            assert!(UnitBase::new("Broken", "m/s/s").is_err());
            assert!(UnitBase::new("Broken", "xyz").is_err());
        }

        #[test]
        fn duplicate_id() {
            let (base, _meter) = length();
            let error = UnitBuilder::new("m", "other meter")
                .abbreviation("meter")
                .unit_system(UnitSystem::Other)
                .scale(Scale::IDENTITY)
                .base(&base)
                .register()
                .expect_err("should not register");
            assert_eq!(
                error,
                ConstructionError::DuplicateUnitId {
                    quantity: "Length".to_string(),
                    id: "m".to_string()
                }
            );
        }

        #[test]
        fn duplicate_abbreviation() {
            let (base, _meter) = length();
            let error = UnitBuilder::new("meter2", "other meter")
                .abbreviation("m")
                .unit_system(UnitSystem::Other)
                .scale(Scale::IDENTITY)
                .base(&base)
                .register()
                .expect_err("should not register");
            assert!(matches!(
                error,
                ConstructionError::DuplicateAbbreviation { .. }
            ));
        }

        #[test]
        fn foreign_unit() {
            let (_base, meter) = length();
            let other = UnitBase::new("Distance", "m").expect("valid signature");
            let error = other.register(meter).expect_err("should not register");
            assert!(matches!(error, ConstructionError::ForeignUnit { .. }));
        }

        #[test]
        fn derive_without_standard_unit() {
            let base = UnitBase::new("Length", "m").expect("valid signature");
            let error = base
                .derive_si(&SiPrefix::KILO)
                .expect_err("should not derive");
            assert_eq!(
                error,
                ConstructionError::NoStandardUnit {
                    quantity: "Length".to_string()
                }
            );
        }

        #[test]
        fn derive_linear_zero_factor() {
            let (base, _meter) = length();
            let error = base
                .derive_linear(0.0, "zero", "zero", UnitSystem::Other)
                .expect_err("should not derive");
            assert_eq!(error, ConstructionError::ZeroFactor);
        }

        #[test]
        fn unknown_abbreviation_is_none() {
            let (base, _meter) = length();
            assert_eq!(base.lookup_by_abbreviation("furlong"), None);
            assert_eq!(base.lookup_by_id("furlong"), None);
        }
    }
}
