use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};
use parking_lot::RwLock;
use quantor_dimension::SIDimension;
use tracing::debug;

use crate::{ConstructionError, Unit, UnitBase, catalog};

/// The set of unit families known to a program, indexed by name.
///
/// The registry is a handle; clones share the same families. It is used to
/// find the unit of the result of multiplying or dividing values: the
/// product of a length and a length is displayed in the standard unit of the
/// first registered family with the area dimension.
#[derive(Debug, Clone, Default)]
pub struct UnitRegistry(Arc<RwLock<IndexMap<String, UnitBase>>>);

impl UnitRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in unit families.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstructionError`] if a built-in unit fails to register,
    /// which indicates a defect in the catalog.
    pub fn with_standard_units() -> Result<Self, ConstructionError> {
        let registry = Self::new();
        catalog::register_standard_units(&registry)?;
        Ok(registry)
    }

    /// Adds a family and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError::DuplicateBase`] if a family with the same
    /// name is already registered.
    pub fn register(&self, base: UnitBase) -> Result<UnitBase, ConstructionError> {
        let mut bases = self.0.write();
        if bases.contains_key(base.name()) {
            return Err(ConstructionError::DuplicateBase {
                quantity: base.name().to_string(),
            });
        }
        debug!(quantity = base.name(), dimension = %base.dimension(), "registered quantity");
        bases.insert(base.name().to_string(), base.clone());
        Ok(base)
    }

    /// Removes a family. Removing a name that is not registered does nothing.
    pub fn unregister(&self, name: &str) -> Option<UnitBase> {
        let removed = self.0.write().shift_remove(name);
        if removed.is_some() {
            debug!(quantity = name, "unregistered quantity");
        }
        removed
    }

    /// Looks up a family by name.
    #[must_use]
    pub fn base(&self, name: &str) -> Option<UnitBase> {
        self.0.read().get(name).cloned()
    }

    /// Returns every family in registration order.
    #[must_use]
    pub fn bases(&self) -> Vec<UnitBase> {
        self.0.read().values().cloned().collect()
    }

    /// Returns every family with the given dimension, in registration order.
    ///
    /// Several families can share a dimension: energy and torque are both
    /// `kgm2/s2`.
    #[must_use]
    pub fn lookup_units_with_dimension(&self, dimension: SIDimension) -> IndexSet<UnitBase> {
        self.0
            .read()
            .values()
            .filter(|base| base.dimension() == dimension)
            .cloned()
            .collect()
    }

    /// Finds the unit to display a value of the given dimension in.
    ///
    /// This is the standard unit of the first registered family with that
    /// dimension. If no family has one, an anonymous unit named after the
    /// dimension is returned (for example `"kg/s3"`).
    #[must_use]
    pub fn resolve_unit(&self, dimension: SIDimension) -> Unit {
        self.lookup_units_with_dimension(dimension)
            .iter()
            .find_map(UnitBase::standard_unit)
            .unwrap_or_else(|| Unit::anonymous(dimension))
    }

    /// Like [`resolve_unit`](Self::resolve_unit), but prefers the family
    /// named `preferred` when it has the dimension.
    #[must_use]
    pub fn resolve_unit_preferring(&self, dimension: SIDimension, preferred: &str) -> Unit {
        self.base(preferred)
            .filter(|base| base.dimension() == dimension)
            .and_then(|base| base.standard_unit())
            .unwrap_or_else(|| self.resolve_unit(dimension))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Scale, UnitBuilder, UnitSystem};
    use quantor_dimension::BaseDimension;

    fn family(name: &str, signature: &str, id: &str) -> UnitBase {
        let base = UnitBase::new(name, signature).expect("valid signature");
        UnitBuilder::new(id, id)
            .unit_system(UnitSystem::SiDerived)
            .scale(Scale::IDENTITY)
            .base(&base)
            .register()
            .expect("unit should register");
        base
    }

    mod success_tests {
        use super::*;

        #[test]
        fn first_registered_family_wins() {
            let registry = UnitRegistry::new();
            registry
                .register(family("Energy", "kgm2/s2", "J"))
                .expect("should register");
            registry
                .register(family("Torque", "kgm2/s2", "Nm"))
                .expect("should register");

            let dimension = registry
                .base("Energy")
                .expect("energy is registered")
                .dimension();
            assert_eq!(registry.lookup_units_with_dimension(dimension).len(), 2);
            assert_eq!(registry.resolve_unit(dimension).id(), "J");
            assert_eq!(
                registry.resolve_unit_preferring(dimension, "Torque").id(),
                "Nm"
            );
            assert_eq!(
                registry.resolve_unit_preferring(dimension, "Length").id(),
                "J"
            );
        }

        #[test]
        fn unknown_dimension_resolves_to_anonymous_unit() {
            let registry = UnitRegistry::new();
            let dimension = SIDimension::of(BaseDimension::Mass)
                / SIDimension::of(BaseDimension::Time).checked_pow(3).expect("small exponent");
            let unit = registry.resolve_unit(dimension);
            assert_eq!(unit.id(), "kg/s3");
            assert!(unit.base().is_none());
        }

        #[test]
        fn unregister_is_idempotent() {
            let registry = UnitRegistry::new();
            registry
                .register(family("Length", "m", "m"))
                .expect("should register");
            assert!(registry.unregister("Length").is_some());
            assert!(registry.unregister("Length").is_none());
            assert!(registry.bases().is_empty());
        }

        #[test]
        fn clones_share_families() {
            let registry = UnitRegistry::new();
            let clone = registry.clone();
            registry
                .register(family("Length", "m", "m"))
                .expect("should register");
            assert!(clone.base("Length").is_some());
        }

        #[test]
        fn standard_units_are_available() {
            let registry = UnitRegistry::with_standard_units().expect("catalog should register");
            let length = registry.base("Length").expect("length is registered");
            assert_eq!(
                length.standard_unit().map(|unit| unit.id().to_string()),
                Some("m".to_string())
            );
        }
    }

    mod error_tests {
        use super::*;

        #[test]
        fn duplicate_family() {
            let registry = UnitRegistry::new();
            registry
                .register(family("Length", "m", "m"))
                .expect("should register");
            let error = registry
                .register(family("Length", "m", "m"))
                .expect_err("should not register");
            assert_eq!(
                error,
                ConstructionError::DuplicateBase {
                    quantity: "Length".to_string()
                }
            );
        }
    }
}
