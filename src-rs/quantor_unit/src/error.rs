use quantor_dimension::SIDimension;
use quantor_parser::FormatError;

/// A scale, unit or unit family could not be constructed or registered.
///
/// Construction errors are raised immediately and never coerced into a
/// usable value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConstructionError {
    /// A linear or grade factor of zero
    #[error("scale factor must not be zero")]
    ZeroFactor,
    /// A scale parameter that is NaN or infinite
    #[error("scale parameter `{parameter}` must be finite")]
    NonFiniteParameter {
        /// The name of the parameter
        parameter: &'static str,
    },
    /// A required builder field was never set
    #[error("unit `{id}` is missing its {field}")]
    MissingField {
        /// The id of the unit being built
        id: String,
        /// The missing field
        field: &'static str,
    },
    /// A unit id that is already registered in the family
    #[error("unit `{id}` is already registered for {quantity}")]
    DuplicateUnitId {
        /// The name of the unit family
        quantity: String,
        /// The conflicting id
        id: String,
    },
    /// An abbreviation that already names another unit in the family
    #[error("abbreviation `{abbreviation}` of unit `{id}` already names `{existing}`")]
    DuplicateAbbreviation {
        /// The id of the unit being registered
        id: String,
        /// The conflicting abbreviation
        abbreviation: String,
        /// The id of the unit already holding the abbreviation
        existing: String,
    },
    /// A unit family whose dimension signature does not parse
    #[error(transparent)]
    InvalidSignature(#[from] FormatError),
    /// A unit family name that is already registered
    #[error("quantity `{quantity}` is already registered")]
    DuplicateBase {
        /// The conflicting family name
        quantity: String,
    },
    /// An absolute unit built without its relative counterpart
    #[error("absolute unit `{id}` needs a relative unit")]
    MissingRelativeUnit {
        /// The id of the absolute unit
        id: String,
    },
    /// An absolute unit whose relative counterpart has another dimension
    #[error("relative unit of `{id}` has dimension {found}, expected {expected}")]
    RelativeDimensionMismatch {
        /// The id of the absolute unit
        id: String,
        /// The dimension of the absolute unit
        expected: SIDimension,
        /// The dimension of the relative unit
        found: SIDimension,
    },
    /// A unit or reference unit whose dimension differs from its family
    #[error("unit `{id}` has dimension {found}, expected {expected}")]
    DimensionMismatch {
        /// The id of the unit
        id: String,
        /// The dimension of the family
        expected: SIDimension,
        /// The dimension that was supplied
        found: SIDimension,
    },
    /// A unit registered in a family other than the one it was built for
    #[error("unit `{id}` was built for {expected}, not {found}")]
    ForeignUnit {
        /// The id of the unit
        id: String,
        /// The family the unit was built for
        expected: String,
        /// The family it was registered in
        found: String,
    },
    /// A scale that cannot be expressed on top of its reference scale
    #[error("scale of unit `{id}` cannot be composed with its reference scale")]
    IncompatibleScale {
        /// The id of the unit
        id: String,
    },
    /// A derivation that needs the family's standard unit before one exists
    #[error("{quantity} has no standard unit")]
    NoStandardUnit {
        /// The name of the unit family
        quantity: String,
    },
    /// A linear derivation from a unit that is not linear
    #[error("unit `{id}` does not have a linear scale")]
    NotLinear {
        /// The id of the reference unit
        id: String,
    },
    /// A kilo derivation from a unit whose id does not start with `k`
    #[error("unit `{id}` is not a kilo unit")]
    NotKiloUnit {
        /// The id of the reference unit
        id: String,
    },
}
