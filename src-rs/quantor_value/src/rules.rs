//! Unit rules shared by scalars, vectors and matrices

use quantor_dimension::{CombineOp, SIDimension};
use quantor_unit::{Unit, UnitBase, UnitRegistry};
use tracing::trace;

use crate::{Shape, ValueError};

pub fn check_dimension(expected: SIDimension, found: SIDimension) -> Result<(), ValueError> {
    if expected == found {
        Ok(())
    } else {
        Err(ValueError::DimensionMismatch { expected, found })
    }
}

pub fn check_shape(expected: Shape, found: Shape) -> Result<(), ValueError> {
    if expected == found {
        Ok(())
    } else {
        Err(ValueError::ShapeMismatch { expected, found })
    }
}

/// The unit of a sum or difference: the shared unit if both operands use
/// it, the standard unit otherwise.
pub fn sum_unit(lhs: &Unit, rhs: &Unit) -> Unit {
    if lhs == rhs {
        lhs.clone()
    } else {
        lhs.standard_unit()
    }
}

/// The unit of a product or quotient, resolved through the registry.
pub fn product_unit(
    lhs: SIDimension,
    rhs: SIDimension,
    op: CombineOp,
    registry: &UnitRegistry,
) -> Result<Unit, ValueError> {
    let dimension =
        SIDimension::checked_combine(lhs, rhs, op).ok_or(ValueError::DimensionOverflow)?;
    let unit = registry.resolve_unit(dimension);
    trace!(dimension = %dimension, unit = unit.id(), "resolved unit of product");
    Ok(unit)
}

/// The unit of a product or quotient expressed in a chosen family.
pub fn product_unit_in(
    lhs: SIDimension,
    rhs: SIDimension,
    op: CombineOp,
    base: &UnitBase,
) -> Result<Unit, ValueError> {
    let dimension =
        SIDimension::checked_combine(lhs, rhs, op).ok_or(ValueError::DimensionOverflow)?;
    check_dimension(base.dimension(), dimension)?;
    base.standard_unit().ok_or_else(|| ValueError::NoStandardUnit {
        quantity: base.name().to_string(),
    })
}
