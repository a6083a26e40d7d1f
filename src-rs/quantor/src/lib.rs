#![cfg_attr(doc, doc = include_str!("../README.md"))]
//! Unit-safe quantities
//!
//! This crate gathers the quantor crates under one name:
//!
//! - [`dimension`]: SI dimension vectors
//! - [`parser`]: the text forms of dimensions and quantity literals
//! - [`unit`]: scales, units, unit families and the registry
//! - [`value`]: scalars, vectors and matrices that carry a unit

pub use quantor_dimension as dimension;
pub use quantor_parser as parser;
pub use quantor_unit as unit;
#[cfg(feature = "values")]
pub use quantor_value as value;

pub use quantor_dimension::{BaseDimension, SIDimension};
pub use quantor_unit::{AbsoluteUnit, Unit, UnitBase, UnitRegistry, quantity};
#[cfg(feature = "values")]
pub use quantor_value::{
    AbsMatrix, AbsScalar, AbsVector, Absolute, Matrix, RelMatrix, RelScalar, RelVector, Relative,
    Scalar, StorageType, Vector,
};
