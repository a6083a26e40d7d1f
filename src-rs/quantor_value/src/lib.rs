#![cfg_attr(doc, doc = include_str!("../README.md"))]
//! Unit-safe scalars, vectors and matrices

mod element;
mod error;
mod format;
mod kind;
mod matrix;
mod rules;
mod scalar;
mod storage;
mod vector;

pub use element::Element;
pub use error::{Shape, ValueError};
pub use format::FormatConfig;
pub use kind::{Absolute, Relative, ValueKind};
pub use matrix::Matrix;
pub use scalar::Scalar;
pub use storage::StorageType;
pub use vector::Vector;

/// A relative scalar, such as a length or a duration.
pub type RelScalar<N = f64> = Scalar<Relative, N>;
/// An absolute scalar, such as a temperature reading.
pub type AbsScalar<N = f64> = Scalar<Absolute, N>;
/// A relative vector.
pub type RelVector<N = f64> = Vector<Relative, N>;
/// An absolute vector.
pub type AbsVector<N = f64> = Vector<Absolute, N>;
/// A relative matrix.
pub type RelMatrix<N = f64> = Matrix<Relative, N>;
/// An absolute matrix.
pub type AbsMatrix<N = f64> = Matrix<Absolute, N>;
