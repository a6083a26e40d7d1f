use std::fmt;

use quantor_dimension::SIDimension;

/// The shape of a vector or matrix operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// A vector with the given length
    Vector(usize),
    /// A matrix with the given row and column counts
    Matrix(usize, usize),
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vector(len) => write!(f, "vector of length {len}"),
            Self::Matrix(rows, cols) => write!(f, "{rows}x{cols} matrix"),
        }
    }
}

/// An operation on values failed.
///
/// Failed operations leave their operands untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueError {
    /// Elementwise operands of different shapes
    #[error("shape mismatch: expected {expected}, found {found}")]
    ShapeMismatch {
        /// The shape of the left operand
        expected: Shape,
        /// The shape of the right operand
        found: Shape,
    },
    /// Operands or units of different dimensions
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// The dimension required by the operation
        expected: SIDimension,
        /// The dimension that was supplied
        found: SIDimension,
    },
    /// A product or quotient whose exponents do not fit
    #[error("dimension exponent out of range")]
    DimensionOverflow,
    /// A vector index past the end
    #[error("index {index} out of bounds for length {len}")]
    IndexOutOfBounds {
        /// The requested index
        index: usize,
        /// The length of the vector
        len: usize,
    },
    /// A matrix cell outside the matrix
    #[error("cell ({row}, {col}) out of bounds for {rows}x{cols} matrix")]
    CellOutOfBounds {
        /// The requested row
        row: usize,
        /// The requested column
        col: usize,
        /// The number of rows
        rows: usize,
        /// The number of columns
        cols: usize,
    },
    /// A matrix whose cell count does not fit in `usize`
    #[error("a {rows}x{cols} matrix has too many cells")]
    TooManyCells {
        /// The number of rows
        rows: usize,
        /// The number of columns
        cols: usize,
    },
    /// Values whose sum is zero cannot be normalized
    #[error("cannot normalize values that sum to zero")]
    ZeroSum,
    /// An operation that needs at least one value was given none
    #[error("no values given")]
    EmptyInput,
    /// An interpolation ratio that is NaN or infinite
    #[error("interpolation ratio must be finite")]
    NonFiniteRatio,
    /// A target unit family without a standard unit
    #[error("{quantity} has no standard unit")]
    NoStandardUnit {
        /// The name of the unit family
        quantity: String,
    },
}
