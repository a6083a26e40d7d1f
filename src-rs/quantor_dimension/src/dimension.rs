use std::{fmt, ops};

use crate::BaseDimension;

/// The operation applied when two dimensions are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub enum CombineOp {
    /// Exponents are added
    Multiply,
    /// Exponents of the right operand are subtracted
    Divide,
}

/// The physical dimension of a quantity, as a vector of exponents over the
/// [`BaseDimension`] axes.
///
/// For example, a speed is `[0, 1, -1, 0, 0, 0, 0, 0]`, which renders as
/// `m/s`. Two quantities are commensurable exactly when their dimensions
/// are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct SIDimension([i8; BaseDimension::COUNT]);

impl SIDimension {
    /// Creates a dimension from exponents given in canonical axis order.
    #[must_use]
    pub const fn new(exponents: [i8; BaseDimension::COUNT]) -> Self {
        Self(exponents)
    }

    /// Creates the dimension of a pure number.
    #[must_use]
    pub const fn dimensionless() -> Self {
        Self([0; BaseDimension::COUNT])
    }

    /// Creates the dimension of a single base axis with exponent 1.
    #[must_use]
    pub const fn of(axis: BaseDimension) -> Self {
        let mut exponents = [0; BaseDimension::COUNT];
        exponents[axis.index()] = 1;
        Self(exponents)
    }

    /// Returns the exponents in canonical axis order.
    #[must_use]
    pub const fn exponents(&self) -> [i8; BaseDimension::COUNT] {
        self.0
    }

    /// Returns the exponent of one axis.
    #[must_use]
    pub const fn get(&self, axis: BaseDimension) -> i8 {
        self.0[axis.index()]
    }

    /// Returns a copy with the exponent of `axis` replaced.
    #[must_use]
    pub const fn with(mut self, axis: BaseDimension, exponent: i8) -> Self {
        self.0[axis.index()] = exponent;
        self
    }

    /// Checks whether every exponent is zero.
    #[must_use]
    pub fn is_dimensionless(&self) -> bool {
        self.0.iter().all(|exponent| *exponent == 0)
    }

    /// Combines two dimensions.
    ///
    /// Multiplying adds the exponents and dividing subtracts them. Exponents
    /// that leave the `i8` range saturate; use
    /// [`checked_combine`](Self::checked_combine) to detect that.
    #[must_use]
    pub fn combine(lhs: Self, rhs: Self, op: CombineOp) -> Self {
        let mut exponents = lhs.0;
        for (exponent, other) in exponents.iter_mut().zip(rhs.0) {
            *exponent = match op {
                CombineOp::Multiply => exponent.saturating_add(other),
                CombineOp::Divide => exponent.saturating_sub(other),
            };
        }
        Self(exponents)
    }

    /// Combines two dimensions, returning `None` if an exponent overflows.
    #[must_use]
    pub fn checked_combine(lhs: Self, rhs: Self, op: CombineOp) -> Option<Self> {
        let mut exponents = lhs.0;
        for (exponent, other) in exponents.iter_mut().zip(rhs.0) {
            *exponent = match op {
                CombineOp::Multiply => exponent.checked_add(other)?,
                CombineOp::Divide => exponent.checked_sub(other)?,
            };
        }
        Some(Self(exponents))
    }

    /// Returns the dimension of the reciprocal quantity.
    #[must_use]
    pub fn invert(self) -> Self {
        Self::combine(Self::dimensionless(), self, CombineOp::Divide)
    }

    /// Raises the dimension to an integer power, returning `None` on overflow.
    #[must_use]
    pub fn checked_pow(self, power: i8) -> Option<Self> {
        let mut exponents = self.0;
        for exponent in &mut exponents {
            *exponent = exponent.checked_mul(power)?;
        }
        Some(Self(exponents))
    }

    /// Renders the dimension as its canonical signature.
    ///
    /// Positive exponents come first in axis order, then a single `/`
    /// followed by the negative exponents as magnitudes. An exponent of 1 has
    /// no suffix. A dimensionless value renders as `1`, and a dimension with
    /// only negative exponents starts with `1/`.
    ///
    /// Two dimensions render identically exactly when they are equal, which
    /// makes the result usable as a lookup key.
    #[must_use]
    pub fn to_canonical_string(&self) -> String {
        self.format(true, "")
    }

    /// Renders the dimension with a choice of layout.
    ///
    /// When `divided` is true, negative exponents are written after a `/` as
    /// magnitudes (`kgm/s2`). Otherwise they are written inline with a minus
    /// sign (`kgms-2`). `separator` is placed between adjacent axis terms, so
    /// `"."` gives `kg.m/s2` or `kg.m.s-2`.
    #[must_use]
    pub fn format(&self, divided: bool, separator: &str) -> String {
        if self.is_dimensionless() {
            return "1".to_string();
        }

        let term = |axis: BaseDimension, exponent: i8| {
            if exponent == 1 {
                axis.symbol().to_string()
            } else {
                format!("{}{}", axis.symbol(), exponent)
            }
        };

        if !divided {
            return BaseDimension::ALL
                .into_iter()
                .filter(|axis| self.get(*axis) != 0)
                .map(|axis| term(axis, self.get(axis)))
                .collect::<Vec<_>>()
                .join(separator);
        }

        let numerator = BaseDimension::ALL
            .into_iter()
            .filter(|axis| self.get(*axis) > 0)
            .map(|axis| term(axis, self.get(axis)))
            .collect::<Vec<_>>()
            .join(separator);

        // `unsigned_abs` keeps i8::MIN renderable
        let denominator = BaseDimension::ALL
            .into_iter()
            .filter(|axis| self.get(*axis) < 0)
            .map(|axis| {
                let magnitude = self.get(axis).unsigned_abs();
                if magnitude == 1 {
                    axis.symbol().to_string()
                } else {
                    format!("{}{}", axis.symbol(), magnitude)
                }
            })
            .collect::<Vec<_>>()
            .join(separator);

        match (numerator.is_empty(), denominator.is_empty()) {
            (false, true) => numerator,
            (true, false) => format!("1/{denominator}"),
            (false, false) => format!("{numerator}/{denominator}"),
            (true, true) => unreachable!("a dimension with no exponents is dimensionless"),
        }
    }
}

impl From<BaseDimension> for SIDimension {
    fn from(axis: BaseDimension) -> Self {
        Self::of(axis)
    }
}

impl ops::Mul for SIDimension {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self::combine(self, rhs, CombineOp::Multiply)
    }
}

impl ops::Div for SIDimension {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        Self::combine(self, rhs, CombineOp::Divide)
    }
}

impl fmt::Display for SIDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_canonical_string())
    }
}
