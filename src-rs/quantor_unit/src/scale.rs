use crate::ConstructionError;

/// Converts between a unit's own representation and the SI representation
/// of its dimension.
///
/// Scales are immutable and validated on construction, so every scale that
/// exists has finite, non-zero factors. `to_standard` and `from_standard`
/// are pure and mutually inverse up to floating point error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale {
    kind: ScaleKind,
}

/// The variant and parameters of a [`Scale`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScaleKind {
    /// The value already is the SI value
    Identity,
    /// `si = value * factor`
    Linear {
        /// The multiplier to SI, never zero
        factor: f64,
    },
    /// `si = (value + offset) * ratio`, used for temperature-like units
    OffsetLinear {
        /// The multiplier to SI, never zero
        ratio: f64,
        /// Added to the value before scaling
        offset: f64,
    },
    /// `si = atan(value * factor)`, used for slopes written as grades
    Grade {
        /// The multiplier applied before the arctangent, never zero
        factor: f64,
    },
}

fn check_factor(parameter: &'static str, factor: f64) -> Result<f64, ConstructionError> {
    if !factor.is_finite() {
        return Err(ConstructionError::NonFiniteParameter { parameter });
    }
    if factor == 0.0 {
        return Err(ConstructionError::ZeroFactor);
    }
    Ok(factor)
}

impl Scale {
    /// The identity scale, used by standard units.
    pub const IDENTITY: Self = Self {
        kind: ScaleKind::Identity,
    };

    /// Creates a linear scale.
    ///
    /// # Errors
    ///
    /// Returns `Err(ConstructionError::ZeroFactor)` if `factor` is zero and
    /// `Err(ConstructionError::NonFiniteParameter)` if it is NaN or infinite.
    pub fn linear(factor: f64) -> Result<Self, ConstructionError> {
        let factor = check_factor("factor", factor)?;
        Ok(Self {
            kind: ScaleKind::Linear { factor },
        })
    }

    /// Creates an offset-linear scale where `si = (value + offset) * ratio`.
    ///
    /// A Celsius scale is `offset_linear(1.0, 273.15)`.
    ///
    /// # Errors
    ///
    /// Returns `Err(ConstructionError::ZeroFactor)` if `ratio` is zero and
    /// `Err(ConstructionError::NonFiniteParameter)` if either parameter is
    /// NaN or infinite.
    pub fn offset_linear(ratio: f64, offset: f64) -> Result<Self, ConstructionError> {
        let ratio = check_factor("ratio", ratio)?;
        if !offset.is_finite() {
            return Err(ConstructionError::NonFiniteParameter { parameter: "offset" });
        }
        Ok(Self {
            kind: ScaleKind::OffsetLinear { ratio, offset },
        })
    }

    /// Creates a grade scale where `si = atan(value * factor)`.
    ///
    /// A percentage slope measured as an angle in radians is `grade(0.01)`.
    ///
    /// # Errors
    ///
    /// Returns `Err(ConstructionError::ZeroFactor)` if `factor` is zero and
    /// `Err(ConstructionError::NonFiniteParameter)` if it is NaN or infinite.
    pub fn grade(factor: f64) -> Result<Self, ConstructionError> {
        let factor = check_factor("factor", factor)?;
        Ok(Self {
            kind: ScaleKind::Grade { factor },
        })
    }

    /// Returns the variant and parameters of the scale.
    #[must_use]
    pub const fn kind(&self) -> ScaleKind {
        self.kind
    }

    /// Converts a value in this scale to the SI value.
    #[must_use]
    pub fn to_standard(&self, value: f64) -> f64 {
        match self.kind {
            ScaleKind::Identity => value,
            ScaleKind::Linear { factor } => value * factor,
            ScaleKind::OffsetLinear { ratio, offset } => (value + offset) * ratio,
            ScaleKind::Grade { factor } => (value * factor).atan(),
        }
    }

    /// Converts an SI value to a value in this scale.
    #[must_use]
    pub fn from_standard(&self, si: f64) -> f64 {
        match self.kind {
            ScaleKind::Identity => si,
            ScaleKind::Linear { factor } => si / factor,
            ScaleKind::OffsetLinear { ratio, offset } => si / ratio - offset,
            ScaleKind::Grade { factor } => si.tan() / factor,
        }
    }

    /// Checks whether the scale is the identity or linear with factor 1.
    ///
    /// The registry only accepts such a unit as the standard unit of a
    /// family.
    #[must_use]
    pub fn is_base_scale(&self) -> bool {
        match self.kind {
            ScaleKind::Identity => true,
            #[expect(
                clippy::float_cmp,
                reason = "only an exact factor of one makes a unit the standard unit"
            )]
            ScaleKind::Linear { factor } => factor == 1.0,
            ScaleKind::OffsetLinear { .. } | ScaleKind::Grade { .. } => false,
        }
    }

    /// Checks whether `to_standard` is a pure multiplication.
    #[must_use]
    pub const fn is_linear(&self) -> bool {
        matches!(self.kind, ScaleKind::Identity | ScaleKind::Linear { .. })
    }

    /// Returns the multiplier to SI for linear scales.
    #[must_use]
    pub const fn conversion_factor(&self) -> Option<f64> {
        match self.kind {
            ScaleKind::Identity => Some(1.0),
            ScaleKind::Linear { factor } => Some(factor),
            ScaleKind::OffsetLinear { .. } | ScaleKind::Grade { .. } => None,
        }
    }

    /// Composes this scale, defined relative to a reference unit, with the
    /// reference unit's own scale.
    ///
    /// The result converts straight to SI: for every value,
    /// `result.to_standard(v) == reference.to_standard(self.to_standard(v))`.
    /// A yard defined as `linear(3.0)` on top of a foot scale of
    /// `linear(0.3048)` becomes `linear(0.9144)`.
    ///
    /// Returns `None` when the composition is not one of the closed scale
    /// variants, which happens for any grade scale on top of a non-identity
    /// reference and for anything non-linear on top of a grade scale.
    #[must_use]
    pub fn relative_to(&self, reference: &Self) -> Option<Self> {
        let kind = match (self.kind, reference.kind) {
            (own, ScaleKind::Identity) => own,
            (ScaleKind::Identity, reference) => reference,

            (ScaleKind::Linear { factor: own }, ScaleKind::Linear { factor }) => {
                ScaleKind::Linear {
                    factor: own * factor,
                }
            }
            (ScaleKind::Linear { factor }, ScaleKind::OffsetLinear { ratio, offset }) => {
                ScaleKind::OffsetLinear {
                    ratio: factor * ratio,
                    offset: offset / factor,
                }
            }
            (ScaleKind::Linear { factor: own }, ScaleKind::Grade { factor }) => ScaleKind::Grade {
                factor: own * factor,
            },

            (ScaleKind::OffsetLinear { ratio, offset }, ScaleKind::Linear { factor }) => {
                ScaleKind::OffsetLinear {
                    ratio: ratio * factor,
                    offset,
                }
            }
            (
                ScaleKind::OffsetLinear { ratio, offset },
                ScaleKind::OffsetLinear {
                    ratio: reference_ratio,
                    offset: reference_offset,
                },
            ) => ScaleKind::OffsetLinear {
                ratio: ratio * reference_ratio,
                offset: offset + reference_offset / ratio,
            },

            (ScaleKind::OffsetLinear { .. } | ScaleKind::Grade { .. }, ScaleKind::Grade { .. })
            | (ScaleKind::Grade { .. }, ScaleKind::Linear { .. } | ScaleKind::OffsetLinear { .. }) => {
                return None;
            }
        };

        // products of finite non-zero factors can still underflow or overflow
        let valid = match kind {
            ScaleKind::Identity => true,
            ScaleKind::Linear { factor } | ScaleKind::Grade { factor } => {
                factor.is_finite() && factor != 0.0
            }
            ScaleKind::OffsetLinear { ratio, offset } => {
                ratio.is_finite() && ratio != 0.0 && offset.is_finite()
            }
        };

        valid.then_some(Self { kind })
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self::IDENTITY
    }
}
