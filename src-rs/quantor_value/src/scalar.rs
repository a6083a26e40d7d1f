use std::{cmp::Ordering, fmt, marker::PhantomData, ops};

use quantor_dimension::{CombineOp, SIDimension};
use quantor_parser::{Config, ParseError, parse_quantity};
use quantor_unit::{Unit, UnitBase, UnitRegistry, is_close};

use crate::{
    Absolute, Element, FormatConfig, Relative, ValueError, ValueKind, format,
    rules::{check_dimension, product_unit, product_unit_in, sum_unit},
};

/// A single value with a unit.
///
/// The value is stored in SI units; the display unit only decides how the
/// value is shown. Whether the value is [`Absolute`] or [`Relative`] is part
/// of the type, so only the operations that make sense for the kind exist:
/// two relative values can be added, an absolute and a relative value can
/// be added, but two absolute values can only be subtracted.
///
/// ```
/// use quantor_unit::{UnitRegistry, quantity};
/// use quantor_value::{RelScalar, Scalar};
///
/// let registry = UnitRegistry::with_standard_units().expect("built-in units register");
/// let length = registry.base(quantity::LENGTH).expect("length is built in");
///
/// let value: RelScalar = Scalar::parse("80 mm", &length, None).expect("valid literal");
/// assert!((value.si() - 0.08).abs() < 1e-12);
/// assert_eq!(value.to_string(), "80.000 mm");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Scalar<K: ValueKind, N: Element = f64> {
    si: N,
    unit: K::Unit,
    kind: PhantomData<K>,
}

impl<K: ValueKind, N: Element> Scalar<K, N> {
    /// Creates a value given in `unit`.
    #[must_use]
    pub fn new(value: N, unit: K::Unit) -> Self {
        let unit = K::normalize(unit);
        let si = N::narrow(unit.as_ref().to_standard(value.widen()));
        Self::from_si(si, unit)
    }

    /// Creates a value from its SI value, displayed in `unit`.
    #[must_use]
    pub fn from_si(si: N, unit: K::Unit) -> Self {
        Self {
            si,
            unit: K::normalize(unit),
            kind: PhantomData,
        }
    }

    /// Parses a literal such as `"80 mm"`, resolving the unit in `base`.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] holding `text` if the number is malformed,
    /// the unit is missing or unknown, or an absolute value is written with
    /// a unit that is not absolute.
    pub fn parse(text: &str, base: &UnitBase, config: Option<Config>) -> Result<Self, ParseError> {
        let config = config.unwrap_or_default();
        let literal = parse_quantity(text, Some(config))?;

        let unit = if literal.abbreviation.is_empty() {
            base.standard_unit()
        } else if config.lenient_unit_lookup {
            base.lookup_lenient(&literal.abbreviation)
        } else {
            base.lookup_by_abbreviation(&literal.abbreviation)
        };
        let unit = unit.ok_or_else(|| ParseError::unknown_unit(text, &literal.abbreviation))?;
        let unit = K::from_unit(unit)
            .ok_or_else(|| ParseError::not_absolute_unit(text, &literal.abbreviation))?;

        Ok(Self::new(N::narrow(literal.value), unit))
    }

    /// Creates a value in the unit of `base` with the given abbreviation.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if the abbreviation is unknown or, for
    /// absolute values, does not name an absolute unit.
    pub fn of(value: N, abbreviation: &str, base: &UnitBase) -> Result<Self, ParseError> {
        let unit = base
            .lookup_by_abbreviation(abbreviation)
            .ok_or_else(|| ParseError::unknown_unit(abbreviation, abbreviation))?;
        let unit = K::from_unit(unit)
            .ok_or_else(|| ParseError::not_absolute_unit(abbreviation, abbreviation))?;
        Ok(Self::new(value, unit))
    }

    /// Returns the SI value.
    #[must_use]
    pub const fn si(&self) -> N {
        self.si
    }

    /// Returns the value in the display unit.
    #[must_use]
    pub fn value(&self) -> N {
        N::narrow(self.unit.as_ref().from_standard(self.si.widen()))
    }

    /// Returns the value expressed in another unit of the same dimension.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::DimensionMismatch`] if `unit` has another
    /// dimension.
    pub fn in_unit(&self, unit: &Unit) -> Result<N, ValueError> {
        check_dimension(self.dimension(), unit.dimension())?;
        Ok(N::narrow(unit.from_standard(self.si.widen())))
    }

    /// Returns the display unit.
    #[must_use]
    pub const fn display_unit(&self) -> &K::Unit {
        &self.unit
    }

    /// Returns the dimension of the value.
    #[must_use]
    pub fn dimension(&self) -> SIDimension {
        self.unit.as_ref().dimension()
    }

    /// Returns the same value displayed in another unit.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::DimensionMismatch`] if `unit` has another
    /// dimension.
    pub fn with_display_unit(&self, unit: K::Unit) -> Result<Self, ValueError> {
        check_dimension(self.dimension(), unit.as_ref().dimension())?;
        Ok(Self::from_si(self.si, unit))
    }

    /// Returns the same value displayed in the standard unit of its family.
    #[must_use]
    pub fn to_standard_unit(&self) -> Self {
        K::from_unit(self.unit.as_ref().standard_unit())
            .map_or_else(|| self.clone(), |unit| Self::from_si(self.si, unit))
    }

    /// Compares the SI values of two values of the same dimension.
    ///
    /// Returns `Ok(None)` if either value is NaN.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::DimensionMismatch`] if the dimensions differ.
    pub fn checked_partial_cmp(&self, other: &Self) -> Result<Option<Ordering>, ValueError> {
        check_dimension(self.dimension(), other.dimension())?;
        Ok(self.si.partial_cmp(&other.si))
    }

    /// Checks whether the value is less than `other`.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::DimensionMismatch`] if the dimensions differ.
    pub fn checked_lt(&self, other: &Self) -> Result<bool, ValueError> {
        Ok(self.checked_partial_cmp(other)? == Some(Ordering::Less))
    }

    /// Checks whether the value is less than or equal to `other`.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::DimensionMismatch`] if the dimensions differ.
    pub fn checked_le(&self, other: &Self) -> Result<bool, ValueError> {
        Ok(matches!(
            self.checked_partial_cmp(other)?,
            Some(Ordering::Less | Ordering::Equal)
        ))
    }

    /// Checks whether the value is greater than `other`.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::DimensionMismatch`] if the dimensions differ.
    pub fn checked_gt(&self, other: &Self) -> Result<bool, ValueError> {
        Ok(self.checked_partial_cmp(other)? == Some(Ordering::Greater))
    }

    /// Checks whether the value is greater than or equal to `other`.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::DimensionMismatch`] if the dimensions differ.
    pub fn checked_ge(&self, other: &Self) -> Result<bool, ValueError> {
        Ok(matches!(
            self.checked_partial_cmp(other)?,
            Some(Ordering::Greater | Ordering::Equal)
        ))
    }

    /// Checks whether the SI values are equal, whatever the display units.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::DimensionMismatch`] if the dimensions differ.
    pub fn checked_eq(&self, other: &Self) -> Result<bool, ValueError> {
        Ok(self.checked_partial_cmp(other)? == Some(Ordering::Equal))
    }

    /// Checks whether the SI values are equal within a tolerance of `1e-10`.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::DimensionMismatch`] if the dimensions differ.
    pub fn is_close_to(&self, other: &Self) -> Result<bool, ValueError> {
        check_dimension(self.dimension(), other.dimension())?;
        Ok(is_close(self.si.widen(), other.si.widen()))
    }

    /// Checks whether the SI value is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.si.is_zero()
    }

    /// Checks whether the SI value is greater than zero.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.si > N::zero()
    }

    /// Checks whether the SI value is less than zero.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.si < N::zero()
    }

    /// Returns the smallest of `values`.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::EmptyInput`] if `values` is empty and
    /// [`ValueError::DimensionMismatch`] if the dimensions differ.
    pub fn min(values: &[Self]) -> Result<Self, ValueError> {
        Self::select(values, Ordering::Less)
    }

    /// Returns the largest of `values`.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::EmptyInput`] if `values` is empty and
    /// [`ValueError::DimensionMismatch`] if the dimensions differ.
    pub fn max(values: &[Self]) -> Result<Self, ValueError> {
        Self::select(values, Ordering::Greater)
    }

    fn select(values: &[Self], wanted: Ordering) -> Result<Self, ValueError> {
        let (first, rest) = values.split_first().ok_or(ValueError::EmptyInput)?;
        let mut selected = first;
        for value in rest {
            if value.checked_partial_cmp(selected)? == Some(wanted) {
                selected = value;
            }
        }
        Ok(selected.clone())
    }

    /// Interpolates linearly between `zero` (ratio 0) and `one` (ratio 1).
    ///
    /// The result is displayed in the unit of `zero`. Ratios outside
    /// `[0, 1]` extrapolate.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::NonFiniteRatio`] if `ratio` is NaN or infinite
    /// and [`ValueError::DimensionMismatch`] if the dimensions differ.
    pub fn interpolate(zero: &Self, one: &Self, ratio: f64) -> Result<Self, ValueError> {
        if !ratio.is_finite() {
            return Err(ValueError::NonFiniteRatio);
        }
        check_dimension(zero.dimension(), one.dimension())?;
        let zero_si = zero.si.widen();
        let si = (one.si.widen() - zero_si).mul_add(ratio, zero_si);
        Ok(Self::from_si(N::narrow(si), zero.unit.clone()))
    }

    /// Renders the value in its display unit.
    #[must_use]
    pub fn format(&self, config: &FormatConfig) -> String {
        let body = format::format_number(self.value().widen(), config.precision);
        format::decorate(&body, K::LABEL, self.unit.as_ref(), config)
    }
}

impl<N: Element> Scalar<Relative, N> {
    /// Adds two values of the same dimension.
    ///
    /// The sum keeps the display unit if both values share it, and is
    /// displayed in the standard unit otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::DimensionMismatch`] if the dimensions differ.
    pub fn checked_add(&self, rhs: &Self) -> Result<Self, ValueError> {
        check_dimension(self.dimension(), rhs.dimension())?;
        Ok(Self::from_si(self.si + rhs.si, sum_unit(&self.unit, &rhs.unit)))
    }

    /// Subtracts a value of the same dimension.
    ///
    /// The unit follows the same rule as [`checked_add`](Self::checked_add).
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::DimensionMismatch`] if the dimensions differ.
    pub fn checked_sub(&self, rhs: &Self) -> Result<Self, ValueError> {
        check_dimension(self.dimension(), rhs.dimension())?;
        Ok(Self::from_si(self.si - rhs.si, sum_unit(&self.unit, &rhs.unit)))
    }

    /// Multiplies by a plain number, keeping the unit.
    #[must_use]
    pub fn scale(&self, factor: N) -> Self {
        Self::from_si(self.si * factor, self.unit.clone())
    }

    /// Returns the absolute value.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self::from_si(self.si.abs(), self.unit.clone())
    }

    /// Multiplies two values, combining their dimensions.
    ///
    /// The product is displayed in the standard unit of the first family in
    /// `registry` with the product's dimension, or in an anonymous unit when
    /// there is none.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::DimensionOverflow`] if an exponent of the
    /// product is out of range.
    pub fn checked_mul(&self, rhs: &Self, registry: &UnitRegistry) -> Result<Self, ValueError> {
        let unit = product_unit(
            self.dimension(),
            rhs.dimension(),
            CombineOp::Multiply,
            registry,
        )?;
        Ok(Self::from_si(self.si * rhs.si, unit))
    }

    /// Divides two values, combining their dimensions.
    ///
    /// The unit is resolved as in [`checked_mul`](Self::checked_mul).
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::DimensionOverflow`] if an exponent of the
    /// quotient is out of range.
    pub fn checked_div(&self, rhs: &Self, registry: &UnitRegistry) -> Result<Self, ValueError> {
        let unit = product_unit(
            self.dimension(),
            rhs.dimension(),
            CombineOp::Divide,
            registry,
        )?;
        Ok(Self::from_si(self.si / rhs.si, unit))
    }

    /// Multiplies two values and displays the product in the standard unit
    /// of `base`, for example torque rather than energy.
    ///
    /// # Errors
    ///
    /// Returns a [`ValueError`] if the product does not have the dimension
    /// of `base` or `base` has no standard unit.
    pub fn checked_mul_into(&self, rhs: &Self, base: &UnitBase) -> Result<Self, ValueError> {
        let unit = product_unit_in(self.dimension(), rhs.dimension(), CombineOp::Multiply, base)?;
        Ok(Self::from_si(self.si * rhs.si, unit))
    }

    /// Divides two values and displays the quotient in the standard unit of
    /// `base`.
    ///
    /// # Errors
    ///
    /// Returns a [`ValueError`] if the quotient does not have the dimension
    /// of `base` or `base` has no standard unit.
    pub fn checked_div_into(&self, rhs: &Self, base: &UnitBase) -> Result<Self, ValueError> {
        let unit = product_unit_in(self.dimension(), rhs.dimension(), CombineOp::Divide, base)?;
        Ok(Self::from_si(self.si / rhs.si, unit))
    }
}

impl<N: Element> Scalar<Absolute, N> {
    /// Moves the value by a relative amount, keeping the display unit.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::DimensionMismatch`] if the dimensions differ.
    pub fn checked_add(&self, rhs: &Scalar<Relative, N>) -> Result<Self, ValueError> {
        check_dimension(self.dimension(), rhs.dimension())?;
        Ok(Self::from_si(self.si + rhs.si, self.unit.clone()))
    }

    /// Moves the value back by a relative amount, keeping the display unit.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::DimensionMismatch`] if the dimensions differ.
    pub fn checked_sub(&self, rhs: &Scalar<Relative, N>) -> Result<Self, ValueError> {
        check_dimension(self.dimension(), rhs.dimension())?;
        Ok(Self::from_si(self.si - rhs.si, self.unit.clone()))
    }

    /// Returns the difference between two absolute values.
    ///
    /// The difference is relative and displayed in the relative unit of this
    /// value's unit: the difference of two Celsius temperatures is in
    /// Celsius degrees.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::DimensionMismatch`] if the dimensions differ.
    pub fn checked_sub_abs(&self, rhs: &Self) -> Result<Scalar<Relative, N>, ValueError> {
        check_dimension(self.dimension(), rhs.dimension())?;
        Ok(Scalar::from_si(
            self.si - rhs.si,
            self.unit.relative_unit().clone(),
        ))
    }
}

impl<N: Element> ops::Mul<N> for Scalar<Relative, N> {
    type Output = Self;

    fn mul(self, rhs: N) -> Self::Output {
        self.scale(rhs)
    }
}

impl<N: Element> ops::Div<N> for Scalar<Relative, N> {
    type Output = Self;

    fn div(self, rhs: N) -> Self::Output {
        Self::from_si(self.si / rhs, self.unit)
    }
}

impl<N: Element> ops::Neg for Scalar<Relative, N> {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::from_si(-self.si, self.unit)
    }
}

impl<K: ValueKind, N: Element> fmt::Display for Scalar<K, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(&FormatConfig::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use quantor_parser::ParseErrorKind;
    use quantor_unit::{AbsoluteUnit, quantity};
    use std::sync::LazyLock;

    static REGISTRY: LazyLock<UnitRegistry> = LazyLock::new(|| {
        UnitRegistry::with_standard_units().expect("built-in units should register")
    });

    fn base(name: &str) -> UnitBase {
        REGISTRY.base(name).expect("family should be built in")
    }

    fn unit(family: &str, abbreviation: &str) -> Unit {
        base(family)
            .lookup_by_abbreviation(abbreviation)
            .expect("unit should be built in")
    }

    fn absolute(family: &str, abbreviation: &str) -> AbsoluteUnit {
        AbsoluteUnit::try_from(unit(family, abbreviation)).expect("unit should be absolute")
    }

    fn rel(value: f64, family: &str, abbreviation: &str) -> Scalar<Relative> {
        Scalar::new(value, unit(family, abbreviation))
    }

    fn abs(value: f64, family: &str, abbreviation: &str) -> Scalar<Absolute> {
        Scalar::new(value, absolute(family, abbreviation))
    }

    mod success_tests {
        use super::*;

        #[test]
        fn parse_and_format_millimeters() {
            let value: Scalar<Relative> =
                Scalar::parse("80 mm", &base(quantity::LENGTH), None).expect("should parse");
            assert!(is_close(value.si(), 0.08));
            assert_eq!(value.display_unit().id(), "mm");
            assert_eq!(value.to_string(), "80.000 mm");
        }

        #[test]
        fn parse_literal_forms() {
            let length = base(quantity::LENGTH);
            let yards: Scalar<Relative> =
                Scalar::parse("-8E-3yd", &length, None).expect("should parse");
            assert!(is_close(yards.si(), -0.007_315_2));

            let trailing_dot: Scalar<Relative> =
                Scalar::parse("8.mm", &length, None).expect("should parse");
            assert!(is_close(trailing_dot.si(), 0.008));

            let zero: Scalar<Relative> = Scalar::parse("0m", &length, None).expect("should parse");
            assert!(zero.is_zero());
        }

        #[test]
        fn parse_lenient_and_missing_unit() {
            let area = base(quantity::AREA);
            let lenient = Config::new().with_lenient_unit_lookup(true);
            let value: Scalar<Relative> =
                Scalar::parse("3 m.m", &area, Some(lenient)).expect("should parse");
            assert_eq!(value.display_unit().id(), "m2");

            let bare = Config::new().with_allow_missing_unit(true);
            let value: Scalar<Relative> =
                Scalar::parse("12", &area, Some(bare)).expect("should parse");
            assert!(is_close(value.si(), 12.0));
        }

        #[test]
        fn kilometer_scale() {
            let value = rel(1.0, quantity::LENGTH, "km");
            assert!(is_close(value.si(), 1000.0));
            assert!(is_close(value.value(), 1.0));
            let meters = unit(quantity::LENGTH, "m");
            assert!(is_close(value.in_unit(&meters).expect("same dimension"), 1000.0));
        }

        #[test]
        fn celsius_offset() {
            let freezing = abs(0.0, quantity::ABSOLUTE_TEMPERATURE, "degC");
            let boiling = abs(100.0, quantity::ABSOLUTE_TEMPERATURE, "degC");
            assert!(is_close(freezing.si(), 273.15));
            assert!(is_close(boiling.si(), 373.15));
        }

        #[test]
        fn speed_from_length_times_frequency() {
            let length = rel(10.0, quantity::LENGTH, "m");
            let frequency = Scalar::new(2.0, unit(quantity::FREQUENCY, "Hz"));
            let speed = length
                .checked_mul(&frequency, &REGISTRY)
                .expect("should multiply");
            assert_eq!(speed.dimension().to_canonical_string(), "m/s");
            assert!(is_close(speed.si(), 20.0));
            assert_eq!(speed.display_unit().quantity(), quantity::SPEED);
        }

        #[test]
        fn unregistered_product_is_anonymous() {
            let power = rel(3.0, quantity::POWER, "W");
            let time = rel(2.0, quantity::DURATION, "s");
            let per_time = power.checked_div(&time, &REGISTRY).expect("should divide");
            assert_eq!(per_time.display_unit().id(), "kgm2/s4");
            assert!(is_close(per_time.si(), 1.5));
        }

        #[test]
        fn energy_or_torque() {
            let force = rel(2.0, quantity::FORCE, "N");
            let arm = rel(3.0, quantity::LENGTH, "m");
            let energy = force.checked_mul(&arm, &REGISTRY).expect("should multiply");
            assert_eq!(energy.display_unit().id(), "J");
            let torque = force
                .checked_mul_into(&arm, &base(quantity::TORQUE))
                .expect("should multiply");
            assert_eq!(torque.display_unit().id(), "N.m");
            assert!(is_close(torque.si(), 6.0));
        }

        #[test]
        fn sum_keeps_shared_unit() {
            let a = rel(1.0, quantity::LENGTH, "km");
            let b = rel(2.0, quantity::LENGTH, "km");
            let sum = a.checked_add(&b).expect("should add");
            assert_eq!(sum.display_unit().id(), "km");
            assert!(is_close(sum.value(), 3.0));
        }

        #[test]
        fn sum_of_different_units_is_standard() {
            let a = rel(1.0, quantity::LENGTH, "km");
            let b = rel(1.0, quantity::LENGTH, "ft");
            let sum = a.checked_add(&b).expect("should add");
            assert_eq!(sum.display_unit().id(), "m");
            assert!(is_close(sum.si(), 1000.3048));
        }

        #[test]
        fn scaling_by_zero_keeps_unit() {
            let value = rel(5.0, quantity::LENGTH, "mm") * 0.0;
            assert!(value.is_zero());
            assert_eq!(value.display_unit().id(), "mm");
        }

        #[test]
        fn negation_and_abs() {
            let value = -rel(5.0, quantity::LENGTH, "m");
            assert!(value.is_negative());
            assert!(value.abs().is_positive());
            assert!(is_close((value / 2.0).si(), -2.5));
        }

        #[test]
        fn absolute_plus_relative_keeps_unit() {
            let reading = abs(20.0, quantity::ABSOLUTE_TEMPERATURE, "degC");
            let delta = rel(5.0, quantity::TEMPERATURE, "K");
            let warmer = reading.checked_add(&delta).expect("should add");
            assert_eq!(warmer.display_unit().id(), "degC");
            assert!(is_close(warmer.value(), 25.0));
            let cooler = reading.checked_sub(&delta).expect("should subtract");
            assert!(is_close(cooler.value(), 15.0));
        }

        #[test]
        fn absolute_difference_is_relative() {
            let hot = abs(212.0, quantity::ABSOLUTE_TEMPERATURE, "degF");
            let cold = abs(32.0, quantity::ABSOLUTE_TEMPERATURE, "degF");
            let difference = hot.checked_sub_abs(&cold).expect("should subtract");
            assert_eq!(difference.display_unit().id(), "degF");
            assert!(is_close(difference.value(), 180.0));
            assert!(is_close(difference.si(), 100.0));
        }

        #[test]
        fn relative_value_in_absolute_unit_has_no_offset() {
            let celsius = unit(quantity::ABSOLUTE_TEMPERATURE, "degC");
            let delta: Scalar<Relative> = Scalar::new(10.0, celsius);
            assert!(is_close(delta.si(), 10.0));
            assert!(!delta.display_unit().is_absolute());
        }

        #[test]
        fn display_unit_does_not_change_si() {
            let value = rel(1.5, quantity::LENGTH, "km");
            let in_feet = value
                .with_display_unit(unit(quantity::LENGTH, "ft"))
                .expect("same dimension");
            assert!(is_close(in_feet.si(), value.si()));
            assert_eq!(value.to_standard_unit().display_unit().id(), "m");
        }

        #[test]
        fn comparisons_use_si_values() {
            let inch = rel(1.0, quantity::LENGTH, "in");
            let centimeter = rel(1.0, quantity::LENGTH, "cm");
            assert!(inch.checked_gt(&centimeter).expect("same dimension"));
            assert!(centimeter.checked_lt(&inch).expect("same dimension"));
            assert!(inch.checked_ge(&inch).expect("same dimension"));
            let same = rel(2.54, quantity::LENGTH, "cm");
            assert!(inch.is_close_to(&same).expect("same dimension"));
        }

        #[test]
        fn min_max_and_interpolation() {
            let values = [
                rel(3.0, quantity::LENGTH, "m"),
                rel(1.0, quantity::LENGTH, "km"),
                rel(1.0, quantity::LENGTH, "mm"),
            ];
            assert_eq!(
                Scalar::min(&values).expect("not empty").display_unit().id(),
                "mm"
            );
            assert_eq!(
                Scalar::max(&values).expect("not empty").display_unit().id(),
                "km"
            );

            let middle =
                Scalar::interpolate(&values[0], &values[1], 0.5).expect("finite ratio");
            assert!(is_close(middle.si(), 501.5));
            assert_eq!(middle.display_unit().id(), "m");
        }

        #[test]
        fn verbose_and_scientific_formatting() {
            let value = rel(12_346.0, quantity::LENGTH, "m");
            let config = FormatConfig::new().with_verbose(true);
            assert_eq!(value.format(&config), "Rel 1.235e4 m");

            let reading = abs(20.0, quantity::ABSOLUTE_TEMPERATURE, "degC");
            assert_eq!(reading.format(&config.with_precision(1)), "Abs 20.0 °C");
            assert_eq!(
                reading.format(&FormatConfig::new().with_unit(false)),
                "20.000"
            );
        }

        #[test]
        fn single_precision_values() {
            let value: Scalar<Relative, f32> = Scalar::new(80.0, unit(quantity::LENGTH, "mm"));
            assert!((value.si() - 0.08).abs() < 1e-6);
            assert_eq!(value.to_string(), "80.000 mm");
        }

        #[test]
        fn of_looks_up_abbreviation() {
            let value: Scalar<Relative> =
                Scalar::of(2.0, "h", &base(quantity::DURATION)).expect("known unit");
            assert!(is_close(value.si(), 7200.0));
        }
    }

    mod error_tests {
        use super::*;

        #[test]
        fn unknown_abbreviation() {
            let error = Scalar::<Relative>::parse("3 furlong", &base(quantity::LENGTH), None)
                .expect_err("should not parse");
            assert_eq!(error.input(), "3 furlong");
            assert_eq!(
                error.kind(),
                &ParseErrorKind::UnknownUnit {
                    abbreviation: "furlong".to_string()
                }
            );
        }

        #[test]
        fn malformed_number() {
            let error = Scalar::<Relative>::parse("abc m", &base(quantity::LENGTH), None)
                .expect_err("should not parse");
            assert_eq!(error.input(), "abc m");
            assert!(matches!(error.kind(), ParseErrorKind::InvalidNumber { .. }));
        }

        #[test]
        fn missing_unit() {
            let error = Scalar::<Relative>::parse("12", &base(quantity::LENGTH), None)
                .expect_err("should not parse");
            assert_eq!(error.kind(), &ParseErrorKind::MissingUnit);
        }

        #[test]
        fn absolute_value_in_relative_unit() {
            let error = Scalar::<Absolute>::of(3.0, "K", &base(quantity::TEMPERATURE))
                .expect_err("should not resolve");
            assert!(matches!(
                error.kind(),
                ParseErrorKind::NotAbsoluteUnit { .. }
            ));
        }

        #[test]
        fn adding_different_dimensions() {
            let length = rel(1.0, quantity::LENGTH, "m");
            let time = rel(1.0, quantity::DURATION, "s");
            let error = length.checked_add(&time).expect_err("should not add");
            assert!(matches!(error, ValueError::DimensionMismatch { .. }));
        }

        #[test]
        fn display_unit_of_other_dimension() {
            let length = rel(1.0, quantity::LENGTH, "m");
            let error = length
                .with_display_unit(unit(quantity::MASS, "kg"))
                .expect_err("should not convert");
            assert!(matches!(error, ValueError::DimensionMismatch { .. }));
        }

        #[test]
        fn product_in_wrong_family() {
            let force = rel(2.0, quantity::FORCE, "N");
            let arm = rel(3.0, quantity::LENGTH, "m");
            let error = force
                .checked_mul_into(&arm, &base(quantity::POWER))
                .expect_err("should not multiply");
            assert!(matches!(error, ValueError::DimensionMismatch { .. }));
        }

        #[test]
        fn empty_min() {
            let error = Scalar::<Relative>::min(&[]).expect_err("should fail");
            assert_eq!(error, ValueError::EmptyInput);
        }

        #[test]
        fn non_finite_ratio() {
            let a = rel(1.0, quantity::LENGTH, "m");
            let error = Scalar::interpolate(&a, &a, f64::NAN).expect_err("should fail");
            assert_eq!(error, ValueError::NonFiniteRatio);
        }
    }

    proptest! {
        #[test]
        fn relative_add_then_sub_is_identity(a in -1e6_f64..1e6, b in -1e6_f64..1e6) {
            let r1 = rel(a, quantity::LENGTH, "mm");
            let r2 = rel(b, quantity::LENGTH, "mm");
            let back = r1
                .checked_add(&r2)
                .and_then(|sum| sum.checked_sub(&r2))
                .expect("same dimension");
            prop_assert!((back.si() - r1.si()).abs() <= 1e-9 * f64::max(1.0, r1.si().abs()));
        }

        #[test]
        fn absolute_difference_matches_si(a in -1e4_f64..1e4, b in -1e4_f64..1e4) {
            let x = abs(a, quantity::ABSOLUTE_TEMPERATURE, "degF");
            let y = abs(b, quantity::ABSOLUTE_TEMPERATURE, "degF");
            let difference = x.checked_sub_abs(&y).expect("same dimension");
            prop_assert!(is_close(difference.si(), x.si() - y.si()));
        }
    }
}
