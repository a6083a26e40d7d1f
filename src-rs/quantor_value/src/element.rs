use std::fmt;

use num_traits::Float;

mod private {
    pub trait Sealed {}
    impl Sealed for f32 {}
    impl Sealed for f64 {}
}

/// The floating point type stored in a value, either `f64` or `f32`.
///
/// Unit conversions are always computed in `f64`; an `f32` value is widened
/// before converting and narrowed afterwards.
pub trait Element:
    private::Sealed + Float + Default + fmt::Debug + fmt::Display + Send + Sync + 'static
{
    /// Converts from `f64`, rounding to the nearest representable value.
    fn narrow(value: f64) -> Self;

    /// Converts to `f64` without loss.
    fn widen(self) -> f64;

    /// Rounds to the nearest integer, with ties going to the even integer.
    fn rint(self) -> Self;
}

impl Element for f64 {
    #[inline]
    fn narrow(value: f64) -> Self {
        value
    }

    #[inline]
    fn widen(self) -> f64 {
        self
    }

    #[inline]
    fn rint(self) -> Self {
        self.round_ties_even()
    }
}

impl Element for f32 {
    #[inline]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "narrowing to f32 is the purpose of this function"
    )]
    fn narrow(value: f64) -> Self {
        value as Self
    }

    #[inline]
    fn widen(self) -> f64 {
        f64::from(self)
    }

    #[inline]
    fn rint(self) -> Self {
        self.round_ties_even()
    }
}
