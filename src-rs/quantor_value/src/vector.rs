use std::{fmt, marker::PhantomData};

use quantor_dimension::{CombineOp, SIDimension};
use quantor_unit::{Unit, UnitRegistry};

use crate::{
    Absolute, Element, FormatConfig, Relative, Scalar, Shape, StorageType, ValueError, ValueKind,
    format,
    rules::{check_dimension, check_shape, product_unit, sum_unit},
    storage::Store,
};

/// A fixed-length list of values sharing one unit.
///
/// Like [`Scalar`], a vector stores SI values and keeps a separate display
/// unit. Elementwise operations need operands of equal length.
///
/// The methods taking `&mut self` change the vector in place. A vector
/// shared between threads must be guarded externally before calling them.
#[derive(Debug, Clone, PartialEq)]
pub struct Vector<K: ValueKind, N: Element = f64> {
    store: Store<N>,
    unit: K::Unit,
    kind: PhantomData<K>,
}

impl<K: ValueKind, N: Element> Vector<K, N> {
    /// Creates a vector from values given in `unit`.
    #[must_use]
    pub fn new(values: &[N], unit: K::Unit, storage: StorageType) -> Self {
        let unit = K::normalize(unit);
        let si = values
            .iter()
            .map(|value| N::narrow(unit.as_ref().to_standard(value.widen())))
            .collect();
        Self::from_store(Store::new(si, storage), unit)
    }

    /// Creates a vector from SI values, displayed in `unit`.
    #[must_use]
    pub fn from_si(si: Vec<N>, unit: K::Unit, storage: StorageType) -> Self {
        Self::from_store(Store::new(si, storage), unit)
    }

    /// Creates a sparse vector of length `len` from `(index, si)` pairs.
    /// Missing indices are zero.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::IndexOutOfBounds`] if an index is not below
    /// `len`.
    pub fn from_sparse_si(
        len: usize,
        entries: impl IntoIterator<Item = (usize, N)>,
        unit: K::Unit,
    ) -> Result<Self, ValueError> {
        Ok(Self::from_store(Store::from_entries(len, entries)?, unit))
    }

    fn from_store(store: Store<N>, unit: K::Unit) -> Self {
        Self {
            store,
            unit: K::normalize(unit),
            kind: PhantomData,
        }
    }

    /// Returns the number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Checks whether the vector has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the shape, for comparison in errors.
    #[must_use]
    pub fn shape(&self) -> Shape {
        Shape::Vector(self.len())
    }

    /// Returns how the elements are stored.
    #[must_use]
    pub const fn storage_type(&self) -> StorageType {
        self.store.storage_type()
    }

    /// Returns the display unit.
    #[must_use]
    pub const fn display_unit(&self) -> &K::Unit {
        &self.unit
    }

    /// Returns the dimension shared by every element.
    #[must_use]
    pub fn dimension(&self) -> SIDimension {
        self.unit.as_ref().dimension()
    }

    /// Returns the element at `index` as a scalar in the display unit.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::IndexOutOfBounds`] if `index` is past the end.
    pub fn get(&self, index: usize) -> Result<Scalar<K, N>, ValueError> {
        Ok(Scalar::from_si(self.get_si(index)?, self.unit.clone()))
    }

    /// Returns the SI value at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::IndexOutOfBounds`] if `index` is past the end.
    pub fn get_si(&self, index: usize) -> Result<N, ValueError> {
        self.store.get(index).ok_or(ValueError::IndexOutOfBounds {
            index,
            len: self.len(),
        })
    }

    /// Returns every SI value.
    #[must_use]
    pub fn values_si(&self) -> Vec<N> {
        self.store.to_vec()
    }

    /// Returns every value in the display unit.
    #[must_use]
    pub fn values(&self) -> Vec<N> {
        self.convert_all(self.unit.as_ref())
    }

    /// Returns every value expressed in another unit of the same dimension.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::DimensionMismatch`] if `unit` has another
    /// dimension.
    pub fn values_in(&self, unit: &Unit) -> Result<Vec<N>, ValueError> {
        check_dimension(self.dimension(), unit.dimension())?;
        Ok(self.convert_all(unit))
    }

    fn convert_all(&self, unit: &Unit) -> Vec<N> {
        self.store
            .to_vec()
            .into_iter()
            .map(|si| N::narrow(unit.from_standard(si.widen())))
            .collect()
    }

    /// Iterates over the elements as scalars.
    pub fn scalars(&self) -> impl Iterator<Item = Scalar<K, N>> + '_ {
        self.store
            .to_vec()
            .into_iter()
            .map(|si| Scalar::from_si(si, self.unit.clone()))
    }

    /// Returns the same values displayed in another unit.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::DimensionMismatch`] if `unit` has another
    /// dimension.
    pub fn with_display_unit(&self, unit: K::Unit) -> Result<Self, ValueError> {
        check_dimension(self.dimension(), unit.as_ref().dimension())?;
        Ok(Self::from_store(self.store.clone(), unit))
    }

    /// Counts the elements whose SI value is not zero.
    #[must_use]
    pub fn cardinality(&self) -> usize {
        self.store.cardinality()
    }

    /// Returns the sum of all elements in the display unit.
    #[must_use]
    pub fn z_sum(&self) -> Scalar<K, N> {
        Scalar::from_si(self.store.sum(), self.unit.clone())
    }

    /// Returns the same vector with dense storage.
    #[must_use]
    pub fn to_dense(&self) -> Self {
        Self::from_store(self.store.clone().into_dense(), self.unit.clone())
    }

    /// Returns the same vector with sparse storage.
    #[must_use]
    pub fn to_sparse(&self) -> Self {
        Self::from_store(self.store.clone().into_sparse(), self.unit.clone())
    }

    /// Replaces the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::IndexOutOfBounds`] if `index` is past the end
    /// and [`ValueError::DimensionMismatch`] if `value` has another
    /// dimension.
    pub fn set(&mut self, index: usize, value: &Scalar<K, N>) -> Result<(), ValueError> {
        check_dimension(self.dimension(), value.dimension())?;
        self.store.set(index, value.si())
    }

    /// Replaces the SI value at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::IndexOutOfBounds`] if `index` is past the end.
    pub fn set_si(&mut self, index: usize, si: N) -> Result<(), ValueError> {
        self.store.set(index, si)
    }

    /// Applies `f` to every SI value in place.
    pub fn apply_si(&mut self, f: impl Fn(N) -> N) {
        self.store = self.store.map(f);
    }

    /// Replaces the element at `index` with `value` given in `unit`.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::DimensionMismatch`] if `unit` has another
    /// dimension and [`ValueError::IndexOutOfBounds`] if `index` is past the
    /// end.
    pub fn set_in_unit(
        &mut self,
        index: usize,
        value: N,
        unit: &K::Unit,
    ) -> Result<(), ValueError> {
        let unit = unit.as_ref();
        check_dimension(self.dimension(), unit.dimension())?;
        self.store.set(index, N::narrow(unit.to_standard(value.widen())))
    }

    /// Adds a relative scalar to every element in place.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::DimensionMismatch`] if `increment` has another
    /// dimension.
    pub fn increment_by(&mut self, increment: &Scalar<Relative, N>) -> Result<(), ValueError> {
        check_dimension(self.dimension(), increment.dimension())?;
        let si = increment.si();
        self.apply_si(|value| value + si);
        Ok(())
    }

    /// Subtracts a relative scalar from every element in place.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::DimensionMismatch`] if `decrement` has another
    /// dimension.
    pub fn decrement_by(&mut self, decrement: &Scalar<Relative, N>) -> Result<(), ValueError> {
        check_dimension(self.dimension(), decrement.dimension())?;
        let si = decrement.si();
        self.apply_si(|value| value - si);
        Ok(())
    }

    /// Replaces every SI value by its absolute value.
    pub fn abs(&mut self) {
        self.apply_si(N::abs);
    }

    /// Rounds every SI value up.
    pub fn ceil(&mut self) {
        self.apply_si(N::ceil);
    }

    /// Rounds every SI value down.
    pub fn floor(&mut self) {
        self.apply_si(N::floor);
    }

    /// Negates every SI value.
    pub fn neg(&mut self) {
        self.apply_si(|si| -si);
    }

    /// Rounds every SI value to the nearest integer, ties to even.
    pub fn rint(&mut self) {
        self.apply_si(N::rint);
    }

    /// Rounds every SI value to the nearest integer, ties away from zero.
    pub fn round(&mut self) {
        self.apply_si(N::round);
    }

    fn zip_checked(
        &self,
        other_store: &Store<N>,
        other_dimension: SIDimension,
        f: impl Fn(N, N) -> N,
    ) -> Result<Store<N>, ValueError> {
        check_shape(self.shape(), Shape::Vector(other_store.len()))?;
        check_dimension(self.dimension(), other_dimension)?;
        Ok(self.store.zip_with(other_store, f))
    }

    /// Renders the values in the display unit, as in `[1.000, 2.000] m`.
    #[must_use]
    pub fn format(&self, config: &FormatConfig) -> String {
        let body = format::format_list(
            self.values().into_iter().map(Element::widen),
            config.precision,
        );
        format::decorate(&body, K::LABEL, self.unit.as_ref(), config)
    }
}

impl<N: Element> Vector<Relative, N> {
    /// Adds two vectors elementwise.
    ///
    /// The unit follows the scalar rule: shared unit, or the standard unit.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::ShapeMismatch`] if the lengths differ and
    /// [`ValueError::DimensionMismatch`] if the dimensions differ.
    pub fn checked_add(&self, rhs: &Self) -> Result<Self, ValueError> {
        let store = self.zip_checked(&rhs.store, rhs.dimension(), |a, b| a + b)?;
        Ok(Self::from_store(store, sum_unit(&self.unit, &rhs.unit)))
    }

    /// Subtracts two vectors elementwise.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::ShapeMismatch`] if the lengths differ and
    /// [`ValueError::DimensionMismatch`] if the dimensions differ.
    pub fn checked_sub(&self, rhs: &Self) -> Result<Self, ValueError> {
        let store = self.zip_checked(&rhs.store, rhs.dimension(), |a, b| a - b)?;
        Ok(Self::from_store(store, sum_unit(&self.unit, &rhs.unit)))
    }

    /// Multiplies two vectors elementwise, combining their dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::ShapeMismatch`] if the lengths differ and
    /// [`ValueError::DimensionOverflow`] if an exponent is out of range.
    pub fn checked_mul(&self, rhs: &Self, registry: &UnitRegistry) -> Result<Self, ValueError> {
        check_shape(self.shape(), rhs.shape())?;
        let unit = product_unit(
            self.dimension(),
            rhs.dimension(),
            CombineOp::Multiply,
            registry,
        )?;
        Ok(Self::from_store(
            self.store.zip_with(&rhs.store, |a, b| a * b),
            unit,
        ))
    }

    /// Divides two vectors elementwise, combining their dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::ShapeMismatch`] if the lengths differ and
    /// [`ValueError::DimensionOverflow`] if an exponent is out of range.
    pub fn checked_div(&self, rhs: &Self, registry: &UnitRegistry) -> Result<Self, ValueError> {
        check_shape(self.shape(), rhs.shape())?;
        let unit = product_unit(
            self.dimension(),
            rhs.dimension(),
            CombineOp::Divide,
            registry,
        )?;
        Ok(Self::from_store(
            self.store.zip_with(&rhs.store, |a, b| a / b),
            unit,
        ))
    }

    /// Multiplies every element by a plain number.
    #[must_use]
    pub fn scale(&self, factor: N) -> Self {
        Self::from_store(self.store.map(|si| si * factor), self.unit.clone())
    }

    /// Multiplies every element by a plain number in place.
    pub fn multiply_by(&mut self, factor: N) {
        self.apply_si(|si| si * factor);
    }

    /// Divides every element by a plain number in place.
    pub fn divide_by(&mut self, divisor: N) {
        self.apply_si(|si| si / divisor);
    }

    /// Divides every element by the sum of all elements, so the elements
    /// add up to one.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::ZeroSum`] if the elements add up to zero. The
    /// vector is left unchanged.
    pub fn normalize(&mut self) -> Result<(), ValueError> {
        let sum = self.store.sum();
        if sum.is_zero() {
            return Err(ValueError::ZeroSum);
        }
        self.divide_by(sum);
        Ok(())
    }
}

impl<N: Element> Vector<Absolute, N> {
    /// Moves every element by the matching relative element.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::ShapeMismatch`] if the lengths differ and
    /// [`ValueError::DimensionMismatch`] if the dimensions differ.
    pub fn checked_add(&self, rhs: &Vector<Relative, N>) -> Result<Self, ValueError> {
        let store = self.zip_checked(&rhs.store, rhs.dimension(), |a, b| a + b)?;
        Ok(Self::from_store(store, self.unit.clone()))
    }

    /// Moves every element back by the matching relative element.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::ShapeMismatch`] if the lengths differ and
    /// [`ValueError::DimensionMismatch`] if the dimensions differ.
    pub fn checked_sub(&self, rhs: &Vector<Relative, N>) -> Result<Self, ValueError> {
        let store = self.zip_checked(&rhs.store, rhs.dimension(), |a, b| a - b)?;
        Ok(Self::from_store(store, self.unit.clone()))
    }

    /// Returns the elementwise differences, displayed in the relative unit
    /// of this vector's unit.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::ShapeMismatch`] if the lengths differ and
    /// [`ValueError::DimensionMismatch`] if the dimensions differ.
    pub fn checked_sub_abs(&self, rhs: &Self) -> Result<Vector<Relative, N>, ValueError> {
        let store = self.zip_checked(&rhs.store, rhs.dimension(), |a, b| a - b)?;
        Ok(Vector::from_store(
            store,
            self.unit.relative_unit().clone(),
        ))
    }
}

impl<K: ValueKind, N: Element> fmt::Display for Vector<K, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(&FormatConfig::default()))
    }
}
