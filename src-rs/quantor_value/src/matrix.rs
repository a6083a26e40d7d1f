use std::{fmt, marker::PhantomData};

use quantor_dimension::{CombineOp, SIDimension};
use quantor_unit::{Unit, UnitRegistry};

use crate::{
    Absolute, Element, FormatConfig, Relative, Scalar, Shape, StorageType, ValueError, ValueKind,
    Vector, format,
    rules::{check_dimension, check_shape, product_unit, sum_unit},
    storage::Store,
};

/// A rectangular grid of values sharing one unit.
///
/// Values are kept in SI units in row-major order. As with [`Vector`], the
/// in-place methods need external synchronization when the matrix is shared
/// between threads.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<K: ValueKind, N: Element = f64> {
    rows: usize,
    cols: usize,
    store: Store<N>,
    unit: K::Unit,
    kind: PhantomData<K>,
}

impl<K: ValueKind, N: Element> Matrix<K, N> {
    /// Creates a matrix from rows of values given in `unit`.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::ShapeMismatch`] if the rows differ in length and
    /// [`ValueError::TooManyCells`] if the cell count overflows.
    pub fn new<R: AsRef<[N]>>(
        rows: &[R],
        unit: K::Unit,
        storage: StorageType,
    ) -> Result<Self, ValueError> {
        let unit = K::normalize(unit);
        let cols = rows.first().map_or(0, |row| row.as_ref().len());
        let mut si = Vec::with_capacity(cell_count(rows.len(), cols)?);
        for row in rows {
            let row = row.as_ref();
            check_shape(Shape::Vector(cols), Shape::Vector(row.len()))?;
            si.extend(
                row.iter()
                    .map(|value| N::narrow(unit.as_ref().to_standard(value.widen()))),
            );
        }
        Ok(Self::from_store(
            rows.len(),
            cols,
            Store::new(si, storage),
            unit,
        ))
    }

    /// Creates a matrix from SI values in row-major order.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::TooManyCells`] if `rows * cols` overflows and
    /// [`ValueError::ShapeMismatch`] if `si` does not hold `rows * cols`
    /// values.
    pub fn from_si(
        rows: usize,
        cols: usize,
        si: Vec<N>,
        unit: K::Unit,
        storage: StorageType,
    ) -> Result<Self, ValueError> {
        check_shape(Shape::Vector(cell_count(rows, cols)?), Shape::Vector(si.len()))?;
        Ok(Self::from_store(rows, cols, Store::new(si, storage), unit))
    }

    /// Creates a sparse matrix from `(row, col, si)` entries. Missing cells
    /// are zero.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::TooManyCells`] if `rows * cols` overflows and
    /// [`ValueError::CellOutOfBounds`] if an entry lies outside the matrix.
    pub fn from_sparse_si(
        rows: usize,
        cols: usize,
        entries: impl IntoIterator<Item = (usize, usize, N)>,
        unit: K::Unit,
    ) -> Result<Self, ValueError> {
        let len = cell_count(rows, cols)?;
        let entries = entries
            .into_iter()
            .map(|(row, col, si)| {
                if row < rows && col < cols {
                    Ok((row * cols + col, si))
                } else {
                    Err(ValueError::CellOutOfBounds {
                        row,
                        col,
                        rows,
                        cols,
                    })
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        let store = Store::from_entries(len, entries)?;
        Ok(Self::from_store(rows, cols, store, unit))
    }

    fn from_store(rows: usize, cols: usize, store: Store<N>, unit: K::Unit) -> Self {
        Self {
            rows,
            cols,
            store,
            unit: K::normalize(unit),
            kind: PhantomData,
        }
    }

    /// Returns the number of rows.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns.
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Returns the shape, for comparison in errors.
    #[must_use]
    pub const fn shape(&self) -> Shape {
        Shape::Matrix(self.rows, self.cols)
    }

    /// Returns how the cells are stored.
    #[must_use]
    pub const fn storage_type(&self) -> StorageType {
        self.store.storage_type()
    }

    /// Returns the display unit.
    #[must_use]
    pub const fn display_unit(&self) -> &K::Unit {
        &self.unit
    }

    /// Returns the dimension shared by every cell.
    #[must_use]
    pub fn dimension(&self) -> SIDimension {
        self.unit.as_ref().dimension()
    }

    const fn offset(&self, row: usize, col: usize) -> Result<usize, ValueError> {
        if row < self.rows && col < self.cols {
            Ok(row * self.cols + col)
        } else {
            Err(ValueError::CellOutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    /// Returns a cell as a scalar in the display unit.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::CellOutOfBounds`] if the cell is outside the
    /// matrix.
    pub fn get(&self, row: usize, col: usize) -> Result<Scalar<K, N>, ValueError> {
        Ok(Scalar::from_si(self.get_si(row, col)?, self.unit.clone()))
    }

    /// Returns the SI value of a cell.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::CellOutOfBounds`] if the cell is outside the
    /// matrix.
    pub fn get_si(&self, row: usize, col: usize) -> Result<N, ValueError> {
        let offset = self.offset(row, col)?;
        Ok(self.store.get(offset).unwrap_or_else(N::zero))
    }

    /// Returns the SI values row by row.
    #[must_use]
    pub fn values_si(&self) -> Vec<Vec<N>> {
        self.chunk_rows(&self.store.to_vec())
    }

    /// Returns the values in the display unit, row by row.
    #[must_use]
    pub fn values(&self) -> Vec<Vec<N>> {
        self.chunk_rows(&self.convert_all(self.unit.as_ref()))
    }

    /// Returns the values expressed in another unit of the same dimension.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::DimensionMismatch`] if `unit` has another
    /// dimension.
    pub fn values_in(&self, unit: &Unit) -> Result<Vec<Vec<N>>, ValueError> {
        check_dimension(self.dimension(), unit.dimension())?;
        Ok(self.chunk_rows(&self.convert_all(unit)))
    }

    fn convert_all(&self, unit: &Unit) -> Vec<N> {
        self.store
            .to_vec()
            .into_iter()
            .map(|si| N::narrow(unit.from_standard(si.widen())))
            .collect()
    }

    fn chunk_rows(&self, flat: &[N]) -> Vec<Vec<N>> {
        if self.cols == 0 {
            return vec![Vec::new(); self.rows];
        }
        flat.chunks(self.cols).map(<[N]>::to_vec).collect()
    }

    /// Returns one row as a vector with the same unit and storage.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::IndexOutOfBounds`] if `row` is past the last
    /// row.
    pub fn row(&self, row: usize) -> Result<Vector<K, N>, ValueError> {
        if row >= self.rows {
            return Err(ValueError::IndexOutOfBounds {
                index: row,
                len: self.rows,
            });
        }
        let start = row * self.cols;
        let si = (start..start + self.cols)
            .map(|offset| self.store.get(offset).unwrap_or_else(N::zero))
            .collect();
        Ok(Vector::from_si(si, self.unit.clone(), self.storage_type()))
    }

    /// Returns one column as a vector with the same unit and storage.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::IndexOutOfBounds`] if `col` is past the last
    /// column.
    pub fn column(&self, col: usize) -> Result<Vector<K, N>, ValueError> {
        if col >= self.cols {
            return Err(ValueError::IndexOutOfBounds {
                index: col,
                len: self.cols,
            });
        }
        let si = (0..self.rows)
            .map(|row| {
                self.store
                    .get(row * self.cols + col)
                    .unwrap_or_else(N::zero)
            })
            .collect();
        Ok(Vector::from_si(si, self.unit.clone(), self.storage_type()))
    }

    /// Returns the transposed matrix.
    #[must_use]
    pub fn transpose(&self) -> Self {
        let flat = self.store.to_vec();
        let transposed = (0..self.cols)
            .flat_map(|col| (0..self.rows).map(move |row| row * self.cols + col))
            .map(|offset| flat.get(offset).copied().unwrap_or_else(N::zero))
            .collect();
        Self::from_store(
            self.cols,
            self.rows,
            Store::new(transposed, self.storage_type()),
            self.unit.clone(),
        )
    }

    /// Returns the same values displayed in another unit.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::DimensionMismatch`] if `unit` has another
    /// dimension.
    pub fn with_display_unit(&self, unit: K::Unit) -> Result<Self, ValueError> {
        check_dimension(self.dimension(), unit.as_ref().dimension())?;
        Ok(Self::from_store(
            self.rows,
            self.cols,
            self.store.clone(),
            unit,
        ))
    }

    /// Counts the cells whose SI value is not zero.
    #[must_use]
    pub fn cardinality(&self) -> usize {
        self.store.cardinality()
    }

    /// Returns the sum of all cells.
    #[must_use]
    pub fn z_sum(&self) -> Scalar<K, N> {
        Scalar::from_si(self.store.sum(), self.unit.clone())
    }

    /// Returns the same matrix with dense storage.
    #[must_use]
    pub fn to_dense(&self) -> Self {
        Self::from_store(
            self.rows,
            self.cols,
            self.store.clone().into_dense(),
            self.unit.clone(),
        )
    }

    /// Returns the same matrix with sparse storage.
    #[must_use]
    pub fn to_sparse(&self) -> Self {
        Self::from_store(
            self.rows,
            self.cols,
            self.store.clone().into_sparse(),
            self.unit.clone(),
        )
    }

    /// Replaces a cell.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::CellOutOfBounds`] if the cell is outside the
    /// matrix and [`ValueError::DimensionMismatch`] if `value` has another
    /// dimension.
    pub fn set(&mut self, row: usize, col: usize, value: &Scalar<K, N>) -> Result<(), ValueError> {
        check_dimension(self.dimension(), value.dimension())?;
        self.set_si(row, col, value.si())
    }

    /// Replaces the SI value of a cell.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::CellOutOfBounds`] if the cell is outside the
    /// matrix.
    pub fn set_si(&mut self, row: usize, col: usize, si: N) -> Result<(), ValueError> {
        let offset = self.offset(row, col)?;
        self.store.set(offset, si)
    }

    /// Applies `f` to every SI value in place.
    pub fn apply_si(&mut self, f: impl Fn(N) -> N) {
        self.store = self.store.map(f);
    }

    /// Replaces a cell with `value` given in `unit`.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::DimensionMismatch`] if `unit` has another
    /// dimension and [`ValueError::CellOutOfBounds`] if the cell is outside
    /// the matrix.
    pub fn set_in_unit(
        &mut self,
        row: usize,
        col: usize,
        value: N,
        unit: &K::Unit,
    ) -> Result<(), ValueError> {
        let unit = unit.as_ref();
        check_dimension(self.dimension(), unit.dimension())?;
        self.set_si(row, col, N::narrow(unit.to_standard(value.widen())))
    }

    /// Adds a relative scalar to every cell in place.
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

    /// Subtracts a relative scalar from every cell in place.
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
        other_shape: Shape,
        other_store: &Store<N>,
        other_dimension: SIDimension,
        f: impl Fn(N, N) -> N,
    ) -> Result<Store<N>, ValueError> {
        check_shape(self.shape(), other_shape)?;
        check_dimension(self.dimension(), other_dimension)?;
        Ok(self.store.zip_with(other_store, f))
    }

    /// Renders the values row by row, as in `[[1.000, 2.000], [3.000, 4.000]] m`.
    #[must_use]
    pub fn format(&self, config: &FormatConfig) -> String {
        let rows: Vec<String> = self
            .values()
            .into_iter()
            .map(|row| format::format_list(row.into_iter().map(Element::widen), config.precision))
            .collect();
        let body = format!("[{}]", rows.join(", "));
        format::decorate(&body, K::LABEL, self.unit.as_ref(), config)
    }
}

impl<N: Element> Matrix<Relative, N> {
    /// Adds two matrices cell by cell.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::ShapeMismatch`] if the shapes differ and
    /// [`ValueError::DimensionMismatch`] if the dimensions differ.
    pub fn checked_add(&self, rhs: &Self) -> Result<Self, ValueError> {
        let store = self.zip_checked(rhs.shape(), &rhs.store, rhs.dimension(), |a, b| a + b)?;
        Ok(Self::from_store(
            self.rows,
            self.cols,
            store,
            sum_unit(&self.unit, &rhs.unit),
        ))
    }

    /// Subtracts two matrices cell by cell.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::ShapeMismatch`] if the shapes differ and
    /// [`ValueError::DimensionMismatch`] if the dimensions differ.
    pub fn checked_sub(&self, rhs: &Self) -> Result<Self, ValueError> {
        let store = self.zip_checked(rhs.shape(), &rhs.store, rhs.dimension(), |a, b| a - b)?;
        Ok(Self::from_store(
            self.rows,
            self.cols,
            store,
            sum_unit(&self.unit, &rhs.unit),
        ))
    }

    /// Multiplies two matrices cell by cell, combining their dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::ShapeMismatch`] if the shapes differ and
    /// [`ValueError::DimensionOverflow`] if an exponent is out of range.
    pub fn checked_mul(&self, rhs: &Self, registry: &UnitRegistry) -> Result<Self, ValueError> {
        self.combine(rhs, CombineOp::Multiply, registry, |a, b| a * b)
    }

    /// Divides two matrices cell by cell, combining their dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::ShapeMismatch`] if the shapes differ and
    /// [`ValueError::DimensionOverflow`] if an exponent is out of range.
    pub fn checked_div(&self, rhs: &Self, registry: &UnitRegistry) -> Result<Self, ValueError> {
        self.combine(rhs, CombineOp::Divide, registry, |a, b| a / b)
    }

    fn combine(
        &self,
        rhs: &Self,
        op: CombineOp,
        registry: &UnitRegistry,
        f: impl Fn(N, N) -> N,
    ) -> Result<Self, ValueError> {
        check_shape(self.shape(), rhs.shape())?;
        let unit = product_unit(self.dimension(), rhs.dimension(), op, registry)?;
        Ok(Self::from_store(
            self.rows,
            self.cols,
            self.store.zip_with(&rhs.store, f),
            unit,
        ))
    }

    /// Multiplies every cell by a plain number.
    #[must_use]
    pub fn scale(&self, factor: N) -> Self {
        Self::from_store(
            self.rows,
            self.cols,
            self.store.map(|si| si * factor),
            self.unit.clone(),
        )
    }

    /// Multiplies every cell by a plain number in place.
    pub fn multiply_by(&mut self, factor: N) {
        self.apply_si(|si| si * factor);
    }

    /// Divides every cell by a plain number in place.
    pub fn divide_by(&mut self, divisor: N) {
        self.apply_si(|si| si / divisor);
    }

    /// Divides every cell by the sum of all cells, so the cells add up to
    /// one.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::ZeroSum`] if the cells add up to zero. The
    /// matrix is left unchanged.
    pub fn normalize(&mut self) -> Result<(), ValueError> {
        let sum = self.store.sum();
        if sum.is_zero() {
            return Err(ValueError::ZeroSum);
        }
        self.divide_by(sum);
        Ok(())
    }
}

impl<N: Element> Matrix<Absolute, N> {
    /// Moves every cell by the matching relative cell.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::ShapeMismatch`] if the shapes differ and
    /// [`ValueError::DimensionMismatch`] if the dimensions differ.
    pub fn checked_add(&self, rhs: &Matrix<Relative, N>) -> Result<Self, ValueError> {
        let store = self.zip_checked(rhs.shape(), &rhs.store, rhs.dimension(), |a, b| a + b)?;
        Ok(Self::from_store(self.rows, self.cols, store, self.unit.clone()))
    }

    /// Moves every cell back by the matching relative cell.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::ShapeMismatch`] if the shapes differ and
    /// [`ValueError::DimensionMismatch`] if the dimensions differ.
    pub fn checked_sub(&self, rhs: &Matrix<Relative, N>) -> Result<Self, ValueError> {
        let store = self.zip_checked(rhs.shape(), &rhs.store, rhs.dimension(), |a, b| a - b)?;
        Ok(Self::from_store(self.rows, self.cols, store, self.unit.clone()))
    }

    /// Returns the cell-by-cell differences as a relative matrix.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::ShapeMismatch`] if the shapes differ and
    /// [`ValueError::DimensionMismatch`] if the dimensions differ.
    pub fn checked_sub_abs(&self, rhs: &Self) -> Result<Matrix<Relative, N>, ValueError> {
        let store = self.zip_checked(rhs.shape(), &rhs.store, rhs.dimension(), |a, b| a - b)?;
        Ok(Matrix::from_store(
            self.rows,
            self.cols,
            store,
            self.unit.relative_unit().clone(),
        ))
    }
}

/// Returns `rows * cols`, or an error if the product overflows.
const fn cell_count(rows: usize, cols: usize) -> Result<usize, ValueError> {
    match rows.checked_mul(cols) {
        Some(count) => Ok(count),
        None => Err(ValueError::TooManyCells { rows, cols }),
    }
}

impl<K: ValueKind, N: Element> fmt::Display for Matrix<K, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(&FormatConfig::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quantor_unit::{UnitBase, is_close, quantity};
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

    fn grid(rows: &[[f64; 2]], family: &str, abbreviation: &str) -> Matrix<Relative> {
        Matrix::new(rows, unit(family, abbreviation), StorageType::Dense)
            .expect("rows should have equal length")
    }

    fn kelvins(rows: &[[f64; 1]]) -> Matrix<Absolute> {
        let kelvin = base(quantity::ABSOLUTE_TEMPERATURE)
            .lookup_by_abbreviation("K")
            .and_then(|unit| quantor_unit::AbsoluteUnit::try_from(unit).ok())
            .expect("kelvin is absolute");
        Matrix::new(rows, kelvin, StorageType::Dense).expect("rows should have equal length")
    }

    mod success_tests {
        use super::*;

        #[test]
        fn construction_and_access() {
            let matrix = grid(&[[1.0, 2.0], [3.0, 4.0]], quantity::LENGTH, "km");
            assert_eq!(matrix.shape(), Shape::Matrix(2, 2));
            assert!(is_close(matrix.get_si(1, 0).expect("in bounds"), 3000.0));
            assert_eq!(matrix.values(), vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
            assert_eq!(matrix.to_string(), "[[1.000, 2.000], [3.000, 4.000]] km");
        }

        #[test]
        fn rows_columns_and_transpose() {
            let matrix = grid(&[[1.0, 2.0], [3.0, 4.0]], quantity::LENGTH, "m");
            assert_eq!(matrix.row(1).expect("in bounds").values_si(), vec![3.0, 4.0]);
            assert_eq!(
                matrix.column(1).expect("in bounds").values_si(),
                vec![2.0, 4.0]
            );
            let transposed = matrix.transpose();
            assert_eq!(
                transposed.values_si(),
                vec![vec![1.0, 3.0], vec![2.0, 4.0]]
            );
            assert_eq!(transposed.transpose(), matrix);
        }

        #[test]
        fn elementwise_product_resolves_unit() {
            let lengths = grid(&[[2.0, 4.0], [6.0, 8.0]], quantity::LENGTH, "m");
            let rates = grid(&[[1.0, 2.0], [3.0, 4.0]], quantity::FREQUENCY, "Hz");
            let speeds = lengths.checked_mul(&rates, &REGISTRY).expect("same shape");
            assert_eq!(speeds.display_unit().id(), "m/s");
            assert_eq!(speeds.values_si(), vec![vec![2.0, 8.0], vec![18.0, 32.0]]);
        }

        #[test]
        fn sparse_matrices() {
            let meter = unit(quantity::LENGTH, "m");
            let a: Matrix<Relative> =
                Matrix::from_sparse_si(3, 3, [(0, 0, 1.0), (2, 1, 2.0)], meter.clone())
                    .expect("cells in bounds");
            let b: Matrix<Relative> =
                Matrix::from_sparse_si(3, 3, [(0, 0, 1.0)], meter).expect("cells in bounds");
            let sum = a.checked_add(&b).expect("same shape");
            assert_eq!(sum.storage_type(), StorageType::Sparse);
            assert_eq!(sum.cardinality(), 2);
            assert!(is_close(sum.get_si(0, 0).expect("in bounds"), 2.0));
            assert!(is_close(sum.z_sum().si(), 4.0));
            assert_eq!(sum.to_dense().to_sparse(), sum);
        }

        #[test]
        fn set_cells() {
            let mut matrix = grid(&[[0.0, 0.0], [0.0, 0.0]], quantity::LENGTH, "m").to_sparse();
            let value = Scalar::new(2.0, unit(quantity::LENGTH, "km"));
            matrix.set(0, 1, &value).expect("in bounds");
            matrix.multiply_by(0.5);
            assert_eq!(matrix.values_si(), vec![vec![0.0, 1000.0], vec![0.0, 0.0]]);
            assert_eq!(matrix.cardinality(), 1);
        }

        #[test]
        fn absolute_matrix_difference() {
            let a = kelvins(&[[300.0], [310.0]]);
            let b = kelvins(&[[290.0], [290.0]]);
            let difference = a.checked_sub_abs(&b).expect("same shape");
            assert_eq!(difference.values_si(), vec![vec![10.0], vec![20.0]]);
            let back = b.checked_add(&difference).expect("same shape");
            assert_eq!(back, a);
        }

        #[test]
        fn rounding_and_sign_functions() {
            let mut matrix = grid(&[[-1.5, 2.5], [0.0, -2.5]], quantity::LENGTH, "m");
            matrix.rint();
            assert_eq!(matrix.values_si(), vec![vec![-2.0, 2.0], vec![0.0, -2.0]]);
            matrix.neg();
            matrix.abs();
            assert_eq!(matrix.values_si(), vec![vec![2.0, 2.0], vec![0.0, 2.0]]);

            let mut matrix = grid(&[[-1.5, 2.5], [0.4, -2.5]], quantity::LENGTH, "m");
            let mut floored = matrix.clone();
            floored.floor();
            assert_eq!(floored.values_si(), vec![vec![-2.0, 2.0], vec![0.0, -3.0]]);
            let mut ceiled = matrix.clone();
            ceiled.ceil();
            assert_eq!(ceiled.values_si(), vec![vec![-1.0, 3.0], vec![1.0, -2.0]]);
            matrix.round();
            assert_eq!(matrix.values_si(), vec![vec![-2.0, 3.0], vec![0.0, -3.0]]);
        }

        #[test]
        fn normalize_and_divide() {
            let mut matrix = grid(&[[1.0, 1.0], [0.0, 2.0]], quantity::LENGTH, "m").to_sparse();
            matrix.normalize().expect("sum is not zero");
            assert_eq!(matrix.values_si(), vec![vec![0.25, 0.25], vec![0.0, 0.5]]);
            assert_eq!(matrix.storage_type(), StorageType::Sparse);

            matrix.divide_by(0.25);
            assert_eq!(matrix.values_si(), vec![vec![1.0, 1.0], vec![0.0, 2.0]]);
        }

        #[test]
        fn set_in_unit_and_increment() {
            let mut matrix = grid(&[[1.0, 2.0], [3.0, 4.0]], quantity::LENGTH, "m");
            let kilometer = unit(quantity::LENGTH, "km");
            matrix
                .set_in_unit(1, 0, 0.5, &kilometer)
                .expect("same dimension and in bounds");
            assert!(is_close(matrix.get_si(1, 0).expect("in bounds"), 500.0));

            let step = Scalar::new(1.0, unit(quantity::LENGTH, "m"));
            matrix.increment_by(&step).expect("same dimension");
            assert_eq!(matrix.values_si(), vec![vec![2.0, 3.0], vec![501.0, 5.0]]);
            matrix.decrement_by(&step).expect("same dimension");
            assert_eq!(matrix.values_si(), vec![vec![1.0, 2.0], vec![500.0, 4.0]]);
        }
    }

    mod error_tests {
        use super::*;

        #[test]
        fn ragged_rows() {
            let rows: Vec<Vec<f64>> = vec![vec![1.0, 2.0], vec![3.0]];
            let error = Matrix::<Relative>::new(
                rows.as_slice(),
                unit(quantity::LENGTH, "m"),
                StorageType::Dense,
            )
            .expect_err("should reject ragged rows");
            assert_eq!(
                error,
                ValueError::ShapeMismatch {
                    expected: Shape::Vector(2),
                    found: Shape::Vector(1)
                }
            );
        }

        #[test]
        fn shape_mismatch() {
            let a = grid(&[[1.0, 2.0]], quantity::LENGTH, "m");
            let b = grid(&[[1.0, 2.0], [3.0, 4.0]], quantity::LENGTH, "m");
            let expected = ValueError::ShapeMismatch {
                expected: Shape::Matrix(1, 2),
                found: Shape::Matrix(2, 2),
            };
            assert_eq!(a.checked_add(&b), Err(expected.clone()));
            assert_eq!(a.checked_sub(&b), Err(expected.clone()));
            assert_eq!(a.checked_mul(&b, &REGISTRY), Err(expected.clone()));
            assert_eq!(a.checked_div(&b, &REGISTRY), Err(expected));
        }

        #[test]
        fn absolute_shape_mismatch() {
            let a = kelvins(&[[300.0]]);
            let b = kelvins(&[[290.0], [280.0]]);
            let deltas = grid(&[[1.0, 2.0]], quantity::TEMPERATURE, "K");
            let expected = |found| ValueError::ShapeMismatch {
                expected: Shape::Matrix(1, 1),
                found,
            };
            assert_eq!(a.checked_add(&deltas), Err(expected(Shape::Matrix(1, 2))));
            assert_eq!(a.checked_sub(&deltas), Err(expected(Shape::Matrix(1, 2))));
            assert_eq!(a.checked_sub_abs(&b), Err(expected(Shape::Matrix(2, 1))));
        }

        #[test]
        fn too_many_cells() {
            let meter = unit(quantity::LENGTH, "m");
            let error = Matrix::<Relative>::from_si(
                usize::MAX,
                2,
                vec![1.0],
                meter.clone(),
                StorageType::Dense,
            )
            .expect_err("should fail");
            assert_eq!(
                error,
                ValueError::TooManyCells {
                    rows: usize::MAX,
                    cols: 2
                }
            );

            let error = Matrix::<Relative>::from_sparse_si(2, usize::MAX, [(0, 0, 1.0)], meter)
                .expect_err("should fail");
            assert_eq!(
                error,
                ValueError::TooManyCells {
                    rows: 2,
                    cols: usize::MAX
                }
            );
        }

        #[test]
        fn normalize_zero_sum() {
            let mut matrix = grid(&[[1.0, -1.0], [2.0, -2.0]], quantity::LENGTH, "m");
            assert_eq!(matrix.normalize(), Err(ValueError::ZeroSum));
            assert_eq!(matrix.values_si(), vec![vec![1.0, -1.0], vec![2.0, -2.0]]);
        }

        #[test]
        fn set_in_unit_errors() {
            let mut matrix = grid(&[[1.0, 2.0]], quantity::LENGTH, "m");
            let error = matrix
                .set_in_unit(0, 0, 1.0, &unit(quantity::DURATION, "s"))
                .expect_err("should not set");
            assert!(matches!(error, ValueError::DimensionMismatch { .. }));

            let error = matrix
                .set_in_unit(0, 2, 1.0, &unit(quantity::LENGTH, "m"))
                .expect_err("should not set");
            assert_eq!(
                error,
                ValueError::CellOutOfBounds {
                    row: 0,
                    col: 2,
                    rows: 1,
                    cols: 2
                }
            );
        }

        #[test]
        fn cell_out_of_bounds() {
            let matrix = grid(&[[1.0, 2.0]], quantity::LENGTH, "m");
            let error = matrix.get(1, 0).expect_err("should fail");
            assert_eq!(
                error,
                ValueError::CellOutOfBounds {
                    row: 1,
                    col: 0,
                    rows: 1,
                    cols: 2
                }
            );
        }

        #[test]
        fn wrong_value_count() {
            let error = Matrix::<Relative>::from_si(
                2,
                2,
                vec![1.0; 3],
                unit(quantity::LENGTH, "m"),
                StorageType::Dense,
            )
            .expect_err("should fail");
            assert!(matches!(error, ValueError::ShapeMismatch { .. }));
        }
    }
}
