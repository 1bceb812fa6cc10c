use alloc::vec::Vec;
use core::fmt::{self, Debug, Display, Formatter};
use core::marker::PhantomData;
use core::ops::{Index, IndexMut};

use itertools::Itertools;
use rand::Rng;
use rand::distr::{Distribution, StandardUniform};
use smallmat_scalar::Scalar;
use tracing::instrument;

use crate::dim::{Const, Dim, Dyn, U1, U2, U3, U4};
use crate::error::{Axis, MatrixError, MatrixResult};
use crate::layout::{Layout, RowMajor};
use crate::shape::Compatible;
use crate::storage::{Buffer, VecStorage};
use crate::stride::{StrideCursor, StrideCursorMut};
use crate::view::{VectorView, VectorViewMut};
use crate::{Matrix, MatrixMut};

/// An owning matrix with `R` rows and `C` columns stored contiguously in layout `L`.
///
/// Each extent is either a [`Const`], fixed by the type, or a [`Dyn`], carried at runtime. When
/// both are fixed the elements live inline and the matrix is `Copy`; otherwise they live in a
/// single heap buffer. Either way the buffer always holds exactly `rows() * columns()` elements.
///
/// Constructors take values in logical row-major order whatever `L` is.
#[derive(Clone, PartialEq)]
pub struct DenseMatrix<T: Scalar, R: Dim, C: Dim, L: Layout = RowMajor> {
    data: R::Storage<T, C>,
    rows: R,
    columns: C,
    _layout: PhantomData<L>,
}

impl<T: Scalar, const R: usize, const C: usize, L: Layout> Copy
    for DenseMatrix<T, Const<R>, Const<C>, L>
{
}

impl<T: Scalar, R: Dim, C: Dim, L: Layout> DenseMatrix<T, R, C, L> {
    /// Build a matrix whose value at `(r, c)` is `f(r, c)`.
    pub fn from_fn_generic<F>(rows: R, columns: C, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> T,
    {
        let (r, c) = (rows.value(), columns.value());
        let data = Buffer::from_fn(r * c, |i| {
            let (row, column) = L::position(i, r, c);
            f(row, column)
        });
        Self {
            data,
            rows,
            columns,
            _layout: PhantomData,
        }
    }

    #[must_use]
    pub fn zeros_generic(rows: R, columns: C) -> Self {
        Self::from_fn_generic(rows, columns, |_, _| T::zero())
    }

    /// Build a matrix from a runtime shape and `rows * columns` values in row-major order.
    ///
    /// Fails if a fixed extent of this type disagrees with the requested one, or if the number
    /// of values does not match the shape.
    pub fn try_from_row_major(rows: usize, columns: usize, values: &[T]) -> MatrixResult<Self> {
        let row_dim = R::try_from_usize(rows).ok_or(MatrixError::FixedExtentMismatch {
            axis: Axis::Rows,
            expected: R::FIXED.unwrap_or(rows),
            actual: rows,
        })?;
        let col_dim = C::try_from_usize(columns).ok_or(MatrixError::FixedExtentMismatch {
            axis: Axis::Columns,
            expected: C::FIXED.unwrap_or(columns),
            actual: columns,
        })?;
        let len = rows
            .checked_mul(columns)
            .ok_or(MatrixError::ShapeOverflow { rows, columns })?;
        if values.len() != len {
            return Err(MatrixError::LengthMismatch {
                expected: len,
                actual: values.len(),
            });
        }
        Ok(Self::from_fn_generic(row_dim, col_dim, |r, c| {
            values[r * columns + c]
        }))
    }

    /// Copy a compatible matrix or view, converting its layout if needed.
    ///
    /// A column vector can be built from a row vector of the same length and vice versa.
    pub fn from_matrix<M>(source: &M) -> Self
    where
        M: Matrix<T>,
        (R, C): Compatible<(M::Rows, M::Cols)>,
    {
        let (rows, columns) =
            <(R, C) as Compatible<(M::Rows, M::Cols)>>::extents(source.rows(), source.columns());
        Self::from_fn_generic(R::from_usize(rows), C::from_usize(columns), |r, c| {
            source.logical_element(r * columns + c)
        })
    }

    /// Fill a matrix with values sampled from `rng`.
    #[instrument(level = "debug", skip_all, fields(rows = rows.value(), columns = columns.value()))]
    pub fn rand<G: Rng>(rng: &mut G, rows: R, columns: C) -> Self
    where
        StandardUniform: Distribution<T>,
    {
        Self::from_fn_generic(rows, columns, |_, _| rng.random())
    }

    /// The same values stored in layout `L2`.
    #[must_use]
    pub fn with_layout<L2: Layout>(&self) -> DenseMatrix<T, R, C, L2> {
        DenseMatrix::from_fn_generic(self.rows, self.columns, |r, c| self.value(r, c))
    }

    pub fn map<U: Scalar, F: FnMut(T) -> U>(&self, mut f: F) -> DenseMatrix<U, R, C, L> {
        let values = self.as_slice();
        DenseMatrix {
            data: Buffer::from_fn(values.len(), |i| f(values[i])),
            rows: self.rows,
            columns: self.columns,
            _layout: PhantomData,
        }
    }

    /// The buffer, in storage order.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        self.data.as_slice()
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.data.as_mut_slice()
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.data.into_vec()
    }

    /// Exchange the values of two matrices of the same shape, possibly in different layouts.
    pub fn swap_with<L2: Layout>(&mut self, other: &mut DenseMatrix<T, R, C, L2>) {
        debug_assert_eq!(self.dimensions(), other.dimensions());
        for (r, c) in (0..self.rows()).cartesian_product(0..self.columns()) {
            core::mem::swap(self.value_mut(r, c), other.value_mut(r, c));
        }
    }

    #[inline]
    fn offset(&self, row: usize, column: usize) -> usize {
        L::offset(row, column, self.rows.value(), self.columns.value())
    }
}

impl<T: Scalar, const R: usize, const C: usize, L: Layout> DenseMatrix<T, Const<R>, Const<C>, L> {
    pub fn from_fn<F: FnMut(usize, usize) -> T>(f: F) -> Self {
        Self::from_fn_generic(Const, Const, f)
    }

    /// Build a matrix from its rows.
    pub fn from_rows(rows: [[T; C]; R]) -> Self {
        Self::from_fn(|r, c| rows[r][c])
    }

    #[must_use]
    pub fn zeros() -> Self {
        Self::zeros_generic(Const, Const)
    }
}

impl<T: Scalar, const R: usize, L: Layout> DenseMatrix<T, Const<R>, Dyn, L> {
    #[must_use]
    pub fn with_columns(columns: usize) -> Self {
        Self::zeros_generic(Const, Dyn(columns))
    }

    /// Build a matrix from row-major values; the column count is `values.len() / R`.
    pub fn from_row_major(values: &[T]) -> Self {
        let columns = values.len().checked_div(R).unwrap_or(0);
        debug_assert_eq!(columns * R, values.len(), "{} values do not fill {R} rows", values.len());
        Self::from_fn_generic(Const, Dyn(columns), |r, c| values[r * columns + c])
    }
}

impl<T: Scalar, const C: usize, L: Layout> DenseMatrix<T, Dyn, Const<C>, L> {
    #[must_use]
    pub fn with_rows(rows: usize) -> Self {
        Self::zeros_generic(Dyn(rows), Const)
    }

    /// Build a matrix from row-major values; the row count is `values.len() / C`.
    pub fn from_row_major(values: &[T]) -> Self {
        let rows = values.len().checked_div(C).unwrap_or(0);
        debug_assert_eq!(rows * C, values.len(), "{} values do not fill {C} columns", values.len());
        Self::from_fn_generic(Dyn(rows), Const, |r, c| values[r * C + c])
    }
}

impl<T: Scalar, L: Layout> DenseMatrix<T, Dyn, Dyn, L> {
    #[must_use]
    pub fn zeros(rows: usize, columns: usize) -> Self {
        Self::zeros_generic(Dyn(rows), Dyn(columns))
    }

    pub fn from_fn<F: FnMut(usize, usize) -> T>(rows: usize, columns: usize, f: F) -> Self {
        Self::from_fn_generic(Dyn(rows), Dyn(columns), f)
    }

    pub fn from_row_major(rows: usize, columns: usize, values: &[T]) -> Self {
        debug_assert_eq!(values.len(), rows * columns);
        Self::from_fn_generic(Dyn(rows), Dyn(columns), |r, c| values[r * columns + c])
    }

    /// Change the shape to `rows x columns`.
    ///
    /// The first `min(old, new)` elements of the buffer are kept in storage order; any new
    /// elements are zero.
    pub fn resize(&mut self, rows: usize, columns: usize) {
        let buffer: &mut VecStorage<T> = &mut self.data;
        buffer.resize(rows * columns);
        self.rows = Dyn(rows);
        self.columns = Dyn(columns);
    }
}

impl<T: Scalar, const N: usize, L: Layout> DenseMatrix<T, Const<N>, U1, L> {
    /// Build a column vector from its elements.
    pub fn from_array(values: [T; N]) -> Self {
        Self::from_fn(|r, _| values[r])
    }
}

macro_rules! impl_vector_constructors {
    ($n:ty, $($field:ident),+) => {
        impl<T: Scalar, L: Layout> DenseMatrix<T, $n, U1, L> {
            pub fn new($($field: T),+) -> Self {
                Self::from_rows([$([$field]),+])
            }
        }

        impl<T: Scalar, L: Layout> DenseMatrix<T, U1, $n, L> {
            pub fn new($($field: T),+) -> Self {
                Self::from_rows([[$($field),+]])
            }
        }
    };
}

impl_vector_constructors!(U2, x, y);
impl_vector_constructors!(U3, x, y, z);
impl_vector_constructors!(U4, x, y, z, w);

impl<T: Scalar, R: Dim, C: Dim, L: Layout> Default for DenseMatrix<T, R, C, L> {
    /// All zeros for fixed extents; dynamic extents start out empty.
    fn default() -> Self {
        Self::zeros_generic(R::default(), C::default())
    }
}

impl<T: Scalar, R: Dim, C: Dim, L: Layout> Matrix<T> for DenseMatrix<T, R, C, L> {
    type Rows = R;
    type Cols = C;
    type Layout = L;

    #[inline]
    fn row_dim(&self) -> R {
        self.rows
    }

    #[inline]
    fn col_dim(&self) -> C {
        self.columns
    }

    #[inline]
    fn value(&self, row: usize, column: usize) -> T {
        self.as_slice()[self.offset(row, column)]
    }

    #[inline]
    fn element(&self, index: usize) -> T {
        self.as_slice()[index]
    }

    #[inline]
    fn iter(&self) -> impl Iterator<Item = T> + '_ {
        self.as_slice().iter().copied()
    }

    #[inline]
    fn row(&self, row: usize) -> VectorView<'_, T, U1, C, L> {
        debug_assert!(row < self.rows(), "row {row} out of range");
        let start = L::row_start(row, self.columns());
        let cursor = StrideCursor::new(self.as_slice(), start, L::row_stride(self.rows()));
        VectorView::new(cursor, Const, self.columns)
    }

    #[inline]
    fn column(&self, column: usize) -> VectorView<'_, T, R, U1, L> {
        debug_assert!(column < self.columns(), "column {column} out of range");
        let start = L::column_start(column, self.rows());
        let cursor = StrideCursor::new(self.as_slice(), start, L::column_stride(self.columns()));
        VectorView::new(cursor, self.rows, Const)
    }
}

impl<T: Scalar, R: Dim, C: Dim, L: Layout> MatrixMut<T> for DenseMatrix<T, R, C, L> {
    #[inline]
    fn value_mut(&mut self, row: usize, column: usize) -> &mut T {
        let offset = self.offset(row, column);
        &mut self.as_mut_slice()[offset]
    }

    #[inline]
    fn element_mut(&mut self, index: usize) -> &mut T {
        &mut self.as_mut_slice()[index]
    }

    #[inline]
    fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> + '_ {
        self.as_mut_slice().iter_mut()
    }

    #[inline]
    fn row_mut(&mut self, row: usize) -> VectorViewMut<'_, T, U1, C, L> {
        debug_assert!(row < self.rows(), "row {row} out of range");
        let (rows, columns) = (self.rows(), self.columns);
        let start = L::row_start(row, columns.value());
        let cursor = StrideCursorMut::new(self.as_mut_slice(), start, L::row_stride(rows));
        VectorViewMut::new(cursor, Const, columns)
    }

    #[inline]
    fn column_mut(&mut self, column: usize) -> VectorViewMut<'_, T, R, U1, L> {
        debug_assert!(column < self.columns(), "column {column} out of range");
        let (rows, columns) = (self.rows, self.columns());
        let start = L::column_start(column, rows.value());
        let cursor = StrideCursorMut::new(self.as_mut_slice(), start, L::column_stride(columns));
        VectorViewMut::new(cursor, rows, Const)
    }
}

impl<T: Scalar, R: Dim, C: Dim, L: Layout> Index<(usize, usize)> for DenseMatrix<T, R, C, L> {
    type Output = T;

    #[inline]
    fn index(&self, (row, column): (usize, usize)) -> &T {
        &self.as_slice()[self.offset(row, column)]
    }
}

impl<T: Scalar, R: Dim, C: Dim, L: Layout> IndexMut<(usize, usize)> for DenseMatrix<T, R, C, L> {
    #[inline]
    fn index_mut(&mut self, (row, column): (usize, usize)) -> &mut T {
        self.value_mut(row, column)
    }
}

impl<T: Scalar, R: Dim, C: Dim, L: Layout> Debug for DenseMatrix<T, R, C, L> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.all_rows()).finish()
    }
}

impl<T: Scalar, R: Dim, C: Dim, L: Layout> Display for DenseMatrix<T, R, C, L> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for row in self.all_rows() {
            writeln!(f, "[{}]", row.iter().format(", "))?;
        }
        Ok(())
    }
}
