//! Small dense matrices and vectors with fixed or dynamic extents.

#![no_std]

extern crate alloc;

use core::fmt::{self, Display, Formatter};

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use smallmat_scalar::Scalar;
use tracing::instrument;

mod aliases;
pub mod dense;
pub mod dim;
pub mod error;
pub mod layout;
pub mod ops;
mod serialization;
pub mod shape;
pub mod square;
pub mod storage;
pub mod stride;
pub mod vector;
pub mod view;

pub use aliases::*;
pub use dense::DenseMatrix;
pub use dim::{Const, Dim, Dyn, U1, U2, U3, U4};
pub use error::{Axis, MatrixError, MatrixResult};
pub use layout::{ColumnMajor, Layout, RowMajor, StorageOrder};
pub use ops::mul_matrix;
pub use shape::{Compatible, HasCross, HasW, HasXY, HasZ, SquareDim, VectorShape};
pub use square::ClosedFormDim;
pub use vector::{Vector, VectorMut};
pub use view::{ColumnIter, RowIter, VectorView, VectorViewMut};

/// The runtime row and column counts of a matrix.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    pub rows: usize,
    pub columns: usize,
}

impl Display for Dimensions {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.columns)
    }
}

/// Read access to a two-dimensional arrangement of scalars.
///
/// Implemented by the owning [`DenseMatrix`] and by the [`VectorView`]s taken from it, so
/// algorithms written against this trait work on both.
pub trait Matrix<T: Scalar> {
    type Rows: Dim;
    type Cols: Dim;
    /// The layout of the storage backing this matrix.
    type Layout: Layout;

    fn row_dim(&self) -> Self::Rows;

    fn col_dim(&self) -> Self::Cols;

    /// The value at `(row, column)`.
    fn value(&self, row: usize, column: usize) -> T;

    /// The value at `index` in storage order.
    fn element(&self, index: usize) -> T;

    /// All values in storage order.
    fn iter(&self) -> impl Iterator<Item = T> + '_;

    fn row(&self, row: usize) -> VectorView<'_, T, U1, Self::Cols, Self::Layout>;

    fn column(&self, column: usize) -> VectorView<'_, T, Self::Rows, U1, Self::Layout>;

    #[inline]
    fn rows(&self) -> usize {
        self.row_dim().value()
    }

    #[inline]
    fn columns(&self) -> usize {
        self.col_dim().value()
    }

    #[inline]
    fn size(&self) -> usize {
        self.rows() * self.columns()
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.size() == 0
    }

    #[inline]
    fn dimensions(&self) -> Dimensions {
        Dimensions {
            rows: self.rows(),
            columns: self.columns(),
        }
    }

    /// Whether this matrix has a single row or a single column.
    #[inline]
    fn is_vector(&self) -> bool {
        self.rows() == 1 || self.columns() == 1
    }

    #[inline]
    fn front(&self) -> T {
        debug_assert!(!self.is_empty(), "front of an empty matrix");
        self.element(0)
    }

    #[inline]
    fn back(&self) -> T {
        debug_assert!(!self.is_empty(), "back of an empty matrix");
        self.element(self.size() - 1)
    }

    /// The value at position `index` when the matrix is read row by row, regardless of layout.
    #[inline]
    fn logical_element(&self, index: usize) -> T {
        let columns = self.columns();
        self.value(index / columns, index % columns)
    }

    /// All values read row by row, regardless of layout.
    fn iter_row_major(&self) -> impl Iterator<Item = T> + '_ {
        (0..self.rows())
            .cartesian_product(0..self.columns())
            .map(move |(r, c)| self.value(r, c))
    }

    fn all_rows(&self) -> RowIter<'_, T, Self>
    where
        Self: Sized,
    {
        RowIter::new(self)
    }

    fn all_columns(&self) -> ColumnIter<'_, T, Self>
    where
        Self: Sized,
    {
        ColumnIter::new(self)
    }

    /// A new matrix with rows and columns swapped, in the same layout.
    #[instrument(level = "debug", skip_all, fields(dims = %self.dimensions()))]
    fn transposed(&self) -> DenseMatrix<T, Self::Cols, Self::Rows, Self::Layout> {
        DenseMatrix::from_fn_generic(self.col_dim(), self.row_dim(), |r, c| self.value(c, r))
    }

    /// Copy the values into an owning matrix of the same shape and layout.
    fn to_dense(&self) -> DenseMatrix<T, Self::Rows, Self::Cols, Self::Layout> {
        DenseMatrix::from_fn_generic(self.row_dim(), self.col_dim(), |r, c| self.value(r, c))
    }
}

/// Write access on top of [`Matrix`].
pub trait MatrixMut<T: Scalar>: Matrix<T> {
    fn value_mut(&mut self, row: usize, column: usize) -> &mut T;

    /// The value at `index` in storage order.
    fn element_mut(&mut self, index: usize) -> &mut T;

    /// All values in storage order.
    fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> + '_;

    fn row_mut(&mut self, row: usize) -> VectorViewMut<'_, T, U1, Self::Cols, Self::Layout>;

    fn column_mut(&mut self, column: usize) -> VectorViewMut<'_, T, Self::Rows, U1, Self::Layout>;

    #[inline]
    fn logical_element_mut(&mut self, index: usize) -> &mut T {
        let columns = self.columns();
        self.value_mut(index / columns, index % columns)
    }

    fn fill(&mut self, value: T) {
        self.iter_mut().for_each(|x| *x = value);
    }

    /// Copy every value of `source` into `self`.
    ///
    /// The two shapes must be compatible and, at runtime, hold the same number of rows and
    /// columns (or, for a row and a column vector, the same length).
    fn assign<M>(&mut self, source: &M)
    where
        M: Matrix<T>,
        (Self::Rows, Self::Cols): Compatible<(M::Rows, M::Cols)>,
    {
        debug_assert_compatible(self, source);
        for i in 0..self.size() {
            *self.logical_element_mut(i) = source.logical_element(i);
        }
    }

    /// Multiply every value by `factor`.
    fn scale(&mut self, factor: T) {
        self.iter_mut().for_each(|x| *x *= factor);
    }
}

/// Check, in debug builds, that two operands of an elementwise operation line up.
#[inline]
pub(crate) fn debug_assert_compatible<T, A, B>(lhs: &A, rhs: &B)
where
    T: Scalar,
    A: Matrix<T> + ?Sized,
    B: Matrix<T> + ?Sized,
{
    debug_assert!(
        lhs.dimensions() == rhs.dimensions()
            || (lhs.is_vector() && rhs.is_vector() && lhs.size() == rhs.size()),
        "incompatible dimensions {} and {}",
        lhs.dimensions(),
        rhs.dimensions()
    );
}
