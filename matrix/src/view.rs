//! Non-owning strided views into a matrix.
//!
//! Rows, columns and diagonals of a [`DenseMatrix`](crate::DenseMatrix) are exposed as vector
//! views: a [`StrideCursor`] at the first element plus the view's shape. A view borrows the
//! matrix it came from, so it can never outlive it, and writes through a [`VectorViewMut`] land in
//! the matrix's own buffer.

use core::fmt::{self, Debug, Formatter};
use core::marker::PhantomData;
use core::ops::{Index, IndexMut};

use smallmat_scalar::Scalar;

use crate::dim::{Const, Dim, U1};
use crate::layout::Layout;
use crate::stride::{StrideCursor, StrideCursorMut, StrideIter};
use crate::{Matrix, MatrixMut};

/// A read-only strided view with `R` rows and `C` columns, one of which is `1`.
///
/// Elements are addressed by their position along the view; `L` is the layout of the matrix the
/// view was taken from, carried so that results computed from the view keep it.
pub struct VectorView<'a, T, R: Dim, C: Dim, L: Layout> {
    cursor: StrideCursor<'a, T>,
    rows: R,
    columns: C,
    _layout: PhantomData<L>,
}

impl<T, R: Dim, C: Dim, L: Layout> Clone for VectorView<'_, T, R, C, L> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, R: Dim, C: Dim, L: Layout> Copy for VectorView<'_, T, R, C, L> {}

impl<'a, T: Scalar, R: Dim, C: Dim, L: Layout> VectorView<'a, T, R, C, L> {
    #[inline]
    pub(crate) fn new(cursor: StrideCursor<'a, T>, rows: R, columns: C) -> Self {
        debug_assert!(rows.value() == 1 || columns.value() == 1);
        Self {
            cursor,
            rows,
            columns,
            _layout: PhantomData,
        }
    }

    /// A cursor at the first element of the view.
    #[inline]
    pub fn cursor(&self) -> StrideCursor<'a, T> {
        self.cursor
    }

    /// References to the viewed elements, with the lifetime of the underlying matrix.
    #[inline]
    pub fn iter_refs(&self) -> StrideIter<'a, T> {
        self.cursor.iter(self.size())
    }

    #[inline]
    fn position(&self, row: usize, column: usize) -> usize {
        debug_assert!(row < self.rows(), "row {row} out of range");
        debug_assert!(column < self.columns(), "column {column} out of range");
        row * self.columns.value() + column
    }
}

impl<'a, T: Scalar, R: Dim, C: Dim, L: Layout> Matrix<T> for VectorView<'a, T, R, C, L> {
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
        *self.cursor.at(self.position(row, column))
    }

    #[inline]
    fn element(&self, index: usize) -> T {
        debug_assert!(index < self.size());
        *self.cursor.at(index)
    }

    #[inline]
    fn iter(&self) -> impl Iterator<Item = T> + '_ {
        self.iter_refs().copied()
    }

    #[inline]
    fn row(&self, row: usize) -> VectorView<'_, T, U1, C, L> {
        debug_assert!(row < self.rows());
        let cursor = self.cursor.subsequence(row * self.columns(), 1);
        VectorView::new(cursor, Const, self.columns)
    }

    #[inline]
    fn column(&self, column: usize) -> VectorView<'_, T, R, U1, L> {
        debug_assert!(column < self.columns());
        let cursor = self.cursor.subsequence(column, self.columns());
        VectorView::new(cursor, self.rows, Const)
    }
}

impl<T: Scalar, R: Dim, C: Dim, L: Layout> Index<usize> for VectorView<'_, T, R, C, L> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        debug_assert!(index < self.size());
        self.cursor.at(index)
    }
}

impl<T: Scalar, R: Dim, C: Dim, L: Layout> Debug for VectorView<'_, T, R, C, L> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter_refs()).finish()
    }
}

/// A strided view with write access.
///
/// Assigning through the view copies values into the matrix it borrows; the view itself is never
/// rebound.
pub struct VectorViewMut<'a, T, R: Dim, C: Dim, L: Layout> {
    cursor: StrideCursorMut<'a, T>,
    rows: R,
    columns: C,
    _layout: PhantomData<L>,
}

impl<'a, T: Scalar, R: Dim, C: Dim, L: Layout> VectorViewMut<'a, T, R, C, L> {
    #[inline]
    pub(crate) fn new(cursor: StrideCursorMut<'a, T>, rows: R, columns: C) -> Self {
        debug_assert!(rows.value() == 1 || columns.value() == 1);
        Self {
            cursor,
            rows,
            columns,
            _layout: PhantomData,
        }
    }

    #[inline]
    pub fn as_view(&self) -> VectorView<'_, T, R, C, L> {
        VectorView::new(self.cursor.as_const(), self.rows, self.columns)
    }

    #[inline]
    pub fn reborrow(&mut self) -> VectorViewMut<'_, T, R, C, L> {
        VectorViewMut::new(self.cursor.reborrow(), self.rows, self.columns)
    }

    #[inline]
    fn position(&self, row: usize, column: usize) -> usize {
        debug_assert!(row < self.rows(), "row {row} out of range");
        debug_assert!(column < self.columns(), "column {column} out of range");
        row * self.columns.value() + column
    }
}

impl<'a, T: Scalar, R: Dim, C: Dim, L: Layout> Matrix<T> for VectorViewMut<'a, T, R, C, L> {
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
        *self.cursor.at(self.position(row, column))
    }

    #[inline]
    fn element(&self, index: usize) -> T {
        debug_assert!(index < self.size());
        *self.cursor.at(index)
    }

    #[inline]
    fn iter(&self) -> impl Iterator<Item = T> + '_ {
        self.cursor.as_const().iter(self.size()).copied()
    }

    #[inline]
    fn row(&self, row: usize) -> VectorView<'_, T, U1, C, L> {
        debug_assert!(row < self.rows(), "row {row} out of range");
        let cursor = self.cursor.as_const().subsequence(row * self.columns(), 1);
        VectorView::new(cursor, Const, self.columns)
    }

    #[inline]
    fn column(&self, column: usize) -> VectorView<'_, T, R, U1, L> {
        debug_assert!(column < self.columns(), "column {column} out of range");
        let cursor = self.cursor.as_const().subsequence(column, self.columns());
        VectorView::new(cursor, self.rows, Const)
    }
}

impl<'a, T: Scalar, R: Dim, C: Dim, L: Layout> MatrixMut<T> for VectorViewMut<'a, T, R, C, L> {
    #[inline]
    fn value_mut(&mut self, row: usize, column: usize) -> &mut T {
        let index = self.position(row, column);
        self.cursor.at_mut(index)
    }

    #[inline]
    fn element_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(index < self.size());
        self.cursor.at_mut(index)
    }

    #[inline]
    fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> + '_ {
        let len = self.size();
        self.cursor.iter_mut(len)
    }

    #[inline]
    fn row_mut(&mut self, row: usize) -> VectorViewMut<'_, T, U1, C, L> {
        debug_assert!(row < self.rows());
        let columns = self.columns;
        let cursor = self.cursor.subsequence(row * columns.value(), 1);
        VectorViewMut::new(cursor, Const, columns)
    }

    #[inline]
    fn column_mut(&mut self, column: usize) -> VectorViewMut<'_, T, R, U1, L> {
        debug_assert!(column < self.columns());
        let (rows, columns) = (self.rows, self.columns.value());
        let cursor = self.cursor.subsequence(column, columns);
        VectorViewMut::new(cursor, rows, Const)
    }
}

impl<T: Scalar, R: Dim, C: Dim, L: Layout> Index<usize> for VectorViewMut<'_, T, R, C, L> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        debug_assert!(index < self.size());
        self.cursor.at(index)
    }
}

impl<T: Scalar, R: Dim, C: Dim, L: Layout> IndexMut<usize> for VectorViewMut<'_, T, R, C, L> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut T {
        self.element_mut(index)
    }
}

impl<T: Scalar, R: Dim, C: Dim, L: Layout> Debug for VectorViewMut<'_, T, R, C, L> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.as_view().fmt(f)
    }
}

/// Iterator over the rows of a matrix, front to back.
#[derive(Debug)]
pub struct RowIter<'a, T, M> {
    matrix: &'a M,
    front: usize,
    back: usize,
    _scalar: PhantomData<T>,
}

impl<'a, T: Scalar, M: Matrix<T>> RowIter<'a, T, M> {
    #[inline]
    pub(crate) fn new(matrix: &'a M) -> Self {
        Self {
            matrix,
            front: 0,
            back: matrix.rows(),
            _scalar: PhantomData,
        }
    }
}

impl<'a, T: Scalar, M: Matrix<T>> Iterator for RowIter<'a, T, M> {
    type Item = VectorView<'a, T, U1, M::Cols, M::Layout>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        (self.front < self.back).then(|| {
            self.front += 1;
            self.matrix.row(self.front - 1)
        })
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.back - self.front;
        (len, Some(len))
    }
}

impl<T: Scalar, M: Matrix<T>> DoubleEndedIterator for RowIter<'_, T, M> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        (self.front < self.back).then(|| {
            self.back -= 1;
            self.matrix.row(self.back)
        })
    }
}

impl<T: Scalar, M: Matrix<T>> ExactSizeIterator for RowIter<'_, T, M> {}

/// Iterator over the columns of a matrix, front to back.
#[derive(Debug)]
pub struct ColumnIter<'a, T, M> {
    matrix: &'a M,
    front: usize,
    back: usize,
    _scalar: PhantomData<T>,
}

impl<'a, T: Scalar, M: Matrix<T>> ColumnIter<'a, T, M> {
    #[inline]
    pub(crate) fn new(matrix: &'a M) -> Self {
        Self {
            matrix,
            front: 0,
            back: matrix.columns(),
            _scalar: PhantomData,
        }
    }
}

impl<'a, T: Scalar, M: Matrix<T>> Iterator for ColumnIter<'a, T, M> {
    type Item = VectorView<'a, T, M::Rows, U1, M::Layout>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        (self.front < self.back).then(|| {
            self.front += 1;
            self.matrix.column(self.front - 1)
        })
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.back - self.front;
        (len, Some(len))
    }
}

impl<T: Scalar, M: Matrix<T>> DoubleEndedIterator for ColumnIter<'_, T, M> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        (self.front < self.back).then(|| {
            self.back -= 1;
            self.matrix.column(self.back)
        })
    }
}

impl<T: Scalar, M: Matrix<T>> ExactSizeIterator for ColumnIter<'_, T, M> {}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;
    use alloc::vec::Vec;

    use super::*;
    use crate::{ColumnMajor, Matrix2, SMatrix};

    #[test]
    fn row_and_column_views_follow_layout() {
        let rm = SMatrix::<i32, 2, 3>::from_rows([[1, 2, 3], [4, 5, 6]]);
        let cm = rm.with_layout::<ColumnMajor>();
        for m in [rm.row(1).iter().collect::<Vec<_>>(), cm.row(1).iter().collect()] {
            assert_eq!(m, [4, 5, 6]);
        }
        assert_eq!(rm.column(2).iter().collect::<Vec<_>>(), [3, 6]);
        assert_eq!(cm.column(2).iter().collect::<Vec<_>>(), [3, 6]);
        assert_eq!(cm.row(0).cursor().stride(), 2);
        assert_eq!(rm.column(0).cursor().stride(), 3);
    }

    #[test]
    fn view_addressing() {
        let m = SMatrix::<u8, 3, 2>::from_rows([[1, 2], [3, 4], [5, 6]]);
        let column = m.column(1);
        assert_eq!(column.dimensions().to_string(), "3x1");
        assert_eq!(column.value(2, 0), 6);
        assert_eq!(column[1], 4);
        assert_eq!(column.front(), 2);
        assert_eq!(column.back(), 6);
        assert_eq!(column.row(1).iter().collect::<Vec<_>>(), [4]);
        assert_eq!(column.column(0).iter().collect::<Vec<_>>(), [2, 4, 6]);
    }

    #[test]
    fn mutable_views_write_through() {
        let mut m = Matrix2::<f64>::from_rows([[1.0, 2.0], [3.0, 4.0]]);
        m.row_mut(0).fill(9.0);
        *m.column_mut(1).value_mut(1, 0) = -1.0;
        m.column_mut(0)[1] *= 2.0;
        assert_eq!(m, Matrix2::from_rows([[9.0, 9.0], [6.0, -1.0]]));
    }

    #[test]
    fn mutable_views_read_rows_and_columns() {
        let mut m = SMatrix::<i32, 3, 2, ColumnMajor>::from_rows([[1, 2], [3, 4], [5, 6]]);
        let mut column = m.column_mut(1);
        assert_eq!(column.column(0).iter().collect::<Vec<_>>(), [2, 4, 6]);
        assert_eq!(column.row(2).iter().collect::<Vec<_>>(), [6]);
        let first = column.row(0);
        assert_eq!(first.front(), 2);
        column.fill(0);

        let row = m.row_mut(2);
        assert_eq!(row.row(0).iter().collect::<Vec<_>>(), [5, 0]);
        assert_eq!(row.column(0).iter().collect::<Vec<_>>(), [5]);
        assert_eq!(row.as_view().row(0).cursor().stride(), 3);
    }

    #[test]
    fn row_and_column_iterators() {
        let m = SMatrix::<i64, 2, 3>::from_rows([[1, 2, 3], [4, 5, 6]]);
        let row_sums: Vec<i64> = m.all_rows().map(|r| r.iter().sum()).collect();
        assert_eq!(row_sums, [6, 15]);
        let col_sums: Vec<i64> = m.all_columns().rev().map(|c| c.iter().sum()).collect();
        assert_eq!(col_sums, [9, 7, 5]);
        assert_eq!(m.all_columns().len(), 3);
    }

    #[test]
    fn debug_prints_elements() {
        let m = SMatrix::<i32, 2, 2>::from_rows([[1, 2], [3, 4]]);
        assert_eq!(alloc::format!("{:?}", m.column(1)), "[2, 4]");
    }
}
