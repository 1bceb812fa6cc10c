//! Mapping logical `(row, column)` coordinates to storage offsets.

use core::fmt::Debug;

use serde::{Deserialize, Serialize};

/// The runtime description of a storage order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StorageOrder {
    RowMajor,
    ColumnMajor,
}

impl StorageOrder {
    /// The storage offset of `(row, column)` in a `rows x columns` matrix.
    #[inline]
    pub const fn offset(self, row: usize, column: usize, rows: usize, columns: usize) -> usize {
        match self {
            Self::RowMajor => row * columns + column,
            Self::ColumnMajor => row + column * rows,
        }
    }

    /// The logical coordinates of the element at storage offset `index`.
    #[inline]
    pub const fn position(self, index: usize, rows: usize, columns: usize) -> (usize, usize) {
        match self {
            Self::RowMajor => (index / columns, index % columns),
            Self::ColumnMajor => (index % rows, index / rows),
        }
    }

    /// Distance in storage between consecutive elements of a row.
    #[inline]
    pub const fn row_stride(self, rows: usize) -> usize {
        match self {
            Self::RowMajor => 1,
            Self::ColumnMajor => rows,
        }
    }

    /// Distance in storage between consecutive elements of a column.
    #[inline]
    pub const fn column_stride(self, columns: usize) -> usize {
        match self {
            Self::RowMajor => columns,
            Self::ColumnMajor => 1,
        }
    }
}

/// A storage order fixed at the type level.
pub trait Layout: Copy + Debug + Default + PartialEq + Eq + Send + Sync + 'static {
    const ORDER: StorageOrder;

    #[inline]
    fn offset(row: usize, column: usize, rows: usize, columns: usize) -> usize {
        debug_assert!(row < rows, "row {row} out of range for {rows} rows");
        debug_assert!(column < columns, "column {column} out of range for {columns} columns");
        Self::ORDER.offset(row, column, rows, columns)
    }

    #[inline]
    fn position(index: usize, rows: usize, columns: usize) -> (usize, usize) {
        debug_assert!(index < rows * columns);
        Self::ORDER.position(index, rows, columns)
    }

    /// Storage offset of the first element of row `row`.
    #[inline]
    fn row_start(row: usize, columns: usize) -> usize {
        Self::ORDER.offset(row, 0, 0, columns)
    }

    /// Storage offset of the first element of column `column`.
    #[inline]
    fn column_start(column: usize, rows: usize) -> usize {
        Self::ORDER.offset(0, column, rows, 0)
    }

    #[inline]
    fn row_stride(rows: usize) -> usize {
        Self::ORDER.row_stride(rows)
    }

    #[inline]
    fn column_stride(columns: usize) -> usize {
        Self::ORDER.column_stride(columns)
    }
}

/// Consecutive elements of a row are adjacent in storage.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct RowMajor;

/// Consecutive elements of a column are adjacent in storage.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ColumnMajor;

impl Layout for RowMajor {
    const ORDER: StorageOrder = StorageOrder::RowMajor;
}

impl Layout for ColumnMajor {
    const ORDER: StorageOrder = StorageOrder::ColumnMajor;
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use itertools::Itertools;

    use super::*;

    fn offsets<L: Layout>(rows: usize, columns: usize) -> Vec<usize> {
        (0..rows)
            .cartesian_product(0..columns)
            .map(|(r, c)| L::offset(r, c, rows, columns))
            .collect()
    }

    #[test]
    fn row_major_offsets() {
        assert_eq!(offsets::<RowMajor>(2, 3), [0, 1, 2, 3, 4, 5]);
        assert_eq!(RowMajor::row_start(1, 3), 3);
        assert_eq!(RowMajor::column_start(2, 2), 2);
        assert_eq!(RowMajor::row_stride(2), 1);
        assert_eq!(RowMajor::column_stride(3), 3);
    }

    #[test]
    fn column_major_offsets() {
        assert_eq!(offsets::<ColumnMajor>(2, 3), [0, 2, 4, 1, 3, 5]);
        assert_eq!(ColumnMajor::row_start(1, 3), 1);
        assert_eq!(ColumnMajor::column_start(2, 2), 4);
        assert_eq!(ColumnMajor::row_stride(2), 2);
        assert_eq!(ColumnMajor::column_stride(3), 1);
    }

    #[test]
    fn offsets_are_a_permutation() {
        for (rows, columns) in [(1, 1), (3, 1), (1, 4), (3, 5), (4, 4)] {
            for order in [offsets::<RowMajor>(rows, columns), offsets::<ColumnMajor>(rows, columns)] {
                let sorted = order.into_iter().sorted().collect_vec();
                assert_eq!(sorted, (0..rows * columns).collect_vec());
            }
        }
    }

    #[test]
    fn position_inverts_offset() {
        for (r, c) in (0..3).cartesian_product(0..4) {
            let i = ColumnMajor::offset(r, c, 3, 4);
            assert_eq!(ColumnMajor::position(i, 3, 4), (r, c));
            let j = RowMajor::offset(r, c, 3, 4);
            assert_eq!(RowMajor::position(j, 3, 4), (r, c));
        }
    }
}
