//! Errors for building matrices from runtime data.

use core::fmt;

use thiserror::Error;

/// One of the two axes of a matrix.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    Rows,
    Columns,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rows => f.write_str("row"),
            Self::Columns => f.write_str("column"),
        }
    }
}

/// Error type for constructing a matrix from a runtime shape and values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatrixError {
    /// The number of values does not match `rows * columns`.
    #[error("expected {expected} values for the requested shape, got {actual}")]
    LengthMismatch {
        /// `rows * columns` of the requested shape
        expected: usize,
        /// Number of values supplied
        actual: usize,
    },

    /// The requested extent disagrees with an extent fixed by the matrix type.
    #[error("the {axis} count of this matrix type is fixed at {expected}, got {actual}")]
    FixedExtentMismatch {
        axis: Axis,
        expected: usize,
        actual: usize,
    },

    /// `rows * columns` does not fit in a `usize`.
    #[error("a {rows}x{columns} matrix has more elements than fit in memory")]
    ShapeOverflow { rows: usize, columns: usize },
}

pub type MatrixResult<T> = Result<T, MatrixError>;
