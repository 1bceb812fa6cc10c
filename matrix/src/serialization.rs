//! Serde support for [`DenseMatrix`].
//!
//! A matrix is written as its shape plus its values in row-major order, so a matrix can be read
//! back in any layout and with any mix of fixed and dynamic extents that fits the shape.

use alloc::vec::Vec;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use smallmat_scalar::Scalar;

use crate::dense::DenseMatrix;
use crate::dim::Dim;
use crate::layout::Layout;
use crate::Matrix;

#[derive(Serialize, Deserialize)]
struct RawMatrix<T> {
    rows: usize,
    columns: usize,
    values: Vec<T>,
}

impl<T, R, C, L> Serialize for DenseMatrix<T, R, C, L>
where
    T: Scalar + Serialize,
    R: Dim,
    C: Dim,
    L: Layout,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        RawMatrix {
            rows: self.rows(),
            columns: self.columns(),
            values: self.iter_row_major().collect(),
        }
        .serialize(serializer)
    }
}

impl<'de, T, R, C, L> Deserialize<'de> for DenseMatrix<T, R, C, L>
where
    T: Scalar + Deserialize<'de>,
    R: Dim,
    C: Dim,
    L: Layout,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawMatrix::<T>::deserialize(deserializer)?;
        Self::try_from_row_major(raw.rows, raw.columns, &raw.values).map_err(D::Error::custom)
    }
}
