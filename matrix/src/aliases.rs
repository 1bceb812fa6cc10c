use crate::dense::DenseMatrix;
use crate::dim::{Const, Dyn, U1, U2, U3, U4};
use crate::layout::RowMajor;

/// A matrix with fixed extents, stored inline.
pub type SMatrix<T, const R: usize, const C: usize, L = RowMajor> =
    DenseMatrix<T, Const<R>, Const<C>, L>;

/// A matrix with both extents chosen at runtime, stored on the heap.
pub type DMatrix<T, L = RowMajor> = DenseMatrix<T, Dyn, Dyn, L>;

pub type SVector<T, const N: usize, L = RowMajor> = DenseMatrix<T, Const<N>, U1, L>;
pub type SRowVector<T, const N: usize, L = RowMajor> = DenseMatrix<T, U1, Const<N>, L>;
pub type DVector<T, L = RowMajor> = DenseMatrix<T, Dyn, U1, L>;
pub type RowDVector<T, L = RowMajor> = DenseMatrix<T, U1, Dyn, L>;

pub type Matrix2<T = f64> = DenseMatrix<T, U2, U2>;
pub type Matrix3<T = f64> = DenseMatrix<T, U3, U3>;
pub type Matrix4<T = f64> = DenseMatrix<T, U4, U4>;

pub type Vector2<T = f64> = DenseMatrix<T, U2, U1>;
pub type Vector3<T = f64> = DenseMatrix<T, U3, U1>;
pub type Vector4<T = f64> = DenseMatrix<T, U4, U1>;

pub type RowVector2<T = f64> = DenseMatrix<T, U1, U2>;
pub type RowVector3<T = f64> = DenseMatrix<T, U1, U3>;
pub type RowVector4<T = f64> = DenseMatrix<T, U1, U4>;

pub type Matrix2f = Matrix2<f32>;
pub type Matrix3f = Matrix3<f32>;
pub type Matrix4f = Matrix4<f32>;
pub type Vector2f = Vector2<f32>;
pub type Vector3f = Vector3<f32>;
pub type Vector4f = Vector4<f32>;

pub type Matrix2i = Matrix2<i32>;
pub type Matrix3i = Matrix3<i32>;
pub type Matrix4i = Matrix4<i32>;
pub type Vector2i = Vector2<i32>;
pub type Vector3i = Vector3<i32>;
pub type Vector4i = Vector4<i32>;
