//! Vector algebra for matrices and views with a single row or column.

use itertools::Itertools;
use num_traits::Float;
use smallmat_scalar::{RealScalar, Scalar};

use crate::dense::DenseMatrix;
use crate::dim::Dim;
use crate::layout::Layout;
use crate::shape::{HasCross, HasW, HasXY, HasZ, VectorShape};
use crate::view::{VectorView, VectorViewMut};
use crate::{Matrix, MatrixMut};

/// A matrix or view with exactly one row or exactly one column.
///
/// Two vectors can be combined when their lengths share an extent, whatever their orientation.
pub trait Vector<T: Scalar>: Matrix<T> + Sized {
    /// The number of elements, as an extent.
    type Len: Dim;

    #[inline]
    fn len_dim(&self) -> Self::Len {
        Self::Len::from_usize(self.size())
    }

    fn dot<V: Vector<T, Len = Self::Len>>(&self, other: &V) -> T {
        debug_assert_eq!(self.size(), other.size());
        self.iter()
            .zip_eq(other.iter())
            .map(|(a, b)| a * b)
            .sum()
    }

    fn norm_squared(&self) -> T::Real {
        self.dot(self).to_real()
    }

    fn norm(&self) -> T::Real {
        self.norm_squared().sqrt()
    }

    /// A copy scaled to unit length, in `T::Real`.
    fn normalized(&self) -> DenseMatrix<T::Real, Self::Rows, Self::Cols, Self::Layout> {
        let norm = self.norm();
        DenseMatrix::from_fn_generic(self.row_dim(), self.col_dim(), |r, c| {
            self.value(r, c).to_real() / norm
        })
    }

    /// The cross product, shaped like `self`.
    fn cross<V>(&self, other: &V) -> DenseMatrix<T, Self::Rows, Self::Cols, Self::Layout>
    where
        V: Vector<T, Len = Self::Len>,
        Self::Len: HasCross,
    {
        let (a, b) = (|i| self.element(i), |i| other.element(i));
        let product = [
            a(1) * b(2) - a(2) * b(1),
            a(2) * b(0) - a(0) * b(2),
            a(0) * b(1) - a(1) * b(0),
        ];
        DenseMatrix::from_fn_generic(self.row_dim(), self.col_dim(), |r, c| product[r + c])
    }

    #[inline]
    fn x(&self) -> T
    where
        Self::Len: HasXY,
    {
        self.element(0)
    }

    #[inline]
    fn y(&self) -> T
    where
        Self::Len: HasXY,
    {
        self.element(1)
    }

    #[inline]
    fn z(&self) -> T
    where
        Self::Len: HasZ,
    {
        self.element(2)
    }

    #[inline]
    fn w(&self) -> T
    where
        Self::Len: HasW,
    {
        self.element(3)
    }
}

/// Write access to a [`Vector`].
pub trait VectorMut<T: Scalar>: Vector<T> + MatrixMut<T> {
    /// Scale to unit length in place.
    fn normalize(&mut self)
    where
        T: RealScalar,
    {
        let norm = self.norm();
        self.iter_mut().for_each(|x| *x /= norm);
    }

    #[inline]
    fn x_mut(&mut self) -> &mut T
    where
        Self::Len: HasXY,
    {
        self.element_mut(0)
    }

    #[inline]
    fn y_mut(&mut self) -> &mut T
    where
        Self::Len: HasXY,
    {
        self.element_mut(1)
    }

    #[inline]
    fn z_mut(&mut self) -> &mut T
    where
        Self::Len: HasZ,
    {
        self.element_mut(2)
    }

    #[inline]
    fn w_mut(&mut self) -> &mut T
    where
        Self::Len: HasW,
    {
        self.element_mut(3)
    }
}

impl<T: Scalar, V: Vector<T> + MatrixMut<T>> VectorMut<T> for V {}

impl<T: Scalar, R: Dim, C: Dim, L: Layout> Vector<T> for DenseMatrix<T, R, C, L>
where
    (R, C): VectorShape,
{
    type Len = <(R, C) as VectorShape>::Len;
}

impl<T: Scalar, R: Dim, C: Dim, L: Layout> Vector<T> for VectorView<'_, T, R, C, L>
where
    (R, C): VectorShape,
{
    type Len = <(R, C) as VectorShape>::Len;
}

impl<T: Scalar, R: Dim, C: Dim, L: Layout> Vector<T> for VectorViewMut<'_, T, R, C, L>
where
    (R, C): VectorShape,
{
    type Len = <(R, C) as VectorShape>::Len;
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::{
        ColumnMajor, DVector, Matrix3, RowDVector, RowVector3, SMatrix, U3, Vector2, Vector3,
        Vector4,
    };

    #[test]
    fn dot_of_orthogonal_axes() {
        let x = Vector3::new(1.0, 0.0, 0.0);
        let y = Vector3::new(0.0, 1.0, 0.0);
        assert_eq!(x.dot(&y), 0.0);
    }

    #[test]
    fn longest_fixed_vectors_in_both_orientations() {
        let column = SMatrix::<i64, 16, 1>::from_fn(|r, _| r as i64);
        let row = SMatrix::<i64, 1, 16>::from_fn(|_, c| c as i64);
        assert_eq!(column.len_dim(), row.len_dim());
        assert_eq!(column.dot(&row), 1240);
        assert_eq!(row.dot(&row), column.dot(&column));
        assert_eq!(SMatrix::<i64, 1, 1>::from_fn(|_, _| 3).norm_squared(), 9.0);
    }

    #[test]
    fn cross_of_axes() {
        let x = Vector3::new(1.0, 0.0, 0.0);
        let y = Vector3::new(0.0, 1.0, 0.0);
        assert_eq!(x.cross(&y), Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(y.cross(&x), Vector3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn cross_keeps_receiver_orientation() {
        let a = RowVector3::<i32>::new(1, 2, 3);
        let b = Vector3::<i32>::new(4, 5, 6);
        let c = a.cross(&b);
        assert_eq!(c, RowVector3::new(-3, 6, -3));
        assert_eq!(b.cross(&a), Vector3::new(3, -6, 3));
    }

    #[test]
    fn dot_mixes_orientation_and_views() {
        let m = Matrix3::<i32>::from_rows([[1, 2, 3], [4, 5, 6], [7, 8, 9]]);
        let row = m.row(0);
        let column = m.column(2);
        assert_eq!(row.dot(&column), 3 + 2 * 6 + 3 * 9);
        assert_eq!(row.len_dim(), U3::default());
        assert_eq!(Vector3::new(1, 1, 1).dot(&m.diagonal()), 15);
    }

    #[test]
    fn dynamic_vectors() {
        let a = DVector::<f64>::from_row_major(&[3.0, 4.0]);
        let b = RowDVector::<f64>::from_row_major(&[1.0, 2.0]);
        assert_eq!(a.dot(&b), 11.0);
        assert_eq!(a.norm(), 5.0);
        assert_eq!(a.len_dim().value(), 2);
    }

    #[test]
    fn integer_norm_is_promoted() {
        let v = Vector2::<i32>::new(3, 4);
        let n: f64 = v.norm();
        assert_eq!(n, 5.0);
        assert_eq!(v.normalized(), Vector2::new(0.6, 0.8));
    }

    #[test]
    fn normalize_in_place() {
        let mut v = Vector4::<f64>::new(2.0, 0.0, 0.0, 0.0);
        v.normalize();
        assert_eq!(v, Vector4::new(1.0, 0.0, 0.0, 0.0));

        let mut m = SMatrix::<f64, 2, 2, ColumnMajor>::from_rows([[3.0, 1.0], [4.0, 1.0]]);
        m.column_mut(0).normalize();
        assert_eq!(m.column(0).iter().collect::<alloc::vec::Vec<_>>(), [0.6, 0.8]);
        assert_eq!(m.value(1, 1), 1.0);
    }

    #[test]
    fn named_accessors() {
        let mut v = Vector4::<i32>::new(1, 2, 3, 4);
        assert_eq!((v.x(), v.y(), v.z(), v.w()), (1, 2, 3, 4));
        *v.w_mut() = 40;
        *v.x_mut() += 10;
        assert_eq!(v, Vector4::new(11, 2, 3, 40));

        let mut m = Matrix3::<i32>::identity();
        *m.row_mut(2).z_mut() = 7;
        assert_eq!(m.row(2).z(), 7);
        assert_eq!(m.column(0).x(), 1);
    }

    proptest! {
        #[test]
        fn dot_and_norm_agree(v in prop::array::uniform4(-100.0f64..100.0)) {
            let v = Vector4::from_array(v);
            prop_assert_eq!(v.dot(&v), v.norm_squared());
            prop_assert_eq!(v.norm(), v.norm_squared().sqrt());
        }

        #[test]
        fn cross_is_orthogonal(
            a in prop::array::uniform3(-10.0f64..10.0),
            b in prop::array::uniform3(-10.0f64..10.0),
        ) {
            let (a, b) = (Vector3::from_array(a), Vector3::from_array(b));
            let c = a.cross(&b);
            let scale = 1.0 + a.norm_squared() * b.norm();
            prop_assert!(c.dot(&a).abs() <= 1e-12 * scale);
            prop_assert!(c.dot(&b).abs() <= 1e-12 * scale);
        }

        #[test]
        fn normalized_has_unit_norm(v in prop::array::uniform3(1.0f64..50.0)) {
            let n = Vector3::from_array(v).normalized().norm();
            prop_assert!((n - 1.0).abs() < 1e-12);
        }
    }
}
