//! Arithmetic operators on matrices and views.
//!
//! Elementwise operations pair values by their logical position, so operands may differ in layout,
//! and a row vector may be combined with a column vector of the same length. Results take the
//! shape and layout of the left operand.

use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use itertools::Itertools;
use smallmat_scalar::{Scalar, SignedScalar};
use tracing::instrument;

use crate::dense::DenseMatrix;
use crate::dim::{Dim, U1};
use crate::layout::Layout;
use crate::shape::Compatible;
use crate::view::{VectorView, VectorViewMut};
use crate::{Matrix, MatrixMut, debug_assert_compatible};

/// The product `lhs * rhs`, laid out like `lhs`.
///
/// The inner extents must agree: statically when both are fixed, and at runtime otherwise.
#[instrument(level = "debug", skip_all, fields(lhs = %lhs.dimensions(), rhs = %rhs.dimensions()))]
pub fn mul_matrix<T, A, B>(lhs: &A, rhs: &B) -> DenseMatrix<T, A::Rows, B::Cols, A::Layout>
where
    T: Scalar,
    A: Matrix<T> + ?Sized,
    B: Matrix<T, Rows = A::Cols> + ?Sized,
{
    debug_assert_eq!(
        lhs.columns(),
        rhs.rows(),
        "inner extents differ: {} and {}",
        lhs.dimensions(),
        rhs.dimensions()
    );
    DenseMatrix::from_fn_generic(lhs.row_dim(), rhs.col_dim(), |r, c| {
        let (row, column) = (lhs.row(r), rhs.column(c));
        row.iter_refs()
            .zip_eq(column.iter_refs())
            .map(|(&a, &b)| a * b)
            .sum()
    })
}

/// Apply `f` to each value of `lhs` and the value of `rhs` at the same logical position.
fn zip_assign<T, A, B, F>(lhs: &mut A, rhs: &B, mut f: F)
where
    T: Scalar,
    A: MatrixMut<T> + ?Sized,
    B: Matrix<T> + ?Sized,
    F: FnMut(&mut T, T),
{
    debug_assert_compatible(&*lhs, rhs);
    for i in 0..lhs.size() {
        f(lhs.logical_element_mut(i), rhs.logical_element(i));
    }
}

impl<'b, T, R, K, L, M> Mul<&'b M> for &DenseMatrix<T, R, K, L>
where
    T: Scalar,
    R: Dim,
    K: Dim,
    L: Layout,
    M: Matrix<T, Rows = K>,
{
    type Output = DenseMatrix<T, R, M::Cols, L>;

    #[inline]
    fn mul(self, rhs: &'b M) -> Self::Output {
        mul_matrix(self, rhs)
    }
}

impl<'b, T, R, K, L, M> Mul<&'b M> for DenseMatrix<T, R, K, L>
where
    T: Scalar,
    R: Dim,
    K: Dim,
    L: Layout,
    M: Matrix<T, Rows = K>,
{
    type Output = DenseMatrix<T, R, M::Cols, L>;

    #[inline]
    fn mul(self, rhs: &'b M) -> Self::Output {
        mul_matrix(&self, rhs)
    }
}

impl<T, R, K, C, L, L2> Mul<DenseMatrix<T, K, C, L2>> for DenseMatrix<T, R, K, L>
where
    T: Scalar,
    R: Dim,
    K: Dim,
    C: Dim,
    L: Layout,
    L2: Layout,
{
    type Output = DenseMatrix<T, R, C, L>;

    #[inline]
    fn mul(self, rhs: DenseMatrix<T, K, C, L2>) -> Self::Output {
        mul_matrix(&self, &rhs)
    }
}

impl<'b, T, R, K, L, M> Mul<&'b M> for VectorView<'_, T, R, K, L>
where
    T: Scalar,
    R: Dim,
    K: Dim,
    L: Layout,
    M: Matrix<T, Rows = K>,
{
    type Output = DenseMatrix<T, R, M::Cols, L>;

    #[inline]
    fn mul(self, rhs: &'b M) -> Self::Output {
        mul_matrix(&self, rhs)
    }
}

/// Right-multiply by a square matrix, one row at a time.
impl<'b, T, R, C, L, M> MulAssign<&'b M> for DenseMatrix<T, R, C, L>
where
    T: Scalar,
    R: Dim,
    C: Dim,
    L: Layout,
    M: Matrix<T, Rows = C, Cols = C>,
{
    fn mul_assign(&mut self, rhs: &'b M) {
        for r in 0..self.rows() {
            let product: DenseMatrix<T, U1, C, L> = mul_matrix(&self.row(r), rhs);
            self.row_mut(r).assign(&product);
        }
    }
}

macro_rules! impl_elementwise {
    ($op_trait:ident, $op:ident, $assign_trait:ident, $assign:ident) => {
        impl<'b, T, R, C, L, M> $assign_trait<&'b M> for DenseMatrix<T, R, C, L>
        where
            T: Scalar,
            R: Dim,
            C: Dim,
            L: Layout,
            M: Matrix<T>,
            (R, C): Compatible<(M::Rows, M::Cols)>,
        {
            #[inline]
            fn $assign(&mut self, rhs: &'b M) {
                zip_assign(self, rhs, |a, b| a.$assign(b));
            }
        }

        impl<'b, T, R, C, L, M> $assign_trait<&'b M> for VectorViewMut<'_, T, R, C, L>
        where
            T: Scalar,
            R: Dim,
            C: Dim,
            L: Layout,
            M: Matrix<T>,
            (R, C): Compatible<(M::Rows, M::Cols)>,
        {
            #[inline]
            fn $assign(&mut self, rhs: &'b M) {
                zip_assign(self, rhs, |a, b| a.$assign(b));
            }
        }

        impl<'b, T, R, C, L, M> $op_trait<&'b M> for DenseMatrix<T, R, C, L>
        where
            T: Scalar,
            R: Dim,
            C: Dim,
            L: Layout,
            M: Matrix<T>,
            (R, C): Compatible<(M::Rows, M::Cols)>,
        {
            type Output = Self;

            #[inline]
            fn $op(mut self, rhs: &'b M) -> Self {
                self.$assign(rhs);
                self
            }
        }

        impl<'b, T, R, C, L, M> $op_trait<&'b M> for &DenseMatrix<T, R, C, L>
        where
            T: Scalar,
            R: Dim,
            C: Dim,
            L: Layout,
            M: Matrix<T>,
            (R, C): Compatible<(M::Rows, M::Cols)>,
        {
            type Output = DenseMatrix<T, R, C, L>;

            #[inline]
            fn $op(self, rhs: &'b M) -> Self::Output {
                self.clone().$op(rhs)
            }
        }

        impl<T, R, C, L, R2, C2, L2> $op_trait<DenseMatrix<T, R2, C2, L2>>
            for DenseMatrix<T, R, C, L>
        where
            T: Scalar,
            R: Dim,
            C: Dim,
            L: Layout,
            R2: Dim,
            C2: Dim,
            L2: Layout,
            (R, C): Compatible<(R2, C2)>,
        {
            type Output = Self;

            #[inline]
            fn $op(self, rhs: DenseMatrix<T, R2, C2, L2>) -> Self {
                self.$op(&rhs)
            }
        }

        impl<'b, T, R, C, L, M> $op_trait<&'b M> for VectorView<'_, T, R, C, L>
        where
            T: Scalar,
            R: Dim,
            C: Dim,
            L: Layout,
            M: Matrix<T>,
            (R, C): Compatible<(M::Rows, M::Cols)>,
        {
            type Output = DenseMatrix<T, R, C, L>;

            #[inline]
            fn $op(self, rhs: &'b M) -> Self::Output {
                self.to_dense().$op(rhs)
            }
        }
    };
}

impl_elementwise!(Add, add, AddAssign, add_assign);
impl_elementwise!(Sub, sub, SubAssign, sub_assign);

impl<T: SignedScalar, R: Dim, C: Dim, L: Layout> Neg for DenseMatrix<T, R, C, L> {
    type Output = Self;

    #[inline]
    fn neg(mut self) -> Self {
        self.iter_mut().for_each(|x| *x = -*x);
        self
    }
}

impl<T: SignedScalar, R: Dim, C: Dim, L: Layout> Neg for &DenseMatrix<T, R, C, L> {
    type Output = DenseMatrix<T, R, C, L>;

    #[inline]
    fn neg(self) -> Self::Output {
        self.map(|x| -x)
    }
}

impl<T: SignedScalar, R: Dim, C: Dim, L: Layout> Neg for VectorView<'_, T, R, C, L> {
    type Output = DenseMatrix<T, R, C, L>;

    #[inline]
    fn neg(self) -> Self::Output {
        -self.to_dense()
    }
}

// Scalar operands are implemented per primitive: a blanket `Mul<T>` would overlap with the
// matrix operands above.
macro_rules! impl_scalar_ops {
    ($($t:ty),* $(,)?) => {
        $(
            impl<R: Dim, C: Dim, L: Layout> MulAssign<$t> for DenseMatrix<$t, R, C, L> {
                #[inline]
                fn mul_assign(&mut self, rhs: $t) {
                    self.scale(rhs);
                }
            }

            impl<R: Dim, C: Dim, L: Layout> DivAssign<$t> for DenseMatrix<$t, R, C, L> {
                #[inline]
                fn div_assign(&mut self, rhs: $t) {
                    self.iter_mut().for_each(|x| *x /= rhs);
                }
            }

            impl<R: Dim, C: Dim, L: Layout> MulAssign<$t> for VectorViewMut<'_, $t, R, C, L> {
                #[inline]
                fn mul_assign(&mut self, rhs: $t) {
                    self.scale(rhs);
                }
            }

            impl<R: Dim, C: Dim, L: Layout> DivAssign<$t> for VectorViewMut<'_, $t, R, C, L> {
                #[inline]
                fn div_assign(&mut self, rhs: $t) {
                    self.iter_mut().for_each(|x| *x /= rhs);
                }
            }

            impl<R: Dim, C: Dim, L: Layout> Mul<$t> for DenseMatrix<$t, R, C, L> {
                type Output = Self;

                #[inline]
                fn mul(mut self, rhs: $t) -> Self {
                    self *= rhs;
                    self
                }
            }

            impl<R: Dim, C: Dim, L: Layout> Div<$t> for DenseMatrix<$t, R, C, L> {
                type Output = Self;

                #[inline]
                fn div(mut self, rhs: $t) -> Self {
                    self /= rhs;
                    self
                }
            }

            impl<R: Dim, C: Dim, L: Layout> Mul<$t> for &DenseMatrix<$t, R, C, L> {
                type Output = DenseMatrix<$t, R, C, L>;

                #[inline]
                fn mul(self, rhs: $t) -> Self::Output {
                    self.map(|x| x * rhs)
                }
            }

            impl<R: Dim, C: Dim, L: Layout> Div<$t> for &DenseMatrix<$t, R, C, L> {
                type Output = DenseMatrix<$t, R, C, L>;

                #[inline]
                fn div(self, rhs: $t) -> Self::Output {
                    self.map(|x| x / rhs)
                }
            }

            impl<R: Dim, C: Dim, L: Layout> Mul<$t> for VectorView<'_, $t, R, C, L> {
                type Output = DenseMatrix<$t, R, C, L>;

                #[inline]
                fn mul(self, rhs: $t) -> Self::Output {
                    self.to_dense() * rhs
                }
            }

            impl<R: Dim, C: Dim, L: Layout> Div<$t> for VectorView<'_, $t, R, C, L> {
                type Output = DenseMatrix<$t, R, C, L>;

                #[inline]
                fn div(self, rhs: $t) -> Self::Output {
                    self.to_dense() / rhs
                }
            }

            impl<R: Dim, C: Dim, L: Layout> Mul<DenseMatrix<$t, R, C, L>> for $t {
                type Output = DenseMatrix<$t, R, C, L>;

                #[inline]
                fn mul(self, rhs: DenseMatrix<$t, R, C, L>) -> Self::Output {
                    rhs * self
                }
            }

            impl<R: Dim, C: Dim, L: Layout> Mul<&DenseMatrix<$t, R, C, L>> for $t {
                type Output = DenseMatrix<$t, R, C, L>;

                #[inline]
                fn mul(self, rhs: &DenseMatrix<$t, R, C, L>) -> Self::Output {
                    rhs * self
                }
            }
        )*
    };
}

impl_scalar_ops!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64
);
