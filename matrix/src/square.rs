//! Operations on square matrices, and closed-form determinants and inverses for orders 2 to 4.

use smallmat_scalar::{RealScalar, Scalar, SignedScalar};
use tracing::{debug, instrument};

use crate::dense::DenseMatrix;
use crate::dim::{Const, U1, U2, U3, U4};
use crate::layout::Layout;
use crate::shape::SquareDim;
use crate::stride::{StrideCursor, StrideCursorMut};
use crate::view::{VectorView, VectorViewMut};
use crate::{Matrix, MatrixMut};

impl<T: Scalar, const N: usize, L: Layout> DenseMatrix<T, Const<N>, Const<N>, L>
where
    Const<N>: SquareDim,
{
    #[must_use]
    pub fn identity() -> Self {
        Self::from_fn(|r, c| if r == c { T::one() } else { T::zero() })
    }

    #[inline]
    pub const fn order(&self) -> usize {
        N
    }

    /// The main diagonal, as a column vector view. Its stride is `N + 1` in either layout.
    #[inline]
    pub fn diagonal(&self) -> VectorView<'_, T, Const<N>, U1, L> {
        VectorView::new(StrideCursor::new(self.as_slice(), 0, N + 1), Const, Const)
    }

    #[inline]
    pub fn diagonal_mut(&mut self) -> VectorViewMut<'_, T, Const<N>, U1, L> {
        VectorViewMut::new(StrideCursorMut::new(self.as_mut_slice(), 0, N + 1), Const, Const)
    }

    pub fn trace(&self) -> T {
        self.diagonal().iter().sum()
    }

    pub fn is_identity(&self) -> bool {
        (0..N).all(|r| {
            (0..N).all(|c| {
                let expected = if r == c { T::one() } else { T::zero() };
                self.value(r, c) == expected
            })
        })
    }

    /// Overwrite with the identity.
    pub fn to_identity(&mut self) {
        self.fill(T::zero());
        self.diagonal_mut().fill(T::one());
    }

    /// Transpose in place.
    pub fn transpose(&mut self) {
        let data = self.as_mut_slice();
        for r in 1..N {
            for c in 0..r {
                data.swap(L::offset(r, c, N, N), L::offset(c, r, N, N));
            }
        }
    }
}

/// Square orders with a closed-form determinant and inverse.
pub trait ClosedFormDim: SquareDim {
    fn determinant<T: SignedScalar, M: Matrix<T>>(m: &M) -> T;

    /// The inverse of `m`, or `None` if `|det(m)|` is within `T::machine_epsilon()` of zero.
    fn inverse<T: SignedScalar, L: Layout>(
        m: &DenseMatrix<T, Self, Self, L>,
    ) -> Option<DenseMatrix<T::Real, Self, Self, L>>;
}

impl ClosedFormDim for U2 {
    #[inline]
    fn determinant<T: SignedScalar, M: Matrix<T>>(m: &M) -> T {
        let a = |r, c| m.value(r, c);
        a(0, 0) * a(1, 1) - a(0, 1) * a(1, 0)
    }

    fn inverse<T: SignedScalar, L: Layout>(
        m: &DenseMatrix<T, U2, U2, L>,
    ) -> Option<DenseMatrix<T::Real, U2, U2, L>> {
        let det = Self::determinant::<T, _>(m);
        if det.is_negligible() {
            return None;
        }
        let det = det.to_real();
        let a = |r, c| m.value(r, c).to_real();

        Some(DenseMatrix::from_rows([
            [a(1, 1) / det, -a(0, 1) / det],
            [-a(1, 0) / det, a(0, 0) / det],
        ]))
    }
}

impl ClosedFormDim for U3 {
    #[inline]
    fn determinant<T: SignedScalar, M: Matrix<T>>(m: &M) -> T {
        let a = |r, c| m.value(r, c);
        a(0, 0) * (a(1, 1) * a(2, 2) - a(1, 2) * a(2, 1))
            + a(0, 1) * (a(1, 2) * a(2, 0) - a(1, 0) * a(2, 2))
            + a(0, 2) * (a(1, 0) * a(2, 1) - a(1, 1) * a(2, 0))
    }

    fn inverse<T: SignedScalar, L: Layout>(
        m: &DenseMatrix<T, U3, U3, L>,
    ) -> Option<DenseMatrix<T::Real, U3, U3, L>> {
        let det = Self::determinant::<T, _>(m);
        if det.is_negligible() {
            return None;
        }
        let det = det.to_real();
        let a = |r, c| m.value(r, c).to_real();

        // Cofactors of the first column.
        let c0 = a(1, 0) * a(2, 1) - a(1, 1) * a(2, 0);
        let c1 = a(1, 1) * a(2, 2) - a(1, 2) * a(2, 1);
        let c2 = a(1, 2) * a(2, 0) - a(1, 0) * a(2, 2);

        Some(DenseMatrix::from_rows([
            [
                c1 / det,
                -(a(0, 1) * a(2, 2) - a(0, 2) * a(2, 1)) / det,
                (a(0, 1) * a(1, 2) - a(0, 2) * a(1, 1)) / det,
            ],
            [
                c2 / det,
                (a(0, 0) * a(2, 2) - a(0, 2) * a(2, 0)) / det,
                -(a(0, 0) * a(1, 2) - a(0, 2) * a(1, 0)) / det,
            ],
            [
                c0 / det,
                -(a(0, 0) * a(2, 1) - a(0, 1) * a(2, 0)) / det,
                (a(0, 0) * a(1, 1) - a(0, 1) * a(1, 0)) / det,
            ],
        ]))
    }
}

/// The six 2x2 minors of the top two rows and the six of the bottom two rows, indexed by column
/// pair `(0,1) (0,2) (0,3) (1,2) (1,3) (2,3)`.
#[inline]
fn minors4<S: Scalar>(a: impl Fn(usize, usize) -> S) -> ([S; 6], [S; 6]) {
    let top = |i, j| a(0, i) * a(1, j) - a(1, i) * a(0, j);
    let bottom = |i, j| a(2, i) * a(3, j) - a(3, i) * a(2, j);
    (
        [top(0, 1), top(0, 2), top(0, 3), top(1, 2), top(1, 3), top(2, 3)],
        [
            bottom(0, 1),
            bottom(0, 2),
            bottom(0, 3),
            bottom(1, 2),
            bottom(1, 3),
            bottom(2, 3),
        ],
    )
}

#[inline]
fn det4<S: Scalar>(s: &[S; 6], c: &[S; 6]) -> S {
    s[0] * c[5] - s[1] * c[4] + s[2] * c[3] + s[3] * c[2] - s[4] * c[1] + s[5] * c[0]
}

impl ClosedFormDim for U4 {
    #[inline]
    fn determinant<T: SignedScalar, M: Matrix<T>>(m: &M) -> T {
        let (s, c) = minors4(|r, c| m.value(r, c));
        det4(&s, &c)
    }

    fn inverse<T: SignedScalar, L: Layout>(
        m: &DenseMatrix<T, U4, U4, L>,
    ) -> Option<DenseMatrix<T::Real, U4, U4, L>> {
        if Self::determinant::<T, _>(m).is_negligible() {
            return None;
        }
        let a = |r, c| m.value(r, c).to_real();
        let (s, c) = minors4(a);
        let det = det4(&s, &c);

        let adjugate = [
            [
                a(1, 1) * c[5] - a(1, 2) * c[4] + a(1, 3) * c[3],
                -a(0, 1) * c[5] + a(0, 2) * c[4] - a(0, 3) * c[3],
                a(3, 1) * s[5] - a(3, 2) * s[4] + a(3, 3) * s[3],
                -a(2, 1) * s[5] + a(2, 2) * s[4] - a(2, 3) * s[3],
            ],
            [
                -a(1, 0) * c[5] + a(1, 2) * c[2] - a(1, 3) * c[1],
                a(0, 0) * c[5] - a(0, 2) * c[2] + a(0, 3) * c[1],
                -a(3, 0) * s[5] + a(3, 2) * s[2] - a(3, 3) * s[1],
                a(2, 0) * s[5] - a(2, 2) * s[2] + a(2, 3) * s[1],
            ],
            [
                a(1, 0) * c[4] - a(1, 1) * c[2] + a(1, 3) * c[0],
                -a(0, 0) * c[4] + a(0, 1) * c[2] - a(0, 3) * c[0],
                a(3, 0) * s[4] - a(3, 1) * s[2] + a(3, 3) * s[0],
                -a(2, 0) * s[4] + a(2, 1) * s[2] - a(2, 3) * s[0],
            ],
            [
                -a(1, 0) * c[3] + a(1, 1) * c[1] - a(1, 2) * c[0],
                a(0, 0) * c[3] - a(0, 1) * c[1] + a(0, 2) * c[0],
                -a(3, 0) * s[3] + a(3, 1) * s[1] - a(3, 2) * s[0],
                a(2, 0) * s[3] - a(2, 1) * s[1] + a(2, 2) * s[0],
            ],
        ];
        Some(DenseMatrix::from_fn_generic(Const, Const, |r, c| {
            adjugate[r][c] / det
        }))
    }
}

impl<T: SignedScalar, const N: usize, L: Layout> DenseMatrix<T, Const<N>, Const<N>, L>
where
    Const<N>: ClosedFormDim,
{
    pub fn determinant(&self) -> T {
        <Const<N> as ClosedFormDim>::determinant(self)
    }

    /// Whether `|det|` exceeds `T::machine_epsilon()`.
    pub fn is_invertible(&self) -> bool {
        !self.determinant().is_negligible()
    }

    /// The inverse, computed in `T::Real`, or `None` if the matrix is singular.
    #[instrument(level = "debug", skip_all, fields(order = N))]
    pub fn inverted(&self) -> Option<DenseMatrix<T::Real, Const<N>, Const<N>, L>> {
        let inverse = <Const<N> as ClosedFormDim>::inverse(self);
        if inverse.is_none() {
            debug!("matrix is singular, no inverse");
        }
        inverse
    }

    /// Replace with the inverse, or with the identity if the matrix is singular.
    #[instrument(level = "debug", skip_all, fields(order = N))]
    pub fn invert(&mut self)
    where
        T: RealScalar,
    {
        match self.inverted() {
            Some(inverse) => *self = inverse,
            None => self.to_identity(),
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    use super::*;
    use crate::{ColumnMajor, Matrix2, Matrix3, Matrix4, SMatrix};

    fn assert_near_identity<const N: usize, L: Layout>(m: &DenseMatrix<f64, Const<N>, Const<N>, L>)
    where
        Const<N>: SquareDim,
    {
        let identity = DenseMatrix::<f64, Const<N>, Const<N>, L>::identity();
        for (x, y) in m.iter().zip(identity.iter()) {
            assert!((x - y).abs() < 1e-9, "{m}");
        }
    }

    /// A random matrix with a dominant diagonal, hence well conditioned.
    fn random_invertible<const N: usize>(rng: &mut SmallRng) -> SMatrix<f64, N, N>
    where
        Const<N>: SquareDim,
    {
        SMatrix::from_fn(|r, c| {
            let x: f64 = rng.random_range(-1.0..1.0);
            if r == c { x + 2.0 * N as f64 } else { x }
        })
    }

    #[test]
    fn determinant_of_2x2() {
        let m = Matrix2::<i32>::from_rows([[1, 2], [3, 4]]);
        assert_eq!(m.determinant(), -2);
    }

    #[test]
    fn determinant_of_3x3_and_4x4() {
        let m3 = Matrix3::<i64>::from_rows([[2, 0, 1], [1, 3, 2], [1, 1, 2]]);
        assert_eq!(m3.determinant(), 6);

        let m4 = Matrix4::<i64>::from_rows([
            [1, 0, 2, -1],
            [3, 0, 0, 5],
            [2, 1, 4, -3],
            [1, 0, 5, 0],
        ]);
        assert_eq!(m4.determinant(), 30);
    }

    #[test]
    fn determinant_does_not_depend_on_layout() {
        let rm = Matrix4::<i32>::from_rows([
            [4, 3, 2, 1],
            [0, 1, -1, 2],
            [1, 0, 3, 3],
            [2, 2, 0, 1],
        ]);
        let cm = rm.with_layout::<ColumnMajor>();
        assert_eq!(rm.determinant(), cm.determinant());
    }

    #[test]
    fn identity_properties() {
        assert_eq!(Matrix2::<f64>::identity().determinant(), 1.0);
        assert_eq!(Matrix3::<f64>::identity().determinant(), 1.0);
        assert_eq!(Matrix4::<f64>::identity().determinant(), 1.0);
        assert_eq!(Matrix2::<i32>::identity().trace(), 2);
        assert_eq!(Matrix3::<i32>::identity().trace(), 3);
        assert_eq!(Matrix4::<i32>::identity().trace(), 4);
    }

    #[test]
    fn to_identity_then_trace() {
        let mut m = Matrix3::<f64>::from_fn(|r, c| (r * 3 + c) as f64);
        assert!(!m.is_identity());
        m.to_identity();
        assert!(m.is_identity());
        assert_eq!(m.trace(), 3.0);
    }

    #[test]
    fn is_identity_in_column_major() {
        let mut m = SMatrix::<f32, 3, 3, ColumnMajor>::identity();
        assert!(m.is_identity());
        m[(0, 2)] = 1.0;
        assert!(!m.is_identity());
        m[(0, 2)] = 0.0;
        m[(1, 1)] = 2.0;
        assert!(!m.is_identity());
    }

    #[test]
    fn diagonal_view() {
        let mut m = Matrix3::<i32>::from_rows([[1, 2, 3], [4, 5, 6], [7, 8, 9]]);
        assert_eq!(m.order(), 3);
        assert_eq!(m.diagonal().iter().collect::<alloc::vec::Vec<_>>(), [1, 5, 9]);
        assert_eq!(m.trace(), 15);
        m.diagonal_mut().fill(0);
        assert_eq!(m.trace(), 0);
        assert_eq!(m.value(0, 1), 2);
    }

    #[test]
    fn transpose_in_place() {
        let mut m = SMatrix::<i32, 3, 3, ColumnMajor>::from_rows([[1, 2, 3], [4, 5, 6], [7, 8, 9]]);
        let expected = m.transposed();
        m.transpose();
        assert_eq!(m, expected);
        assert_eq!(m.row(0).iter().collect::<alloc::vec::Vec<_>>(), [1, 4, 7]);
    }

    #[test]
    fn inverse_of_diagonal() {
        let m = Matrix2::<f64>::from_rows([[2.0, 0.0], [0.0, 2.0]]);
        assert_eq!(m.inverted(), Some(Matrix2::from_rows([[0.5, 0.0], [0.0, 0.5]])));
    }

    #[test]
    fn singular_matrix_has_no_inverse() {
        let m = Matrix2::<f64>::from_rows([[1.0, 2.0], [2.0, 4.0]]);
        assert!(!m.is_invertible());
        assert_eq!(m.inverted(), None);

        let mut n = m;
        n.invert();
        assert!(n.is_identity());
    }

    #[test]
    fn integer_inverse_is_promoted() {
        let m = Matrix2::<i32>::from_rows([[4, 7], [2, 6]]);
        let inv: Option<Matrix2<f64>> = m.inverted();
        let expected = Matrix2::from_rows([[0.6, -0.7], [-0.2, 0.4]]);
        let inv = inv.unwrap();
        for (x, y) in inv.iter().zip(expected.iter()) {
            assert!((x - y).abs() < 1e-12);
        }
        assert!(Matrix3::<i8>::from_fn(|r, _| r as i8).inverted().is_none());
    }

    #[test]
    fn integer_4x4_inverse_is_promoted() {
        let m = SMatrix::<i32, 4, 4, ColumnMajor>::from_rows([
            [2, 0, 0, 0],
            [0, 4, 0, 0],
            [0, 0, 1, 0],
            [1, 0, 0, 1],
        ]);
        let inv: SMatrix<f64, 4, 4, ColumnMajor> = m.inverted().unwrap();
        assert_eq!(inv.value(0, 0), 0.5);
        assert_eq!(inv.value(1, 1), 0.25);
        assert_eq!(inv.value(3, 0), -0.5);
        assert_near_identity(&(m.map(f64::from) * &inv));
    }

    #[test]
    fn inverse_of_3x3() {
        let m = Matrix3::<f64>::from_rows([[2.0, 0.0, 1.0], [1.0, 3.0, 2.0], [1.0, 1.0, 2.0]]);
        let inv = m.inverted().unwrap();
        // det = 6, the first row of the adjugate is (4, 1, -3).
        assert!((inv.value(0, 0) - 4.0 / 6.0).abs() < 1e-15);
        assert!((inv.value(0, 1) - 1.0 / 6.0).abs() < 1e-15);
        assert!((inv.value(0, 2) + 3.0 / 6.0).abs() < 1e-15);
        assert_near_identity(&(m * &inv));
        assert_near_identity(&(inv * &m));
    }

    #[test]
    fn invert_in_place() {
        let mut m = Matrix4::<f64>::from_rows([
            [1.0, 0.0, 2.0, -1.0],
            [3.0, 0.0, 0.0, 5.0],
            [2.0, 1.0, 4.0, -3.0],
            [1.0, 0.0, 5.0, 0.0],
        ]);
        let original = m;
        m.invert();
        assert_near_identity(&(original * &m));
        assert_near_identity(&(m * &original));
    }

    #[test]
    fn random_inverses() {
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..32 {
            let m2 = random_invertible::<2>(&mut rng);
            assert_near_identity(&(m2 * &m2.inverted().unwrap()));
            let m3 = random_invertible::<3>(&mut rng);
            assert_near_identity(&(m3 * &m3.inverted().unwrap()));
            let m4 = random_invertible::<4>(&mut rng);
            assert_near_identity(&(m4 * &m4.inverted().unwrap()));
            let cm4 = m4.with_layout::<ColumnMajor>();
            assert_near_identity(&(cm4 * &cm4.inverted().unwrap()));
        }
    }

    proptest! {
        #[test]
        fn singular_iff_determinant_vanishes(
            a in -4i32..4, b in -4i32..4, c in -4i32..4, d in -4i32..4,
        ) {
            let m = Matrix2::<i32>::from_rows([[a, b], [c, d]]);
            prop_assert_eq!(m.inverted().is_none(), m.determinant() == 0);
        }

        #[test]
        fn rank_one_3x3_is_singular(
            u in prop::array::uniform3(-5i64..5),
            v in prop::array::uniform3(-5i64..5),
        ) {
            let m = Matrix3::<i64>::from_fn(|r, c| u[r] * v[c]);
            prop_assert_eq!(m.determinant(), 0);
            prop_assert!(!m.is_invertible());
        }
    }
}
