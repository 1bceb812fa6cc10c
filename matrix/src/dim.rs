//! Row and column extents, either fixed at compile time or carried at runtime.

use core::fmt::Debug;

use smallmat_scalar::Scalar;

use crate::storage::{ArrayStorage, Buffer, VecStorage};

/// The extent of one axis of a matrix.
///
/// The pair of extents of a matrix type selects its buffer: two `Const` extents give an inline
/// [`ArrayStorage`], anything involving [`Dyn`] gives a heap [`VecStorage`].
pub trait Dim: Copy + Debug + Default + PartialEq + Eq + Send + Sync + 'static {
    /// The buffer of a matrix with `Self` rows and `C` columns.
    type Storage<T: Scalar, C: Dim>: Buffer<T>;

    /// The buffer of a matrix with `ROWS` fixed rows and `Self` columns.
    type StorageWithFixedRows<T: Scalar, const ROWS: usize>: Buffer<T>;

    /// The compile-time value of this extent, if there is one.
    const FIXED: Option<usize>;

    fn value(&self) -> usize;

    /// Build the extent for `n`. For a fixed extent, `n` must equal the fixed value.
    fn from_usize(n: usize) -> Self;

    /// Build the extent for `n`, or `None` if this is a fixed extent with a different value.
    #[inline]
    fn try_from_usize(n: usize) -> Option<Self> {
        match Self::FIXED {
            Some(fixed) if fixed != n => None,
            _ => Some(Self::from_usize(n)),
        }
    }
}

/// An extent known at compile time. Zero-sized.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Const<const N: usize>;

/// An extent known only at runtime.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Dyn(pub usize);

pub type U1 = Const<1>;
pub type U2 = Const<2>;
pub type U3 = Const<3>;
pub type U4 = Const<4>;

impl<const N: usize> Dim for Const<N> {
    type Storage<T: Scalar, C: Dim> = C::StorageWithFixedRows<T, N>;
    type StorageWithFixedRows<T: Scalar, const ROWS: usize> = ArrayStorage<T, ROWS, N>;

    const FIXED: Option<usize> = Some(N);

    #[inline]
    fn value(&self) -> usize {
        N
    }

    #[inline]
    fn from_usize(n: usize) -> Self {
        debug_assert_eq!(n, N, "fixed extent mismatch");
        Self
    }
}

impl Dim for Dyn {
    type Storage<T: Scalar, C: Dim> = VecStorage<T>;
    type StorageWithFixedRows<T: Scalar, const ROWS: usize> = VecStorage<T>;

    const FIXED: Option<usize> = None;

    #[inline]
    fn value(&self) -> usize {
        self.0
    }

    #[inline]
    fn from_usize(n: usize) -> Self {
        Self(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn const_extent_is_zero_sized() {
        assert_eq!(size_of::<U3>(), 0);
        assert_eq!(U3::default().value(), 3);
        assert_eq!(U4::FIXED, Some(4));
    }

    #[test]
    fn dyn_extent_carries_its_value() {
        assert_eq!(Dyn::from_usize(7).value(), 7);
        assert_eq!(Dyn::default().value(), 0);
        assert_eq!(Dyn::FIXED, None);
    }

    #[test]
    fn try_from_usize_checks_fixed_value() {
        assert_eq!(U2::try_from_usize(2), Some(Const));
        assert_eq!(U2::try_from_usize(3), None);
        assert_eq!(Dyn::try_from_usize(3), Some(Dyn(3)));
    }
}
