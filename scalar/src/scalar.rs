use core::fmt::{Debug, Display};
use core::iter::Sum;
use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use num_traits::{Float, One, Zero};

/// An element type that can be stored in a matrix.
///
/// Every primitive integer and float implements this trait. Operations whose result leaves the
/// ring of `Self`, such as norms and inverses, are computed in [`Scalar::Real`].
pub trait Scalar:
    'static
    + Copy
    + Default
    + Debug
    + Display
    + PartialEq
    + PartialOrd
    + Send
    + Sync
    + Zero
    + One
    + Add<Output = Self>
    + AddAssign
    + Sub<Output = Self>
    + SubAssign
    + Mul<Output = Self>
    + MulAssign
    + Div<Output = Self>
    + DivAssign
    + Sum
{
    /// The floating-point type results are promoted to. Integers map to `f64`, floats map to
    /// themselves.
    type Real: RealScalar;

    const IS_FLOAT: bool;

    /// The tolerance used for singularity checks: machine epsilon for floats, zero for integers.
    fn machine_epsilon() -> Self;

    /// The absolute value. The identity for unsigned types.
    fn abs_value(self) -> Self;

    fn to_real(self) -> Self::Real;

    /// Returns `true` if `self` lies within [`Scalar::machine_epsilon`] of zero.
    #[inline]
    fn is_negligible(self) -> bool {
        self.abs_value() <= Self::machine_epsilon()
    }
}

/// A scalar with an additive inverse.
///
/// Determinants and inverses are only offered for these; unsigned integers would wrap on the
/// intermediate differences.
pub trait SignedScalar: Scalar + Neg<Output = Self> {}

impl<T: Scalar + Neg<Output = T>> SignedScalar for T {}

/// A floating-point scalar.
pub trait RealScalar: Scalar<Real = Self> + SignedScalar + Float {}
