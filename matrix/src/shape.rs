//! Compile-time capabilities attached to matrix shapes.
//!
//! A shape is a `(rows, columns)` pair of [`Dim`]s. Operations that only make sense for some
//! shapes (vector algebra, square kernels, mixing a row vector with a column vector) are gated on
//! the marker traits here, so asking for one on the wrong shape is a compile error.

use crate::dim::{Const, Dim, Dyn, U1, U2, U3, U4};

/// Square orders with square-matrix operations.
pub trait SquareDim: Dim {}

/// Shapes with exactly one row or exactly one column.
///
/// Fixed lengths are covered from 1 to 16, for row and column vectors alike. Longer vectors use a
/// [`Dyn`] extent.
pub trait VectorShape {
    /// The number of elements, as an extent.
    type Len: Dim;
}

impl VectorShape for (U1, U1) {
    type Len = U1;
}

impl VectorShape for (Dyn, U1) {
    type Len = Dyn;
}

impl VectorShape for (U1, Dyn) {
    type Len = Dyn;
}

/// Pairs of shapes whose elements can be combined one-to-one.
///
/// Every shape is compatible with itself. A row vector and a column vector are compatible when
/// their lengths share an extent; elements are then paired by position along the vector.
pub trait Compatible<Rhs> {
    /// Map the runtime extents of a `Rhs`-shaped operand to extents of `Self`'s shape.
    fn extents(rows: usize, columns: usize) -> (usize, usize);
}

impl<R: Dim, C: Dim> Compatible<(R, C)> for (R, C) {
    #[inline]
    fn extents(rows: usize, columns: usize) -> (usize, usize) {
        (rows, columns)
    }
}

impl Compatible<(U1, Dyn)> for (Dyn, U1) {
    #[inline]
    fn extents(rows: usize, columns: usize) -> (usize, usize) {
        (columns, rows)
    }
}

impl Compatible<(Dyn, U1)> for (U1, Dyn) {
    #[inline]
    fn extents(rows: usize, columns: usize) -> (usize, usize) {
        (columns, rows)
    }
}

macro_rules! impl_fixed_extents {
    ($($n:literal)*) => {
        $(
            impl SquareDim for Const<$n> {}

            impl VectorShape for (Const<$n>, U1) {
                type Len = Const<$n>;
            }

            impl VectorShape for (U1, Const<$n>) {
                type Len = Const<$n>;
            }

            impl Compatible<(U1, Const<$n>)> for (Const<$n>, U1) {
                #[inline]
                fn extents(rows: usize, columns: usize) -> (usize, usize) {
                    (columns, rows)
                }
            }

            impl Compatible<(Const<$n>, U1)> for (U1, Const<$n>) {
                #[inline]
                fn extents(rows: usize, columns: usize) -> (usize, usize) {
                    (columns, rows)
                }
            }
        )*
    };
}

impl_fixed_extents!(2 3 4 5 6 7 8 9 10 11 12 13 14 15 16);

/// Vector lengths with `x` and `y` components.
pub trait HasXY: Dim {}

/// Vector lengths with a `z` component.
pub trait HasZ: HasXY {}

/// Vector lengths with a `w` component.
pub trait HasW: HasZ {}

/// The vector length that has a cross product.
pub trait HasCross: HasZ {}

impl HasXY for U2 {}
impl HasXY for U3 {}
impl HasXY for U4 {}
impl HasZ for U3 {}
impl HasZ for U4 {}
impl HasW for U4 {}
impl HasCross for U3 {}
