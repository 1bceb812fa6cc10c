//! `Scalar` implementations for the primitive numeric types.

use num_traits::Float;

use crate::{RealScalar, Scalar};

macro_rules! impl_signed_integer_scalar {
    ($($type:ty),* $(,)?) => {
        $(
            impl Scalar for $type {
                type Real = f64;

                const IS_FLOAT: bool = false;

                #[inline]
                fn machine_epsilon() -> Self {
                    0
                }

                #[inline]
                fn abs_value(self) -> Self {
                    self.abs()
                }

                #[inline]
                fn to_real(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

macro_rules! impl_unsigned_integer_scalar {
    ($($type:ty),* $(,)?) => {
        $(
            impl Scalar for $type {
                type Real = f64;

                const IS_FLOAT: bool = false;

                #[inline]
                fn machine_epsilon() -> Self {
                    0
                }

                #[inline]
                fn abs_value(self) -> Self {
                    self
                }

                #[inline]
                fn to_real(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

macro_rules! impl_float_scalar {
    ($($type:ty),* $(,)?) => {
        $(
            impl Scalar for $type {
                type Real = Self;

                const IS_FLOAT: bool = true;

                #[inline]
                fn machine_epsilon() -> Self {
                    <$type>::EPSILON
                }

                #[inline]
                fn abs_value(self) -> Self {
                    Float::abs(self)
                }

                #[inline]
                fn to_real(self) -> Self {
                    self
                }
            }

            impl RealScalar for $type {}
        )*
    };
}

impl_signed_integer_scalar!(i8, i16, i32, i64, i128, isize);
impl_unsigned_integer_scalar!(u8, u16, u32, u64, u128, usize);
impl_float_scalar!(f32, f64);
