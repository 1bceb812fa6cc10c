//! Scalar traits for small dense matrices.

#![no_std]

mod primitives;
mod scalar;

pub use scalar::*;
