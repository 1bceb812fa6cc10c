//! Contiguous element buffers backing a `DenseMatrix`.

use alloc::vec::Vec;
use core::array;
use core::fmt::Debug;

/// A contiguous buffer of matrix elements, in storage order.
pub trait Buffer<T>: Clone + Debug + PartialEq + Send + Sync {
    /// Build a buffer of `len` elements where element `i` is `f(i)`.
    fn from_fn<F: FnMut(usize) -> T>(len: usize, f: F) -> Self;

    fn as_slice(&self) -> &[T];

    fn as_mut_slice(&mut self) -> &mut [T];

    /// The elements in storage order, moving them out when the buffer already owns a `Vec`.
    fn into_vec(self) -> Vec<T>;

    #[inline]
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Inline storage for a matrix whose extents are both fixed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ArrayStorage<T, const R: usize, const C: usize>(pub [[T; C]; R]);

impl<T, const R: usize, const C: usize> Buffer<T> for ArrayStorage<T, R, C>
where
    T: Copy + Debug + PartialEq + Send + Sync,
{
    #[inline]
    fn from_fn<F: FnMut(usize) -> T>(len: usize, mut f: F) -> Self {
        debug_assert_eq!(len, R * C);
        Self(array::from_fn(|r| array::from_fn(|c| f(r * C + c))))
    }

    #[inline]
    fn as_slice(&self) -> &[T] {
        self.0.as_flattened()
    }

    #[inline]
    fn as_mut_slice(&mut self) -> &mut [T] {
        self.0.as_flattened_mut()
    }

    #[inline]
    fn into_vec(self) -> Vec<T> {
        self.as_slice().to_vec()
    }
}

/// Heap storage for a matrix with at least one runtime extent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct VecStorage<T>(pub Vec<T>);

impl<T> VecStorage<T> {
    /// Resize to `len` elements. The first `min(old, len)` elements are kept, new elements are
    /// `T::default()`.
    pub fn resize(&mut self, len: usize)
    where
        T: Default,
    {
        self.0.resize_with(len, T::default);
    }
}

impl<T> Buffer<T> for VecStorage<T>
where
    T: Clone + Debug + PartialEq + Send + Sync,
{
    #[inline]
    fn from_fn<F: FnMut(usize) -> T>(len: usize, f: F) -> Self {
        Self((0..len).map(f).collect())
    }

    #[inline]
    fn as_slice(&self) -> &[T] {
        &self.0
    }

    #[inline]
    fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.0
    }

    #[inline]
    fn into_vec(self) -> Vec<T> {
        self.0
    }

    #[inline]
    fn len(&self) -> usize {
        self.0.len()
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use proptest::prelude::*;

    use super::*;

    #[test]
    fn array_storage_is_contiguous() {
        let mut s = ArrayStorage::<i32, 2, 3>::from_fn(6, |i| i as i32);
        assert_eq!(s.as_slice(), &[0, 1, 2, 3, 4, 5]);
        assert_eq!(s.0[1], [3, 4, 5]);
        s.as_mut_slice()[4] = 40;
        assert_eq!(s.0[1][1], 40);
        assert_eq!(s.len(), 6);
    }

    #[test]
    fn vec_storage_from_fn() {
        let s = VecStorage::from_fn(4, |i| (i * i) as u8);
        assert_eq!(s.as_slice(), &[0, 1, 4, 9]);
        assert!(!s.is_empty());
        assert!(VecStorage::<f32>::default().is_empty());
    }

    #[test]
    fn resize_pads_with_default() {
        let mut s = VecStorage(vec![1.5f64, 2.5]);
        s.resize(4);
        assert_eq!(s.into_vec(), vec![1.5, 2.5, 0.0, 0.0]);
    }

    proptest! {
        #[test]
        fn resize_keeps_common_prefix(
            values in prop::collection::vec(any::<i32>(), 0..32),
            len in 0usize..48,
        ) {
            let mut s = VecStorage(values.clone());
            s.resize(len);
            prop_assert_eq!(s.len(), len);
            let kept = values.len().min(len);
            prop_assert_eq!(&s.as_slice()[..kept], &values[..kept]);
            prop_assert!(s.as_slice()[kept..].iter().all(|&x| x == 0));
        }
    }
}
