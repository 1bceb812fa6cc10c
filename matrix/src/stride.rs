//! Random-access cursors that step through a slice with a fixed stride.
//!
//! A cursor is a position in a strided sequence: element `i` of the sequence lives at
//! `base[start + stride * i]`. Row, column and diagonal views of a matrix are all built from a
//! cursor over the matrix's buffer.

use core::cmp::Ordering;
use core::iter::{FusedIterator, StepBy, Take};
use core::ops::{Add, AddAssign, Sub, SubAssign};
use core::slice;

/// A read-only cursor over a strided sequence.
#[derive(Debug)]
pub struct StrideCursor<'a, T> {
    base: &'a [T],
    start: usize,
    stride: usize,
    index: usize,
}

impl<T> Clone for StrideCursor<'_, T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for StrideCursor<'_, T> {}

impl<'a, T> StrideCursor<'a, T> {
    #[inline]
    pub const fn new(base: &'a [T], start: usize, stride: usize) -> Self {
        Self {
            base,
            start,
            stride,
            index: 0,
        }
    }

    #[inline]
    pub const fn stride(&self) -> usize {
        self.stride
    }

    /// The logical position of this cursor in its sequence.
    #[inline]
    pub const fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn get(&self) -> &'a T {
        self.at(0)
    }

    /// The element `n` steps ahead of this cursor, i.e. `*(self + n)`.
    #[inline]
    pub fn at(&self, n: usize) -> &'a T {
        &self.base[self.start + self.stride * (self.index + n)]
    }

    #[inline]
    pub fn advance(&mut self, n: usize) {
        self.index += n;
    }

    #[inline]
    pub fn retreat(&mut self, n: usize) {
        debug_assert!(n <= self.index, "cursor moved before the start of its sequence");
        self.index -= n;
    }

    /// Move by a signed number of steps.
    #[inline]
    #[must_use]
    pub fn offset(mut self, delta: isize) -> Self {
        if delta >= 0 {
            self.advance(delta.unsigned_abs());
        } else {
            self.retreat(delta.unsigned_abs());
        }
        self
    }

    /// The signed number of steps from `origin` to `self`.
    #[inline]
    pub fn distance(&self, origin: &Self) -> isize {
        self.index as isize - origin.index as isize
    }

    /// A cursor over the subsequence starting `first` steps ahead, stepping `step` elements of
    /// this sequence at a time.
    #[inline]
    pub(crate) fn subsequence(&self, first: usize, step: usize) -> Self {
        Self::new(
            self.base,
            self.start + self.stride * (self.index + first),
            self.stride * step,
        )
    }

    /// Iterate the `len` elements starting at this cursor.
    #[inline]
    pub fn iter(self, len: usize) -> StrideIter<'a, T> {
        StrideIter {
            front: self,
            back: self + len,
        }
    }
}

impl<T> PartialEq for StrideCursor<'_, T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl<T> Eq for StrideCursor<'_, T> {}

impl<T> PartialOrd for StrideCursor<'_, T> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for StrideCursor<'_, T> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.index.cmp(&other.index)
    }
}

impl<T> Add<usize> for StrideCursor<'_, T> {
    type Output = Self;

    #[inline]
    fn add(mut self, n: usize) -> Self {
        self.advance(n);
        self
    }
}

impl<T> AddAssign<usize> for StrideCursor<'_, T> {
    #[inline]
    fn add_assign(&mut self, n: usize) {
        self.advance(n);
    }
}

impl<T> Sub<usize> for StrideCursor<'_, T> {
    type Output = Self;

    #[inline]
    fn sub(mut self, n: usize) -> Self {
        self.retreat(n);
        self
    }
}

impl<T> SubAssign<usize> for StrideCursor<'_, T> {
    #[inline]
    fn sub_assign(&mut self, n: usize) {
        self.retreat(n);
    }
}

impl<'a, T> Sub for StrideCursor<'a, T> {
    type Output = isize;

    #[inline]
    fn sub(self, origin: StrideCursor<'a, T>) -> isize {
        self.distance(&origin)
    }
}

/// Iterator over the half-open range `[front, back)` of a strided sequence.
#[derive(Debug, Clone)]
pub struct StrideIter<'a, T> {
    front: StrideCursor<'a, T>,
    back: StrideCursor<'a, T>,
}

impl<'a, T> Iterator for StrideIter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        (self.front < self.back).then(|| {
            let item = self.front.get();
            self.front += 1;
            item
        })
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.len();
        (len, Some(len))
    }
}

impl<T> DoubleEndedIterator for StrideIter<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        (self.front < self.back).then(|| {
            self.back -= 1;
            self.back.get()
        })
    }
}

impl<T> ExactSizeIterator for StrideIter<'_, T> {
    #[inline]
    fn len(&self) -> usize {
        self.back.index - self.front.index
    }
}

impl<T> FusedIterator for StrideIter<'_, T> {}

/// A cursor over a strided sequence with write access.
#[derive(Debug)]
pub struct StrideCursorMut<'a, T> {
    base: &'a mut [T],
    start: usize,
    stride: usize,
    index: usize,
}

impl<'a, T> StrideCursorMut<'a, T> {
    #[inline]
    pub const fn new(base: &'a mut [T], start: usize, stride: usize) -> Self {
        Self {
            base,
            start,
            stride,
            index: 0,
        }
    }

    #[inline]
    pub const fn stride(&self) -> usize {
        self.stride
    }

    #[inline]
    pub const fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn get(&self) -> &T {
        self.at(0)
    }

    #[inline]
    pub fn get_mut(&mut self) -> &mut T {
        self.at_mut(0)
    }

    #[inline]
    pub fn at(&self, n: usize) -> &T {
        &self.base[self.start + self.stride * (self.index + n)]
    }

    #[inline]
    pub fn at_mut(&mut self, n: usize) -> &mut T {
        &mut self.base[self.start + self.stride * (self.index + n)]
    }

    #[inline]
    pub fn advance(&mut self, n: usize) {
        self.index += n;
    }

    #[inline]
    pub fn retreat(&mut self, n: usize) {
        debug_assert!(n <= self.index, "cursor moved before the start of its sequence");
        self.index -= n;
    }

    #[inline]
    pub fn distance(&self, origin: &Self) -> isize {
        self.index as isize - origin.index as isize
    }

    /// A read-only cursor at the same position.
    #[inline]
    pub fn as_const(&self) -> StrideCursor<'_, T> {
        StrideCursor {
            base: &*self.base,
            start: self.start,
            stride: self.stride,
            index: self.index,
        }
    }

    /// A shorter-lived cursor at the same position.
    #[inline]
    pub fn reborrow(&mut self) -> StrideCursorMut<'_, T> {
        StrideCursorMut {
            base: &mut *self.base,
            start: self.start,
            stride: self.stride,
            index: self.index,
        }
    }

    #[inline]
    pub(crate) fn subsequence(&mut self, first: usize, step: usize) -> StrideCursorMut<'_, T> {
        let start = self.start + self.stride * (self.index + first);
        StrideCursorMut::new(&mut *self.base, start, self.stride * step)
    }

    /// Iterate mutably over the `len` elements starting at this cursor.
    #[inline]
    pub fn iter_mut(&mut self, len: usize) -> StrideIterMut<'_, T> {
        let first = self.start + self.stride * self.index;
        let tail = self.base.get_mut(first..).unwrap_or_default();
        StrideIterMut {
            inner: tail.iter_mut().step_by(self.stride.max(1)).take(len),
        }
    }
}

/// Mutable iterator over a range of a strided sequence.
#[derive(Debug)]
pub struct StrideIterMut<'a, T> {
    inner: Take<StepBy<slice::IterMut<'a, T>>>,
}

impl<'a, T> Iterator for StrideIterMut<'a, T> {
    type Item = &'a mut T;

    #[inline]
    fn next(&mut self) -> Option<&'a mut T> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for StrideIterMut<'_, T> {}

impl<T> FusedIterator for StrideIterMut<'_, T> {}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;

    const DATA: [u32; 12] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11];

    #[test]
    fn cursor_arithmetic() {
        let begin = StrideCursor::new(&DATA, 1, 3);
        assert_eq!(*begin.get(), 1);
        assert_eq!(*begin.at(2), 7);
        assert_eq!(*(begin + 2).get(), *begin.at(2));

        let mut c = begin;
        c += 3;
        assert_eq!(*c.get(), 10);
        assert_eq!(c - begin, 3);
        assert_eq!(begin - c, -3);
        assert!(begin < c);
        assert_eq!(c.offset(-2), begin + 1);
        c -= 3;
        assert_eq!(c, begin);
    }

    #[test]
    fn iterates_both_ends() {
        let items = StrideCursor::new(&DATA, 0, 4).iter(3);
        assert_eq!(items.len(), 3);
        assert_eq!(items.clone().copied().collect::<Vec<_>>(), [0, 4, 8]);
        assert_eq!(items.rev().copied().collect::<Vec<_>>(), [8, 4, 0]);
    }

    #[test]
    fn subsequence_composes_strides() {
        // A 3x4 row-major block; column 2 starts at offset 2 with stride 4.
        let column = StrideCursor::new(&DATA, 2, 4);
        assert_eq!(column.iter(3).copied().collect::<Vec<_>>(), [2, 6, 10]);
        let tail = column.subsequence(1, 1);
        assert_eq!(tail.iter(2).copied().collect::<Vec<_>>(), [6, 10]);
    }

    #[test]
    fn empty_range_yields_nothing() {
        let mut empty: [u32; 0] = [];
        assert_eq!(StrideCursor::new(&empty, 0, 0).iter(0).count(), 0);
        let mut c = StrideCursorMut::new(&mut empty, 0, 0);
        assert_eq!(c.iter_mut(0).count(), 0);
    }

    #[test]
    fn mutable_cursor_writes_through() {
        let mut data = DATA;
        let mut c = StrideCursorMut::new(&mut data, 0, 5);
        *c.get_mut() = 100;
        c.advance(1);
        *c.at_mut(1) = 200;
        assert_eq!(*c.as_const().get(), 5);
        c.retreat(1);
        for x in c.iter_mut(3) {
            *x += 1;
        }
        assert_eq!(data[0], 101);
        assert_eq!(data[5], 6);
        assert_eq!(data[10], 201);
    }
}
