use std::iter::FusedIterator;

use crate::{Bytes, FixedListSegment, Result};

/// Index-driven iterator over a [`FixedListSegment`].
///
/// Holds a shared borrow of the segment, so the segment cannot be mutated while
/// the iterator is alive. Each call to `iter()` starts again from index 0.
#[derive(Debug)]
pub struct FixedListIter<'s, 'a, T> {
    segment: &'s FixedListSegment<'a, T>,
    index: usize,
    len: usize,
}

impl<'s, 'a, T> FixedListIter<'s, 'a, T>
where
    T: Bytes,
{
    pub(crate) fn new(segment: &'s FixedListSegment<'a, T>) -> Self {
        Self {
            segment,
            index: 0,
            len: segment.len(),
        }
    }
}

impl<T> Iterator for FixedListIter<'_, '_, T>
where
    T: Bytes,
{
    type Item = Result<T>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.len {
            return None;
        }
        let value = self.segment.get(self.index);
        self.index += 1;
        Some(value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len - self.index;
        (remaining, Some(remaining))
    }
}

impl<T> ExactSizeIterator for FixedListIter<'_, '_, T> where T: Bytes {}

impl<T> FusedIterator for FixedListIter<'_, '_, T> where T: Bytes {}
