use std::iter::FusedIterator;

use crate::{Result, VarBytes, VariableListSegment};

/// Index-driven iterator over a [`VariableListSegment`].
///
/// Yields references into the segment (its decode cache before promotion, its
/// owned list after). Unpromoted reads fill the cache as they go.
#[derive(Debug)]
pub struct VariableListIter<'s, 'a, T> {
    segment: &'s VariableListSegment<'a, T>,
    index: usize,
    len: usize,
}

impl<'s, 'a, T> VariableListIter<'s, 'a, T>
where
    T: VarBytes,
{
    pub(crate) fn new(segment: &'s VariableListSegment<'a, T>) -> Self {
        Self {
            segment,
            index: 0,
            len: segment.len(),
        }
    }
}

impl<'s, T> Iterator for VariableListIter<'s, '_, T>
where
    T: VarBytes,
{
    type Item = Result<Option<&'s T>>;

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

impl<T> ExactSizeIterator for VariableListIter<'_, '_, T> where T: VarBytes {}

impl<T> FusedIterator for VariableListIter<'_, '_, T> where T: VarBytes {}
