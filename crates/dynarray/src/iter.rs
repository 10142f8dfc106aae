//! By-value iteration.

use std::fmt;
use std::iter::FusedIterator;

use crate::raw::RawIntoIter;

/// Owning iterator returned by `DynamicArray::into_iter`.
///
/// Yields elements front to back (or back to front via
/// [`DoubleEndedIterator`]). Elements not consumed before the iterator is
/// dropped are dropped with it, and the buffer is released.
pub struct IntoIter<T> {
    raw: RawIntoIter<T>,
}

impl<T> IntoIter<T> {
    pub(crate) fn new(raw: RawIntoIter<T>) -> Self {
        Self { raw }
    }

    /// The elements not yet yielded.
    pub fn as_slice(&self) -> &[T] {
        self.raw.as_slice()
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.raw.next_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.raw.remaining();
        (remaining, Some(remaining))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.raw.next_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}
