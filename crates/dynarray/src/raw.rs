//! Low-level primitives for array storage.
//!
//! This is the only module in the crate that touches raw pointers. A
//! [`RawStorage`] owns one heap block plus the length of its initialised
//! prefix, and every method here keeps two invariants:
//!
//! - slots `[0, len)` hold initialised values,
//! - slots `[len, capacity)` are uninitialised and never read.
//!
//! Preconditions that callers in `array.rs` are expected to have checked
//! (bounds, free capacity) are asserted, never assumed. Each `unsafe` block
//! carries a `// SAFETY:` comment naming the invariant it relies on.

#![allow(unsafe_code)]

use std::alloc::{self, Layout};
use std::marker::PhantomData;
use std::mem::ManuallyDrop;
use std::ptr::{self, NonNull};
use std::slice;

use crate::error::ArrayError;

/// An allocated but untyped-contents block of `capacity` slots of `T`.
///
/// Releases the block on drop without touching its contents. Zero-sized
/// requests (zero capacity or zero-sized `T`) never reach the allocator.
struct Block<T> {
    ptr: NonNull<T>,
    capacity: usize,
}

impl<T> Block<T> {
    fn allocate(capacity: usize) -> Result<Self, ArrayError> {
        let layout = Layout::array::<T>(capacity)
            .map_err(|_| ArrayError::AllocationFailure { requested: capacity })?;
        if layout.size() == 0 {
            return Ok(Self {
                ptr: NonNull::dangling(),
                capacity,
            });
        }
        // SAFETY: layout has non-zero size.
        let raw = unsafe { alloc::alloc(layout) };
        let ptr = NonNull::new(raw.cast::<T>())
            .ok_or(ArrayError::AllocationFailure { requested: capacity })?;
        Ok(Self { ptr, capacity })
    }

    fn slot(&self, index: usize) -> *mut T {
        debug_assert!(index <= self.capacity);
        // SAFETY: index <= capacity, so the offset stays within (or one past)
        // the allocation. For zero-sized T every offset is zero bytes.
        unsafe { self.ptr.as_ptr().add(index) }
    }
}

impl<T> Drop for Block<T> {
    fn drop(&mut self) {
        // The same layout was computed successfully in `allocate`.
        let Ok(layout) = Layout::array::<T>(self.capacity) else {
            return;
        };
        if layout.size() != 0 {
            // SAFETY: ptr was returned by `alloc::alloc` with this exact layout
            // and is released only here.
            unsafe { alloc::dealloc(self.ptr.as_ptr().cast(), layout) };
        }
    }
}

/// Heap block plus initialised-prefix length.
pub(crate) struct RawStorage<T> {
    block: Block<T>,
    len: usize,
    _owns: PhantomData<T>,
}

impl<T> RawStorage<T> {
    /// Allocate an empty storage of exactly `capacity` slots.
    pub(crate) fn with_capacity(capacity: usize) -> Result<Self, ArrayError> {
        Ok(Self {
            block: Block::allocate(capacity)?,
            len: 0,
            _owns: PhantomData,
        })
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn capacity(&self) -> usize {
        self.block.capacity
    }

    pub(crate) fn as_slice(&self) -> &[T] {
        // SAFETY: [0, len) is initialised and the pointer is non-null and aligned.
        unsafe { slice::from_raw_parts(self.block.ptr.as_ptr(), self.len) }
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: as above; &mut self guarantees exclusive access.
        unsafe { slice::from_raw_parts_mut(self.block.ptr.as_ptr(), self.len) }
    }

    /// Write `value` into the first free slot.
    ///
    /// # Panics
    ///
    /// Panics if the storage is full.
    pub(crate) fn push(&mut self, value: T) {
        assert!(self.len < self.capacity(), "push into full storage");
        // SAFETY: len < capacity, so the slot is allocated and uninitialised.
        unsafe { self.block.slot(self.len).write(value) };
        self.len += 1;
    }

    /// Shift `[index, len)` right by one slot and write `value` at `index`.
    ///
    /// # Panics
    ///
    /// Panics if the storage is full or `index > len`.
    pub(crate) fn insert(&mut self, index: usize, value: T) {
        assert!(self.len < self.capacity(), "insert into full storage");
        assert!(index <= self.len, "insert index past end");
        let hole = self.block.slot(index);
        // SAFETY: the destination range [index + 1, len + 1) fits because
        // len < capacity. `ptr::copy` handles the overlap. After the shift,
        // slot `index` is logically uninitialised and is overwritten.
        unsafe {
            ptr::copy(hole, hole.add(1), self.len - index);
            hole.write(value);
        }
        self.len += 1;
    }

    /// Move the element at `index` out and shift `(index, len)` left by one.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub(crate) fn remove(&mut self, index: usize) -> T {
        assert!(index < self.len, "remove index out of bounds");
        let hole = self.block.slot(index);
        // SAFETY: slot `index` is initialised; it is read exactly once and then
        // overwritten by the shift, so nothing is duplicated. The source range
        // [index + 1, len) is initialised.
        let value = unsafe {
            let value = hole.read();
            ptr::copy(hole.add(1), hole, self.len - index - 1);
            value
        };
        self.len -= 1;
        value
    }

    /// Drop every element at or past `len`.
    pub(crate) fn truncate(&mut self, len: usize) {
        if len >= self.len {
            return;
        }
        let tail = ptr::slice_from_raw_parts_mut(self.block.slot(len), self.len - len);
        // Shorten first so a panicking destructor cannot cause a double drop.
        self.len = len;
        // SAFETY: [len, old_len) was initialised and is no longer reachable.
        unsafe { ptr::drop_in_place(tail) };
    }

    /// Move all kept elements into a fresh block of exactly `new_capacity`.
    ///
    /// Elements past `new_capacity` are dropped. The new block is allocated
    /// before anything is touched, so on error the storage is unchanged.
    pub(crate) fn relocate(&mut self, new_capacity: usize) -> Result<(), ArrayError> {
        let fresh = Block::allocate(new_capacity)?;
        self.truncate(new_capacity);
        // SAFETY: the blocks are distinct allocations (or both dangling with a
        // zero-byte copy), `len <= new_capacity` after truncation, and the
        // old copies are never read again because the old block is released
        // without dropping contents.
        unsafe {
            ptr::copy_nonoverlapping(self.block.ptr.as_ptr(), fresh.ptr.as_ptr(), self.len);
        }
        self.block = fresh;
        Ok(())
    }

    /// Convert into a by-value iterator over `[0, len)`.
    pub(crate) fn into_raw_iter(self) -> RawIntoIter<T> {
        let this = ManuallyDrop::new(self);
        // SAFETY: `this` is never dropped, so ownership of the block moves
        // out exactly once.
        let block = unsafe { ptr::read(&this.block) };
        RawIntoIter {
            block,
            start: 0,
            end: this.len,
            _owns: PhantomData,
        }
    }
}

impl<T> Drop for RawStorage<T> {
    fn drop(&mut self) {
        // `block` is released after this runs, even if a destructor panics.
        self.truncate(0);
    }
}

/// Owning front-to-back cursor over the initialised range `[start, end)`.
pub(crate) struct RawIntoIter<T> {
    block: Block<T>,
    start: usize,
    end: usize,
    _owns: PhantomData<T>,
}

impl<T> RawIntoIter<T> {
    pub(crate) fn as_slice(&self) -> &[T] {
        // SAFETY: [start, end) is initialised and not yet yielded.
        unsafe { slice::from_raw_parts(self.block.slot(self.start), self.end - self.start) }
    }

    pub(crate) fn remaining(&self) -> usize {
        self.end - self.start
    }

    pub(crate) fn next_front(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }
        // SAFETY: start < end, so the slot is initialised; advancing `start`
        // makes it unreachable so it is read only once.
        let value = unsafe { self.block.slot(self.start).read() };
        self.start += 1;
        Some(value)
    }

    pub(crate) fn next_back(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }
        self.end -= 1;
        // SAFETY: as in `next_front`, for the slot just excluded from the range.
        Some(unsafe { self.block.slot(self.end).read() })
    }
}

impl<T> Drop for RawIntoIter<T> {
    fn drop(&mut self) {
        let rest = ptr::slice_from_raw_parts_mut(self.block.slot(self.start), self.remaining());
        self.start = self.end;
        // SAFETY: the unyielded range is initialised and no longer reachable.
        unsafe { ptr::drop_in_place(rest) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dynarray_test_utils::DropLedger;

    fn filled(values: &[i32], capacity: usize) -> RawStorage<i32> {
        let mut storage = RawStorage::with_capacity(capacity).unwrap();
        for &v in values {
            storage.push(v);
        }
        storage
    }

    #[test]
    fn push_fills_prefix_in_order() {
        let storage = filled(&[1, 2, 3], 4);
        assert_eq!(storage.as_slice(), &[1, 2, 3]);
        assert_eq!(storage.capacity(), 4);
    }

    #[test]
    #[should_panic(expected = "push into full storage")]
    fn push_past_capacity_panics() {
        let mut storage = filled(&[1, 2], 2);
        storage.push(3);
    }

    #[test]
    fn insert_shifts_tail_right() {
        let mut storage = filled(&[1, 2, 4], 4);
        storage.insert(2, 3);
        assert_eq!(storage.as_slice(), &[1, 2, 3, 4]);
    }

    #[test]
    fn insert_at_end_appends() {
        let mut storage = filled(&[1], 2);
        storage.insert(1, 2);
        assert_eq!(storage.as_slice(), &[1, 2]);
    }

    #[test]
    fn remove_shifts_tail_left() {
        let mut storage = filled(&[1, 2, 3, 4], 4);
        assert_eq!(storage.remove(1), 2);
        assert_eq!(storage.as_slice(), &[1, 3, 4]);
        assert_eq!(storage.capacity(), 4);
    }

    #[test]
    fn relocate_grow_preserves_order() {
        let mut storage = filled(&[5, 6, 7], 3);
        storage.relocate(10).unwrap();
        assert_eq!(storage.capacity(), 10);
        assert_eq!(storage.as_slice(), &[5, 6, 7]);
    }

    #[test]
    fn relocate_below_len_drops_tail() {
        let ledger = DropLedger::new();
        let mut storage = RawStorage::with_capacity(4).unwrap();
        for v in 0..4 {
            storage.push(ledger.track(v));
        }
        storage.relocate(1).unwrap();
        assert_eq!(storage.len(), 1);
        assert_eq!(storage.capacity(), 1);
        assert_eq!(ledger.dropped(), 3);
        drop(storage);
        assert_eq!(ledger.live(), 0);
    }

    #[test]
    fn relocate_to_zero_releases_block() {
        let mut storage = filled(&[1, 2], 2);
        storage.relocate(0).unwrap();
        assert_eq!(storage.capacity(), 0);
        assert!(storage.as_slice().is_empty());
    }

    #[test]
    fn oversized_request_is_allocation_failure() {
        let result = RawStorage::<u64>::with_capacity(usize::MAX);
        assert!(matches!(
            result,
            Err(ArrayError::AllocationFailure { requested: usize::MAX })
        ));
    }

    #[test]
    fn zero_sized_elements_never_allocate() {
        let mut storage = RawStorage::<()>::with_capacity(usize::MAX).unwrap();
        storage.push(());
        storage.push(());
        assert_eq!(storage.len(), 2);
        storage.relocate(1).unwrap();
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn into_iter_yields_from_both_ends() {
        let mut iter = filled(&[1, 2, 3, 4], 4).into_raw_iter();
        assert_eq!(iter.next_front(), Some(1));
        assert_eq!(iter.next_back(), Some(4));
        assert_eq!(iter.as_slice(), &[2, 3]);
        assert_eq!(iter.next_front(), Some(2));
        assert_eq!(iter.next_front(), Some(3));
        assert_eq!(iter.next_front(), None);
        assert_eq!(iter.next_back(), None);
    }

    #[test]
    fn dropping_partial_into_iter_drops_rest_once() {
        let ledger = DropLedger::new();
        let mut storage = RawStorage::with_capacity(3).unwrap();
        for v in 0..3 {
            storage.push(ledger.track(v));
        }
        let mut iter = storage.into_raw_iter();
        let first = iter.next_front().unwrap();
        assert_eq!(ledger.dropped(), 0);
        drop(iter);
        assert_eq!(ledger.dropped(), 2);
        drop(first);
        assert_eq!(ledger.live(), 0);
        assert_eq!(ledger.dropped(), ledger.created());
    }
}
