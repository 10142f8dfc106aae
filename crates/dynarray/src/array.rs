//! The growable array type.
//!
//! [`DynamicArray`] keeps its elements in one contiguous heap block. Growth
//! doubles the capacity; shrinking only happens through [`resize`] and
//! [`shrink_to_fit`]. Every index-taking operation is bounds-checked before
//! any element is moved, and every failing operation leaves the array as it
//! was.
//!
//! References into the array are invalidated by any operation that may
//! reallocate or shift elements. The borrow checker enforces this: such
//! operations take `&mut self`.
//!
//! [`resize`]: DynamicArray::resize
//! [`shrink_to_fit`]: DynamicArray::shrink_to_fit

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Index, IndexMut};
use std::slice;

use tracing::{debug, trace};

use crate::config::ArrayConfig;
use crate::error::ArrayError;
use crate::iter::IntoIter;
use crate::raw::RawStorage;

/// A growable, contiguous array with checked indexing.
///
/// Slots `[0, len)` hold valid elements; the remaining `capacity - len`
/// slots are reserved but uninitialised. Capacity doubles when an append or
/// insert finds the array full.
///
/// The array exclusively owns its elements. Dropping it drops each element
/// exactly once and then releases the buffer.
pub struct DynamicArray<T> {
    storage: RawStorage<T>,
    /// Ceiling on capacity from [`ArrayConfig::max_capacity`].
    max_capacity: Option<usize>,
}

impl<T> DynamicArray<T> {
    /// Create an empty array with [`ArrayConfig::DEFAULT_CAPACITY`] slots.
    pub fn new() -> Result<Self, ArrayError> {
        Self::with_config(ArrayConfig::default())
    }

    /// Create an empty array with exactly `capacity` slots.
    pub fn with_capacity(capacity: usize) -> Result<Self, ArrayError> {
        Self::with_config(ArrayConfig::new(capacity))
    }

    /// Create an empty array from a full configuration.
    ///
    /// Returns `Err(ArrayError::CapacityExceeded)` if the initial capacity is
    /// above the configured maximum.
    pub fn with_config(config: ArrayConfig) -> Result<Self, ArrayError> {
        check_limit(config.initial_capacity, config.max_capacity)?;
        let storage =
            RawStorage::with_capacity(config.initial_capacity).inspect_err(log_failure)?;
        Ok(Self {
            storage,
            max_capacity: config.max_capacity,
        })
    }

    /// Create an array holding `items` in order.
    ///
    /// Capacity is the larger of the item count and the default capacity.
    pub fn from_sequence<I>(items: I) -> Result<Self, ArrayError>
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        let items = items.into_iter();
        let mut array = Self::with_capacity(items.len().max(ArrayConfig::DEFAULT_CAPACITY))?;
        for item in items {
            array.append(item)?;
        }
        Ok(array)
    }

    /// Create an array holding clones of `items` in order.
    ///
    /// Sized like [`from_sequence`](Self::from_sequence).
    pub fn from_slice(items: &[T]) -> Result<Self, ArrayError>
    where
        T: Clone,
    {
        let mut array = Self::with_capacity(items.len().max(ArrayConfig::DEFAULT_CAPACITY))?;
        for item in items {
            array.storage.push(item.clone());
        }
        Ok(array)
    }

    /// Deep-copy into fresh storage of the same capacity and limit.
    pub fn try_clone(&self) -> Result<Self, ArrayError>
    where
        T: Clone,
    {
        let mut copy = Self {
            storage: RawStorage::with_capacity(self.capacity()).inspect_err(log_failure)?,
            max_capacity: self.max_capacity,
        };
        for item in self.iter() {
            copy.storage.push(item.clone());
        }
        Ok(copy)
    }

    /// Replace this array's contents and storage with a deep copy of `other`.
    ///
    /// The copy is built before the old storage is released, so on error this
    /// array is unchanged.
    pub fn assign_from(&mut self, other: &Self) -> Result<(), ArrayError>
    where
        T: Clone,
    {
        *self = other.try_clone()?;
        Ok(())
    }

    /// Append `element` after the last valid element, growing if full.
    pub fn append(&mut self, element: T) -> Result<(), ArrayError> {
        self.ensure_capacity(self.one_more()?)?;
        self.storage.push(element);
        Ok(())
    }

    /// Insert `element` at `index`, shifting later elements right.
    ///
    /// `index` may equal `len()`, which appends. The bounds check happens
    /// before any growth.
    pub fn insert(&mut self, element: T, index: usize) -> Result<(), ArrayError> {
        if index > self.len() {
            return Err(self.out_of_range(index));
        }
        self.ensure_capacity(self.one_more()?)?;
        self.storage.insert(index, element);
        Ok(())
    }

    /// Remove and return the element at `index`, shifting later elements left.
    pub fn erase(&mut self, index: usize) -> Result<T, ArrayError> {
        self.check_index(index)?;
        Ok(self.storage.remove(index))
    }

    /// Exchange the elements at `first` and `second`.
    pub fn swap(&mut self, first: usize, second: usize) -> Result<(), ArrayError> {
        self.check_index(first)?;
        self.check_index(second)?;
        self.storage.as_mut_slice().swap(first, second);
        Ok(())
    }

    /// Drop every element. Capacity is unchanged.
    pub fn clear(&mut self) {
        self.storage.truncate(0);
    }

    /// Sort into ascending order. Not stable.
    pub fn sort(&mut self)
    where
        T: Ord,
    {
        self.storage.as_mut_slice().sort_unstable();
    }

    /// Sort with a comparator. Not stable.
    pub fn sort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.storage.as_mut_slice().sort_unstable_by(compare);
    }

    /// Reallocate to exactly `new_capacity` slots.
    ///
    /// This sets the capacity, not the length. Elements at positions
    /// `new_capacity..len()` are dropped when shrinking below the length.
    pub fn resize(&mut self, new_capacity: usize) -> Result<(), ArrayError> {
        if new_capacity == self.capacity() {
            return Ok(());
        }
        self.reallocate(new_capacity)
    }

    /// Reallocate so that `capacity() == len()`.
    ///
    /// An empty array releases its buffer entirely and ends with capacity 0.
    pub fn shrink_to_fit(&mut self) -> Result<(), ArrayError> {
        self.resize(self.len())
    }

    /// Checked shared access.
    pub fn at(&self, index: usize) -> Result<&T, ArrayError> {
        self.as_slice()
            .get(index)
            .ok_or(ArrayError::OutOfRange {
                index,
                len: self.len(),
            })
    }

    /// Checked mutable access.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, ArrayError> {
        let len = self.len();
        self.as_mut_slice()
            .get_mut(index)
            .ok_or(ArrayError::OutOfRange { index, len })
    }

    /// Number of valid elements.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// Number of allocated slots.
    pub fn capacity(&self) -> usize {
        self.storage.capacity()
    }

    /// Configured capacity ceiling, if any.
    pub fn max_capacity(&self) -> Option<usize> {
        self.max_capacity
    }

    /// Whether `len() == 0`.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The valid elements as a slice.
    pub fn as_slice(&self) -> &[T] {
        self.storage.as_slice()
    }

    /// The valid elements as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.storage.as_mut_slice()
    }

    /// Iterate over the valid elements in index order.
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Iterate mutably over the valid elements in index order.
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    /// Grow so at least `min_required` slots exist.
    ///
    /// The target is `max(1, capacity * GROWTH_FACTOR, min_required)`,
    /// clamped to `max_capacity`. A requirement above `max_capacity` fails.
    fn ensure_capacity(&mut self, min_required: usize) -> Result<(), ArrayError> {
        let capacity = self.capacity();
        if min_required <= capacity {
            return Ok(());
        }
        check_limit(min_required, self.max_capacity)?;
        let mut target = capacity
            .saturating_mul(ArrayConfig::GROWTH_FACTOR)
            .max(1)
            .max(min_required);
        if let Some(limit) = self.max_capacity {
            target = target.min(limit);
        }
        self.reallocate(target)
    }

    fn reallocate(&mut self, new_capacity: usize) -> Result<(), ArrayError> {
        check_limit(new_capacity, self.max_capacity)?;
        let old_capacity = self.capacity();
        self.storage
            .relocate(new_capacity)
            .inspect_err(log_failure)?;
        trace!(
            old_capacity,
            new_capacity,
            len = self.len(),
            "reallocated array storage"
        );
        Ok(())
    }

    fn one_more(&self) -> Result<usize, ArrayError> {
        self.len()
            .checked_add(1)
            .ok_or(ArrayError::AllocationFailure {
                requested: usize::MAX,
            })
    }

    fn check_index(&self, index: usize) -> Result<(), ArrayError> {
        if index < self.len() {
            Ok(())
        } else {
            Err(self.out_of_range(index))
        }
    }

    fn out_of_range(&self, index: usize) -> ArrayError {
        ArrayError::OutOfRange {
            index,
            len: self.len(),
        }
    }
}

fn check_limit(requested: usize, max_capacity: Option<usize>) -> Result<(), ArrayError> {
    match max_capacity {
        Some(limit) if requested > limit => {
            let err = ArrayError::CapacityExceeded { requested, limit };
            log_failure(&err);
            Err(err)
        }
        _ => Ok(()),
    }
}

fn log_failure(err: &ArrayError) {
    debug!(error = %err, "array storage request refused");
}

/// # Panics
///
/// Panics with the [`ArrayError::OutOfRange`] message if `index >= len()`.
/// Use [`DynamicArray::at`] for a non-panicking lookup.
impl<T> Index<usize> for DynamicArray<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        match self.at(index) {
            Ok(element) => element,
            Err(err) => panic!("{err}"),
        }
    }
}

/// # Panics
///
/// Panics with the [`ArrayError::OutOfRange`] message if `index >= len()`.
/// Use [`DynamicArray::at_mut`] for a non-panicking lookup.
impl<T> IndexMut<usize> for DynamicArray<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        match self.at_mut(index) {
            Ok(element) => element,
            Err(err) => panic!("{err}"),
        }
    }
}

/// # Panics
///
/// `clone` and `clone_from` panic if the allocator refuses the copy's
/// storage. Use [`DynamicArray::try_clone`] or
/// [`DynamicArray::assign_from`] to handle that case.
impl<T: Clone> Clone for DynamicArray<T> {
    fn clone(&self) -> Self {
        match self.try_clone() {
            Ok(copy) => copy,
            Err(err) => panic!("failed to clone array: {err}"),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        if let Err(err) = self.assign_from(source) {
            panic!("failed to clone array: {err}");
        }
    }
}

impl<T: PartialEq> PartialEq for DynamicArray<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for DynamicArray<T> {}

impl<T: fmt::Debug> fmt::Debug for DynamicArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Renders the valid elements separated by single spaces.
impl<T: fmt::Display> fmt::Display for DynamicArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut items = self.iter();
        if let Some(first) = items.next() {
            write!(f, "{first}")?;
            for item in items {
                write!(f, " {item}")?;
            }
        }
        Ok(())
    }
}

impl<T> AsRef<[T]> for DynamicArray<T> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> AsMut<[T]> for DynamicArray<T> {
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T> IntoIterator for DynamicArray<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter::new(self.storage.into_raw_iter())
    }
}

impl<'a, T> IntoIterator for &'a DynamicArray<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> slice::Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut DynamicArray<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> slice::IterMut<'a, T> {
        self.iter_mut()
    }
}
