//! Test fixtures for dynarray development.
//!
//! Provides [`DropLedger`], a shared counter of element constructions and
//! destructions, and [`Tracked`], an element wrapper that reports to it.
//! Together they let tests assert that a container drops every element it
//! ever held exactly once: no leaks, no double drops.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::cell::Cell;
use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

#[derive(Default)]
struct Counts {
    created: Cell<usize>,
    dropped: Cell<usize>,
}

/// Shared record of how many [`Tracked`] values were created and dropped.
///
/// Cloning the ledger shares the same counts.
#[derive(Clone, Default)]
pub struct DropLedger {
    counts: Rc<Counts>,
}

impl DropLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap `value` so its construction and destruction are counted.
    pub fn track<V>(&self, value: V) -> Tracked<V> {
        self.counts.created.set(self.counts.created.get() + 1);
        Tracked {
            value,
            counts: Rc::clone(&self.counts),
        }
    }

    /// Wrap every value of `values`, preserving order.
    pub fn track_all<V>(&self, values: impl IntoIterator<Item = V>) -> Vec<Tracked<V>> {
        values.into_iter().map(|v| self.track(v)).collect()
    }

    /// Number of tracked values constructed so far (including clones).
    pub fn created(&self) -> usize {
        self.counts.created.get()
    }

    /// Number of tracked values dropped so far.
    pub fn dropped(&self) -> usize {
        self.counts.dropped.get()
    }

    /// Number of tracked values currently alive.
    pub fn live(&self) -> usize {
        self.created() - self.dropped()
    }
}

impl fmt::Debug for DropLedger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DropLedger")
            .field("created", &self.created())
            .field("dropped", &self.dropped())
            .finish()
    }
}

/// A value whose lifetime is recorded in a [`DropLedger`].
///
/// Comparison, ordering, and formatting delegate to the wrapped value.
///
/// # Panics
///
/// Dropping panics if the ledger has already seen as many drops as
/// constructions, which can only happen when some value was dropped twice.
pub struct Tracked<V> {
    value: V,
    counts: Rc<Counts>,
}

impl<V> Tracked<V> {
    pub fn value(&self) -> &V {
        &self.value
    }
}

impl<V: Clone> Clone for Tracked<V> {
    fn clone(&self) -> Self {
        self.counts.created.set(self.counts.created.get() + 1);
        Self {
            value: self.value.clone(),
            counts: Rc::clone(&self.counts),
        }
    }
}

impl<V> Drop for Tracked<V> {
    fn drop(&mut self) {
        let dropped = self.counts.dropped.get() + 1;
        assert!(
            dropped <= self.counts.created.get(),
            "tracked value dropped more than once"
        );
        self.counts.dropped.set(dropped);
    }
}

impl<V: PartialEq> PartialEq for Tracked<V> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<V: Eq> Eq for Tracked<V> {}

impl<V: PartialOrd> PartialOrd for Tracked<V> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.value.partial_cmp(&other.value)
    }
}

impl<V: Ord> Ord for Tracked<V> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl<V: fmt::Debug> fmt::Debug for Tracked<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.value.fmt(f)
    }
}

impl<V: fmt::Display> fmt::Display for Tracked<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.value.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn track_and_drop_balance() {
        let ledger = DropLedger::new();
        let a = ledger.track(1);
        let b = a.clone();
        assert_eq!(ledger.created(), 2);
        assert_eq!(ledger.live(), 2);
        drop(a);
        drop(b);
        assert_eq!(ledger.dropped(), 2);
        assert_eq!(ledger.live(), 0);
    }

    #[test]
    fn track_all_preserves_order() {
        let ledger = DropLedger::new();
        let values = ledger.track_all([3, 1, 2]);
        let raw: Vec<i32> = values.iter().map(|t| *t.value()).collect();
        assert_eq!(raw, vec![3, 1, 2]);
        assert_eq!(ledger.live(), 3);
    }

    #[test]
    fn ordering_delegates_to_value() {
        let ledger = DropLedger::new();
        let low = ledger.track(1);
        let high = ledger.track(2);
        assert!(low < high);
        assert_eq!(format!("{low:?} {high}"), "1 2");
    }
}
