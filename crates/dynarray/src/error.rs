//! Array-specific error types.

use std::error::Error;
use std::fmt;

/// Errors that can occur during array operations.
///
/// Every failing operation leaves the array exactly as it was before the
/// call: no elements are moved, dropped, or reordered, and the capacity is
/// unchanged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArrayError {
    /// An index argument violated the bounds of the operation.
    ///
    /// For `insert` the valid range is `0..=len`; for every other
    /// index-taking operation it is `0..len`.
    OutOfRange {
        /// The offending index.
        index: usize,
        /// Number of valid elements at the time of the call.
        len: usize,
    },
    /// The allocator could not provide storage for `requested` slots, or the
    /// byte size of that many slots does not fit in `isize::MAX`.
    AllocationFailure {
        /// Number of element slots requested.
        requested: usize,
    },
    /// A request would take the capacity above the configured maximum.
    CapacityExceeded {
        /// Number of element slots requested.
        requested: usize,
        /// The configured `max_capacity`.
        limit: usize,
    },
}

impl ArrayError {
    /// Whether this error belongs to the allocation class
    /// ([`AllocationFailure`](Self::AllocationFailure) or
    /// [`CapacityExceeded`](Self::CapacityExceeded)).
    pub fn is_allocation_failure(&self) -> bool {
        matches!(
            self,
            Self::AllocationFailure { .. } | Self::CapacityExceeded { .. }
        )
    }
}

impl fmt::Display for ArrayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { index, len } => {
                write!(f, "index {index} out of range for array of length {len}")
            }
            Self::AllocationFailure { requested } => {
                write!(f, "allocation of {requested} slots failed")
            }
            Self::CapacityExceeded { requested, limit } => {
                write!(
                    f,
                    "array capacity exceeded: requested {requested} slots, limit {limit} slots"
                )
            }
        }
    }
}

impl Error for ArrayError {}
