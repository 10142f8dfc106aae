//! A growable, contiguous array with checked indexing and explicit
//! capacity control.
//!
//! [`DynamicArray<T>`] owns one heap block of `capacity` slots, of which the
//! first `len` hold valid elements. It supports append, insert, erase, swap,
//! sort, checked and indexed access, and explicit reallocation through
//! [`resize`](DynamicArray::resize) and
//! [`shrink_to_fit`](DynamicArray::shrink_to_fit).
//!
//! # Architecture
//!
//! ```text
//! DynamicArray<T> (bounds checks, growth policy, logging)
//! └── RawStorage<T> (private: initialised prefix + heap block, all unsafe)
//!     └── Block<T> (allocation and release only)
//! ```
//!
//! # Growth
//!
//! A full array doubles its capacity (starting from 1 when empty) before an
//! append or insert. Capacity never shrinks implicitly. An optional ceiling
//! from [`ArrayConfig::max_capacity`] clamps growth.
//!
//! # Failure
//!
//! Every fallible operation returns [`ArrayError`] and leaves the array
//! unchanged on failure. Index errors are [`ArrayError::OutOfRange`];
//! storage errors are [`ArrayError::AllocationFailure`] or
//! [`ArrayError::CapacityExceeded`].
//!
//! # Example
//!
//! ```
//! use dynarray::DynamicArray;
//!
//! let mut array = DynamicArray::new()?;
//! array.append(10)?;
//! array.append(20)?;
//! array.append(30)?;
//! array.insert(15, 1)?;
//! assert_eq!(array.erase(2)?, 20);
//! assert_eq!(array.to_string(), "10 15 30");
//! # Ok::<(), dynarray::ArrayError>(())
//! ```
//!
//! # Logging
//!
//! Reallocations emit `tracing` events at TRACE level and refused storage
//! requests at DEBUG level. No subscriber is installed by this crate.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod array;
pub mod config;
pub mod error;
pub mod iter;
mod raw;

// Public re-exports for the primary API surface.
pub use array::DynamicArray;
pub use config::ArrayConfig;
pub use error::ArrayError;
pub use iter::IntoIter;
