//! Benchmark inputs for the dynarray container.
//!
//! Provides deterministic element sequences for benchmarking:
//!
//! - [`shuffled_input`]: seeded pseudo-random values, for sorting
//! - [`ascending_array`]: a filled [`DynamicArray`] of a given length

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use dynarray::{ArrayError, DynamicArray};
use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Small profile: 1K elements.
pub const SMALL: usize = 1_000;

/// Reference profile: 100K elements.
pub const REFERENCE: usize = 100_000;

/// Generate `len` pseudo-random values from `seed`.
///
/// The same `(len, seed)` pair always produces the same sequence.
pub fn shuffled_input(len: usize, seed: u64) -> Vec<u32> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..len).map(|_| rng.next_u32()).collect()
}

/// Build an array holding `0..len` in order, sized exactly to fit.
///
/// Returns `Err(ArrayError::CapacityExceeded)` if `len` values do not all
/// fit in a `u32`. Nothing is allocated in that case.
pub fn ascending_array(len: usize) -> Result<DynamicArray<u32>, ArrayError> {
    let end = u32::try_from(len).map_err(|_| ArrayError::CapacityExceeded {
        requested: len,
        limit: MAX_ASCENDING_LEN,
    })?;
    let mut array = DynamicArray::with_capacity(len)?;
    for v in 0..end {
        array.append(v)?;
    }
    Ok(array)
}

/// Longest array [`ascending_array`] can build: one value per `u32`.
pub const MAX_ASCENDING_LEN: usize = u32::MAX as usize;
