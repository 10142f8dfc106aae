//! Array configuration parameters.

/// Configuration for a [`DynamicArray`](crate::DynamicArray).
///
/// Controls the initial allocation and an optional hard ceiling on capacity.
/// Checked when the array is constructed; immutable afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArrayConfig {
    /// Number of slots allocated up front.
    ///
    /// Default: 32.
    pub initial_capacity: usize,

    /// Upper bound on capacity, in slots.
    ///
    /// `None` means the array is bounded only by the allocator. When set,
    /// growth is clamped to this value and any request beyond it fails with
    /// [`ArrayError::CapacityExceeded`](crate::ArrayError::CapacityExceeded).
    pub max_capacity: Option<usize>,
}

impl ArrayConfig {
    /// Default initial capacity.
    pub const DEFAULT_CAPACITY: usize = 32;

    /// Multiplier applied to the capacity when a full array grows.
    pub const GROWTH_FACTOR: usize = 2;

    /// Create a config with the given initial capacity and no ceiling.
    pub fn new(initial_capacity: usize) -> Self {
        Self {
            initial_capacity,
            max_capacity: None,
        }
    }

    /// Set a ceiling on capacity.
    pub fn with_max_capacity(mut self, limit: usize) -> Self {
        self.max_capacity = Some(limit);
        self
    }
}

impl Default for ArrayConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}
