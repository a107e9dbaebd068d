//! Error types for flatvec operations

/// Errors that can occur during dynamic array operations
#[cfg_attr(feature = "std", derive(thiserror::Error))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrayError {
    /// Index outside `[0, length)`, or `pop` on an empty array
    #[cfg_attr(feature = "std", error("Index error: index {index} out of bounds for length {length}"))]
    IndexOutOfBounds {
        /// The index that was requested.
        index: usize,
        /// The array length at the time of the request.
        length: usize,
    },

    /// The memory primitive could not satisfy an allocation request
    #[cfg_attr(feature = "std", error("Out of memory: could not allocate {requested} slots"))]
    OutOfMemory {
        /// Number of slots requested. `usize::MAX` if the size computation overflowed.
        requested: usize,
    },
}

impl ArrayError {
    /// True for the index-error family
    pub const fn is_index_error(&self) -> bool {
        matches!(self, ArrayError::IndexOutOfBounds { .. })
    }

    /// True for allocation failures
    pub const fn is_out_of_memory(&self) -> bool {
        matches!(self, ArrayError::OutOfMemory { .. })
    }
}

#[cfg(not(feature = "std"))]
impl core::fmt::Display for ArrayError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ArrayError::IndexOutOfBounds { index, length } => {
                write!(f, "Index error: index {index} out of bounds for length {length}")
            }
            ArrayError::OutOfMemory { requested } => {
                write!(f, "Out of memory: could not allocate {requested} slots")
            }
        }
    }
}
