//! # Flatvec Core
//!
//! A dynamic, index-addressable array built on a simulated flat memory space
//! instead of a language-provided growable collection.
//!
//! ## Modules
//!
//! - `constants`: Growth factor and memory defaults
//! - `types`: Core types (Slot, Address, ArrayStats)
//! - `memory`: The `Memory` contract and the shared-memory adapter
//! - `flat`: Reference flat memory with a first-fit extent allocator
//! - `faulty`: Allocation fault injection
//! - `array`: The amortized-growth `DynamicArray`
//!
//! ## Example
//!
//! ```
//! use flatvec_core::{DynamicArray, FlatMemory};
//!
//! let mut array = DynamicArray::new(FlatMemory::default());
//! array.push(3.0).unwrap();
//! array.push(5.0).unwrap();
//!
//! assert_eq!(array.get(1), Ok(5.0));
//! assert_eq!(array.capacity(), 3);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

pub mod array;
pub mod constants;
pub mod error;
pub mod faulty;
pub mod flat;
pub mod memory;
pub mod types;

// Re-export commonly used types
pub use array::DynamicArray;
pub use error::ArrayError;
pub use faulty::FaultyMemory;
pub use flat::FlatMemory;
pub use memory::{shared, Memory, SharedMemory};
pub use types::{Address, ArrayStats, Slot};

/// Result type alias for flatvec operations
pub type Result<T> = core::result::Result<T, ArrayError>;
