//! Library entry for flatvec-cli used by integration tests and embedding.

pub mod commands;

// Re-export commands for convenience
pub use commands::*;

use flatvec_core::DynamicArray;

/// One-line layout summary shared by every command's table output
pub fn describe<M: flatvec_core::Memory>(array: &DynamicArray<M>) -> String {
    let address = array
        .address()
        .map_or_else(|| "-".to_string(), |a| a.as_usize().to_string());
    format!(
        "length {:>3}  capacity {:>3}  address {:>4}",
        array.len(),
        array.capacity(),
        address
    )
}
