//! Constants and limits for flat memory and dynamic arrays

/// Multiplier applied to `length + 1` when an array outgrows its allocation.
///
/// Shared by every [`DynamicArray`](crate::array::DynamicArray); there is no
/// per-instance override.
pub const GROWTH_FACTOR: usize = 3;

/// Number of slots in a [`FlatMemory`](crate::flat::FlatMemory) built with
/// `Default`.
pub const DEFAULT_MEMORY_SLOTS: usize = 1024;

/// Value written into never-used slots when a flat memory is created
pub const ZERO_SLOT: crate::types::Slot = 0.0;

/// Capacity an array must move to when it holds `length` elements and needs
/// room for one more.
///
/// Returns `None` if the computation overflows `usize`.
pub const fn grown_capacity(length: usize) -> Option<usize> {
    match length.checked_add(1) {
        Some(next) => next.checked_mul(GROWTH_FACTOR),
        None => None,
    }
}
