//! Amortized-growth dynamic array over a [`Memory`] primitive
//!
//! The array owns at most one allocation at a time. When a `push` or `insert`
//! finds the allocation full, the array requests `(length + 1) * GROWTH_FACTOR`
//! slots, copies the live prefix across, then frees the old block. Removing
//! elements never gives capacity back.
//!
//! | Operation | Cost |
//! |-----------|------|
//! | `push`    | O(1) amortized, O(n) on resize |
//! | `pop`     | O(1) |
//! | `get`     | O(1) |
//! | `insert`  | O(n) |
//! | `remove`  | O(n) |

use crate::constants::grown_capacity;
use crate::error::ArrayError;
use crate::memory::Memory;
use crate::types::{Address, ArrayStats, Slot};
use crate::Result;
use alloc::vec::Vec;
use core::fmt;

#[cfg(feature = "logging")]
use tracing::{debug, warn};

/// The single live allocation backing an array.
///
/// Neither `Clone` nor `Copy`: the owning array is the only
/// holder of the base address.
#[derive(Debug)]
struct Block {
    base: Address,
    capacity: usize,
}

/// Index-addressable sequence stored in a flat memory space
pub struct DynamicArray<M: Memory> {
    memory: M,

    /// `None` until the first resize
    block: Option<Block>,

    /// Number of logically valid elements
    length: usize,

    stats: ArrayStats,
}

impl<M: Memory> DynamicArray<M> {
    /// Create an empty array. No allocation is requested until the first
    /// `push`.
    pub fn new(memory: M) -> Self {
        Self {
            memory,
            block: None,
            length: 0,
            stats: ArrayStats::default(),
        }
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.length
    }

    /// True when the array holds no elements
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Number of slots in the current allocation (0 before the first resize)
    pub fn capacity(&self) -> usize {
        self.block.as_ref().map_or(0, |block| block.capacity)
    }

    /// Base address of the current allocation
    pub fn address(&self) -> Option<Address> {
        self.block.as_ref().map(|block| block.base)
    }

    /// Resize and shift counters accumulated since creation
    pub fn stats(&self) -> ArrayStats {
        self.stats
    }

    /// The memory primitive this array allocates from
    pub fn memory(&self) -> &M {
        &self.memory
    }

    /// Append `value`, growing the allocation if it is full
    pub fn push(&mut self, value: Slot) -> Result<()> {
        let base = self.reserve_one()?;
        self.memory.set(base.offset(self.length), value);
        self.length += 1;
        Ok(())
    }

    /// Append every value in `values`, stopping at the first failure
    pub fn extend_from_slice(&mut self, values: &[Slot]) -> Result<()> {
        for value in values {
            self.push(*value)?;
        }
        Ok(())
    }

    /// Read the element at `index`
    pub fn get(&self, index: usize) -> Result<Slot> {
        let base = self.checked_base(index)?;
        Ok(self.memory.get(base.offset(index)))
    }

    /// Remove and return the last element.
    ///
    /// The vacated slot is left as-is; capacity does not change.
    pub fn pop(&mut self) -> Result<Slot> {
        if self.length == 0 {
            return Err(ArrayError::IndexOutOfBounds {
                index: 0,
                length: 0,
            });
        }

        let last = self.length - 1;
        let value = self.get(last)?;
        self.length = last;
        Ok(value)
    }

    /// Insert `value` at `index`, shifting `[index, len)` one slot right.
    ///
    /// `index` must name an existing element; appending goes through
    /// [`push`](Self::push).
    pub fn insert(&mut self, index: usize, value: Slot) -> Result<()> {
        self.checked_base(index)?;
        let base = self.reserve_one()?;

        let tail = self.length - index;
        self.memory
            .copy(base.offset(index + 1), base.offset(index), tail);
        self.memory.set(base.offset(index), value);

        self.length += 1;
        self.stats.slots_shifted += tail;
        Ok(())
    }

    /// Remove the element at `index`, shifting `[index + 1, len)` one slot
    /// left, and return it.
    pub fn remove(&mut self, index: usize) -> Result<Slot> {
        let base = self.checked_base(index)?;
        let value = self.memory.get(base.offset(index));

        let tail = self.length - index - 1;
        self.memory
            .copy(base.offset(index), base.offset(index + 1), tail);

        self.length -= 1;
        self.stats.slots_shifted += tail;
        Ok(value)
    }

    /// Iterate over the elements in index order
    pub fn iter(&self) -> impl ExactSizeIterator<Item = Slot> + '_ {
        // Only dereferenced when length > 0, which implies an allocation.
        let base = self.address().unwrap_or(Address::new(0));
        (0..self.length).map(move |i| self.memory.get(base.offset(i)))
    }

    /// Copy the elements out into a `Vec`
    pub fn to_vec(&self) -> Vec<Slot> {
        self.iter().collect()
    }

    /// Base address if `index` is in `[0, length)`
    fn checked_base(&self, index: usize) -> Result<Address> {
        let out_of_bounds = ArrayError::IndexOutOfBounds {
            index,
            length: self.length,
        };

        if index >= self.length {
            return Err(out_of_bounds);
        }

        self.address().ok_or(out_of_bounds)
    }

    /// Make sure one more element fits, returning the (possibly new) base
    fn reserve_one(&mut self) -> Result<Address> {
        if let Some(block) = &self.block {
            if self.length < block.capacity {
                return Ok(block.base);
            }
        }

        let target = grown_capacity(self.length).ok_or(ArrayError::OutOfMemory {
            requested: usize::MAX,
        })?;
        self.resize(target)
    }

    /// Move the live prefix into a fresh allocation of `new_capacity` slots.
    ///
    /// On failure the current allocation, length and capacity are untouched.
    fn resize(&mut self, new_capacity: usize) -> Result<Address> {
        let Some(base) = self.memory.allocate(new_capacity) else {
            #[cfg(feature = "logging")]
            warn!(
                "Allocation of {} slots failed (length {}, capacity {})",
                new_capacity,
                self.length,
                self.capacity()
            );
            return Err(ArrayError::OutOfMemory {
                requested: new_capacity,
            });
        };

        let fresh = Block {
            base,
            capacity: new_capacity,
        };

        if let Some(old) = self.block.take() {
            self.memory.copy(fresh.base, old.base, self.length);
            self.memory.free(old.base);

            #[cfg(feature = "logging")]
            debug!(
                "Resized {} -> {} slots, moved {} -> {}",
                old.capacity, new_capacity, old.base, fresh.base
            );
        }

        self.stats.resizes += 1;
        self.stats.slots_copied += self.length;
        self.block = Some(fresh);
        Ok(base)
    }
}

impl<M: Memory + Default> Default for DynamicArray<M> {
    fn default() -> Self {
        Self::new(M::default())
    }
}

impl<M: Memory> Drop for DynamicArray<M> {
    fn drop(&mut self) {
        if let Some(block) = self.block.take() {
            self.memory.free(block.base);
        }
    }
}

impl<M: Memory> fmt::Debug for DynamicArray<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicArray")
            .field("length", &self.length)
            .field("capacity", &self.capacity())
            .field("address", &self.address())
            .finish()
    }
}
