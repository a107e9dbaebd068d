//! Reference flat memory backed by a fixed slot vector
//!
//! Free space is tracked as extents keyed by their first slot. Allocation is
//! first-fit in address order, so a fresh memory hands out blocks from the
//! bottom of the space upwards. Freed blocks are coalesced with adjacent free
//! extents. Slots are zeroed once, when the memory is created; a block that
//! reuses freed slots sees whatever values were left there.

use crate::constants::{DEFAULT_MEMORY_SLOTS, ZERO_SLOT};
use crate::memory::Memory;
use crate::types::{Address, Slot};
use alloc::collections::BTreeMap;
use alloc::vec;
use alloc::vec::Vec;
use hashbrown::HashMap;

#[cfg(feature = "logging")]
use tracing::{debug, warn};

/// Fixed-size flat memory with a first-fit extent allocator
#[derive(Debug, Clone)]
pub struct FlatMemory {
    /// Backing storage for every slot in the space
    slots: Vec<Slot>,

    /// Free extents: first slot -> number of slots
    free_extents: BTreeMap<usize, usize>,

    /// Live allocations: first slot -> number of slots
    live: HashMap<usize, usize>,

    /// Sum of all free extent lengths
    free_slots: usize,
}

impl FlatMemory {
    /// Create a flat memory with `total_slots` zeroed slots
    pub fn new(total_slots: usize) -> Self {
        let mut free_extents = BTreeMap::new();
        if total_slots > 0 {
            free_extents.insert(0, total_slots);
        }

        Self {
            slots: vec![ZERO_SLOT; total_slots],
            free_extents,
            live: HashMap::new(),
            free_slots: total_slots,
        }
    }

    /// Total number of slots in the space
    pub fn total_slots(&self) -> usize {
        self.slots.len()
    }

    /// Number of slots not owned by any live allocation
    pub fn free_slots(&self) -> usize {
        self.free_slots
    }

    /// Number of live allocations
    pub fn live_allocations(&self) -> usize {
        self.live.len()
    }

    /// Length of the live allocation starting at `address`, if any
    pub fn allocation_len(&self, address: Address) -> Option<usize> {
        self.live.get(&address.as_usize()).copied()
    }

    /// Length of the largest free extent
    ///
    /// An allocation request larger than this fails even when
    /// [`free_slots`](Self::free_slots) would cover it.
    pub fn largest_free_extent(&self) -> usize {
        self.free_extents.values().copied().max().unwrap_or(0)
    }

    /// Number of disjoint free extents
    pub fn free_extent_count(&self) -> usize {
        self.free_extents.len()
    }

    /// Return `[start, start + len)` to the free list, merging neighbours
    fn release_extent(&mut self, mut start: usize, mut len: usize) {
        if let Some((&prev_start, &prev_len)) = self.free_extents.range(..start).next_back() {
            if prev_start + prev_len == start {
                self.free_extents.remove(&prev_start);
                start = prev_start;
                len += prev_len;
            }
        }

        if let Some(next_len) = self.free_extents.remove(&(start + len)) {
            len += next_len;
        }

        self.free_extents.insert(start, len);
    }
}

impl Default for FlatMemory {
    fn default() -> Self {
        Self::new(DEFAULT_MEMORY_SLOTS)
    }
}

impl Memory for FlatMemory {
    fn allocate(&mut self, count: usize) -> Option<Address> {
        if count == 0 || count > self.free_slots {
            return None;
        }

        let (start, len) = self
            .free_extents
            .iter()
            .find(|(_, len)| **len >= count)
            .map(|(start, len)| (*start, *len))?;

        self.free_extents.remove(&start);
        if len > count {
            self.free_extents.insert(start + count, len - count);
        }

        self.live.insert(start, count);
        self.free_slots -= count;

        #[cfg(feature = "logging")]
        debug!("Allocated {} slots at {}", count, start);

        Some(Address::new(start))
    }

    fn free(&mut self, address: Address) {
        let start = address.as_usize();
        let Some(len) = self.live.remove(&start) else {
            #[cfg(feature = "logging")]
            warn!("Ignoring free of non-live address {}", address);
            return;
        };

        self.free_slots += len;
        self.release_extent(start, len);

        #[cfg(feature = "logging")]
        debug!("Freed {} slots at {}", len, start);
    }

    fn copy(&mut self, dest: Address, src: Address, count: usize) {
        if count == 0 {
            return;
        }
        let src = src.as_usize();
        self.slots.copy_within(src..src + count, dest.as_usize());
    }

    fn get(&self, address: Address) -> Slot {
        self.slots[address.as_usize()]
    }

    fn set(&mut self, address: Address, value: Slot) {
        self.slots[address.as_usize()] = value;
    }
}
