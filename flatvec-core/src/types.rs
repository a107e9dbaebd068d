//! Core types shared by memory primitives and arrays

use core::fmt;
use serde::{Deserialize, Serialize};

/// Value held by one memory slot
pub type Slot = f64;

/// Address of a slot in a flat memory space
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(usize);

impl Address {
    /// Create an address from a raw slot index
    pub const fn new(slot: usize) -> Self {
        Self(slot)
    }

    /// Raw slot index
    pub const fn as_usize(&self) -> usize {
        self.0
    }

    /// Address `count` slots past this one
    ///
    /// # Panics
    ///
    /// Panics if the result overflows `usize`.
    pub const fn offset(&self, count: usize) -> Self {
        match self.0.checked_add(count) {
            Some(slot) => Self(slot),
            None => panic!("address offset overflow"),
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

impl From<usize> for Address {
    fn from(slot: usize) -> Self {
        Self(slot)
    }
}

/// Running counters describing the work an array has done
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrayStats {
    /// Number of reallocations performed
    pub resizes: usize,

    /// Slots copied from an old allocation into a new one
    pub slots_copied: usize,

    /// Slots moved by insert/remove shifts
    pub slots_shifted: usize,
}

impl ArrayStats {
    /// Total slot moves (reallocation copies plus shifts)
    pub fn total_moves(&self) -> usize {
        self.slots_copied + self.slots_shifted
    }
}
