//! Fault injection for allocation failure paths
//!
//! [`FaultyMemory`] forwards every operation to an inner memory primitive but
//! can be told to refuse allocation requests, either from the start or after a
//! fixed number of successful allocations.

use crate::memory::Memory;
use crate::types::{Address, Slot};

#[cfg(feature = "logging")]
use tracing::debug;

/// Memory wrapper that fails allocations on demand
#[derive(Debug, Clone)]
pub struct FaultyMemory<M> {
    inner: M,

    /// Allocations still allowed before every request fails. `None` = unlimited.
    remaining: Option<usize>,

    /// Requests refused so far
    failed: usize,
}

impl<M: Memory> FaultyMemory<M> {
    /// Wrap `inner` without injecting any failures
    pub fn new(inner: M) -> Self {
        Self {
            inner,
            remaining: None,
            failed: 0,
        }
    }

    /// Wrap `inner` so that every allocation request fails
    pub fn always_fail(inner: M) -> Self {
        Self::fail_after(inner, 0)
    }

    /// Wrap `inner` so that the first `successes` allocations go through and
    /// every later request fails
    pub fn fail_after(inner: M, successes: usize) -> Self {
        Self {
            inner,
            remaining: Some(successes),
            failed: 0,
        }
    }

    /// Turn failure injection on (every request fails) or off
    pub fn set_failing(&mut self, failing: bool) {
        self.remaining = if failing { Some(0) } else { None };
    }

    /// Whether the next allocation request will be refused
    pub fn is_failing(&self) -> bool {
        self.remaining == Some(0)
    }

    /// Number of requests refused so far
    pub fn failed_allocations(&self) -> usize {
        self.failed
    }

    /// Shared access to the wrapped memory
    pub fn inner(&self) -> &M {
        &self.inner
    }

    /// Unwrap, returning the inner memory
    pub fn into_inner(self) -> M {
        self.inner
    }
}

impl<M: Memory> Memory for FaultyMemory<M> {
    fn allocate(&mut self, count: usize) -> Option<Address> {
        match self.remaining {
            Some(0) => {
                self.failed += 1;
                #[cfg(feature = "logging")]
                debug!("Injected allocation failure for {} slots", count);
                None
            }
            Some(ref mut left) => {
                let address = self.inner.allocate(count)?;
                *left -= 1;
                Some(address)
            }
            None => self.inner.allocate(count),
        }
    }

    fn free(&mut self, address: Address) {
        self.inner.free(address)
    }

    fn copy(&mut self, dest: Address, src: Address, count: usize) {
        self.inner.copy(dest, src, count)
    }

    fn get(&self, address: Address) -> Slot {
        self.inner.get(address)
    }

    fn set(&mut self, address: Address, value: Slot) {
        self.inner.set(address, value)
    }
}
