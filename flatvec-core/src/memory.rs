//! The flat memory contract consumed by [`DynamicArray`](crate::array::DynamicArray)
//!
//! A memory primitive is a flat space of [`Slot`]s addressed by [`Address`].
//! Arrays call into it for every slot read/write and every capacity change;
//! the primitive never learns anything about the arrays built on top of it.

use crate::types::{Address, Slot};
use alloc::rc::Rc;
use core::cell::RefCell;

/// Flat, slot-addressed memory with manual allocation
pub trait Memory {
    /// Reserve `count` contiguous slots.
    ///
    /// Returns `None` if the request cannot be satisfied. A returned block
    /// never overlaps another live allocation.
    fn allocate(&mut self, count: usize) -> Option<Address>;

    /// Release an allocation previously returned by [`Memory::allocate`].
    ///
    /// Callers must not free the same address twice.
    fn free(&mut self, address: Address);

    /// Copy `count` slots from `src` to `dest`.
    ///
    /// Must behave as a move for overlapping ranges in either direction.
    fn copy(&mut self, dest: Address, src: Address, count: usize);

    /// Read one slot
    fn get(&self, address: Address) -> Slot;

    /// Write one slot
    fn set(&mut self, address: Address, value: Slot);
}

impl<M: Memory + ?Sized> Memory for &mut M {
    fn allocate(&mut self, count: usize) -> Option<Address> {
        (**self).allocate(count)
    }

    fn free(&mut self, address: Address) {
        (**self).free(address)
    }

    fn copy(&mut self, dest: Address, src: Address, count: usize) {
        (**self).copy(dest, src, count)
    }

    fn get(&self, address: Address) -> Slot {
        (**self).get(address)
    }

    fn set(&mut self, address: Address, value: Slot) {
        (**self).set(address, value)
    }
}

/// One address space shared by several arrays on the same thread
pub type SharedMemory<M> = Rc<RefCell<M>>;

/// Wrap a memory primitive so several arrays can allocate from it
pub fn shared<M: Memory>(memory: M) -> SharedMemory<M> {
    Rc::new(RefCell::new(memory))
}

impl<M: Memory> Memory for Rc<RefCell<M>> {
    fn allocate(&mut self, count: usize) -> Option<Address> {
        self.borrow_mut().allocate(count)
    }

    fn free(&mut self, address: Address) {
        self.borrow_mut().free(address)
    }

    fn copy(&mut self, dest: Address, src: Address, count: usize) {
        self.borrow_mut().copy(dest, src, count)
    }

    fn get(&self, address: Address) -> Slot {
        self.borrow().get(address)
    }

    fn set(&mut self, address: Address, value: Slot) {
        self.borrow_mut().set(address, value)
    }
}
