//! Holds the [`Stack`] and [`StackPool`] types and methods

// Copyright (c) 2025 Ferrous Systems
// SPDX-License-Identifier: GPL-3.0-or-later

use core::cell::UnsafeCell;

/// A task stack, with the given size `LEN` bytes.
///
/// The value of `LEN` must be a multiple of 4, which is checked with an
/// assert.
///
/// We align stacks on 8-byte boundaries, as required by AAPCS.
#[repr(align(8))]
pub struct Stack<const LEN: usize> {
    /// The memory reserved for the task stack
    contents: UnsafeCell<[u8; LEN]>,
}

impl<const LEN: usize> Stack<LEN> {
    /// The size of this stack, in bytes
    pub const SIZE: usize = LEN;

    /// Create a new stack
    pub const fn new() -> Self {
        assert!(LEN.is_multiple_of(4));
        Self {
            contents: UnsafeCell::new([0u8; LEN]),
        }
    }

    /// Get the top of the stack
    pub const fn top(&self) -> *mut u32 {
        // SAFETY: Pointing one past this object is allowed, as this is full
        // descending stack and we never write to the 'top' address - only
        // below it
        unsafe { self.contents.get().add(1) as *mut u32 }
    }

    /// Get the lowest address in the stack
    pub const fn bottom(&self) -> *mut u32 {
        self.contents.get() as *mut u32
    }
}

/// SAFETY: Our stack object only exposes pointers to itself, so is thread-safe
/// despite containing an `UnsafeCell`.
unsafe impl<const LEN: usize> Sync for Stack<LEN> {}

impl<const LEN: usize> Default for Stack<LEN> {
    fn default() -> Self {
        Stack::new()
    }
}

/// One block of memory, carved into `COUNT` task stacks of `LEN` bytes each.
///
/// Region `n` starts exactly `n * size_of::<Stack<LEN>>()` bytes above the
/// start of the pool, so the stacks sit back-to-back and never overlap. A
/// task that overflows region `n` runs into region `n - 1`; nothing here
/// detects that.
pub struct StackPool<const COUNT: usize, const LEN: usize> {
    regions: [Stack<LEN>; COUNT],
}

impl<const COUNT: usize, const LEN: usize> StackPool<COUNT, LEN> {
    /// Create a new pool of stacks
    pub const fn new() -> Self {
        assert!(COUNT > 0);
        Self {
            regions: [const { Stack::new() }; COUNT],
        }
    }

    /// Get the stack region with the given index
    ///
    /// Panics (at compile time, if used in a `static`) if `idx` is out of
    /// range.
    pub const fn region(&self, idx: usize) -> &Stack<LEN> {
        &self.regions[idx]
    }

    /// How many regions this pool holds
    pub const fn len(&self) -> usize {
        COUNT
    }

    /// A pool always has at least one region
    pub const fn is_empty(&self) -> bool {
        false
    }
}

impl<const COUNT: usize, const LEN: usize> Default for StackPool<COUNT, LEN> {
    fn default() -> Self {
        StackPool::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_is_one_past_the_end() {
        let stack = Stack::<256>::new();
        let span = stack.top() as usize - stack.bottom() as usize;
        assert_eq!(span, 256);
        assert_eq!(stack.top() as usize % 8, 0);
    }

    #[test]
    fn pool_regions_are_contiguous_and_disjoint() {
        let pool = StackPool::<5, 1024>::new();
        assert_eq!(pool.len(), 5);
        for idx in 1..pool.len() {
            let below = pool.region(idx - 1);
            let above = pool.region(idx);
            assert_eq!(below.top(), above.bottom());
            assert_eq!(above.top() as usize - below.bottom() as usize, 2048);
        }
    }

    #[test]
    #[should_panic]
    fn pool_rejects_out_of_range_region() {
        let pool = StackPool::<2, 128>::new();
        let idx = pool.len();
        let _ = pool.region(idx);
    }
}

// End of File
