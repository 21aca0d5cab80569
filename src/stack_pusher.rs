//! Holds the [`StackPusher`] type and methods

// Copyright (c) 2025 Ferrous Systems
// SPDX-License-Identifier: GPL-3.0-or-later

/// A cursor over a full-descending Arm EABI stack
///
/// Pushing moves the cursor down, popping moves it back up, exactly like
/// `stmdb sp!` and `ldmia sp!` do.
pub(crate) struct StackPusher(*mut u32);

impl StackPusher {
    /// Make a new full-descending stack cursor from the given pointer
    ///
    /// It will not write to the given pointer, but it will write immediately
    /// below it - because this is a Full Descending stack.
    ///
    /// # Safety
    ///
    /// There must be enough free space below the given pointer to accept all
    /// the items you are going to push, and enough initialised words at and
    /// above it for all the items you are going to pop.
    pub(crate) unsafe fn new(stack_ptr: *mut u32) -> StackPusher {
        StackPusher(stack_ptr)
    }

    /// Push something onto the stack, decrementing the pointer
    pub(crate) fn push(&mut self, value: u32) {
        // SAFETY: the caller of `new` promised there was room
        unsafe {
            self.0 = self.0.offset(-1);
            self.0.write_volatile(value);
        }
    }

    /// Pop something off the stack, incrementing the pointer
    pub(crate) fn pop(&mut self) -> u32 {
        // SAFETY: the caller of `new` promised this word was initialised
        unsafe {
            let value = self.0.read_volatile();
            self.0 = self.0.offset(1);
            value
        }
    }

    /// Get the current stack pointer value
    pub(crate) fn current(&self) -> *mut u32 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_in_reverse_push_order() {
        let mut buffer = [0u32; 4];
        let top = buffer.as_mut_ptr_range().end;
        let mut pusher = unsafe { StackPusher::new(top) };
        pusher.push(1);
        pusher.push(2);
        pusher.push(3);
        assert_eq!(pusher.current(), unsafe { top.sub(3) });
        assert_eq!(pusher.pop(), 3);
        assert_eq!(pusher.pop(), 2);
        assert_eq!(pusher.pop(), 1);
        assert_eq!(pusher.current(), top);
        assert_eq!(buffer, [0, 3, 2, 1]);
    }
}

// End of File
