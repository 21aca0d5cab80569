//! Holds the [`Continuation`] type, the saved state of a suspended task

// Copyright (c) 2025 Ferrous Systems
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::{StackPusher, task::TaskEntryFn};

/// Everything we need to resume a suspended task
///
/// This is laid out exactly as it sits on a task's stack, lowest address
/// first. The first nine words are stacked by our PendSV handler, the
/// remaining eight are the basic exception frame stacked by the hardware on
/// exception entry.
///
/// A brand new task gets one of these built for it by
/// [`Continuation::new`], so that its first resume is no different to any
/// other.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, defmt::Format)]
pub struct Continuation {
    /// R4 to R11, which the hardware does not stack for us
    pub callee_saved: [u32; 8],
    /// The EXC_RETURN value PendSV will `bx` to
    pub exc_return: u32,
    /// R0 to R3
    pub args: [u32; 4],
    /// R12
    pub r12: u32,
    /// The task's Link Register
    pub lr: u32,
    /// Where the task resumes
    pub pc: u32,
    /// The task's Program Status Register
    pub xpsr: u32,
}

impl Continuation {
    /// The number of 32-bit words a continuation occupies on the stack
    pub const WORDS: usize = core::mem::size_of::<Continuation>() / 4;

    /// The value of the Program Status Register when a task starts
    ///
    /// The only bit we need to set is the T bit, to indicate that the
    /// task should run in Thumb mode (the only supported mode on Arm M-profile)
    pub const DEFAULT_XPSR: u32 = 1 << 24;

    /// Return to Thread Mode, on the Process Stack, with a basic (non-FPU)
    /// frame.
    pub const EXC_RETURN_THREAD_PSP: u32 = 0xFFFF_FFFD;

    /// Build the continuation for a task that has never run
    ///
    /// All the general purpose registers are zero, and the task starts at
    /// the top of `entry_fn`.
    pub fn new(entry_fn: TaskEntryFn) -> Continuation {
        Continuation {
            callee_saved: [0; 8],
            // This copy does not have the FPU bit set, so we don't need an
            // extended frame or the high FPU registers in the initial state.
            exc_return: Self::EXC_RETURN_THREAD_PSP,
            args: [0; 4],
            r12: 0,
            // Tasks never return, so there is nowhere sensible to return to
            lr: 0,
            pc: entry_fn as usize as u32,
            xpsr: Self::DEFAULT_XPSR,
        }
    }

    /// Write this continuation immediately below `stack_top`
    ///
    /// Returns the new stack pointer, which is what the task's saved stack
    /// pointer must be set to.
    ///
    /// # Safety
    ///
    /// There must be at least [`Continuation::WORDS`] free, writable words
    /// immediately below `stack_top`, and nothing may be using them.
    pub unsafe fn push_onto(&self, stack_top: *mut u32) -> *mut u32 {
        // SAFETY: the caller promised us the space
        let mut stack_pusher = unsafe { StackPusher::new(stack_top) };

        // Standard Arm exception frame, highest address first
        stack_pusher.push(self.xpsr);
        stack_pusher.push(self.pc);
        stack_pusher.push(self.lr);
        stack_pusher.push(self.r12);
        for reg in self.args.iter().rev() {
            stack_pusher.push(*reg);
        }

        // Additional task state our PendSV handler persists
        stack_pusher.push(self.exc_return);
        for reg in self.callee_saved.iter().rev() {
            stack_pusher.push(*reg);
        }

        stack_pusher.current()
    }

    /// Read a continuation back off a suspended task's stack
    ///
    /// This pops words in the same order as the restore half of our PendSV
    /// handler followed by the hardware's exception return. Returns the
    /// continuation and the stack pointer the task would resume with.
    ///
    /// # Safety
    ///
    /// `stack_ptr` must point at a complete continuation, as left by
    /// [`Continuation::push_onto`] or by PendSV when it suspended a task.
    /// Tasks suspended with an extended (FPU) frame cannot be read this way.
    pub unsafe fn restore_from(stack_ptr: *mut u32) -> (Continuation, *mut u32) {
        // SAFETY: the caller promised there is a full continuation here
        let mut stack_popper = unsafe { StackPusher::new(stack_ptr) };

        // What PendSV pops with `ldmia r0!, { r4 - r11, lr }`
        let mut callee_saved = [0u32; 8];
        for reg in callee_saved.iter_mut() {
            *reg = stack_popper.pop();
        }
        let exc_return = stack_popper.pop();

        // What the hardware pops on exception return
        let mut args = [0u32; 4];
        for reg in args.iter_mut() {
            *reg = stack_popper.pop();
        }
        let r12 = stack_popper.pop();
        let lr = stack_popper.pop();
        let pc = stack_popper.pop();
        let xpsr = stack_popper.pop();

        let continuation = Continuation {
            callee_saved,
            exc_return,
            args,
            r12,
            lr,
            pc,
            xpsr,
        };
        (continuation, stack_popper.current())
    }

    /// The address execution resumes at, with the Thumb bit cleared
    pub const fn resume_address(&self) -> u32 {
        self.pc & !1
    }

    /// Will this continuation resume in Thumb state?
    pub const fn is_thumb(&self) -> bool {
        (self.xpsr & Self::DEFAULT_XPSR) != 0
    }

    /// Does this continuation return to Thread Mode on the Process Stack?
    pub const fn returns_to_process_stack(&self) -> bool {
        // EXC_RETURN bit 2 selects PSP, bit 3 selects Thread Mode
        (self.exc_return & 0b1100) == 0b1100
    }
}

const _: () = assert!(Continuation::WORDS == 17);


// End of File
