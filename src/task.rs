//! Holds the [`Task`] type and methods

// Copyright (c) 2025 Ferrous Systems
// SPDX-License-Identifier: GPL-3.0-or-later

use core::sync::atomic::{AtomicPtr, AtomicU8, AtomicU32, Ordering};

use crate::{Scheduler, Stack};

/// The function a task starts in. Tasks never finish.
pub type TaskEntryFn = fn() -> !;

/// Whether the scheduler may pick a task
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, defmt::Format)]
pub enum TaskState {
    /// Can be picked to run
    Ready = 0,
    /// Waiting for its wake tick
    Blocked = 1,
}

impl TaskState {
    const fn from_u8(value: u8) -> TaskState {
        match value {
            0 => TaskState::Ready,
            _ => TaskState::Blocked,
        }
    }
}

/// Represents a task that the scheduler is managing
///
/// The `state` and `wake_tick` fields are shared between task context and
/// the SysTick handler. Any read-modify-write of them from task context must
/// happen inside a critical section.
#[repr(C)]
pub struct Task {
    /// Saved process stack pointer, stale while the task is running
    stack: AtomicPtr<u32>,
    /// The tick on which a blocked task becomes ready
    wake_tick: AtomicU32,
    /// A [`TaskState`], as a `u8`
    state: AtomicU8,
    /// Where the task starts
    entry_fn: TaskEntryFn,
}

impl Task {
    /// Create a new [`Task`] object
    ///
    /// The stack must be at least [`Scheduler::MIN_STACK_SIZE`] bytes long.
    pub const fn new<const N: usize>(entry_fn: TaskEntryFn, stack: &Stack<N>) -> Task {
        assert!(N >= Scheduler::MIN_STACK_SIZE);
        Task {
            stack: AtomicPtr::new(stack.top()),
            wake_tick: AtomicU32::new(0),
            state: AtomicU8::new(TaskState::Ready as u8),
            entry_fn,
        }
    }

    /// Get the initial entry function for this task
    pub const fn entry_fn(&self) -> TaskEntryFn {
        self.entry_fn
    }

    /// Get the current stack pointer for this task
    pub fn stack(&self) -> *mut u32 {
        self.stack.load(Ordering::Relaxed)
    }

    /// Set the current stack pointer for this task
    ///
    /// # Safety
    ///
    /// The task will execute using the stack given, so it must point to the
    /// last item in a valid Arm EABI stack, with a full
    /// [`Continuation`](crate::Continuation) proceeding it.
    pub unsafe fn set_stack(&self, new_stack: *mut u32) {
        self.stack.store(new_stack, Ordering::Relaxed)
    }

    /// Is this task blocked or ready?
    pub fn state(&self) -> TaskState {
        TaskState::from_u8(self.state.load(Ordering::Relaxed))
    }

    /// Can this task be picked to run?
    pub fn is_ready(&self) -> bool {
        self.state() == TaskState::Ready
    }

    /// The tick this task wakes on. Meaningless unless it is blocked.
    pub fn wake_tick(&self) -> u32 {
        self.wake_tick.load(Ordering::Relaxed)
    }

    /// Mark this task as blocked until the given tick
    ///
    /// Call with interrupts masked, so SysTick never sees the new state with
    /// the old wake tick.
    pub(crate) fn block_until(&self, wake_tick: u32) {
        self.wake_tick.store(wake_tick, Ordering::Relaxed);
        self.state.store(TaskState::Blocked as u8, Ordering::Relaxed);
    }

    /// Unblock this task if `now` is exactly its wake tick
    ///
    /// Returns `true` if the task was woken.
    pub(crate) fn wake_if_due(&self, now: u32) -> bool {
        if self.state() == TaskState::Blocked && self.wake_tick() == now {
            self.state.store(TaskState::Ready as u8, Ordering::Relaxed);
            true
        } else {
            false
        }
    }
}

// SAFETY: every field is either immutable or an atomic
unsafe impl Sync for Task {}

#[cfg(test)]
mod tests {
    use super::*;

    fn never_returns() -> ! {
        loop {
            core::hint::spin_loop();
        }
    }

    static STACK: Stack<{ Scheduler::MIN_STACK_SIZE }> = Stack::new();

    #[test]
    fn new_task_is_ready_at_top_of_stack() {
        let task = Task::new(never_returns, &STACK);
        assert!(task.is_ready());
        assert_eq!(task.stack(), STACK.top());
    }

    #[test]
    fn only_wakes_on_exact_tick() {
        let task = Task::new(never_returns, &STACK);
        task.block_until(10);
        assert_eq!(task.state(), TaskState::Blocked);
        assert!(!task.wake_if_due(9));
        assert!(!task.wake_if_due(11));
        assert_eq!(task.state(), TaskState::Blocked);
        assert!(task.wake_if_due(10));
        assert!(task.is_ready());
        // a ready task is not "woken" again
        assert!(!task.wake_if_due(10));
    }
}

// End of File
