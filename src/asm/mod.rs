//! Appropriate assembly language routines for the architecture
//!
//! Each variant provides a `PendSV` handler that stacks the outgoing task's
//! callee-saved registers, calls [`switch_context`] to pick the incoming
//! task, and unstacks that task's callee-saved registers.

// Copyright (c) 2025 Ferrous Systems
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::Scheduler;

#[cfg(all(
    arm_abi = "eabi",
    any(arm_architecture = "v6-m", arm_architecture = "v8-m.base")
))]
mod eabi_v6;

#[cfg(all(
    arm_abi = "eabi",
    not(any(arm_architecture = "v6-m", arm_architecture = "v8-m.base"))
))]
mod eabi;

#[cfg(arm_abi = "eabihf")]
mod eabihf;

/// The select phase of a task switch
///
/// PendSV calls this with the outgoing task's stack pointer in `r0`, once
/// everything the task needs has been pushed on to it. We hand back, in
/// `r0`, the stack pointer of the task to resume.
///
/// # Safety
///
/// Only PendSV may call this.
unsafe extern "C" fn switch_context(saved_sp: *mut u32) -> *mut u32 {
    let Some(scheduler) = Scheduler::get_scheduler() else {
        panic!("PendSV fired before the scheduler was started");
    };
    // SAFETY: PendSV has just stacked a full continuation at `saved_sp`
    unsafe { scheduler.switch_context(saved_sp) }
}

// End of File
