//! Cortex-M implementation of the port operations

// Copyright (c) 2025 Ferrous Systems
// SPDX-License-Identifier: GPL-3.0-or-later

use cortex_m::peripheral::SCB;

/// Ask for a context switch, by pending PendSV
#[inline]
pub(crate) fn request_switch() {
    SCB::set_pendsv();
}

/// Flush the pipeline, so a pending PendSV fires before we go any further
#[inline]
pub(crate) fn switch_barrier() {
    cortex_m::asm::dsb();
    cortex_m::asm::isb();
}

/// Load the Process Stack Pointer
///
/// # Safety
///
/// Must only be called from Handler mode, or from Thread mode while running
/// on the Main stack, and `stack_ptr` must be a valid 8-byte aligned stack.
#[inline]
pub(crate) unsafe fn set_process_stack(stack_ptr: *mut u32) {
    #[allow(unused_unsafe)]
    unsafe {
        cortex_m::register::psp::write(stack_ptr as u32);
    }
}

// End of File
