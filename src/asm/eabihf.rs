//! Armv7-M EABIHF code

// Copyright (c) 2025 Ferrous Systems
// SPDX-License-Identifier: GPL-3.0-or-later

/// PendSV Handler for Armv7-M or Armv8-M Mainline EABIHF
///
/// This is the task switch code. It is called by hardware when the PendSV bit
/// is set and all other interrupts have finished.
///
/// On entry, we will find that xPSR, PC, LR, R12, R3, R2, R1 and R0 have
/// been pushed onto the PSP, along with either the low FPU registers, or
/// space for the low FPU registers. We push the remaining registers (which
/// are as the running task left them) and inspect LR to see if we also need
/// to push the high FPU registers (because LR is set by the hardware on
/// exception entry to tell us the FPU state of the task we interrupted). We
/// then let the scheduler pick a task and restore its registers (including
/// the high FPU registers if required). Exiting from this function will
/// cause the hardware to restore PC, LR, R12, R3, R2, R1, R0 and xPSR from
/// the new task's PSP (along with the low FPU state, if required), and so
/// the new task will resume.
///
/// It is a naked function because we do not want the compiler pushing
/// anything else to the stack and re-using registers containing precious task
/// state.
#[unsafe(no_mangle)]
#[unsafe(naked)]
unsafe extern "C" fn PendSV() {
    // NOTE: This code must NOT touch r4-r11 until they are stacked. It can
    // ONLY touch r0-r3 and r12, because those registers were stacked by the
    // hardware on exception entry.

    core::arch::naked_asm!(r#"
    // Workaround https://github.com/rust-lang/rust/issues/127269
    .fpu vfpv3

    //
    // Save phase
    //

    // r0 = the current task stack pointer
    mrs      r0, psp

    // Did the task we just interrupted use the FPU? (i.e. is bit 4 clear in LR?)
    tst      lr, #0x10

    // If FPU was used, stack the high FPU registers. Exception entry handled the low ones.
    it       eq
    vstmdbeq r0!, {{ s16 - s31 }}

    // Push the additional state into stack at r0
    stmdb    r0!, {{ r4 - r11, lr }}

    //
    // Select phase
    //
    // r0 = the outgoing task's stack pointer on the way in, and the
    // incoming task's stack pointer on the way out. We have already saved
    // lr, and the callee will preserve s16-s31 for us.
    //

    bl       {switch_context}

    //
    // Restore phase
    //

    // Pop the additional state from r0
    ldmia    r0!, {{ r4 - r11, lr }}

    // Did the task we just resumed use the FPU? (i.e. is bit 4 clear in LR?)
    tst      lr, #0x10

    // If FPU was used, unstack the high FPU registers
    it       eq
    vldmiaeq r0!, {{ s16 - s31 }}

    // Set the current task stack pointer
    msr      psp, r0

    //
    // return to the task
    //

    bx       lr
    "#,
    switch_context = sym super::switch_context,
    );
}

// End of File
