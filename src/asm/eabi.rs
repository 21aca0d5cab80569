//! Armv7-M EABI code

// Copyright (c) 2025 Ferrous Systems
// SPDX-License-Identifier: GPL-3.0-or-later

/// PendSV Handler for Armv7-M or Armv8-M Mainline EABI
///
/// This is the task switch code. It is called by hardware when the PendSV bit
/// is set and all other interrupts have finished.
///
/// On entry, we will find that xPSR, PC, LR, R12, R3, R2, R1 and R0 have
/// been pushed onto the PSP. We push the remaining registers (which are as
/// the running task left them) and the EXC_RETURN value, let the scheduler
/// pick a task, then pop the same registers from that task's stack. Exiting
/// from this function will cause the hardware to restore PC, LR, R12, R3,
/// R2, R1, R0 and xPSR from the new task's PSP, and so the new task will
/// resume.
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
    //
    // Save phase
    //

    // r0 = the current task stack pointer
    mrs     r0, psp

    // Push the additional state into stack at r0
    stmdb   r0!, {{ r4 - r11, lr }}

    //
    // Select phase
    //
    // r0 = the outgoing task's stack pointer on the way in, and the
    // incoming task's stack pointer on the way out. We have already saved
    // lr, so we can clobber it.
    //

    bl      {switch_context}

    //
    // Restore phase
    //

    // Pop the additional state from r0
    ldmia   r0!, {{ r4 - r11, lr }}

    // Set the current task stack pointer
    msr     psp, r0

    //
    // return to the task
    //

    bx      lr
    "#,
    switch_context = sym super::switch_context,
    );
}

// End of File
