//! Armv6-M EABI code

// Copyright (c) 2025 Ferrous Systems
// SPDX-License-Identifier: GPL-3.0-or-later

/// PendSV Handler for Armv6-M or Armv8-M Baseline EABI
///
/// This is the task switch code. It is called by hardware when the PendSV bit
/// is set and all other interrupts have finished. It uses only the Armv6-M
/// subset instructions, which cannot store the high registers directly and
/// can only do incrementing multiple-loads and stores. So we make room for
/// the whole block first, then fill it in from the bottom.
///
/// The stack ends up laid out exactly as it would be on Armv7-M: R4 at the
/// lowest address, then R5 to R11, then EXC_RETURN.
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

    // r0 = the current task stack pointer, less room for nine words
    mrs     r0, psp
    subs    r0, #36

    // r1 = a cursor we can walk upwards
    mov     r1, r0

    // R4 - R7 go in first
    stmia   r1!, {{ r4 - r7 }}

    // then R8 - R11, via the low registers we just saved
    mov     r4, r8
    mov     r5, r9
    mov     r6, r10
    mov     r7, r11
    stmia   r1!, {{ r4 - r7 }}

    // then EXC_RETURN
    mov     r2, lr
    stmia   r1!, {{ r2 }}

    //
    // Select phase
    //
    // r0 = the outgoing task's stack pointer on the way in, and the
    // incoming task's stack pointer on the way out.
    //

    bl      {switch_context}

    //
    // Restore phase
    //

    // r1 = where R8 - R11 live
    mov     r1, r0
    adds    r1, #16

    // Pop R8 - R11, via the low registers
    ldmia   r1!, {{ r4 - r7 }}
    mov     r8, r4
    mov     r9, r5
    mov     r10, r6
    mov     r11, r7

    // Pop EXC_RETURN
    ldmia   r1!, {{ r2 }}
    mov     lr, r2

    // r1 now points at the hardware frame - that's our new PSP
    msr     psp, r1

    // Finally pop the real R4 - R7
    ldmia   r0!, {{ r4 - r7 }}

    //
    // return to the task
    //

    bx      lr
    "#,
    switch_context = sym super::switch_context,
    );
}

// End of File
