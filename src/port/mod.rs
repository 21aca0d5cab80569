//! The handful of processor operations the scheduler needs
//!
//! Only the context switch protocol and start-up call into here. Each
//! operation is tiny and must not disturb any task state beyond what it says
//! it touches.
//!
//! * [`request_switch`] pends the PendSV exception. Pending it again while it
//!   is already pending has no further effect.
//! * [`switch_barrier`] makes sure a pended switch is taken before the next
//!   instruction runs, once interrupts are unmasked.
//! * `set_process_stack` loads PSP. Thread mode is moved onto PSP by the
//!   EXC_RETURN value PendSV returns with, not by writing CONTROL.

// Copyright (c) 2025 Ferrous Systems
// SPDX-License-Identifier: GPL-3.0-or-later

#[cfg(target_arch = "arm")]
mod arm;

#[cfg(target_arch = "arm")]
pub(crate) use arm::*;

#[cfg(all(test, not(target_arch = "arm")))]
mod host;

#[cfg(all(test, not(target_arch = "arm")))]
pub(crate) use host::*;

// End of File
