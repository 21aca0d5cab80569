//! Port operations for host unit tests
//!
//! There is no PendSV on the host, so a pending switch is just a flag. Each
//! test thread gets its own flag so tests can run in parallel.

// Copyright (c) 2025 Ferrous Systems
// SPDX-License-Identifier: GPL-3.0-or-later

use std::cell::Cell;

std::thread_local! {
    static SWITCH_PENDING: Cell<bool> = const { Cell::new(false) };
}

/// Ask for a context switch
pub(crate) fn request_switch() {
    SWITCH_PENDING.set(true);
}

/// Is a context switch waiting to happen?
pub(crate) fn is_switch_pending() -> bool {
    SWITCH_PENDING.get()
}

/// Nothing to flush on the host
pub(crate) fn switch_barrier() {}

/// Clear the pending switch, as taking PendSV does, reporting whether there
/// was one
pub(crate) fn take_switch_request() -> bool {
    SWITCH_PENDING.replace(false)
}

// End of File
