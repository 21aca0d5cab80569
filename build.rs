//! Build script for rrsched
//!
//! Emits the `arm_abi` and `arm_architecture` cfgs that select which
//! PendSV implementation and tick-counter strategy we compile.

// Copyright (c) 2025 Ferrous Systems
// SPDX-License-Identifier: GPL-3.0-or-later

/// Entry point to the build script
fn main() {
    arm_targets::process();
}

// End of File
