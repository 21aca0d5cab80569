//! Common panic/fault/timestamp handlers and the LED driver for the demos

// Copyright (c) 2025 Ferrous Systems
// SPDX-License-Identifier: GPL-3.0-or-later

#![no_std]

use defmt_semihosting as _;

pub mod led;

/// Called when a panic occurs.
///
/// Logs the panic to defmt and then crashes the CPU.
#[panic_handler]
fn panic(info: &core::panic::PanicInfo) -> ! {
    defmt::println!("PANIC: {}", defmt::Debug2Format(info));
    cortex_m::asm::udf();
}

/// Called when a HardFault occurs.
///
/// Logs the fault to defmt and then crashes the CPU.
#[cortex_m_rt::exception]
unsafe fn HardFault(info: &cortex_m_rt::ExceptionFrame) -> ! {
    defmt::println!("FAULT: {}", defmt::Debug2Format(info));
    #[cfg(not(any(arm_architecture = "v6-m", arm_architecture = "v8-m.base")))]
    rrsched::fault::report_and_halt("HardFault");
    #[cfg(any(arm_architecture = "v6-m", arm_architecture = "v8-m.base"))]
    cortex_m::asm::udf();
}

/// Called on a memory protection fault, once enabled by the scheduler
#[cfg(not(any(arm_architecture = "v6-m", arm_architecture = "v8-m.base")))]
#[cortex_m_rt::exception]
fn MemoryManagement() -> ! {
    rrsched::fault::report_and_halt("MemManage");
}

/// Called on a bus error, once enabled by the scheduler
#[cfg(not(any(arm_architecture = "v6-m", arm_architecture = "v8-m.base")))]
#[cortex_m_rt::exception]
fn BusFault() -> ! {
    rrsched::fault::report_and_halt("BusFault");
}

/// Called on an instruction execution fault, once enabled by the scheduler
#[cfg(not(any(arm_architecture = "v6-m", arm_architecture = "v8-m.base")))]
#[cortex_m_rt::exception]
fn UsageFault() -> ! {
    rrsched::fault::report_and_halt("UsageFault");
}

// Log scheduler ticks in the defmt logs
defmt::timestamp!("{=u32:010} {}", rrsched::now(), rrsched::task_id());

// End of File
