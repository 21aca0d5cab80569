//! A pre-emptive, tick-driven, round-robin task scheduler for Arm Cortex-M
//!
//! You give it a fixed list of tasks, each with its own stack. The first
//! task is the idle task. SysTick fires once per tick; every tick the next
//! ready task gets a turn, and a task can give up the processor for a number
//! of ticks with [`delay`]. Tasks never finish, and none can be added once
//! the scheduler has started.
//!
//! ```rust,ignore
//! static TASK_LIST: [Task; 2] = [
//!     Task::new(rrsched::idle, &IDLE_STACK),
//!     Task::new(blinky, &BLINKY_STACK),
//! ];
//!
//! static SCHEDULER: Scheduler = Scheduler::new(&TASK_LIST);
//!
//! #[cortex_m_rt::entry]
//! fn main() -> ! {
//!     let cp = cortex_m::Peripherals::take().unwrap();
//!     SCHEDULER.start(cp.SCB, cp.SYST, TickConfig::STM32F4_HSI_1KHZ);
//! }
//! ```
//!
//! This crate only builds for Arm targets, except when running its unit
//! tests on the host.

// Copyright (c) 2025 Ferrous Systems
// SPDX-License-Identifier: GPL-3.0-or-later

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

#[cfg(target_arch = "arm")]
mod asm;
mod config;
pub mod fault;
mod frame;
mod port;
mod scheduler;
mod stack;
mod stack_pusher;
mod task;

pub use config::TickConfig;
pub use frame::Continuation;
pub use scheduler::{Scheduler, TaskId, select_next};
pub use stack::{Stack, StackPool};
use stack_pusher::StackPusher;
pub use task::{Task, TaskEntryFn, TaskState};

/// Block the calling task for the given number of ticks
///
/// The task runs again on tick `now() + ticks`, or as soon after that as the
/// round-robin gets back to it. `delay(0)` just lets the next ready task
/// have the rest of this tick. Does nothing if the scheduler is not running.
pub fn delay(ticks: u32) {
    if let Some(scheduler) = Scheduler::get_scheduler() {
        scheduler.delay(ticks);
    }
}

/// Get the current time in ticks
///
/// Returns `u32::MAX` if the scheduler is not running.
pub fn now() -> u32 {
    Scheduler::get_scheduler()
        .map(Scheduler::now)
        .unwrap_or(u32::MAX)
}

/// Get the ID of the currently running task
///
/// Returns an invalid ID if the scheduler is not running.
pub fn task_id() -> TaskId {
    Scheduler::get_scheduler()
        .map(Scheduler::current_task_id)
        .unwrap_or(TaskId::invalid())
}

/// A suitable body for the idle task
///
/// Sleeps until the next interrupt, forever.
pub fn idle() -> ! {
    loop {
        #[cfg(target_arch = "arm")]
        cortex_m::asm::wfi();
        #[cfg(not(target_arch = "arm"))]
        core::hint::spin_loop();
    }
}

/// SysTick Handler
///
/// Drives the scheduler's tick. Runs at a higher priority than PendSV, so
/// a task switch never interrupts it.
#[cfg(target_arch = "arm")]
#[unsafe(no_mangle)]
extern "C" fn SysTick() {
    if let Some(scheduler) = Scheduler::get_scheduler() {
        scheduler.sched_tick();
    }
}

// End of File
