//! An example with three tasks that all give up their time slice as soon as
//! they have logged something

// Copyright (c) 2025 Ferrous Systems
// SPDX-License-Identifier: GPL-3.0-or-later

#![no_std]
#![no_main]

use rrsched::{Scheduler, Stack, Task, TickConfig};

use rrsched_demos as _;

static SCHEDULER: Scheduler = Scheduler::new({
    static TASK_LIST: [Task; 4] = [
        Task::new(rrsched::idle, {
            static STACK: Stack<256> = Stack::new();
            &STACK
        }),
        Task::new(rabbits, {
            static STACK: Stack<1024> = Stack::new();
            &STACK
        }),
        Task::new(hamsters, {
            static STACK: Stack<1024> = Stack::new();
            &STACK
        }),
        Task::new(cats, {
            static STACK: Stack<1024> = Stack::new();
            &STACK
        }),
    ];
    &TASK_LIST
});

#[cortex_m_rt::entry]
fn main() -> ! {
    let cp = cortex_m::Peripherals::take().unwrap();
    defmt::info!("Hello!");
    // a slow tick, so the log is readable
    SCHEDULER.start(cp.SCB, cp.SYST, TickConfig::new(16_000_000, 10));
}

/// Our 'rabbit' task
fn rabbits() -> ! {
    loop {
        defmt::info!("Rabbit!");
        rrsched::delay(0);
    }
}

/// Our 'hamster' task
fn hamsters() -> ! {
    loop {
        defmt::info!("Hamster!");
        rrsched::delay(0);
    }
}

/// Our 'cat' task
fn cats() -> ! {
    loop {
        defmt::info!("Cat!");
        rrsched::delay(0);
    }
}

// End of File
