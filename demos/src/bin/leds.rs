//! Blinks the four LEDs on an STM32F4-Discovery, each from its own task
//!
//! Green toggles every second, orange every 500 ms, blue every 250 ms and
//! red every 125 ms. All four tasks spend almost all of their time blocked,
//! so the idle task gets the rest.

// Copyright (c) 2025 Ferrous Systems
// SPDX-License-Identifier: GPL-3.0-or-later

#![no_std]
#![no_main]

use rrsched::{Scheduler, StackPool, Task, TickConfig};
use rrsched_demos::led::Led;

/// 16 MHz internal oscillator, 1 ms ticks
const TICKS: TickConfig = TickConfig::STM32F4_HSI_1KHZ;

/// One 1 KiB stack for each task, carved out of a single block of RAM
static STACKS: StackPool<5, 1024> = StackPool::new();

static TASK_LIST: [Task; 5] = [
    Task::new(rrsched::idle, STACKS.region(0)),
    Task::new(green, STACKS.region(1)),
    Task::new(orange, STACKS.region(2)),
    Task::new(blue, STACKS.region(3)),
    Task::new(red, STACKS.region(4)),
];

static SCHEDULER: Scheduler = Scheduler::new(&TASK_LIST);

#[cortex_m_rt::entry]
fn main() -> ! {
    let cp = cortex_m::Peripherals::take().unwrap();
    defmt::info!("This is a task scheduler demo.");
    Led::init_all();
    SCHEDULER.start(cp.SCB, cp.SYST, TICKS);
}

/// Toggle an LED forever, spending `half_period_ms` on and then off
fn blink(led: Led, half_period_ms: u32) -> ! {
    let ticks = TICKS.ticks_from_millis(half_period_ms);
    loop {
        defmt::debug!("{} on", led);
        led.on();
        rrsched::delay(ticks);
        defmt::debug!("{} off", led);
        led.off();
        rrsched::delay(ticks);
    }
}

/// Our green LED task
fn green() -> ! {
    defmt::info!("This is Task 1");
    blink(Led::Green, 1000)
}

/// Our orange LED task
fn orange() -> ! {
    blink(Led::Orange, 500)
}

/// Our blue LED task
fn blue() -> ! {
    blink(Led::Blue, 250)
}

/// Our red LED task
fn red() -> ! {
    blink(Led::Red, 125)
}

// End of File
