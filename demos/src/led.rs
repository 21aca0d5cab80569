//! The four user LEDs on the STM32F4-Discovery
//!
//! They hang off GPIO port D, pins 12 to 15. We drive them through the
//! bit set/reset register, so tasks can switch their own LED on and off
//! without stepping on each other.

// Copyright (c) 2025 Ferrous Systems
// SPDX-License-Identifier: GPL-3.0-or-later

/// RCC AHB1 peripheral clock enable register
const RCC_AHB1ENR: *mut u32 = 0x4002_3830 as *mut u32;

/// GPIOD clock enable bit in RCC_AHB1ENR
const RCC_AHB1ENR_GPIODEN: u32 = 1 << 3;

/// GPIOD mode register
const GPIOD_MODER: *mut u32 = 0x4002_0C00 as *mut u32;

/// GPIOD bit set/reset register
const GPIOD_BSRR: *mut u32 = 0x4002_0C18 as *mut u32;

/// One of the user LEDs
#[derive(Copy, Clone, Debug, PartialEq, Eq, defmt::Format)]
#[repr(u8)]
pub enum Led {
    /// LD4, on PD12
    Green = 12,
    /// LD3, on PD13
    Orange = 13,
    /// LD5, on PD14
    Red = 14,
    /// LD6, on PD15
    Blue = 15,
}

impl Led {
    /// All the LEDs, in pin order
    pub const ALL: [Led; 4] = [Led::Green, Led::Orange, Led::Red, Led::Blue];

    /// Turn on the GPIO clock, make every LED pin an output, and switch
    /// them all off
    ///
    /// Call this once, from `main`, before starting the scheduler.
    pub fn init_all() {
        // SAFETY: these are the documented register addresses for the
        // STM32F407, and nothing else is touching them yet
        unsafe {
            RCC_AHB1ENR.write_volatile(RCC_AHB1ENR.read_volatile() | RCC_AHB1ENR_GPIODEN);
            let mut moder = GPIOD_MODER.read_volatile();
            for led in Self::ALL {
                // 0b01 is general purpose output
                moder &= !(0b11 << (2 * led.pin()));
                moder |= 0b01 << (2 * led.pin());
            }
            GPIOD_MODER.write_volatile(moder);
        }
        for led in Self::ALL {
            led.off();
        }
    }

    /// Switch the LED on
    pub fn on(self) {
        // SAFETY: a write to BSRR only affects the pins whose bits are set
        unsafe { GPIOD_BSRR.write_volatile(1 << self.pin()) }
    }

    /// Switch the LED off
    pub fn off(self) {
        // SAFETY: a write to BSRR only affects the pins whose bits are set
        unsafe { GPIOD_BSRR.write_volatile(1 << (self.pin() + 16)) }
    }

    /// The GPIOD pin this LED is on
    pub const fn pin(self) -> u32 {
        self as u32
    }
}

// End of File
