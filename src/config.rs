//! Holds the [`TickConfig`] type

// Copyright (c) 2025 Ferrous Systems
// SPDX-License-Identifier: GPL-3.0-or-later

/// How fast the scheduler ticks
///
/// SysTick counts down from a reload value once per core clock cycle, and
/// fires when it wraps, so one scheduler tick is `reload + 1` core clocks.
#[derive(Copy, Clone, Debug, PartialEq, Eq, defmt::Format)]
pub struct TickConfig {
    /// The clock feeding SysTick, in Hz
    core_clock_hz: u32,
    /// Scheduler ticks per second
    tick_hz: u32,
}

impl TickConfig {
    /// The largest value the 24-bit SysTick reload register can hold
    pub const MAX_RELOAD: u32 = 0x00FF_FFFF;

    /// An STM32F4 running from its 16 MHz internal oscillator, ticking at 1 kHz
    pub const STM32F4_HSI_1KHZ: TickConfig = TickConfig::new(16_000_000, 1_000);

    /// Create a new tick configuration
    ///
    /// Panics (at compile time, when used in a `const`) if the resulting
    /// SysTick reload value is zero or does not fit in 24 bits.
    pub const fn new(core_clock_hz: u32, tick_hz: u32) -> TickConfig {
        assert!(tick_hz > 0);
        assert!(core_clock_hz / tick_hz > 1);
        assert!(core_clock_hz / tick_hz - 1 <= Self::MAX_RELOAD);
        TickConfig {
            core_clock_hz,
            tick_hz,
        }
    }

    /// Scheduler ticks per second
    pub const fn tick_hz(&self) -> u32 {
        self.tick_hz
    }

    /// The clock feeding SysTick, in Hz
    pub const fn core_clock_hz(&self) -> u32 {
        self.core_clock_hz
    }

    /// The value to program into the SysTick reload register
    pub const fn reload(&self) -> u32 {
        (self.core_clock_hz / self.tick_hz) - 1
    }

    /// Convert a period in milliseconds to a number of scheduler ticks
    ///
    /// Rounds down, so anything shorter than one tick becomes zero.
    pub const fn ticks_from_millis(&self, millis: u32) -> u32 {
        ((millis as u64 * self.tick_hz as u64) / 1000) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stm32f4_reload() {
        let config = TickConfig::STM32F4_HSI_1KHZ;
        assert_eq!(config.reload(), 15_999);
        assert_eq!(config.tick_hz(), 1_000);
    }

    #[test]
    fn millis_to_ticks() {
        let config = TickConfig::STM32F4_HSI_1KHZ;
        assert_eq!(config.ticks_from_millis(1000), 1000);
        assert_eq!(config.ticks_from_millis(125), 125);

        let slow = TickConfig::new(16_000_000, 100);
        assert_eq!(slow.ticks_from_millis(125), 12);
        assert_eq!(slow.ticks_from_millis(5), 0);
    }

    #[test]
    #[should_panic]
    fn reload_must_fit_in_24_bits() {
        let _ = TickConfig::new(168_000_000, 1);
    }

    #[test]
    #[should_panic]
    fn zero_tick_rate_rejected() {
        let _ = TickConfig::new(16_000_000, 0);
    }
}

// End of File
