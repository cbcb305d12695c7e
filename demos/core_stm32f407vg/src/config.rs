//! Board and application constants

use hal_cmsis::discovery::Led;

/// Core clock after reset: the 16 MHz internal HSI oscillator, no PLL
pub const CORE_CLOCK_HZ: u32 = 16_000_000;

/// SysTick interrupt rate; one tick per millisecond
pub const TICK_RATE_HZ: u32 = 1_000;

pub const BLINK_LED: Led = Led::Green;
pub const BLINK_ON_MS: u32 = 1_000;
pub const BLINK_OFF_MS: u32 = 1_000;
