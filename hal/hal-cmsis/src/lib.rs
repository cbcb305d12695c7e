//! ARM CMSIS HAL implementation
//!
//! Register-level implementation of the HAL traits for Cortex-M
//! microcontrollers: a memory-mapped [`bus`], the core [`systick`] timer and,
//! per vendor feature, the GPIO and clock-enable registers of the part.
//!
//! ## Features
//! - `stm32f4xx` - STM32F4 GPIO/RCC support and the STM32F4-Discovery LEDs
//! - `defmt` - `defmt::Format` for the public types
//!
//! ## Example
//! ```no_run
//! use hal_cmsis::bus::Mmio;
//! use hal_cmsis::discovery::{Led, Leds};
//!
//! let bus = unsafe { Mmio::new() };
//! let mut leds = Leds::init(bus).unwrap();
//! leds.on(Led::Green).unwrap();
//! ```

#![no_std]

pub mod bus;
pub mod systick;

#[cfg(feature = "stm32f4xx")]
pub mod stm32f4xx;

#[cfg(feature = "stm32f4xx")]
pub mod discovery;

// Re-export commonly used types
pub use bus::{Mmio, RegisterBus};
pub use systick::SysTickTimer;

#[cfg(feature = "stm32f4xx")]
pub use discovery::{Led, Leds};
#[cfg(feature = "stm32f4xx")]
pub use stm32f4xx::{Port, PortPin};
