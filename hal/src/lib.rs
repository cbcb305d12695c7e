//! Hardware Abstraction Layer (HAL) for embedded systems
//!
//! This crate provides vendor-agnostic traits for the peripherals a bare-metal
//! superloop needs: GPIO pins, a periodic timer, and a millisecond tick counter
//! that drives blocking delays.

#![cfg_attr(not(feature = "std"), no_std)]

pub mod error;
pub mod gpio;
pub mod timer;

// Re-export commonly used types
pub use error::{HalError, HalResult};
pub use gpio::{GpioPin, Level, PinMode};
pub use timer::{TickCounter, TickDelay, Timer, TimerMode};
