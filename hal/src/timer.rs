//! Timer abstraction and the millisecond tick counter
//!
//! A periodic [`Timer`] interrupt calls [`TickCounter::tick`]; the
//! superloop waits on the same counter through [`TickCounter::delay_ms`]
//! or the [`TickDelay`] adapter.

use core::sync::atomic::{AtomicU32, Ordering};

use embedded_hal::delay::DelayNs;

use crate::error::HalResult;

const NS_PER_MS: u32 = 1_000_000;
const US_PER_MS: u32 = 1_000;

/// Timer mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerMode {
    OneShot,
    Periodic,
}

/// Timer trait
pub trait Timer {
    /// Start timer with specified period in microseconds
    fn start(&mut self, period_us: u64, mode: TimerMode) -> HalResult<()>;

    /// Stop timer
    fn stop(&mut self) -> HalResult<()>;

    /// Get current counter value
    fn counter(&self) -> u64;

    /// Enable interrupt on timeout
    fn enable_interrupt(&mut self) -> HalResult<()>;

    /// Disable interrupt
    fn disable_interrupt(&mut self) -> HalResult<()>;
}

/// Millisecond tick counter shared between a timer interrupt and the
/// main loop.
///
/// Exactly one context is expected to call [`tick`](Self::tick). Any number
/// of contexts may read it. The count wraps after `u32::MAX` ticks (about
/// 49.7 days at 1 kHz) and every comparison accounts for that.
#[derive(Debug)]
pub struct TickCounter {
    ticks: AtomicU32,
}

impl TickCounter {
    /// Create a counter starting at zero
    pub const fn new() -> Self {
        Self::starting_at(0)
    }

    /// Create a counter starting at an arbitrary tick value
    pub const fn starting_at(ticks: u32) -> Self {
        Self {
            ticks: AtomicU32::new(ticks),
        }
    }

    /// Advance the counter by one tick.
    ///
    /// Meant to be called from the timer interrupt handler.
    #[inline]
    pub fn tick(&self) {
        self.ticks.fetch_add(1, Ordering::Release);
    }

    /// Current tick count
    #[inline]
    pub fn now(&self) -> u32 {
        self.ticks.load(Ordering::Acquire)
    }

    /// Ticks elapsed since `start`, modulo 2^32
    #[inline]
    pub fn elapsed_since(&self, start: u32) -> u32 {
        self.now().wrapping_sub(start)
    }

    /// Busy-wait until at least `ms` ticks have elapsed.
    ///
    /// Returns immediately for `ms == 0`. Never returns if the ticking
    /// interrupt is not running.
    pub fn delay_ms(&self, ms: u32) {
        let start = self.now();
        while self.elapsed_since(start) < ms {
            core::hint::spin_loop();
        }
    }
}

impl Default for TickCounter {
    fn default() -> Self {
        Self::new()
    }
}

/// [`DelayNs`] implementation backed by a [`TickCounter`].
///
/// Resolution is one tick, so sub-millisecond requests are rounded up.
#[derive(Debug, Clone, Copy)]
pub struct TickDelay<'a> {
    counter: &'a TickCounter,
}

impl<'a> TickDelay<'a> {
    pub const fn new(counter: &'a TickCounter) -> Self {
        Self { counter }
    }
}

impl DelayNs for TickDelay<'_> {
    fn delay_ns(&mut self, ns: u32) {
        self.counter.delay_ms(ns.div_ceil(NS_PER_MS));
    }

    fn delay_us(&mut self, us: u32) {
        self.counter.delay_ms(us.div_ceil(US_PER_MS));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.counter.delay_ms(ms);
    }
}
