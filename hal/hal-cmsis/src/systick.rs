//! Cortex-M SysTick timer

use cortex_m::peripheral::scb::SystemHandler;
use cortex_m::peripheral::syst::SystClkSource;
use cortex_m::peripheral::{SCB, SYST};
use hal::error::{HalError, HalResult};
use hal::timer::{Timer, TimerMode};

/// Largest value the 24-bit reload register holds
pub const SYSTICK_MAX_RELOAD: u32 = 0x00FF_FFFF;

/// Lowest exception priority on parts implementing 4 priority bits
pub const SYSTICK_PRIORITY: u8 = 0xF0;

const US_PER_SEC: u64 = 1_000_000;

/// Period in microseconds of a tick running at `tick_rate_hz`
pub fn period_us_for_rate(tick_rate_hz: u32) -> HalResult<u64> {
    if tick_rate_hz == 0 {
        return Err(HalError::InvalidParameter);
    }
    Ok(US_PER_SEC / tick_rate_hz as u64)
}

/// Reload value producing one SysTick wrap every `period_us` when the
/// counter runs from the core clock.
///
/// Fails with `ConfigurationError` when the period is shorter than one core
/// clock cycle or does not fit the 24-bit counter.
pub fn reload_for_period(core_clock_hz: u32, period_us: u64) -> HalResult<u32> {
    if period_us == 0 {
        return Err(HalError::InvalidParameter);
    }

    let ticks = (core_clock_hz as u64)
        .checked_mul(period_us)
        .ok_or(HalError::ConfigurationError)?
        / US_PER_SEC;

    if ticks == 0 || ticks - 1 > SYSTICK_MAX_RELOAD as u64 {
        return Err(HalError::ConfigurationError);
    }
    Ok((ticks - 1) as u32)
}

/// Reload value for a [`Timer::start`] request.
///
/// SysTick only reloads itself, so `OneShot` is rejected with
/// `NotSupported` before the period is looked at.
pub fn reload_for(core_clock_hz: u32, period_us: u64, mode: TimerMode) -> HalResult<u32> {
    match mode {
        TimerMode::OneShot => Err(HalError::NotSupported),
        TimerMode::Periodic => reload_for_period(core_clock_hz, period_us),
    }
}

/// SysTick driven from the processor clock
pub struct SysTickTimer {
    syst: SYST,
    core_clock_hz: u32,
}

impl SysTickTimer {
    /// Take ownership of SysTick. The counter is left untouched until
    /// [`Timer::start`].
    pub fn new(syst: SYST, core_clock_hz: u32) -> Self {
        Self {
            syst,
            core_clock_hz,
        }
    }

    /// Give the SysTick exception the lowest priority so it never preempts
    /// device interrupts.
    pub fn set_lowest_priority(scb: &mut SCB) {
        // SAFETY: changing an exception priority can break priority-based
        // critical sections; nothing in this crate relies on them.
        unsafe { scb.set_priority(SystemHandler::SysTick, SYSTICK_PRIORITY) }
    }
}

impl Timer for SysTickTimer {
    fn start(&mut self, period_us: u64, mode: TimerMode) -> HalResult<()> {
        let reload = reload_for(self.core_clock_hz, period_us, mode)?;

        self.syst.disable_counter();
        self.syst.set_clock_source(SystClkSource::Core);
        self.syst.set_reload(reload);
        self.syst.clear_current();
        self.syst.enable_interrupt();
        self.syst.enable_counter();
        Ok(())
    }

    fn stop(&mut self) -> HalResult<()> {
        self.syst.disable_counter();
        Ok(())
    }

    fn counter(&self) -> u64 {
        SYST::get_current() as u64
    }

    fn enable_interrupt(&mut self) -> HalResult<()> {
        self.syst.enable_interrupt();
        Ok(())
    }

    fn disable_interrupt(&mut self) -> HalResult<()> {
        self.syst.disable_interrupt();
        Ok(())
    }
}
