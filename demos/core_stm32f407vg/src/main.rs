//! STM32F4-Discovery blinky
//!
//! SysTick fires every millisecond and advances `MS_TICKS`; the superloop
//! blinks the green LED, busy-waiting on that counter between edges.
//!
//! Flash and run with `cargo run --release` (probe-rs, see `.cargo/config.toml`).

#![no_std]
#![no_main]

mod config;

use cortex_m::peripheral::Peripherals as CorePeripherals;
use cortex_m_rt::{entry, exception};
use defmt_rtt as _;
use panic_halt as _;

use hal::error::HalResult;
use hal::timer::{TickCounter, TickDelay, Timer, TimerMode};
use hal_cmsis::bus::Mmio;
use hal_cmsis::discovery::Leds;
use hal_cmsis::systick::{period_us_for_rate, SysTickTimer};

/// Milliseconds since SysTick was started
static MS_TICKS: TickCounter = TickCounter::new();

#[exception]
fn SysTick() {
    MS_TICKS.tick();
}

/// Bring up the LEDs and the millisecond tick, then unmask interrupts.
fn device_init(mut cp: CorePeripherals) -> HalResult<(Leds<Mmio>, SysTickTimer)> {
    // SAFETY: this is the only code touching RCC and GPIOD.
    let bus = unsafe { Mmio::new() };
    let leds = Leds::init(bus)?;

    SysTickTimer::set_lowest_priority(&mut cp.SCB);
    let mut systick = SysTickTimer::new(cp.SYST, config::CORE_CLOCK_HZ);
    systick.start(period_us_for_rate(config::TICK_RATE_HZ)?, TimerMode::Periodic)?;

    // SAFETY: not called from within a critical section.
    unsafe { cortex_m::interrupt::enable() };
    Ok((leds, systick))
}

fn halt() -> ! {
    loop {
        cortex_m::asm::nop();
    }
}

#[entry]
fn main() -> ! {
    let Some(cp) = CorePeripherals::take() else {
        defmt::error!("core peripherals already taken");
        halt()
    };

    let (mut leds, _systick) = match device_init(cp) {
        Ok(devices) => devices,
        Err(err) => {
            defmt::error!("device initialization failed: {}", err);
            halt()
        }
    };
    defmt::info!(
        "blinking {} every {} ms",
        config::BLINK_LED,
        config::BLINK_ON_MS + config::BLINK_OFF_MS
    );

    let mut delay = TickDelay::new(&MS_TICKS);
    loop {
        if let Err(err) = leds.blink(
            config::BLINK_LED,
            &mut delay,
            config::BLINK_ON_MS,
            config::BLINK_OFF_MS,
        ) {
            defmt::error!("blink failed: {}", err);
            halt()
        }
        defmt::debug!("tick {}", MS_TICKS.now());
    }
}
