//! STM32F4-Discovery user LEDs
//!
//! The four user LEDs sit on port D, pins 12 to 15, and light when the pin
//! is driven high.

use embedded_hal::delay::DelayNs;
use hal::error::HalResult;
use hal::gpio::{GpioPin, Level, PinMode};

use crate::bus::RegisterBus;
use crate::stm32f4xx::{enable_port_clock, Port, PortPin};

/// Port carrying the user LEDs
pub const LED_PORT: Port = Port::D;

/// User LEDs, numbered by their port D pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Led {
    /// LD4
    Green = 12,
    /// LD3
    Orange = 13,
    /// LD5
    Red = 14,
    /// LD6
    Blue = 15,
}

impl Led {
    pub const ALL: [Led; 4] = [Led::Green, Led::Orange, Led::Red, Led::Blue];

    /// Port D pin driving this LED
    pub const fn pin(self) -> u8 {
        self as u8
    }

    const fn index(self) -> usize {
        (self.pin() - Led::Green.pin()) as usize
    }
}

/// The four user LEDs, configured as push-pull outputs
pub struct Leds<B> {
    pins: [PortPin<B>; 4],
}

impl<B: RegisterBus + Clone> Leds<B> {
    /// Enable the GPIOD clock, make every LED pin an output and switch all
    /// LEDs off.
    pub fn init(mut bus: B) -> HalResult<Self> {
        enable_port_clock(&mut bus, LED_PORT);

        let mut leds = Self {
            pins: [
                PortPin::new(bus.clone(), LED_PORT, Led::Green.pin())?,
                PortPin::new(bus.clone(), LED_PORT, Led::Orange.pin())?,
                PortPin::new(bus.clone(), LED_PORT, Led::Red.pin())?,
                PortPin::new(bus, LED_PORT, Led::Blue.pin())?,
            ],
        };

        for pin in leds.pins.iter_mut() {
            pin.set_mode(PinMode::Output)?;
        }
        for led in Led::ALL {
            leds.off(led)?;
        }
        Ok(leds)
    }

    fn pin(&mut self, led: Led) -> &mut PortPin<B> {
        &mut self.pins[led.index()]
    }

    pub fn on(&mut self, led: Led) -> HalResult<()> {
        self.pin(led).write(Level::High)
    }

    pub fn off(&mut self, led: Led) -> HalResult<()> {
        self.pin(led).write(Level::Low)
    }

    pub fn toggle(&mut self, led: Led) -> HalResult<()> {
        self.pin(led).toggle()
    }

    pub fn is_on(&self, led: Led) -> HalResult<bool> {
        Ok(self.pins[led.index()].read()?.is_high())
    }

    /// One blink: on for `on_ms`, then off for `off_ms`.
    pub fn blink<D: DelayNs>(
        &mut self,
        led: Led,
        delay: &mut D,
        on_ms: u32,
        off_ms: u32,
    ) -> HalResult<()> {
        self.on(led)?;
        delay.delay_ms(on_ms);
        self.off(led)?;
        delay.delay_ms(off_ms);
        Ok(())
    }
}
