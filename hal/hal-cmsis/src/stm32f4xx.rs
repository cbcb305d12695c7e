//! STM32F4 GPIO and clock-enable registers (RM0090)

use hal::error::{HalError, HalResult};
use hal::gpio::{GpioPin, Level, PinMode};

use crate::bus::RegisterBus;

/// Reset and clock control
pub const RCC_BASE: usize = 0x4002_3800;
/// AHB1 peripheral clock enable register
pub const RCC_AHB1ENR: usize = RCC_BASE + 0x30;

/// GPIOA; the remaining ports follow at `GPIO_PORT_STRIDE` intervals
pub const GPIO_BASE: usize = 0x4002_0000;
pub const GPIO_PORT_STRIDE: usize = 0x400;

pub const GPIO_MODER: usize = 0x00;
pub const GPIO_OTYPER: usize = 0x04;
pub const GPIO_PUPDR: usize = 0x0C;
pub const GPIO_IDR: usize = 0x10;
pub const GPIO_ODR: usize = 0x14;
pub const GPIO_AFRL: usize = 0x20;
pub const GPIO_AFRH: usize = 0x24;

/// Pins per GPIO port
pub const PINS_PER_PORT: u8 = 16;

const MODER_INPUT: u32 = 0b00;
const MODER_OUTPUT: u32 = 0b01;
const MODER_ALTERNATE: u32 = 0b10;

const PUPDR_NONE: u32 = 0b00;
const PUPDR_PULL_UP: u32 = 0b01;
const PUPDR_PULL_DOWN: u32 = 0b10;

const MAX_ALTERNATE_FUNCTION: u8 = 15;

/// GPIO ports of the STM32F405/407
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Port {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
}

impl Port {
    const fn index(self) -> usize {
        self as usize
    }

    /// Base address of the port's register block
    pub const fn base(self) -> usize {
        GPIO_BASE + self.index() * GPIO_PORT_STRIDE
    }

    /// Address of a register in this port's block
    pub const fn register(self, offset: usize) -> usize {
        self.base() + offset
    }

    /// Clock enable bit of this port in `RCC_AHB1ENR`
    pub const fn ahb1_enable_bit(self) -> u32 {
        1 << self.index()
    }
}

/// Enable the AHB1 clock of a GPIO port
pub fn enable_port_clock<B: RegisterBus>(bus: &mut B, port: Port) {
    bus.modify(RCC_AHB1ENR, |enr| enr | port.ahb1_enable_bit());
}

/// Replace the `width`-bit field of pin `pin` in a register value
const fn with_field(value: u32, pin: u8, width: u32, field: u32) -> u32 {
    let shift = pin as u32 * width;
    let mask = ((1 << width) - 1) << shift;
    (value & !mask) | ((field << shift) & mask)
}

/// A single pin of an STM32F4 GPIO port
#[derive(Debug, Clone)]
pub struct PortPin<B> {
    bus: B,
    port: Port,
    pin: u8,
    mode: PinMode,
}

impl<B: RegisterBus> PortPin<B> {
    /// Create a pin handle
    ///
    /// The port clock must already be enabled (see [`enable_port_clock`]).
    /// The pin starts out tracked as `Input`, the reset mode of most pins.
    pub fn new(bus: B, port: Port, pin: u8) -> HalResult<Self> {
        if pin >= PINS_PER_PORT {
            return Err(HalError::InvalidParameter);
        }

        Ok(Self {
            bus,
            port,
            pin,
            mode: PinMode::Input,
        })
    }

    pub fn port(&self) -> Port {
        self.port
    }

    /// Mode last applied through [`GpioPin::set_mode`]
    pub fn mode(&self) -> PinMode {
        self.mode
    }

    fn mask(&self) -> u32 {
        1 << self.pin
    }

    fn set_alternate_function(&mut self, af: u8) {
        let (offset, slot) = if self.pin < 8 {
            (GPIO_AFRL, self.pin)
        } else {
            (GPIO_AFRH, self.pin - 8)
        };
        self.bus.modify(self.port.register(offset), |afr| {
            with_field(afr, slot, 4, af as u32)
        });
    }
}

impl<B: RegisterBus> GpioPin for PortPin<B> {
    fn set_mode(&mut self, mode: PinMode) -> HalResult<()> {
        let (moder, pupdr, open_drain) = match mode {
            PinMode::Input => (MODER_INPUT, PUPDR_NONE, false),
            PinMode::InputPullUp => (MODER_INPUT, PUPDR_PULL_UP, false),
            PinMode::InputPullDown => (MODER_INPUT, PUPDR_PULL_DOWN, false),
            PinMode::Output => (MODER_OUTPUT, PUPDR_NONE, false),
            PinMode::OutputOpenDrain => (MODER_OUTPUT, PUPDR_NONE, true),
            PinMode::Alternate(af) => {
                if af > MAX_ALTERNATE_FUNCTION {
                    return Err(HalError::InvalidParameter);
                }
                self.set_alternate_function(af);
                (MODER_ALTERNATE, PUPDR_NONE, false)
            }
        };

        let pin = self.pin;
        let mask = self.mask();
        self.bus.modify(self.port.register(GPIO_OTYPER), |otyper| {
            if open_drain {
                otyper | mask
            } else {
                otyper & !mask
            }
        });
        self.bus
            .modify(self.port.register(GPIO_PUPDR), |v| with_field(v, pin, 2, pupdr));
        self.bus
            .modify(self.port.register(GPIO_MODER), |v| with_field(v, pin, 2, moder));

        self.mode = mode;
        Ok(())
    }

    fn read(&self) -> HalResult<Level> {
        // Output pins report the driven level, inputs the sampled one
        let offset = if self.mode.is_output() {
            GPIO_ODR
        } else {
            GPIO_IDR
        };
        let value = self.bus.read(self.port.register(offset));
        Ok(Level::from(value & self.mask() != 0))
    }

    fn write(&mut self, level: Level) -> HalResult<()> {
        let mask = self.mask();
        self.bus.modify(self.port.register(GPIO_ODR), |odr| match level {
            Level::High => odr | mask,
            Level::Low => odr & !mask,
        });
        Ok(())
    }

    fn pin_number(&self) -> u32 {
        self.pin as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_addresses() {
        assert_eq!(Port::A.base(), 0x4002_0000);
        assert_eq!(Port::D.base(), 0x4002_0C00);
        assert_eq!(Port::I.base(), 0x4002_2000);
        assert_eq!(Port::D.register(GPIO_ODR), 0x4002_0C14);
        assert_eq!(RCC_AHB1ENR, 0x4002_3830);
    }

    #[test]
    fn test_ahb1_enable_bits() {
        assert_eq!(Port::A.ahb1_enable_bit(), 1 << 0);
        assert_eq!(Port::D.ahb1_enable_bit(), 1 << 3);
        assert_eq!(Port::I.ahb1_enable_bit(), 1 << 8);
    }

    #[test]
    fn test_with_field() {
        assert_eq!(with_field(0, 12, 2, 0b01), 1 << 24);
        assert_eq!(with_field(0xFFFF_FFFF, 15, 2, 0b01), 0x7FFF_FFFF);
        assert_eq!(with_field(0, 3, 4, 0xA), 0xA000);
        // Field value is truncated to its width
        assert_eq!(with_field(0, 0, 2, 0b111), 0b11);
    }
}
