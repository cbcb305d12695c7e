//! In-memory register file shared by the integration tests

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use hal_cmsis::bus::RegisterBus;

/// Register bus backed by a map; clones share the same registers.
/// Unwritten registers read as zero, like most reset values.
#[derive(Clone, Default)]
pub struct FakeBus {
    regs: Rc<RefCell<BTreeMap<usize, u32>>>,
}

impl FakeBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Preset a register, e.g. to model a non-reset state or input pins
    pub fn poke(&self, addr: usize, value: u32) {
        self.regs.borrow_mut().insert(addr, value);
    }

    pub fn peek(&self, addr: usize) -> u32 {
        self.regs.borrow().get(&addr).copied().unwrap_or(0)
    }
}

impl RegisterBus for FakeBus {
    fn read(&self, addr: usize) -> u32 {
        self.peek(addr)
    }

    fn write(&mut self, addr: usize, value: u32) {
        self.poke(addr, value);
    }
}

/// Delay that returns at once, recording each request together with the
/// value of a watched register at the time of the call.
pub struct RecordingDelay {
    bus: FakeBus,
    watch: usize,
    pub calls: Vec<(u32, u32)>,
}

impl RecordingDelay {
    pub fn new(bus: FakeBus, watch: usize) -> Self {
        Self {
            bus,
            watch,
            calls: Vec::new(),
        }
    }
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.delay_ms(ns.div_ceil(1_000_000));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.calls.push((ms, self.bus.peek(self.watch)));
    }
}
