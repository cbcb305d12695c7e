//! Memory-mapped register access

/// Word-wide access to peripheral registers by absolute address.
///
/// Implemented by [`Mmio`] for real hardware; tests substitute an
/// in-memory register file.
pub trait RegisterBus {
    /// Read a 32-bit register
    fn read(&self, addr: usize) -> u32;

    /// Write a 32-bit register
    fn write(&mut self, addr: usize, value: u32);

    /// Read-modify-write a register.
    ///
    /// The read and the write happen inside one critical section, so an
    /// interrupt handler touching the same register cannot interleave.
    fn modify<F>(&mut self, addr: usize, f: F)
    where
        F: FnOnce(u32) -> u32,
    {
        critical_section::with(|_| {
            let value = self.read(addr);
            self.write(addr, f(value));
        });
    }
}

/// Volatile access to the device's memory-mapped peripherals
#[derive(Debug, Clone, Copy)]
pub struct Mmio {
    _private: (),
}

impl Mmio {
    /// Create a handle to the memory-mapped peripheral space.
    ///
    /// # Safety
    ///
    /// Every address later passed to this handle must be a valid, aligned
    /// peripheral register, and the caller must own the peripherals it
    /// touches (no other driver may use them concurrently).
    pub const unsafe fn new() -> Self {
        Self { _private: () }
    }
}

impl RegisterBus for Mmio {
    #[inline]
    fn read(&self, addr: usize) -> u32 {
        // SAFETY: validity of `addr` is the contract of `Mmio::new`.
        unsafe { core::ptr::read_volatile(addr as *const u32) }
    }

    #[inline]
    fn write(&mut self, addr: usize, value: u32) {
        // SAFETY: validity of `addr` is the contract of `Mmio::new`.
        unsafe { core::ptr::write_volatile(addr as *mut u32, value) }
    }
}
