//! Volatile memory-mapped I/O
//!
//! The only place in the crate that turns an integer into a pointer.
//! Everything else reaches hardware through [`RegisterBus`], with
//! addresses taken from the [`Target`](crate::target::Target) tables.

#![allow(unsafe_code)]

use core::ptr;

use tivaport_hal::RegisterBus;

use crate::port::Port;
use crate::target::PortId;

/// A 32-bit register at a fixed physical address
///
/// Loads and stores are volatile, so the compiler neither elides nor
/// reorders them relative to other volatile accesses.
#[derive(Debug)]
pub struct VolatileRegister {
    addr: usize,
}

impl VolatileRegister {
    /// # Safety
    ///
    /// `addr` must be a word-aligned memory-mapped register of the running
    /// chip. Its peripheral must be clocked before the first access.
    pub const unsafe fn new(addr: u32) -> Self {
        Self {
            addr: addr as usize,
        }
    }

    pub const fn address(&self) -> u32 {
        self.addr as u32
    }

    #[inline(always)]
    pub fn read(&self) -> u32 {
        // SAFETY: validity of the address is the constructor's contract
        unsafe { ptr::read_volatile(self.addr as *const u32) }
    }

    #[inline(always)]
    pub fn write(&self, value: u32) {
        // SAFETY: validity of the address is the constructor's contract
        unsafe { ptr::write_volatile(self.addr as *mut u32, value) }
    }
}

/// The chip's physical address space
#[derive(Debug, Clone, Copy)]
pub struct Mmio {
    _private: (),
}

impl Mmio {
    /// # Safety
    ///
    /// Every address later passed to this bus must be a valid register of
    /// the running chip.
    pub const unsafe fn new() -> Self {
        Self { _private: () }
    }
}

impl RegisterBus for Mmio {
    #[inline(always)]
    fn read(&self, addr: u32) -> u32 {
        // SAFETY: see `Mmio::new`
        unsafe { VolatileRegister::new(addr) }.read()
    }

    #[inline(always)]
    fn write(&self, addr: u32, value: u32) {
        // SAFETY: see `Mmio::new`
        unsafe { VolatileRegister::new(addr) }.write(value)
    }
}

impl Port<Mmio> {
    /// Handle onto a physical port
    ///
    /// Handles are aliases: two handles for the same port drive the same
    /// hardware. Only meaningful when running on the selected target.
    pub const fn new(id: PortId) -> Self {
        // SAFETY: a port only forms addresses from the active target's
        // port and clock tables plus offsets from the closed register map
        Port::with_bus(id, unsafe { Mmio::new() })
    }
}
