//! Simulated GPIO address space
//!
//! Host-side stand-in for the physical ports and clock-gating registers,
//! used by this crate's tests and, through the `sim` feature, by other
//! crates. It models the behaviour port code depends on:
//!
//! - the data alias window (address bits 9:2 mask loads and stores)
//! - the lock/commit pair (one commit write per unlock)
//! - byte-wide registers ignoring bits 31:8
//! - read-only registers ignoring stores
//! - the identification block's reset values
//!
//! Everything else is plain storage that resets to zero. Every access made
//! through [`RegisterBus`] is appended to a journal for ordering checks.

use core::cell::{Cell, RefCell};

use heapless::{FnvIndexMap, Vec};
use tivaport_hal::RegisterBus;

use crate::port::DATA_ALL;
use crate::regs::{Register, LOCK_KEY};
use crate::target::{PortId, Target};

/// Distinct non-data words the simulation can hold
pub const WORD_CAPACITY: usize = 256;

/// Accesses kept in the journal; later ones are dropped
pub const JOURNAL_CAPACITY: usize = 256;

/// One recorded bus access
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read { addr: u32, value: u32 },
    Write { addr: u32, value: u32 },
}

impl Access {
    pub const fn addr(&self) -> u32 {
        match *self {
            Access::Read { addr, .. } | Access::Write { addr, .. } => addr,
        }
    }

    pub const fn is_write(&self) -> bool {
        matches!(self, Access::Write { .. })
    }
}

/// Simulated peripheral address space
#[derive(Default)]
pub struct SimBus {
    words: RefCell<FnvIndexMap<u32, u32, WORD_CAPACITY>>,
    data: [Cell<u8>; PortId::COUNT],
    unlocked: [Cell<bool>; PortId::COUNT],
    journal: RefCell<Vec<Access, JOURNAL_CAPACITY>>,
}

impl SimBus {
    /// Address space in its reset state
    pub fn new() -> Self {
        Self::default()
    }

    /// Value a load would return, without journaling
    pub fn peek(&self, addr: u32) -> u32 {
        self.load(addr)
    }

    /// Store bypassing register behaviour and the journal
    ///
    /// Used to preset register contents and input levels. In the data
    /// window the alias mask still applies.
    pub fn poke(&self, addr: u32, value: u32) {
        match Target::ACTIVE.decode(addr) {
            Some((port, offset)) if offset <= DATA_ALL => self.store_data(port, offset, value),
            _ => self.set_word(addr, value),
        }
    }

    /// Current data register contents of a port
    pub fn data(&self, port: PortId) -> u8 {
        self.data[port.index()].get()
    }

    /// Whether a port's commit register currently accepts a write
    pub fn is_unlocked(&self, port: PortId) -> bool {
        self.unlocked[port.index()].get()
    }

    /// Accesses recorded so far, oldest first
    pub fn journal(&self) -> Vec<Access, JOURNAL_CAPACITY> {
        self.journal.borrow().clone()
    }

    pub fn clear_journal(&self) {
        self.journal.borrow_mut().clear();
    }

    /// Number of recorded accesses to `addr`
    pub fn accesses_to(&self, addr: u32) -> usize {
        self.journal
            .borrow()
            .iter()
            .filter(|access| access.addr() == addr)
            .count()
    }

    fn load(&self, addr: u32) -> u32 {
        let Some((port, offset)) = Target::ACTIVE.decode(addr) else {
            return self.word(addr);
        };
        if offset <= DATA_ALL {
            let mask = (offset >> 2) as u8;
            return (self.data(port) & mask) as u32;
        }
        match Register::at_offset(offset) {
            Some(Register::Lock) => {
                if self.is_unlocked(port) {
                    0
                } else {
                    1
                }
            }
            Some(reg) => id_reset_value(reg).unwrap_or_else(|| self.word(addr)),
            None => self.word(addr),
        }
    }

    fn store(&self, addr: u32, value: u32) {
        let Some((port, offset)) = Target::ACTIVE.decode(addr) else {
            self.set_word(addr, value);
            return;
        };
        if offset <= DATA_ALL {
            self.store_data(port, offset, value);
            return;
        }
        match Register::at_offset(offset) {
            Some(Register::Lock) => self.unlocked[port.index()].set(value == LOCK_KEY),
            Some(Register::Cr) => {
                if self.is_unlocked(port) {
                    self.unlocked[port.index()].set(false);
                    self.set_word(addr, value & 0xFF);
                }
            }
            Some(reg) if !reg.is_writable() => {}
            Some(reg) if reg.is_word() => self.set_word(addr, value),
            Some(_) => self.set_word(addr, value & 0xFF),
            None => self.set_word(addr, value),
        }
    }

    fn store_data(&self, port: PortId, offset: u16, value: u32) {
        let mask = (offset >> 2) as u8;
        let cell = &self.data[port.index()];
        cell.set((cell.get() & !mask) | (value as u8 & mask));
    }

    fn word(&self, addr: u32) -> u32 {
        self.words.borrow().get(&addr).copied().unwrap_or(0)
    }

    fn set_word(&self, addr: u32, value: u32) {
        // Capacity exceeds every register of every port plus the clocks
        let _ = self.words.borrow_mut().insert(addr, value);
    }

    fn record(&self, access: Access) {
        let _ = self.journal.borrow_mut().push(access);
    }
}

impl RegisterBus for SimBus {
    fn read(&self, addr: u32) -> u32 {
        let value = self.load(addr);
        self.record(Access::Read { addr, value });
        value
    }

    fn write(&self, addr: u32, value: u32) {
        self.record(Access::Write { addr, value });
        self.store(addr, value);
    }
}

/// Reset value of an identification register
fn id_reset_value(reg: Register) -> Option<u32> {
    let value = match reg {
        Register::PeriphId4
        | Register::PeriphId5
        | Register::PeriphId6
        | Register::PeriphId7 => 0x00,
        Register::PeriphId0 => 0x61,
        Register::PeriphId1 => 0x00,
        Register::PeriphId2 => 0x18,
        Register::PeriphId3 => 0x01,
        Register::PCellId0 => 0x0D,
        Register::PCellId1 => 0xF0,
        Register::PCellId2 => 0x05,
        Register::PCellId3 => 0xB1,
        _ => return None,
    };
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::ClockRegister;

    fn reg(port: PortId, register: Register) -> u32 {
        port.base() + register.offset() as u32
    }

    #[test]
    fn test_reset_state() {
        let sim = SimBus::new();
        assert_eq!(sim.peek(reg(PortId::A, Register::Dir)), 0);
        assert_eq!(sim.peek(reg(PortId::A, Register::Lock)), 1);
        assert_eq!(sim.peek(ClockRegister::RunMode.address()), 0);
        assert_eq!(sim.peek(reg(PortId::C, Register::PCellId3)), 0xB1);
        assert!(sim.journal().is_empty());
    }

    #[test]
    fn test_byte_registers_drop_upper_bits() {
        let sim = SimBus::new();
        sim.write(reg(PortId::B, Register::Den), 0x1234_5678);
        assert_eq!(sim.peek(reg(PortId::B, Register::Den)), 0x78);
        sim.write(reg(PortId::B, Register::Pctl), 0x1234_5678);
        assert_eq!(sim.peek(reg(PortId::B, Register::Pctl)), 0x1234_5678);
    }

    #[test]
    fn test_read_only_ignores_stores() {
        let sim = SimBus::new();
        sim.write(reg(PortId::D, Register::Ris), 0xFF);
        assert_eq!(sim.peek(reg(PortId::D, Register::Ris)), 0);
    }

    #[test]
    fn test_commit_needs_unlock() {
        let sim = SimBus::new();
        let cr = reg(PortId::F, Register::Cr);
        let lock = reg(PortId::F, Register::Lock);

        sim.write(cr, 0x01);
        assert_eq!(sim.peek(cr), 0);

        sim.write(lock, LOCK_KEY);
        assert!(sim.is_unlocked(PortId::F));
        assert!(!sim.is_unlocked(PortId::A));
        sim.write(cr, 0x01);
        assert_eq!(sim.peek(cr), 0x01);
        assert!(!sim.is_unlocked(PortId::F));

        sim.write(lock, LOCK_KEY);
        sim.write(lock, 0x1234);
        sim.write(cr, 0xFF);
        assert_eq!(sim.peek(cr), 0x01);
    }

    #[test]
    fn test_data_window() {
        let sim = SimBus::new();
        let base = PortId::E.base();
        sim.write(base + 0x3FC, 0xFF);
        assert_eq!(sim.data(PortId::E), 0xFF);
        sim.write(base + (0b0000_0011 << 2), 0x00);
        assert_eq!(sim.data(PortId::E), 0xFC);
        assert_eq!(sim.read(base + (0b0000_0110 << 2)), 0x04);
        assert_eq!(sim.data(PortId::D), 0);
    }

    #[test]
    fn test_journal() {
        let sim = SimBus::new();
        let addr = ClockRegister::RunMode.address();
        sim.write(addr, 0x20);
        let _ = sim.read(addr);
        assert_eq!(
            sim.journal().as_slice(),
            &[
                Access::Write { addr, value: 0x20 },
                Access::Read { addr, value: 0x20 },
            ]
        );
        assert_eq!(sim.accesses_to(addr), 2);
        sim.clear_journal();
        assert_eq!(sim.accesses_to(addr), 0);
    }

    #[test]
    fn test_poke_is_not_journaled() {
        let sim = SimBus::new();
        sim.poke(0x2000_0000, 7);
        assert_eq!(sim.peek(0x2000_0000), 7);
        assert!(sim.journal().is_empty());
    }
}
