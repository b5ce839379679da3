//! Register bus abstraction
//!
//! Everything above this trait talks in absolute 32-bit addresses. What
//! sits below it is either volatile memory-mapped I/O or a simulated
//! address space used by host tests.

/// Word-wide access to a peripheral address space
///
/// Both methods take `&self`: handles onto the same hardware are aliases,
/// and the physical registers hold all mutable state.
///
/// Implementations must perform every access in program order and must not
/// merge, drop or invent accesses. A read may have side effects (clock
/// settling relies on this).
pub trait RegisterBus {
    /// Load the word at `addr`
    fn read(&self, addr: u32) -> u32;

    /// Store `value` at `addr`
    fn write(&self, addr: u32, value: u32);

    /// OR `bits` into the word at `addr` (read, then write)
    ///
    /// Not atomic with respect to interrupt handlers.
    fn set_bits(&self, addr: u32, bits: u32) {
        let current = self.read(addr);
        self.write(addr, current | bits);
    }

    /// Clear `bits` in the word at `addr` (read, then write)
    ///
    /// Not atomic with respect to interrupt handlers.
    fn clear_bits(&self, addr: u32, bits: u32) {
        let current = self.read(addr);
        self.write(addr, current & !bits);
    }
}

impl<B: RegisterBus + ?Sized> RegisterBus for &B {
    fn read(&self, addr: u32) -> u32 {
        (**self).read(addr)
    }

    fn write(&self, addr: u32, value: u32) {
        (**self).write(addr, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    /// Single-word bus that ignores the address
    struct Word {
        value: Cell<u32>,
        reads: Cell<u32>,
        writes: Cell<u32>,
    }

    impl Word {
        fn new(value: u32) -> Self {
            Self {
                value: Cell::new(value),
                reads: Cell::new(0),
                writes: Cell::new(0),
            }
        }
    }

    impl RegisterBus for Word {
        fn read(&self, _addr: u32) -> u32 {
            self.reads.set(self.reads.get() + 1);
            self.value.get()
        }

        fn write(&self, _addr: u32, value: u32) {
            self.writes.set(self.writes.get() + 1);
            self.value.set(value);
        }
    }

    #[test]
    fn test_set_bits() {
        let bus = Word::new(0b1000_0001);
        bus.set_bits(0, 0b0000_0110);
        assert_eq!(bus.value.get(), 0b1000_0111);
        assert_eq!(bus.reads.get(), 1);
        assert_eq!(bus.writes.get(), 1);
    }

    #[test]
    fn test_clear_bits() {
        let bus = Word::new(0xFF);
        bus.clear_bits(0, 0x0F);
        assert_eq!(bus.value.get(), 0xF0);
    }

    #[test]
    fn test_reference_forwards() {
        let bus = Word::new(0);
        let by_ref = &bus;
        by_ref.write(0, 0x42);
        assert_eq!(by_ref.read(0), 0x42);
        assert_eq!(bus.writes.get(), 1);
    }
}
