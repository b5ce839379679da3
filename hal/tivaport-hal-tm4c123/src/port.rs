//! GPIO port handle
//!
//! A [`Port`] knows its identity and base address and nothing else; the
//! registers hold all state. It offers three kinds of access:
//!
//! - **Data**: the data register is mirrored across a 256-word window.
//!   Address bits 9:2 select which data bits a load or store touches, so a
//!   store through [`Port::data_bits`] changes exactly the selected pins
//!   without a read-modify-write.
//! - **Batch writes**: [`Port::initialize`] enables the port clock in the
//!   given clock-gating registers, waits for it to settle, then applies an
//!   ordered list of [`RegisterWrite`]s. [`Port::reconfigure`] applies a list
//!   without touching clocks.
//! - **Reads** of any register, including the identification block.
//!
//! Batch writes are read-modify-write sequences. If an interrupt handler
//! touches the same register, the caller must mask interrupts around the
//! call; data-register updates through the alias window need no masking.

use tivaport_hal::RegisterBus;

use crate::mmio::Mmio;
use crate::pin::Pin;
use crate::regs::{Den, Dir, Register, RegisterWrite};
use crate::target::{ClockRegister, PortId};

/// Number of pins per port
pub const PINS_PER_PORT: u8 = 8;

/// Alias offset selecting all eight data bits
pub const DATA_ALL: u16 = 0x3FC;

/// Expected GPIOPeriphID0-3 value
pub const GPIO_PERIPHERAL_ID: u32 = 0x0118_0061;

/// Expected GPIOPCellID0-3 value
pub const PRIMECELL_ID: u32 = 0xB105_F00D;

/// Errors from checked port accessors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PortError {
    /// Bit or pin index outside 0..8
    BitOutOfRange(u8),
}

/// Mask with one bit per listed index
///
/// Duplicates select the same bit once. Fails on the first index >= 8.
pub const fn bit_mask(bits: &[u8]) -> Result<u8, PortError> {
    let mut mask = 0u8;
    let mut i = 0;
    while i < bits.len() {
        let bit = bits[i];
        if bit >= PINS_PER_PORT {
            return Err(PortError::BitOutOfRange(bit));
        }
        mask |= 1 << bit;
        i += 1;
    }
    Ok(mask)
}

/// Offset into the data alias window for a bit mask: sum of 4 * 2^b
pub const fn alias_offset(mask: u8) -> u16 {
    (mask as u16) << 2
}

/// Handle onto one GPIO port
#[derive(Debug, Clone)]
pub struct Port<B = Mmio> {
    id: PortId,
    base: u32,
    bus: B,
}

impl<B: RegisterBus> Port<B> {
    /// Handle onto `id` whose accesses go through `bus`
    pub const fn with_bus(id: PortId, bus: B) -> Self {
        Self {
            id,
            base: id.base(),
            bus,
        }
    }

    pub const fn id(&self) -> PortId {
        self.id
    }

    /// Physical base address
    pub const fn base(&self) -> u32 {
        self.base
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    /// All eight data bits
    pub fn data(&self) -> Data<'_, B> {
        self.data_mask(0xFF)
    }

    /// Data bits selected by `mask`
    pub fn data_mask(&self, mask: u8) -> Data<'_, B> {
        Data { port: self, mask }
    }

    /// Data bits listed in `bits`
    ///
    /// An index outside 0..8 widens the access to all eight bits. Use
    /// [`Port::try_data_bits`] to reject such lists instead.
    pub fn data_bits(&self, bits: &[u8]) -> Data<'_, B> {
        match bit_mask(bits) {
            Ok(mask) => self.data_mask(mask),
            Err(PortError::BitOutOfRange(_bit)) => {
                #[cfg(feature = "defmt")]
                defmt::warn!(
                    "GPIO{}: bit {} out of range, using full data register",
                    self.id,
                    _bit
                );
                self.data()
            }
        }
    }

    /// Data bits listed in `bits`, rejecting indices outside 0..8
    pub fn try_data_bits(&self, bits: &[u8]) -> Result<Data<'_, B>, PortError> {
        bit_mask(bits).map(|mask| self.data_mask(mask))
    }

    /// Single-pin handle backed by the alias window
    pub fn pin(&self, index: u8) -> Result<Pin<'_, B>, PortError> {
        if index >= PINS_PER_PORT {
            return Err(PortError::BitOutOfRange(index));
        }
        Ok(Pin::new(self.data_mask(1 << index), index))
    }

    /// One-time setup: clock the port, then apply `writes` in order
    ///
    /// For each clock register the port's bit is set, followed by one read
    /// of the same register. That read is the settling delay the datasheet
    /// requires before the port's registers can be accessed.
    pub fn initialize(&self, clocks: &[ClockRegister], writes: &[RegisterWrite]) {
        for &clock in clocks {
            self.enable_clock(clock);
        }
        self.reconfigure(writes);
    }

    /// Apply `writes` in order, leaving clocks alone
    ///
    /// Later writes to the same register see the result of earlier ones.
    /// Protected registers need `Lock::unlock()` and the `Cr` write ahead of
    /// the write they guard.
    pub fn reconfigure(&self, writes: &[RegisterWrite]) {
        for write in writes {
            self.apply(write);
        }
    }

    /// Configure the pins in `mask` as digital outputs
    pub fn make_output(&self, mask: u8) {
        self.reconfigure(&[Dir::set(mask).into(), Den::set(mask).into()]);
    }

    /// Configure the pins in `mask` as digital inputs
    pub fn make_input(&self, mask: u8) {
        self.reconfigure(&[Dir::clear(mask).into(), Den::set(mask).into()]);
    }

    /// Raw value of a register
    pub fn read(&self, register: Register) -> u32 {
        self.bus.read(self.address(register.offset()))
    }

    /// Whether this port's bit is set in a clock-gating register
    pub fn is_clock_enabled(&self, clock: ClockRegister) -> bool {
        self.bus.read(clock.address()) & self.id.clock_bit() != 0
    }

    /// GPIOPeriphID0-3 assembled into one word
    pub fn peripheral_id(&self) -> u32 {
        self.id_word([
            Register::PeriphId0,
            Register::PeriphId1,
            Register::PeriphId2,
            Register::PeriphId3,
        ])
    }

    /// GPIOPCellID0-3 assembled into one word
    pub fn primecell_id(&self) -> u32 {
        self.id_word([
            Register::PCellId0,
            Register::PCellId1,
            Register::PCellId2,
            Register::PCellId3,
        ])
    }

    /// Whether the identification block reports a GPIO port
    pub fn is_present(&self) -> bool {
        self.primecell_id() == PRIMECELL_ID && self.peripheral_id() == GPIO_PERIPHERAL_ID
    }

    fn id_word(&self, registers: [Register; 4]) -> u32 {
        registers
            .iter()
            .enumerate()
            .fold(0, |word, (i, &reg)| word | ((self.read(reg) & 0xFF) << (8 * i)))
    }

    fn enable_clock(&self, clock: ClockRegister) {
        let addr = clock.address();
        self.bus.set_bits(addr, self.id.clock_bit());
        // Settling delay: the value is irrelevant, the access is not
        let _ = self.bus.read(addr);
    }

    fn apply(&self, write: &RegisterWrite) {
        let addr = self.address(write.offset());
        let current = self.bus.read(addr);
        self.bus.write(addr, write.op().apply(current, write.value()));
    }

    fn address(&self, offset: u16) -> u32 {
        self.base + offset as u32
    }
}

/// A view of selected bits of the data register
///
/// Reads return the selected bits with all others zero. Writes change only
/// the selected bits and are a single store.
pub struct Data<'a, B> {
    port: &'a Port<B>,
    mask: u8,
}

impl<B: RegisterBus> Data<'_, B> {
    pub const fn mask(&self) -> u8 {
        self.mask
    }

    /// Offset into the alias window
    pub const fn offset(&self) -> u16 {
        alias_offset(self.mask)
    }

    /// Absolute alias address
    pub fn address(&self) -> u32 {
        self.port.address(self.offset())
    }

    pub fn read(&self) -> u8 {
        (self.port.bus.read(self.address()) & 0xFF) as u8
    }

    /// Store `value`; bits outside the mask are ignored by the hardware
    pub fn write(&self, value: u8) {
        self.port.bus.write(self.address(), value as u32);
    }

    /// Drive every selected bit high
    pub fn set(&self) {
        self.write(0xFF);
    }

    /// Drive every selected bit low
    pub fn clear(&self) {
        self.write(0x00);
    }
}
