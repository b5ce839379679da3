//! Target address tables
//!
//! Port base addresses and clock-gating registers differ between silicon
//! revisions and bus apertures, so they live in one closed [`Target`]
//! enumeration. The build picks exactly one variant through a Cargo feature;
//! everything else reads addresses through [`Target::ACTIVE`].

#[cfg(not(feature = "tm4c123-rb1"))]
compile_error!("no target selected: enable a target feature such as `tm4c123-rb1`");

/// GPIO port identity
///
/// The discriminant is the port's position in the clock-gating registers
/// (A = bit 0 … F = bit 5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum PortId {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    F = 5,
}

impl PortId {
    /// Number of GPIO ports
    pub const COUNT: usize = 6;

    /// All ports in clock-bit order
    pub const ALL: [PortId; Self::COUNT] = [
        PortId::A,
        PortId::B,
        PortId::C,
        PortId::D,
        PortId::E,
        PortId::F,
    ];

    /// Position of this port in tables and clock registers
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The single bit enabling this port in a clock-gating register
    pub const fn clock_bit(self) -> u32 {
        1 << (self as u32)
    }

    /// Base address of this port on the active target
    pub const fn base(self) -> u32 {
        Target::ACTIVE.port_base(self)
    }

    /// Port letter as printed on the board ('A'..='F')
    pub const fn letter(self) -> char {
        (b'A' + self as u8) as char
    }

    /// Look up a port by its letter (case-sensitive, 'A'..='F')
    pub const fn from_letter(letter: u8) -> Option<Self> {
        match letter {
            b'A' => Some(PortId::A),
            b'B' => Some(PortId::B),
            b'C' => Some(PortId::C),
            b'D' => Some(PortId::D),
            b'E' => Some(PortId::E),
            b'F' => Some(PortId::F),
            _ => None,
        }
    }

    /// Look up a port by its table index
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < Self::COUNT {
            Some(Self::ALL[index])
        } else {
            None
        }
    }
}

/// Clock-gating register for the GPIO block
///
/// Bit *n* of each register gates the clock of port *n*.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockRegister {
    /// RCGCGPIO - run mode
    RunMode,
    /// SCGCGPIO - sleep mode (processor clock stopped)
    SleepMode,
    /// DCGCGPIO - deep-sleep mode (system clock stopped, PLL and flash off)
    DeepSleepMode,
}

impl ClockRegister {
    /// All clock-gating registers
    pub const ALL: [ClockRegister; 3] = [
        ClockRegister::RunMode,
        ClockRegister::SleepMode,
        ClockRegister::DeepSleepMode,
    ];

    /// Absolute address on the active target
    pub const fn address(self) -> u32 {
        Target::ACTIVE.clock_address(self)
    }
}

/// Size of one port's register block
pub const PORT_BLOCK_SIZE: u32 = 0x1000;

/// Supported silicon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Target {
    /// TM4C123GH6PM, APB aperture (EK-TM4C123GXL LaunchPad)
    Tm4c123Rb1,
}

impl Target {
    /// Target chosen at build time
    #[cfg(feature = "tm4c123-rb1")]
    pub const ACTIVE: Target = Target::Tm4c123Rb1;

    /// Port base addresses, indexed by [`PortId::index`]
    pub const fn port_bases(self) -> [u32; PortId::COUNT] {
        match self {
            Target::Tm4c123Rb1 => [
                0x4000_4000,
                0x4000_5000,
                0x4000_6000,
                0x4000_7000,
                0x4002_4000,
                0x4002_5000,
            ],
        }
    }

    /// Clock-gating register addresses in [`ClockRegister::ALL`] order
    pub const fn clock_addresses(self) -> [u32; 3] {
        match self {
            Target::Tm4c123Rb1 => [0x400F_E608, 0x400F_E708, 0x400F_E808],
        }
    }

    pub const fn port_base(self, port: PortId) -> u32 {
        self.port_bases()[port.index()]
    }

    pub const fn clock_address(self, clock: ClockRegister) -> u32 {
        let index = match clock {
            ClockRegister::RunMode => 0,
            ClockRegister::SleepMode => 1,
            ClockRegister::DeepSleepMode => 2,
        };
        self.clock_addresses()[index]
    }

    /// Split an absolute address into (port, offset) if it falls inside a
    /// port's register block
    pub fn decode(self, addr: u32) -> Option<(PortId, u16)> {
        PortId::ALL.iter().find_map(|&port| {
            let base = self.port_base(port);
            if addr >= base && addr - base < PORT_BLOCK_SIZE {
                Some((port, (addr - base) as u16))
            } else {
                None
            }
        })
    }

    /// Map an absolute address to a clock-gating register
    pub fn clock_at(self, addr: u32) -> Option<ClockRegister> {
        ClockRegister::ALL
            .iter()
            .copied()
            .find(|&clock| self.clock_address(clock) == addr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_bases() {
        assert_eq!(PortId::A.base(), 0x4000_4000);
        assert_eq!(PortId::D.base(), 0x4000_7000);
        assert_eq!(PortId::E.base(), 0x4002_4000);
        assert_eq!(PortId::F.base(), 0x4002_5000);
    }

    #[test]
    fn test_clock_bits() {
        let bits: u32 = PortId::ALL.iter().map(|p| p.clock_bit()).sum();
        assert_eq!(bits, 0x3F);
        assert_eq!(PortId::A.clock_bit(), 1);
        assert_eq!(PortId::F.clock_bit(), 1 << 5);
    }

    #[test]
    fn test_clock_addresses() {
        assert_eq!(ClockRegister::RunMode.address(), 0x400F_E608);
        assert_eq!(ClockRegister::SleepMode.address(), 0x400F_E708);
        assert_eq!(ClockRegister::DeepSleepMode.address(), 0x400F_E808);
    }

    #[test]
    fn test_letters() {
        for port in PortId::ALL {
            assert_eq!(PortId::from_letter(port.letter() as u8), Some(port));
            assert_eq!(PortId::from_index(port.index()), Some(port));
        }
        assert_eq!(PortId::from_letter(b'G'), None);
        assert_eq!(PortId::from_letter(b'a'), None);
        assert_eq!(PortId::from_index(6), None);
    }

    #[test]
    fn test_decode() {
        let target = Target::ACTIVE;
        assert_eq!(target.decode(0x4002_551C), Some((PortId::F, 0x51C)));
        assert_eq!(target.decode(0x4000_4000), Some((PortId::A, 0)));
        assert_eq!(target.decode(0x4000_8000), None);
        assert_eq!(target.decode(0x400F_E608), None);
        assert_eq!(target.clock_at(0x400F_E608), Some(ClockRegister::RunMode));
        assert_eq!(target.clock_at(0x4002_5000), None);
    }
}
