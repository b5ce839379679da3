//! GPIO register map and typed write descriptors
//!
//! Every register of a GPIO port sits at a fixed offset from the port base
//! (TM4C123GH6PM datasheet, section 10.5). [`Register`] names all of them.
//! Each *writable* register additionally gets its own descriptor type
//! (`Dir`, `Den`, `Lock`, ...) carrying a value of the register's width and
//! an [`Op`]. Descriptors convert into [`RegisterWrite`], the only thing the
//! batch operations on [`Port`](crate::port::Port) accept.
//!
//! The descriptor set is closed: [`Descriptor`] is sealed, so code outside
//! this module cannot invent new offsets, and read-only registers have no
//! descriptor type at all.
//!
//! ```
//! use tivaport_hal_tm4c123::regs::{Dir, Den, Op, RegisterWrite};
//!
//! let writes: [RegisterWrite; 2] = [Dir::set(0x08).into(), Den::with_op(0x08, Op::Set).into()];
//! assert_eq!(writes[0].offset(), 0x400);
//! ```

/// Value that unlocks GPIOCR for one write ("LOCK" in ASCII)
pub const LOCK_KEY: u32 = 0x4C4F_434B;

/// How a write combines with the register's current contents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Op {
    /// OR the value into the register
    #[default]
    Set,
    /// AND the complement of the value into the register
    Clear,
}

impl Op {
    /// Result of applying `value` to `current`
    pub const fn apply(self, current: u32, value: u32) -> u32 {
        match self {
            Op::Set => current | value,
            Op::Clear => current & !value,
        }
    }
}

/// Every register of a GPIO port, with its byte offset as discriminant
///
/// The data register is not listed: it is a 256-word alias window at
/// 0x000-0x3FC reached through [`Port::data`](crate::port::Port::data).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
pub enum Register {
    /// GPIODIR - 1: output, 0: input
    Dir = 0x400,
    /// GPIOIS - 1: level-sensitive, 0: edge-sensitive
    Is = 0x404,
    /// GPIOIBE - 1: both edges trigger, 0: GPIOIEV decides
    Ibe = 0x408,
    /// GPIOIEV - 1: rising edge / high level, 0: falling edge / low level
    Iev = 0x40C,
    /// GPIOIM - 1: interrupt forwarded to the NVIC
    Im = 0x410,
    /// GPIORIS - raw interrupt status (read-only)
    Ris = 0x414,
    /// GPIOMIS - masked interrupt status (read-only)
    Mis = 0x418,
    /// GPIOICR - write 1 to clear an edge interrupt
    Icr = 0x41C,
    /// GPIOAFSEL - 1: pin driven by its alternate function
    Afsel = 0x420,
    /// GPIODR2R - 2-mA drive
    Dr2r = 0x500,
    /// GPIODR4R - 4-mA drive
    Dr4r = 0x504,
    /// GPIODR8R - 8-mA drive
    Dr8r = 0x508,
    /// GPIOODR - open drain
    Odr = 0x50C,
    /// GPIOPUR - weak pull-up
    Pur = 0x510,
    /// GPIOPDR - weak pull-down
    Pdr = 0x514,
    /// GPIOSLR - slew-rate control (8-mA drive only)
    Slr = 0x518,
    /// GPIODEN - digital enable
    Den = 0x51C,
    /// GPIOLOCK - write [`LOCK_KEY`] to unlock GPIOCR; reads 1 while locked
    Lock = 0x520,
    /// GPIOCR - commit; gates AFSEL/PUR/PDR/DEN on protected pins
    Cr = 0x524,
    /// GPIOAMSEL - analog mode, disables the digital input buffer
    Amsel = 0x528,
    /// GPIOPCTL - four-bit peripheral mux field per pin
    Pctl = 0x52C,
    /// GPIOADCCTL - pin triggers the ADC
    AdcCtl = 0x530,
    /// GPIODMACTL - pin triggers the uDMA
    DmaCtl = 0x534,
    /// Peripheral ID bits 39:32 (read-only)
    PeriphId4 = 0xFD0,
    /// Peripheral ID bits 47:40 (read-only)
    PeriphId5 = 0xFD4,
    /// Peripheral ID bits 55:48 (read-only)
    PeriphId6 = 0xFD8,
    /// Peripheral ID bits 63:56 (read-only)
    PeriphId7 = 0xFDC,
    /// Peripheral ID bits 7:0 (read-only)
    PeriphId0 = 0xFE0,
    /// Peripheral ID bits 15:8 (read-only)
    PeriphId1 = 0xFE4,
    /// Peripheral ID bits 23:16 (read-only)
    PeriphId2 = 0xFE8,
    /// Peripheral ID bits 31:24 (read-only)
    PeriphId3 = 0xFEC,
    /// PrimeCell ID bits 7:0 (read-only)
    PCellId0 = 0xFF0,
    /// PrimeCell ID bits 15:8 (read-only)
    PCellId1 = 0xFF4,
    /// PrimeCell ID bits 23:16 (read-only)
    PCellId2 = 0xFF8,
    /// PrimeCell ID bits 31:24 (read-only)
    PCellId3 = 0xFFC,
}

impl Register {
    /// Byte offset from the port base
    pub const fn offset(self) -> u16 {
        self as u16
    }

    /// Whether software may write this register
    pub const fn is_writable(self) -> bool {
        !matches!(
            self,
            Register::Ris
                | Register::Mis
                | Register::PeriphId0
                | Register::PeriphId1
                | Register::PeriphId2
                | Register::PeriphId3
                | Register::PeriphId4
                | Register::PeriphId5
                | Register::PeriphId6
                | Register::PeriphId7
                | Register::PCellId0
                | Register::PCellId1
                | Register::PCellId2
                | Register::PCellId3
        )
    }

    /// Whether the register is 32 bits wide (all others use bits 7:0)
    pub const fn is_word(self) -> bool {
        matches!(self, Register::Lock | Register::Pctl)
    }

    /// Look up the register at a byte offset
    pub fn at_offset(offset: u16) -> Option<Self> {
        Self::ALL.iter().copied().find(|reg| reg.offset() == offset)
    }

    /// All registers in address order
    pub const ALL: [Register; 35] = [
        Register::Dir,
        Register::Is,
        Register::Ibe,
        Register::Iev,
        Register::Im,
        Register::Ris,
        Register::Mis,
        Register::Icr,
        Register::Afsel,
        Register::Dr2r,
        Register::Dr4r,
        Register::Dr8r,
        Register::Odr,
        Register::Pur,
        Register::Pdr,
        Register::Slr,
        Register::Den,
        Register::Lock,
        Register::Cr,
        Register::Amsel,
        Register::Pctl,
        Register::AdcCtl,
        Register::DmaCtl,
        Register::PeriphId4,
        Register::PeriphId5,
        Register::PeriphId6,
        Register::PeriphId7,
        Register::PeriphId0,
        Register::PeriphId1,
        Register::PeriphId2,
        Register::PeriphId3,
        Register::PCellId0,
        Register::PCellId1,
        Register::PCellId2,
        Register::PCellId3,
    ];
}

mod sealed {
    pub trait Sealed {}
}

/// A typed, pending write to one writable register
///
/// Sealed: implemented only by the descriptor types in this module.
pub trait Descriptor: sealed::Sealed + Copy {
    /// Register width (`u8` or `u32`)
    type Value: Copy + Into<u32>;

    /// Target register
    const REGISTER: Register;

    /// Byte offset from the port base
    const OFFSET: u16 = Self::REGISTER.offset();

    /// Value to combine with the register
    fn value(&self) -> Self::Value;

    /// How the value is combined
    fn op(&self) -> Op;
}

/// A descriptor with its type erased, ready to be applied in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RegisterWrite {
    register: Register,
    value: u32,
    op: Op,
}

impl RegisterWrite {
    /// Erase a descriptor
    pub fn new<D: Descriptor>(descriptor: D) -> Self {
        Self {
            register: D::REGISTER,
            value: descriptor.value().into(),
            op: descriptor.op(),
        }
    }

    pub const fn register(&self) -> Register {
        self.register
    }

    /// Byte offset from the port base
    pub const fn offset(&self) -> u16 {
        self.register.offset()
    }

    pub const fn value(&self) -> u32 {
        self.value
    }

    pub const fn op(&self) -> Op {
        self.op
    }
}

macro_rules! descriptors {
    ($( $(#[$meta:meta])* $name:ident: $ty:ty => $reg:ident; )*) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq)]
            #[cfg_attr(feature = "defmt", derive(defmt::Format))]
            pub struct $name {
                value: $ty,
                op: Op,
            }

            impl $name {
                /// Write that ORs `value` into the register
                pub const fn new(value: $ty) -> Self {
                    Self::with_op(value, Op::Set)
                }

                /// Write with an explicit operation
                pub const fn with_op(value: $ty, op: Op) -> Self {
                    Self { value, op }
                }

                /// Set the bits in `value`
                pub const fn set(value: $ty) -> Self {
                    Self::with_op(value, Op::Set)
                }

                /// Clear the bits in `value`
                pub const fn clear(value: $ty) -> Self {
                    Self::with_op(value, Op::Clear)
                }
            }

            impl sealed::Sealed for $name {}

            impl Descriptor for $name {
                type Value = $ty;
                const REGISTER: Register = Register::$reg;

                fn value(&self) -> $ty {
                    self.value
                }

                fn op(&self) -> Op {
                    self.op
                }
            }

            impl From<$name> for RegisterWrite {
                fn from(descriptor: $name) -> Self {
                    RegisterWrite::new(descriptor)
                }
            }
        )*
    };
}

descriptors! {
    /// Direction: 1 makes the pin an output
    Dir: u8 => Dir;
    /// Interrupt sense: 1 level, 0 edge
    Is: u8 => Is;
    /// Interrupt on both edges
    Ibe: u8 => Ibe;
    /// Interrupt event: 1 rising/high, 0 falling/low
    Iev: u8 => Iev;
    /// Interrupt mask: 1 forwards the pin's interrupt
    Im: u8 => Im;
    /// Interrupt clear: 1 clears a latched edge interrupt
    Icr: u8 => Icr;
    /// Alternate function select (protected pins need an unlocked commit)
    Afsel: u8 => Afsel;
    /// 2-mA drive
    Dr2r: u8 => Dr2r;
    /// 4-mA drive
    Dr4r: u8 => Dr4r;
    /// 8-mA drive
    Dr8r: u8 => Dr8r;
    /// Open drain
    Odr: u8 => Odr;
    /// Pull-up (protected pins need an unlocked commit)
    Pur: u8 => Pur;
    /// Pull-down (protected pins need an unlocked commit)
    Pdr: u8 => Pdr;
    /// Slew-rate control
    Slr: u8 => Slr;
    /// Digital enable (protected pins need an unlocked commit)
    Den: u8 => Den;
    /// Lock register, see [`Lock::unlock`]
    Lock: u32 => Lock;
    /// Commit register, writable once per unlock
    Cr: u8 => Cr;
    /// Analog mode select
    Amsel: u8 => Amsel;
    /// Port control, 4 bits per pin (pin 0 in bits 3:0)
    Pctl: u32 => Pctl;
    /// ADC trigger enable
    AdcCtl: u8 => AdcCtl;
    /// uDMA trigger enable
    DmaCtl: u8 => DmaCtl;
}

impl Lock {
    /// Write that unlocks GPIOCR for exactly one write
    ///
    /// `LOCK_KEY` has bit 0 set, so OR-ing it onto a locked register
    /// (which reads 1) still stores the key itself.
    pub const fn unlock() -> Self {
        Self::set(LOCK_KEY)
    }

    /// Write that restores the lock
    ///
    /// An unlocked register reads 0; writing that back is a non-key write.
    pub const fn relock() -> Self {
        Self::set(0)
    }
}

impl Pctl {
    /// Mux `function` onto `pin` (encodings in datasheet table 23-5)
    ///
    /// Returns `None` for a pin outside 0..8 or a function wider than 4 bits.
    pub const fn function(pin: u8, function: u8) -> Option<Self> {
        if pin >= 8 || function > 0xF {
            return None;
        }
        Some(Self::set((function as u32) << (pin * 4)))
    }
}
