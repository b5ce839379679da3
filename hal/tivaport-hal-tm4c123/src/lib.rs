//! TM4C123GH6PM GPIO port layer
//!
//! Typed access to the six GPIO ports of the TM4C123GH6PM (Tiva C
//! LaunchPad):
//!
//! - [`regs`] - the register map and one write descriptor type per writable
//!   register
//! - [`port::Port`] - ordered batch writes with the clock-enable sequence,
//!   and bit-addressed data access
//! - [`pin::Pin`] - single pins implementing the `tivaport-hal` and
//!   `embedded-hal` digital traits
//! - [`gpio`] - pin names and claim tracking
//!
//! # Features
//!
//! - `tm4c123-rb1` - Address tables for the TM4C123 APB aperture (default)
//! - `sim` - Export [`sim::SimBus`] for host-side tests in other crates
//! - `defmt` - Enable debug formatting support
//!
//! # Usage
//!
//! ```no_run
//! use tivaport_hal_tm4c123::port::Port;
//! use tivaport_hal_tm4c123::regs::{Den, Dir};
//! use tivaport_hal_tm4c123::target::{ClockRegister, PortId};
//!
//! let port_f = Port::new(PortId::F);
//! port_f.initialize(
//!     &[ClockRegister::RunMode],
//!     &[Dir::set(0x08).into(), Den::set(0x08).into()],
//! );
//! port_f.data_bits(&[3]).set();
//! ```

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod mmio;
pub mod pin;
pub mod port;
pub mod regs;
#[cfg(any(test, feature = "sim"))]
pub mod sim;
pub mod target;

// Re-export the types most callers need
pub use gpio::{parse_pin_string, PinAllocator, PinError};
pub use pin::Pin;
pub use port::{Data, Port, PortError};
pub use regs::{Descriptor, Op, Register, RegisterWrite, LOCK_KEY};
pub use target::{ClockRegister, PortId, Target};
