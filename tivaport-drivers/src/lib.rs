//! Driver implementations
//!
//! Board-level drivers built on the `tivaport-hal` traits:
//!
//! - LED drivers (tri-color LED on three GPIO pins)
//! - Pseudo-random source for demo patterns

#![no_std]
#![deny(unsafe_code)]

pub mod led;
pub mod rng;
