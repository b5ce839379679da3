//! tivaport Hardware Abstraction Layer
//!
//! This crate defines the seams between register-level code and the
//! memory it drives. Chip crates implement [`bus::RegisterBus`] twice: once
//! over real memory-mapped I/O and once over a host-side simulation, so the
//! same port logic runs on the LaunchPad and under `cargo test`.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (tivaport-blinky, etc.)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  tivaport-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!           ┌───────────────────┐
//!           │ tivaport-hal-     │
//!           │     tm4c123       │
//!           └───────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`bus::RegisterBus`] - 32-bit loads and stores at absolute addresses
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O

#![no_std]
#![deny(unsafe_code)]

pub mod bus;
pub mod gpio;

// Re-export key traits at crate root for convenience
pub use bus::RegisterBus;
pub use gpio::{InputPin, IoPin, OutputPin};
