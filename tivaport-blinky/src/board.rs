//! EK-TM4C123GXL LaunchPad wiring
//!
//! Pin names come from blinky.toml and are parsed at compile time: a bad
//! name fails the build here even if build.rs were bypassed.

use tivaport_hal_tm4c123::{parse_pin_string, PortId};

use crate::config;

/// (port, pin, active-low)
pub type PinName = (PortId, u8, bool);

const fn pin(name: &str) -> PinName {
    match parse_pin_string(name) {
        Some(pin) => pin,
        None => panic!("invalid pin name in blinky.toml"),
    }
}

pub const LED_RED: PinName = pin(config::LED_RED);
pub const LED_GREEN: PinName = pin(config::LED_GREEN);
pub const LED_BLUE: PinName = pin(config::LED_BLUE);

/// Pins claimed by the tri-color LED, with their channel names
pub const LED_PINS: [(&str, PinName); 3] = [
    ("red", LED_RED),
    ("green", LED_GREEN),
    ("blue", LED_BLUE),
];

/// build.rs guarantees all three share one polarity
pub const LED_INVERTED: bool = LED_RED.2;
