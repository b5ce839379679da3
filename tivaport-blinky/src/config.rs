//! Build-time configuration
//!
//! Constants generated by build.rs from blinky.toml.

include!(concat!(env!("OUT_DIR"), "/config.rs"));
