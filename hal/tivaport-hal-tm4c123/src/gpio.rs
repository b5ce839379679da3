//! Pin names and pin claim tracking for TM4C123
//!
//! Ports hand out aliases freely, so nothing stops two drivers from
//! driving the same pin. [`PinAllocator`] lets board setup code catch
//! that at runtime.

use crate::port::PINS_PER_PORT;
use crate::target::PortId;

/// Errors from pin bookkeeping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinError {
    /// Pin number out of range (0-7 valid)
    InvalidPin,
    /// Pin already taken
    AlreadyTaken,
}

/// GPIO allocator to track pin usage across all ports
#[derive(Debug, Default)]
pub struct PinAllocator {
    /// One bit per pin, port A pin 0 at bit 0, port F pin 7 at bit 47
    allocated: u64,
}

impl PinAllocator {
    /// Create a new allocator with every pin free
    pub const fn new() -> Self {
        Self { allocated: 0 }
    }

    /// Claim a pin
    pub fn allocate(&mut self, port: PortId, pin: u8) -> Result<(), PinError> {
        let mask = Self::mask(port, pin)?;
        if self.allocated & mask != 0 {
            return Err(PinError::AlreadyTaken);
        }
        self.allocated |= mask;
        Ok(())
    }

    /// Release a pin
    pub fn release(&mut self, port: PortId, pin: u8) {
        if let Ok(mask) = Self::mask(port, pin) {
            self.allocated &= !mask;
        }
    }

    /// Check if a pin is allocated
    pub fn is_allocated(&self, port: PortId, pin: u8) -> bool {
        Self::mask(port, pin).is_ok_and(|mask| self.allocated & mask != 0)
    }

    /// Claimed pins of one port as a data-register mask
    pub fn port_mask(&self, port: PortId) -> u8 {
        (self.allocated >> (port.index() * PINS_PER_PORT as usize)) as u8
    }

    /// Get the number of allocated pins
    pub fn allocated_count(&self) -> u32 {
        self.allocated.count_ones()
    }

    fn mask(port: PortId, pin: u8) -> Result<u64, PinError> {
        if pin >= PINS_PER_PORT {
            return Err(PinError::InvalidPin);
        }
        Ok(1 << (port.index() * PINS_PER_PORT as usize + pin as usize))
    }
}

/// Parse a pin name
///
/// Supports formats:
/// - "PF3" -> (Port F, Pin 3, false)
/// - "!PB1" -> (Port B, Pin 1, true/inverted)
///
/// Usable in constants, so board tables fail to build on a bad name.
pub const fn parse_pin_string(s: &str) -> Option<(PortId, u8, bool)> {
    let bytes = s.as_bytes();
    let (start, inverted) = match bytes.first() {
        Some(b'!') => (1, true),
        _ => (0, false),
    };

    if bytes.len() != start + 3 || bytes[start] != b'P' {
        return None;
    }

    let port = match PortId::from_letter(bytes[start + 1]) {
        Some(port) => port,
        None => return None,
    };

    let digit = bytes[start + 2];
    if digit < b'0' || digit >= b'0' + PINS_PER_PORT {
        return None;
    }

    Some((port, digit - b'0', inverted))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocator() {
        let mut alloc = PinAllocator::new();

        assert!(alloc.allocate(PortId::F, 3).is_ok());
        assert!(alloc.is_allocated(PortId::F, 3));
        assert!(!alloc.is_allocated(PortId::E, 3));

        // Can't allocate same pin twice
        assert_eq!(alloc.allocate(PortId::F, 3), Err(PinError::AlreadyTaken));

        // Can allocate different pin
        assert!(alloc.allocate(PortId::F, 1).is_ok());
        assert_eq!(alloc.port_mask(PortId::F), 0b0000_1010);
        assert_eq!(alloc.allocated_count(), 2);

        // Release and re-allocate
        alloc.release(PortId::F, 3);
        assert!(!alloc.is_allocated(PortId::F, 3));
        assert!(alloc.allocate(PortId::F, 3).is_ok());
    }

    #[test]
    fn test_allocator_bounds() {
        let mut alloc = PinAllocator::new();
        assert_eq!(alloc.allocate(PortId::A, 8), Err(PinError::InvalidPin));
        assert!(!alloc.is_allocated(PortId::A, 8));
        assert!(alloc.allocate(PortId::F, 7).is_ok());
        assert!(alloc.allocate(PortId::A, 0).is_ok());
        assert_eq!(alloc.port_mask(PortId::F), 0x80);
        assert_eq!(alloc.port_mask(PortId::A), 0x01);
        assert_eq!(alloc.port_mask(PortId::B), 0x00);
    }

    #[test]
    fn test_parse_pin_string() {
        assert_eq!(parse_pin_string("PF3"), Some((PortId::F, 3, false)));
        assert_eq!(parse_pin_string("!PB1"), Some((PortId::B, 1, true)));
        assert_eq!(parse_pin_string("PA0"), Some((PortId::A, 0, false)));
        assert_eq!(parse_pin_string("PE7"), Some((PortId::E, 7, false)));

        // Invalid
        assert_eq!(parse_pin_string("PF8"), None);
        assert_eq!(parse_pin_string("PG1"), None);
        assert_eq!(parse_pin_string("pf3"), None);
        assert_eq!(parse_pin_string("PF"), None);
        assert_eq!(parse_pin_string("PF10"), None);
        assert_eq!(parse_pin_string("!"), None);
        assert_eq!(parse_pin_string(""), None);
    }

    #[test]
    fn test_parse_in_const() {
        const LED: Option<(PortId, u8, bool)> = parse_pin_string("PF2");
        assert_eq!(LED, Some((PortId::F, 2, false)));
    }
}
