//! Single-pin handles
//!
//! A [`Pin`] drives one data bit through its own alias address, so setting
//! or clearing it is a single store that cannot disturb neighbouring pins,
//! even when an interrupt handler drives another pin of the same port.
//! Direction and digital enable are configured on the [`Port`] beforehand.
//!
//! [`Port`]: crate::port::Port

use core::convert::Infallible;

use tivaport_hal::gpio::{InputPin, OutputPin};
use tivaport_hal::RegisterBus;

use crate::port::Data;

/// One pin of a port
pub struct Pin<'a, B> {
    data: Data<'a, B>,
    index: u8,
}

impl<'a, B: RegisterBus> Pin<'a, B> {
    pub(crate) fn new(data: Data<'a, B>, index: u8) -> Self {
        Self { data, index }
    }

    /// Pin number within its port (0..8)
    pub const fn index(&self) -> u8 {
        self.index
    }

    fn level(&self) -> bool {
        self.data.read() != 0
    }
}

impl<B: RegisterBus> OutputPin for Pin<'_, B> {
    fn set_high(&mut self) {
        self.data.set();
    }

    fn set_low(&mut self) {
        self.data.clear();
    }

    fn is_set_high(&self) -> bool {
        self.level()
    }
}

impl<B: RegisterBus> InputPin for Pin<'_, B> {
    fn is_high(&self) -> bool {
        self.level()
    }
}

impl<B: RegisterBus> embedded_hal::digital::ErrorType for Pin<'_, B> {
    type Error = Infallible;
}

impl<B: RegisterBus> embedded_hal::digital::OutputPin for Pin<'_, B> {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.data.clear();
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.data.set();
        Ok(())
    }
}

impl<B: RegisterBus> embedded_hal::digital::StatefulOutputPin for Pin<'_, B> {
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.level())
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.level())
    }
}

impl<B: RegisterBus> embedded_hal::digital::InputPin for Pin<'_, B> {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.level())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.level())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::Port;
    use crate::sim::SimBus;
    use crate::target::PortId;

    #[test]
    fn test_pin_drives_only_its_bit() {
        let sim = SimBus::new();
        let port = Port::with_bus(PortId::F, &sim);
        port.make_output(0x0E);
        sim.poke(port.data().address(), 0b1000_0001);

        let mut green = port.pin(3).unwrap();
        assert_eq!(green.index(), 3);
        OutputPin::set_high(&mut green);
        assert_eq!(sim.data(PortId::F), 0b1000_1001);
        assert!(OutputPin::is_set_high(&green));

        OutputPin::toggle(&mut green);
        assert_eq!(sim.data(PortId::F), 0b1000_0001);
        assert!(OutputPin::is_set_low(&green));
    }

    #[test]
    fn test_two_pins_share_a_port() {
        let sim = SimBus::new();
        let port = Port::with_bus(PortId::F, &sim);
        let mut red = port.pin(1).unwrap();
        let mut blue = port.pin(2).unwrap();

        OutputPin::set_high(&mut red);
        OutputPin::set_high(&mut blue);
        OutputPin::set_low(&mut red);
        assert_eq!(sim.data(PortId::F), 0b0000_0100);
    }

    #[test]
    fn test_input_reads_level() {
        let sim = SimBus::new();
        let port = Port::with_bus(PortId::F, &sim);
        let switch = port.pin(4).unwrap();
        assert!(InputPin::is_low(&switch));
        sim.poke(port.data().address(), 0b0001_0000);
        assert!(InputPin::is_high(&switch));
    }
}

#[cfg(test)]
mod embedded_hal_tests {
    use embedded_hal::digital::{InputPin, OutputPin, StatefulOutputPin};

    use crate::port::Port;
    use crate::sim::SimBus;
    use crate::target::PortId;

    #[test]
    fn test_embedded_hal_traits() {
        let sim = SimBus::new();
        let port = Port::with_bus(PortId::B, &sim);
        let mut pin = port.pin(5).unwrap();

        pin.set_high().unwrap();
        assert_eq!(sim.data(PortId::B), 0b0010_0000);
        assert!(pin.is_set_high().unwrap());
        assert!(pin.is_high().unwrap());

        pin.toggle().unwrap();
        assert!(pin.is_set_low().unwrap());
        assert!(pin.is_low().unwrap());
        assert_eq!(sim.data(PortId::B), 0);
    }
}
