//! GPIO tri-color LED
//!
//! Drives each channel of a tri-color LED from one GPIO pin. Without PWM a
//! channel is either on or off: it lights when its scaled value reaches the
//! threshold.

use tivaport_hal::gpio::OutputPin;

use super::{Color, RgbLed};

/// Tri-color LED on three output pins
///
/// Pins can be configured as active-high (default) or active-low.
pub struct GpioRgbLed<R, G, B> {
    red: R,
    green: G,
    blue: B,
    /// Channel value (after scaling) at which a channel lights
    threshold: u16,
    /// If true, channel ON = pin LOW
    inverted: bool,
    intensity: f32,
    color: Color,
}

impl<R: OutputPin, G: OutputPin, B: OutputPin> GpioRgbLed<R, G, B> {
    /// Create a new LED driver, initially dark
    ///
    /// # Arguments
    /// - `threshold`: scaled channel value from which a channel lights
    /// - `inverted`: if true, a channel is lit when its pin is LOW
    pub fn new(red: R, green: G, blue: B, threshold: u16, inverted: bool) -> Self {
        let mut led = Self {
            red,
            green,
            blue,
            threshold,
            inverted,
            intensity: 1.0,
            color: Color::OFF,
        };
        // Ensure the LED starts dark
        led.refresh();
        led
    }

    /// Create an active-high LED driver
    pub fn new_active_high(red: R, green: G, blue: B, threshold: u16) -> Self {
        Self::new(red, green, blue, threshold, false)
    }

    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    /// Release the pins
    pub fn free(self) -> (R, G, B) {
        (self.red, self.green, self.blue)
    }

    fn lit(&self, value: u16) -> bool {
        value > 0 && value as f32 * self.intensity >= self.threshold as f32
    }

    fn refresh(&mut self) {
        let (red, green, blue) = (
            self.lit(self.color.red),
            self.lit(self.color.green),
            self.lit(self.color.blue),
        );
        // Normal: lit=true, inverted=false → high
        // Inverted: lit=true, inverted=true → low
        self.red.set_state(red != self.inverted);
        self.green.set_state(green != self.inverted);
        self.blue.set_state(blue != self.inverted);
    }
}

impl<R: OutputPin, G: OutputPin, B: OutputPin> RgbLed for GpioRgbLed<R, G, B> {
    fn set_color(&mut self, color: Color) {
        self.color = color;
        self.refresh();
    }

    fn set_intensity(&mut self, intensity: f32) {
        self.intensity = if intensity.is_nan() {
            0.0
        } else {
            intensity.clamp(0.0, 1.0)
        };
        self.refresh();
    }

    fn color(&self) -> Color {
        self.color
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Mock GPIO pin for testing
    struct MockPin {
        high: bool,
    }

    impl MockPin {
        fn new() -> Self {
            Self { high: false }
        }
    }

    impl OutputPin for MockPin {
        fn set_high(&mut self) {
            self.high = true;
        }

        fn set_low(&mut self) {
            self.high = false;
        }

        fn is_set_high(&self) -> bool {
            self.high
        }
    }

    fn led(inverted: bool) -> GpioRgbLed<MockPin, MockPin, MockPin> {
        GpioRgbLed::new(MockPin::new(), MockPin::new(), MockPin::new(), 0x4000, inverted)
    }

    fn levels(led: &GpioRgbLed<MockPin, MockPin, MockPin>) -> (bool, bool, bool) {
        (led.red.high, led.green.high, led.blue.high)
    }

    #[test]
    fn test_starts_dark() {
        assert_eq!(levels(&led(false)), (false, false, false));
        // Active-low: dark means all pins high
        assert_eq!(levels(&led(true)), (true, true, true));
    }

    #[test]
    fn test_threshold() {
        let mut led = led(false);
        led.set_color(Color::new(0x4000, 0x3FFF, 0x7FFF));
        assert_eq!(levels(&led), (true, false, true));
        assert_eq!(led.color(), Color::new(0x4000, 0x3FFF, 0x7FFF));

        led.set_color(Color::OFF);
        assert_eq!(levels(&led), (false, false, false));
    }

    #[test]
    fn test_intensity_scales_channels() {
        let mut led = led(false);
        led.set_color(Color::new(0x7FFF, 0x6000, 0x5000));
        assert_eq!(levels(&led), (true, true, true));

        led.set_intensity(0.6);
        // 0x7FFF * 0.6 ≈ 0x4CCC, 0x6000 * 0.6 = 0x3999, 0x5000 * 0.6 = 0x3000
        assert_eq!(levels(&led), (true, false, false));

        led.set_intensity(0.0);
        assert_eq!(levels(&led), (false, false, false));
    }

    #[test]
    fn test_intensity_is_clamped() {
        let mut led = led(false);
        led.set_intensity(4.0);
        assert_eq!(led.intensity(), 1.0);
        led.set_intensity(-1.0);
        assert_eq!(led.intensity(), 0.0);
        led.set_intensity(f32::NAN);
        assert_eq!(led.intensity(), 0.0);
    }

    #[test]
    fn test_zero_threshold_keeps_black_dark() {
        let mut led =
            GpioRgbLed::new_active_high(MockPin::new(), MockPin::new(), MockPin::new(), 0);
        led.set_color(Color::new(0, 1, 0));
        assert_eq!(levels(&led), (false, true, false));
    }

    #[test]
    fn test_inverted_outputs() {
        let mut led = led(true);
        led.set_color(Color::new(0x7FFF, 0, 0));
        assert_eq!(levels(&led), (false, true, true));
    }

    #[test]
    fn test_free_returns_pins() {
        let mut led = led(false);
        led.set_color(Color::new(0, 0x7FFF, 0));
        let (red, green, blue) = led.free();
        assert!(!red.high);
        assert!(green.high);
        assert!(!blue.high);
    }

    #[test]
    fn test_on_port_pins() {
        use tivaport_hal_tm4c123::sim::SimBus;
        use tivaport_hal_tm4c123::{Port, PortId};

        let sim = SimBus::new();
        let port = Port::with_bus(PortId::F, &sim);
        port.make_output(0x0E);

        let mut led = GpioRgbLed::new_active_high(
            port.pin(1).unwrap(),
            port.pin(3).unwrap(),
            port.pin(2).unwrap(),
            0x4000,
        );
        led.set_color(Color::new(0x7FFF, 0, 0x7FFF));
        assert_eq!(sim.data(PortId::F), 0b0000_0110);

        led.set_color(Color::new(0, 0x7FFF, 0));
        assert_eq!(sim.data(PortId::F), 0b0000_1000);
    }
}
