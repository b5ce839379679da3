//! LED drivers

pub mod rgb;

pub use rgb::GpioRgbLed;

/// Color with one intensity per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Color {
    pub red: u16,
    pub green: u16,
    pub blue: u16,
}

impl Color {
    pub const OFF: Color = Color::new(0, 0, 0);

    pub const fn new(red: u16, green: u16, blue: u16) -> Self {
        Self { red, green, blue }
    }
}

/// Tri-color LED
pub trait RgbLed {
    /// Show `color`, scaled by the current intensity
    fn set_color(&mut self, color: Color);

    /// Overall brightness in 0.0..=1.0; values outside are clamped
    fn set_intensity(&mut self, intensity: f32);

    /// Color last requested through [`RgbLed::set_color`]
    fn color(&self) -> Color;
}
