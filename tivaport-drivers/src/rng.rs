//! Pseudo-random source for demo patterns
//!
//! The classic portable linear congruential generator: 32-bit state,
//! multiplier 1103515245, increment 12345, output bits 30:16. Sequences are
//! reproducible from the seed, which is all a light show needs. Not suitable
//! for anything security-related.

use crate::led::Color;

/// Largest value [`Lcg::next_value`] returns
pub const RAND_MAX: u16 = 32767;

/// Seed used when none is given
pub const DEFAULT_SEED: u32 = 1;

const MULTIPLIER: u32 = 1_103_515_245;
const INCREMENT: u32 = 12_345;

/// Linear congruential generator
#[derive(Debug, Clone)]
pub struct Lcg {
    state: u32,
}

impl Default for Lcg {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl Lcg {
    pub const fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Restart the sequence from `seed`
    pub fn seed(&mut self, seed: u32) {
        self.state = seed;
    }

    /// Next value in 0..=RAND_MAX
    pub fn next_value(&mut self) -> u16 {
        self.state = self.state.wrapping_mul(MULTIPLIER).wrapping_add(INCREMENT);
        ((self.state / 65_536) % (RAND_MAX as u32 + 1)) as u16
    }

    /// Three consecutive values as red, green, blue
    pub fn next_color(&mut self) -> Color {
        let red = self.next_value();
        let green = self.next_value();
        let blue = self.next_value();
        Color::new(red, green, blue)
    }
}

impl Iterator for Lcg {
    type Item = u16;

    fn next(&mut self) -> Option<u16> {
        Some(self.next_value())
    }
}
