//! RNG module - deterministic digit generation
//!
//! Grid values come from a simple LCG so a round can be replayed from its seed.
//! The low bits of an LCG cycle quickly, so ranged draws use the high bits.

use crate::types::{MAX_CELL_VALUE, MIN_CELL_VALUE};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Multiply-shift keeps the well-mixed high bits. Returns 0 when `max` is 0.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Draw one cell digit, uniform over `MIN_CELL_VALUE..=MAX_CELL_VALUE`
    pub fn next_digit(&mut self) -> u8 {
        let span = (MAX_CELL_VALUE - MIN_CELL_VALUE + 1) as u32;
        MIN_CELL_VALUE + self.next_range(span) as u8
    }

    /// Current internal state (reseeding with it continues the sequence)
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}
