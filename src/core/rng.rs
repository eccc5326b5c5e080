//! RNG module - deterministic tile spawning
//!
//! A simple LCG keeps the engine free of external RNG dependencies and makes
//! games reproducible from a seed, which the tests rely on.

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
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // Use the high bits; LCG low bits have short periods.
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Get the current state (for restarting a game with the same stream)
    pub fn state(&self) -> u32 {
        self.state
    }
}
