//! Deterministic PRNG based on the mulberry32 algorithm.
//!
//! Fast, seedable generator used to shuffle the noise permutation table.
//! Same seed always produces the same sequence on every platform: the core
//! algorithm is pure 32-bit integer arithmetic, floats only appear in the
//! final [0, 1) conversion.

use serde::{Deserialize, Serialize};

/// Mulberry32 deterministic PRNG. Same seed always produces the same sequence.
///
/// A 32-bit state is advanced by the golden-gamma-like increment
/// `0x6D2B_79F5` and scrambled with two multiply-xorshift rounds. Unlike
/// xorshift-family generators there is no all-zeros fixed point, so seed 0
/// is a valid seed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    /// Creates a new PRNG with the given seed.
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Advances the state and returns the next 32-bit value.
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(0x6D2B_79F5);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }

    /// Returns a uniformly distributed f64 in [0, 1).
    ///
    /// Divides `next_u32()` by 2^32, so the result carries the full 32 bits
    /// of generator output.
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / 4_294_967_296.0
    }
}
