//! Smoothed 2D value noise over a seeded permutation table.
//!
//! A [`ValueNoise`] is built once from a [`Mulberry32`](crate::Mulberry32)
//! stream: the 0..=255 index table is Fisher–Yates shuffled and duplicated
//! to 512 entries so nested `table[table[xi] + yi]` lookups never need a
//! modulo. Sampling bilinearly interpolates the four lattice-corner values
//! with the smooth fade curve `3t² − 2t³`, so the field is continuous across
//! integer boundaries and across the 256-cell tiling seam.
//!
//! Deterministic: same seed ⇒ bit-identical table ⇒ bit-identical samples.
//! No time-dependent state.

use crate::prng::Mulberry32;

/// Number of unique lattice values; the table holds two copies.
const TABLE_SIZE: usize = 256;

/// Seeded 2D value-noise field.
#[derive(Debug, Clone)]
pub struct ValueNoise {
    /// 512-entry permutation table: `table[i + 256] == table[i]`.
    table: [u8; TABLE_SIZE * 2],
}

impl ValueNoise {
    /// Builds the permutation table from the given seed.
    ///
    /// Shuffle index `j` is drawn as `⌊rnd()·i⌋` for `i` descending from 255,
    /// then the 256 entries are duplicated into the upper half.
    pub fn new(seed: u32) -> Self {
        let mut rng = Mulberry32::new(seed);
        let mut table = [0u8; TABLE_SIZE * 2];
        for (i, slot) in table.iter_mut().take(TABLE_SIZE).enumerate() {
            *slot = i as u8;
        }
        for i in (1..TABLE_SIZE).rev() {
            let j = (rng.next_f64() * i as f64) as usize;
            table.swap(i, j);
        }
        let (lo, hi) = table.split_at_mut(TABLE_SIZE);
        hi.copy_from_slice(lo);
        Self { table }
    }

    /// Samples the noise field at `(x, y)`. Returns a value in [0, 1].
    ///
    /// Lattice coordinates wrap every 256 cells via `& 255` (two's-complement
    /// bitmask, so negative coordinates are valid). Repeatable: no internal
    /// state is touched.
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        let xi = (x.floor() as i64 & 255) as usize;
        let yi = (y.floor() as i64 & 255) as usize;
        let xf = x - x.floor();
        let yf = y - y.floor();

        let t = &self.table;
        let v1 = f64::from(t[t[xi] as usize + yi]) / 255.0;
        let v2 = f64::from(t[t[xi + 1] as usize + yi]) / 255.0;
        let v3 = f64::from(t[t[xi] as usize + yi + 1]) / 255.0;
        let v4 = f64::from(t[t[xi + 1] as usize + yi + 1]) / 255.0;

        let u = fade(xf);
        let v = fade(yf);
        lerp(lerp(v1, v2, u), lerp(v3, v4, u), v)
    }
}

/// Smooth interpolation curve `3t² − 2t³` (zero slope at 0 and 1).
fn fade(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}

/// Linear interpolation `a + (b − a)·t`.
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}
