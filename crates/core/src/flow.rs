//! Noise-driven 2D flow field.
//!
//! A [`FlowField`] maps a pixel position and a time value to an acceleration
//! vector by sampling [`ValueNoise`] twice: once for direction (an angle in
//! [0, 2π) plus a slow linear time drift so the field keeps evolving), once
//! at a higher, spatially offset frequency for magnitude modulation.
//!
//! Deterministic: same seed and inputs produce the same vector.

use crate::noise::ValueNoise;
use glam::DVec2;
use std::f64::consts::TAU;

/// Base spatial density of the field; scaled by the water-quality setting.
const DENSITY: f64 = 0.0018;
/// Relative frequency of the direction sample.
const ANGLE_FREQ: f64 = 0.6;
/// Relative frequency of the magnitude sample.
const MAG_FREQ: f64 = 1.2;
/// Lattice offset separating the magnitude sample from the direction sample.
const MAG_OFFSET: DVec2 = DVec2::new(8.0, 3.0);
/// Angular drift per time unit, keeps the field from freezing.
const TIME_DRIFT: f64 = 0.2;

/// A source of 2D acceleration vectors over space and time.
///
/// Implementations must be deterministic: same inputs = same output, and the
/// result must be finite for finite inputs.
pub trait FlowSource: Send + Sync {
    /// Samples the field at position `(x, y)` at the given time.
    fn sample(&self, x: f64, y: f64, time: f64, quality: f64) -> DVec2;
}

/// Value-noise flow field.
///
/// Magnitude is modulated in [0.8, 1.2]; direction covers the full circle
/// and drifts linearly with time.
#[derive(Debug, Clone)]
pub struct FlowField {
    noise: ValueNoise,
}

impl FlowField {
    /// Creates a flow field over a permutation table built from `seed`.
    pub fn new(seed: u32) -> Self {
        Self {
            noise: ValueNoise::new(seed),
        }
    }
}

impl FlowSource for FlowField {
    fn sample(&self, x: f64, y: f64, time: f64, quality: f64) -> DVec2 {
        let s = DENSITY * quality;
        let angle = self.noise.sample(x * s * ANGLE_FREQ, y * s * ANGLE_FREQ) * TAU
            + time * TIME_DRIFT;
        let mag = 0.8
            + self
                .noise
                .sample(x * s * MAG_FREQ + MAG_OFFSET.x, y * s * MAG_FREQ + MAG_OFFSET.y)
                * 0.4;
        DVec2::new(angle.cos(), angle.sin()) * mag
    }
}
