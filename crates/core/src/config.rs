//! Runtime configuration with bounds-checked setters.
//!
//! External collaborators (pointer handlers, sliders) mutate a [`Config`]
//! between frames; the simulation and renderer read it as a snapshot at the
//! start of each step/frame. Every setter clamps to its documented range, so
//! out-of-range values never reach the physics or the compositor — the core
//! is authoritative about bounds, callers are not trusted.

use crate::params::{param_f64, param_usize};
use glam::DVec2;
use serde_json::{json, Value};

/// Lower zoom bound, the far end of the pinch range.
pub const ZOOM_MIN: f64 = 0.7;
/// Upper zoom bound.
pub const ZOOM_MAX: f64 = 1.6;
/// Lower speed-multiplier bound; keeps the steering term alive.
pub const SPEED_MIN: f64 = 0.05;
/// Upper speed-multiplier bound.
pub const SPEED_MAX: f64 = 8.0;
/// Minimum trail history length (one drawable segment).
pub const TRAIL_MIN: usize = 2;
/// Practical cap on the trail history length.
pub const TRAIL_MAX: usize = 400;
/// Stroke thickness range in pixels.
pub const THICKNESS_MIN: u32 = 1;
/// Upper stroke thickness bound.
pub const THICKNESS_MAX: u32 = 64;
/// Lower water-quality bound; 0 would zero the flow density and divide the
/// contour step by zero.
pub const QUALITY_MIN: f64 = 0.05;
/// Upper water-quality bound.
pub const QUALITY_MAX: f64 = 1.0;

const DEFAULT_GLOW: f64 = 0.9;
const DEFAULT_SPEED: f64 = 1.0;
const DEFAULT_TRAIL_LEN: usize = 180;
const DEFAULT_THICKNESS: u32 = 6;
const DEFAULT_QUALITY: f64 = 0.8;

/// Mutable scene configuration, clamped at every boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    target: DVec2,
    zoom: f64,
    glow: f64,
    speed: f64,
    trail_len: usize,
    thickness: u32,
    water_quality: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target: DVec2::splat(0.5),
            zoom: 1.0,
            glow: DEFAULT_GLOW,
            speed: DEFAULT_SPEED,
            trail_len: DEFAULT_TRAIL_LEN,
            thickness: DEFAULT_THICKNESS,
            water_quality: DEFAULT_QUALITY,
        }
    }
}

impl Config {
    /// Target point in normalized [0, 1]² coordinates.
    pub fn target(&self) -> DVec2 {
        self.target
    }

    /// Sets the target point; each component is clamped to [0, 1].
    pub fn set_target(&mut self, x: f64, y: f64) {
        let x = if x.is_nan() { 0.5 } else { x };
        let y = if y.is_nan() { 0.5 } else { y };
        self.target = DVec2::new(x.clamp(0.0, 1.0), y.clamp(0.0, 1.0));
    }

    /// Zoom factor in [`ZOOM_MIN`], [`ZOOM_MAX`].
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Sets the zoom factor, clamped to the zoom range.
    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom.is_nan() {
            return;
        }
        self.zoom = zoom.clamp(ZOOM_MIN, ZOOM_MAX);
    }

    /// Adds `delta` to the zoom factor, clamping the result.
    pub fn adjust_zoom(&mut self, delta: f64) {
        if delta.is_nan() {
            return;
        }
        self.set_zoom(self.zoom + delta);
    }

    /// Glow intensity in [0, 1].
    pub fn glow(&self) -> f64 {
        self.glow
    }

    /// Sets the glow intensity, clamped to [0, 1].
    pub fn set_glow(&mut self, glow: f64) {
        if glow.is_nan() {
            return;
        }
        self.glow = glow.clamp(0.0, 1.0);
    }

    /// Speed multiplier in [`SPEED_MIN`], [`SPEED_MAX`].
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Sets the speed multiplier, clamped to the speed range.
    pub fn set_speed(&mut self, speed: f64) {
        if speed.is_nan() {
            return;
        }
        self.speed = speed.clamp(SPEED_MIN, SPEED_MAX);
    }

    /// Trail history length in [`TRAIL_MIN`], [`TRAIL_MAX`].
    pub fn trail_len(&self) -> usize {
        self.trail_len
    }

    /// Sets the trail length, clamped to the trail range.
    ///
    /// Takes effect lazily: a shorter history is trimmed by the next
    /// simulation step, a longer one refills naturally.
    pub fn set_trail_len(&mut self, len: usize) {
        self.trail_len = len.clamp(TRAIL_MIN, TRAIL_MAX);
    }

    /// Stroke thickness in pixels, in [`THICKNESS_MIN`], [`THICKNESS_MAX`].
    pub fn thickness(&self) -> u32 {
        self.thickness
    }

    /// Sets the stroke thickness, clamped to the thickness range.
    pub fn set_thickness(&mut self, thickness: u32) {
        self.thickness = thickness.clamp(THICKNESS_MIN, THICKNESS_MAX);
    }

    /// Water/background quality in [`QUALITY_MIN`], [`QUALITY_MAX`].
    pub fn water_quality(&self) -> f64 {
        self.water_quality
    }

    /// Sets the water quality, clamped to the quality range.
    pub fn set_water_quality(&mut self, quality: f64) {
        if quality.is_nan() {
            return;
        }
        self.water_quality = quality.clamp(QUALITY_MIN, QUALITY_MAX);
    }

    /// Applies the keys present in a JSON object, routing each through its
    /// clamping setter. Missing keys keep their current value.
    ///
    /// Recognized keys: `glow`, `speed`, `trail_len`, `thickness`,
    /// `water_quality`, `zoom`, `target_x`, `target_y`.
    pub fn apply_json(&mut self, params: &Value) {
        self.set_glow(param_f64(params, "glow", self.glow));
        self.set_speed(param_f64(params, "speed", self.speed));
        self.set_trail_len(param_usize(params, "trail_len", self.trail_len));
        self.set_thickness(param_usize(params, "thickness", self.thickness as usize) as u32);
        self.set_water_quality(param_f64(params, "water_quality", self.water_quality));
        self.set_zoom(param_f64(params, "zoom", self.zoom));
        let tx = param_f64(params, "target_x", self.target.x);
        let ty = param_f64(params, "target_y", self.target.y);
        self.set_target(tx, ty);
    }

    /// Builds a configuration from a JSON object over the defaults.
    pub fn from_json(params: &Value) -> Self {
        let mut config = Self::default();
        config.apply_json(params);
        config
    }

    /// Current values as a JSON object.
    pub fn params(&self) -> Value {
        json!({
            "glow": self.glow,
            "speed": self.speed,
            "trail_len": self.trail_len,
            "thickness": self.thickness,
            "water_quality": self.water_quality,
            "zoom": self.zoom,
            "target_x": self.target.x,
            "target_y": self.target.y,
        })
    }

    /// Schema describing all parameters, their ranges, and defaults.
    pub fn param_schema() -> Value {
        json!({
            "glow": {
                "type": "number",
                "default": DEFAULT_GLOW,
                "min": 0.0,
                "max": 1.0,
                "description": "Trail glow intensity"
            },
            "speed": {
                "type": "number",
                "default": DEFAULT_SPEED,
                "min": SPEED_MIN,
                "max": SPEED_MAX,
                "description": "Speed multiplier applied to steering, flow and the velocity cap"
            },
            "trail_len": {
                "type": "integer",
                "default": DEFAULT_TRAIL_LEN,
                "min": TRAIL_MIN,
                "max": TRAIL_MAX,
                "description": "Trail history length in samples"
            },
            "thickness": {
                "type": "integer",
                "default": DEFAULT_THICKNESS,
                "min": THICKNESS_MIN,
                "max": THICKNESS_MAX,
                "description": "Stroke thickness at the head, in pixels"
            },
            "water_quality": {
                "type": "number",
                "default": DEFAULT_QUALITY,
                "min": QUALITY_MIN,
                "max": QUALITY_MAX,
                "description": "Background contour density and flow-field density"
            },
            "zoom": {
                "type": "number",
                "default": 1.0,
                "min": ZOOM_MIN,
                "max": ZOOM_MAX,
                "description": "Integration scale applied to the velocity"
            },
            "target_x": {
                "type": "number",
                "default": 0.5,
                "min": 0.0,
                "max": 1.0,
                "description": "Target x in normalized canvas coordinates"
            },
            "target_y": {
                "type": "number",
                "default": 0.5,
                "min": 0.0,
                "max": 1.0,
                "description": "Target y in normalized canvas coordinates"
            }
        })
    }
}
