#![deny(unsafe_code)]
//! CPU compositor for the abyss-trail engine.
//!
//! [`Renderer::render`] produces one frame in three ordered passes:
//!
//! 1. **Water** — a low-resolution offscreen surface gets the theme's
//!    vertical gradient plus noise-driven contour strokes, then is upscaled
//!    bilinearly to the full canvas (deliberate softness).
//! 2. **Vignette** — a radial darkening focused toward the lower center.
//! 3. **Trail** — additive, tapering segments over the body history, a glow
//!    halo scaled by the configured intensity, and a radial head highlight.
//!
//! The renderer only writes its own surfaces; it never mutates simulation
//! state, and it runs every displayed frame whether or not the simulation is
//! paused.

pub mod surface;

#[cfg(feature = "png")]
pub mod snapshot;

use abyss_trail_core::{Srgb, ValueNoise};
use abyss_trail_sim::TrailSim;
use glam::DVec2;
use std::f64::consts::TAU;
use surface::Surface;

/// Offscreen water surface size as a fraction of the logical canvas.
pub const WATER_SCALE: f64 = 0.6;
/// Wall-clock scale for the water animation.
const WATER_TIME_SCALE: f64 = 4e-4;
/// Vertical scroll speed of the contour field, in noise cells per time unit.
const WATER_SCROLL: f64 = 40.0;
/// Spatial frequency of the contour noise.
const CONTOUR_FREQ: f64 = 0.02;
/// Contour displacement amplitude in water pixels.
const CONTOUR_AMP: f64 = 12.0;
/// Effective contour stroke alpha: 0.16 layer opacity times 0.25 stroke
/// alpha.
const CONTOUR_ALPHA: f64 = 0.16 * 0.25;
/// Vignette focal point as a fraction of canvas height.
const VIGNETTE_FOCUS_Y: f64 = 0.65;
/// Inner vignette radius as a fraction of the smaller canvas extent.
const VIGNETTE_INNER: f64 = 0.2;
/// Outer vignette radius as a fraction of the larger canvas extent.
const VIGNETTE_OUTER: f64 = 0.8;
/// Vignette opacity at the outer radius.
const VIGNETTE_ALPHA: f64 = 0.6;
/// Trail segments drawn in the head color before switching to the tail color.
const HEAD_SEGMENTS: usize = 8;
/// Glow halo radius in pixels at glow intensity 1.
const GLOW_RADIUS: f64 = 20.0;
/// Highlight alpha at the head center.
const AURA_ALPHA: f64 = 0.85;

/// Three-pass frame compositor.
#[derive(Debug, Clone)]
pub struct Renderer {
    noise: ValueNoise,
    frame: Surface,
    water: Surface,
    width: f64,
    height: f64,
    scale: f64,
}

impl Renderer {
    /// Creates a renderer for a `width`×`height` logical canvas at the given
    /// device-pixel ratio.
    ///
    /// The noise seed should match the simulation's so the background and
    /// the flow field come from the same permutation table.
    pub fn new(width: f64, height: f64, device_pixel_ratio: f64, seed: u32) -> Self {
        let mut renderer = Self {
            noise: ValueNoise::new(seed),
            frame: Surface::new(1, 1),
            water: Surface::new(1, 1),
            width: 1.0,
            height: 1.0,
            scale: 1.0,
        };
        renderer.resize(width, height, device_pixel_ratio);
        renderer
    }

    /// Re-derives the frame and water surfaces for new canvas dimensions.
    ///
    /// The frame surface is allocated at physical size (logical × DPR, DPR
    /// clamped to [1, 2]); the water surface stays at [`WATER_SCALE`] of the
    /// logical size. Degenerate dimensions normalize up to one pixel.
    pub fn resize(&mut self, width: f64, height: f64, device_pixel_ratio: f64) {
        self.width = normalize_extent(width);
        self.height = normalize_extent(height);
        self.scale = if device_pixel_ratio.is_finite() {
            device_pixel_ratio.clamp(1.0, 2.0)
        } else {
            1.0
        };
        self.frame = Surface::new(
            (self.width * self.scale).floor() as usize,
            (self.height * self.scale).floor() as usize,
        );
        self.water = Surface::new(
            (self.width * WATER_SCALE).floor() as usize,
            (self.height * WATER_SCALE).floor() as usize,
        );
    }

    /// The composited frame from the most recent [`Renderer::render`] call.
    pub fn frame(&self) -> &Surface {
        &self.frame
    }

    /// Device-pixel ratio in effect (clamped to [1, 2]).
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Composites one frame from the simulation state at wall-clock
    /// `time_ms` and returns the frame surface.
    ///
    /// Wall-clock time drives only the background animation, so the water
    /// keeps moving while the simulation is paused.
    pub fn render(&mut self, sim: &TrailSim, time_ms: f64) -> &Surface {
        let theme = sim.theme();
        let t = time_ms * WATER_TIME_SCALE;

        self.water_pass(theme.water_top, theme.water_bottom, sim.config().water_quality(), t);
        self.frame.blit_scaled(&self.water);
        self.vignette_pass();
        self.trail_pass(sim);
        &self.frame
    }

    /// Background pass: theme gradient plus animated contour strokes on the
    /// low-resolution water surface.
    fn water_pass(&mut self, top: Srgb, bottom: Srgb, quality: f64, t: f64) {
        self.water.fill_vertical_gradient(top, bottom);

        let step = ((6.0 / quality).floor() as usize).max(2);
        let white = Srgb { r: 1.0, g: 1.0, b: 1.0 };
        let (w, h) = (self.water.width(), self.water.height());
        let mut line = Vec::with_capacity(w / step + 2);

        let mut y = 0;
        while y < h {
            line.clear();
            let mut x = 0;
            while x < w {
                let v = self
                    .noise
                    .sample(x as f64 * CONTOUR_FREQ, (y as f64 + t * WATER_SCROLL) * CONTOUR_FREQ);
                let yy = y as f64 + (v * TAU + t * 2.0).sin() * CONTOUR_AMP * quality;
                line.push(DVec2::new(x as f64, yy));
                x += step;
            }
            self.water.stroke_polyline(&line, white, CONTOUR_ALPHA);
            y += step;
        }
    }

    /// Vignette pass over the full physical frame.
    fn vignette_pass(&mut self) {
        let w = self.frame.width() as f64;
        let h = self.frame.height() as f64;
        let black = Srgb { r: 0.0, g: 0.0, b: 0.0 };
        self.frame.vignette(
            DVec2::new(w / 2.0, h * VIGNETTE_FOCUS_Y),
            w.min(h) * VIGNETTE_INNER,
            w.max(h) * VIGNETTE_OUTER,
            black,
            VIGNETTE_ALPHA,
        );
    }

    /// Trail pass: tapering additive segments plus the head highlight.
    fn trail_pass(&mut self, sim: &TrailSim) {
        let theme = sim.theme();
        let config = sim.config();
        let scale = self.scale;
        let thickness = f64::from(config.thickness());
        let glow_radius = GLOW_RADIUS * config.glow() * scale;

        let points: Vec<DVec2> = sim.body().points().collect();
        let len = points.len();
        for i in 1..len {
            let p0 = points[i - 1] * scale;
            let p1 = points[i] * scale;
            let a = 1.0 - i as f64 / len as f64;
            let width = (thickness * (0.25 + a * 0.9)).max(0.8) * scale;
            let color = if i < HEAD_SEGMENTS { theme.head } else { theme.tail };
            self.frame
                .stroke_segment_additive(p0, p1, width / 2.0, color, glow_radius);
        }

        let head = sim.body().head() * scale;
        let r = (thickness * 2.2).max(12.0) * scale;
        let white = Srgb { r: 1.0, g: 1.0, b: 1.0 };
        self.frame
            .fill_radial_additive(head, r * 2.2, white, AURA_ALPHA, theme.head);
    }
}

/// Minimum-size fallback for canvas extents.
fn normalize_extent(extent: f64) -> f64 {
    if extent.is_finite() {
        extent.max(1.0)
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use abyss_trail_sim::FrameScheduler;

    const SEED: u32 = 0xA5_F00D;

    fn scene(width: f64, height: f64) -> (TrailSim, Renderer) {
        let sim = TrailSim::new(width, height, SEED);
        let renderer = Renderer::new(width, height, 1.0, SEED);
        (sim, renderer)
    }

    #[test]
    fn surfaces_are_derived_from_canvas_size() {
        let (_, r) = scene(100.0, 50.0);
        assert_eq!(r.frame().width(), 100);
        assert_eq!(r.frame().height(), 50);
        assert_eq!(r.water.width(), 60);
        assert_eq!(r.water.height(), 30);
    }

    #[test]
    fn dpr_scales_the_frame_but_not_the_water() {
        let mut r = Renderer::new(100.0, 50.0, 2.0, SEED);
        assert_eq!(r.frame().width(), 200);
        assert_eq!(r.frame().height(), 100);
        assert_eq!(r.water.width(), 60);
        // DPR is clamped to the supported range.
        r.resize(100.0, 50.0, 5.0);
        assert!((r.scale() - 2.0).abs() < f64::EPSILON);
        r.resize(100.0, 50.0, f64::NAN);
        assert!((r.scale() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn degenerate_canvas_still_renders_one_pixel() {
        let (sim, mut r) = (TrailSim::new(0.0, 0.0, SEED), Renderer::new(0.0, 0.0, 1.0, SEED));
        let frame = r.render(&sim, 0.0);
        assert_eq!(frame.width(), 1);
        assert_eq!(frame.height(), 1);
    }

    #[test]
    fn render_is_deterministic_for_equal_state_and_time() {
        let (mut sim, mut ra) = scene(96.0, 64.0);
        let mut rb = Renderer::new(96.0, 64.0, 1.0, SEED);
        let mut sched = FrameScheduler::new();
        sched.tick(&mut sim, 0.0);
        sched.tick(&mut sim, 100.0);
        let a = ra.render(&sim, 100.0).to_rgba8();
        let b = rb.render(&sim, 100.0).to_rgba8();
        assert_eq!(a, b);
    }

    #[test]
    fn render_does_not_mutate_simulation_state() {
        let (mut sim, mut r) = scene(96.0, 64.0);
        for _ in 0..30 {
            sim.step();
        }
        let head = sim.body().head();
        let vel = sim.body().velocity();
        let time = sim.sim_time_ms();
        r.render(&sim, 500.0);
        assert_eq!(sim.body().head(), head);
        assert_eq!(sim.body().velocity(), vel);
        assert!((sim.sim_time_ms() - time).abs() < f64::EPSILON);
    }

    #[test]
    fn water_background_animates_with_wall_clock() {
        let (sim, mut r) = scene(96.0, 64.0);
        let a = r.render(&sim, 0.0).to_rgba8();
        let b = r.render(&sim, 5_000.0).to_rgba8();
        assert_ne!(a, b, "water pass froze");
    }

    #[test]
    fn head_region_is_brighter_than_far_corner() {
        let (mut sim, mut r) = scene(128.0, 96.0);
        sim.set_target(0.5, 0.5);
        for _ in 0..20 {
            sim.step();
        }
        let frame = r.render(&sim, 0.0);
        let head = sim.body().head();
        let hp = frame.pixel(head.x.round() as usize, head.y.round() as usize);
        let corner = frame.pixel(2, 2);
        let brightness = |c: Srgb| c.r + c.g + c.b;
        assert!(
            brightness(hp) > brightness(corner) + 0.5,
            "head {:?} not brighter than corner {:?}",
            hp,
            corner
        );
    }

    #[test]
    fn theme_switch_changes_the_background() {
        let (mut sim, mut r) = scene(96.0, 64.0);
        let abyss = r.render(&sim, 0.0).to_rgba8();
        sim.advance_theme();
        let noctiluca = r.render(&sim, 0.0).to_rgba8();
        assert_ne!(abyss, noctiluca);
    }

    #[test]
    fn vignette_darkens_frame_corners() {
        let (sim, mut r) = scene(128.0, 96.0);
        let frame = r.render(&sim, 0.0);
        // Compare the corner against a mid-lower pixel away from the trail.
        let corner = frame.pixel(0, 0);
        let focus = frame.pixel(20, 62);
        let brightness = |c: Srgb| c.r + c.g + c.b;
        assert!(
            brightness(corner) < brightness(focus) + 0.3,
            "corner {:?} vs focus {:?}",
            corner,
            focus
        );
    }

    #[test]
    fn paused_sim_still_renders_frames() {
        let (mut sim, mut r) = scene(96.0, 64.0);
        sim.toggle_pause();
        let a = r.render(&sim, 0.0).to_rgba8();
        assert_eq!(a.len(), 96 * 64 * 4);
    }
}
