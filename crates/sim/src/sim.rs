//! Fixed-timestep trail simulation.
//!
//! [`TrailSim`] owns the configuration snapshot, the flow field, the trail
//! body, and the active theme — the explicit simulation context the frame
//! scheduler drives. One call to [`TrailSim::step`] advances exactly one
//! fixed step: steer toward the target, add the flow-field force, clamp
//! speed, damp, integrate, clamp to bounds, record the head sample.
//!
//! Simulation time advances only with executed steps, so a paused
//! simulation resumes bit-for-bit where it left off.

use crate::trail::TrailBody;
use abyss_trail_core::flow::{FlowField, FlowSource};
use abyss_trail_core::{Config, Theme};
use glam::DVec2;

/// Fixed simulation step in milliseconds (60 Hz).
pub const STEP_MS: f64 = 1000.0 / 60.0;

/// Steering acceleration toward the target, per step at speed 1.
const STEER_ACCEL: f64 = 0.24;
/// Gain applied to the flow-field force.
const FLOW_GAIN: f64 = 0.06;
/// Velocity cap at speed 1, in pixels per step.
const MAX_SPEED: f64 = 6.0;
/// Multiplicative velocity decay per step; the dissipative term that keeps
/// the steering loop from oscillating.
const DAMPING: f64 = 0.96;
/// Floor on the steering distance; a target on top of the head must not
/// divide by zero.
const DIST_EPS: f64 = 1e-6;
/// Simulation-time scale fed to the flow field.
const FLOW_TIME_SCALE: f64 = 3e-4;
/// Simulation-time scale driving the idle target orbit.
const ORBIT_TIME_SCALE: f64 = 2e-4;

/// Whether physics steps run or are skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    Paused,
}

/// How the target point is driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetMode {
    /// The target drifts along the idle orbit.
    Orbit,
    /// An external collaborator holds the target.
    Manual,
}

/// The simulation context: configuration, flow field, trail body, theme.
#[derive(Debug, Clone)]
pub struct TrailSim {
    config: Config,
    flow: FlowField,
    body: TrailBody,
    seed: u32,
    state: RunState,
    target_mode: TargetMode,
    theme_index: usize,
    width: f64,
    height: f64,
    sim_time_ms: f64,
}

impl TrailSim {
    /// Creates a simulation over a `width`×`height` pixel canvas.
    ///
    /// Degenerate dimensions are normalized up to 1×1. The trail body starts
    /// at the default target (canvas center) with its entire history seeded
    /// there.
    pub fn new(width: f64, height: f64, seed: u32) -> Self {
        let width = normalize_extent(width);
        let height = normalize_extent(height);
        let config = Config::default();
        let start = config.target() * DVec2::new(width, height);
        let body = TrailBody::new(start, config.trail_len());
        Self {
            config,
            flow: FlowField::new(seed),
            body,
            seed,
            state: RunState::Running,
            target_mode: TargetMode::Orbit,
            theme_index: 0,
            width,
            height,
            sim_time_ms: 0.0,
        }
    }

    /// Canvas width in pixels.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Canvas height in pixels.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Seed the flow field (and any renderer noise) was built from.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Accumulated simulation time in milliseconds.
    pub fn sim_time_ms(&self) -> f64 {
        self.sim_time_ms
    }

    /// Read access to the configuration snapshot.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Mutable access to the configuration. All setters clamp, so external
    /// collaborators may write freely between frames.
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    /// Read access to the trail body.
    pub fn body(&self) -> &TrailBody {
        &self.body
    }

    /// Current run state.
    pub fn run_state(&self) -> RunState {
        self.state
    }

    /// True while physics steps are skipped.
    pub fn is_paused(&self) -> bool {
        self.state == RunState::Paused
    }

    /// Toggles Running ↔ Paused and returns the new state. Takes effect at
    /// the next tick boundary; a step in flight is never interrupted.
    pub fn toggle_pause(&mut self) -> RunState {
        self.state = match self.state {
            RunState::Running => RunState::Paused,
            RunState::Paused => RunState::Running,
        };
        self.state
    }

    /// Current target mode.
    pub fn target_mode(&self) -> TargetMode {
        self.target_mode
    }

    /// Holds the target at normalized `(x, y)` and switches to manual
    /// targeting (components clamped to [0, 1]).
    pub fn set_target(&mut self, x: f64, y: f64) {
        self.config.set_target(x, y);
        self.target_mode = TargetMode::Manual;
    }

    /// Releases the manual target; the idle orbit takes over on the next
    /// step.
    pub fn release_target(&mut self) {
        self.target_mode = TargetMode::Orbit;
    }

    /// Adjusts the zoom factor by `delta`, clamped to the zoom range.
    pub fn adjust_zoom(&mut self, delta: f64) {
        self.config.adjust_zoom(delta);
    }

    /// Active theme.
    pub fn theme(&self) -> Theme {
        Theme::by_index(self.theme_index)
    }

    /// Cycles to the next theme (wrapping) and returns it.
    pub fn advance_theme(&mut self) -> Theme {
        self.theme_index = (self.theme_index + 1) % Theme::count();
        self.theme()
    }

    /// Makes `theme` the active theme. The switch is atomic: readers copy
    /// the theme out per frame and never observe a partial palette.
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme_index = theme.index();
    }

    /// Applies new canvas dimensions and re-seeds the trail body at the
    /// current target. Degenerate dimensions are normalized up to 1×1;
    /// history points are in absolute pixel space, so a reset (rather than
    /// rescaling) keeps the geometry coherent.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = normalize_extent(width);
        self.height = normalize_extent(height);
        let start = self.config.target() * DVec2::new(self.width, self.height);
        self.body.reset(start, self.config.trail_len());
    }

    /// Advances the simulation by exactly one fixed step.
    ///
    /// The scheduler skips this while paused; calling it directly always
    /// runs the physics.
    pub fn step(&mut self) {
        self.sim_time_ms += STEP_MS;

        if self.target_mode == TargetMode::Orbit {
            let t = self.sim_time_ms * ORBIT_TIME_SCALE;
            let x = 0.5 + (t * 1.2).cos() * 0.15 * (t * 0.73).sin();
            let y = 0.5 + (t * 0.9 + (t * 0.33).cos()).sin() * 0.12;
            self.config.set_target(x, y);
        }

        let desired = self.config.target() * DVec2::new(self.width, self.height);
        let head = self.body.head();
        let speed_mul = self.config.speed();

        let mut velocity = self.body.velocity() + steer(head, desired, speed_mul);

        let flow = self.flow.sample(
            head.x,
            head.y,
            self.sim_time_ms * FLOW_TIME_SCALE,
            self.config.water_quality(),
        );
        velocity += flow * (FLOW_GAIN * speed_mul);

        let speed = velocity.length();
        let max_speed = MAX_SPEED * speed_mul;
        if speed > max_speed {
            velocity = velocity / speed * max_speed;
        }
        velocity *= DAMPING;

        let position = (head + velocity * self.config.zoom())
            .clamp(DVec2::ZERO, DVec2::new(self.width, self.height));

        self.body.advance(position, velocity, self.config.trail_len());
    }
}

/// Steering acceleration: unit vector toward `desired` scaled by
/// `STEER_ACCEL`·speed. The distance carries an epsilon floor so a target
/// exactly on the head yields a finite (near-zero) vector.
fn steer(head: DVec2, desired: DVec2, speed_mul: f64) -> DVec2 {
    let to = desired - head;
    let dist = to.length() + DIST_EPS;
    to / dist * (STEER_ACCEL * speed_mul)
}

/// Minimum-size fallback for canvas extents; non-finite or sub-pixel sizes
/// become 1.
fn normalize_extent(extent: f64) -> f64 {
    if extent.is_finite() {
        extent.max(1.0)
    } else {
        1.0
    }
}
