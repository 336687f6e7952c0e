//! Fixed-timestep clock, frame scheduler, and telemetry.
//!
//! The host calls [`FrameScheduler::tick`] once per displayed frame with the
//! current wall-clock time; the scheduler accumulates the elapsed delta and
//! runs zero or more fixed simulation steps, so the simulation rate stays at
//! 60 Hz whatever the display refresh rate is. Catch-up after a stall (tab
//! suspension, debugger) is capped and the excess discarded, bounding
//! worst-case per-frame work.

use crate::sim::{TrailSim, STEP_MS};
use serde::Serialize;

/// Upper bound on simulation steps executed in a single tick.
pub const MAX_CATCH_UP_STEPS: usize = 5;

/// Minimum elapsed time between frame-rate estimates, in milliseconds.
pub const FPS_WINDOW_MS: f64 = 500.0;

/// Accumulates wall-clock time into whole fixed steps.
///
/// The leftover is always in `[0, step)` after [`SimClock::advance`].
#[derive(Debug, Clone)]
pub struct SimClock {
    last_ms: Option<f64>,
    leftover_ms: f64,
    step_ms: f64,
}

impl SimClock {
    /// Creates a clock with the given fixed step size.
    pub fn new(step_ms: f64) -> Self {
        Self {
            last_ms: None,
            leftover_ms: 0.0,
            step_ms: step_ms.max(f64::MIN_POSITIVE),
        }
    }

    /// Fixed step size in milliseconds.
    pub fn step_ms(&self) -> f64 {
        self.step_ms
    }

    /// Leftover accumulated time in milliseconds.
    pub fn leftover_ms(&self) -> f64 {
        self.leftover_ms
    }

    /// Feeds the current wall-clock time and returns how many fixed steps
    /// are due.
    ///
    /// The first call establishes the baseline (zero elapsed); a clock that
    /// runs backwards contributes zero. When a stall accumulates more than
    /// [`MAX_CATCH_UP_STEPS`] steps, the surplus time is discarded rather
    /// than simulated.
    pub fn advance(&mut self, now_ms: f64) -> usize {
        if !now_ms.is_finite() {
            return 0;
        }
        let last = self.last_ms.unwrap_or(now_ms);
        self.last_ms = Some(now_ms);
        self.leftover_ms += (now_ms - last).max(0.0);

        let due = (self.leftover_ms / self.step_ms) as usize;
        if due > MAX_CATCH_UP_STEPS {
            self.leftover_ms = 0.0;
            return MAX_CATCH_UP_STEPS;
        }
        self.leftover_ms = (self.leftover_ms - due as f64 * self.step_ms).max(0.0);
        due
    }
}

/// Rolling frame-rate estimate over ~half-second windows.
#[derive(Debug, Clone)]
pub struct FpsCounter {
    frames: u32,
    window_start_ms: Option<f64>,
    fps: u32,
}

impl FpsCounter {
    /// Creates a counter; the estimate reads 60 until the first window
    /// completes.
    pub fn new() -> Self {
        Self {
            frames: 0,
            window_start_ms: None,
            fps: 60,
        }
    }

    /// Records one displayed frame and returns the current estimate.
    ///
    /// The estimate recomputes only when at least [`FPS_WINDOW_MS`] has
    /// elapsed since the window opened; the counter resets with each
    /// recomputation. The frame that opens a window belongs to the previous
    /// window, so it is not counted again.
    pub fn frame(&mut self, now_ms: f64) -> u32 {
        match self.window_start_ms {
            None => self.window_start_ms = Some(now_ms),
            Some(start) => {
                self.frames += 1;
                let elapsed = now_ms - start;
                if elapsed >= FPS_WINDOW_MS {
                    self.fps = (f64::from(self.frames) * 1000.0 / elapsed).round() as u32;
                    self.frames = 0;
                    self.window_start_ms = Some(now_ms);
                }
            }
        }
        self.fps
    }

    /// Latest frame-rate estimate.
    pub fn fps(&self) -> u32 {
        self.fps
    }
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}

/// Read-only scheduler/simulation snapshot for the host HUD.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Telemetry {
    /// Estimated display frame rate.
    pub fps: u32,
    /// Current trail history length.
    pub trail_len: usize,
    /// Active theme name.
    pub theme: &'static str,
}

/// Drives a [`TrailSim`] from host frame callbacks.
#[derive(Debug, Clone)]
pub struct FrameScheduler {
    clock: SimClock,
    fps: FpsCounter,
}

impl FrameScheduler {
    /// Creates a scheduler at the fixed 60 Hz simulation step.
    pub fn new() -> Self {
        Self::with_step(STEP_MS)
    }

    /// Creates a scheduler with a custom step size (tests, slow motion).
    pub fn with_step(step_ms: f64) -> Self {
        Self {
            clock: SimClock::new(step_ms),
            fps: FpsCounter::new(),
        }
    }

    /// Processes one displayed frame at wall-clock `now_ms`: runs the due
    /// fixed steps (skipped while the sim is paused — the accumulator still
    /// drains) and updates the frame-rate estimate. Returns the number of
    /// physics steps executed.
    pub fn tick(&mut self, sim: &mut TrailSim, now_ms: f64) -> usize {
        let due = self.clock.advance(now_ms);
        let mut executed = 0;
        if !sim.is_paused() {
            for _ in 0..due {
                sim.step();
                executed += 1;
            }
        }
        self.fps.frame(now_ms);
        executed
    }

    /// Latest frame-rate estimate.
    pub fn fps(&self) -> u32 {
        self.fps.fps()
    }

    /// Snapshot of the values the host HUD displays.
    pub fn telemetry(&self, sim: &TrailSim) -> Telemetry {
        Telemetry {
            fps: self.fps.fps(),
            trail_len: sim.body().len(),
            theme: sim.theme().name,
        }
    }
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: u32 = 0xA5_F00D;

    fn sim() -> TrailSim {
        TrailSim::new(800.0, 600.0, SEED)
    }

    // -- SimClock --

    #[test]
    fn first_advance_establishes_baseline_with_zero_steps() {
        let mut clock = SimClock::new(STEP_MS);
        assert_eq!(clock.advance(1234.5), 0);
        assert!(clock.leftover_ms().abs() < f64::EPSILON);
    }

    #[test]
    fn whole_steps_are_consumed_and_leftover_stays_below_step() {
        // Step of 10 ms keeps the arithmetic exact in binary.
        let mut clock = SimClock::new(10.0);
        clock.advance(0.0);
        assert_eq!(clock.advance(45.0), 4);
        assert!((clock.leftover_ms() - 5.0).abs() < 1e-9);
        assert_eq!(clock.advance(50.0), 1);
        assert!(clock.leftover_ms() >= 0.0 && clock.leftover_ms() < 10.0);
    }

    #[test]
    fn sub_step_deltas_accumulate() {
        let mut clock = SimClock::new(10.0);
        clock.advance(0.0);
        assert_eq!(clock.advance(6.0), 0);
        assert_eq!(clock.advance(12.0), 1);
    }

    #[test]
    fn long_stall_is_capped_and_excess_discarded() {
        let mut clock = SimClock::new(10.0);
        clock.advance(0.0);
        // 10 seconds of stall would be 1000 steps.
        assert_eq!(clock.advance(10_000.0), 5);
        assert!(clock.leftover_ms().abs() < f64::EPSILON);
        // Normal cadence resumes cleanly.
        assert_eq!(clock.advance(10_010.0), 1);
    }

    #[test]
    fn backwards_clock_contributes_nothing() {
        let mut clock = SimClock::new(10.0);
        clock.advance(1000.0);
        assert_eq!(clock.advance(500.0), 0);
        assert_eq!(clock.advance(400.0), 0);
        // Time resumes from the most recent timestamp.
        assert_eq!(clock.advance(410.0), 1);
    }

    #[test]
    fn non_finite_timestamp_is_ignored() {
        let mut clock = SimClock::new(STEP_MS);
        clock.advance(0.0);
        assert_eq!(clock.advance(f64::NAN), 0);
        assert_eq!(clock.advance(f64::INFINITY), 0);
        assert_eq!(clock.advance(STEP_MS), 1);
    }

    // -- FpsCounter --

    #[test]
    fn estimate_holds_initial_value_inside_first_window() {
        let mut fps = FpsCounter::new();
        for i in 0..29 {
            assert_eq!(fps.frame(i as f64 * 16.0), 60);
        }
    }

    #[test]
    fn estimate_recomputes_only_after_window_elapses() {
        let mut fps = FpsCounter::new();
        // 50 frames at 10 ms spacing: window closes at t=500.
        let mut last = 0;
        for i in 0..=50 {
            last = fps.frame(i as f64 * 10.0);
        }
        assert_eq!(last, 100, "100 fps cadence should read 100");
    }

    #[test]
    fn counter_resets_each_window() {
        let mut fps = FpsCounter::new();
        for i in 0..=50 {
            fps.frame(i as f64 * 10.0);
        }
        assert_eq!(fps.fps(), 100);
        // Next window at 30 fps cadence: 15 frames over 500 ms.
        let base = 500.0;
        let mut last = fps.fps();
        for i in 1..=15 {
            last = fps.frame(base + i as f64 * 33.4);
        }
        assert_eq!(last, 30, "second window must not inherit the first");
    }

    // -- FrameScheduler --

    #[test]
    fn tick_runs_due_steps_and_reports_count() {
        let mut s = sim();
        let mut sched = FrameScheduler::new();
        assert_eq!(sched.tick(&mut s, 0.0), 0);
        assert_eq!(sched.tick(&mut s, 40.0), 2);
        assert!(s.body().len() <= s.config().trail_len());
    }

    #[test]
    fn paused_sim_executes_zero_steps_for_any_number_of_ticks() {
        let mut s = sim();
        s.toggle_pause();
        let mut sched = FrameScheduler::new();
        sched.tick(&mut s, 0.0);
        let head_before = s.body().head();
        let time_before = s.sim_time_ms();
        let mut executed = 0;
        for i in 1..200 {
            executed += sched.tick(&mut s, i as f64 * 16.7);
        }
        assert_eq!(executed, 0);
        assert_eq!(s.body().head(), head_before);
        assert!((s.sim_time_ms() - time_before).abs() < f64::EPSILON);
    }

    #[test]
    fn resume_continues_deterministically_from_last_state() {
        // Reference: run 12 steps straight through.
        let mut reference = sim();
        let mut sched_a = FrameScheduler::new();
        sched_a.tick(&mut reference, 0.0);
        sched_a.tick(&mut reference, 12.0 * STEP_MS);
        sched_a.tick(&mut reference, 24.0 * STEP_MS);

        // Same wall-clock schedule with a paused gap in the middle.
        let mut paused = sim();
        let mut sched_b = FrameScheduler::new();
        sched_b.tick(&mut paused, 0.0);
        sched_b.tick(&mut paused, 12.0 * STEP_MS);
        paused.toggle_pause();
        sched_b.tick(&mut paused, 18.0 * STEP_MS);
        paused.toggle_pause();
        sched_b.tick(&mut paused, 24.0 * STEP_MS);

        // The paused run executed fewer steps; re-run the missing count and
        // the trajectories must agree bit for bit.
        let missing =
            ((reference.sim_time_ms() - paused.sim_time_ms()) / STEP_MS).round() as usize;
        for _ in 0..missing {
            paused.step();
        }
        assert_eq!(
            reference.body().head().x.to_bits(),
            paused.body().head().x.to_bits()
        );
        assert_eq!(
            reference.body().head().y.to_bits(),
            paused.body().head().y.to_bits()
        );
    }

    #[test]
    fn catch_up_is_bounded_per_tick() {
        let mut s = sim();
        let mut sched = FrameScheduler::new();
        sched.tick(&mut s, 0.0);
        let executed = sched.tick(&mut s, 60_000.0);
        assert_eq!(executed, 5);
    }

    #[test]
    fn telemetry_reflects_sim_state() {
        let mut s = sim();
        let mut sched = FrameScheduler::new();
        sched.tick(&mut s, 0.0);
        sched.tick(&mut s, 100.0);
        let t = sched.telemetry(&s);
        assert_eq!(t.fps, 60);
        assert_eq!(t.trail_len, s.body().len());
        assert_eq!(t.theme, "Abyss");
        s.advance_theme();
        assert_eq!(sched.telemetry(&s).theme, "Noctiluca");
    }

    #[test]
    fn telemetry_serializes_for_the_host() {
        let s = sim();
        let sched = FrameScheduler::new();
        let json = serde_json::to_value(sched.telemetry(&s)).unwrap();
        assert_eq!(json["fps"], 60);
        assert_eq!(json["trail_len"], 180);
        assert_eq!(json["theme"], "Abyss");
    }
}
