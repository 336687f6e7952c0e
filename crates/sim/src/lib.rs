#![deny(unsafe_code)]
//! Simulation layer for the abyss-trail engine.
//!
//! Provides the [`TrailBody`] (head + bounded position history), the
//! [`TrailSim`] fixed-timestep state machine, and the [`FrameScheduler`]
//! that decouples simulation rate from display rate and reports
//! [`Telemetry`].

pub mod clock;
pub mod sim;
pub mod trail;

pub use clock::{FpsCounter, FrameScheduler, SimClock, Telemetry};
pub use sim::{RunState, TargetMode, TrailSim, STEP_MS};
pub use trail::TrailBody;
