#![deny(unsafe_code)]
//! Core types for the abyss-trail procedural animation engine.
//!
//! Provides the deterministic noise stack (`Mulberry32` PRNG, `ValueNoise`
//! permutation-table noise, `FlowField`), the color and theme model
//! (`Srgb`, `Theme`), the clamped `Config` record, and `EngineError`.

pub mod color;
pub mod config;
pub mod error;
pub mod flow;
pub mod noise;
pub mod params;
pub mod prng;
pub mod theme;

pub use color::Srgb;
pub use config::Config;
pub use error::EngineError;
pub use flow::{FlowField, FlowSource};
pub use noise::ValueNoise;
pub use prng::Mulberry32;
pub use theme::Theme;
