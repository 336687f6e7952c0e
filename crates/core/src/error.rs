//! Error types for the abyss-trail core.

use thiserror::Error;

/// Errors produced at construction and I/O boundaries.
///
/// The simulation loop itself has no recoverable errors — degenerate inputs
/// are clamped or epsilon-floored at the point of use. This enum covers the
/// places where a caller can genuinely hand us something unusable: color
/// strings, theme names, surface dimensions, snapshot writes.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Width or height was zero when creating a surface.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// A theme name was not one of the built-in themes.
    #[error("unknown theme: {0}")]
    UnknownTheme(String),

    /// An I/O failure while writing a frame snapshot.
    #[error("io error: {0}")]
    Io(String),
}
