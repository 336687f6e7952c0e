//! PNG snapshots of a rendered [`Surface`].
//!
//! Feature-gated behind `png` (default on) so embedders that only upload
//! RGBA buffers can depend on this crate without pulling in the `image`
//! crate.

use crate::surface::Surface;
use abyss_trail_core::EngineError;
use std::path::Path;

/// Writes a surface as a PNG image.
///
/// Returns `EngineError::InvalidDimensions` if the surface dimensions
/// overflow `u32`, or `EngineError::Io` on write failure.
pub fn write_png(surface: &Surface, path: &Path) -> Result<(), EngineError> {
    let rgba = surface.to_rgba8();
    let w = u32::try_from(surface.width()).map_err(|_| EngineError::InvalidDimensions)?;
    let h = u32::try_from(surface.height()).map_err(|_| EngineError::InvalidDimensions)?;
    let img = image::RgbaImage::from_raw(w, h, rgba)
        .ok_or_else(|| EngineError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| EngineError::Io(e.to_string()))
}
