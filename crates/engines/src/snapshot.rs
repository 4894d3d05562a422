//! PNG encoding of a single [`PixelGrid`].
//!
//! Feature-gated behind `png` (default on).

use std::path::Path;

use hidden_shape_core::{PixelGrid, SynthError};
use tracing::info;

/// Writes a grid as an RGB PNG image.
///
/// Returns `SynthError::InvalidDimensions` if the grid dimensions overflow
/// `u32`, or `SynthError::Io` on write failure.
pub fn write_png(grid: &PixelGrid, path: &Path) -> Result<(), SynthError> {
    let w = u32::try_from(grid.width()).map_err(|_| SynthError::InvalidDimensions)?;
    let h = u32::try_from(grid.height()).map_err(|_| SynthError::InvalidDimensions)?;
    let img = image::RgbImage::from_raw(w, h, grid.as_bytes().to_vec())
        .ok_or_else(|| SynthError::Io("RGB buffer size mismatch".into()))?;
    img.save_with_format(path, image::ImageFormat::Png)
        .map_err(|e| SynthError::Io(e.to_string()))?;
    info!(path = %path.display(), width = w, height = h, "wrote png");
    Ok(())
}
