//! Pure-computation pixel buffer conversion from [`PixelGrid`].
//!
//! Always available (no feature gate) so both the PNG and GIF paths share it.

use hidden_shape_core::PixelGrid;

/// Expands an RGB grid to an RGBA8 buffer with opaque alpha.
///
/// The buffer length is `width * height * 4`.
pub fn grid_to_rgba(grid: &PixelGrid) -> Vec<u8> {
    grid.data()
        .iter()
        .flat_map(|&[r, g, b]| [r, g, b, 255u8])
        .collect()
}
