//! The `NoiseSource` trait: producers of the freshly randomized part of a frame.
//!
//! The trait is object-safe so the compositor and the sequence driver can
//! work with `&mut dyn NoiseSource` and stay agnostic to whether the
//! background is direct per-pixel noise or a quilted texture.

use crate::error::SynthError;
use crate::grid::PixelGrid;
use crate::prng::Xorshift64;

/// A producer of independent random pixel grids.
///
/// Implementations draw all randomness from the supplied `rng`, so the same
/// seed yields the same grids. A source may cache data between calls (a
/// quilting source keeps its texture) but two calls must still produce
/// statistically independent grids.
pub trait NoiseSource {
    /// Produces a fresh `width x height` grid.
    ///
    /// Returns `SynthError::InvalidDimensions` if either dimension is zero.
    fn generate(
        &mut self,
        width: usize,
        height: usize,
        rng: &mut Xorshift64,
    ) -> Result<PixelGrid, SynthError>;

    /// Registry name of this source.
    fn name(&self) -> &'static str;
}

/// Uniform RGB noise: every channel of every pixel independent and uniform over `0..=255`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformNoise;

impl NoiseSource for UniformNoise {
    fn generate(
        &mut self,
        width: usize,
        height: usize,
        rng: &mut Xorshift64,
    ) -> Result<PixelGrid, SynthError> {
        let mut grid = PixelGrid::new(width, height)?;
        grid.data_mut()
            .iter_mut()
            .for_each(|px| *px = rng.next_rgb());
        Ok(grid)
    }

    fn name(&self) -> &'static str {
        "uniform"
    }
}
