//! Temporally coherent frame compositing.
//!
//! Each frame is fresh noise everywhere except under the current mask, where
//! the pixels are carried over from the previous frame. A viewer sees a
//! "quiet" region moving through "loud" surroundings; any single frame is
//! indistinguishable from plain noise.
//!
//! The carried region is keyed to the *current* mask but sourced from the
//! *whole* previous frame. When the shape moves, its new footprint picks up
//! whatever the previous frame held there (noise or shape), which leaves a
//! continuously updating trail along the path instead of a frozen patch.
//! Re-masking at the previous position would change what is perceived.

use crate::error::SynthError;
use crate::grid::PixelGrid;
use crate::mask::Mask;
use crate::noise::NoiseSource;
use crate::prng::Xorshift64;

fn mismatch(lhs: (usize, usize), rhs: (usize, usize)) -> SynthError {
    SynthError::DimensionMismatch {
        lhs_w: lhs.0,
        lhs_h: lhs.1,
        rhs_w: rhs.0,
        rhs_h: rhs.1,
    }
}

/// Produces the next frame of a sequence.
///
/// Draws a fresh `width x height` grid from `source`; if `previous` is
/// present, every cell occupied in `mask` is overwritten with the matching
/// cell of `previous`. With no previous frame the fresh grid is returned
/// unchanged (frame 0).
///
/// Returns `SynthError::DimensionMismatch` if the mask, the previous frame
/// or the generated grid differ from `width x height`. All checks run before
/// any noise is drawn.
pub fn next_frame(
    width: usize,
    height: usize,
    mask: &Mask,
    previous: Option<&PixelGrid>,
    source: &mut dyn NoiseSource,
    rng: &mut Xorshift64,
) -> Result<PixelGrid, SynthError> {
    if mask.width() != width || mask.height() != height {
        return Err(mismatch((width, height), (mask.width(), mask.height())));
    }
    if let Some(prev) = previous {
        if prev.width() != width || prev.height() != height {
            return Err(mismatch((width, height), (prev.width(), prev.height())));
        }
    }

    let mut frame = source.generate(width, height, rng)?;
    if frame.width() != width || frame.height() != height {
        return Err(mismatch((width, height), (frame.width(), frame.height())));
    }

    if let Some(prev) = previous {
        frame
            .data_mut()
            .iter_mut()
            .zip(prev.data())
            .zip(mask.cells())
            .filter(|&(_, &occupied)| occupied)
            .for_each(|((px, &carried), _)| *px = carried);
    }
    Ok(frame)
}
