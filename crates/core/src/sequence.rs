//! Sequence driver: runs trajectory, mask and compositor frame by frame.
//!
//! The previous frame is threaded through a fold over frame indices rather
//! than held in shared state, so independent sequences can be generated
//! concurrently without interference.

use tracing::{debug, info};

use crate::compositor::next_frame;
use crate::config::SequenceConfig;
use crate::error::SynthError;
use crate::grid::PixelGrid;
use crate::mask::Position;
use crate::noise::NoiseSource;
use crate::prng::Xorshift64;

/// An ordered list of frames; index is presentation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameSequence {
    width: usize,
    height: usize,
    seed: u64,
    frames: Vec<PixelGrid>,
    positions: Vec<Position>,
}

impl FrameSequence {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// The seed the sequence was generated from. Feeding it back through
    /// [`SequenceConfig::seed`] reproduces the same frames.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn frames(&self) -> &[PixelGrid] {
        &self.frames
    }

    /// Shape center used for each frame.
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Consumes the sequence, returning the frames.
    pub fn into_frames(self) -> Vec<PixelGrid> {
        self.frames
    }
}

/// Generates every frame of `config`, drawing background noise from `source`.
///
/// Frame 0 is pure noise; each later frame copies the cells under its own
/// mask from the frame before it. No frame is dropped or reordered.
///
/// Returns the config's validation error (zero size or zero frame count)
/// before any frame is produced.
pub fn generate(
    config: &SequenceConfig,
    source: &mut dyn NoiseSource,
) -> Result<FrameSequence, SynthError> {
    config.validate()?;
    let seed = config.resolve_seed();
    let mut rng = Xorshift64::new(seed);

    let capacity = config.frame_count;
    let (frames, positions) = (0..config.frame_count).try_fold(
        (Vec::with_capacity(capacity), Vec::with_capacity(capacity)),
        |(mut frames, mut positions), index| {
            let position = config.position_at(index)?;
            let mask = config.mask_at(index)?;
            let frame = next_frame(
                config.width,
                config.height,
                &mask,
                frames.last(),
                &mut *source,
                &mut rng,
            )?;
            debug!(
                index,
                x = position.x,
                y = position.y,
                carried = mask.occupied_count(),
                "frame composited"
            );
            frames.push(frame);
            positions.push(position);
            Ok::<_, SynthError>((frames, positions))
        },
    )?;

    info!(
        frames = frames.len(),
        width = config.width,
        height = config.height,
        shape = config.shape.name(),
        direction = config.direction.name(),
        noise = source.name(),
        seed,
        "sequence generated"
    );

    Ok(FrameSequence {
        width: config.width,
        height: config.height,
        seed,
        frames,
        positions,
    })
}

/// Generates the single-frame variant: frame 0 of `config`, composited with
/// no previous frame.
pub fn generate_still(
    config: &SequenceConfig,
    source: &mut dyn NoiseSource,
) -> Result<PixelGrid, SynthError> {
    config.validate()?;
    let mut rng = Xorshift64::new(config.resolve_seed());
    let mask = config.mask_at(0)?;
    next_frame(config.width, config.height, &mask, None, source, &mut rng)
}
