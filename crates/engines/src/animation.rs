//! Animated GIF encoding of a [`FrameSequence`].
//!
//! Feature-gated behind `gif` (default on). GIF is palette-based, so each
//! frame is quantized on write; the frame order and count are preserved and
//! the animation loops forever.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use hidden_shape_core::{FrameSequence, SynthError};
use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, RgbaImage};
use tracing::info;

use crate::pixel::grid_to_rgba;

/// Default delay between frames: 50 ms, i.e. 20 frames per second.
pub const DEFAULT_FRAME_DELAY_MS: u32 = 50;

/// Quantizer speed passed to the GIF encoder (1 = best quality, 30 = fastest).
/// Noise frames have no structure worth a slow palette search.
const QUANTIZER_SPEED: i32 = 30;

fn io(e: impl ToString) -> SynthError {
    SynthError::Io(e.to_string())
}

/// Writes every frame of `sequence` to an infinitely looping GIF at `path`,
/// showing each frame for `delay_ms` milliseconds.
///
/// Returns `SynthError::InvalidDimensions` if the frame dimensions overflow
/// `u32`, or `SynthError::Io` on encode or write failure.
pub fn write_gif(sequence: &FrameSequence, path: &Path, delay_ms: u32) -> Result<(), SynthError> {
    let w = u32::try_from(sequence.width()).map_err(|_| SynthError::InvalidDimensions)?;
    let h = u32::try_from(sequence.height()).map_err(|_| SynthError::InvalidDimensions)?;
    let delay = Delay::from_numer_denom_ms(delay_ms, 1);

    let file = File::create(path).map_err(io)?;
    let mut encoder = GifEncoder::new_with_speed(BufWriter::new(file), QUANTIZER_SPEED);
    encoder.set_repeat(Repeat::Infinite).map_err(io)?;
    for grid in sequence.frames() {
        let rgba = RgbaImage::from_raw(w, h, grid_to_rgba(grid))
            .ok_or_else(|| io("RGBA buffer size mismatch"))?;
        encoder
            .encode_frame(Frame::from_parts(rgba, 0, 0, delay))
            .map_err(io)?;
    }
    info!(
        path = %path.display(),
        frames = sequence.len(),
        delay_ms,
        "wrote gif"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hidden_shape_core::{generate, SequenceConfig, UniformNoise};
    use image::codecs::gif::GifDecoder;
    use image::AnimationDecoder;
    use std::io::BufReader;

    fn small_sequence(frames: usize) -> FrameSequence {
        let config = SequenceConfig {
            width: 20,
            height: 16,
            frame_count: frames,
            shape_size: 4,
            seed: Some(3),
            ..SequenceConfig::default()
        };
        generate(&config, &mut UniformNoise).unwrap()
    }

    #[test]
    fn write_gif_preserves_frame_count_size_and_delay() {
        let seq = small_sequence(6);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("anim.gif");

        write_gif(&seq, &path, DEFAULT_FRAME_DELAY_MS).unwrap();

        let reader = BufReader::new(File::open(&path).unwrap());
        let frames = GifDecoder::new(reader)
            .unwrap()
            .into_frames()
            .collect_frames()
            .unwrap();
        assert_eq!(frames.len(), 6);
        for frame in &frames {
            assert_eq!(frame.buffer().dimensions(), (20, 16));
            let (num, den) = frame.delay().numer_denom_ms();
            assert_eq!(num / den, 50);
        }
    }

    #[test]
    fn write_gif_into_missing_directory_is_io_error() {
        let seq = small_sequence(2);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope").join("anim.gif");
        assert!(matches!(
            write_gif(&seq, &path, 50),
            Err(SynthError::Io(_))
        ));
    }
}
