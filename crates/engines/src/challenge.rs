//! Challenges: a randomly chosen shape and direction rendered to a GIF with
//! a JSON metadata record alongside.
//!
//! The metadata holds the answer (shape and direction), so it is meant for
//! the verifying side only; the GIF is what a solver is shown.

use std::path::{Path, PathBuf};

use hidden_shape_core::{Direction, SequenceConfig, ShapeKind, SynthError, Xorshift64};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::animation::write_gif;
use crate::render_sequence;

/// Smallest auto-assigned challenge id.
const MIN_CHALLENGE_ID: u32 = 1000;
/// Number of distinct auto-assigned ids (1000..=9999).
const CHALLENGE_ID_RANGE: usize = 9000;

/// Record persisted next to a challenge GIF.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeMetadata {
    pub id: u32,
    pub shape: ShapeKind,
    pub direction: Direction,
    pub frames: usize,
    pub size: u32,
    pub filename: String,
}

/// Options shared by the challenge and variant writers.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Frame size, frame count, shape size, noise mode. Shape, direction and
    /// seed are overridden per challenge.
    pub base: SequenceConfig,
    /// Quilting parameters when `base.noise` is quilted.
    pub params: Value,
    pub delay_ms: u32,
}

/// Renders one challenge into `output_dir`: `challenge_<id>.gif` and
/// `challenge_<id>.json`.
///
/// Shape, direction, the sequence seed and (when `id` is `None`) the id in
/// `1000..=9999` are all drawn from `seed`.
pub fn generate_challenge(
    output_dir: &Path,
    id: Option<u32>,
    seed: u64,
    options: &RenderOptions,
) -> Result<ChallengeMetadata, SynthError> {
    let mut rng = Xorshift64::new(seed);
    let id = id.unwrap_or_else(|| MIN_CHALLENGE_ID + rng.next_usize(CHALLENGE_ID_RANGE) as u32);
    let shape = rng
        .choose(&ShapeKind::ALL)
        .copied()
        .unwrap_or_default();
    let direction = rng
        .choose(&Direction::ALL)
        .copied()
        .unwrap_or_default();

    let config = SequenceConfig {
        shape,
        direction,
        seed: Some(rng.next_u64()),
        ..options.base.clone()
    };
    let filename = format!("challenge_{id}.gif");
    let sequence = render_sequence(&config, &options.params)?;
    write_gif(&sequence, &output_dir.join(&filename), options.delay_ms)?;

    let metadata = ChallengeMetadata {
        id,
        shape,
        direction,
        frames: config.frame_count,
        size: config.shape_size,
        filename,
    };
    let json = serde_json::to_string_pretty(&metadata).map_err(|e| SynthError::Io(e.to_string()))?;
    std::fs::write(output_dir.join(format!("challenge_{id}.json")), json)
        .map_err(|e| SynthError::Io(e.to_string()))?;

    info!(
        id,
        shape = shape.name(),
        direction = direction.name(),
        "challenge generated"
    );
    Ok(metadata)
}

/// Renders every shape/direction combination into `output_dir` as
/// `test_<shape>_<direction>.gif`, all from the same `seed`.
///
/// Returns the written paths in shape-major order.
pub fn render_variants(
    output_dir: &Path,
    seed: u64,
    options: &RenderOptions,
) -> Result<Vec<PathBuf>, SynthError> {
    let mut written = Vec::with_capacity(ShapeKind::ALL.len() * Direction::ALL.len());
    for shape in ShapeKind::ALL {
        for direction in Direction::ALL {
            let config = SequenceConfig {
                shape,
                direction,
                seed: Some(seed),
                ..options.base.clone()
            };
            let path = output_dir.join(format!("test_{}_{}.gif", shape.name(), direction.name()));
            let sequence = render_sequence(&config, &options.params)?;
            write_gif(&sequence, &path, options.delay_ms)?;
            written.push(path);
        }
    }
    Ok(written)
}
