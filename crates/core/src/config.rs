//! Reproducible description of a hidden-shape sequence.
//!
//! A [`SequenceConfig`] captures everything needed to recreate a sequence:
//! frame size, shape, motion, frame count, noise mode and PRNG seed. Two
//! identical configs with a fixed seed produce bit-identical frames.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::error::SynthError;
use crate::grid::checked_area;
use crate::mask::{build_mask, Mask, Position, ShapeKind, ShapeSpec};
use crate::trajectory::{position_at, Direction};

/// Which strategy fills the freshly randomized part of each frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoiseMode {
    /// Independent uniform RGB noise per pixel.
    #[default]
    Uniform,
    /// Random patches of a noise texture stitched along minimum-error seams.
    Quilted,
}

const NOISE_MODE_NAMES: &[&str] = &["uniform", "quilted"];

impl NoiseMode {
    /// Parses `"uniform"` or `"quilted"`.
    ///
    /// Returns `SynthError::UnknownNoiseSource` for anything else.
    pub fn from_name(name: &str) -> Result<Self, SynthError> {
        match name {
            "uniform" => Ok(NoiseMode::Uniform),
            "quilted" => Ok(NoiseMode::Quilted),
            _ => Err(SynthError::UnknownNoiseSource(name.to_string())),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            NoiseMode::Uniform => "uniform",
            NoiseMode::Quilted => "quilted",
        }
    }

    pub fn list_names() -> &'static [&'static str] {
        NOISE_MODE_NAMES
    }

    /// Divisor applied to `min(width, height)` for the default path radius.
    fn path_divisor(self) -> usize {
        match self {
            NoiseMode::Uniform => 3,
            NoiseMode::Quilted => 4,
        }
    }
}

/// Parameters of one generated sequence.
///
/// Missing fields deserialize to the [`Default`] values, which match a
/// standard challenge: 640x480, a circle of radius 80 moving clockwise over
/// 60 frames of uniform noise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SequenceConfig {
    pub width: usize,
    pub height: usize,
    pub shape: ShapeKind,
    pub direction: Direction,
    /// Radius of the circular path; `None` derives it from the frame size.
    pub path_radius: Option<f64>,
    pub frame_count: usize,
    /// Radius for a circle, side length for a square.
    pub shape_size: u32,
    /// Fixed PRNG seed; `None` draws one from the clock at generation time.
    pub seed: Option<u64>,
    pub noise: NoiseMode,
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            shape: ShapeKind::Circle,
            direction: Direction::Clockwise,
            path_radius: None,
            frame_count: 60,
            shape_size: 80,
            seed: None,
            noise: NoiseMode::Uniform,
        }
    }
}

impl SequenceConfig {
    /// Validates non-zero dimensions without `width * height` overflow, a
    /// non-zero frame count and a finite path radius.
    pub fn validate(&self) -> Result<(), SynthError> {
        checked_area(self.width, self.height)?;
        if self.frame_count == 0 {
            return Err(SynthError::ZeroFrameCount);
        }
        if let Some(radius) = self.path_radius {
            if !radius.is_finite() {
                return Err(SynthError::InvalidParam {
                    name: "path_radius".into(),
                    reason: format!("must be finite, got {radius}"),
                });
            }
        }
        Ok(())
    }

    /// Center of the circular path: the middle of the frame.
    pub fn center(&self) -> Position {
        Position::new((self.width / 2) as i64, (self.height / 2) as i64)
    }

    /// The explicit path radius, or `min(width, height) / 3` for uniform
    /// noise and `/ 4` for quilted noise (integer division).
    pub fn resolved_path_radius(&self) -> f64 {
        self.path_radius.unwrap_or_else(|| {
            (self.width.min(self.height) / self.noise.path_divisor()) as f64
        })
    }

    pub fn shape_spec(&self) -> ShapeSpec {
        self.shape.with_size(self.shape_size)
    }

    /// The fixed seed, or one derived from the current time.
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(clock_seed)
    }

    /// Shape center for `frame_index`.
    pub fn position_at(&self, frame_index: usize) -> Result<Position, SynthError> {
        position_at(
            frame_index,
            self.frame_count,
            self.resolved_path_radius(),
            self.center(),
            self.direction,
        )
    }

    /// Shape mask for `frame_index`.
    pub fn mask_at(&self, frame_index: usize) -> Result<Mask, SynthError> {
        let center = self.position_at(frame_index)?;
        build_mask(self.width, self.height, self.shape_spec(), center)
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
