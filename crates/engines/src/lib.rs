#![deny(unsafe_code)]
//! Noise source registry and output encoding for hidden-shape.
//!
//! This crate sits between `hidden-shape-core` (which defines the
//! `NoiseSource` trait and the sequence driver) and the concrete sources
//! (`hidden-shape-quilting`). The CLI depends on it for name-based source
//! construction and for writing PNG stills, GIF animations and challenge
//! metadata.

pub mod pixel;

#[cfg(feature = "png")]
pub mod snapshot;

#[cfg(feature = "gif")]
pub mod animation;

#[cfg(feature = "gif")]
pub mod challenge;

use hidden_shape_core::{
    generate, generate_still, FrameSequence, NoiseMode, NoiseSource, PixelGrid, SequenceConfig,
    SynthError, UniformNoise, Xorshift64,
};
use hidden_shape_quilting::{QuiltParams, QuiltedNoise};
use serde_json::{json, Value};

/// Enumeration of all available background noise sources.
///
/// Wraps each source and delegates `NoiseSource` methods.
/// Use [`NoiseKind::from_name`] for string-based construction (CLI).
#[derive(Debug)]
pub enum NoiseKind {
    /// Independent uniform RGB noise per pixel.
    Uniform(UniformNoise),
    /// Seam-stitched patches of a noise texture.
    Quilted(QuiltedNoise),
}

impl NoiseKind {
    /// Constructs a source for `mode`; `params` configures quilting and is
    /// ignored by uniform noise.
    ///
    /// Returns `SynthError::InvalidParam` if the quilting params are unusable.
    pub fn from_mode(mode: NoiseMode, params: &Value) -> Result<Self, SynthError> {
        match mode {
            NoiseMode::Uniform => Ok(NoiseKind::Uniform(UniformNoise)),
            NoiseMode::Quilted => Ok(NoiseKind::Quilted(QuiltedNoise::from_json(params)?)),
        }
    }

    /// Constructs a source by name.
    ///
    /// Returns `SynthError::UnknownNoiseSource` if the name is not recognized.
    pub fn from_name(name: &str, params: &Value) -> Result<Self, SynthError> {
        Self::from_mode(NoiseMode::from_name(name)?, params)
    }

    /// Returns a slice of all recognized source names.
    pub fn list_sources() -> &'static [&'static str] {
        NoiseMode::list_names()
    }

    /// Current parameter values as a JSON object.
    pub fn params(&self) -> Value {
        match self {
            NoiseKind::Uniform(_) => json!({}),
            NoiseKind::Quilted(q) => q.params().to_json(),
        }
    }

    /// Schema describing the parameters this source accepts.
    pub fn param_schema(&self) -> Value {
        match self {
            NoiseKind::Uniform(_) => json!({}),
            NoiseKind::Quilted(_) => QuiltParams::schema(),
        }
    }
}

impl NoiseSource for NoiseKind {
    fn generate(
        &mut self,
        width: usize,
        height: usize,
        rng: &mut Xorshift64,
    ) -> Result<PixelGrid, SynthError> {
        match self {
            NoiseKind::Uniform(s) => s.generate(width, height, rng),
            NoiseKind::Quilted(s) => s.generate(width, height, rng),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            NoiseKind::Uniform(s) => s.name(),
            NoiseKind::Quilted(s) => s.name(),
        }
    }
}

/// Generates the sequence described by `config` with the noise source its
/// `noise` field names.
pub fn render_sequence(
    config: &SequenceConfig,
    params: &Value,
) -> Result<FrameSequence, SynthError> {
    let mut source = NoiseKind::from_mode(config.noise, params)?;
    generate(config, &mut source)
}

/// Generates the single-frame variant of `config`.
pub fn render_still(config: &SequenceConfig, params: &Value) -> Result<PixelGrid, SynthError> {
    let mut source = NoiseKind::from_mode(config.noise, params)?;
    generate_still(config, &mut source)
}
