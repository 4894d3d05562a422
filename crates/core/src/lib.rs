#![deny(unsafe_code)]
//! Core types for the hidden-shape frame synthesis engine.
//!
//! A shape moving along a circular path is hidden in noise: each frame is
//! fresh noise except under the shape's mask, where pixels are carried over
//! from the previous frame. Provides `PixelGrid`, `Mask` construction,
//! the circular trajectory, the `NoiseSource` trait, the frame compositor,
//! the sequence driver, the `Xorshift64` PRNG and `SequenceConfig`.

pub mod compositor;
pub mod config;
pub mod error;
pub mod grid;
pub mod mask;
pub mod noise;
pub mod params;
pub mod prng;
pub mod sequence;
pub mod trajectory;

pub use compositor::next_frame;
pub use config::{NoiseMode, SequenceConfig};
pub use error::SynthError;
pub use grid::{PixelGrid, Rgb};
pub use mask::{build_mask, Mask, Position, ShapeKind, ShapeSpec};
pub use noise::{NoiseSource, UniformNoise};
pub use prng::Xorshift64;
pub use sequence::{generate, generate_still, FrameSequence};
pub use trajectory::{position_at, Direction};
