//! Error types for the hidden-shape core.

use thiserror::Error;

/// Errors produced by synthesis operations.
#[derive(Debug, Error)]
pub enum SynthError {
    /// Width or height was zero (or their product overflowed) when creating a grid.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// Two grids (pixels or mask) had incompatible dimensions.
    #[error("dimension mismatch: ({lhs_w}, {lhs_h}) vs ({rhs_w}, {rhs_h})")]
    DimensionMismatch {
        lhs_w: usize,
        lhs_h: usize,
        rhs_w: usize,
        rhs_h: usize,
    },

    /// A trajectory or sequence was requested with zero frames.
    #[error("frame count must be greater than zero")]
    ZeroFrameCount,

    /// A seam was requested over fewer than two steps or an empty span.
    #[error("degenerate seam: length {length} (need at least 2 steps and a non-empty span)")]
    DegenerateSeam { length: usize },

    /// A patch overlap was zero or larger than the patch extent.
    #[error("invalid overlap {overlap}: must be in 1..={limit}")]
    InvalidOverlap { overlap: usize, limit: usize },

    /// A shape name did not match any known shape kind.
    #[error("unknown shape: {0}")]
    UnknownShape(String),

    /// A direction name did not match any known motion direction.
    #[error("unknown direction: {0}")]
    UnknownDirection(String),

    /// A noise source name did not match any registered source.
    #[error("unknown noise source: {0}")]
    UnknownNoiseSource(String),

    /// A parameter value was present but unusable.
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParam { name: String, reason: String },

    /// Writing an encoded frame, animation or metadata file failed.
    #[error("io error: {0}")]
    Io(String),
}
