#![deny(unsafe_code)]
//! Minimum-error-boundary texture quilting.
//!
//! Random patches cropped from a noise texture are laid on a grid with
//! overlapping borders. Neighbouring patches are joined along the seam of
//! least color difference through their overlap ([`seam`]), merged by
//! [`blend`]. [`QuiltedNoise`] packages this as a
//! [`NoiseSource`](hidden_shape_core::NoiseSource), an alternative to
//! per-pixel uniform noise for the background of each frame.

pub mod blend;
pub mod seam;

pub use blend::{blend, PatchBlender};
pub use seam::{find_seam, Orientation, SeamFinder, SeamPath};

use hidden_shape_core::params::param_usize;
use hidden_shape_core::{NoiseSource, PixelGrid, SynthError, UniformNoise, Xorshift64};
use serde_json::{json, Value};
use tracing::{debug, trace};

/// Default side length of a square patch.
const DEFAULT_PATCH_SIZE: usize = 58;
/// Default source texture side, in patches.
const DEFAULT_SOURCE_SCALE: usize = 10;

/// Quilting parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuiltParams {
    /// Side of each square patch, in pixels.
    pub patch_size: usize,
    /// Pixels shared by neighbouring patches.
    pub overlap: usize,
    /// Source texture side as a multiple of `patch_size`.
    pub source_scale: usize,
}

impl Default for QuiltParams {
    fn default() -> Self {
        Self {
            patch_size: DEFAULT_PATCH_SIZE,
            overlap: DEFAULT_PATCH_SIZE / 6,
            source_scale: DEFAULT_SOURCE_SCALE,
        }
    }
}

impl QuiltParams {
    /// Extracts parameters from a JSON object, falling back to defaults.
    ///
    /// A missing `overlap` defaults to `patch_size / 6` of the resolved patch size.
    pub fn from_json(params: &Value) -> Self {
        let patch_size = param_usize(params, "patch_size", DEFAULT_PATCH_SIZE);
        Self {
            patch_size,
            overlap: param_usize(params, "overlap", patch_size / 6),
            source_scale: param_usize(params, "source_scale", DEFAULT_SOURCE_SCALE),
        }
    }

    /// Checks `patch_size >= 2`, `1 <= overlap < patch_size` and
    /// `source_scale >= 1`.
    pub fn validate(&self) -> Result<(), SynthError> {
        if self.patch_size < 2 {
            return Err(invalid("patch_size", "must be at least 2"));
        }
        if self.overlap == 0 || self.overlap >= self.patch_size {
            return Err(invalid("overlap", "must be in 1..patch_size"));
        }
        if self.source_scale == 0 {
            return Err(invalid("source_scale", "must be at least 1"));
        }
        self.patch_size
            .checked_mul(self.source_scale)
            .ok_or_else(|| invalid("source_scale", "texture side overflows"))?;
        Ok(())
    }

    /// Current values as a JSON object.
    pub fn to_json(&self) -> Value {
        json!({
            "patch_size": self.patch_size,
            "overlap": self.overlap,
            "source_scale": self.source_scale,
        })
    }

    /// Schema describing the parameters, their ranges and defaults.
    pub fn schema() -> Value {
        json!({
            "patch_size": {
                "type": "integer",
                "default": DEFAULT_PATCH_SIZE,
                "min": 2,
                "description": "Side of each square patch in pixels"
            },
            "overlap": {
                "type": "integer",
                "default": DEFAULT_PATCH_SIZE / 6,
                "min": 1,
                "description": "Pixels shared by neighbouring patches (defaults to patch_size / 6)"
            },
            "source_scale": {
                "type": "integer",
                "default": DEFAULT_SOURCE_SCALE,
                "min": 1,
                "description": "Source texture side as a multiple of patch_size"
            }
        })
    }

    /// Number of patches needed to cover `extent` pixels.
    fn tiles_for(&self, extent: usize) -> usize {
        let step = self.patch_size - self.overlap;
        if extent <= self.patch_size {
            1
        } else {
            1 + (extent - self.patch_size).div_ceil(step)
        }
    }
}

fn invalid(name: &str, reason: &str) -> SynthError {
    SynthError::InvalidParam {
        name: name.to_string(),
        reason: reason.to_string(),
    }
}

/// Noise source that quilts random patches of a retained noise texture.
///
/// The texture is drawn from the caller's PRNG on first use and kept for the
/// lifetime of the source; each call then samples fresh patch positions.
#[derive(Debug)]
pub struct QuiltedNoise {
    params: QuiltParams,
    texture: Option<PixelGrid>,
    blender: PatchBlender,
}

impl QuiltedNoise {
    /// Creates a quilting source.
    ///
    /// Returns `SynthError::InvalidParam` if `params` fail validation.
    pub fn new(params: QuiltParams) -> Result<Self, SynthError> {
        params.validate()?;
        Ok(Self {
            params,
            texture: None,
            blender: PatchBlender::new(),
        })
    }

    /// Creates a quilting source from a JSON params object.
    pub fn from_json(params: &Value) -> Result<Self, SynthError> {
        Self::new(QuiltParams::from_json(params))
    }

    pub fn params(&self) -> QuiltParams {
        self.params
    }

    /// The source texture, once the first grid has been generated.
    pub fn texture(&self) -> Option<&PixelGrid> {
        self.texture.as_ref()
    }

    fn build_texture(&self, rng: &mut Xorshift64) -> Result<PixelGrid, SynthError> {
        let side = self.params.patch_size * self.params.source_scale;
        debug!(side, "building quilting source texture");
        UniformNoise.generate(side, side, rng)
    }
}

/// Crops a random `patch_size` square out of `texture`.
fn random_patch(
    texture: &PixelGrid,
    patch_size: usize,
    rng: &mut Xorshift64,
) -> Result<PixelGrid, SynthError> {
    let x = rng.next_usize(texture.width() - patch_size + 1);
    let y = rng.next_usize(texture.height() - patch_size + 1);
    texture.crop(x, y, patch_size, patch_size)
}

fn quilt(
    blender: &mut PatchBlender,
    texture: &PixelGrid,
    params: &QuiltParams,
    width: usize,
    height: usize,
    rng: &mut Xorshift64,
) -> Result<PixelGrid, SynthError> {
    let (cols, rows) = (params.tiles_for(width), params.tiles_for(height));
    let p = params.patch_size;

    let mut canvas: Option<PixelGrid> = None;
    for _ in 0..rows {
        let mut strip = random_patch(texture, p, rng)?;
        for _ in 1..cols {
            let patch = random_patch(texture, p, rng)?;
            strip = blender.blend(&strip, &patch, params.overlap, Orientation::Vertical)?;
        }
        canvas = Some(match canvas {
            None => strip,
            Some(above) => blender.blend(&above, &strip, params.overlap, Orientation::Horizontal)?,
        });
    }
    trace!(cols, rows, "quilted patch grid");
    match canvas {
        Some(c) => c.crop(0, 0, width, height),
        None => Err(SynthError::InvalidDimensions),
    }
}

impl NoiseSource for QuiltedNoise {
    fn generate(
        &mut self,
        width: usize,
        height: usize,
        rng: &mut Xorshift64,
    ) -> Result<PixelGrid, SynthError> {
        if width == 0 || height == 0 {
            return Err(SynthError::InvalidDimensions);
        }
        let texture = match self.texture.take() {
            Some(t) => t,
            None => self.build_texture(rng)?,
        };
        let result = quilt(&mut self.blender, &texture, &self.params, width, height, rng);
        self.texture = Some(texture);
        result
    }

    fn name(&self) -> &'static str {
        "quilted"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn small_params() -> QuiltParams {
        QuiltParams {
            patch_size: 8,
            overlap: 2,
            source_scale: 4,
        }
    }

    #[test]
    fn default_params_follow_patch_size() {
        let p = QuiltParams::default();
        assert_eq!(p.patch_size, 58);
        assert_eq!(p.overlap, 9);
        assert_eq!(p.source_scale, 10);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn from_json_uses_defaults_for_empty_json() {
        assert_eq!(QuiltParams::from_json(&json!({})), QuiltParams::default());
    }

    #[test]
    fn from_json_derives_overlap_from_custom_patch_size() {
        let p = QuiltParams::from_json(&json!({"patch_size": 24}));
        assert_eq!(p.patch_size, 24);
        assert_eq!(p.overlap, 4);
        let p = QuiltParams::from_json(&json!({"patch_size": 24, "overlap": 6, "source_scale": 3}));
        assert_eq!((p.overlap, p.source_scale), (6, 3));
    }

    #[test]
    fn to_json_reflects_values() {
        let v = small_params().to_json();
        assert_eq!(v["patch_size"], 8);
        assert_eq!(v["overlap"], 2);
        assert_eq!(v["source_scale"], 4);
    }

    #[test]
    fn schema_lists_all_parameters() {
        let schema = QuiltParams::schema();
        for key in ["patch_size", "overlap", "source_scale"] {
            assert_eq!(schema[key]["type"], "integer", "missing {key}");
        }
    }

    #[test]
    fn invalid_params_are_rejected() {
        let cases = [
            QuiltParams {
                patch_size: 1,
                ..small_params()
            },
            QuiltParams {
                overlap: 0,
                ..small_params()
            },
            QuiltParams {
                overlap: 8,
                ..small_params()
            },
            QuiltParams {
                source_scale: 0,
                ..small_params()
            },
            QuiltParams {
                patch_size: usize::MAX,
                overlap: 1,
                source_scale: 2,
            },
        ];
        for params in cases {
            assert!(
                matches!(QuiltedNoise::new(params), Err(SynthError::InvalidParam { .. })),
                "{params:?} accepted"
            );
        }
    }

    #[test]
    fn tiles_cover_requested_extent() {
        let p = small_params();
        assert_eq!(p.tiles_for(1), 1);
        assert_eq!(p.tiles_for(8), 1);
        assert_eq!(p.tiles_for(9), 2);
        assert_eq!(p.tiles_for(14), 2);
        assert_eq!(p.tiles_for(15), 3);
    }

    #[test]
    fn output_has_requested_dimensions() {
        let mut source = QuiltedNoise::new(small_params()).unwrap();
        let mut rng = Xorshift64::new(42);
        for (w, h) in [(1, 1), (8, 8), (9, 3), (37, 21)] {
            let grid = source.generate(w, h, &mut rng).unwrap();
            assert_eq!((grid.width(), grid.height()), (w, h));
        }
    }

    #[test]
    fn texture_is_built_once_and_retained() {
        let mut source = QuiltedNoise::new(small_params()).unwrap();
        assert!(source.texture().is_none());
        let mut rng = Xorshift64::new(1);
        source.generate(20, 20, &mut rng).unwrap();
        let first = source.texture().cloned().unwrap();
        assert_eq!(first.width(), 32);
        source.generate(20, 20, &mut rng).unwrap();
        assert_eq!(source.texture(), Some(&first));
    }

    #[test]
    fn every_pixel_comes_from_the_texture() {
        let mut source = QuiltedNoise::new(small_params()).unwrap();
        let mut rng = Xorshift64::new(8);
        let grid = source.generate(30, 17, &mut rng).unwrap();
        let palette: HashSet<_> = source.texture().unwrap().data().iter().copied().collect();
        assert!(grid.data().iter().all(|px| palette.contains(px)));
    }

    #[test]
    fn same_seed_reproduces_quilt() {
        let run = |seed| {
            let mut source = QuiltedNoise::new(small_params()).unwrap();
            source.generate(25, 25, &mut Xorshift64::new(seed)).unwrap()
        };
        assert_eq!(run(3), run(3));
        assert_ne!(run(3), run(4));
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        let mut source = QuiltedNoise::new(small_params()).unwrap();
        assert!(matches!(
            source.generate(0, 5, &mut Xorshift64::new(1)),
            Err(SynthError::InvalidDimensions)
        ));
    }

    #[test]
    fn quilted_source_drives_a_coherent_sequence() {
        use hidden_shape_core::{generate, NoiseMode, SequenceConfig};

        let config = SequenceConfig {
            width: 40,
            height: 30,
            shape_size: 5,
            frame_count: 5,
            seed: Some(17),
            noise: NoiseMode::Quilted,
            ..SequenceConfig::default()
        };
        let mut source = QuiltedNoise::new(small_params()).unwrap();
        let seq = generate(&config, &mut source).unwrap();
        assert_eq!(seq.len(), 5);
        for t in 1..5 {
            let mask = config.mask_at(t).unwrap();
            for (x, y) in mask.occupied() {
                assert_eq!(seq.frames()[t].get(x, y), seq.frames()[t - 1].get(x, y));
            }
        }
    }
}
