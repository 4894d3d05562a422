//! Merging two patches along a minimum-error seam.
//!
//! Patches placed side by side (vertical seam) share `overlap` columns;
//! stacked patches (horizontal seam) share `overlap` rows. Inside the shared
//! strip, each row (or column) takes patch A up to the seam offset and patch
//! B from the offset on; outside it the patches are kept whole.

use hidden_shape_core::{PixelGrid, SynthError};
use tracing::trace;

use crate::seam::{Orientation, SeamFinder};

/// Patch blender that reuses one [`SeamFinder`] across calls.
#[derive(Debug, Default)]
pub struct PatchBlender {
    finder: SeamFinder,
}

impl PatchBlender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Blends `b` onto the right of (vertical) or below (horizontal) `a`.
    ///
    /// The result is `a.width + b.width - overlap` wide for a vertical seam,
    /// `a.height + b.height - overlap` tall for a horizontal one; the other
    /// dimension is unchanged.
    ///
    /// Returns `SynthError::DimensionMismatch` if the patches disagree in the
    /// dimension the seam runs along, `SynthError::InvalidOverlap` if
    /// `overlap` is zero or exceeds either patch, and
    /// `SynthError::DegenerateSeam` if the seam would be shorter than two.
    pub fn blend(
        &mut self,
        a: &PixelGrid,
        b: &PixelGrid,
        overlap: usize,
        orientation: Orientation,
    ) -> Result<PixelGrid, SynthError> {
        match orientation {
            Orientation::Vertical => self.blend_side_by_side(a, b, overlap),
            Orientation::Horizontal => self.blend_stacked(a, b, overlap),
        }
    }

    fn blend_side_by_side(
        &mut self,
        a: &PixelGrid,
        b: &PixelGrid,
        overlap: usize,
    ) -> Result<PixelGrid, SynthError> {
        if a.height() != b.height() {
            return Err(mismatch(a, b));
        }
        let limit = a.width().min(b.width());
        if overlap == 0 || overlap > limit {
            return Err(SynthError::InvalidOverlap { overlap, limit });
        }
        let h = a.height();
        let keep_a = a.width() - overlap;
        let strip_a = a.crop(keep_a, 0, overlap, h)?;
        let strip_b = b.crop(0, 0, overlap, h)?;
        let seam = self.finder.find(&strip_a, &strip_b, Orientation::Vertical)?;
        trace!(cost = seam.cost(), overlap, "vertical seam");

        let width = a.width() + b.width() - overlap;
        let mut data = Vec::with_capacity(width * h);
        for (y, &cut) in seam.offsets().iter().enumerate() {
            data.extend_from_slice(&a.row(y)[..keep_a + cut]);
            data.extend_from_slice(&b.row(y)[cut..]);
        }
        PixelGrid::from_data(width, h, data)
    }

    fn blend_stacked(
        &mut self,
        a: &PixelGrid,
        b: &PixelGrid,
        overlap: usize,
    ) -> Result<PixelGrid, SynthError> {
        if a.width() != b.width() {
            return Err(mismatch(a, b));
        }
        let limit = a.height().min(b.height());
        if overlap == 0 || overlap > limit {
            return Err(SynthError::InvalidOverlap { overlap, limit });
        }
        let w = a.width();
        let keep_a = a.height() - overlap;
        let strip_a = a.crop(0, keep_a, w, overlap)?;
        let strip_b = b.crop(0, 0, w, overlap)?;
        let seam = self.finder.find(&strip_a, &strip_b, Orientation::Horizontal)?;
        trace!(cost = seam.cost(), overlap, "horizontal seam");

        let height = a.height() + b.height() - overlap;
        let mut out = PixelGrid::new(w, height)?;
        for (x, &cut) in seam.offsets().iter().enumerate() {
            for y in 0..keep_a + cut {
                out.set(x, y, a.get(x, y));
            }
            for y in cut..b.height() {
                out.set(x, keep_a + y, b.get(x, y));
            }
        }
        Ok(out)
    }
}

fn mismatch(a: &PixelGrid, b: &PixelGrid) -> SynthError {
    SynthError::DimensionMismatch {
        lhs_w: a.width(),
        lhs_h: a.height(),
        rhs_w: b.width(),
        rhs_h: b.height(),
    }
}

/// Blends two patches with a one-off [`PatchBlender`].
pub fn blend(
    a: &PixelGrid,
    b: &PixelGrid,
    overlap: usize,
    orientation: Orientation,
) -> Result<PixelGrid, SynthError> {
    PatchBlender::new().blend(a, b, overlap, orientation)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: [u8; 3] = [255, 0, 0];
    const BLUE: [u8; 3] = [0, 0, 255];

    #[test]
    fn flat_patches_cut_at_start_of_overlap() {
        // Uniform error puts the seam at offset 0, so B owns the whole overlap.
        let a = PixelGrid::filled(5, 3, RED).unwrap();
        let b = PixelGrid::filled(4, 3, BLUE).unwrap();
        let out = blend(&a, &b, 2, Orientation::Vertical).unwrap();
        assert_eq!((out.width(), out.height()), (7, 3));
        for y in 0..3 {
            for x in 0..7 {
                let expected = if x < 3 { RED } else { BLUE };
                assert_eq!(out.get(x, y), expected, "({x}, {y})");
            }
        }
    }

    #[test]
    fn vertical_blend_switches_at_seam() {
        // Overlap strips agree in their middle column, so the seam runs there.
        let mut a = PixelGrid::filled(4, 4, RED).unwrap();
        let mut b = PixelGrid::filled(4, 4, BLUE).unwrap();
        for y in 0..4 {
            a.set(2, y, [9, 9, 9]);
            b.set(1, y, [9, 9, 9]);
        }
        // Overlap 3: a columns 1..4, b columns 0..3; both have grey at strip index 1.
        let out = blend(&a, &b, 3, Orientation::Vertical).unwrap();
        assert_eq!(out.width(), 5);
        for y in 0..4 {
            assert_eq!(out.row(y), &[RED, RED, [9, 9, 9], BLUE, BLUE]);
        }
    }

    #[test]
    fn horizontal_blend_switches_at_seam() {
        let mut a = PixelGrid::filled(3, 4, RED).unwrap();
        let mut b = PixelGrid::filled(3, 3, BLUE).unwrap();
        for x in 0..3 {
            a.set(x, 3, [9, 9, 9]);
            b.set(x, 1, [9, 9, 9]);
        }
        // Overlap 2: a rows 2..4, b rows 0..2; agree at strip index 1.
        let out = blend(&a, &b, 2, Orientation::Horizontal).unwrap();
        assert_eq!((out.width(), out.height()), (3, 5));
        for x in 0..3 {
            let column: Vec<_> = (0..5).map(|y| out.get(x, y)).collect();
            assert_eq!(column, vec![RED, RED, RED, [9, 9, 9], BLUE]);
        }
    }

    #[test]
    fn full_overlap_is_allowed() {
        let a = PixelGrid::filled(3, 3, RED).unwrap();
        let b = PixelGrid::filled(3, 3, BLUE).unwrap();
        let out = blend(&a, &b, 3, Orientation::Vertical).unwrap();
        assert_eq!(out.width(), 3);
    }

    #[test]
    fn overlap_larger_than_patch_is_rejected() {
        let a = PixelGrid::filled(3, 3, RED).unwrap();
        let b = PixelGrid::filled(5, 3, BLUE).unwrap();
        assert!(matches!(
            blend(&a, &b, 4, Orientation::Vertical),
            Err(SynthError::InvalidOverlap { overlap: 4, limit: 3 })
        ));
        assert!(matches!(
            blend(&a, &a, 4, Orientation::Horizontal),
            Err(SynthError::InvalidOverlap { overlap: 4, limit: 3 })
        ));
    }

    #[test]
    fn zero_overlap_is_rejected() {
        let a = PixelGrid::filled(3, 3, RED).unwrap();
        assert!(matches!(
            blend(&a, &a, 0, Orientation::Vertical),
            Err(SynthError::InvalidOverlap { overlap: 0, .. })
        ));
    }

    #[test]
    fn mismatched_cross_dimension_is_rejected() {
        let a = PixelGrid::filled(3, 3, RED).unwrap();
        let b = PixelGrid::filled(3, 4, BLUE).unwrap();
        assert!(matches!(
            blend(&a, &b, 1, Orientation::Vertical),
            Err(SynthError::DimensionMismatch { .. })
        ));
        let c = PixelGrid::filled(4, 3, BLUE).unwrap();
        assert!(matches!(
            blend(&a, &c, 1, Orientation::Horizontal),
            Err(SynthError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn single_row_patches_cannot_be_seamed() {
        let a = PixelGrid::filled(4, 1, RED).unwrap();
        assert!(matches!(
            blend(&a, &a, 2, Orientation::Vertical),
            Err(SynthError::DegenerateSeam { .. })
        ));
    }

    mod proptests {
        use super::*;
        use hidden_shape_core::{NoiseSource, UniformNoise, Xorshift64};
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn vertical_blend_dimension_law(
                seed: u64,
                h in 2_usize..12,
                wa in 1_usize..12,
                wb in 1_usize..12,
                ov_frac in 0.0_f64..1.0,
            ) {
                let overlap = 1 + (ov_frac * (wa.min(wb) - 1) as f64) as usize;
                let mut rng = Xorshift64::new(seed);
                let a = UniformNoise.generate(wa, h, &mut rng).unwrap();
                let b = UniformNoise.generate(wb, h, &mut rng).unwrap();
                let out = blend(&a, &b, overlap, Orientation::Vertical).unwrap();
                prop_assert_eq!(out.width(), wa + wb - overlap);
                prop_assert_eq!(out.height(), h);
                // Outside the overlap the patches survive untouched.
                for y in 0..h {
                    prop_assert_eq!(&out.row(y)[..wa - overlap], &a.row(y)[..wa - overlap]);
                    prop_assert_eq!(&out.row(y)[wa..], &b.row(y)[overlap..]);
                }
            }

            #[test]
            fn horizontal_blend_dimension_law(
                seed: u64,
                w in 2_usize..12,
                ha in 1_usize..12,
                hb in 1_usize..12,
                ov_frac in 0.0_f64..1.0,
            ) {
                let overlap = 1 + (ov_frac * (ha.min(hb) - 1) as f64) as usize;
                let mut rng = Xorshift64::new(seed);
                let a = UniformNoise.generate(w, ha, &mut rng).unwrap();
                let b = UniformNoise.generate(w, hb, &mut rng).unwrap();
                let out = blend(&a, &b, overlap, Orientation::Horizontal).unwrap();
                prop_assert_eq!(out.height(), ha + hb - overlap);
                prop_assert_eq!(out.width(), w);
                for y in 0..ha - overlap {
                    prop_assert_eq!(out.row(y), a.row(y));
                }
                for y in overlap..hb {
                    prop_assert_eq!(out.row(ha - overlap + y), b.row(y));
                }
            }
        }
    }
}
