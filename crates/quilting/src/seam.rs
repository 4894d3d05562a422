//! Minimum-error boundary search through the overlap of two patches.
//!
//! The per-cell error is the squared RGB difference between the two
//! overlapping regions. A forward dynamic program accumulates the cheapest
//! cost of reaching each cell from the first step, moving at most one cell
//! sideways per step; backtracking from the cheapest end yields the seam.
//!
//! Costs are laid out "seam-major" in flat buffers: `steps` rows of `span`
//! entries, where a step is a row for a vertical seam and a column for a
//! horizontal one. Both orientations then share one DP.

use hidden_shape_core::{PixelGrid, Rgb, SynthError};

/// Direction the seam runs through the overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Top to bottom, one offset per row; used when patches sit side by side.
    Vertical,
    /// Left to right, one offset per column; used when patches are stacked.
    Horizontal,
}

/// A seam: one offset per step into the overlap's cross dimension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeamPath {
    orientation: Orientation,
    offsets: Vec<usize>,
    cost: u64,
}

impl SeamPath {
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Offsets in `[0, overlap width)` per row (vertical) or
    /// `[0, overlap height)` per column (horizontal).
    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Cumulative error along the seam.
    pub fn cost(&self) -> u64 {
        self.cost
    }
}

fn squared_error(a: Rgb, b: Rgb) -> u64 {
    a.iter()
        .zip(b.iter())
        .map(|(&ca, &cb)| {
            let d = u64::from(ca.abs_diff(cb));
            d * d
        })
        .sum()
}

/// Seam search with reusable cost and cumulative buffers.
///
/// Quilting a frame runs many seams of the same size; keeping one finder
/// around avoids reallocating the DP arrays for each of them.
#[derive(Debug, Default)]
pub struct SeamFinder {
    cost: Vec<u64>,
    cumulative: Vec<u64>,
}

impl SeamFinder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Finds the minimum-error seam between two equally sized overlap regions.
    ///
    /// Returns `SynthError::DimensionMismatch` if the regions differ in size
    /// and `SynthError::DegenerateSeam` if the seam would have fewer than two
    /// steps.
    pub fn find(
        &mut self,
        overlap_a: &PixelGrid,
        overlap_b: &PixelGrid,
        orientation: Orientation,
    ) -> Result<SeamPath, SynthError> {
        if !overlap_a.same_size(overlap_b) {
            return Err(SynthError::DimensionMismatch {
                lhs_w: overlap_a.width(),
                lhs_h: overlap_a.height(),
                rhs_w: overlap_b.width(),
                rhs_h: overlap_b.height(),
            });
        }
        let (w, h) = (overlap_a.width(), overlap_a.height());
        let (steps, span) = match orientation {
            Orientation::Vertical => (h, w),
            Orientation::Horizontal => (w, h),
        };
        if steps < 2 {
            return Err(SynthError::DegenerateSeam { length: steps });
        }

        self.cost.clear();
        self.cost.resize(steps * span, 0);
        let (a, b) = (overlap_a.data(), overlap_b.data());
        for y in 0..h {
            for x in 0..w {
                let i = y * w + x;
                let slot = match orientation {
                    Orientation::Vertical => y * span + x,
                    Orientation::Horizontal => x * span + y,
                };
                self.cost[slot] = squared_error(a[i], b[i]);
            }
        }
        self.trace(steps, span, orientation)
    }

    /// Finds the cheapest seam through a precomputed seam-major cost grid of
    /// `steps x span` entries.
    ///
    /// Returns `SynthError::DimensionMismatch` if `costs.len() != steps * span`
    /// and `SynthError::DegenerateSeam` if `steps < 2` or `span == 0`.
    pub fn find_in_costs(
        &mut self,
        costs: &[u64],
        steps: usize,
        span: usize,
        orientation: Orientation,
    ) -> Result<SeamPath, SynthError> {
        if steps < 2 || span == 0 {
            return Err(SynthError::DegenerateSeam { length: steps });
        }
        if steps.checked_mul(span) != Some(costs.len()) {
            return Err(SynthError::DimensionMismatch {
                lhs_w: span,
                lhs_h: steps,
                rhs_w: costs.len(),
                rhs_h: 1,
            });
        }
        self.cost.clear();
        self.cost.extend_from_slice(costs);
        self.trace(steps, span, orientation)
    }

    /// Runs the forward DP over `self.cost` and backtracks the seam.
    fn trace(
        &mut self,
        steps: usize,
        span: usize,
        orientation: Orientation,
    ) -> Result<SeamPath, SynthError> {
        let cost = &self.cost;
        let cum = &mut self.cumulative;
        cum.clear();
        cum.extend_from_slice(&cost[..span]);
        for s in 1..steps {
            let prev = (s - 1) * span;
            for j in 0..span {
                let lo = j.saturating_sub(1);
                let hi = (j + 1).min(span - 1);
                let best = cum[prev + lo..=prev + hi]
                    .iter()
                    .copied()
                    .min()
                    .unwrap_or(0);
                let here = cost[s * span + j] + best;
                cum.push(here);
            }
        }

        let last = &cum[(steps - 1) * span..];
        let (mut j, total) = last
            .iter()
            .copied()
            .enumerate()
            .fold((0, u64::MAX), |(bj, bc), (k, c)| if c < bc { (k, c) } else { (bj, bc) });

        let mut offsets = vec![0; steps];
        offsets[steps - 1] = j;
        for s in (0..steps - 1).rev() {
            let row = &cum[s * span..(s + 1) * span];
            // Straight continuation first, then the lower index, then the higher.
            let mut pick = j;
            if j > 0 && row[j - 1] < row[pick] {
                pick = j - 1;
            }
            if j + 1 < span && row[j + 1] < row[pick] {
                pick = j + 1;
            }
            j = pick;
            offsets[s] = j;
        }

        Ok(SeamPath {
            orientation,
            offsets,
            cost: total,
        })
    }
}

/// Finds the minimum-error seam between two overlap regions with a
/// one-off [`SeamFinder`].
pub fn find_seam(
    overlap_a: &PixelGrid,
    overlap_b: &PixelGrid,
    orientation: Orientation,
) -> Result<SeamPath, SynthError> {
    SeamFinder::new().find(overlap_a, overlap_b, orientation)
}
