//! Shape masks: boolean occupancy grids for a disc or an axis-aligned square.
//!
//! A shape that extends past the frame border is clipped; a shape entirely
//! outside the frame yields an empty mask. Neither case is an error.

use serde::{Deserialize, Serialize};

use crate::error::SynthError;
use crate::grid::checked_area;

/// Integer pixel coordinate of a shape center. May lie outside the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub x: i64,
    pub y: i64,
}

impl Position {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// The kind of hidden shape, without its size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    #[default]
    Circle,
    Square,
}

const SHAPE_NAMES: &[&str] = &["circle", "square"];

impl ShapeKind {
    /// All shape kinds, in the order of [`ShapeKind::list_names`].
    pub const ALL: [ShapeKind; 2] = [ShapeKind::Circle, ShapeKind::Square];

    /// Parses a shape name (`"circle"` or `"square"`).
    ///
    /// Returns `SynthError::UnknownShape` for anything else.
    pub fn from_name(name: &str) -> Result<Self, SynthError> {
        match name {
            "circle" => Ok(ShapeKind::Circle),
            "square" => Ok(ShapeKind::Square),
            _ => Err(SynthError::UnknownShape(name.to_string())),
        }
    }

    /// Lowercase name of this shape kind.
    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Circle => "circle",
            ShapeKind::Square => "square",
        }
    }

    /// Returns a slice of all recognized shape names.
    pub fn list_names() -> &'static [&'static str] {
        SHAPE_NAMES
    }

    /// Pairs this kind with a size: radius for a circle, side length for a square.
    pub fn with_size(self, size: u32) -> ShapeSpec {
        match self {
            ShapeKind::Circle => ShapeSpec::Circle { radius: size },
            ShapeKind::Square => ShapeSpec::Square { side: size },
        }
    }
}

/// A fully sized shape. Together with a center and frame size it determines a [`Mask`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShapeSpec {
    Circle { radius: u32 },
    Square { side: u32 },
}

impl ShapeSpec {
    pub fn kind(&self) -> ShapeKind {
        match self {
            ShapeSpec::Circle { .. } => ShapeKind::Circle,
            ShapeSpec::Square { .. } => ShapeKind::Square,
        }
    }
}

/// A `height x width` boolean occupancy grid in row-major layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl Mask {
    /// Creates an all-unoccupied mask.
    pub fn empty(width: usize, height: usize) -> Result<Self, SynthError> {
        let len = checked_area(width, height)?;
        Ok(Self {
            width,
            height,
            cells: vec![false; len],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Row-major occupancy flags.
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    /// Whether `(x, y)` is occupied. Coordinates outside the mask are unoccupied.
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.cells[y * self.width + x]
    }

    /// Number of occupied cells.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Iterates over occupied cells as `(x, y)` in row-major order.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c)
            .map(|(i, _)| (i % self.width, i / self.width))
    }

    /// Marks every cell of the half-open rectangle `[x0, x1) x [y0, y1)`,
    /// already clamped to the mask bounds.
    fn fill_rect(&mut self, x0: usize, x1: usize, y0: usize, y1: usize) {
        for y in y0..y1 {
            let row = y * self.width;
            self.cells[row + x0..row + x1].fill(true);
        }
    }
}

/// Clamps a signed half-open interval `[lo, hi)` to `[0, limit)`.
///
/// Returns an empty range (start == end) when the interval misses entirely.
fn clamp_span(lo: i64, hi: i64, limit: usize) -> (usize, usize) {
    let limit = limit as i64;
    let start = lo.clamp(0, limit);
    let end = hi.clamp(0, limit);
    if end <= start {
        (0, 0)
    } else {
        (start as usize, end as usize)
    }
}

/// Builds the occupancy mask of `shape` centered at `center` in a
/// `width x height` frame.
///
/// - Circle: `(x, y)` is occupied iff its Euclidean distance to `center`
///   is at most `radius` (boundary inclusive).
/// - Square: occupied region is `[cx - s/2, cx + s/2) x [cy - s/2, cy + s/2)`
///   with floor half-size, clamped to the frame.
///
/// Returns `SynthError::InvalidDimensions` for an empty frame.
pub fn build_mask(
    width: usize,
    height: usize,
    shape: ShapeSpec,
    center: Position,
) -> Result<Mask, SynthError> {
    let mut mask = Mask::empty(width, height)?;
    match shape {
        ShapeSpec::Circle { radius } => {
            let r = i64::from(radius);
            // Squared distances reach 2^64 near a u32::MAX radius.
            let r_sq = i128::from(r) * i128::from(r);
            // Only the bounding box can contain occupied cells.
            let (x0, x1) = clamp_span(
                center.x.saturating_sub(r),
                center.x.saturating_add(r).saturating_add(1),
                width,
            );
            let (y0, y1) = clamp_span(
                center.y.saturating_sub(r),
                center.y.saturating_add(r).saturating_add(1),
                height,
            );
            for y in y0..y1 {
                let dy = y as i128 - i128::from(center.y);
                for x in x0..x1 {
                    let dx = x as i128 - i128::from(center.x);
                    // Integer comparison is exact: sqrt(d) <= r  <=>  d <= r^2.
                    if dx * dx + dy * dy <= r_sq {
                        mask.cells[y * width + x] = true;
                    }
                }
            }
        }
        ShapeSpec::Square { side } => {
            let half = i64::from(side / 2);
            let (x0, x1) = clamp_span(
                center.x.saturating_sub(half),
                center.x.saturating_add(half),
                width,
            );
            let (y0, y1) = clamp_span(
                center.y.saturating_sub(half),
                center.y.saturating_add(half),
                height,
            );
            mask.fill_rect(x0, x1, y0, y1);
        }
    }
    Ok(mask)
}
