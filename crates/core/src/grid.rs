//! Two-dimensional RGB pixel grid.
//!
//! A [`PixelGrid`] stores `width * height` RGB triples in row-major order.
//! Unlike a toroidal simulation field, coordinates are plain `usize` and
//! out-of-range access is a caller error.

use crate::error::SynthError;

/// One 8-bit RGB pixel. No alpha.
pub type Rgb = [u8; 3];

/// A `height x width` grid of RGB pixels in row-major layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: usize,
    height: usize,
    data: Vec<Rgb>,
}

/// Checks that dimensions are non-zero and returns `width * height`.
pub(crate) fn checked_area(width: usize, height: usize) -> Result<usize, SynthError> {
    if width == 0 || height == 0 {
        return Err(SynthError::InvalidDimensions);
    }
    width
        .checked_mul(height)
        .ok_or(SynthError::InvalidDimensions)
}

impl PixelGrid {
    /// Creates a black grid of the given dimensions.
    ///
    /// Returns `SynthError::InvalidDimensions` if either dimension is zero
    /// or if `width * height` overflows `usize`.
    pub fn new(width: usize, height: usize) -> Result<Self, SynthError> {
        let len = checked_area(width, height)?;
        Ok(Self {
            width,
            height,
            data: vec![[0; 3]; len],
        })
    }

    /// Creates a grid filled with a single color.
    pub fn filled(width: usize, height: usize, color: Rgb) -> Result<Self, SynthError> {
        let len = checked_area(width, height)?;
        Ok(Self {
            width,
            height,
            data: vec![color; len],
        })
    }

    /// Creates a grid from a row-major pixel vector.
    ///
    /// Returns `SynthError::DimensionMismatch` if `data.len() != width * height`.
    pub fn from_data(width: usize, height: usize, data: Vec<Rgb>) -> Result<Self, SynthError> {
        let expected = checked_area(width, height)?;
        if data.len() != expected {
            return Err(SynthError::DimensionMismatch {
                lhs_w: width,
                lhs_h: height,
                rhs_w: data.len(),
                rhs_h: 1,
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Grid width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Read-only access to the row-major pixels.
    pub fn data(&self) -> &[Rgb] {
        &self.data
    }

    /// Mutable access to the row-major pixels.
    pub fn data_mut(&mut self) -> &mut [Rgb] {
        &mut self.data
    }

    /// The pixels as a flat `R, G, B, R, G, B, ...` byte slice of length
    /// `width * height * 3`.
    pub fn as_bytes(&self) -> &[u8] {
        self.data.as_flattened()
    }

    /// Pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the grid.
    pub fn get(&self, x: usize, y: usize) -> Rgb {
        assert!(x < self.width && y < self.height, "({x}, {y}) out of bounds");
        self.data[y * self.width + x]
    }

    /// Sets the pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the grid.
    pub fn set(&mut self, x: usize, y: usize, color: Rgb) {
        assert!(x < self.width && y < self.height, "({x}, {y}) out of bounds");
        self.data[y * self.width + x] = color;
    }

    /// One row of pixels.
    pub fn row(&self, y: usize) -> &[Rgb] {
        &self.data[y * self.width..(y + 1) * self.width]
    }

    /// Returns `true` if both grids have the same width and height.
    pub fn same_size(&self, other: &PixelGrid) -> bool {
        self.width == other.width && self.height == other.height
    }

    /// Copies the `width x height` region whose top-left corner is `(x, y)`.
    ///
    /// Returns `SynthError::InvalidDimensions` for an empty region and
    /// `SynthError::DimensionMismatch` if the region does not fit inside the grid.
    pub fn crop(
        &self,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    ) -> Result<PixelGrid, SynthError> {
        checked_area(width, height)?;
        let fits = x.checked_add(width).is_some_and(|r| r <= self.width)
            && y.checked_add(height).is_some_and(|b| b <= self.height);
        if !fits {
            return Err(SynthError::DimensionMismatch {
                lhs_w: self.width,
                lhs_h: self.height,
                rhs_w: x.saturating_add(width),
                rhs_h: y.saturating_add(height),
            });
        }
        let data = (y..y + height)
            .flat_map(|row| self.row(row)[x..x + width].iter().copied())
            .collect();
        Ok(PixelGrid {
            width,
            height,
            data,
        })
    }

    /// Iterates over all pixels yielding `(x, y, rgb)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Rgb)> + '_ {
        self.data
            .iter()
            .enumerate()
            .map(|(i, &px)| (i % self.width, i / self.width, px))
    }
}
