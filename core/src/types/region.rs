use std::fmt;

/// Default side length, in pixels, of crop regions and output arrays
pub const DEFAULT_SIZE: usize = 1000;

/// Rectangular crop region in pixel coordinates
///
/// `left..right` indexes columns and `upper..lower` indexes rows, both
/// half-open. Bounds stay fractional, as read from the region table, until
/// the grid is sliced; they may also lie partly outside the image.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct Region {
    pub left: f64,
    pub right: f64,
    pub upper: f64,
    pub lower: f64,
}

impl Region {
    /// Creates a new Region
    pub fn new(left: f64, right: f64, upper: f64, lower: f64) -> Self {
        Self {
            left,
            right,
            upper,
            lower,
        }
    }

    /// Region width (`right - left`)
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Region height (`lower - upper`)
    pub fn height(&self) -> f64 {
        self.lower - self.upper
    }

    /// Moves the region so it fits inside a `rows` x `cols` image
    ///
    /// Rules are applied in order and later rules override earlier ones:
    ///
    /// 1. image shorter than `size`: span all rows
    /// 2. image narrower than `size`: span all columns
    /// 3. `left < 0`: `left = 0`, `right = size`
    /// 4. `upper < 0`: `upper = 0`, `lower = size`
    /// 5. `right > cols`: `right = cols`, `left = cols - size`
    /// 6. `lower > rows`: `lower = rows`, `upper = rows - size`
    ///
    /// Never fails. When a dimension is at least `size` the corrected region
    /// spans exactly `size` along it.
    pub fn corrected(self, rows: usize, cols: usize, size: usize) -> Region {
        let rows = rows as f64;
        let cols = cols as f64;
        let size = size as f64;
        let mut region = self;

        if rows < size {
            region.upper = 0.0;
            region.lower = rows;
        }
        if cols < size {
            region.left = 0.0;
            region.right = cols;
        }

        if region.left < 0.0 {
            region.left = 0.0;
            region.right = size;
        }
        if region.upper < 0.0 {
            region.upper = 0.0;
            region.lower = size;
        }

        if region.right > cols {
            region.right = cols;
            region.left = cols - size;
        }
        if region.lower > rows {
            region.lower = rows;
            region.upper = rows - size;
        }

        region
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}..{}, {}..{}]",
            self.upper, self.lower, self.left, self.right
        )
    }
}
