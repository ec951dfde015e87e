use crate::types::Region;
use log::debug;
use ndarray::{s, Array2, Axis};

/// Crops a pixel grid to a region, correcting the region first
///
/// The region is passed through [`Region::corrected`] for the grid's
/// dimensions. Coordinates still outside the grid after correction are
/// clamped when slicing, so an unusable region yields an empty grid rather
/// than a panic.
pub fn crop(pixels: Array2<f64>, region: Region, size: usize) -> Array2<f64> {
    let (rows, cols) = pixels.dim();
    let corrected = region.corrected(rows, cols, size);
    if corrected != region {
        debug!("Corrected region {} -> {}", region, corrected);
    }

    let (upper, lower) = clamp_span(corrected.upper, corrected.lower, rows);
    let (left, right) = clamp_span(corrected.left, corrected.right, cols);
    pixels.slice(s![upper..lower, left..right]).to_owned()
}

/// Rotates a grid a quarter turn counter-clockwise
///
/// The first row of the result is the last column of the input.
pub fn rotate90(pixels: Array2<f64>) -> Array2<f64> {
    let mut rotated = pixels.reversed_axes();
    rotated.invert_axis(Axis(0));
    rotated.as_standard_layout().into_owned()
}

/// Mirrors a grid horizontally (reverses the column order of every row)
pub fn flip_horizontal(pixels: Array2<f64>) -> Array2<f64> {
    let mut flipped = pixels;
    flipped.invert_axis(Axis(1));
    flipped.as_standard_layout().into_owned()
}

/// Truncates fractional bounds toward zero and clamps them into `0..=len`
fn clamp_span(start: f64, end: f64, len: usize) -> (usize, usize) {
    let len = len as i64;
    let start = (start.trunc() as i64).clamp(0, len);
    let end = (end.trunc() as i64).clamp(start, len);
    (start as usize, end as usize)
}
