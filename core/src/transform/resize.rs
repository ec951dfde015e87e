use crate::error::{HipfxError, Result};
use image::imageops::{self, FilterType};
use image::GrayImage;
use log::debug;
use ndarray::{s, Array2};
use ndarray_stats::QuantileExt;

/// Filter used when resampling to the output size
pub const RESAMPLE_FILTER: FilterType = FilterType::Lanczos3;

/// Makes a grid square and resamples it to `size` x `size`
///
/// The longer dimension is center-cropped to the shorter one. If the square
/// side differs from `size`, the grid goes through an 8-bit image scaled to
/// its maximum, is resampled with an antialiasing filter and scaled back to
/// the original range. The 8-bit step is lossy.
///
/// # Errors
///
/// Returns [`HipfxError::EmptyImage`] when the grid has no rows or columns.
pub fn resize(pixels: Array2<f64>, size: usize) -> Result<Array2<f64>> {
    let (rows, cols) = pixels.dim();
    if rows == 0 || cols == 0 || size == 0 {
        return Err(HipfxError::EmptyImage { rows, cols });
    }

    let square = center_square(pixels);
    let side = square.nrows();
    if side == size {
        return Ok(square);
    }

    debug!("Resampling {}x{} -> {}x{}", side, side, size, size);
    let max = *square.max_skipnan();
    if !max.is_finite() || max <= 0.0 {
        return Ok(Array2::zeros((size, size)));
    }

    let bytes: Vec<u8> = square.iter().map(|&v| (v / max * 255.0) as u8).collect();
    let image = GrayImage::from_raw(side as u32, side as u32, bytes).ok_or(
        HipfxError::EmptyImage {
            rows: side,
            cols: side,
        },
    )?;
    let resized = imageops::resize(&image, size as u32, size as u32, RESAMPLE_FILTER);

    let resampled = Array2::from_shape_vec((size, size), resized.into_raw())?;
    Ok(resampled.mapv(|v| v as f64 / 255.0 * max))
}

/// Symmetric center crop of the longer dimension
fn center_square(pixels: Array2<f64>) -> Array2<f64> {
    let (rows, cols) = pixels.dim();
    if rows < cols {
        let start = (cols - rows) / 2;
        pixels.slice(s![.., start..start + rows]).to_owned()
    } else if cols < rows {
        let start = (rows - cols) / 2;
        pixels.slice(s![start..start + cols, ..]).to_owned()
    } else {
        pixels
    }
}
