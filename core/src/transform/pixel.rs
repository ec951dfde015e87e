//! Windowing and normalization of stored pixel values
//!
//! [`PixelTransform::apply`] turns raw stored samples into display-ready
//! values:
//!
//! 1. invert MONOCHROME1 data
//! 2. pick a clip window (declared for log images, otherwise estimated from
//!    the 0.5th/99.5th percentiles)
//! 3. clip, and for log images take the natural log
//! 4. normalize into [0, 1], optionally scaled to 8 bits

use crate::api::ImagingMetadata;
use crate::types::Window;
use log::debug;
use ndarray::Array2;
use ndarray_stats::QuantileExt;

/// Lower percentile used to estimate a window
pub const LOW_PERCENTILE: f64 = 0.5;

/// Upper percentile used to estimate a window
pub const HIGH_PERCENTILE: f64 = 99.5;

/// Pixel grid after normalization
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizedImage {
    /// Values in [0, 1]
    Float(Array2<f64>),
    /// Values in [0, 255]
    Integer(Array2<u8>),
}

impl NormalizedImage {
    /// Shape as (rows, columns)
    pub fn dim(&self) -> (usize, usize) {
        match self {
            NormalizedImage::Float(a) => a.dim(),
            NormalizedImage::Integer(a) => a.dim(),
        }
    }

    /// Returns the 8-bit grid, converting float data if needed
    pub fn to_u8(&self) -> Array2<u8> {
        match self {
            NormalizedImage::Float(a) => a.mapv(to_byte),
            NormalizedImage::Integer(a) => a.clone(),
        }
    }
}

/// Result of [`PixelTransform::apply`]
#[derive(Debug, Clone, PartialEq)]
pub struct TransformOutput {
    /// Normalized pixels
    pub image: NormalizedImage,

    /// Window the pixels were clipped to
    pub window: Window,

    /// Whether the logarithmic path was taken
    pub used_log_path: bool,
}

/// Windowing, log correction and normalization of a radiograph
pub struct PixelTransform;

impl PixelTransform {
    /// Applies the full transform to an owned pixel grid
    ///
    /// The window is only taken from the file for log images that declare
    /// both WindowCenter and WindowWidth. Every other image is windowed on
    /// its own percentiles, even when it declares a window.
    pub fn apply(
        pixels: Array2<f64>,
        metadata: &ImagingMetadata,
        to_integer: bool,
    ) -> TransformOutput {
        let mut pixels = pixels;

        if metadata.is_inverted() {
            pixels.mapv_inplace(|v| metadata.invert_sample(v));
        }

        let use_log = metadata.pixel_intensity_relationship.is_log();
        let window = match (use_log, metadata.declared_window()) {
            (true, Some(window)) => window,
            _ => estimate_window(&pixels),
        };
        debug!("Clip window {} (log: {})", window, use_log);

        pixels.mapv_inplace(|v| window.clip(v));

        if use_log {
            pixels.mapv_inplace(|v| v.max(1.0).ln());
        }

        let pixels = normalize(pixels);
        let image = if to_integer {
            NormalizedImage::Integer(pixels.mapv(to_byte))
        } else {
            NormalizedImage::Float(pixels)
        };

        TransformOutput {
            image,
            window,
            used_log_path: use_log,
        }
    }
}

/// Estimates a clip window from the 0.5th and 99.5th percentiles
pub fn estimate_window(pixels: &Array2<f64>) -> Window {
    let mut sorted: Vec<f64> = pixels.iter().copied().collect();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let median = percentile(&sorted, 50.0);
    let low = percentile(&sorted, LOW_PERCENTILE);
    let high = percentile(&sorted, HIGH_PERCENTILE);
    debug!("Estimated window: low={}, median={}, high={}", low, median, high);

    Window::estimated(low, high)
}

/// Percentile of sorted values with linear interpolation between ranks
///
/// Returns NaN for an empty slice.
pub fn percentile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let position = (q / 100.0).clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}

/// Min-max normalization into [0, 1]
///
/// A flat grid (max == min) normalizes to all zeros.
pub fn normalize(pixels: Array2<f64>) -> Array2<f64> {
    let min = *pixels.min_skipnan();
    let max = *pixels.max_skipnan();

    let range = max - min;
    if !range.is_finite() || range <= 0.0 {
        return Array2::zeros(pixels.dim());
    }

    let mut pixels = pixels;
    pixels.mapv_inplace(|v| (v - min) / range);
    pixels
}

/// Scales a [0, 1] value to 8 bits, truncating
fn to_byte(v: f64) -> u8 {
    (v * 255.0) as u8
}
