use super::SourceImage;
use crate::error::{HipfxError, Result};
use crate::transform::{NormalizedImage, PixelTransform};
use image::GrayImage;
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Summary of a preview run
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct PreviewReport {
    /// Written JPEG paths
    pub written: Vec<PathBuf>,

    /// Files that failed with the error message
    pub failures: Vec<(String, String)>,

    /// Source files that took the logarithmic path
    pub log_images: Vec<String>,

    /// Wall time of the run
    pub elapsed: Duration,
}

/// Windows every DICOM file in `source_dir` and saves it as a JPEG
///
/// No cropping or resizing is done. Files are picked by a `.dcm` in their
/// name (case-insensitive) and processed in name order. A file that fails
/// is logged and skipped.
///
/// # Errors
///
/// Returns an error only if a directory is missing or cannot be listed.
pub fn preview_directory(source_dir: &Path, dest_dir: &Path) -> Result<PreviewReport> {
    for dir in [source_dir, dest_dir] {
        if !dir.is_dir() {
            return Err(HipfxError::MissingDirectory(dir.to_path_buf()));
        }
    }

    let started = Instant::now();
    let mut report = PreviewReport::default();

    let mut names: Vec<String> = fs::read_dir(source_dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| name.to_lowercase().contains(".dcm"))
        .collect();
    names.sort();

    for name in names {
        info!("Previewing {}", name);
        match preview_file(&source_dir.join(&name), dest_dir) {
            Ok((path, used_log_path)) => {
                if used_log_path {
                    report.log_images.push(name);
                }
                report.written.push(path);
            }
            Err(e) => {
                warn!("Failed to preview {}: {}", name, e);
                report.failures.push((name, e.to_string()));
            }
        }
    }

    report.elapsed = started.elapsed();
    Ok(report)
}

/// Windows one file and writes `<base>.jpeg` into `dest_dir`
pub fn preview_file(path: &Path, dest_dir: &Path) -> Result<(PathBuf, bool)> {
    let source = SourceImage::open(path)?;
    let output = PixelTransform::apply(source.pixels, &source.metadata, true);

    let out_path = dest_dir.join(format!("{}.jpeg", source.base));
    to_gray_image(&output.image)?.save(&out_path)?;
    Ok((out_path, output.used_log_path))
}

/// Converts a normalized grid into an 8-bit grayscale image
pub fn to_gray_image(image: &NormalizedImage) -> Result<GrayImage> {
    let bytes = image.to_u8();
    let (rows, cols) = bytes.dim();
    let raw: Vec<u8> = bytes.iter().copied().collect();
    GrayImage::from_raw(cols as u32, rows as u32, raw).ok_or(HipfxError::EmptyImage { rows, cols })
}
