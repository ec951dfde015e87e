use std::path::PathBuf;
use thiserror::Error;

/// Result type for hipfx operations
pub type Result<T> = std::result::Result<T, HipfxError>;

/// Error types for hipfx operations
#[derive(Error, Debug)]
pub enum HipfxError {
    /// DICOM reading error
    #[error("DICOM error: {0}")]
    DicomError(String),

    /// Pixel data could not be decoded or converted
    #[error("Pixel data error: {0}")]
    PixelDataError(String),


    /// Invalid tag value
    #[error("Invalid tag value: {0}")]
    InvalidValue(String),

    /// Source or destination directory does not exist
    #[error("Directory not found: {}", .0.display())]
    MissingDirectory(PathBuf),

    /// Region table could not be read
    #[error("Region table error: {0}")]
    TableError(String),

    /// A region record to be cropped has an undefined boundary
    #[error("No region for {filename} ({side})")]
    MissingRegion { filename: String, side: String },

    /// Image has no pixels left to work with
    #[error("Empty image: {rows}x{cols}")]
    EmptyImage { rows: usize, cols: usize },

    /// Array shape mismatch
    #[error("Shape error: {0}")]
    ShapeError(#[from] ndarray::ShapeError),

    /// Writing a .npy artifact failed
    #[error("NPY write error: {0}")]
    NpyError(String),

    /// Encoding or resampling an image failed
    #[error("Image error: {0}")]
    ImageError(#[from] image::ImageError),

    /// I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

// Convert dicom-object errors
impl From<dicom_object::ReadError> for HipfxError {
    fn from(e: dicom_object::ReadError) -> Self {
        HipfxError::DicomError(format!("{}", e))
    }
}

impl From<dicom_core::value::ConvertValueError> for HipfxError {
    fn from(e: dicom_core::value::ConvertValueError) -> Self {
        HipfxError::InvalidValue(format!("{}", e))
    }
}

impl From<dicom_pixeldata::Error> for HipfxError {
    fn from(e: dicom_pixeldata::Error) -> Self {
        HipfxError::PixelDataError(format!("{}", e))
    }
}

impl From<csv::Error> for HipfxError {
    fn from(e: csv::Error) -> Self {
        HipfxError::TableError(format!("{}", e))
    }
}

impl From<ndarray_npy::WriteNpyError> for HipfxError {
    fn from(e: ndarray_npy::WriteNpyError) -> Self {
        HipfxError::NpyError(format!("{}", e))
    }
}
