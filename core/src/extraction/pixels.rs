use crate::error::Result;
use dicom_object::{FileDicomObject, InMemDicomObject};
use dicom_pixeldata::{ConvertOptions, ModalityLutOption, PixelDecoder};
use ndarray::{s, Array2, Ix2};

/// Decodes the first frame of a DICOM file into a 2D grid of stored values
///
/// The modality LUT is not applied, so the grid holds the raw stored
/// samples. Multi-sample images keep only their first sample.
pub fn decode_pixels(dcm: &FileDicomObject<InMemDicomObject>) -> Result<Array2<f64>> {
    let decoded = dcm.decode_pixel_data()?;
    let options = ConvertOptions::new().with_modality_lut(ModalityLutOption::None);
    let volume = decoded.to_ndarray_with_options::<f64>(&options)?;

    // NumberOfFrames x Rows x Columns x SamplesPerPixel
    let frame = volume
        .slice(s![0, .., .., 0])
        .to_owned()
        .into_dimensionality::<Ix2>()?;
    Ok(frame)
}
