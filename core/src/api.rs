use crate::error::{HipfxError, Result};
use crate::extraction::tags::{
    get_multi_float_value, get_string_value, get_u16_value, ACCESSION_NUMBER, BITS_ALLOCATED,
    PHOTOMETRIC_INTERPRETATION, PIXEL_INTENSITY_RELATIONSHIP, PIXEL_REPRESENTATION, WINDOW_CENTER,
    WINDOW_WIDTH,
};
use crate::types::{PhotometricInterpretation, PixelIntensityRelationship, Window, WindowValue};
use dicom_object::InMemDicomObject;

/// Bits allocated when the file does not say
const DEFAULT_BITS_ALLOCATED: u16 = 16;

/// Extractor for the imaging attributes the pixel pipeline needs
///
/// # Example
///
/// ```
/// use hipfx_core::ImagingExtractor;
/// use dicom_object::InMemDicomObject;
/// use dicom_core::{DataElement, PrimitiveValue, VR, Tag};
///
/// let mut dcm = InMemDicomObject::new_empty();
/// dcm.put(DataElement::new(
///     Tag(0x0028, 0x0004), // PhotometricInterpretation
///     VR::CS,
///     PrimitiveValue::from("MONOCHROME1"),
/// ));
/// dcm.put(DataElement::new(
///     Tag(0x0028, 0x1040), // PixelIntensityRelationship
///     VR::CS,
///     PrimitiveValue::from("LOG"),
/// ));
/// dcm.put(DataElement::new(
///     Tag(0x0028, 0x1050), // WindowCenter
///     VR::DS,
///     PrimitiveValue::from("2048"),
/// ));
/// dcm.put(DataElement::new(
///     Tag(0x0028, 0x1051), // WindowWidth
///     VR::DS,
///     PrimitiveValue::from("4096"),
/// ));
///
/// let metadata = ImagingExtractor::extract(&dcm).unwrap();
///
/// assert!(metadata.is_inverted());
/// assert!(metadata.pixel_intensity_relationship.is_log());
/// let window = metadata.declared_window().unwrap();
/// assert_eq!(window.low, 0.0);
/// assert_eq!(window.high, 4096.0);
/// ```
pub struct ImagingExtractor;

impl ImagingExtractor {
    /// Extracts imaging metadata from a DICOM object
    ///
    /// # Errors
    ///
    /// Returns an error if the photometric interpretation is a color one;
    /// only single-sample grayscale radiographs are supported.
    pub fn extract(dcm: &InMemDicomObject) -> Result<ImagingMetadata> {
        let photometric_interpretation = get_string_value(dcm, PHOTOMETRIC_INTERPRETATION)
            .map(|s| PhotometricInterpretation::from_str(&s))
            .unwrap_or_default();

        if !photometric_interpretation.is_monochrome()
            && photometric_interpretation != PhotometricInterpretation::Unknown
        {
            return Err(HipfxError::InvalidValue(format!(
                "unsupported photometric interpretation {}",
                photometric_interpretation
            )));
        }

        Ok(ImagingMetadata {
            photometric_interpretation,
            window_center: get_multi_float_value(dcm, WINDOW_CENTER)
                .and_then(WindowValue::from_values),
            window_width: get_multi_float_value(dcm, WINDOW_WIDTH)
                .and_then(WindowValue::from_values),
            pixel_intensity_relationship: get_string_value(dcm, PIXEL_INTENSITY_RELATIONSHIP)
                .map(|s| PixelIntensityRelationship::from_str(&s))
                .unwrap_or_default(),
            accession_number: get_string_value(dcm, ACCESSION_NUMBER).filter(|s| !s.is_empty()),
            bits_allocated: get_u16_value(dcm, BITS_ALLOCATED).unwrap_or(DEFAULT_BITS_ALLOCATED),
            is_signed: get_u16_value(dcm, PIXEL_REPRESENTATION).unwrap_or(0) == 1,
        })
    }
}

/// Imaging attributes of one radiograph
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct ImagingMetadata {
    /// Pixel polarity
    pub photometric_interpretation: PhotometricInterpretation,

    /// Declared WindowCenter, possibly multi-valued
    pub window_center: Option<WindowValue>,

    /// Declared WindowWidth, possibly multi-valued
    pub window_width: Option<WindowValue>,

    /// Whether stored values are log-scaled
    pub pixel_intensity_relationship: PixelIntensityRelationship,

    /// Accession number of the study
    pub accession_number: Option<String>,

    /// Bits allocated per stored sample
    pub bits_allocated: u16,

    /// Two's complement samples (PixelRepresentation = 1)
    pub is_signed: bool,
}

impl Default for ImagingMetadata {
    fn default() -> Self {
        Self {
            photometric_interpretation: PhotometricInterpretation::Monochrome2,
            window_center: None,
            window_width: None,
            pixel_intensity_relationship: PixelIntensityRelationship::Unspecified,
            accession_number: None,
            bits_allocated: DEFAULT_BITS_ALLOCATED,
            is_signed: false,
        }
    }
}

impl ImagingMetadata {
    /// Returns whether pixel values must be inverted (MONOCHROME1)
    pub fn is_inverted(&self) -> bool {
        self.photometric_interpretation.is_inverted()
    }

    /// Returns the declared window when both center and width are present
    pub fn declared_window(&self) -> Option<Window> {
        match (&self.window_center, &self.window_width) {
            (Some(center), Some(width)) => {
                Some(Window::from_center_width(center.resolve(), width.resolve()))
            }
            _ => None,
        }
    }

    /// Bitwise NOT of a stored sample at this bit depth
    ///
    /// Unsigned samples map to `max - v`, signed samples to `-v - 1`.
    pub fn invert_sample(&self, value: f64) -> f64 {
        if self.is_signed {
            -value - 1.0
        } else {
            let bits = self.bits_allocated.min(32) as i32;
            (2f64.powi(bits) - 1.0) - value
        }
    }
}
