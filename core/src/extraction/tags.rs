use dicom_core::Tag;
use dicom_object::InMemDicomObject;

// Core Image Tags
pub const MODALITY: Tag = Tag(0x0008, 0x0060);
pub const PHOTOMETRIC_INTERPRETATION: Tag = Tag(0x0028, 0x0004);
pub const SAMPLES_PER_PIXEL: Tag = Tag(0x0028, 0x0002);

// Image Geometry Tags
pub const ROWS: Tag = Tag(0x0028, 0x0010);
pub const COLUMNS: Tag = Tag(0x0028, 0x0011);
pub const BITS_ALLOCATED: Tag = Tag(0x0028, 0x0100);
pub const BITS_STORED: Tag = Tag(0x0028, 0x0101);
pub const HIGH_BIT: Tag = Tag(0x0028, 0x0102);
pub const PIXEL_REPRESENTATION: Tag = Tag(0x0028, 0x0103);

// Presentation Tags
pub const PIXEL_INTENSITY_RELATIONSHIP: Tag = Tag(0x0028, 0x1040);
pub const WINDOW_CENTER: Tag = Tag(0x0028, 0x1050);
pub const WINDOW_WIDTH: Tag = Tag(0x0028, 0x1051);

// Study/Series Identification Tags
pub const SOP_INSTANCE_UID: Tag = Tag(0x0008, 0x0018);
pub const SOP_CLASS_UID: Tag = Tag(0x0008, 0x0016);
pub const ACCESSION_NUMBER: Tag = Tag(0x0008, 0x0050);

// Pixel Data
pub const PIXEL_DATA: Tag = Tag(0x7FE0, 0x0010);

/// Helper to get string value from DICOM tag
///
/// Returns `None` if the tag is not present or cannot be converted to string
pub fn get_string_value(dcm: &InMemDicomObject, tag: Tag) -> Option<String> {
    dcm.element(tag)
        .ok()
        .and_then(|elem| elem.to_str().ok())
        .map(|s| s.trim().to_string())
}

/// Helper to get u16 value from DICOM tag
///
/// Returns `None` if the tag is not present or cannot be converted to u16
pub fn get_u16_value(dcm: &InMemDicomObject, tag: Tag) -> Option<u16> {
    dcm.element(tag)
        .ok()
        .and_then(|elem| elem.to_int::<u16>().ok())
}

/// Helper to get all numeric values of a (possibly multi-valued) tag
///
/// Returns `None` if the tag is not present or holds no parseable numbers
pub fn get_multi_float_value(dcm: &InMemDicomObject, tag: Tag) -> Option<Vec<f64>> {
    dcm.element(tag)
        .ok()
        .and_then(|elem| elem.to_multi_float64().ok())
        .filter(|values| !values.is_empty())
}
