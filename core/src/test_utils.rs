//! Synthetic DICOM files for tests

use crate::extraction::tags::{
    BITS_ALLOCATED, BITS_STORED, COLUMNS, HIGH_BIT, MODALITY, PHOTOMETRIC_INTERPRETATION,
    PIXEL_DATA, PIXEL_REPRESENTATION, ROWS, SAMPLES_PER_PIXEL, SOP_CLASS_UID, SOP_INSTANCE_UID,
};
use dicom_core::value::PrimitiveValue;
use dicom_core::{DataElement, Tag, VR};
use dicom_dictionary_std::uids;
use dicom_object::meta::FileMetaTableBuilder;
use dicom_object::InMemDicomObject;
use std::path::Path;

const DX_FOR_PRESENTATION: &str = "1.2.840.10008.5.1.4.1.1.1.1";

/// Writes a 16-bit MONOCHROME2 radiograph with native pixel data
///
/// `extra` elements are added last and may override the defaults.
pub(crate) fn write_test_dicom(
    path: &Path,
    rows: u16,
    cols: u16,
    pixels: &[u16],
    extra: &[(Tag, VR, &str)],
) -> Result<(), Box<dyn std::error::Error>> {
    let mut dcm = InMemDicomObject::new_empty();
    dcm.put(DataElement::new(
        SOP_CLASS_UID,
        VR::UI,
        PrimitiveValue::from(DX_FOR_PRESENTATION),
    ));
    dcm.put(DataElement::new(
        SOP_INSTANCE_UID,
        VR::UI,
        PrimitiveValue::from("1.2.826.0.1.3680043.2.1125.1"),
    ));
    dcm.put(DataElement::new(MODALITY, VR::CS, PrimitiveValue::from("DX")));
    dcm.put(DataElement::new(
        PHOTOMETRIC_INTERPRETATION,
        VR::CS,
        PrimitiveValue::from("MONOCHROME2"),
    ));
    dcm.put(DataElement::new(SAMPLES_PER_PIXEL, VR::US, PrimitiveValue::from(1_u16)));
    dcm.put(DataElement::new(ROWS, VR::US, PrimitiveValue::from(rows)));
    dcm.put(DataElement::new(COLUMNS, VR::US, PrimitiveValue::from(cols)));
    dcm.put(DataElement::new(BITS_ALLOCATED, VR::US, PrimitiveValue::from(16_u16)));
    dcm.put(DataElement::new(BITS_STORED, VR::US, PrimitiveValue::from(16_u16)));
    dcm.put(DataElement::new(HIGH_BIT, VR::US, PrimitiveValue::from(15_u16)));
    dcm.put(DataElement::new(
        PIXEL_REPRESENTATION,
        VR::US,
        PrimitiveValue::from(0_u16),
    ));

    for (tag, vr, value) in extra {
        dcm.put(DataElement::new(*tag, *vr, PrimitiveValue::from(*value)));
    }

    dcm.put(DataElement::new(
        PIXEL_DATA,
        VR::OW,
        PrimitiveValue::U16(pixels.to_vec().into()),
    ));

    let file = dcm.with_meta(
        FileMetaTableBuilder::new()
            .transfer_syntax(uids::EXPLICIT_VR_LITTLE_ENDIAN)
            .media_storage_sop_class_uid(DX_FOR_PRESENTATION)
            .media_storage_sop_instance_uid("1.2.826.0.1.3680043.2.1125.1"),
    )?;
    file.write_to_file(path)?;
    Ok(())
}
