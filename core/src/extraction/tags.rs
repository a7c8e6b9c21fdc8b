use dicom_core::Tag;
use dicom_object::InMemDicomObject;

// Core Image Tags
pub const IMAGE_TYPE: Tag = Tag(0x0008, 0x0008);
pub const MODALITY: Tag = Tag(0x0008, 0x0060);

// Image Geometry Tags
pub const ROWS: Tag = Tag(0x0028, 0x0010);
pub const COLUMNS: Tag = Tag(0x0028, 0x0011);

// Series Identification Tags
pub const SERIES_INSTANCE_UID: Tag = Tag(0x0020, 0x000E);
pub const SOP_INSTANCE_UID: Tag = Tag(0x0008, 0x0018);

// Description Tags
pub const SERIES_DESCRIPTION: Tag = Tag(0x0008, 0x103E);
pub const PROTOCOL_NAME: Tag = Tag(0x0018, 0x1030);

// Sequence Tags (Siemens fills SequenceName, enhanced objects PulseSequenceName)
pub const SEQUENCE_NAME: Tag = Tag(0x0018, 0x0024);
pub const PULSE_SEQUENCE_NAME: Tag = Tag(0x0018, 0x9005);

// Timing Tags (milliseconds)
pub const REPETITION_TIME: Tag = Tag(0x0018, 0x0080);
pub const ECHO_TIME: Tag = Tag(0x0018, 0x0081);
pub const INVERSION_TIME: Tag = Tag(0x0018, 0x0082);

/// Helper to get string value from DICOM tag
///
/// Returns `None` if the tag is not present or cannot be converted to string
pub fn get_string_value(dcm: &InMemDicomObject, tag: Tag) -> Option<String> {
    dcm.element(tag)
        .ok()
        .and_then(|elem| elem.to_str().ok())
        .map(|s| s.trim().to_string())
}

/// Helper to get u32 value from DICOM tag
///
/// Returns `None` if the tag is not present or cannot be converted to u32
pub fn get_u32_value(dcm: &InMemDicomObject, tag: Tag) -> Option<u32> {
    dcm.element(tag)
        .ok()
        .and_then(|elem| elem.to_int::<u32>().ok())
}

/// Helper to get a decimal value from DICOM tag
///
/// Returns `None` if the tag is not present, empty, or not a finite number.
/// A missing timing value must stay `None`, never 0.
pub fn get_float_value(dcm: &InMemDicomObject, tag: Tag) -> Option<f64> {
    dcm.element(tag)
        .ok()
        .and_then(|elem| elem.to_float64().ok())
        .filter(|v| v.is_finite())
}

/// Helper to get multi-string value from DICOM tag
///
/// Returns `None` if the tag is not present or cannot be converted to Vec<String>
pub fn get_multi_string_value(dcm: &InMemDicomObject, tag: Tag) -> Option<Vec<String>> {
    dcm.element(tag).ok().and_then(|elem| {
        if let Ok(strs) = elem.to_multi_str() {
            Some(strs.iter().map(|s| s.trim().to_string()).collect())
        } else {
            // Fallback: single string split by backslash
            elem.to_str()
                .ok()
                .map(|s| s.split('\\').map(|part| part.trim().to_string()).collect())
        }
    })
}
