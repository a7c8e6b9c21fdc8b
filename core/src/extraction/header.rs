use crate::error::Result;
use crate::types::ImageType;
use dicom_dictionary_std::tags::PIXEL_DATA;
use dicom_object::file::ReadPreamble;
use dicom_object::{InMemDicomObject, OpenFileOptions};
use log::debug;
use std::path::{Path, PathBuf};

use super::tags::{
    get_float_value, get_multi_string_value, get_string_value, get_u32_value, COLUMNS, ECHO_TIME,
    IMAGE_TYPE, INVERSION_TIME, MODALITY, PROTOCOL_NAME, PULSE_SEQUENCE_NAME, REPETITION_TIME,
    ROWS, SEQUENCE_NAME, SERIES_DESCRIPTION, SERIES_INSTANCE_UID,
};

/// Descriptive header fields of a single DICOM file
///
/// Text fields default to the empty string and dimensions to 0 when the
/// tag is missing. Timing parameters stay `None` when missing.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageRecord {
    pub file_path: PathBuf,
    pub series_instance_uid: String,
    pub protocol_name: String,
    pub series_description: String,
    pub modality: String,
    pub sequence_name: String,
    pub pulse_sequence_name: String,
    pub image_type: ImageType,
    pub rows: u32,
    pub columns: u32,
    pub inversion_time: Option<f64>,
    pub repetition_time: Option<f64>,
    pub echo_time: Option<f64>,
}

impl ImageRecord {
    /// Reads the header of a DICOM file, stopping before Pixel Data
    ///
    /// Files without the 128-byte preamble are accepted.
    ///
    /// # Returns
    ///
    /// `Ok(None)` if the file parses but carries no SeriesInstanceUID,
    /// an error if it cannot be parsed at all.
    pub fn from_file(path: &Path) -> Result<Option<Self>> {
        let dcm = OpenFileOptions::new()
            .read_preamble(ReadPreamble::Auto)
            .read_until(PIXEL_DATA)
            .open_file(path)?;
        Ok(Self::from_dicom(path.to_path_buf(), &dcm))
    }

    /// Builds a record from an already-opened DICOM object
    ///
    /// Returns `None` when the object has no (or an empty) SeriesInstanceUID.
    pub fn from_dicom(path: PathBuf, dcm: &InMemDicomObject) -> Option<Self> {
        let series_instance_uid =
            get_string_value(dcm, SERIES_INSTANCE_UID).filter(|uid| !uid.is_empty())?;

        Some(Self {
            file_path: path,
            series_instance_uid,
            protocol_name: get_string_value(dcm, PROTOCOL_NAME).unwrap_or_default(),
            series_description: get_string_value(dcm, SERIES_DESCRIPTION).unwrap_or_default(),
            modality: get_string_value(dcm, MODALITY).unwrap_or_default(),
            sequence_name: get_string_value(dcm, SEQUENCE_NAME).unwrap_or_default(),
            pulse_sequence_name: get_string_value(dcm, PULSE_SEQUENCE_NAME).unwrap_or_default(),
            image_type: ImageType::new(get_multi_string_value(dcm, IMAGE_TYPE).unwrap_or_default()),
            rows: get_u32_value(dcm, ROWS).unwrap_or(0),
            columns: get_u32_value(dcm, COLUMNS).unwrap_or(0),
            inversion_time: get_float_value(dcm, INVERSION_TIME),
            repetition_time: get_float_value(dcm, REPETITION_TIME),
            echo_time: get_float_value(dcm, ECHO_TIME),
        })
    }
}

/// Reads one file's header, swallowing every failure
///
/// Corrupt, non-DICOM or unreadable files yield `None` so a directory scan
/// can carry on.
pub fn read_header(path: &Path) -> Option<ImageRecord> {
    match ImageRecord::from_file(path) {
        Ok(Some(record)) => Some(record),
        Ok(None) => {
            debug!("Skipping {}: no SeriesInstanceUID", path.display());
            None
        }
        Err(e) => {
            debug!("Skipping {}: {}", path.display(), e);
            None
        }
    }
}
