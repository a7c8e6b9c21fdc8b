use crate::extraction::ImageRecord;
use crate::types::ImageType;
use std::path::PathBuf;

/// All images sharing one SeriesInstanceUID
///
/// Descriptive fields come from the first file seen for the series; later
/// files only extend `files` and bump `instances`. The derived fields
/// `label`, `imgtype` and `vox_est` are filled in by [`SeriesRecord::finalize`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct SeriesRecord {
    pub series_instance_uid: String,

    /// Contributing files in discovery order
    pub files: Vec<PathBuf>,

    pub protocol_name: String,
    pub series_description: String,
    pub modality: String,
    pub sequence_name: String,
    pub pulse_sequence_name: String,
    pub image_type: ImageType,
    pub rows: u32,
    pub columns: u32,
    pub instances: usize,
    pub inversion_time: Option<f64>,
    pub repetition_time: Option<f64>,
    pub echo_time: Option<f64>,

    /// Lowercase "protocol description", trimmed
    pub label: String,

    /// Uppercase comma-joined ImageType
    pub imgtype: String,

    /// rows * columns * instances
    pub vox_est: u64,
}

impl SeriesRecord {
    /// Starts a series from its first image
    pub fn from_image(image: ImageRecord) -> Self {
        Self {
            series_instance_uid: image.series_instance_uid,
            files: vec![image.file_path],
            protocol_name: image.protocol_name,
            series_description: image.series_description,
            modality: image.modality,
            sequence_name: image.sequence_name,
            pulse_sequence_name: image.pulse_sequence_name,
            image_type: image.image_type,
            rows: image.rows,
            columns: image.columns,
            instances: 1,
            inversion_time: image.inversion_time,
            repetition_time: image.repetition_time,
            echo_time: image.echo_time,
            label: String::new(),
            imgtype: String::new(),
            vox_est: 0,
        }
    }

    /// Appends a later file of the same series
    pub fn add_file(&mut self, path: PathBuf) {
        self.files.push(path);
        self.instances += 1;
    }

    /// Computes the derived fields
    pub fn finalize(&mut self) {
        self.label = format!("{} {}", self.protocol_name, self.series_description)
            .trim()
            .to_lowercase();
        self.imgtype = self.image_type.joined();
        self.vox_est = self.rows as u64 * self.columns as u64 * self.instances as u64;
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Ranking key: larger is better
    pub fn rank_key(&self) -> (u64, usize) {
        (self.vox_est, self.file_count())
    }

    /// Checks the modality code (case-insensitive)
    pub fn has_modality(&self, modality: &str) -> bool {
        self.modality.trim().eq_ignore_ascii_case(modality)
    }
}
