//! Fixture helpers writing small but genuine DICOM Part-10 files

use crate::extraction::tags::{
    COLUMNS, ECHO_TIME, IMAGE_TYPE, INVERSION_TIME, MODALITY, PROTOCOL_NAME, REPETITION_TIME, ROWS,
    SEQUENCE_NAME, SERIES_DESCRIPTION, SERIES_INSTANCE_UID, SOP_INSTANCE_UID,
};
use dicom_core::{DataElement, PrimitiveValue, VR};
use dicom_dictionary_std::uids;
use dicom_object::{FileMetaTableBuilder, InMemDicomObject};
use std::fs;
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// Header values written into every file of a fixture series
#[derive(Debug, Clone)]
pub struct FixtureImage {
    pub series_uid: String,
    pub protocol_name: String,
    pub series_description: String,
    pub modality: String,
    pub sequence_name: String,
    pub image_type: Vec<String>,
    pub rows: u16,
    pub columns: u16,
    pub inversion_time: Option<f64>,
    pub repetition_time: Option<f64>,
    pub echo_time: Option<f64>,
}

impl FixtureImage {
    pub fn new(series_uid: &str, protocol_name: &str) -> Self {
        Self {
            series_uid: series_uid.to_string(),
            protocol_name: protocol_name.to_string(),
            series_description: String::new(),
            modality: "MR".to_string(),
            sequence_name: String::new(),
            image_type: vec!["ORIGINAL".into(), "PRIMARY".into(), "M".into()],
            rows: 256,
            columns: 256,
            inversion_time: None,
            repetition_time: None,
            echo_time: None,
        }
    }

    pub fn with_timing(mut self, ti: Option<f64>, tr: Option<f64>, te: Option<f64>) -> Self {
        self.inversion_time = ti;
        self.repetition_time = tr;
        self.echo_time = te;
        self
    }

    pub fn with_size(mut self, rows: u16, columns: u16) -> Self {
        self.rows = rows;
        self.columns = columns;
        self
    }

    pub fn with_modality(mut self, modality: &str) -> Self {
        self.modality = modality.to_string();
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.series_description = description.to_string();
        self
    }

    pub fn with_image_type(mut self, values: &[&str]) -> Self {
        self.image_type = values.iter().map(|s| s.to_string()).collect();
        self
    }
}

/// Writes one DICOM file for `image`; `instance` makes the SOP UID unique
pub fn write_dicom(path: &Path, image: &FixtureImage, instance: usize) {
    let sop_uid = format!("{}.{}", image.series_uid, instance + 1);
    let mut dcm = InMemDicomObject::new_empty();
    dcm.put(DataElement::new(
        SOP_INSTANCE_UID,
        VR::UI,
        PrimitiveValue::from(sop_uid.as_str()),
    ));
    dcm.put(DataElement::new(
        SERIES_INSTANCE_UID,
        VR::UI,
        PrimitiveValue::from(image.series_uid.as_str()),
    ));
    dcm.put(DataElement::new(
        MODALITY,
        VR::CS,
        PrimitiveValue::from(image.modality.as_str()),
    ));
    dcm.put(DataElement::new(
        PROTOCOL_NAME,
        VR::LO,
        PrimitiveValue::from(image.protocol_name.as_str()),
    ));
    dcm.put(DataElement::new(
        SERIES_DESCRIPTION,
        VR::LO,
        PrimitiveValue::from(image.series_description.as_str()),
    ));
    dcm.put(DataElement::new(
        SEQUENCE_NAME,
        VR::SH,
        PrimitiveValue::from(image.sequence_name.as_str()),
    ));
    dcm.put(DataElement::new(
        IMAGE_TYPE,
        VR::CS,
        PrimitiveValue::Strs(image.image_type.clone().into()),
    ));
    dcm.put(DataElement::new(ROWS, VR::US, PrimitiveValue::from(image.rows)));
    dcm.put(DataElement::new(
        COLUMNS,
        VR::US,
        PrimitiveValue::from(image.columns),
    ));
    for (tag, value) in [
        (INVERSION_TIME, image.inversion_time),
        (REPETITION_TIME, image.repetition_time),
        (ECHO_TIME, image.echo_time),
    ] {
        if let Some(v) = value {
            dcm.put(DataElement::new(tag, VR::DS, PrimitiveValue::from(v.to_string())));
        }
    }

    let file = dcm
        .with_meta(
            FileMetaTableBuilder::new()
                .transfer_syntax(uids::EXPLICIT_VR_LITTLE_ENDIAN)
                .media_storage_sop_class_uid(uids::MR_IMAGE_STORAGE)
                .media_storage_sop_instance_uid(sop_uid.as_str()),
        )
        .unwrap();
    file.write_to_file(path).unwrap();
}

/// Writes `count` files of one series into `dir`, named `<prefix>_NNNN.dcm`
pub fn write_series(dir: &Path, prefix: &str, image: &FixtureImage, count: usize) -> Vec<PathBuf> {
    fs::create_dir_all(dir).unwrap();
    (0..count)
        .map(|i| {
            let path = dir.join(format!("{}_{:04}.dcm", prefix, i));
            write_dicom(&path, image, i);
            path
        })
        .collect()
}

/// Localizer, T1 MPRAGE and dark-fluid FLAIR series in separate folders
pub fn write_three_series_study(root: &Path) {
    write_series(
        &root.join("scout"),
        "scout",
        &FixtureImage::new("1.2.826.0.1.1", "AAHead_Scout").with_size(128, 128),
        3,
    );
    write_series(
        &root.join("t1"),
        "t1",
        &FixtureImage::new("1.2.826.0.1.2", "t1_mprage_sag")
            .with_timing(Some(900.0), Some(2300.0), Some(2.98))
            .with_size(256, 256),
        176,
    );
    write_series(
        &root.join("flair"),
        "flair",
        &FixtureImage::new("1.2.826.0.1.3", "t2_space_dark-fluid")
            .with_timing(Some(1800.0), Some(8000.0), Some(386.0))
            .with_size(256, 256),
        192,
    );
}

/// Fake converter logging its arguments and the staged file count
#[cfg(unix)]
pub fn fake_converter(dir: &Path, exit_code: i32) -> (PathBuf, PathBuf) {
    let log = dir.join("calls.log");
    let script = dir.join("fake-dcm2niix");
    fs::write(
        &script,
        format!(
            "#!/bin/sh\n\
             [ \"$1\" = \"-h\" ] && exit 0\n\
             for last; do :; done\n\
             echo \"$* files=$(ls \"$last\" | wc -l | tr -d ' ')\" >> \"{}\"\n\
             echo converting \"$last\"\n\
             exit {}\n",
            log.display(),
            exit_code
        ),
    )
    .unwrap();
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
    (script, log)
}

