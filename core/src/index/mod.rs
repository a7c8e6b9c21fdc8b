//! Series indexing
//!
//! Walks a directory tree, reads each candidate file's header and groups the
//! images into [`SeriesRecord`]s keyed by SeriesInstanceUID.

mod record;

pub use record::SeriesRecord;

use crate::error::{NeuroselectError, Result};
use crate::extraction::{read_header, ImageRecord};
use log::{debug, info, warn};
use rayon::prelude::*;
use std::collections::hash_map::{Entry, Iter, Values};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Options controlling a directory scan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexOptions {
    /// Read headers on the rayon thread pool
    pub parallel: bool,
}

/// Mapping from SeriesInstanceUID to finalized series
///
/// No ordering is guaranteed across series.
#[derive(Debug, Clone, Default)]
pub struct SeriesIndex {
    series: HashMap<String, SeriesRecord>,
}

impl SeriesIndex {
    /// Aggregates images into series, first file wins, then finalizes
    pub fn from_images<I>(images: I) -> Self
    where
        I: IntoIterator<Item = ImageRecord>,
    {
        let mut series: HashMap<String, SeriesRecord> = HashMap::new();

        for image in images {
            match series.entry(image.series_instance_uid.clone()) {
                Entry::Occupied(mut entry) => entry.get_mut().add_file(image.file_path),
                Entry::Vacant(entry) => {
                    entry.insert(SeriesRecord::from_image(image));
                }
            }
        }

        for record in series.values_mut() {
            record.finalize();
        }

        Self { series }
    }

    /// Builds an index from already-assembled series, finalizing each one
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = SeriesRecord>,
    {
        let series = records
            .into_iter()
            .map(|mut record| {
                record.finalize();
                (record.series_instance_uid.clone(), record)
            })
            .collect();
        Self { series }
    }

    pub fn get(&self, series_instance_uid: &str) -> Option<&SeriesRecord> {
        self.series.get(series_instance_uid)
    }

    pub fn iter(&self) -> Iter<'_, String, SeriesRecord> {
        self.series.iter()
    }

    pub fn records(&self) -> Values<'_, String, SeriesRecord> {
        self.series.values()
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

/// Directory scanner producing a [`SeriesIndex`]
#[derive(Debug, Clone, Default)]
pub struct SeriesIndexer {
    options: IndexOptions,
}

impl SeriesIndexer {
    pub fn new(options: IndexOptions) -> Self {
        Self { options }
    }

    /// Scans `root` recursively and groups readable images into series
    ///
    /// Unreadable files are skipped. The only error is a missing root.
    pub fn index(&self, root: &Path) -> Result<SeriesIndex> {
        if !root.is_dir() {
            return Err(NeuroselectError::InputNotFound(root.to_path_buf()));
        }

        let files = collect_candidate_files(root);
        info!("Found {} candidate files", files.len());

        // Parallel reads are collected in discovery order before folding,
        // so first-file-wins holds either way
        let index = if self.options.parallel {
            let images: Vec<ImageRecord> =
                files.par_iter().filter_map(|p| read_header(p)).collect();
            SeriesIndex::from_images(images)
        } else {
            SeriesIndex::from_images(files.iter().filter_map(|p| read_header(p)))
        };

        info!("Indexed {} series", index.len());
        Ok(index)
    }
}

/// Recursively collects files named `*.dcm` or without any extension
///
/// Entries are visited in file-name order within each directory.
pub fn collect_candidate_files(root: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        match entry {
            Ok(entry) => {
                let path = entry.path();
                if path.is_file() && is_candidate_file(path) {
                    files.push(path.to_path_buf());
                }
            }
            Err(e) => {
                warn!("Error accessing entry: {}", e);
            }
        }
    }

    debug!("{} candidate files under {}", files.len(), root.display());
    files
}

/// Checks the naming convention of DICOM files
///
/// Accepts `.dcm` (any case) and names with no dot at all, as exported by
/// most scanners.
pub fn is_candidate_file(path: &Path) -> bool {
    match path.file_name() {
        Some(name) => {
            let name = name.to_string_lossy().to_lowercase();
            name.ends_with(".dcm") || !name.contains('.')
        }
        None => false,
    }
}
