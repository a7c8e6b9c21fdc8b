//! Core type definitions for series selection
//!
//! This module provides the fundamental types used throughout the neuroselect library:
//! - [`SeriesKind`]: The anatomical acquisition kinds that can be requested (T1, FLAIR)
//! - [`ImageType`]: The ordered DICOM ImageType tags of a series
//! - [`ClassifierRules`]: Pattern and threshold tables driving classification
//! - [`TimingSignature`] / [`ValueRange`]: Physics-based fallback thresholds

mod image_type;
mod kind;
mod rules;

pub use image_type::ImageType;
pub use kind::SeriesKind;
pub use rules::{ClassifierRules, TimingSignature, ValueRange, DEFAULT_JUNK_PATTERN};
