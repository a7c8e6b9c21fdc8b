use std::path::PathBuf;
use thiserror::Error;

use crate::types::SeriesKind;

/// Result type for neuroselect operations
pub type Result<T> = std::result::Result<T, NeuroselectError>;

/// Error types for neuroselect operations
#[derive(Error, Debug)]
pub enum NeuroselectError {
    /// DICOM reading error
    #[error("DICOM error: {0}")]
    DicomError(String),

    /// Invalid tag value
    #[error("Invalid tag value: {0}")]
    InvalidValue(String),

    /// I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Input directory missing or not a directory
    #[error("Input DICOM directory not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// External converter could not be started
    #[error("{0} not found. Install it (e.g. `brew install dcm2niix` or `conda install -c conda-forge dcm2niix`) or pass --converter")]
    ConverterNotFound(String),

    /// No series qualified for a mandatory kind
    #[error("No {kind} candidates found. Run with --list to inspect labels.")]
    NoCandidate { kind: SeriesKind },

    /// Converter exited with a non-zero status
    #[error("{program} exit code {}", exit_code_text(.code))]
    ConverterFailed { program: String, code: Option<i32> },

    /// Converter exceeded its wall-clock budget and was killed
    #[error("{program} timed out after {seconds}s")]
    ConverterTimeout { program: String, seconds: u64 },

    /// Run interrupted by the user
    #[error("Interrupted")]
    Interrupted,

    /// Invalid classifier pattern
    #[error("Invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<dicom_object::ReadError> for NeuroselectError {
    fn from(e: dicom_object::ReadError) -> Self {
        NeuroselectError::DicomError(format!("{}", e))
    }
}

impl From<dicom_core::value::ConvertValueError> for NeuroselectError {
    fn from(e: dicom_core::value::ConvertValueError) -> Self {
        NeuroselectError::InvalidValue(format!("{}", e))
    }
}

#[cfg(feature = "json")]
impl From<serde_json::Error> for NeuroselectError {
    fn from(e: serde_json::Error) -> Self {
        NeuroselectError::ConfigError(format!("{}", e))
    }
}

fn exit_code_text(code: &Option<i32>) -> String {
    match code {
        Some(code) => code.to_string(),
        None => "unknown (killed by signal)".to_string(),
    }
}
