use std::fmt;

/// DICOM ImageType field as an ordered list of tags
///
/// Typical values look like `ORIGINAL\PRIMARY\M\ND` or
/// `DERIVED\SECONDARY\MPR`. Only the first file of a series contributes
/// its ImageType.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct ImageType {
    pub values: Vec<String>,
}

impl ImageType {
    /// Creates a new ImageType
    pub fn new(values: Vec<String>) -> Self {
        Self { values }
    }

    /// Uppercase comma-joined representation, e.g. "ORIGINAL,PRIMARY,M,ND"
    pub fn joined(&self) -> String {
        self.values
            .iter()
            .map(|v| v.trim().to_uppercase())
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Checks if any tag equals `val` (case-insensitive)
    pub fn contains(&self, val: &str) -> bool {
        self.values.iter().any(|x| x.trim().eq_ignore_ascii_case(val))
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Display for ImageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.joined())
    }
}
