use std::fmt;

/// Acquisition kind a caller can request a series for
///
/// T1 is the mandatory kind of a conversion run, FLAIR is optional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "json", serde(rename_all = "UPPERCASE"))]
pub enum SeriesKind {
    T1,
    Flair,
}

impl SeriesKind {
    /// All kinds in selection order
    pub const ALL: [SeriesKind; 2] = [SeriesKind::T1, SeriesKind::Flair];

    /// Returns simple name for display
    pub fn simple_name(&self) -> &'static str {
        match self {
            SeriesKind::T1 => "T1",
            SeriesKind::Flair => "FLAIR",
        }
    }

    /// BIDS suffix appended to the output file stem
    pub fn bids_suffix(&self) -> &'static str {
        match self {
            SeriesKind::T1 => "T1w",
            SeriesKind::Flair => "FLAIR",
        }
    }

    /// Whether a run must fail when no series of this kind is found
    pub fn is_mandatory(&self) -> bool {
        matches!(self, SeriesKind::T1)
    }
}

impl fmt::Display for SeriesKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.simple_name())
    }
}
