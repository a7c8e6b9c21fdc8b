use crate::error::Result;
use crate::types::SeriesKind;
use std::fs;
use std::path::PathBuf;

/// BIDS-style output location for one subject/session
///
/// Files land in `<bids_root>/sub-<subject>[/ses-<session>]` and are named
/// `sub-<subject>[_ses-<session>]_<suffix>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    pub bids_root: PathBuf,
    pub subject: String,
    pub session: Option<String>,
}

impl OutputLayout {
    /// Creates a layout; an empty session label counts as no session
    pub fn new(bids_root: PathBuf, subject: impl Into<String>, session: Option<String>) -> Self {
        Self {
            bids_root,
            subject: subject.into(),
            session: session.filter(|s| !s.trim().is_empty()),
        }
    }

    pub fn output_dir(&self) -> PathBuf {
        let mut dir = self.bids_root.join(format!("sub-{}", self.subject));
        if let Some(ref session) = self.session {
            dir = dir.join(format!("ses-{}", session));
        }
        dir
    }

    /// Creates the output directory and returns it
    pub fn create_output_dir(&self) -> Result<PathBuf> {
        let dir = self.output_dir();
        fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    /// Output base name handed to the converter, without extension
    pub fn file_stem(&self, kind: SeriesKind) -> String {
        let mut stem = format!("sub-{}", self.subject);
        if let Some(ref session) = self.session {
            stem.push_str(&format!("_ses-{}", session));
        }
        format!("{}_{}", stem, kind.bids_suffix())
    }
}
