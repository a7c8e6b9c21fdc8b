//! Rule-based series classification
//!
//! Three independent predicates over a finalized [`SeriesRecord`]: junk,
//! T1-weighted and FLAIR. Label text is checked first, pulse-sequence timing
//! serves as the fallback when the free-text fields say nothing useful.
//! The predicates may overlap; the selector resolves ownership per kind.

use crate::error::Result;
use crate::index::SeriesRecord;
use crate::types::{ClassifierRules, SeriesKind};
use regex::Regex;

/// Compiled form of [`ClassifierRules`]
#[derive(Debug, Clone)]
pub struct Classifier {
    rules: ClassifierRules,
    junk: Regex,
    t1_words: Vec<Regex>,
}

impl Classifier {
    /// Compiles the rule tables
    ///
    /// # Errors
    ///
    /// Returns [`InvalidPattern`](crate::NeuroselectError::InvalidPattern) if
    /// the junk pattern is not a valid regex.
    pub fn new(rules: ClassifierRules) -> Result<Self> {
        let junk = Regex::new(&rules.junk_pattern)?;
        let t1_words = rules
            .t1_label_words
            .iter()
            .map(|word| Regex::new(&format!(r"\b{}\b", regex::escape(&word.to_lowercase()))))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self {
            rules,
            junk,
            t1_words,
        })
    }

    pub fn rules(&self) -> &ClassifierRules {
        &self.rules
    }

    /// Localizers, calibration scans and derived/secondary images
    pub fn is_junk(&self, series: &SeriesRecord) -> bool {
        if self.junk.is_match(&series.label) {
            return true;
        }

        self.rules
            .junk_image_types
            .iter()
            .any(|t| series.imgtype.contains(t.to_uppercase().as_str()))
    }

    /// T1-weighted acquisitions (MPRAGE, MP2RAGE, generic T1)
    pub fn is_t1(&self, series: &SeriesRecord) -> bool {
        if !series.has_modality(&self.rules.modality) {
            return false;
        }

        let label = series.label.as_str();
        if contains_any(label, &self.rules.t1_label_keywords) {
            return true;
        }
        if self.t1_words.iter().any(|word| word.is_match(label)) {
            return true;
        }

        let sequences = [
            series.sequence_name.to_lowercase(),
            series.pulse_sequence_name.to_lowercase(),
        ];
        if sequences
            .iter()
            .any(|seq| contains_any(seq, &self.rules.t1_sequence_keywords))
        {
            return true;
        }

        self.rules
            .t1_timing
            .matches(series.inversion_time, series.repetition_time)
    }

    /// Fluid-attenuated inversion recovery acquisitions
    pub fn is_flair(&self, series: &SeriesRecord) -> bool {
        if contains_any(&series.label, &self.rules.flair_label_keywords) {
            return true;
        }

        self.rules
            .flair_timing
            .matches(series.inversion_time, series.repetition_time)
    }

    /// Checks the predicate belonging to `kind`
    pub fn matches(&self, series: &SeriesRecord, kind: SeriesKind) -> bool {
        match kind {
            SeriesKind::T1 => self.is_t1(series),
            SeriesKind::Flair => self.is_flair(series),
        }
    }

    /// Kind shown in listings: T1 wins over FLAIR when both predicates hold
    pub fn infer_kind(&self, series: &SeriesRecord) -> Option<SeriesKind> {
        SeriesKind::ALL
            .into_iter()
            .find(|kind| self.matches(series, *kind))
    }

    /// Whether `series` may be selected for `kind`
    pub fn is_candidate(&self, series: &SeriesRecord, kind: SeriesKind) -> bool {
        series.has_modality(&self.rules.modality)
            && !self.is_junk(series)
            && self.matches(series, kind)
    }
}

fn contains_any(haystack: &str, needles: &[String]) -> bool {
    needles
        .iter()
        .any(|needle| haystack.contains(needle.to_lowercase().as_str()))
}
