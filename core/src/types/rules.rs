/// Default disallow pattern for non-diagnostic acquisitions
///
/// Covers localizers, scouts and surveys, auto-alignment, parallel imaging
/// calibration (ASSET, ARC, GRAPPA, SENSE, CLEAR), motion correction, noise
/// and B1 maps, unfiltered reconstructions and vendor test series.
pub const DEFAULT_JUNK_PATTERN: &str = r"(?i)(localizer|scout|survey|autoalign|ASSET|ARC|MOCO|MOTION|DERIVED|SECONDARY|NOISE|CALIB|B1|ND|GRAPPA|SENSE|CLEAR|TEST)";

/// Numeric interval used for timing thresholds (milliseconds)
///
/// Every bound that is set must hold. `at_least` and `at_most` are
/// inclusive, `below` is exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "json", serde(default))]
pub struct ValueRange {
    pub at_least: Option<f64>,
    pub at_most: Option<f64>,
    pub below: Option<f64>,
}

impl ValueRange {
    /// Inclusive range `[min, max]`
    pub fn between(min: f64, max: f64) -> Self {
        Self {
            at_least: Some(min),
            at_most: Some(max),
            below: None,
        }
    }

    /// Inclusive lower bound only
    pub fn at_least(min: f64) -> Self {
        Self {
            at_least: Some(min),
            ..Self::default()
        }
    }

    /// Exclusive upper bound only
    pub fn below(max: f64) -> Self {
        Self {
            below: Some(max),
            ..Self::default()
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.at_least.map_or(true, |min| value >= min)
            && self.at_most.map_or(true, |max| value <= max)
            && self.below.map_or(true, |max| value < max)
    }
}

/// Pulse-sequence timing signature
///
/// Matches only when both inversion time and repetition time are present
/// and fall inside their ranges. A missing value never matches.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
pub struct TimingSignature {
    pub inversion_time: ValueRange,
    pub repetition_time: ValueRange,
}

impl TimingSignature {
    pub fn new(inversion_time: ValueRange, repetition_time: ValueRange) -> Self {
        Self {
            inversion_time,
            repetition_time,
        }
    }

    pub fn matches(&self, inversion_time: Option<f64>, repetition_time: Option<f64>) -> bool {
        match (inversion_time, repetition_time) {
            (Some(ti), Some(tr)) => {
                self.inversion_time.contains(ti) && self.repetition_time.contains(tr)
            }
            _ => false,
        }
    }
}

/// Pattern and threshold tables used by the [`Classifier`](crate::Classifier)
///
/// All matching is done against the normalized series label (lowercase
/// protocol name + series description). New vendor naming conventions are
/// added here, never in the selection code.
///
/// # Example
///
/// ```
/// use neuroselect_core::{ClassifierRules, TimingSignature, ValueRange};
///
/// let rules = ClassifierRules::default()
///     .with_t1_label_keyword("bravo")
///     .with_flair_timing(TimingSignature::new(
///         ValueRange::at_least(2000.0),
///         ValueRange::at_least(6000.0),
///     ));
///
/// assert!(rules.t1_label_keywords.contains(&"bravo".to_string()));
/// assert_eq!(rules.flair_timing.inversion_time.at_least, Some(2000.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "json", serde(default))]
pub struct ClassifierRules {
    /// Regex matched against the label to flag junk series
    pub junk_pattern: String,

    /// ImageType substrings that flag a series as junk
    pub junk_image_types: Vec<String>,

    /// Modality code every candidate must carry
    pub modality: String,

    /// Label substrings identifying T1-weighted series
    pub t1_label_keywords: Vec<String>,

    /// Label tokens identifying T1-weighted series as whole words only
    pub t1_label_words: Vec<String>,

    /// Sequence-name substrings identifying T1-weighted series
    pub t1_sequence_keywords: Vec<String>,

    /// Timing fallback for T1-weighted series (inversion-prepared gradient echo)
    pub t1_timing: TimingSignature,

    /// Label substrings identifying FLAIR series
    pub flair_label_keywords: Vec<String>,

    /// Timing fallback for FLAIR series (long TI, long TR)
    pub flair_timing: TimingSignature,
}

impl Default for ClassifierRules {
    fn default() -> Self {
        Self {
            junk_pattern: DEFAULT_JUNK_PATTERN.to_string(),
            junk_image_types: strings(&["DERIVED", "SECONDARY", "LOCALIZER"]),
            modality: "MR".to_string(),
            t1_label_keywords: strings(&["mprage", "mp2rage", "t1w"]),
            t1_label_words: strings(&["t1"]),
            t1_sequence_keywords: strings(&["mprage", "mp2rage"]),
            t1_timing: TimingSignature::new(
                ValueRange::between(600.0, 1500.0),
                ValueRange::below(4000.0),
            ),
            flair_label_keywords: strings(&["flair", "dark-fluid", "darkfluid"]),
            flair_timing: TimingSignature::new(
                ValueRange::at_least(1800.0),
                ValueRange::at_least(4000.0),
            ),
        }
    }
}

impl ClassifierRules {
    /// Builder: Replace the junk label pattern
    pub fn with_junk_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.junk_pattern = pattern.into();
        self
    }

    /// Builder: Add a T1 label keyword (substring match)
    pub fn with_t1_label_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.t1_label_keywords.push(keyword.into().to_lowercase());
        self
    }

    /// Builder: Add a FLAIR label keyword (substring match)
    pub fn with_flair_label_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.flair_label_keywords.push(keyword.into().to_lowercase());
        self
    }

    /// Builder: Replace the T1 timing fallback
    pub fn with_t1_timing(mut self, timing: TimingSignature) -> Self {
        self.t1_timing = timing;
        self
    }

    /// Builder: Replace the FLAIR timing fallback
    pub fn with_flair_timing(mut self, timing: TimingSignature) -> Self {
        self.flair_timing = timing;
        self
    }

    /// Loads rule tables from a JSON file
    ///
    /// Fields missing from the file keep their default values.
    #[cfg(feature = "json")]
    pub fn from_json_file(path: &std::path::Path) -> crate::error::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}
