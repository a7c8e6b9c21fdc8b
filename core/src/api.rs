use crate::classify::Classifier;
use crate::convert::{ConversionSummary, Orchestrator};
use crate::error::Result;
use crate::index::{IndexOptions, SeriesIndex, SeriesIndexer};
use crate::selection::{SelectionPlan, SelectionRequest};
use crate::types::{ClassifierRules, SeriesKind};
use std::path::Path;

/// Main entry point for series selection
///
/// Ties together indexing, classification and selection for one input tree.
///
/// # Example
///
/// ```
/// use neuroselect_core::{ClassifierRules, IndexOptions, SeriesIndex, SeriesSelector};
///
/// let rules = ClassifierRules::default();
/// let selector = SeriesSelector::new(rules, IndexOptions::default()).unwrap();
///
/// // An empty index lists nothing
/// let index = SeriesIndex::default();
/// assert!(selector.listing(&index).is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct SeriesSelector {
    indexer: SeriesIndexer,
    classifier: Classifier,
}

impl SeriesSelector {
    /// Compiles the rules and prepares an indexer
    pub fn new(rules: ClassifierRules, options: IndexOptions) -> Result<Self> {
        Ok(Self {
            indexer: SeriesIndexer::new(options),
            classifier: Classifier::new(rules)?,
        })
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Indexes every readable DICOM file under `root`
    pub fn scan(&self, root: &Path) -> Result<SeriesIndex> {
        self.indexer.index(root)
    }

    /// Every indexed series with its inferred kind
    ///
    /// Sorted T1 first, then FLAIR, then unclassified; largest volume first
    /// within each group.
    pub fn listing(&self, index: &SeriesIndex) -> Vec<ListingRow> {
        let mut rows: Vec<ListingRow> = index
            .records()
            .map(|series| ListingRow {
                kind: self.classifier.infer_kind(series),
                vox_est: series.vox_est,
                file_count: series.file_count(),
                series_instance_uid: series.series_instance_uid.clone(),
                label: series.label.clone(),
            })
            .collect();

        rows.sort_by(|a, b| {
            kind_rank(a.kind)
                .cmp(&kind_rank(b.kind))
                .then_with(|| b.vox_est.cmp(&a.vox_est))
                .then_with(|| a.series_instance_uid.cmp(&b.series_instance_uid))
        });
        rows
    }

    /// Picks the winners for the requested kinds
    pub fn plan<'a>(
        &self,
        index: &'a SeriesIndex,
        request: SelectionRequest,
    ) -> Result<SelectionPlan<'a>> {
        SelectionPlan::build(index, &self.classifier, request)
    }

    /// Selects and converts in one go
    ///
    /// Nothing is staged or converted unless selection succeeds.
    pub fn convert<F>(
        &self,
        index: &SeriesIndex,
        request: SelectionRequest,
        orchestrator: &Orchestrator,
        on_line: F,
    ) -> Result<ConversionSummary>
    where
        F: FnMut(&str),
    {
        let plan = self.plan(index, request)?;
        orchestrator.run(&plan, on_line)
    }
}

fn kind_rank(kind: Option<SeriesKind>) -> u8 {
    match kind {
        Some(SeriesKind::T1) => 0,
        Some(SeriesKind::Flair) => 1,
        None => 2,
    }
}

/// One line of the series listing
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct ListingRow {
    pub kind: Option<SeriesKind>,
    pub vox_est: u64,
    pub file_count: usize,
    pub series_instance_uid: String,
    pub label: String,
}

impl ListingRow {
    /// Kind for display, "-" when unclassified
    pub fn kind_name(&self) -> &'static str {
        self.kind.map(|k| k.simple_name()).unwrap_or("-")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{write_series, write_three_series_study, FixtureImage};
    use tempfile::TempDir;

    fn selector() -> SeriesSelector {
        SeriesSelector::new(ClassifierRules::default(), IndexOptions::default()).unwrap()
    }

    #[test]
    fn test_listing_three_series() {
        let input = TempDir::new().unwrap();
        write_three_series_study(input.path());

        let selector = selector();
        let index = selector.scan(input.path()).unwrap();
        let rows = selector.listing(&index);

        let summary: Vec<(&str, &str)> = rows
            .iter()
            .map(|r| (r.kind_name(), r.label.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("T1", "t1_mprage_sag"),
                ("FLAIR", "t2_space_dark-fluid"),
                ("-", "aahead_scout"),
            ]
        );
        assert_eq!(rows[0].vox_est, 256 * 256 * 176);
        assert_eq!(rows[2].file_count, 3);
    }

    #[test]
    fn test_listing_orders_by_volume_within_kind() {
        let input = TempDir::new().unwrap();
        write_series(
            &input.path().join("a"),
            "a",
            &FixtureImage::new("1.1", "t1_mprage").with_size(64, 64),
            2,
        );
        write_series(
            &input.path().join("b"),
            "b",
            &FixtureImage::new("1.2", "t1_mprage").with_size(128, 128),
            2,
        );

        let selector = selector();
        let index = selector.scan(input.path()).unwrap();
        let uids: Vec<String> = selector
            .listing(&index)
            .into_iter()
            .map(|r| r.series_instance_uid)
            .collect();
        assert_eq!(uids, vec!["1.2".to_string(), "1.1".to_string()]);
    }

    #[test]
    fn test_plan_selects_t1_and_flair() {
        let input = TempDir::new().unwrap();
        write_three_series_study(input.path());

        let selector = selector();
        let index = selector.scan(input.path()).unwrap();
        let plan = selector
            .plan(&index, SelectionRequest { with_flair: true })
            .unwrap();

        assert_eq!(plan.t1.series_instance_uid, "1.2.826.0.1.2");
        assert_eq!(plan.t1.file_count(), 176);
        assert_eq!(
            plan.flair.map(|s| s.series_instance_uid.as_str()),
            Some("1.2.826.0.1.3")
        );
    }

    #[test]
    fn test_derived_and_non_mr_series_are_ignored() {
        let input = TempDir::new().unwrap();
        write_series(
            &input.path().join("mpr"),
            "mpr",
            &FixtureImage::new("2.1", "t1_mprage_sag")
                .with_description("MPR tra")
                .with_image_type(&["DERIVED", "SECONDARY", "MPR"])
                .with_size(512, 512),
            4,
        );
        write_series(
            &input.path().join("ct"),
            "ct",
            &FixtureImage::new("2.2", "head t1").with_modality("CT"),
            4,
        );
        write_series(
            &input.path().join("t1"),
            "t1",
            &FixtureImage::new("2.3", "sag 3d").with_timing(Some(1100.0), Some(2000.0), None),
            2,
        );

        let selector = selector();
        let index = selector.scan(input.path()).unwrap();
        let plan = selector.plan(&index, SelectionRequest::default()).unwrap();
        assert_eq!(plan.t1.series_instance_uid, "2.3");
    }

    #[cfg(unix)]
    #[test]
    fn test_no_mr_series_fails_before_conversion() {
        use crate::convert::{Converter, ConverterOptions, OutputLayout};
        use crate::error::NeuroselectError;

        let input = TempDir::new().unwrap();
        let work = TempDir::new().unwrap();
        write_series(
            input.path(),
            "ct",
            &FixtureImage::new("3.1", "t1 head").with_modality("CT"),
            3,
        );
        let (script, log) = crate::testing::fake_converter(work.path(), 0);
        let bids_root = work.path().join("bids");
        let orchestrator = Orchestrator::new(
            Converter::new(ConverterOptions {
                program: script.display().to_string(),
                ..ConverterOptions::default()
            }),
            OutputLayout::new(bids_root.clone(), "01", None),
        );

        let selector = selector();
        let index = selector.scan(input.path()).unwrap();
        let result = selector.convert(
            &index,
            SelectionRequest { with_flair: true },
            &orchestrator,
            |_| {},
        );

        assert!(matches!(
            result,
            Err(NeuroselectError::NoCandidate {
                kind: SeriesKind::T1
            })
        ));
        assert!(!log.exists());
        assert!(!bids_root.exists());
    }
}
