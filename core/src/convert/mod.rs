//! Conversion of selected series
//!
//! Stages each winning series into a private temporary directory and runs
//! the external converter on it, writing BIDS-named outputs.

mod converter;
mod layout;
mod process;
mod stage;

pub use converter::{Converter, ConverterOptions};
pub use layout::OutputLayout;
pub use process::{run_monitored, ProcessOutcome};
pub use stage::stage_series;

use crate::error::{NeuroselectError, Result};
use crate::selection::SelectionPlan;
use crate::types::SeriesKind;
use log::info;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// One finished conversion
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct ConversionRecord {
    pub kind: SeriesKind,
    pub series_instance_uid: String,
    pub file_stem: String,
}

/// Result of a complete conversion run
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct ConversionSummary {
    pub output_dir: PathBuf,
    pub converted: Vec<ConversionRecord>,
}

/// Stages and converts the series of a [`SelectionPlan`]
#[derive(Debug, Clone)]
pub struct Orchestrator {
    converter: Converter,
    layout: OutputLayout,
}

impl Orchestrator {
    pub fn new(converter: Converter, layout: OutputLayout) -> Self {
        Self { converter, layout }
    }

    /// Converts every series of the plan, T1 first
    ///
    /// The staging directory is removed when this returns, whether the run
    /// succeeded or not. Any failure aborts the remaining conversions.
    pub fn run<F>(&self, plan: &SelectionPlan<'_>, mut on_line: F) -> Result<ConversionSummary>
    where
        F: FnMut(&str),
    {
        let output_dir = self.layout.create_output_dir()?;
        let staging = tempfile::Builder::new().prefix("neuroselect_").tempdir()?;
        let mut converted = Vec::new();

        for (kind, series) in plan.conversions() {
            if self.converter.is_interrupted() {
                return Err(NeuroselectError::Interrupted);
            }
            info!(
                "Staging {} files of {} series {}",
                series.file_count(),
                kind,
                series.series_instance_uid
            );
            let staged = stage_series(
                staging.path(),
                &kind.bids_suffix().to_lowercase(),
                &series.files,
            )?;

            let file_stem = self.layout.file_stem(kind);
            self.converter
                .convert(&staged, &output_dir, &file_stem, &mut on_line)?;

            converted.push(ConversionRecord {
                kind,
                series_instance_uid: series.series_instance_uid.clone(),
                file_stem,
            });
        }

        Ok(ConversionSummary {
            output_dir,
            converted,
        })
    }
}

/// Installs a Ctrl-C handler raising the returned flag
///
/// Pass the flag to [`Converter::with_interrupt`] so an interrupt kills the
/// converter and unwinds normally, removing the staging directory.
pub fn install_interrupt_handler() -> Result<Arc<AtomicBool>> {
    let flag = Arc::new(AtomicBool::new(false));
    let handler_flag = Arc::clone(&flag);
    ctrlc::set_handler(move || handler_flag.store(true, Ordering::SeqCst))
        .map_err(|e| {
            NeuroselectError::ConfigError(format!("cannot install Ctrl-C handler: {}", e))
        })?;
    Ok(flag)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::classify::Classifier;
    use crate::index::SeriesIndexer;
    use crate::selection::SelectionRequest;
    use crate::testing::{fake_converter, write_three_series_study};
    use crate::types::ClassifierRules;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn orchestrator(script: &Path, bids_root: &Path) -> Orchestrator {
        let converter = Converter::new(ConverterOptions {
            program: script.display().to_string(),
            ..ConverterOptions::default()
        });
        Orchestrator::new(
            converter,
            OutputLayout::new(bids_root.to_path_buf(), "01", Some("base".to_string())),
        )
    }

    #[test]
    fn test_run_converts_t1_and_flair() {
        let input = TempDir::new().unwrap();
        let work = TempDir::new().unwrap();
        write_three_series_study(input.path());
        let (script, log) = fake_converter(work.path(), 0);

        let index = SeriesIndexer::default().index(input.path()).unwrap();
        let classifier = Classifier::new(ClassifierRules::default()).unwrap();
        let request = SelectionRequest { with_flair: true };
        let plan = SelectionPlan::build(&index, &classifier, request).unwrap();

        let bids_root = work.path().join("bids");
        let mut lines = Vec::new();
        let summary = orchestrator(&script, &bids_root)
            .run(&plan, |l| lines.push(l.to_string()))
            .unwrap();

        assert_eq!(summary.output_dir, bids_root.join("sub-01").join("ses-base"));
        assert!(summary.output_dir.is_dir());
        assert_eq!(summary.converted.len(), 2);
        assert_eq!(summary.converted[0].file_stem, "sub-01_ses-base_T1w");
        assert_eq!(summary.converted[1].file_stem, "sub-01_ses-base_FLAIR");
        assert_eq!(lines.len(), 2);

        let calls = fs::read_to_string(&log).unwrap();
        let calls: Vec<&str> = calls.lines().collect();
        assert_eq!(calls.len(), 2);
        assert!(calls[0].contains("-f sub-01_ses-base_T1w"));
        assert!(calls[0].ends_with("files=176"));
        assert!(calls[1].contains("-f sub-01_ses-base_FLAIR"));
        assert!(calls[1].ends_with("files=192"));
    }

    #[test]
    fn test_failed_conversion_aborts() {
        let input = TempDir::new().unwrap();
        let work = TempDir::new().unwrap();
        write_three_series_study(input.path());
        let (script, log) = fake_converter(work.path(), 4);

        let index = SeriesIndexer::default().index(input.path()).unwrap();
        let classifier = Classifier::new(ClassifierRules::default()).unwrap();
        let request = SelectionRequest { with_flair: true };
        let plan = SelectionPlan::build(&index, &classifier, request).unwrap();

        let result = orchestrator(&script, &work.path().join("bids")).run(&plan, |_| {});
        assert!(matches!(
            result,
            Err(NeuroselectError::ConverterFailed { code: Some(4), .. })
        ));

        // Only the T1 conversion was attempted
        assert_eq!(fs::read_to_string(&log).unwrap().lines().count(), 1);
    }
}
