use super::best::select_best;
use crate::classify::Classifier;
use crate::error::{NeuroselectError, Result};
use crate::index::{SeriesIndex, SeriesRecord};
use crate::types::SeriesKind;
use log::{info, warn};

/// Which kinds a run asks for; T1 is always requested
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionRequest {
    pub with_flair: bool,
}

impl SelectionRequest {
    pub fn kinds(&self) -> Vec<SeriesKind> {
        SeriesKind::ALL
            .into_iter()
            .filter(|kind| kind.is_mandatory() || self.with_flair)
            .collect()
    }
}

/// Winners of one selection round
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionPlan<'a> {
    pub t1: &'a SeriesRecord,
    pub flair: Option<&'a SeriesRecord>,
}

impl<'a> SelectionPlan<'a> {
    /// Runs one independent selection pass per requested kind
    ///
    /// # Errors
    ///
    /// Returns [`NoCandidate`](NeuroselectError::NoCandidate) when no T1
    /// series qualifies. A missing FLAIR only logs a warning.
    pub fn build(
        index: &'a SeriesIndex,
        classifier: &Classifier,
        request: SelectionRequest,
    ) -> Result<Self> {
        let mut t1 = None;
        let mut flair = None;

        for kind in request.kinds() {
            match select_best(index, classifier, kind) {
                Some(series) => {
                    info!(
                        "Selected {}: {} ({})",
                        kind, series.label, series.series_instance_uid
                    );
                    match kind {
                        SeriesKind::T1 => t1 = Some(series),
                        SeriesKind::Flair => flair = Some(series),
                    }
                }
                None if kind.is_mandatory() => {
                    return Err(NeuroselectError::NoCandidate { kind });
                }
                None => warn!("No {} candidate found, converting without it", kind),
            }
        }

        let t1 = t1.ok_or(NeuroselectError::NoCandidate {
            kind: SeriesKind::T1,
        })?;
        Ok(Self { t1, flair })
    }

    /// Series to convert, in order, with the kind each one is converted as
    ///
    /// A FLAIR winner that is the very same series as the T1 winner is not
    /// converted twice.
    pub fn conversions(&self) -> Vec<(SeriesKind, &'a SeriesRecord)> {
        let mut out = vec![(SeriesKind::T1, self.t1)];
        if let Some(flair) = self.flair {
            if flair.series_instance_uid == self.t1.series_instance_uid {
                warn!(
                    "FLAIR winner {} is the T1 series, skipping FLAIR conversion",
                    flair.series_instance_uid
                );
            } else {
                out.push((SeriesKind::Flair, flair));
            }
        }
        out
    }
}
