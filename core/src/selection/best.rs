use crate::classify::Classifier;
use crate::index::{SeriesIndex, SeriesRecord};
use crate::types::SeriesKind;
use log::debug;

/// All series that may be selected for `kind`
///
/// A candidate carries the configured modality, is not junk, and satisfies
/// the kind's predicate.
pub fn candidates<'a>(
    index: &'a SeriesIndex,
    classifier: &Classifier,
    kind: SeriesKind,
) -> Vec<&'a SeriesRecord> {
    index
        .records()
        .filter(|series| classifier.is_candidate(series, kind))
        .collect()
}

/// Selects the best series for `kind`
///
/// Ranks candidates by `(vox_est, file count)` and returns the maximum.
/// Exact ties fall back to the larger SeriesInstanceUID so the result does
/// not depend on map iteration order.
///
/// # Returns
///
/// `None` if no series qualifies
pub fn select_best<'a>(
    index: &'a SeriesIndex,
    classifier: &Classifier,
    kind: SeriesKind,
) -> Option<&'a SeriesRecord> {
    let pool = candidates(index, classifier, kind);
    debug!("{} {} candidates", pool.len(), kind);

    pool.into_iter().max_by(|a, b| {
        a.rank_key()
            .cmp(&b.rank_key())
            .then_with(|| a.series_instance_uid.cmp(&b.series_instance_uid))
    })
}
