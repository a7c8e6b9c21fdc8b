use crate::api::ListingRow;
use crate::convert::ConversionSummary;
use std::fmt;

/// Text report for list mode, one series per line
pub struct ListingReport<'a> {
    rows: &'a [ListingRow],
}

impl<'a> ListingReport<'a> {
    /// Creates a new listing report
    pub fn new(rows: &'a [ListingRow]) -> Self {
        Self { rows }
    }
}

impl<'a> fmt::Display for ListingReport<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows {
            writeln!(
                f,
                "{:6} vox={:10}  {}  | {}",
                row.kind_name(),
                row.vox_est,
                row.series_instance_uid,
                row.label
            )?;
        }
        Ok(())
    }
}

/// Text report for a finished conversion run
pub struct SummaryReport<'a> {
    summary: &'a ConversionSummary,
}

impl<'a> SummaryReport<'a> {
    pub fn new(summary: &'a ConversionSummary) -> Self {
        Self { summary }
    }
}

impl<'a> fmt::Display for SummaryReport<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for record in &self.summary.converted {
            writeln!(
                f,
                "{:6} {} <- {}",
                record.kind.simple_name(),
                record.file_stem,
                record.series_instance_uid
            )?;
        }
        write!(f, "Done. Output: {}", self.summary.output_dir.display())
    }
}
