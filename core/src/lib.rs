pub mod api;
pub mod classify;
pub mod cli;
pub mod convert;
pub mod error;
pub mod extraction;
pub mod index;
pub mod selection;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use api::{ListingRow, SeriesSelector};
pub use classify::Classifier;
pub use cli::report::{ListingReport, SummaryReport};
pub use convert::{
    ConversionRecord, ConversionSummary, Converter, ConverterOptions, Orchestrator, OutputLayout,
};
pub use error::{NeuroselectError, Result};
pub use extraction::{read_header, ImageRecord};
pub use index::{IndexOptions, SeriesIndex, SeriesIndexer, SeriesRecord};
pub use selection::{candidates, select_best, SelectionPlan, SelectionRequest};
pub use types::*;
