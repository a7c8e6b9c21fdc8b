//! Best-series selection
//!
//! Filters the indexed series down to valid candidates for a requested kind
//! and picks one winner per kind by estimated acquired volume.

mod best;
mod plan;

pub use best::{candidates, select_best};
pub use plan::{SelectionPlan, SelectionRequest};
