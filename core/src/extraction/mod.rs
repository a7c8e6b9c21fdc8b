pub mod header;
pub mod tags;

pub use header::{read_header, ImageRecord};
pub use tags::*;
