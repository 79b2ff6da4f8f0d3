//! CSV loading of named time series for the warpskill pipeline.

mod domain;
mod error;
mod reader;

pub use domain::{SeriesId, SeriesTable};
pub use error::IoError;
pub use reader::SeriesReader;
