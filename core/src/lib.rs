pub mod api;
pub mod cli;
pub mod dataset;
pub mod error;
pub mod extraction;
pub mod types;

#[cfg(feature = "python")]
mod python;

pub use api::{ReportExtractor, ReportLabels};
pub use cli::report::{SummaryReport, TextReport};
pub use dataset::{extract_directory, extract_predictions, ExtractionRecord, OutputTable};
pub use error::{MammolabelError, Result};
pub use extraction::{extract_acr, extract_birads};
pub use types::*;
