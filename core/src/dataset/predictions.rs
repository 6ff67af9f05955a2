use crate::api::ReportExtractor;
use crate::error::{MammolabelError, Result};
use log::{debug, info};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::record::ExtractionRecord;
use super::table::OutputTable;

/// Default identifier column of a model predictions table
pub const DEFAULT_ID_COLUMN: &str = "image_path";

/// Default free-text column of a model predictions table
pub const DEFAULT_TEXT_COLUMN: &str = "prediction";

/// Column selection for a predictions table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictionColumns {
    /// Column copied verbatim into the first output column
    pub id_column: String,
    /// Column holding the generated report text
    pub text_column: String,
}

impl Default for PredictionColumns {
    fn default() -> Self {
        Self {
            id_column: DEFAULT_ID_COLUMN.to_string(),
            text_column: DEFAULT_TEXT_COLUMN.to_string(),
        }
    }
}

/// Extracts labels from every row of a model predictions CSV
///
/// The input is a headered CSV such as `image_path,prompt,prediction`.
/// Each row's text column goes through both extractors; the output table
/// is keyed by the id column and keeps row order. Rows where the model run
/// failed carry an error marker instead of a report and come out with
/// unknown labels like any other unmatched text.
///
/// # Errors
///
/// Returns [`MammolabelError::MissingColumn`] if either column is absent
/// from the header, or a CSV error for malformed input.
pub fn extract_predictions<R: Read>(
    reader: R,
    columns: &PredictionColumns,
    extractor: &ReportExtractor,
) -> Result<OutputTable> {
    let mut reader = csv::Reader::from_reader(reader);
    let headers = reader.headers()?.clone();

    let column_index = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| MammolabelError::MissingColumn(name.to_string()))
    };
    let id_index = column_index(&columns.id_column)?;
    let text_index = column_index(&columns.text_column)?;

    let mut table = OutputTable::with_key_header(columns.id_column.as_str());
    for row in reader.records() {
        let row = row?;
        let id = row.get(id_index).unwrap_or_default();
        let text = row.get(text_index).unwrap_or_default();
        debug!("Extracting labels for {}", id);
        table.push(ExtractionRecord::from_text(id, text, extractor));
    }

    info!("Extracted labels from {} predictions", table.len());
    Ok(table)
}

/// Extracts labels from a predictions CSV file
pub fn extract_predictions_file(
    path: &Path,
    columns: &PredictionColumns,
    extractor: &ReportExtractor,
) -> Result<OutputTable> {
    let file = File::open(path).map_err(|source| MammolabelError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;
    extract_predictions(file, columns, extractor)
}
