use crate::error::Result;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use super::record::ExtractionRecord;

/// Header of the first column for report traversal output
pub const REPORT_PATH_HEADER: &str = "report_path";

/// Header of the BI-RADS column
pub const BIRADS_HEADER: &str = "birads";

/// Header of the ACR column
pub const ACR_HEADER: &str = "acr";

/// Ordered table of extraction records
///
/// Rows keep insertion order, which for directory extraction is the
/// traversal order.
///
/// # Example
///
/// ```
/// use mammolabel_core::{ExtractionRecord, OutputTable, ReportExtractor};
///
/// let extractor = ReportExtractor::new();
/// let mut table = OutputTable::new();
/// table.push(ExtractionRecord::from_text("a.txt", "BI-RADS: 3.5 (ACR C)", &extractor));
/// table.push(ExtractionRecord::from_text("b.txt", "nothing here", &extractor));
///
/// let mut out = Vec::new();
/// table.write_csv(&mut out).unwrap();
/// assert_eq!(
///     String::from_utf8(out).unwrap(),
///     "report_path,birads,acr\na.txt,3.5,C\nb.txt,,\n"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTable {
    key_header: String,
    records: Vec<ExtractionRecord>,
}

impl Default for OutputTable {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputTable {
    /// Creates an empty table keyed by `report_path`
    pub fn new() -> Self {
        Self::with_key_header(REPORT_PATH_HEADER)
    }

    /// Creates an empty table with a different first-column header
    pub fn with_key_header(header: impl Into<String>) -> Self {
        Self {
            key_header: header.into(),
            records: Vec::new(),
        }
    }

    /// Returns the three column headers in output order
    pub fn headers(&self) -> [&str; 3] {
        [self.key_header.as_str(), BIRADS_HEADER, ACR_HEADER]
    }

    /// Appends a record
    pub fn push(&mut self, record: ExtractionRecord) {
        self.records.push(record);
    }

    /// Returns the records in order
    pub fn records(&self) -> &[ExtractionRecord] {
        &self.records
    }

    /// Returns an iterator over the records
    pub fn iter(&self) -> std::slice::Iter<'_, ExtractionRecord> {
        self.records.iter()
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Checks if the table has no rows
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Writes the table as CSV with a header row
    ///
    /// Unknown labels become empty fields.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut writer = csv::Writer::from_writer(writer);
        writer.write_record(self.headers())?;

        for record in &self.records {
            writer.write_record([
                record.report_path.as_str(),
                record.birads_field().as_str(),
                record.acr_field().as_str(),
            ])?;
        }

        writer.flush()?;
        Ok(())
    }

    /// Writes the table as CSV to a file, replacing any existing file
    pub fn write_csv_file(&self, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        self.write_csv(file)
    }

    /// Serializes the table as a JSON array of row objects
    ///
    /// Unknown labels serialize as `null`; integral BI-RADS values as JSON
    /// integers and fractional ones as floats.
    #[cfg(feature = "json")]
    pub fn to_json_string(&self) -> Result<String> {
        let rows: Vec<serde_json::Value> = self
            .records
            .iter()
            .map(|r| {
                let mut row = serde_json::Map::new();
                row.insert(
                    self.key_header.clone(),
                    serde_json::Value::String(r.report_path.clone()),
                );
                row.insert(BIRADS_HEADER.to_string(), serde_json::json!(r.birads));
                row.insert(ACR_HEADER.to_string(), serde_json::json!(r.acr));
                serde_json::Value::Object(row)
            })
            .collect();

        serde_json::to_string_pretty(&rows)
            .map_err(|e| crate::error::MammolabelError::Json(e.to_string()))
    }
}

impl<'a> IntoIterator for &'a OutputTable {
    type Item = &'a ExtractionRecord;
    type IntoIter = std::slice::Iter<'a, ExtractionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl FromIterator<ExtractionRecord> for OutputTable {
    fn from_iter<I: IntoIterator<Item = ExtractionRecord>>(iter: I) -> Self {
        Self {
            key_header: REPORT_PATH_HEADER.to_string(),
            records: iter.into_iter().collect(),
        }
    }
}
