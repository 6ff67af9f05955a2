use crate::api::{ReportExtractor, ReportLabels};
use crate::error::{MammolabelError, Result};
use crate::types::{AcrDensity, BiradsLabel};
use std::path::Path;

/// One output row: a report identifier and its extracted labels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionRecord {
    /// Path of the report (or other source identifier) as traversed
    pub report_path: String,

    /// BI-RADS assessment, `None` when unknown
    pub birads: Option<BiradsLabel>,

    /// ACR density grade, `None` when unknown
    pub acr: Option<AcrDensity>,
}

impl ExtractionRecord {
    /// Creates a record from already-extracted labels
    pub fn new(report_path: impl Into<String>, labels: ReportLabels) -> Self {
        Self {
            report_path: report_path.into(),
            birads: labels.birads,
            acr: labels.acr,
        }
    }

    /// Creates a record with both labels unknown
    pub fn unknown(report_path: impl Into<String>) -> Self {
        Self::new(report_path, ReportLabels::default())
    }

    /// Extracts a record from report text
    pub fn from_text(
        report_path: impl Into<String>,
        text: &str,
        extractor: &ReportExtractor,
    ) -> Self {
        Self::new(report_path, extractor.extract(text))
    }

    /// Reads a report file and extracts its labels
    ///
    /// # Errors
    ///
    /// Returns [`MammolabelError::ReadError`] if the file cannot be read and
    /// [`MammolabelError::DecodeError`] if it is not valid UTF-8.
    pub fn from_file(path: &Path, extractor: &ReportExtractor) -> Result<Self> {
        let text = read_report(path)?;
        Ok(Self::from_text(
            path.to_string_lossy(),
            &text,
            extractor,
        ))
    }

    /// Returns the BI-RADS field as written to the table (empty when unknown)
    pub fn birads_field(&self) -> String {
        self.birads.map(|b| b.to_string()).unwrap_or_default()
    }

    /// Returns the ACR field as written to the table (empty when unknown)
    pub fn acr_field(&self) -> String {
        self.acr.map(|a| a.to_string()).unwrap_or_default()
    }
}

/// Reads a whole report as UTF-8 text
///
/// Line endings are normalised: `\r\n` and a lone `\r` both become `\n`,
/// so line-bounded rules see the same breaks on every platform.
pub fn read_report(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|source| MammolabelError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8(bytes).map_err(|_| MammolabelError::DecodeError {
        path: path.to_path_buf(),
    })?;
    Ok(normalize_newlines(text))
}

fn normalize_newlines(text: String) -> String {
    if text.contains('\r') {
        text.replace("\r\n", "\n").replace('\r', "\n")
    } else {
        text
    }
}
