//! Python functions for report label extraction

use pyo3::prelude::*;

use super::errors::convert_error;
use super::utils::{birads_to_py, path_to_pathbuf, record_to_py, PyRecord};
use crate::api::ReportExtractor;
use crate::dataset::ExtractionRecord;
use crate::types::{ExtractionConfig, ReadFailurePolicy, DEFAULT_REPORT_EXTENSION};

/// Extract the BI-RADS score from report text
///
/// Args:
///     text: Report text
///
/// Returns:
///     int | float | None: The score, a float only when written with a decimal
///
/// Example:
///     >>> from mammolabel import extract_birads
///     >>> extract_birads("BI-RADS: 3.5")
///     3.5
#[pyfunction]
#[pyo3(name = "extract_birads")]
pub fn py_extract_birads(py: Python, text: &str) -> Option<PyObject> {
    crate::extraction::extract_birads(text).map(|label| birads_to_py(py, label))
}

/// Extract the ACR density letter from report text
///
/// Args:
///     text: Report text
///
/// Returns:
///     str | None: "A", "B", "C" or "D"
#[pyfunction]
#[pyo3(name = "extract_acr")]
pub fn py_extract_acr(text: &str) -> Option<String> {
    crate::extraction::extract_acr(text).map(|d| d.to_string())
}

/// Read a report file and extract both labels
///
/// Args:
///     path: Path to the report (str or pathlib.Path)
///
/// Returns:
///     tuple: (report_path, birads, acr)
///
/// Raises:
///     ReportReadError: If the file cannot be read or is not UTF-8
#[pyfunction]
#[pyo3(name = "extract_report")]
pub fn py_extract_report(py: Python, path: &Bound<'_, PyAny>) -> PyResult<PyRecord> {
    let path_buf = path_to_pathbuf(path)?;
    let record = ExtractionRecord::from_file(&path_buf, &ReportExtractor::new())
        .map_err(convert_error)?;
    Ok(record_to_py(py, record))
}

/// Extract labels from every report under a directory
///
/// Args:
///     path: Report directory (str or pathlib.Path)
///     extension: Report file name suffix (default: ".txt")
///     on_error: "abort", "skip" or "placeholder" (default: "abort")
///     window: Loose-proximity window in characters (default: 50)
///     sort: Sort reports by file name (default: False)
///     parallel: Extract on multiple threads (default: False)
///
/// Returns:
///     list[tuple]: (report_path, birads, acr) rows in traversal order
///
/// Raises:
///     ReportReadError: If the directory or a report cannot be read
///     InvalidPatternError: If the window is too large
///     ValueError: If on_error or extension is invalid
#[pyfunction]
#[pyo3(
    name = "extract_directory",
    signature = (path, extension=DEFAULT_REPORT_EXTENSION, on_error="abort", window=50, sort=false, parallel=false)
)]
pub fn py_extract_directory(
    py: Python,
    path: &Bound<'_, PyAny>,
    extension: &str,
    on_error: &str,
    window: usize,
    sort: bool,
    parallel: bool,
) -> PyResult<Vec<PyRecord>> {
    let path_buf = path_to_pathbuf(path)?;
    let config = ExtractionConfig::default()
        .with_extension(extension)
        .with_read_failure_policy(ReadFailurePolicy::from_str(on_error).map_err(convert_error)?)
        .with_proximity_window(window)
        .sort_paths(sort)
        .parallel(parallel);

    let table = py
        .allow_threads(|| crate::dataset::extract_directory(&path_buf, &config))
        .map_err(convert_error)?;

    Ok(table
        .records()
        .iter()
        .cloned()
        .map(|record| record_to_py(py, record))
        .collect())
}
