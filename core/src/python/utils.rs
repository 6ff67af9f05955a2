//! Utility functions for Python bindings conversions

use crate::dataset::ExtractionRecord;
use crate::types::BiradsLabel;
use pyo3::prelude::*;
use std::path::PathBuf;

/// Row tuple handed to Python: (report_path, birads, acr)
pub type PyRecord = (String, Option<PyObject>, Option<String>);

/// Converts a Python path-like object (str or pathlib.Path) to PathBuf
pub fn path_to_pathbuf(path: &Bound<'_, PyAny>) -> PyResult<PathBuf> {
    // Try to convert as string first
    if let Ok(s) = path.extract::<String>() {
        return Ok(PathBuf::from(s));
    }

    // Try to call __str__() for pathlib.Path objects
    if let Ok(s) = path.str() {
        let path_str: String = s.extract()?;
        return Ok(PathBuf::from(path_str));
    }

    Err(pyo3::exceptions::PyTypeError::new_err(
        "Path must be a string or path-like object",
    ))
}

/// Converts a BI-RADS label to a Python int, or a float when fractional
pub fn birads_to_py(py: Python, label: BiradsLabel) -> PyObject {
    match label {
        BiradsLabel::Integer(n) => n.into_py(py),
        BiradsLabel::Fraction { .. } => label.value().into_py(py),
    }
}

/// Converts a record to its Python tuple form
pub fn record_to_py(py: Python, record: ExtractionRecord) -> PyRecord {
    (
        record.report_path,
        record.birads.map(|b| birads_to_py(py, b)),
        record.acr.map(|a| a.to_string()),
    )
}
