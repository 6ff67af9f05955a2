//! Python bindings for mammolabel
//!
//! This module provides PyO3 bindings so Python pipelines can extract
//! report labels with the same int/float/None results as plain Python.

// Suppress false positive warnings from PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use pyo3::prelude::*;

mod errors;
mod extractor;
mod utils;

pub use errors::*;
pub use extractor::*;

/// Python module definition
#[pymodule]
fn _mammolabel(py: Python, m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Register exception classes
    m.add(
        "MammolabelError",
        py.get_type_bound::<errors::PyMammolabelError>(),
    )?;
    m.add(
        "ReportReadError",
        py.get_type_bound::<errors::PyReportReadError>(),
    )?;
    m.add(
        "InvalidPatternError",
        py.get_type_bound::<errors::PyInvalidPatternError>(),
    )?;

    // Register functions
    m.add_function(wrap_pyfunction!(py_extract_birads, m)?)?;
    m.add_function(wrap_pyfunction!(py_extract_acr, m)?)?;
    m.add_function(wrap_pyfunction!(py_extract_report, m)?)?;
    m.add_function(wrap_pyfunction!(py_extract_directory, m)?)?;

    // Add version
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    Ok(())
}
