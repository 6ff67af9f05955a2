//! Python exception types for mammolabel
//!
//! This module defines Python exception classes that map to Rust error types.

// Suppress warnings from PyO3's create_exception! macro about gil-refs feature
#![allow(unexpected_cfgs)]

use crate::error::MammolabelError;
use pyo3::{create_exception, exceptions::PyException, prelude::*};

// Base exception
create_exception!(
    mammolabel,
    PyMammolabelError,
    PyException,
    "Base exception for all mammolabel errors"
);

// Specific exceptions
create_exception!(
    mammolabel,
    PyReportReadError,
    PyMammolabelError,
    "Report file could not be read or is not valid UTF-8"
);

create_exception!(
    mammolabel,
    PyInvalidPatternError,
    PyMammolabelError,
    "Configured window produced a pattern that does not compile"
);

/// Convert Rust MammolabelError to appropriate Python exception
pub fn convert_error(err: MammolabelError) -> PyErr {
    match err {
        MammolabelError::ReadError { .. }
        | MammolabelError::DecodeError { .. }
        | MammolabelError::NotADirectory(_) => PyReportReadError::new_err(err.to_string()),
        MammolabelError::InvalidPattern(msg) => PyInvalidPatternError::new_err(msg),
        MammolabelError::InvalidConfig(msg) => {
            pyo3::exceptions::PyValueError::new_err(msg)
        }
        other => PyMammolabelError::new_err(other.to_string()),
    }
}
