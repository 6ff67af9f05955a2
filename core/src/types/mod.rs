//! Core type definitions for report labels
//!
//! This module provides the fundamental types used throughout the mammolabel library:
//! - [`BiradsLabel`]: BI-RADS assessment, integral or with one fractional digit
//! - [`AcrDensity`]: ACR breast density letter grade (A-D)
//! - [`ExtractionConfig`]: Pattern windows and report traversal settings
//! - [`ReadFailurePolicy`]: Per-file handling of unreadable reports

mod birads;
mod config;
mod density;

pub use birads::{BiradsLabel, MAX_BIRADS_CATEGORY};
pub use config::{
    ExtractionConfig, ReadFailurePolicy, DEFAULT_CATEGORY_WINDOW, DEFAULT_PROXIMITY_WINDOW,
    DEFAULT_REPORT_EXTENSION,
};
pub use density::{AcrDensity, ACR_DENSITIES};
