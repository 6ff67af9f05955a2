use crate::error::{MammolabelError, Result};
use std::fmt;

/// Default number of non-digit characters the loose-proximity rule scans
/// after a BI-RADS keyword
pub const DEFAULT_PROXIMITY_WINDOW: usize = 50;

/// Default gap allowed between "Category N" and the BI-RADS keyword
pub const DEFAULT_CATEGORY_WINDOW: usize = 20;

/// Default report file name suffix
pub const DEFAULT_REPORT_EXTENSION: &str = ".txt";

/// What to do when a report file cannot be read or is not valid UTF-8
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "json", serde(rename_all = "lowercase"))]
pub enum ReadFailurePolicy {
    /// Stop the whole run and return the error
    #[default]
    Abort,

    /// Log a warning and leave the file out of the table
    Skip,

    /// Log a warning and emit a row with both labels unknown
    Placeholder,
}

impl ReadFailurePolicy {
    /// Returns simple name for display
    pub fn simple_name(&self) -> &'static str {
        match self {
            ReadFailurePolicy::Abort => "abort",
            ReadFailurePolicy::Skip => "skip",
            ReadFailurePolicy::Placeholder => "placeholder",
        }
    }

    /// Parses a policy name ("abort", "skip", "placeholder")
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "abort" => Ok(ReadFailurePolicy::Abort),
            "skip" => Ok(ReadFailurePolicy::Skip),
            "placeholder" => Ok(ReadFailurePolicy::Placeholder),
            other => Err(MammolabelError::InvalidConfig(format!(
                "unknown read failure policy '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for ReadFailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.simple_name())
    }
}

/// Configuration for label extraction over a report collection
///
/// # Example
///
/// ```
/// use mammolabel_core::{ExtractionConfig, ReadFailurePolicy};
///
/// let config = ExtractionConfig::default()
///     .with_proximity_window(30)
///     .with_read_failure_policy(ReadFailurePolicy::Skip)
///     .sort_paths(true);
///
/// assert_eq!(config.proximity_window, 30);
/// assert_eq!(config.extension, ".txt");
/// assert!(config.sort_paths);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "json", serde(default))]
pub struct ExtractionConfig {
    /// Maximum run of non-digit characters between a BI-RADS keyword and
    /// the number picked up by the loose-proximity rule
    pub proximity_window: usize,

    /// Maximum gap between "Category N" and a following BI-RADS keyword
    pub category_window: usize,

    /// File name suffix identifying report files (case-sensitive)
    pub extension: String,

    /// Per-file policy for unreadable or non-UTF-8 reports
    pub read_failure_policy: ReadFailurePolicy,

    /// Sort directory entries by file name for reproducible row order
    pub sort_paths: bool,

    /// Extract reports on the rayon thread pool
    pub parallel: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            proximity_window: DEFAULT_PROXIMITY_WINDOW,
            category_window: DEFAULT_CATEGORY_WINDOW,
            extension: DEFAULT_REPORT_EXTENSION.to_string(),
            read_failure_policy: ReadFailurePolicy::default(),
            sort_paths: false,
            parallel: false,
        }
    }
}

impl ExtractionConfig {
    /// Builder: Set the loose-proximity window
    pub fn with_proximity_window(mut self, window: usize) -> Self {
        self.proximity_window = window;
        self
    }

    /// Builder: Set the category-first window
    pub fn with_category_window(mut self, window: usize) -> Self {
        self.category_window = window;
        self
    }

    /// Builder: Set the report file suffix
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Builder: Set the read failure policy
    pub fn with_read_failure_policy(mut self, policy: ReadFailurePolicy) -> Self {
        self.read_failure_policy = policy;
        self
    }

    /// Builder: Sort traversal by file name
    pub fn sort_paths(mut self, sort: bool) -> Self {
        self.sort_paths = sort;
        self
    }

    /// Builder: Extract in parallel
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Returns whether the default pattern windows are in use
    pub fn uses_default_windows(&self) -> bool {
        self.proximity_window == DEFAULT_PROXIMITY_WINDOW
            && self.category_window == DEFAULT_CATEGORY_WINDOW
    }

    /// Checks the configuration for values that cannot work
    ///
    /// # Errors
    ///
    /// Returns [`MammolabelError::InvalidConfig`] if the extension is empty
    pub fn validate(&self) -> Result<()> {
        if self.extension.is_empty() {
            return Err(MammolabelError::InvalidConfig(
                "report extension must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Loads a configuration from a JSON file
    ///
    /// Missing fields fall back to their defaults.
    #[cfg(feature = "json")]
    pub fn from_json_file(path: &std::path::Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| MammolabelError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self =
            serde_json::from_str(&text).map_err(|e| MammolabelError::Json(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}
