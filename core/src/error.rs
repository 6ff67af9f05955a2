use std::path::PathBuf;
use thiserror::Error;

/// Result type for mammolabel operations
pub type Result<T> = std::result::Result<T, MammolabelError>;

/// Error types for mammolabel operations
///
/// Label extraction itself never fails: an unmatched label is `None`.
/// These errors come from pattern construction and from the report I/O
/// around extraction.
#[derive(Error, Debug)]
pub enum MammolabelError {
    /// Report file could not be read
    #[error("Failed to read {}: {source}", .path.display())]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Report file is not valid UTF-8
    #[error("Report is not valid UTF-8: {}", .path.display())]
    DecodeError { path: PathBuf },

    /// Report root is missing or not a directory
    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// A configured window produced a pattern that does not compile
    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    /// Configuration value that cannot be used
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Input table lacks a required column
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// CSV reading or writing error
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// JSON serialization error
    #[cfg(feature = "json")]
    #[error("JSON error: {0}")]
    Json(String),

    /// I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<regex::Error> for MammolabelError {
    fn from(e: regex::Error) -> Self {
        MammolabelError::InvalidPattern(format!("{}", e))
    }
}

impl From<walkdir::Error> for MammolabelError {
    fn from(e: walkdir::Error) -> Self {
        match e.path().map(|p| p.to_path_buf()) {
            Some(path) => MammolabelError::ReadError {
                path,
                source: e.into(),
            },
            None => MammolabelError::IoError(e.into()),
        }
    }
}

impl MammolabelError {
    /// Returns whether this error concerns a single report file
    ///
    /// Only these errors are subject to the configured read failure policy.
    pub fn is_per_file(&self) -> bool {
        matches!(
            self,
            MammolabelError::ReadError { .. } | MammolabelError::DecodeError { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_error_message_names_path() {
        let err = MammolabelError::ReadError {
            path: PathBuf::from("reports/a.txt"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("reports/a.txt"));
        assert!(msg.contains("denied"));
        assert!(err.is_per_file());
    }

    #[test]
    fn test_regex_error_converts_to_invalid_pattern() {
        let err: MammolabelError = regex::Regex::new("(").unwrap_err().into();
        assert!(matches!(err, MammolabelError::InvalidPattern(_)));
        assert!(!err.is_per_file());
    }
}
