use crate::error::{MammolabelError, Result};
use crate::types::{ExtractionConfig, ReadFailurePolicy};
use log::{debug, warn};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Collects report files under `directory`, recursively
///
/// A file is a report if its name ends with `config.extension`
/// (case-sensitive). Symlinked directories are not descended into, but a
/// symlink that resolves to a regular file counts. Entries come back in walk
/// order, which depends on the filesystem unless `config.sort_paths` is set.
///
/// Unreadable subdirectories abort the walk under
/// [`ReadFailurePolicy::Abort`] and are logged and skipped otherwise.
///
/// # Errors
///
/// Returns [`MammolabelError::NotADirectory`] if `directory` is not a
/// directory.
pub fn collect_report_files(directory: &Path, config: &ExtractionConfig) -> Result<Vec<PathBuf>> {
    if !directory.is_dir() {
        return Err(MammolabelError::NotADirectory(directory.to_path_buf()));
    }

    let mut walker = WalkDir::new(directory).follow_links(false);
    if config.sort_paths {
        walker = walker.sort_by_file_name();
    }

    let mut files = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if config.read_failure_policy == ReadFailurePolicy::Abort => {
                return Err(e.into());
            }
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };

        // Resolve file symlinks; the walker itself never follows links
        if !entry.path().is_file() {
            debug!("Ignoring non-file entry: {}", entry.path().display());
            continue;
        }

        if entry
            .file_name()
            .to_string_lossy()
            .ends_with(config.extension.as_str())
        {
            files.push(entry.into_path());
        } else {
            debug!("Ignoring non-report file: {}", entry.path().display());
        }
    }

    Ok(files)
}
