//! Report collections and ground-truth tables
//!
//! Walks a report directory, runs both extractors over every report and
//! assembles the results into an [`OutputTable`].

mod predictions;
mod record;
mod table;
mod traversal;

pub use predictions::{
    extract_predictions, extract_predictions_file, PredictionColumns, DEFAULT_ID_COLUMN,
    DEFAULT_TEXT_COLUMN,
};
pub use record::{read_report, ExtractionRecord};
pub use table::{OutputTable, ACR_HEADER, BIRADS_HEADER, REPORT_PATH_HEADER};
pub use traversal::collect_report_files;

use crate::api::ReportExtractor;
use crate::error::Result;
use crate::types::{ExtractionConfig, ReadFailurePolicy};
use log::{info, warn};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// Builds the ground-truth table for every report under `directory`
///
/// # Example
///
/// ```no_run
/// use mammolabel_core::{extract_directory, ExtractionConfig};
/// use std::path::Path;
///
/// let table = extract_directory(Path::new("../Reports"), &ExtractionConfig::default())?;
/// table.write_csv_file(Path::new("dmid_gt.csv"))?;
/// # Ok::<(), mammolabel_core::MammolabelError>(())
/// ```
///
/// # Errors
///
/// Fails on an invalid configuration or report root, and on the first
/// unreadable report when the policy is [`ReadFailurePolicy::Abort`].
pub fn extract_directory(directory: &Path, config: &ExtractionConfig) -> Result<OutputTable> {
    config.validate()?;
    let extractor = ReportExtractor::from_config(config)?;

    info!("Processing directory: {}", directory.display());
    let files = collect_report_files(directory, config)?;
    info!("Found {} report files", files.len());

    extract_files(&files, &extractor, config.read_failure_policy, config.parallel)
}

/// Extracts one record per file, in the order given
///
/// With `parallel` set the files are read on the rayon pool; the output
/// order is the same either way.
pub fn extract_files(
    files: &[PathBuf],
    extractor: &ReportExtractor,
    policy: ReadFailurePolicy,
    parallel: bool,
) -> Result<OutputTable> {
    let process = |path: &PathBuf| extract_with_policy(path, extractor, policy);

    let rows: Vec<Option<ExtractionRecord>> = if parallel {
        files.par_iter().map(process).collect::<Result<_>>()?
    } else {
        files.iter().map(process).collect::<Result<_>>()?
    };

    let table: OutputTable = rows.into_iter().flatten().collect();
    info!("Extracted labels from {} reports", table.len());
    Ok(table)
}

/// Reads and extracts a single report, applying the read failure policy
///
/// Returns `Ok(None)` when the report is skipped.
fn extract_with_policy(
    path: &Path,
    extractor: &ReportExtractor,
    policy: ReadFailurePolicy,
) -> Result<Option<ExtractionRecord>> {
    match ExtractionRecord::from_file(path, extractor) {
        Ok(record) => Ok(Some(record)),
        Err(e) if !e.is_per_file() => Err(e),
        Err(e) => match policy {
            ReadFailurePolicy::Abort => Err(e),
            ReadFailurePolicy::Skip => {
                warn!("Skipping {}: {}", path.display(), e);
                Ok(None)
            }
            ReadFailurePolicy::Placeholder => {
                warn!("Recording {} with unknown labels: {}", path.display(), e);
                Ok(Some(ExtractionRecord::unknown(path.to_string_lossy())))
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MammolabelError;
    use crate::types::{AcrDensity, BiradsLabel};
    use std::fs;
    use tempfile::TempDir;

    fn write_reports(dir: &Path) {
        fs::write(
            dir.join("001.txt"),
            "Overall assessment: BI-RADS score is likely **4**. Density (ACR-B) noted.",
        )
        .unwrap();
        fs::write(dir.join("002.txt"), "No specific category mentioned.").unwrap();
        fs::create_dir(dir.join("sub")).unwrap();
        fs::write(
            dir.join("sub").join("003.txt"),
            "Category 3.5 BI-RADS pattern seen",
        )
        .unwrap();
        fs::write(dir.join("sub").join("003.png"), [0u8; 16]).unwrap();
    }

    fn labels_by_name(table: &OutputTable) -> Vec<(String, Option<BiradsLabel>, Option<AcrDensity>)> {
        table
            .iter()
            .map(|r| {
                let name = Path::new(&r.report_path)
                    .file_name()
                    .unwrap()
                    .to_string_lossy()
                    .to_string();
                (name, r.birads, r.acr)
            })
            .collect()
    }

    #[test]
    fn test_extract_directory_end_to_end() {
        let temp_dir = TempDir::new().unwrap();
        write_reports(temp_dir.path());

        let config = ExtractionConfig::default().sort_paths(true);
        let table = extract_directory(temp_dir.path(), &config).unwrap();

        assert_eq!(
            labels_by_name(&table),
            vec![
                (
                    "001.txt".to_string(),
                    Some(BiradsLabel::Integer(4)),
                    Some(AcrDensity::B)
                ),
                ("002.txt".to_string(), None, None),
                (
                    "003.txt".to_string(),
                    Some(BiradsLabel::Fraction {
                        whole: 3,
                        tenths: 5
                    }),
                    None
                ),
            ]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_extract_directory_reads_symlinked_report() {
        let temp_dir = TempDir::new().unwrap();
        let source_dir = TempDir::new().unwrap();
        let source = source_dir.path().join("shared.txt");
        fs::write(&source, "BI-RADS: 5 (ACR C)").unwrap();
        fs::write(temp_dir.path().join("plain.txt"), "BI-RADS: 1").unwrap();
        std::os::unix::fs::symlink(&source, temp_dir.path().join("linked.txt")).unwrap();

        let config = ExtractionConfig::default().sort_paths(true);
        let table = extract_directory(temp_dir.path(), &config).unwrap();

        assert_eq!(
            labels_by_name(&table),
            vec![
                (
                    "linked.txt".to_string(),
                    Some(BiradsLabel::Integer(5)),
                    Some(AcrDensity::C)
                ),
                ("plain.txt".to_string(), Some(BiradsLabel::Integer(1)), None),
            ]
        );
    }

    #[test]
    fn test_parallel_matches_sequential_order() {
        let temp_dir = TempDir::new().unwrap();
        for i in 0..40 {
            fs::write(
                temp_dir.path().join(format!("{:03}.txt", i)),
                format!("BI-RADS: {} (ACR A)", i % 7),
            )
            .unwrap();
        }

        let sequential_config = ExtractionConfig::default().sort_paths(true);
        let parallel_config = sequential_config.clone().parallel(true);

        let sequential = extract_directory(temp_dir.path(), &sequential_config).unwrap();
        let parallel = extract_directory(temp_dir.path(), &parallel_config).unwrap();

        assert_eq!(sequential.len(), 40);
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_read_failure_policies() {
        let temp_dir = TempDir::new().unwrap();
        let good = temp_dir.path().join("good.txt");
        let bad = temp_dir.path().join("bad.txt");
        fs::write(&good, "BIRADS=2").unwrap();
        fs::write(&bad, [0xc3, 0x28]).unwrap();
        let files = vec![good.clone(), bad.clone()];
        let extractor = ReportExtractor::new();

        let err = extract_files(&files, &extractor, ReadFailurePolicy::Abort, false).unwrap_err();
        assert!(matches!(err, MammolabelError::DecodeError { .. }));

        let skipped = extract_files(&files, &extractor, ReadFailurePolicy::Skip, false).unwrap();
        assert_eq!(skipped.len(), 1);
        assert_eq!(skipped.records()[0].birads, Some(BiradsLabel::Integer(2)));

        let placeholder =
            extract_files(&files, &extractor, ReadFailurePolicy::Placeholder, false).unwrap();
        assert_eq!(placeholder.len(), 2);
        assert_eq!(
            placeholder.records()[1],
            ExtractionRecord::unknown(bad.to_string_lossy())
        );
    }

    #[test]
    fn test_extract_directory_rejects_invalid_config() {
        let temp_dir = TempDir::new().unwrap();
        let config = ExtractionConfig::default().with_extension("");
        assert!(matches!(
            extract_directory(temp_dir.path(), &config),
            Err(MammolabelError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_extract_directory_csv_output() {
        let temp_dir = TempDir::new().unwrap();
        write_reports(temp_dir.path());

        let config = ExtractionConfig::default().sort_paths(true);
        let table = extract_directory(temp_dir.path(), &config).unwrap();

        let mut out = Vec::new();
        table.write_csv(&mut out).unwrap();
        let csv = String::from_utf8(out).unwrap();
        let lines: Vec<_> = csv.lines().collect();

        assert_eq!(lines[0], "report_path,birads,acr");
        assert!(lines[1].ends_with("001.txt,4,B"));
        assert!(lines[2].ends_with("002.txt,,"));
        assert!(lines[3].ends_with("003.txt,3.5,"));
    }
}
