pub mod report;

use crate::dataset::{PredictionColumns, DEFAULT_ID_COLUMN, DEFAULT_TEXT_COLUMN};
use crate::error::Result;
use crate::types::{ExtractionConfig, ReadFailurePolicy};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

/// Output path meaning "write to stdout"
pub const STDOUT_PATH: &str = "-";

/// Command-line arguments for mammolabel
#[derive(Parser, Debug)]
#[command(name = "mammolabel")]
#[command(about = "Extract BI-RADS and ACR density labels from free-text mammography reports")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build a ground-truth table from a directory of report files
    Reports(ReportsArgs),

    /// Extract labels from a model predictions CSV
    Predictions(PredictionsArgs),

    /// Extract labels from a single report (argument or stdin)
    Text(TextArgs),
}

/// Pattern window overrides
#[derive(Args, Debug, Clone, Default)]
pub struct PatternArgs {
    /// Max non-digit characters between a BI-RADS keyword and a loose number [default: 50]
    #[arg(long, value_name = "CHARS")]
    pub window: Option<usize>,

    /// Max characters between "Category N" and a following BI-RADS keyword [default: 20]
    #[arg(long, value_name = "CHARS")]
    pub category_window: Option<usize>,
}

impl PatternArgs {
    /// Applies the overrides on top of `config`
    pub fn apply(&self, mut config: ExtractionConfig) -> ExtractionConfig {
        if let Some(window) = self.window {
            config.proximity_window = window;
        }
        if let Some(window) = self.category_window {
            config.category_window = window;
        }
        config
    }
}

/// Table output options
#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// Output format
    #[arg(short, long, default_value = "csv")]
    pub format: OutputFormat,

    /// Print a summary of the extracted labels to stderr
    #[arg(long)]
    pub summary: bool,
}

#[derive(Args, Debug)]
pub struct ReportsArgs {
    /// Directory containing report text files (searched recursively)
    #[arg(value_name = "DIRECTORY")]
    pub directory: PathBuf,

    /// Output file, or "-" for stdout
    #[arg(short, long, default_value = "ground_truth.csv")]
    pub output: PathBuf,

    /// Report file name suffix [default: .txt]
    #[arg(long)]
    pub extension: Option<String>,

    /// What to do with unreadable or non-UTF-8 reports [default: abort]
    #[arg(long = "on-error")]
    pub on_error: Option<ReadFailurePolicyArg>,

    /// Sort reports by file name instead of filesystem order
    #[arg(long)]
    pub sort: bool,

    /// Read and extract reports in parallel
    #[arg(long)]
    pub parallel: bool,

    /// JSON configuration file (requires the 'json' feature)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub patterns: PatternArgs,

    #[command(flatten)]
    pub output_args: OutputArgs,
}

impl ReportsArgs {
    /// Builds the extraction configuration: config file first, flags on top
    pub fn extraction_config(&self) -> Result<ExtractionConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => ExtractionConfig::default(),
        };

        if let Some(extension) = &self.extension {
            config.extension = extension.clone();
        }
        if let Some(policy) = &self.on_error {
            config.read_failure_policy = policy.clone().into();
        }
        config.sort_paths |= self.sort;
        config.parallel |= self.parallel;

        let config = self.patterns.apply(config);
        config.validate()?;
        Ok(config)
    }
}

#[derive(Args, Debug)]
pub struct PredictionsArgs {
    /// Predictions CSV produced by the model runner
    #[arg(value_name = "CSV")]
    pub input: PathBuf,

    /// Output file, or "-" for stdout
    #[arg(short, long, default_value = "prediction_labels.csv")]
    pub output: PathBuf,

    /// Column identifying each row
    #[arg(long, default_value = DEFAULT_ID_COLUMN)]
    pub id_column: String,

    /// Column holding the generated report text
    #[arg(long, default_value = DEFAULT_TEXT_COLUMN)]
    pub text_column: String,

    #[command(flatten)]
    pub patterns: PatternArgs,

    #[command(flatten)]
    pub output_args: OutputArgs,
}

impl PredictionsArgs {
    /// Returns the column selection
    pub fn columns(&self) -> PredictionColumns {
        PredictionColumns {
            id_column: self.id_column.clone(),
            text_column: self.text_column.clone(),
        }
    }
}

#[derive(Args, Debug)]
pub struct TextArgs {
    /// Report text; read from stdin when omitted
    #[arg(value_name = "TEXT")]
    pub text: Option<String>,

    #[command(flatten)]
    pub patterns: PatternArgs,
}

/// Output format options
#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Comma-separated values with a header row
    Csv,
    /// JSON array of row objects
    Json,
}

/// Read failure policy options
#[derive(Debug, Clone, ValueEnum)]
pub enum ReadFailurePolicyArg {
    /// Stop at the first unreadable report
    Abort,
    /// Log and leave the report out
    Skip,
    /// Log and write a row with unknown labels
    Placeholder,
}

impl From<ReadFailurePolicyArg> for ReadFailurePolicy {
    fn from(arg: ReadFailurePolicyArg) -> Self {
        match arg {
            ReadFailurePolicyArg::Abort => ReadFailurePolicy::Abort,
            ReadFailurePolicyArg::Skip => ReadFailurePolicy::Skip,
            ReadFailurePolicyArg::Placeholder => ReadFailurePolicy::Placeholder,
        }
    }
}

/// Returns whether `path` designates stdout
pub fn is_stdout(path: &Path) -> bool {
    path.as_os_str() == STDOUT_PATH
}

#[cfg(feature = "json")]
fn load_config(path: &Path) -> Result<ExtractionConfig> {
    ExtractionConfig::from_json_file(path)
}

#[cfg(not(feature = "json"))]
fn load_config(path: &Path) -> Result<ExtractionConfig> {
    Err(crate::error::MammolabelError::InvalidConfig(format!(
        "cannot load {}: configuration files require the 'json' feature",
        path.display()
    )))
}
