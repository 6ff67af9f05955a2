use clap::Parser;
use log::{error, info};
use mammolabel_core::cli::{
    is_stdout, Cli, Command, OutputArgs, OutputFormat, PredictionsArgs, ReportsArgs, TextArgs,
};
use mammolabel_core::dataset::extract_predictions_file;
use mammolabel_core::{
    extract_directory, ExtractionConfig, OutputTable, ReportExtractor, Result, SummaryReport,
    TextReport,
};
use std::io::{self, Read, Write};
use std::path::Path;
use std::process;

fn main() {
    let cli = Cli::parse();

    // Setup logging
    setup_logging(cli.verbose);

    let result = match cli.command {
        Command::Reports(args) => run_reports(&args),
        Command::Predictions(args) => run_predictions(&args),
        Command::Text(args) => run_text(&args),
    };

    if let Err(e) = result {
        error!("{}", e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn setup_logging(verbose: bool) {
    if verbose {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }
}

fn run_reports(args: &ReportsArgs) -> Result<()> {
    let config = args.extraction_config()?;
    info!(
        "Using proximity window {} and read failure policy {}",
        config.proximity_window, config.read_failure_policy
    );

    let table = extract_directory(&args.directory, &config)?;
    write_table(&table, &args.output, &args.output_args)?;

    if !is_stdout(&args.output) {
        println!(
            "Saved {} report paths with extracted info to {}",
            table.len(),
            args.output.display()
        );
    }
    Ok(())
}

fn run_predictions(args: &PredictionsArgs) -> Result<()> {
    let config = args.patterns.apply(ExtractionConfig::default());
    let extractor = ReportExtractor::from_config(&config)?;

    info!("Processing predictions: {}", args.input.display());
    let table = extract_predictions_file(&args.input, &args.columns(), &extractor)?;
    write_table(&table, &args.output, &args.output_args)?;

    if !is_stdout(&args.output) {
        println!(
            "Saved {} predictions with extracted info to {}",
            table.len(),
            args.output.display()
        );
    }
    Ok(())
}

fn run_text(args: &TextArgs) -> Result<()> {
    let config = args.patterns.apply(ExtractionConfig::default());
    let extractor = ReportExtractor::from_config(&config)?;

    let text = match &args.text {
        Some(text) => text.clone(),
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let labels = extractor.extract(&text);
    println!("{}", TextReport::new(&labels));
    Ok(())
}

fn write_table(table: &OutputTable, output: &Path, options: &OutputArgs) -> Result<()> {
    match options.format {
        OutputFormat::Csv => {
            if is_stdout(output) {
                table.write_csv(io::stdout().lock())?;
            } else {
                table.write_csv_file(output)?;
            }
        }
        OutputFormat::Json => {
            #[cfg(feature = "json")]
            {
                let json = table.to_json_string()?;
                if is_stdout(output) {
                    writeln!(io::stdout().lock(), "{}", json)?;
                } else {
                    std::fs::write(output, json)?;
                }
            }
            #[cfg(not(feature = "json"))]
            {
                eprintln!("Error: JSON output requires the 'json' feature");
                eprintln!("Rebuild with: cargo build --features json");
                process::exit(1);
            }
        }
    }

    if options.summary {
        let mut stderr = io::stderr().lock();
        writeln!(stderr, "{}", SummaryReport::new(table))?;
    }

    Ok(())
}
