//! CLI entry point for the campaign cleaning pipeline.

use anyhow::{Result, anyhow};
use campaign_clean::{
    CleaningConfig, CleaningError, CleaningSummary, Pipeline, QualityAnalyzer,
};
use clap::Parser;
use polars::prelude::*;
use std::path::PathBuf;
use tracing::{error, info};

/// Clean the customer personality / marketing campaign dataset
#[derive(Parser, Debug)]
#[command(name = "campaign-clean")]
#[command(version)]
#[command(about = "Clean the customer marketing campaign dataset")]
#[command(
    long_about = "Loads a delimited customer table, fills missing values, removes duplicate \
                  rows, standardizes categorical text, decomposes the enrolment date, caps \
                  outliers with the IQR method, derives Age and Total_Spending, then writes \
                  the cleaned CSV and a markdown summary.",
    after_help = "EXAMPLES:\n  \
                  # Clean with the default file names in the current directory\n  \
                  campaign-clean\n\n  \
                  # Explicit paths\n  \
                  campaign-clean -i data/marketing_campaign.csv -o out/cleaned.csv -r out/summary.md\n\n  \
                  # Preview the quality issues without writing anything\n  \
                  campaign-clean -i data.csv --dry-run\n\n  \
                  # Machine-readable summary\n  \
                  campaign-clean --json | jq .outliers"
)]
struct Args {
    /// JSON configuration file; flags given on the command line override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Path to the delimited input file
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Path of the cleaned CSV
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Path of the markdown cleaning summary
    #[arg(short, long)]
    report: Option<PathBuf>,

    /// Year that birth years are subtracted from to derive Age
    #[arg(long)]
    reference_year: Option<i32>,

    /// Field separator of the input file
    #[arg(long)]
    separator: Option<char>,

    /// Also write the summary as JSON to this path
    #[arg(long)]
    json_report: Option<PathBuf>,

    /// Load the input and show its quality issues without cleaning or writing
    #[arg(long)]
    dry_run: bool,

    /// Print the summary as JSON to stdout instead of logging
    ///
    /// Disables all logs; failures are printed as a JSON error object.
    #[arg(long)]
    json: bool,

    /// Only show warnings and errors
    #[arg(short, long)]
    quiet: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// only JSON is written to stdout.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Defaults, then the config file, then explicit flags.
fn resolve_config(args: &Args) -> std::result::Result<CleaningConfig, CleaningError> {
    let base = match &args.config {
        Some(path) => CleaningConfig::from_json_file(path)?,
        None => CleaningConfig::default(),
    };

    let mut builder = CleaningConfig::builder().base(base);
    if let Some(path) = &args.input {
        builder = builder.input_path(path);
    }
    if let Some(path) = &args.output {
        builder = builder.output_path(path);
    }
    if let Some(path) = &args.report {
        builder = builder.report_path(path);
    }
    if let Some(year) = args.reference_year {
        builder = builder.reference_year(year);
    }
    if let Some(separator) = args.separator {
        builder = builder.separator(separator);
    }
    if let Some(path) = &args.json_report {
        builder = builder.json_report_path(path);
    }

    builder
        .build()
        .map_err(|e| CleaningError::InvalidConfig(e.to_string()))
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    match execute(&args) {
        Ok(()) => Ok(()),
        Err(e) => {
            if args.json {
                println!("{}", error_json(&e)?);
            } else {
                error!("{}", e);
            }
            Err(anyhow!(e))
        }
    }
}

/// JSON object printed for a failure under `--json`.
fn error_json(e: &CleaningError) -> serde_json::Result<String> {
    serde_json::to_string_pretty(e)
}

fn execute(args: &Args) -> std::result::Result<(), CleaningError> {
    let config = resolve_config(args)?;
    let pipeline = Pipeline::builder().config(config).build()?;

    if args.dry_run {
        let data = pipeline.load()?;
        return run_dry_run(&pipeline, &data);
    }

    info!("{}", "=".repeat(60));
    info!("Starting customer campaign data cleaning...");
    info!("{}", "=".repeat(60));

    let result = pipeline.run()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result.summary)?);
    } else if !args.quiet {
        print_human_readable_summary(&pipeline, &result.summary);
    }

    Ok(())
}

/// Show the quality snapshot that cleaning would start from.
///
/// Uses `println!` for user-facing output, independent of the log level.
fn run_dry_run(pipeline: &Pipeline, data: &DataFrame) -> std::result::Result<(), CleaningError> {
    let report = QualityAnalyzer::analyze(data)?;
    let config = pipeline.config();

    println!("\n{}", "=".repeat(60));
    println!("DRY RUN - Data quality preview");
    println!("{}\n", "=".repeat(60));

    println!("  File: {}", config.input_path.display());
    println!("  Rows: {}", report.rows);
    println!("  Columns: {}", report.columns);
    println!("  Duplicate rows: {}", report.duplicate_count);
    println!();

    println!("Missing values per column:");
    for column in &report.missing_counts {
        println!("  {:<24} {}", column.name, column.missing_count);
    }
    println!();

    println!("Would write:");
    println!("  {}", config.output_path.display());
    println!("  {}", config.report_path.display());
    if let Some(path) = &config.json_report_path {
        println!("  {}", path.display());
    }
    println!("{}", "=".repeat(60));

    Ok(())
}

fn print_human_readable_summary(pipeline: &Pipeline, summary: &CleaningSummary) {
    let config = pipeline.config();

    println!();
    println!("{}", "=".repeat(60));
    println!("CLEANING COMPLETE");
    println!("{}", "=".repeat(60));
    println!(
        "Input:  {} ({} rows x {} columns)",
        config.input_path.display(),
        summary.original_rows,
        summary.original_columns
    );
    println!(
        "Output: {} ({} rows x {} columns)",
        config.output_path.display(),
        summary.final_rows,
        summary.final_columns
    );
    println!("Summary: {}", config.report_path.display());
    println!();
    println!("  Duration: {}ms", summary.duration_ms);
    println!("  Columns imputed: {}", summary.imputations.len());
    println!("  Duplicates removed: {}", summary.deduplication.removed());
    println!(
        "  Outliers capped: {} in {} columns",
        summary.total_outliers(),
        summary.outliers.len()
    );
    if !summary.skipped_stages.is_empty() {
        println!("  Skipped: {}", summary.skipped_stages.join(", "));
    }
    println!("{}", "=".repeat(60));
}
