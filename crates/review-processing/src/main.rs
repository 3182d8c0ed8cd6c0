//! CLI entry point for the review preprocessing pipeline.

use anyhow::{Context, Result};
use clap::Parser;
use review_processing::{Pipeline, PipelineConfig, PipelineSummary, PreprocessingError};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, error};

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Cleaning and sentiment labeling for app review datasets",
    long_about = "Reads the raw review CSV, removes irrelevant columns, missing values, \
                  duplicates and thumbsUpCount outliers, adds a standardized \
                  thumbsUpCount_scaled column and a sentiment label, and writes the result.\n\n\
                  With no arguments the input is <exe dir>/../data_raw/ulasan_KAI.csv and the \
                  output is <exe dir>/data_clean/ulasan_KAI_preprocessing.csv.\n\n\
                  EXAMPLES:\n  \
                  # Fixed layout next to the executable\n  \
                  review-processing\n\n  \
                  # Explicit files, non-zero status on failure\n  \
                  review-processing --input raw.csv --output clean/out.csv --strict-exit-code"
)]
struct Args {
    /// Directory the default input and output paths are resolved against
    ///
    /// Defaults to the directory of the running executable
    #[arg(long)]
    base_dir: Option<PathBuf>,

    /// CSV file to read, overriding the default layout
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// CSV file to write, overriding the default layout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,

    /// Exit with a non-zero status when the pipeline fails
    ///
    /// 2 for a missing input file, 3 for a failed write, 1 otherwise.
    /// Without this flag a failure is only reported in the log.
    #[arg(long)]
    strict_exit_code: bool,

    /// Print the run summary as JSON to stdout instead of the text summary
    ///
    /// Disables all progress logs; only the JSON document is written.
    #[arg(long)]
    json: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is disabled so stdout only carries
/// the JSON document.
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

fn main() -> ExitCode {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    let config = match build_config(&args) {
        Ok(config) => config,
        Err(e) => {
            error!("Pipeline failed: {}", e);
            return finish_with_error(&e, &args, args.strict_exit_code);
        }
    };
    let strict = config.strict_exit_code;
    debug!("Configuration: {:?}", config);

    let pipeline = match Pipeline::builder().config(config).build() {
        Ok(pipeline) => pipeline,
        Err(e) => {
            let e = PreprocessingError::InvalidConfig(e.to_string());
            error!("Pipeline failed: {}", e);
            return finish_with_error(&e, &args, strict);
        }
    };

    // Run failures are logged by the pipeline itself
    match pipeline.run() {
        Ok(summary) => match print_summary(&summary, args.json) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                error!("Failed to print summary: {:#}", e);
                if strict { ExitCode::FAILURE } else { ExitCode::SUCCESS }
            }
        },
        Err(e) => finish_with_error(&e, &args, strict),
    }
}

/// Resolve the configuration from the CLI flags.
fn build_config(args: &Args) -> std::result::Result<PipelineConfig, PreprocessingError> {
    let mut builder = PipelineConfig::builder().strict_exit_code(args.strict_exit_code);

    if let Some(ref dir) = args.base_dir {
        builder = builder.base_dir(dir);
    }
    if let Some(ref input) = args.input {
        builder = builder.input_path(input);
    }
    if let Some(ref output) = args.output {
        builder = builder.output_path(output);
    }

    builder
        .build()
        .map_err(|e| PreprocessingError::InvalidConfig(e.to_string()))
}

/// JSON document printed instead of a summary when the run fails.
#[derive(Serialize)]
struct ErrorDocument<'a> {
    error: &'a PreprocessingError,
}

/// Emit the error document for `--json` and pick the exit status.
///
/// Status 0 unless strict exit codes are on.
fn finish_with_error(err: &PreprocessingError, args: &Args, strict: bool) -> ExitCode {
    if args.json {
        match serde_json::to_string_pretty(&ErrorDocument { error: err }) {
            Ok(doc) => println!("{}", doc),
            Err(e) => eprintln!("Failed to serialize error: {}", e),
        }
    }

    if strict {
        ExitCode::from(err.exit_code())
    } else {
        ExitCode::SUCCESS
    }
}

/// Print the run summary as JSON or as text.
///
/// Uses `println!` on purpose: this is the command's result, not a log line.
fn print_summary(summary: &PipelineSummary, json: bool) -> Result<()> {
    if json {
        let doc = serde_json::to_string_pretty(summary).context("Failed to serialize summary")?;
        println!("{}", doc);
        return Ok(());
    }

    let cleaning = &summary.cleaning;

    println!();
    println!("{}", "=".repeat(80));
    println!("PREPROCESSING COMPLETE");
    println!("{}", "=".repeat(80));
    println!();
    println!("Input:  {} ({} rows)", summary.input_path.display(), summary.rows_loaded);
    println!(
        "Output: {} ({} rows x {} columns)",
        summary.output_path.display(),
        summary.rows_saved,
        summary.columns.len()
    );
    println!();

    println!("Processing Summary:");
    println!("  Duration: {}ms", summary.duration_ms);
    if !cleaning.columns_dropped.is_empty() {
        println!("  Columns dropped: {}", cleaning.columns_dropped.join(", "));
    }
    println!("  Missing-value rows removed: {}", cleaning.missing_rows_removed);
    println!("  Duplicate rows removed: {}", cleaning.duplicates_removed);
    if let Some(outliers) = cleaning.outliers {
        println!(
            "  Outlier rows removed: {} (bounds [{:.3}, {:.3}])",
            outliers.rows_removed, outliers.lower_bound, outliers.upper_bound
        );
    }
    if let Some(scaling) = cleaning.scaling {
        println!(
            "  thumbsUpCount scaling: mean {:.3}, std {:.3}",
            scaling.mean, scaling.std_dev
        );
    }
    println!();

    if let Some(dist) = summary.sentiment {
        println!("Sentiment:");
        println!("  negative: {}", dist.negative);
        println!("  neutral:  {}", dist.neutral);
        println!("  positive: {}", dist.positive);
        if dist.unlabeled > 0 {
            println!("  unlabeled: {}", dist.unlabeled);
        }
        println!();
    }

    println!("Use --json for machine-readable output");
    println!("{}", "=".repeat(80));

    Ok(())
}
