use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use paddock_tools::config::{DEFAULT_OUTPUT_DIR, DEFAULT_WORKBOOK, IngestConfig, TARGET_SEASON};
use paddock_tools::ingest::{self, ExportStatus};
use paddock_tools::validate::{self, ValidationReport};
use paddock_tools::{Result, ToolError};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = init_tracing().and_then(|()| run(cli)) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|err| ToolError::Logging(err.to_string()))
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Ingest(args) => execute_ingest(args),
        Command::Validate(args) => execute_validate(args),
    }
}

fn execute_ingest(args: IngestArgs) -> Result<()> {
    let config = IngestConfig::new(args.input, args.output, args.season);
    let report = ingest::ingest_workbook(&config)?;

    let written = report.written_files().count();
    let skipped = report
        .outcomes
        .iter()
        .filter(|outcome| matches!(outcome.status, ExportStatus::Skipped(_)))
        .count();
    let failed = report
        .outcomes
        .iter()
        .filter(|outcome| matches!(outcome.status, ExportStatus::Failed(_)))
        .count();
    info!(written, skipped, failed, "ingest finished");
    Ok(())
}

fn execute_validate(args: ValidateArgs) -> Result<()> {
    let report = validate::validate_output_dir(&args.dir);
    match args.format {
        ReportFormat::Text => print_text_report(&report),
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    if report.is_valid() {
        Ok(())
    } else {
        Err(ToolError::ValidationFailed(report.issues.len()))
    }
}

fn print_text_report(report: &ValidationReport) {
    for document in &report.checked {
        println!("{}: {} records", document.file, document.records);
    }
    for issue in &report.issues {
        match issue.index {
            Some(index) => println!("{}[{index}]: {}", issue.file, issue.message),
            None => println!("{}: {}", issue.file, issue.message),
        }
    }
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Normalise the championship database workbook into JSON documents."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Export every recognised sheet of the workbook as JSON.
    Ingest(IngestArgs),
    /// Check the shape of previously exported documents.
    Validate(ValidateArgs),
}

#[derive(clap::Args)]
struct IngestArgs {
    /// Workbook to read.
    #[arg(long, default_value = DEFAULT_WORKBOOK)]
    input: PathBuf,

    /// Directory receiving the JSON documents.
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    output: PathBuf,

    /// Season used by the calendar, rules, ratings, and contracts filters.
    #[arg(long, default_value_t = TARGET_SEASON)]
    season: i64,
}

#[derive(clap::Args)]
struct ValidateArgs {
    /// Directory holding the exported documents.
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    dir: PathBuf,

    /// Report format.
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    format: ReportFormat,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum ReportFormat {
    Text,
    Json,
}
