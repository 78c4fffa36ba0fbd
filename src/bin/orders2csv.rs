use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;

use anyhow::{Context, Result, anyhow};
use clap::{Args, Parser, Subcommand};
use order_pdf_to_csv::{
    PageSelection, ScrapeOptions, ScrapeReport, scrape_dir_to_csv, scrape_pdf_to_csv,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "orders2csv",
    version,
    about = "Extract order records from confirmation PDFs into CSV reports"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Extract orders and write the report sheets.
    Extract(ExtractArgs),
}

#[derive(Debug, Args)]
struct ExtractArgs {
    /// Input PDF file, or a directory of PDFs processed in name order.
    #[arg(short, long)]
    input: PathBuf,

    /// Output directory; one CSV file is written per report sheet.
    #[arg(short, long)]
    output: PathBuf,

    /// Page selection like 1-3,5 (single-document input only).
    #[arg(long)]
    pages: Option<String>,

    /// Output delimiter character.
    #[arg(long, default_value = ",")]
    delimiter: char,

    /// Enable verbose warning output.
    #[arg(short, long)]
    verbose: bool,
}

fn parse_options(args: &ExtractArgs) -> Result<ScrapeOptions> {
    let pages = args
        .pages
        .as_deref()
        .map(PageSelection::from_str)
        .transpose()
        .map_err(|error| anyhow!("invalid page selection: {error}"))
        .context("failed to parse --pages")?;

    if !args.delimiter.is_ascii() {
        anyhow::bail!("delimiter must be a single ASCII character");
    }

    Ok(ScrapeOptions {
        pages,
        delimiter: args.delimiter as u8,
        ..ScrapeOptions::default()
    })
}

fn log_report(report: &ScrapeReport, verbose: bool) {
    eprintln!(
        "{} order(s), {} line item(s) from {} document(s)",
        report.order_count, report.item_count, report.document_count
    );
    if report.warnings.is_empty() {
        return;
    }

    eprintln!("warning: {} issue(s) detected", report.warnings.len());
    if verbose {
        for warning in &report.warnings {
            eprintln!(
                "  - {:?} document={:?} order={:?} page={:?}: {}",
                warning.code, warning.document, warning.order_number, warning.page, warning.message
            );
        }
    }
}

fn run_extract(args: &ExtractArgs) -> Result<ScrapeReport> {
    let options = parse_options(args)?;
    if args.input.is_dir() && options.pages.is_some() {
        anyhow::bail!("--pages applies to a single document and cannot be combined with a directory input");
    }
    let report = if args.input.is_dir() {
        scrape_dir_to_csv(&args.input, &args.output, &options)
    } else {
        scrape_pdf_to_csv(&args.input, &args.output, &options)
    };
    report.with_context(|| format!("failed to extract orders from '{}'", args.input.display()))
}

fn main() -> ExitCode {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("order_pdf_to_csv=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Extract(args) => match run_extract(&args) {
            Ok(report) => {
                log_report(&report, args.verbose);
                if report.order_count > 0 {
                    ExitCode::SUCCESS
                } else {
                    ExitCode::from(2)
                }
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                ExitCode::from(1)
            }
        },
    }
}
