//! Convert a PDF to an XLSX workbook.
//!
//! Usage:
//!   pdf2xlsx statement.pdf
//!   pdf2xlsx statement.pdf -o numbers.xlsx --columns 8
//!   pdf2xlsx statement.pdf --json

use clap::Parser;
use pdf2xlsx::{ConversionConfig, Converter};
use std::path::PathBuf;

/// Extract text, tables and numbers from a PDF into a single spreadsheet.
#[derive(Parser, Debug)]
#[command(name = "pdf2xlsx", version, about)]
struct Args {
    /// PDF file to convert
    input: PathBuf,

    /// Output workbook (defaults to the input path with an .xlsx extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Numbers per row in the extracted numbers section
    #[arg(long, default_value_t = 5)]
    columns: u32,

    /// Worksheet title
    #[arg(long, default_value = "Extracted Data")]
    sheet_name: String,

    /// Write table rows that are wider than their header instead of skipping the table
    #[arg(long)]
    allow_wide_rows: bool,

    /// Skip table detection and only extract page text
    #[arg(long)]
    no_tables: bool,

    /// Print the conversion outcome as JSON
    #[arg(long)]
    json: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| args.input.with_extension("xlsx"));

    let config = ConversionConfig::new()
        .with_numbers_per_row(args.columns)
        .with_sheet_name(args.sheet_name.clone())
        .with_allow_wide_rows(args.allow_wide_rows)
        .with_detect_tables(!args.no_tables);

    let outcome = Converter::new(config).convert_file(&args.input, &output);

    if args.json {
        match serde_json::to_string_pretty(&outcome) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Error: failed to serialize outcome: {}", e),
        }
    } else if outcome.success {
        println!("{}", outcome.message);
        if let Some(report) = &outcome.report {
            for table in report.skipped_tables() {
                if let pdf2xlsx::TableStatus::Skipped { reason } = &table.status {
                    println!(
                        "  skipped table {} on page {}: {}",
                        table.index, table.page, reason
                    );
                }
            }
        }
    } else {
        eprintln!("{}", outcome.message);
    }

    if !outcome.success {
        std::process::exit(1);
    }
}
