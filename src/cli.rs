use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::MatchPolicy;

#[derive(Debug, Parser)]
#[command(author, version, about = "Remap order barcodes and split orders into weekday buckets", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Remap barcodes, split the order file by weekday, and write one CSV per bucket
    Split(SplitArgs),
    /// Apply only the barcode mapping and write a single CSV
    Remap(RemapArgs),
    /// Run the pipeline without writing files and print per-bucket row counts
    Summary(SummaryArgs),
    /// Preview the first few rows of a CSV file in a formatted table
    Preview(PreviewArgs),
}

#[derive(Debug, Args)]
pub struct SplitArgs {
    /// Order CSV file to process
    #[arg(short = 'i', long = "order")]
    pub order: PathBuf,
    /// Barcode mapping CSV file (first column = new value, second = old value)
    #[arg(long = "mapping")]
    pub mapping: PathBuf,
    /// Shop schedule CSV file (shop and weekday columns)
    #[arg(long = "schedule")]
    pub schedule: PathBuf,
    /// Directory the per-bucket CSV files are written into
    #[arg(short = 'o', long = "out-dir", default_value = ".")]
    pub out_dir: PathBuf,
    /// Prefix prepended to every output file name
    #[arg(long, default_value = "")]
    pub prefix: String,
    /// YAML file locking column selections ahead of time
    #[arg(long = "columns-file")]
    pub columns_file: Option<PathBuf>,
    /// Name of the order's barcode column
    #[arg(long = "barcode-column")]
    pub barcode_column: Option<String>,
    /// Name of the order's shop column
    #[arg(long = "shop-column")]
    pub shop_column: Option<String>,
    /// Name of the schedule's shop column
    #[arg(long = "schedule-shop-column")]
    pub schedule_shop_column: Option<String>,
    /// Name of the schedule's weekday column
    #[arg(long = "schedule-day-column")]
    pub schedule_day_column: Option<String>,
    /// Barcode key matching policy (exact or ignore-case)
    #[arg(long = "barcode-match", value_enum)]
    pub barcode_match: Option<MatchPolicy>,
    /// Shop key matching policy (exact or ignore-case)
    #[arg(long = "shop-match", value_enum)]
    pub shop_match: Option<MatchPolicy>,
    /// Drop these columns from the exported files when present
    #[arg(long = "drop-column", action = clap::ArgAction::Append)]
    pub drop_columns: Vec<String>,
    /// Move the first column to the last position in exported files
    #[arg(long = "rotate-first-column")]
    pub rotate_first_column: bool,
    /// Use Georgian weekday names in output file names
    #[arg(long = "georgian-days")]
    pub georgian_days: bool,
    /// Append today's date to output file names
    #[arg(long)]
    pub datestamp: bool,
    /// Write empty buckets too instead of skipping them
    #[arg(long = "write-empty")]
    pub write_empty: bool,
    /// Print the per-bucket summary as an elastic table after splitting
    #[arg(long = "table")]
    pub table: bool,
    /// CSV delimiter character for all inputs (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Delimiter for output files (defaults to the order file's delimiter)
    #[arg(long = "output-delimiter", value_parser = parse_delimiter)]
    pub output_delimiter: Option<u8>,
    /// Character encoding of the order file (defaults to utf-8)
    #[arg(long = "order-encoding")]
    pub order_encoding: Option<String>,
    /// Character encoding of the mapping file (defaults to utf-8)
    #[arg(long = "mapping-encoding")]
    pub mapping_encoding: Option<String>,
    /// Character encoding of the schedule file (defaults to utf-8)
    #[arg(long = "schedule-encoding")]
    pub schedule_encoding: Option<String>,
}

#[derive(Debug, Args)]
pub struct RemapArgs {
    /// Order CSV file to process
    #[arg(short = 'i', long = "order")]
    pub order: PathBuf,
    /// Barcode mapping CSV file (first column = new value, second = old value)
    #[arg(long = "mapping")]
    pub mapping: PathBuf,
    /// Output CSV file (stdout if omitted)
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
    /// YAML file locking column selections ahead of time
    #[arg(long = "columns-file")]
    pub columns_file: Option<PathBuf>,
    /// Name of the order's barcode column
    #[arg(long = "barcode-column")]
    pub barcode_column: Option<String>,
    /// Barcode key matching policy (exact or ignore-case)
    #[arg(long = "barcode-match", value_enum)]
    pub barcode_match: Option<MatchPolicy>,
    /// CSV delimiter character for inputs (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Delimiter for the output (defaults to the order file's delimiter)
    #[arg(long = "output-delimiter", value_parser = parse_delimiter)]
    pub output_delimiter: Option<u8>,
    /// Character encoding of the order file (defaults to utf-8)
    #[arg(long = "order-encoding")]
    pub order_encoding: Option<String>,
    /// Character encoding of the mapping file (defaults to utf-8)
    #[arg(long = "mapping-encoding")]
    pub mapping_encoding: Option<String>,
}

#[derive(Debug, Args)]
pub struct SummaryArgs {
    /// Order CSV file to process
    #[arg(short = 'i', long = "order")]
    pub order: PathBuf,
    /// Barcode mapping CSV file (first column = new value, second = old value)
    #[arg(long = "mapping")]
    pub mapping: PathBuf,
    /// Shop schedule CSV file (shop and weekday columns)
    #[arg(long = "schedule")]
    pub schedule: PathBuf,
    /// YAML file locking column selections ahead of time
    #[arg(long = "columns-file")]
    pub columns_file: Option<PathBuf>,
    /// Name of the order's barcode column
    #[arg(long = "barcode-column")]
    pub barcode_column: Option<String>,
    /// Name of the order's shop column
    #[arg(long = "shop-column")]
    pub shop_column: Option<String>,
    /// Name of the schedule's shop column
    #[arg(long = "schedule-shop-column")]
    pub schedule_shop_column: Option<String>,
    /// Name of the schedule's weekday column
    #[arg(long = "schedule-day-column")]
    pub schedule_day_column: Option<String>,
    /// Barcode key matching policy (exact or ignore-case)
    #[arg(long = "barcode-match", value_enum)]
    pub barcode_match: Option<MatchPolicy>,
    /// Shop key matching policy (exact or ignore-case)
    #[arg(long = "shop-match", value_enum)]
    pub shop_match: Option<MatchPolicy>,
    /// CSV delimiter character for all inputs (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the order file (defaults to utf-8)
    #[arg(long = "order-encoding")]
    pub order_encoding: Option<String>,
    /// Character encoding of the mapping file (defaults to utf-8)
    #[arg(long = "mapping-encoding")]
    pub mapping_encoding: Option<String>,
    /// Character encoding of the schedule file (defaults to utf-8)
    #[arg(long = "schedule-encoding")]
    pub schedule_encoding: Option<String>,
}

#[derive(Debug, Args)]
pub struct PreviewArgs {
    /// Input CSV file to preview
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Number of rows to display
    #[arg(long, default_value_t = 10)]
    pub rows: usize,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
}

pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\t" => Ok(b'\t'),
        "comma" | "," => Ok(b','),
        "|" | "pipe" => Ok(b'|'),
        ";" | "semicolon" => Ok(b';'),
        other => {
            let mut chars = other.chars();
            let first = chars
                .next()
                .ok_or_else(|| "Delimiter cannot be empty".to_string())?;
            if chars.next().is_some() {
                return Err("Delimiter must be a single character".to_string());
            }
            if !first.is_ascii() {
                return Err("Delimiter must be ASCII".to_string());
            }
            Ok(first as u8)
        }
    }
}
