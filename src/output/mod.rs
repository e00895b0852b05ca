//! Output formatting module.
//!
//! Provides formatters for plain text, JSON, and CSV output of scan
//! outcomes and tool listings.

mod csv_format;
mod json_format;
mod plain;

pub use csv_format::{print_csv, write_tools_csv};
pub use json_format::{print_json, OutcomeView};
pub use plain::{
    print_error, print_info, print_plain, print_scan_header, print_sources, print_success,
    print_warning,
};

use crate::cli::OutputFormat;
use crate::pipeline::ScanOutcome;
use std::io;

/// Format and print a scan outcome according to the specified format.
pub fn format_outcome(outcome: &ScanOutcome, format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Plain => plain::print_plain(outcome),
        OutputFormat::Json => json_format::print_json(outcome),
        OutputFormat::Csv => csv_format::print_csv(outcome),
    }
}
