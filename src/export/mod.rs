//! Export module for santander-csv
//!
//! Renders transaction records into the supported CSV schemas:
//! - `generic`: bank-agnostic `date,description,amount,balance`
//! - `homebank`: HomeBank's transaction import columns
//! - `all_in_one`: every statement of a batch combined into one file
//!
//! All files are written through [`crate::storage::write_atomic`].

pub mod all_in_one;
pub mod generic;
pub mod homebank;

use std::fmt;
use std::io::Write;
use std::path::Path;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::ConvertResult;
use crate::models::TransactionRecord;
use crate::storage::write_atomic;

pub use all_in_one::{export_all_in_one, StatementRecords};
pub use generic::{write_generic_csv, GENERIC_HEADER};
pub use homebank::{write_homebank_csv, HOMEBANK_HEADER};

/// Output schemas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Generic CSV (date, description, amount, balance)
    Generic,
    /// HomeBank import CSV
    Homebank,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 2] = [ExportFormat::Generic, ExportFormat::Homebank];

    /// Trailing part of output file names for this format
    pub fn file_suffix(self) -> &'static str {
        match self {
            Self::Generic => "santander-generic.csv",
            Self::Homebank => "santander-homebank.csv",
        }
    }

    /// Column names written as the first line
    pub fn header(self) -> &'static [&'static str] {
        match self {
            Self::Generic => &GENERIC_HEADER,
            Self::Homebank => &HOMEBANK_HEADER,
        }
    }

    /// Write records in this format to any writer; returns the record count
    pub fn write_records<'a, I, W>(
        self,
        records: I,
        writer: W,
        options: &ExportOptions,
    ) -> csv::Result<usize>
    where
        I: IntoIterator<Item = &'a TransactionRecord>,
        W: Write,
    {
        match self {
            Self::Generic => write_generic_csv(records, writer),
            Self::Homebank => write_homebank_csv(records, writer, options.homebank_delimiter),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generic => write!(f, "generic"),
            Self::Homebank => write!(f, "homebank"),
        }
    }
}

/// Format knobs that come from settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    pub homebank_delimiter: u8,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            homebank_delimiter: b',',
        }
    }
}

/// Write records to `path` atomically in the given format
pub fn export_to_file<'a, I>(
    format: ExportFormat,
    records: I,
    path: impl AsRef<Path>,
    options: &ExportOptions,
) -> ConvertResult<usize>
where
    I: IntoIterator<Item = &'a TransactionRecord>,
{
    write_atomic(path, |writer| {
        format
            .write_records(records, writer, options)
            .map_err(|e| e.to_string())
    })
}

/// CSV writer shared by every schema: minimal quoting, `\n` line endings
fn csv_writer<W: Write>(writer: W, delimiter: u8) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .delimiter(delimiter)
        .terminator(csv::Terminator::Any(b'\n'))
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(writer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawRow;
    use crate::services::RecordMapper;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_headers_match_writers() {
        let mut out = Vec::new();
        ExportFormat::Homebank
            .write_records(&Vec::<TransactionRecord>::new(), &mut out, &ExportOptions::default())
            .unwrap();
        let line = String::from_utf8(out).unwrap();
        assert_eq!(line.trim_end(), ExportFormat::Homebank.header().join(","));
        assert_eq!(ExportFormat::Generic.header().len(), 4);
    }

    #[test]
    fn test_export_to_file_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.csv");
        let records = vec![RecordMapper::default()
            .map(&RawRow::new(1, ["15/03/2024", "TESCO STORES", "", "42.50", "1200.00"]))
            .unwrap()];

        let options = ExportOptions::default();
        assert_eq!(export_to_file(ExportFormat::Generic, &records, &path, &options).unwrap(), 1);
        let first = fs::read(&path).unwrap();
        export_to_file(ExportFormat::Generic, &records, &path, &options).unwrap();
        assert_eq!(fs::read(&path).unwrap(), first);
    }

    #[test]
    fn test_export_to_missing_dir_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nope").join("out.csv");
        let records: Vec<TransactionRecord> = Vec::new();
        let err = export_to_file(ExportFormat::Homebank, &records, &path, &ExportOptions::default())
            .unwrap_err();
        assert_eq!(err.kind(), "WriteError");
    }

    #[test]
    fn test_format_names() {
        assert_eq!(ExportFormat::Generic.to_string(), "generic");
        assert_eq!(ExportFormat::Homebank.file_suffix(), "santander-homebank.csv");
    }
}
