//! All-in-one export
//!
//! Concatenates the records of several statements into one file per format,
//! statements ordered by their first transaction date. Overlapping
//! statements are not deduplicated.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use super::{export_to_file, ExportFormat, ExportOptions};
use crate::error::ConvertResult;
use crate::models::TransactionRecord;

/// The records of one converted statement
#[derive(Debug, Clone, Copy)]
pub struct StatementRecords<'a> {
    pub input: &'a Path,
    pub records: &'a [TransactionRecord],
}

impl StatementRecords<'_> {
    fn first_date(&self) -> Option<NaiveDate> {
        self.records.first().map(|r| r.date)
    }
}

/// File name of the combined output for a format
pub fn all_in_one_file_name(format: ExportFormat) -> String {
    format!("aio{}", format.file_suffix())
}

/// Path of the combined output inside `output_dir`
pub fn all_in_one_path(output_dir: &Path, format: ExportFormat) -> PathBuf {
    output_dir.join(all_in_one_file_name(format))
}

/// Sort statements by first transaction date, then input path; empty
/// statements go last
pub fn order_statements(statements: &mut [StatementRecords<'_>]) {
    statements.sort_by_key(|s| (s.first_date().is_none(), s.first_date(), s.input.to_path_buf()));
}

/// Write every statement's records to `path`; returns the record count
pub fn export_all_in_one(
    format: ExportFormat,
    statements: &[StatementRecords<'_>],
    path: impl AsRef<Path>,
    options: &ExportOptions,
) -> ConvertResult<usize> {
    let mut ordered = statements.to_vec();
    order_statements(&mut ordered);

    let records = ordered.iter().flat_map(|s| s.records.iter());
    export_to_file(format, records, path, options)
}
