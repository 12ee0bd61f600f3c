//! Path management for santander-csv
//!
//! All directories hang off one base directory:
//!
//! ```text
//! <base>/santander-csv.json   settings
//! <base>/in/                  statement downloads (*.xls)
//! <base>/out-generic/         generic CSV files
//! <base>/out-homebank/        HomeBank CSV files
//! ```
//!
//! ## Base Directory Resolution Order
//!
//! 1. `SANTANDER_CSV_HOME` environment variable (if set)
//! 2. The current working directory

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::error::{ConvertError, ConvertResult};
use crate::export::ExportFormat;
use crate::models::TransactionRecord;

/// Environment variable overriding the base directory
pub const HOME_ENV: &str = "SANTANDER_CSV_HOME";

/// Extension of statement downloads
pub const STATEMENT_EXTENSION: &str = "xls";

/// Manages all paths used by santander-csv
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConverterPaths {
    base_dir: PathBuf,
    input_dir: PathBuf,
    generic_dir: PathBuf,
    homebank_dir: PathBuf,
}

impl ConverterPaths {
    /// Create paths rooted at `SANTANDER_CSV_HOME` or the current directory
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be determined.
    pub fn new() -> ConvertResult<Self> {
        let base_dir = match std::env::var(HOME_ENV) {
            Ok(custom) => PathBuf::from(custom),
            Err(_) => std::env::current_dir()
                .map_err(|e| ConvertError::Io(format!("Failed to get current directory: {}", e)))?,
        };

        Ok(Self::with_base_dir(base_dir))
    }

    /// Create paths with a custom base directory
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        let base_dir = base_dir.into();
        Self {
            input_dir: base_dir.join("in"),
            generic_dir: base_dir.join("out-generic"),
            homebank_dir: base_dir.join("out-homebank"),
            base_dir,
        }
    }

    /// Use a different input directory
    pub fn with_input_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.input_dir = dir.into();
        self
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Directory scanned for statements when no files are given
    pub fn input_dir(&self) -> &Path {
        &self.input_dir
    }

    /// Output directory for a format
    pub fn output_dir(&self, format: ExportFormat) -> &Path {
        match format {
            ExportFormat::Generic => &self.generic_dir,
            ExportFormat::Homebank => &self.homebank_dir,
        }
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("santander-csv.json")
    }

    /// Output path for one statement in one format
    pub fn output_path(
        &self,
        format: ExportFormat,
        input: &Path,
        records: &[TransactionRecord],
    ) -> PathBuf {
        self.output_dir(format)
            .join(statement_file_name(format, input, records))
    }

    /// Create the output directories of the given formats
    pub fn ensure_output_directories(&self, formats: &[ExportFormat]) -> ConvertResult<()> {
        for &format in formats {
            let dir = self.output_dir(format);
            std::fs::create_dir_all(dir).map_err(|e| {
                ConvertError::Io(format!(
                    "Failed to create output directory {}: {}",
                    dir.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }

    /// List statement files in the input directory, sorted by name
    pub fn list_statements(&self) -> ConvertResult<Vec<PathBuf>> {
        let entries = std::fs::read_dir(&self.input_dir).map_err(|e| {
            ConvertError::Io(format!(
                "Failed to read input directory {}: {}",
                self.input_dir.display(),
                e
            ))
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.is_file() && is_statement_file(&path) {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }
}

/// Check if a path has the statement extension (case-insensitive)
pub fn is_statement_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(STATEMENT_EXTENSION))
}

/// Output file name for a statement: `YYYYMMDD-YYYYMMDD<suffix>` spanning the
/// statement's earliest and latest dates, or `<input stem>-<suffix>` when the
/// statement has no transactions
pub fn statement_file_name(
    format: ExportFormat,
    input: &Path,
    records: &[TransactionRecord],
) -> String {
    match date_span(records) {
        Some((start, end)) => format!(
            "{}-{}{}",
            start.format("%Y%m%d"),
            end.format("%Y%m%d"),
            format.file_suffix()
        ),
        None => {
            let stem = input
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "statement".to_string());
            format!("{}-{}", stem, format.file_suffix())
        }
    }
}

fn date_span(records: &[TransactionRecord]) -> Option<(NaiveDate, NaiveDate)> {
    let start = records.iter().map(|r| r.date).min()?;
    let end = records.iter().map(|r| r.date).max()?;
    Some((start, end))
}
