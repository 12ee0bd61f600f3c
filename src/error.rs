//! Error types for santander-csv
//!
//! Every failure the converter can report is a variant of [`ConvertError`].
//! Reader and mapper failures abort the whole input file; write failures are
//! reported per destination.

use std::path::PathBuf;

use thiserror::Error;

/// The main error type for conversion operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    /// The input could not be opened or is not a readable statement
    #[error("cannot read {}: {reason}", path.display())]
    UnreadableFile { path: PathBuf, reason: String },

    /// The input is readable but does not have the expected header/columns
    #[error("unexpected layout in {}: {reason}", path.display())]
    SchemaMismatch { path: PathBuf, reason: String },

    /// The date cell does not match the statement date format
    #[error("row {row}: date '{value}' does not match format '{format}'")]
    DateParse {
        row: usize,
        value: String,
        format: String,
    },

    /// Neither debit nor credit carries a value
    #[error("row {row}: both debit and credit are empty")]
    AmountMissing { row: usize },

    /// Debit and credit both carry a value
    #[error("row {row}: both debit '{debit}' and credit '{credit}' are set")]
    AmbiguousAmount {
        row: usize,
        debit: String,
        credit: String,
    },

    /// A debit or credit cell is not a decimal amount
    #[error("row {row}: {field} '{value}' is not a valid amount")]
    AmountParse {
        row: usize,
        field: &'static str,
        value: String,
    },

    /// The balance cell is present but not a decimal amount
    #[error("row {row}: balance '{value}' is not a valid amount")]
    BalanceParse { row: usize, value: String },

    /// An output destination could not be created or written
    #[error("cannot write {}: {reason}", path.display())]
    Write { path: PathBuf, reason: String },

    /// Settings file errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem errors outside the export path (directory scans, setup)
    #[error("I/O error: {0}")]
    Io(String),
}

impl ConvertError {
    /// Create a write error for a destination
    pub fn write(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Write {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Name of the failure kind as shown in reports
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnreadableFile { .. } => "UnreadableFileError",
            Self::SchemaMismatch { .. } => "SchemaMismatchError",
            Self::DateParse { .. } => "DateParseError",
            Self::AmountMissing { .. } => "AmountMissingError",
            Self::AmbiguousAmount { .. } => "AmbiguousAmountError",
            Self::AmountParse { .. } => "AmountParseError",
            Self::BalanceParse { .. } => "BalanceParseError",
            Self::Write { .. } => "WriteError",
            Self::Config(_) => "ConfigError",
            Self::Io(_) => "IoError",
        }
    }

    /// Source row the error refers to, if any
    pub fn row(&self) -> Option<usize> {
        match self {
            Self::DateParse { row, .. }
            | Self::AmountMissing { row }
            | Self::AmbiguousAmount { row, .. }
            | Self::AmountParse { row, .. }
            | Self::BalanceParse { row, .. } => Some(*row),
            _ => None,
        }
    }

    /// Check if this error came from mapping a row
    pub fn is_row_error(&self) -> bool {
        self.row().is_some()
    }
}

impl From<std::io::Error> for ConvertError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ConvertError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result type alias for conversion operations
pub type ConvertResult<T> = Result<T, ConvertError>;
