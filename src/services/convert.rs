//! Statement conversion service
//!
//! Drives Reader → Mapper → Exporters for one statement and across a batch.
//! A statement is read and mapped completely before anything is written, so
//! a bad row never leaves output behind. Each destination then succeeds or
//! fails on its own.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use super::mapper::RecordMapper;
use crate::config::paths::is_statement_file;
use crate::config::{ConverterPaths, Settings};
use crate::error::{ConvertError, ConvertResult};
use crate::export::all_in_one::{all_in_one_path, export_all_in_one, StatementRecords};
use crate::export::{export_to_file, ExportFormat, ExportOptions};
use crate::models::{Money, TransactionRecord};
use crate::reader::{LayoutKind, SheetLayout, StatementSheet};

/// Result of writing one destination
#[derive(Debug, Clone)]
pub struct ExportOutcome {
    pub format: ExportFormat,
    pub path: PathBuf,
    /// Number of records written
    pub result: ConvertResult<usize>,
}

impl ExportOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// A statement that was read and mapped
#[derive(Debug, Clone)]
pub struct ConvertedStatement {
    pub records: Vec<TransactionRecord>,
    pub exports: Vec<ExportOutcome>,
}

impl ConvertedStatement {
    /// Sum of all signed amounts
    pub fn net_amount(&self) -> Money {
        self.records.iter().map(|r| r.amount).sum()
    }
}

/// Everything that happened to one input file
#[derive(Debug, Clone)]
pub struct FileReport {
    pub input: PathBuf,
    pub outcome: ConvertResult<ConvertedStatement>,
}

impl FileReport {
    /// True when the statement was mapped and every destination was written
    pub fn is_success(&self) -> bool {
        match &self.outcome {
            Ok(statement) => statement.exports.iter().all(ExportOutcome::is_success),
            Err(_) => false,
        }
    }

    pub fn record_count(&self) -> Option<usize> {
        self.outcome.as_ref().ok().map(|s| s.records.len())
    }
}

/// Everything that happened in a batch run
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub files: Vec<FileReport>,
    pub all_in_one: Vec<ExportOutcome>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.files.iter().all(FileReport::is_success)
            && self.all_in_one.iter().all(ExportOutcome::is_success)
    }

    pub fn failed_files(&self) -> usize {
        self.files.iter().filter(|f| !f.is_success()).count()
    }
}

/// Converts statements into the enabled CSV formats
#[derive(Debug, Clone)]
pub struct Converter {
    paths: ConverterPaths,
    layout: SheetLayout,
    mapper: RecordMapper,
    formats: Vec<ExportFormat>,
    options: ExportOptions,
    all_in_one: bool,
}

impl Converter {
    /// Create a converter from settings
    pub fn new(paths: ConverterPaths, settings: &Settings) -> ConvertResult<Self> {
        settings.validate()?;
        Ok(Self {
            paths,
            layout: settings.layout.layout(),
            mapper: RecordMapper::new(settings.source_date_format.clone()),
            formats: settings.enabled_formats(),
            options: settings.export_options()?,
            all_in_one: settings.generate_all_in_one,
        })
    }

    /// Restrict output to the given formats
    pub fn with_formats(mut self, formats: Vec<ExportFormat>) -> Self {
        self.formats = formats;
        self
    }

    pub fn with_layout(mut self, kind: LayoutKind) -> Self {
        self.layout = kind.layout();
        self
    }

    pub fn with_all_in_one(mut self, enabled: bool) -> Self {
        self.all_in_one = enabled;
        self
    }

    pub fn paths(&self) -> &ConverterPaths {
        &self.paths
    }

    pub fn formats(&self) -> &[ExportFormat] {
        &self.formats
    }

    /// Read and map a whole statement, failing on the first bad row
    pub fn read_statement(&self, input: &Path) -> ConvertResult<Vec<TransactionRecord>> {
        if !is_statement_file(input) {
            return Err(ConvertError::UnreadableFile {
                path: input.to_path_buf(),
                reason: "not a .xls statement".into(),
            });
        }
        let sheet = StatementSheet::open(input, &self.layout)?;
        self.mapper.map_all(sheet.into_rows())
    }

    /// Convert one statement into every enabled format
    ///
    /// `claimed` holds output paths already written in this run; a statement
    /// whose output would land on one of them fails that destination instead
    /// of overwriting it.
    pub fn convert_file(&self, input: &Path, claimed: &mut HashSet<PathBuf>) -> FileReport {
        info!(input = %input.display(), "converting statement");

        let records = match self.read_statement(input) {
            Ok(records) => records,
            Err(e) => {
                warn!(input = %input.display(), kind = e.kind(), "{}", e);
                return FileReport {
                    input: input.to_path_buf(),
                    outcome: Err(e),
                };
            }
        };

        let exports = self
            .formats
            .iter()
            .map(|&format| {
                let path = self.paths.output_path(format, input, &records);
                let result = if claimed.insert(path.clone()) {
                    export_to_file(format, &records, &path, &self.options)
                } else {
                    Err(ConvertError::write(
                        &path,
                        "already written for another statement in this run",
                    ))
                };
                log_outcome(format, &path, &result);
                ExportOutcome {
                    format,
                    path,
                    result,
                }
            })
            .collect();

        FileReport {
            input: input.to_path_buf(),
            outcome: Ok(ConvertedStatement { records, exports }),
        }
    }

    /// Convert several statements, then write the all-in-one files if enabled
    ///
    /// One statement's failure never stops the others.
    pub fn convert_batch(&self, inputs: &[PathBuf]) -> BatchReport {
        let mut claimed = HashSet::new();
        let files: Vec<FileReport> = inputs
            .iter()
            .map(|input| self.convert_file(input, &mut claimed))
            .collect();

        let all_in_one = if self.all_in_one {
            self.write_all_in_one(&files)
        } else {
            Vec::new()
        };

        BatchReport { files, all_in_one }
    }

    fn write_all_in_one(&self, files: &[FileReport]) -> Vec<ExportOutcome> {
        let unreadable = files.iter().filter(|f| f.outcome.is_err()).count();
        let statements: Vec<StatementRecords<'_>> = files
            .iter()
            .filter_map(|f| {
                f.outcome.as_ref().ok().map(|s| StatementRecords {
                    input: &f.input,
                    records: &s.records,
                })
            })
            .collect();

        self.formats
            .iter()
            .map(|&format| {
                let path = all_in_one_path(self.paths.output_dir(format), format);
                let result = if unreadable > 0 {
                    Err(ConvertError::write(
                        &path,
                        format!("skipped: {} statement(s) failed to convert", unreadable),
                    ))
                } else {
                    export_all_in_one(format, &statements, &path, &self.options)
                };
                log_outcome(format, &path, &result);
                ExportOutcome {
                    format,
                    path,
                    result,
                }
            })
            .collect()
    }
}

fn log_outcome(format: ExportFormat, path: &Path, result: &ConvertResult<usize>) {
    match result {
        Ok(count) => info!(%format, path = %path.display(), records = count, "wrote csv"),
        Err(e) => warn!(%format, kind = e.kind(), "{}", e),
    }
}
