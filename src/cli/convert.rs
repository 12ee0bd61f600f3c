//! CLI command handler for statement conversion

use std::path::PathBuf;

use clap::Args;
use tracing::info;

use crate::config::{ConverterPaths, Settings};
use crate::error::ConvertResult;
use crate::export::ExportFormat;
use crate::reader::LayoutKind;
use crate::services::{BatchReport, Converter};

/// Arguments of the convert command
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvertArgs {
    /// Statement files to convert (default: every .xls in the input directory)
    pub files: Vec<PathBuf>,

    /// Directory scanned when no files are given
    #[arg(long, value_name = "DIR")]
    pub input_dir: Option<PathBuf>,

    /// Write only this format
    #[arg(long, value_enum)]
    pub only: Option<ExportFormat>,

    /// Skip the combined all-in-one files
    #[arg(long)]
    pub no_all_in_one: bool,

    /// Sheet layout of the statements
    #[arg(long, value_enum)]
    pub layout: Option<LayoutKind>,
}

/// Handle the convert command
///
/// Explicit files are converted one by one. Without files the input
/// directory is scanned, and that directory run also produces the
/// all-in-one files when enabled.
pub fn handle_convert_command(
    paths: ConverterPaths,
    settings: &Settings,
    args: ConvertArgs,
) -> ConvertResult<BatchReport> {
    let paths = match args.input_dir {
        Some(dir) => paths.with_input_dir(dir),
        None => paths,
    };

    let directory_run = args.files.is_empty();
    let inputs = if directory_run {
        paths.list_statements()?
    } else {
        args.files
    };

    let mut converter = Converter::new(paths, settings)?
        .with_all_in_one(directory_run && settings.generate_all_in_one && !args.no_all_in_one);
    if let Some(format) = args.only {
        converter = converter.with_formats(vec![format]);
    }
    if let Some(layout) = args.layout {
        converter = converter.with_layout(layout);
    }

    if inputs.is_empty() {
        info!(dir = %converter.paths().input_dir().display(), "no statements found");
        return Ok(BatchReport::default());
    }

    converter
        .paths()
        .ensure_output_directories(converter.formats())?;

    info!(statements = inputs.len(), "starting conversion");
    Ok(converter.convert_batch(&inputs))
}
