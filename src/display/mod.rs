//! Display formatting for terminal output

pub mod report;

pub use report::{format_batch_report, format_export_outcome, format_file_report};
