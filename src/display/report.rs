//! Conversion summary formatting
//!
//! One block per statement, then the all-in-one outcomes and a totals line.
//! Plain text so the summary can be grepped or piped.

use crate::services::{BatchReport, ExportOutcome, FileReport};

/// Format the outcome of one destination
pub fn format_export_outcome(outcome: &ExportOutcome) -> String {
    match &outcome.result {
        Ok(count) => format!(
            "    {:<9} {} ({} records)",
            outcome.format.to_string(),
            outcome.path.display(),
            count
        ),
        Err(e) => format!(
            "    {:<9} FAILED {}: {}",
            outcome.format.to_string(),
            e.kind(),
            e
        ),
    }
}

/// Format the outcome of one statement
pub fn format_file_report(report: &FileReport) -> String {
    let status = if report.is_success() { "OK  " } else { "FAIL" };

    match &report.outcome {
        Ok(statement) => {
            let mut lines = vec![format!(
                "{} {}: {} transactions, net {}",
                status,
                report.input.display(),
                statement.records.len(),
                statement.net_amount()
            )];
            lines.extend(statement.exports.iter().map(format_export_outcome));
            lines.join("\n")
        }
        Err(e) => format!("{} {}: {}: {}", status, report.input.display(), e.kind(), e),
    }
}

/// Format a whole batch run
pub fn format_batch_report(report: &BatchReport) -> String {
    if report.files.is_empty() {
        return "No statements to convert.".to_string();
    }

    let mut lines: Vec<String> = report.files.iter().map(format_file_report).collect();

    if !report.all_in_one.is_empty() {
        lines.push("All-in-one:".to_string());
        lines.extend(report.all_in_one.iter().map(format_export_outcome));
    }

    let total = report.files.len();
    lines.push(format!(
        "Converted {} of {} statement(s)",
        total - report.failed_files(),
        total
    ));
    lines.join("\n")
}
