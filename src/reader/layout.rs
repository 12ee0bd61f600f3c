//! Column layouts of statement sheets
//!
//! A layout says how many cells a transaction row has, where each field sits,
//! and which labels identify the header row.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::models::record::is_blank_cell;
use crate::models::RawRow;

const DATE_LABELS: &[&str] = &["date"];
const DESCRIPTION_LABELS: &[&str] = &["description", "details", "narrative"];
const DEBIT_LABELS: &[&str] = &["money out", "paid out", "debit"];
const CREDIT_LABELS: &[&str] = &["money in", "paid in", "credit"];
const BALANCE_LABELS: &[&str] = &["balance"];

/// Built-in sheet layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LayoutKind {
    /// Santander UK download: 9 cells per row, description split over two cells
    #[default]
    Santander,
    /// Five cells: date, description, debit, credit, balance
    Simple,
}

impl LayoutKind {
    /// Get the column layout for this kind
    pub fn layout(self) -> SheetLayout {
        match self {
            Self::Santander => SheetLayout::santander(),
            Self::Simple => SheetLayout::simple(),
        }
    }
}

/// Column positions for one statement format
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetLayout {
    /// Number of cells a transaction row must have
    pub cell_count: usize,
    pub date_column: usize,
    /// Cells joined (with a space) to form the description
    pub description_columns: Vec<usize>,
    pub debit_column: usize,
    pub credit_column: usize,
    pub balance_column: usize,
}

impl SheetLayout {
    /// Santander UK "XLS" download
    ///
    /// Cells: (blank), date, (blank), description, description cont.,
    /// money in, money out, balance, (blank).
    pub fn santander() -> Self {
        Self {
            cell_count: 9,
            date_column: 1,
            description_columns: vec![3, 4],
            debit_column: 6,
            credit_column: 5,
            balance_column: 7,
        }
    }

    /// Plain five-column table
    pub fn simple() -> Self {
        Self {
            cell_count: 5,
            date_column: 0,
            description_columns: vec![1],
            debit_column: 2,
            credit_column: 3,
            balance_column: 4,
        }
    }

    /// Check if a row of cells is this layout's header row
    ///
    /// Each field's header cell must contain one of the known labels
    /// (case-insensitive). Only the first description column is checked.
    pub fn is_header(&self, cells: &[String]) -> bool {
        let matches = |column: usize, labels: &[&str]| {
            cells.get(column).is_some_and(|cell| {
                let cell = cell.trim().to_lowercase();
                labels.iter().any(|label| cell.contains(label))
            })
        };

        let description_column = self.description_columns.first().copied();

        matches(self.date_column, DATE_LABELS)
            && description_column.is_some_and(|col| matches(col, DESCRIPTION_LABELS))
            && matches(self.debit_column, DEBIT_LABELS)
            && matches(self.credit_column, CREDIT_LABELS)
            && matches(self.balance_column, BALANCE_LABELS)
    }

    /// Labels the header row is expected to carry, for error messages
    pub fn expected_header(&self) -> String {
        format!(
            "'{}' at column {}, '{}' at column {}, '{}' at column {}, '{}' at column {}, '{}' at column {}",
            DATE_LABELS[0],
            self.date_column + 1,
            DESCRIPTION_LABELS[0],
            self.description_columns.first().map_or(0, |c| c + 1),
            DEBIT_LABELS[0],
            self.debit_column + 1,
            CREDIT_LABELS[0],
            self.credit_column + 1,
            BALANCE_LABELS[0],
            self.balance_column + 1,
        )
    }

    /// Project a row of cells onto the fixed RawRow order
    ///
    /// Returns None when the row doesn't have this layout's cell count.
    pub fn project(&self, row_number: usize, cells: &[String]) -> Option<RawRow> {
        if cells.len() != self.cell_count {
            return None;
        }

        let cell = |column: usize| cells.get(column).cloned().unwrap_or_default();

        let description = self
            .description_columns
            .iter()
            .filter_map(|&col| cells.get(col))
            .map(|part| part.trim())
            .filter(|part| !is_blank_cell(part))
            .collect::<Vec<_>>()
            .join(" ");

        Some(RawRow {
            row_number,
            date: cell(self.date_column),
            description,
            debit: cell(self.debit_column),
            credit: cell(self.credit_column),
            balance: cell(self.balance_column),
        })
    }
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self::santander()
    }
}
