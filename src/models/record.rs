//! Statement row models
//!
//! [`RawRow`] is one table row projected onto the fixed source column order;
//! [`TransactionRecord`] is its validated form, the only thing exporters see.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::money::Money;

/// Unvalidated cells of one statement row
///
/// Cells are kept exactly as extracted from the sheet (whitespace and all);
/// the mapper decides what is blank and what is malformed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    /// 1-based position of the row in the source table
    pub row_number: usize,
    pub date: String,
    pub description: String,
    /// Money out
    pub debit: String,
    /// Money in
    pub credit: String,
    pub balance: String,
}

impl RawRow {
    /// Build a row from cells in source order: date, description, debit, credit, balance
    pub fn new(row_number: usize, cells: [&str; 5]) -> Self {
        let [date, description, debit, credit, balance] = cells;
        Self {
            row_number,
            date: date.to_string(),
            description: description.to_string(),
            debit: debit.to_string(),
            credit: credit.to_string(),
            balance: balance.to_string(),
        }
    }

    /// Check if every cell is blank
    pub fn is_blank(&self) -> bool {
        [
            &self.date,
            &self.description,
            &self.debit,
            &self.credit,
            &self.balance,
        ]
        .iter()
        .all(|cell| is_blank_cell(cell))
    }
}

/// A cell counts as blank when it holds only whitespace (including NBSP)
pub fn is_blank_cell(cell: &str) -> bool {
    cell.chars().all(|c| c.is_whitespace() || c == '\u{a0}')
}

/// A validated statement transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Source row this record was mapped from
    pub row_number: usize,

    pub date: NaiveDate,

    /// Narrative with padding and encoding artifacts removed
    pub description: String,

    /// Signed amount (positive for money in, negative for money out)
    pub amount: Money,

    /// Running balance, when the statement shows one
    pub balance: Option<Money>,
}
