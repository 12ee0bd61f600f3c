//! Record mapping
//!
//! Validates a [`RawRow`] into a [`TransactionRecord`]: date parsing,
//! debit/credit unification, description cleanup and balance parsing.
//! Nothing is defaulted; a row that can't be mapped exactly is an error.

use chrono::NaiveDate;

use crate::error::{ConvertError, ConvertResult};
use crate::models::record::is_blank_cell;
use crate::models::{Money, RawRow, TransactionRecord};

/// Date format of Santander statement cells
pub const DEFAULT_SOURCE_DATE_FORMAT: &str = "%d/%m/%Y";

/// Maps raw statement rows to transaction records
#[derive(Debug, Clone)]
pub struct RecordMapper {
    date_format: String,
}

impl Default for RecordMapper {
    fn default() -> Self {
        Self::new(DEFAULT_SOURCE_DATE_FORMAT)
    }
}

impl RecordMapper {
    /// Create a mapper for statements using the given strftime date format
    pub fn new(date_format: impl Into<String>) -> Self {
        Self {
            date_format: date_format.into(),
        }
    }

    /// Map one row
    pub fn map(&self, raw: &RawRow) -> ConvertResult<TransactionRecord> {
        let row = raw.row_number;

        let date = self.parse_date(row, &raw.date)?;
        let amount = parse_amount(row, &raw.debit, &raw.credit)?;
        let description = normalize_description(&raw.description);

        let balance = if is_blank_cell(&raw.balance) {
            None
        } else {
            let balance = Money::parse(&raw.balance).map_err(|_| ConvertError::BalanceParse {
                row,
                value: raw.balance.trim().to_string(),
            })?;
            Some(balance)
        };

        Ok(TransactionRecord {
            row_number: row,
            date,
            description,
            amount,
            balance,
        })
    }

    /// Map every row, stopping at the first failure
    pub fn map_all<I>(&self, rows: I) -> ConvertResult<Vec<TransactionRecord>>
    where
        I: IntoIterator<Item = RawRow>,
    {
        rows.into_iter().map(|raw| self.map(&raw)).collect()
    }

    fn parse_date(&self, row: usize, value: &str) -> ConvertResult<NaiveDate> {
        let value = value.trim();
        NaiveDate::parse_from_str(value, &self.date_format).map_err(|_| ConvertError::DateParse {
            row,
            value: value.to_string(),
            format: self.date_format.clone(),
        })
    }
}

/// Unify the debit/credit pair into one signed amount
///
/// Exactly one side must be filled in: credits come out positive and debits
/// negative. The columns already say which way the money moved, so a cell
/// holding a negative value is rejected.
fn parse_amount(row: usize, debit: &str, credit: &str) -> ConvertResult<Money> {
    let debit = debit.trim();
    let credit = credit.trim();

    match (is_blank_cell(debit), is_blank_cell(credit)) {
        (true, true) => Err(ConvertError::AmountMissing { row }),
        (false, false) => Err(ConvertError::AmbiguousAmount {
            row,
            debit: debit.to_string(),
            credit: credit.to_string(),
        }),
        (false, true) => Ok(-parse_side(row, "debit", debit)?),
        (true, false) => parse_side(row, "credit", credit),
    }
}

fn parse_side(row: usize, field: &'static str, value: &str) -> ConvertResult<Money> {
    let error = || ConvertError::AmountParse {
        row,
        field,
        value: value.to_string(),
    };
    let amount = Money::parse(value).map_err(|_| error())?;
    if amount.is_negative() {
        return Err(error());
    }
    Ok(amount)
}

/// Trim, turn non-breaking spaces into spaces, drop control characters and
/// collapse whitespace runs
pub fn normalize_description(s: &str) -> String {
    s.chars()
        .map(|c| if c == '\u{a0}' { ' ' } else { c })
        .filter(|c| !c.is_control() || c.is_whitespace())
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
