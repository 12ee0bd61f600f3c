//! Core data models for santander-csv
//!
//! Statement rows as read from the sheet, the validated transaction record
//! every exporter consumes, and the money type both are built on.

pub mod money;
pub mod record;

pub use money::{Money, MoneyParseError};
pub use record::{RawRow, TransactionRecord};
