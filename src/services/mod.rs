//! Service layer for santander-csv
//!
//! - `mapper`: RawRow → TransactionRecord validation
//! - `convert`: the per-statement and batch pipelines

pub mod convert;
pub mod mapper;

pub use convert::{BatchReport, ConvertedStatement, Converter, ExportOutcome, FileReport};
pub use mapper::RecordMapper;
