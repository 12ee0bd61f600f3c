//! Statement reading
//!
//! Turns a downloaded statement into [`RawRow`](crate::models::RawRow)s:
//! - `layout`: where each field sits and how the header row looks
//! - `sheet`: file loading, header location and row iteration

pub mod layout;
pub mod sheet;

pub use layout::{LayoutKind, SheetLayout};
pub use sheet::{RawRows, StatementSheet};
