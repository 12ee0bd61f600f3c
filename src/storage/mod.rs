//! Storage layer for santander-csv
//!
//! Only output files are persisted; see [`file_io`] for the atomic writer
//! every exporter goes through.

pub mod file_io;

pub use file_io::{temp_path_for, write_atomic};
