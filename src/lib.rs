//! santander-csv - Santander statement downloads to CSV
//!
//! Converts the HTML-table ".xls" statements Santander UK offers for download
//! into a generic CSV and a HomeBank import CSV.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `reader`: locate the statement table and yield raw rows
//! - `services`: validate rows into records and drive conversions
//! - `export`: render records as generic, HomeBank and all-in-one CSV
//! - `storage`: atomic file writes
//! - `models`: money and record types
//! - `config`: paths and settings
//! - `cli`, `display`, `logging`: the binary's glue
//!
//! # Example
//!
//! ```rust,ignore
//! use santander_csv::config::{ConverterPaths, Settings};
//! use santander_csv::services::Converter;
//!
//! let paths = ConverterPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let converter = Converter::new(paths, &settings)?;
//! let report = converter.convert_batch(&converter.paths().list_statements()?);
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod reader;
pub mod services;
pub mod storage;

pub use error::{ConvertError, ConvertResult};
