//! Configuration module for santander-csv
//!
//! This module provides configuration management including:
//! - Base, input and output directory resolution
//! - Output file naming
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::ConverterPaths;
pub use settings::Settings;
