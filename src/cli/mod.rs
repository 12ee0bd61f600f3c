//! CLI command handlers
//!
//! Bridges the clap argument parsing in `main.rs` with the service layer.

pub mod convert;
pub mod setup;

pub use convert::{handle_convert_command, ConvertArgs};
pub use setup::{handle_config_command, handle_init_command};
