//! User settings for santander-csv
//!
//! Which outputs to generate, which sheet layout to expect and the few
//! format knobs that vary between installations. Stored as JSON; every field
//! has a default so partial files are fine.

use serde::{Deserialize, Serialize};

use super::paths::ConverterPaths;
use crate::error::{ConvertError, ConvertResult};
use crate::export::{ExportFormat, ExportOptions};
use crate::reader::LayoutKind;
use crate::services::mapper::DEFAULT_SOURCE_DATE_FORMAT;

/// User settings for santander-csv
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Write the generic CSV for each statement
    #[serde(default = "default_true")]
    pub generate_generic: bool,

    /// Write the HomeBank CSV for each statement
    #[serde(default = "default_true")]
    pub generate_homebank: bool,

    /// Combine every statement of a directory run into one file per format
    #[serde(default = "default_true")]
    pub generate_all_in_one: bool,

    /// Expected sheet layout
    #[serde(default)]
    pub layout: LayoutKind,

    /// Date format of statement cells (strftime)
    #[serde(default = "default_source_date_format")]
    pub source_date_format: String,

    /// Field delimiter of the HomeBank CSV
    #[serde(default = "default_homebank_delimiter")]
    pub homebank_delimiter: char,
}

fn default_schema_version() -> u32 {
    1
}

fn default_true() -> bool {
    true
}

fn default_source_date_format() -> String {
    DEFAULT_SOURCE_DATE_FORMAT.to_string()
}

fn default_homebank_delimiter() -> char {
    ','
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            generate_generic: true,
            generate_homebank: true,
            generate_all_in_one: true,
            layout: LayoutKind::default(),
            source_date_format: default_source_date_format(),
            homebank_delimiter: default_homebank_delimiter(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or use defaults if the file doesn't exist
    pub fn load_or_create(paths: &ConverterPaths) -> ConvertResult<Self> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Don't save yet - let caller decide when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| ConvertError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| ConvertError::Config(format!("Failed to parse settings file: {}", e)))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &ConverterPaths) -> ConvertResult<()> {
        std::fs::create_dir_all(paths.base_dir())
            .map_err(|e| ConvertError::Io(format!("Failed to create base directory: {}", e)))?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| ConvertError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| ConvertError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Reject settings the exporters can't honour
    pub fn validate(&self) -> ConvertResult<()> {
        self.export_options()?;
        if !self.generate_generic && !self.generate_homebank {
            return Err(ConvertError::Config(
                "at least one of generate_generic and generate_homebank must be enabled".into(),
            ));
        }
        if self.source_date_format.trim().is_empty() {
            return Err(ConvertError::Config("source_date_format is empty".into()));
        }
        Ok(())
    }

    /// Formats enabled for per-statement output
    pub fn enabled_formats(&self) -> Vec<ExportFormat> {
        ExportFormat::ALL
            .into_iter()
            .filter(|format| match format {
                ExportFormat::Generic => self.generate_generic,
                ExportFormat::Homebank => self.generate_homebank,
            })
            .collect()
    }

    /// Options handed to the exporters
    pub fn export_options(&self) -> ConvertResult<ExportOptions> {
        let delimiter = self.homebank_delimiter;
        if !delimiter.is_ascii() || delimiter == '"' || delimiter == '\n' || delimiter == '\r' {
            return Err(ConvertError::Config(format!(
                "homebank_delimiter '{}' must be a single ASCII character other than a quote or newline",
                delimiter.escape_default()
            )));
        }
        Ok(ExportOptions {
            homebank_delimiter: delimiter as u8,
        })
    }
}
