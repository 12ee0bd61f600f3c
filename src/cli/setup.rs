//! Handlers for the `init` and `config` commands

use crate::config::{ConverterPaths, Settings};
use crate::error::{ConvertError, ConvertResult};
use crate::export::ExportFormat;

/// Create the working directories and persist the settings file
pub fn handle_init_command(paths: &ConverterPaths, settings: &Settings) -> ConvertResult<()> {
    std::fs::create_dir_all(paths.input_dir()).map_err(|e| {
        ConvertError::Io(format!(
            "Failed to create input directory {}: {}",
            paths.input_dir().display(),
            e
        ))
    })?;
    paths.ensure_output_directories(&ExportFormat::ALL)?;
    settings.save(paths)?;

    println!("Initialized santander-csv at: {}", paths.base_dir().display());
    println!();
    println!("Put statement downloads (*.xls) in {}", paths.input_dir().display());
    println!("and run 'santander-csv' to convert them.");
    Ok(())
}

/// Print resolved paths and settings
pub fn handle_config_command(paths: &ConverterPaths, settings: &Settings) -> ConvertResult<()> {
    println!("santander-csv Configuration");
    println!("===========================");
    println!("Base directory:     {}", paths.base_dir().display());
    println!("Input directory:    {}", paths.input_dir().display());
    println!(
        "Generic output:     {}",
        paths.output_dir(ExportFormat::Generic).display()
    );
    println!(
        "HomeBank output:    {}",
        paths.output_dir(ExportFormat::Homebank).display()
    );
    println!("Settings file:      {}", paths.settings_file().display());
    println!();
    println!("Settings:");
    println!("{}", serde_json::to_string_pretty(settings)?);
    Ok(())
}
