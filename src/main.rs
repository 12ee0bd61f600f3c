use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::error::ErrorKind;
use clap::{ArgAction, CommandFactory, Parser, Subcommand};

use santander_csv::cli::{
    handle_config_command, handle_convert_command, handle_init_command, ConvertArgs,
};
use santander_csv::config::{ConverterPaths, Settings};
use santander_csv::display::format_batch_report;
use santander_csv::logging::init_logging;

#[derive(Parser)]
#[command(
    name = "santander-csv",
    version,
    about = "Convert Santander statement downloads to CSV",
    long_about = "santander-csv turns the .xls statements Santander UK offers for \
                  download into a generic CSV and a HomeBank import CSV. Without \
                  a command it converts every statement in the input directory."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    convert: ConvertArgs,

    /// Base directory (default: $SANTANDER_CSV_HOME or the current directory)
    #[arg(long, global = true, value_name = "DIR")]
    home: Option<PathBuf>,

    /// More logging on stderr (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert statements (the default)
    Convert(ConvertArgs),

    /// Create the working directories and settings file
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    reject_mixed_convert_args(&cli);
    init_logging(cli.verbose);

    let paths = match cli.home {
        Some(dir) => ConverterPaths::with_base_dir(dir),
        None => ConverterPaths::new()?,
    };
    let settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Init) => {
            handle_init_command(&paths, &settings)?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Config) => {
            handle_config_command(&paths, &settings)?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Convert(args)) => run_convert(paths, &settings, args),
        None => run_convert(paths, &settings, cli.convert),
    }
}

/// Convert options given before a subcommand would be silently dropped
fn reject_mixed_convert_args(cli: &Cli) {
    if cli.command.is_some() && cli.convert != ConvertArgs::default() {
        Cli::command()
            .error(
                ErrorKind::ArgumentConflict,
                "convert options cannot be used before a subcommand; \
                 put them after 'convert' or drop the subcommand",
            )
            .exit();
    }
}

fn run_convert(paths: ConverterPaths, settings: &Settings, args: ConvertArgs) -> Result<ExitCode> {
    let report = handle_convert_command(paths, settings, args)?;
    println!("{}", format_batch_report(&report));

    if report.is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
