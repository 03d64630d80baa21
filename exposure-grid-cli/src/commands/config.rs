//! Configuration management CLI commands.

use std::path::{Path, PathBuf};

use clap::Subcommand;
use exposure_grid::config::{config_file_path, ConfigFile};

use crate::error::CliError;

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Show the configuration file path
    Path,

    /// Print the effective configuration
    Show,

    /// Write a configuration file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Run a config subcommand against `path` (default path when `None`).
pub fn run(command: ConfigCommands, path: Option<&Path>) -> Result<(), CliError> {
    let path = path.map(PathBuf::from).unwrap_or_else(config_file_path);
    match command {
        ConfigCommands::Path => {
            println!("{}", path.display());
            Ok(())
        }
        ConfigCommands::Show => run_show(&path),
        ConfigCommands::Init { force } => run_init(&path, force),
    }
}

fn run_show(path: &Path) -> Result<(), CliError> {
    let config = ConfigFile::load_from(path)?;
    println!("publish.storage_precision = {}", config.publish.storage_precision);
    println!("publish.identifier_format = {}", config.publish.identifier_format);
    println!(
        "publish.max_concurrent_inserts = {}",
        config.publish.max_concurrent_inserts
    );
    println!("query.precision = {}", config.query.precision);
    println!("query.extension = {}", config.query.extension);
    println!("query.precision_count = {}", config.query.precision_count);
    println!("logging.directory = {}", config.logging.directory.display());
    println!("logging.file = {}", config.logging.file);
    println!("logging.level = {}", config.logging.level);
    Ok(())
}

fn run_init(path: &Path, force: bool) -> Result<(), CliError> {
    if path.exists() && !force {
        return Err(CliError::Config(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }
    ConfigFile::default().save_to(path)?;
    println!("Wrote {}", path.display());
    Ok(())
}
