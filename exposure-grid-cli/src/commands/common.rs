//! Common types and utilities shared across CLI commands.

use std::path::Path;

use clap::{Args, ValueEnum};
use exposure_grid::config::ConfigFile;
use exposure_grid::logging::{init_logging, LoggingGuard};
use exposure_grid::region::{Coordinate, IdentifierFormat};
use exposure_grid::wire::{validate_coordinate, validate_precision};

use crate::error::CliError;

/// Partition key layout selection for CLI arguments.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq)]
pub enum FormatArg {
    /// "{lat},{lon}" (schema v1)
    LatLon,
    /// "{lat},{lon},{precision}" (schema v2)
    LatLonPrecision,
}

impl From<FormatArg> for IdentifierFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::LatLon => IdentifierFormat::LatLon,
            FormatArg::LatLonPrecision => IdentifierFormat::LatLonPrecision,
        }
    }
}

/// A point given on the command line.
#[derive(Debug, Clone, Copy, Args)]
pub struct CoordinateArgs {
    /// Latitude in decimal degrees
    #[arg(long, allow_negative_numbers = true)]
    pub lat: f64,

    /// Longitude in decimal degrees
    #[arg(long, allow_negative_numbers = true)]
    pub lon: f64,
}

impl CoordinateArgs {
    /// The point, range-checked.
    pub fn coordinate(&self) -> Result<Coordinate, CliError> {
        let coordinate = Coordinate::new(self.lat, self.lon);
        validate_coordinate(&coordinate)?;
        Ok(coordinate)
    }
}

/// Load the config file named on the command line, or the default one.
pub fn load_config(path: Option<&Path>) -> Result<ConfigFile, CliError> {
    let config = match path {
        Some(path) => ConfigFile::load_from(path)?,
        None => ConfigFile::load()?,
    };
    Ok(config)
}

/// `precision` if given, otherwise `fallback`, checked against `[0, 8]`.
pub fn resolve_precision(precision: Option<i32>, fallback: i32) -> Result<i32, CliError> {
    Ok(validate_precision(precision.unwrap_or(fallback))?)
}

/// Start file and stdout logging for long-running commands.
pub fn start_logging(config: &ConfigFile) -> Result<LoggingGuard, CliError> {
    init_logging(&config.logging).map_err(|e| {
        CliError::LoggingInit(format!(
            "{} ({})",
            e,
            config.logging.directory.join(&config.logging.file).display()
        ))
    })
}
