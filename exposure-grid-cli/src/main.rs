//! exposure-grid CLI - Command-line interface
//!
//! This binary provides a command-line interface to the exposure-grid library.

mod commands;
mod error;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use commands::common::load_config;
use commands::config::ConfigCommands;
use commands::grid::{LegacyArgs, NeighborsArgs, RangeArgs, RegionArgs};
use commands::report::{PublishArgs, QueryArgs};
use error::CliError;

#[derive(Parser)]
#[command(name = "exposure-grid")]
#[command(version = exposure_grid::VERSION)]
#[command(about = "Region grid and report fan-out for exposure notifications", long_about = None)]
struct Cli {
    /// Configuration file (defaults to ~/.exposure-grid/config.ini)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the grid cell containing a point
    Region(RegionArgs),

    /// List the partition keys searched around a point
    Neighbors(NeighborsArgs),

    /// Show the boundary range searched around a point
    Range(RangeArgs),

    /// Quantize a value with the schema-v1 integer codec
    Legacy(LegacyArgs),

    /// Fan report files out into grid cells
    Publish(PublishArgs),

    /// Look for exposures at a point among report files
    Query(QueryArgs),

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Region(args) => commands::grid::run_region(args, &load_config(config_path)?),
        Commands::Neighbors(args) => {
            commands::grid::run_neighbors(args, &load_config(config_path)?)
        }
        Commands::Range(args) => commands::grid::run_range(args, &load_config(config_path)?),
        Commands::Legacy(args) => commands::grid::run_legacy(args),
        Commands::Publish(args) => {
            commands::report::run_publish(args, &load_config(config_path)?)
        }
        Commands::Query(args) => commands::report::run_query(args, &load_config(config_path)?),
        Commands::Config { command } => commands::config::run(command, config_path),
    }
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        e.exit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_negative_longitude() {
        let cli = Cli::try_parse_from([
            "exposure-grid",
            "region",
            "--lat",
            "40.7306",
            "--lon",
            "-73.9352",
            "-p",
            "4",
        ])
        .unwrap();
        match cli.command {
            Commands::Region(args) => {
                assert_eq!(args.point.lon, -73.9352);
                assert_eq!(args.precision, Some(4));
            }
            _ => panic!("expected region command"),
        }
    }

    #[test]
    fn test_parse_legacy_negative_value() {
        let cli =
            Cli::try_parse_from(["exposure-grid", "legacy", "-7", "--precision", "8"]).unwrap();
        match cli.command {
            Commands::Legacy(args) => assert_eq!(args.value, -7.0),
            _ => panic!("expected legacy command"),
        }
    }

    #[test]
    fn test_query_requires_report() {
        let result = Cli::try_parse_from(["exposure-grid", "query", "--lat", "1", "--lon", "2"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_config_flag() {
        let cli = Cli::try_parse_from(["exposure-grid", "config", "path", "--config", "/tmp/x.ini"])
            .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/x.ini")));
    }
}
