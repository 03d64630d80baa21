//! Grid inspection commands: region, neighbors, range, legacy.
//!
//! These are pure computations and print plain text, one item per line.

use clap::Args;
use exposure_grid::config::ConfigFile;
use exposure_grid::precision::legacy;
use exposure_grid::region::{
    connected_regions, connected_regions_range, region_boundary, IdentifierFormat, Region,
    RegionBoundary,
};
use exposure_grid::wire::validate_precision;

use super::common::{resolve_precision, CoordinateArgs, FormatArg};
use crate::error::CliError;

/// Arguments for `region`.
#[derive(Debug, Args)]
pub struct RegionArgs {
    #[command(flatten)]
    pub point: CoordinateArgs,

    /// Grid precision (0-8); defaults to publish.storage_precision
    #[arg(long, short)]
    pub precision: Option<i32>,

    /// Identifier layout; defaults to publish.identifier_format
    #[arg(long, value_enum)]
    pub format: Option<FormatArg>,
}

/// Arguments for `neighbors`.
#[derive(Debug, Args)]
pub struct NeighborsArgs {
    #[command(flatten)]
    pub point: CoordinateArgs,

    /// Grid precision (0-8) of the query cell; defaults to query.precision
    #[arg(long, short)]
    pub precision: Option<i32>,

    /// Cells beyond the query cell on every side; defaults to query.extension
    #[arg(long, short)]
    pub extension: Option<u32>,

    /// Number of consecutive precisions to enumerate; defaults to query.precision_count
    #[arg(long)]
    pub precision_count: Option<u32>,

    /// Identifier layout; defaults to publish.identifier_format
    #[arg(long, value_enum)]
    pub format: Option<FormatArg>,
}

/// Arguments for `range`.
#[derive(Debug, Args)]
pub struct RangeArgs {
    #[command(flatten)]
    pub point: CoordinateArgs,

    /// Grid precision (0-8); defaults to query.precision
    #[arg(long, short)]
    pub precision: Option<i32>,

    /// Cells beyond the query cell on every side; defaults to query.extension
    #[arg(long, short)]
    pub extension: Option<u32>,
}

/// Arguments for `legacy`.
#[derive(Debug, Args)]
pub struct LegacyArgs {
    /// Coordinate value in decimal degrees
    #[arg(allow_negative_numbers = true)]
    pub value: f64,

    /// Legacy precision (0-8)
    #[arg(long, short, default_value = "8")]
    pub precision: i32,
}

fn format_or(format: Option<FormatArg>, config: &ConfigFile) -> IdentifierFormat {
    format
        .map(IdentifierFormat::from)
        .unwrap_or(config.publish.identifier_format)
}

fn print_boundary(boundary: &RegionBoundary) {
    println!("min: {}, {}", boundary.min.latitude, boundary.min.longitude);
    println!("max: {}, {}", boundary.max.latitude, boundary.max.longitude);
}

/// Print the cell containing a point.
pub fn run_region(args: RegionArgs, config: &ConfigFile) -> Result<(), CliError> {
    let coordinate = args.point.coordinate()?;
    let precision = resolve_precision(args.precision, config.publish.storage_precision)?;
    let region = Region::from_coordinate(coordinate, precision);

    println!("id:  {}", region.id(format_or(args.format, config)));
    print_boundary(&region_boundary(&region));
    Ok(())
}

/// Print the partition keys around a point.
pub fn run_neighbors(args: NeighborsArgs, config: &ConfigFile) -> Result<(), CliError> {
    let coordinate = args.point.coordinate()?;
    let precision = resolve_precision(args.precision, config.query.precision)?;
    let extension = args.extension.unwrap_or(config.query.extension);
    let count = args
        .precision_count
        .unwrap_or(config.query.precision_count)
        .max(1);
    validate_precision(precision + count as i32 - 1)?;

    let format = format_or(args.format, config);
    let region = Region::from_coordinate(coordinate, precision);
    for neighbor in connected_regions(&region, extension, precision, count) {
        println!("{}", neighbor.id(format));
    }
    Ok(())
}

/// Print the bounding range of the neighbourhood of a point.
pub fn run_range(args: RangeArgs, config: &ConfigFile) -> Result<(), CliError> {
    let coordinate = args.point.coordinate()?;
    let precision = resolve_precision(args.precision, config.query.precision)?;
    let extension = args.extension.unwrap_or(config.query.extension);

    let region = Region::from_coordinate(coordinate, precision);
    print_boundary(&connected_regions_range(&region, extension, precision));
    Ok(())
}

/// Print the schema-v1 integer quantization of a value.
pub fn run_legacy(args: LegacyArgs) -> Result<(), CliError> {
    let precision = validate_precision(args.precision)?;
    let (low, high) = legacy::range(args.value, precision);

    println!("round: {}", legacy::round(args.value, precision));
    println!("range: {}..{}", low, high);
    Ok(())
}
