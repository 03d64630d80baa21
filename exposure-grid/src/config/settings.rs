//! Settings structs for all configuration sections.
//!
//! Each struct represents one `[section]` of the INI config file.

use std::path::PathBuf;

use crate::region::IdentifierFormat;

/// Complete application configuration loaded from config.ini.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    /// Publish settings
    pub publish: PublishSettings,
    /// Query settings
    pub query: QuerySettings,
    /// Logging settings
    pub logging: LoggingSettings,
}

/// Report fan-out configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct PublishSettings {
    /// Grid precision records are stored at (0-8)
    pub storage_precision: i32,
    /// Partition key layout: "lat_lon_precision" or "lat_lon"
    pub identifier_format: IdentifierFormat,
    /// Upper bound on concurrent store inserts per report
    pub max_concurrent_inserts: usize,
}

/// Proximity query configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct QuerySettings {
    /// Grid precision queries are planned at (0-8)
    pub precision: i32,
    /// Cells searched beyond the query cell on every side
    pub extension: u32,
    /// Number of consecutive precisions searched
    pub precision_count: u32,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    /// Directory holding the log file
    pub directory: PathBuf,
    /// Log file name
    pub file: String,
    /// Default level when RUST_LOG is not set
    pub level: String,
}
