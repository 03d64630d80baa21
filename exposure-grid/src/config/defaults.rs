//! Default values and constants for all configuration settings.

use std::path::PathBuf;

use super::settings::*;
use crate::precision::DEFAULT_STORAGE_PRECISION;
use crate::publish::DEFAULT_MAX_CONCURRENT_INSERTS;
use crate::query::{DEFAULT_QUERY_EXTENSION, DEFAULT_QUERY_PRECISION_COUNT};
use crate::region::IdentifierFormat;

// =============================================================================
// Publish
// =============================================================================

pub const DEFAULT_PUBLISH_STORAGE_PRECISION: i32 = DEFAULT_STORAGE_PRECISION;
pub const DEFAULT_PUBLISH_MAX_CONCURRENT_INSERTS: usize = DEFAULT_MAX_CONCURRENT_INSERTS;

// =============================================================================
// Query
// =============================================================================

pub const DEFAULT_QUERY_PRECISION: i32 = DEFAULT_STORAGE_PRECISION;

// =============================================================================
// Logging
// =============================================================================

pub const DEFAULT_LOG_DIRECTORY: &str = "logs";
pub const DEFAULT_LOG_FILE: &str = "exposure-grid.log";
pub const DEFAULT_LOG_LEVEL: &str = "info";

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            publish: PublishSettings {
                storage_precision: DEFAULT_PUBLISH_STORAGE_PRECISION,
                identifier_format: IdentifierFormat::default(),
                max_concurrent_inserts: DEFAULT_PUBLISH_MAX_CONCURRENT_INSERTS,
            },
            query: QuerySettings {
                precision: DEFAULT_QUERY_PRECISION,
                extension: DEFAULT_QUERY_EXTENSION,
                precision_count: DEFAULT_QUERY_PRECISION_COUNT,
            },
            logging: LoggingSettings::default(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(DEFAULT_LOG_DIRECTORY),
            file: DEFAULT_LOG_FILE.to_string(),
            level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}
