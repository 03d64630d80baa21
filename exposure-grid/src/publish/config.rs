//! Fan-out configuration.

use crate::precision::DEFAULT_STORAGE_PRECISION;
use crate::region::IdentifierFormat;

/// Default cap on concurrent per-cell inserts.
pub const DEFAULT_MAX_CONCURRENT_INSERTS: usize = 16;

/// Settings for [`super::FanoutPublisher`].
///
/// # Example
///
/// ```
/// use exposure_grid::publish::PublishConfig;
/// use exposure_grid::region::IdentifierFormat;
///
/// let config = PublishConfig::default()
///     .with_storage_precision(6)
///     .with_identifier_format(IdentifierFormat::LatLon);
/// assert_eq!(config.storage_precision(), 6);
/// assert_eq!(config.max_concurrent_inserts(), 16);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublishConfig {
    /// Grid precision records are stored at
    storage_precision: i32,
    /// Layout of partition keys
    identifier_format: IdentifierFormat,
    /// Upper bound on inserts in flight for one report
    max_concurrent_inserts: usize,
}

impl PublishConfig {
    pub fn new(storage_precision: i32) -> Self {
        Self {
            storage_precision,
            ..Self::default()
        }
    }

    pub fn with_storage_precision(mut self, precision: i32) -> Self {
        self.storage_precision = precision;
        self
    }

    pub fn with_identifier_format(mut self, format: IdentifierFormat) -> Self {
        self.identifier_format = format;
        self
    }

    /// Set the insert concurrency cap. Values below 1 are raised to 1.
    pub fn with_max_concurrent_inserts(mut self, limit: usize) -> Self {
        self.max_concurrent_inserts = limit.max(1);
        self
    }

    pub fn storage_precision(&self) -> i32 {
        self.storage_precision
    }

    pub fn identifier_format(&self) -> IdentifierFormat {
        self.identifier_format
    }

    pub fn max_concurrent_inserts(&self) -> usize {
        self.max_concurrent_inserts
    }
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            storage_precision: DEFAULT_STORAGE_PRECISION,
            identifier_format: IdentifierFormat::default(),
            max_concurrent_inserts: DEFAULT_MAX_CONCURRENT_INSERTS,
        }
    }
}
