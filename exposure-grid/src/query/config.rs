//! Query planner configuration.

use crate::precision::DEFAULT_STORAGE_PRECISION;
use crate::region::IdentifierFormat;

/// Default number of cells searched beyond the query cell on every side.
pub const DEFAULT_QUERY_EXTENSION: u32 = 1;

/// Default number of consecutive precisions searched.
pub const DEFAULT_QUERY_PRECISION_COUNT: u32 = 1;

/// How a proximity query is widened into store lookups.
///
/// `precision` and `identifier_format` must match the publisher's storage
/// settings, otherwise the planned partition keys never hit a stored record.
///
/// # Example
///
/// ```
/// use exposure_grid::query::QueryConfig;
///
/// let config = QueryConfig::new(4).with_extension(2);
/// assert_eq!(config.extension(), 2);
/// assert_eq!(config.precision_count(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryConfig {
    precision: i32,
    extension: u32,
    precision_count: u32,
    identifier_format: IdentifierFormat,
}

impl QueryConfig {
    pub fn new(precision: i32) -> Self {
        Self {
            precision,
            ..Self::default()
        }
    }

    pub fn with_precision(mut self, precision: i32) -> Self {
        self.precision = precision;
        self
    }

    pub fn with_extension(mut self, extension: u32) -> Self {
        self.extension = extension;
        self
    }

    /// Number of precisions searched, starting at `precision`. Zero is raised to one.
    pub fn with_precision_count(mut self, count: u32) -> Self {
        self.precision_count = count.max(1);
        self
    }

    pub fn with_identifier_format(mut self, format: IdentifierFormat) -> Self {
        self.identifier_format = format;
        self
    }

    pub fn precision(&self) -> i32 {
        self.precision
    }

    pub fn extension(&self) -> u32 {
        self.extension
    }

    pub fn precision_count(&self) -> u32 {
        self.precision_count
    }

    pub fn identifier_format(&self) -> IdentifierFormat {
        self.identifier_format
    }
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            precision: DEFAULT_STORAGE_PRECISION,
            extension: DEFAULT_QUERY_EXTENSION,
            precision_count: DEFAULT_QUERY_PRECISION_COUNT,
            identifier_format: IdentifierFormat::default(),
        }
    }
}
