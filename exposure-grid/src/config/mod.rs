//! Application configuration.
//!
//! User settings live in an INI file, `~/.exposure-grid/config.ini` by
//! default, with `[publish]`, `[query]` and `[logging]` sections. A missing
//! file yields defaults; a present file overlays them key by key.
//!
//! # Example
//!
//! ```
//! use exposure_grid::config::ConfigFile;
//!
//! let config = ConfigFile::default();
//! let publish = config.publish_config();
//! assert_eq!(publish.storage_precision(), 4);
//! ```

mod defaults;
mod file;
mod parser;
mod settings;
mod writer;

pub use defaults::*;
pub use file::{config_directory, config_file_path, ConfigFileError};
pub use settings::{ConfigFile, LoggingSettings, PublishSettings, QuerySettings};
