//! Configuration file handling for ~/.exposure-grid/config.ini.
//!
//! Settings structs live in [`super::settings`], constants in [`super::defaults`],
//! parsing in [`super::parser`], and serialization in [`super::writer`].

use std::path::{Path, PathBuf};

use ini::Ini;
use thiserror::Error;

use super::settings::ConfigFile;
use crate::publish::PublishConfig;
use crate::query::QueryConfig;

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] ini::Error),

    /// Failed to write config file
    #[error("Failed to write config file: {0}")]
    WriteError(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {section}.{key} = '{value}' - {reason}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },

    /// Failed to create config directory
    #[error("Failed to create config directory: {0}")]
    DirectoryError(std::io::Error),
}

impl ConfigFile {
    /// Load configuration from the default path (~/.exposure-grid/config.ini).
    pub fn load() -> Result<Self, ConfigFileError> {
        Self::load_from(&config_file_path())
    }

    /// Load configuration from a specific path.
    ///
    /// If the file doesn't exist, returns defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigFileError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path)?;
        super::parser::parse_ini(&ini)
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigFileError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigFileError::DirectoryError)?;
        }

        let content = super::writer::to_config_string(self);
        std::fs::write(path, content).map_err(|e| ConfigFileError::WriteError(e.to_string()))
    }

    /// Fan-out settings as a publisher config.
    pub fn publish_config(&self) -> PublishConfig {
        PublishConfig::new(self.publish.storage_precision)
            .with_identifier_format(self.publish.identifier_format)
            .with_max_concurrent_inserts(self.publish.max_concurrent_inserts)
    }

    /// Query settings as a planner config.
    ///
    /// The identifier format always follows `[publish]`, so planned keys
    /// address the partitions the publisher writes.
    pub fn query_config(&self) -> QueryConfig {
        QueryConfig::new(self.query.precision)
            .with_extension(self.query.extension)
            .with_precision_count(self.query.precision_count)
            .with_identifier_format(self.publish.identifier_format)
    }
}

/// Get the path to the config directory (~/.exposure-grid).
pub fn config_directory() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".exposure-grid")
}

/// Get the path to the config file (~/.exposure-grid/config.ini).
pub fn config_file_path() -> PathBuf {
    config_directory().join("config.ini")
}
