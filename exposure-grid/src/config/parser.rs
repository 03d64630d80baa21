//! INI parsing logic for converting `Ini` → `ConfigFile`.
//!
//! This is the single place where INI key names are mapped to struct fields.

use std::path::PathBuf;
use std::str::FromStr;

use ini::{Ini, Properties};

use super::file::ConfigFileError;
use super::settings::ConfigFile;
use crate::precision::{MAX_PRECISION, MIN_PRECISION};

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [publish] section
    if let Some(section) = ini.section(Some("publish")) {
        if let Some(v) = section.get("storage_precision") {
            config.publish.storage_precision = parse_precision("publish", "storage_precision", v)?;
        }
        if let Some(v) = section.get("identifier_format") {
            config.publish.identifier_format =
                v.parse().map_err(|_| ConfigFileError::InvalidValue {
                    section: "publish".to_string(),
                    key: "identifier_format".to_string(),
                    value: v.to_string(),
                    reason: "must be 'lat_lon_precision' or 'lat_lon'".to_string(),
                })?;
        }
        if let Some(limit) = parse_positive(section, "publish", "max_concurrent_inserts")? {
            config.publish.max_concurrent_inserts = limit;
        }
    }

    // [query] section
    if let Some(section) = ini.section(Some("query")) {
        if let Some(v) = section.get("precision") {
            config.query.precision = parse_precision("query", "precision", v)?;
        }
        if let Some(v) = section.get("extension") {
            config.query.extension = v.trim().parse().map_err(|_| ConfigFileError::InvalidValue {
                section: "query".to_string(),
                key: "extension".to_string(),
                value: v.to_string(),
                reason: "must be a non-negative integer".to_string(),
            })?;
        }
        if let Some(count) = parse_positive(section, "query", "precision_count")? {
            config.query.precision_count = count;
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = section.get("directory") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.directory = expand_tilde(v);
            }
        }
        if let Some(v) = section.get("file") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.file = v.to_string();
            }
        }
        if let Some(v) = section.get("level") {
            let v = v.trim().to_lowercase();
            if tracing::Level::from_str(&v).is_err() {
                return Err(ConfigFileError::InvalidValue {
                    section: "logging".to_string(),
                    key: "level".to_string(),
                    value: v,
                    reason: "must be one of: trace, debug, info, warn, error".to_string(),
                });
            }
            config.logging.level = v;
        }
    }

    Ok(config)
}

fn parse_precision(section: &str, key: &str, value: &str) -> Result<i32, ConfigFileError> {
    value
        .trim()
        .parse::<i32>()
        .ok()
        .filter(|p| (MIN_PRECISION..=MAX_PRECISION).contains(p))
        .ok_or_else(|| ConfigFileError::InvalidValue {
            section: section.to_string(),
            key: key.to_string(),
            value: value.to_string(),
            reason: format!(
                "must be an integer between {} and {}",
                MIN_PRECISION, MAX_PRECISION
            ),
        })
}

/// Read `key` as an integer of at least one, if present.
fn parse_positive<T>(
    properties: &Properties,
    section: &str,
    key: &str,
) -> Result<Option<T>, ConfigFileError>
where
    T: FromStr + PartialOrd + From<u8>,
{
    let Some(value) = properties.get(key) else {
        return Ok(None);
    };
    match value.trim().parse::<T>() {
        Ok(parsed) if parsed >= T::from(1) => Ok(Some(parsed)),
        _ => Err(ConfigFileError::InvalidValue {
            section: section.to_string(),
            key: key.to_string(),
            value: value.to_string(),
            reason: "must be a positive integer".to_string(),
        }),
    }
}

/// Expand a leading `~/` to the home directory.
pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}
