//! INI serialization logic for converting `ConfigFile` → INI string.

use super::settings::ConfigFile;

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    format!(
        r#"[publish]
; Grid precision reports are stored at (0-8). Each step halves the cell
; size: 0 = 1 degree, 4 = 1/16 degree (about 7 km of latitude).
storage_precision = {}
; Partition key layout:
;   lat_lon_precision - "40.6875,-73.9375,4" (schema v2)
;   lat_lon           - "40.6875,-73.9375" (schema v1)
identifier_format = {}
; Upper bound on concurrent store inserts for one report
max_concurrent_inserts = {}

[query]
; Precision proximity queries are planned at; match storage_precision
precision = {}
; Cells searched beyond the query cell on every side
extension = {}
; Number of consecutive precisions searched, starting at precision
precision_count = {}

[logging]
directory = {}
file = {}
; Default level when RUST_LOG is not set: trace, debug, info, warn, error
level = {}
"#,
        config.publish.storage_precision,
        config.publish.identifier_format,
        config.publish.max_concurrent_inserts,
        config.query.precision,
        config.query.extension,
        config.query.precision_count,
        config.logging.directory.display(),
        config.logging.file,
        config.logging.level,
    )
}
