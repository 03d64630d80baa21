//! Error types for grid inputs.

use thiserror::Error;

/// Errors raised when grid inputs cross the application boundary.
///
/// The grid arithmetic itself never fails; these come from payload
/// conversion and validation before the arithmetic runs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    /// A required region, area or collection was absent.
    #[error("Missing required input: {field}")]
    MissingInput { field: &'static str },

    /// A value was present but outside the accepted range.
    #[error("Invalid input: {field} = {value} ({reason})")]
    InvalidInput {
        field: &'static str,
        value: String,
        reason: String,
    },
}

impl GridError {
    pub fn missing(field: &'static str) -> Self {
        Self::MissingInput { field }
    }

    pub fn invalid(field: &'static str, value: impl ToString, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}
