//! Error types for the publish module.

use thiserror::Error;

use crate::region::GridError;

/// Errors that stop a report from being fanned out at all.
///
/// Per-cell insert failures are not errors at this level; they are
/// reported in [`super::PublishOutcome`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PublishError {
    /// The report carried no areas, so there is no cell to store it in.
    #[error("Report has no areas to publish")]
    EmptyReport,

    /// The submitted payload failed validation.
    #[error("Invalid report payload: {0}")]
    InvalidPayload(#[from] GridError),
}
