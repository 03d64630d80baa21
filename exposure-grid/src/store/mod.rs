//! Report storage abstraction.
//!
//! The document database is an external collaborator. Everything the grid
//! needs from it is captured by [`ReportStore`]:
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │  publish::FanoutPublisher  query::QueryPlanner │
//! └───────────────┬───────────────────────────────┘
//!                 │ ReportStore
//!                 ▼
//! ┌───────────────────────────────────────────────┐
//! │  InMemoryReportStore (tests, CLI)             │
//! │  document-database adapter (deployment)       │
//! └───────────────────────────────────────────────┘
//! ```
//!
//! Records are partitioned by [`RegionId`]; each `create_record` call writes
//! to exactly one partition and is independent of every other call.

mod memory;

pub use memory::InMemoryReportStore;

use std::future::Future;

use thiserror::Error;

use crate::region::{RegionBoundary, RegionId};
use crate::report::ReportRecord;

/// Errors from the backing store.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    /// The store rejected the request with a status code.
    #[error("Store returned status {code}: {message}")]
    Status { code: u16, message: String },

    /// A record with the same id already exists in the partition.
    #[error("Record {id} already exists in partition {partition}")]
    Conflict { partition: RegionId, id: String },

    /// The store could not be reached.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// The request was dropped before it finished.
    #[error("Store request aborted: {0}")]
    Aborted(String),
}

impl StoreError {
    /// HTTP-style status code for reporting partial failures.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Status { code, .. } => *code,
            Self::Conflict { .. } => 409,
            Self::Unavailable(_) => 503,
            Self::Aborted(_) => 499,
        }
    }
}

/// Partitioned report storage.
///
/// Implementations must be safe to call concurrently; the publisher issues
/// one `create_record` per cell in parallel.
pub trait ReportStore: Send + Sync + 'static {
    /// Insert `record` into the partition named by `record.partition_key`.
    fn create_record(
        &self,
        record: ReportRecord,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// All records stored in any of `partitions`.
    ///
    /// Unknown partitions contribute nothing.
    fn records_in_regions(
        &self,
        partitions: &[RegionId],
    ) -> impl Future<Output = Result<Vec<ReportRecord>, StoreError>> + Send;

    /// All records whose own boundary lies inside `range` (edges inclusive).
    fn records_in_range(
        &self,
        range: &RegionBoundary,
    ) -> impl Future<Output = Result<Vec<ReportRecord>, StoreError>> + Send;
}
