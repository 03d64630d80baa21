//! Report fan-out.
//!
//! Publishing a [`Report`](crate::report::Report) resolves each of its areas
//! to a storage cell, groups areas by cell, and writes one
//! [`ReportRecord`](crate::report::ReportRecord) per distinct cell:
//!
//! ```text
//! Report { message, areas: [a1, a2, a3] }
//!        │ area_coverage @ storage precision
//!        ▼
//!   cell X ← [a1, a3]        cell Y ← [a2]
//!        │                        │
//!        ▼                        ▼
//!   create_record(X)        create_record(Y)     (concurrent, independent)
//!        └──────────┬─────────────┘
//!                   ▼
//!             PublishOutcome
//! ```
//!
//! Inserts are not transactional. When `k` of `n` inserts fail, the report
//! is visible in the other `n - k` cells only, and the outcome reports
//! [`PublishStatus::PartiallyPublished`] with the failing cells.

mod config;
mod error;
mod outcome;
mod publisher;

pub use config::{PublishConfig, DEFAULT_MAX_CONCURRENT_INSERTS};
pub use error::PublishError;
pub use outcome::{CellOutcome, CellStatus, PublishOutcome, PublishStatus};
pub use publisher::{group_by_cell, CellGroup, FanoutPublisher};
