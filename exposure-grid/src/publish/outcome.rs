//! Aggregate result of one fan-out.

use std::fmt;

use uuid::Uuid;

use crate::region::{Region, RegionId};
use crate::store::StoreError;

/// Summary of how much of a report became visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishStatus {
    /// Every cell accepted its record.
    Published,
    /// Some cells accepted their record and some did not.
    PartiallyPublished,
    /// No cell accepted its record.
    Failed,
}

impl fmt::Display for PublishStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Published => write!(f, "published"),
            Self::PartiallyPublished => write!(f, "partially published"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// What happened to one cell's insert.
#[derive(Debug, Clone, PartialEq)]
pub enum CellStatus {
    /// The store accepted the record.
    Published { record_id: Uuid },
    /// The store rejected the record or the insert task died.
    Failed(StoreError),
    /// The fan-out was cancelled before this insert finished.
    Cancelled,
}

impl CellStatus {
    pub fn is_published(&self) -> bool {
        matches!(self, Self::Published { .. })
    }
}

/// Result for one target cell.
#[derive(Debug, Clone, PartialEq)]
pub struct CellOutcome {
    pub region: Region,
    pub region_id: RegionId,
    /// Number of report areas stored under this cell
    pub area_count: usize,
    pub status: CellStatus,
}

/// Per-cell results of a fan-out, in the order the cells were first seen
/// among the report's areas.
#[derive(Debug, Clone, PartialEq)]
pub struct PublishOutcome {
    cells: Vec<CellOutcome>,
    cancelled: bool,
}

impl PublishOutcome {
    pub(crate) fn new(cells: Vec<CellOutcome>, cancelled: bool) -> Self {
        Self { cells, cancelled }
    }

    pub fn status(&self) -> PublishStatus {
        let published = self.published_cells().count();
        if published == self.cells.len() {
            PublishStatus::Published
        } else if published == 0 {
            PublishStatus::Failed
        } else {
            PublishStatus::PartiallyPublished
        }
    }

    pub fn cells(&self) -> &[CellOutcome] {
        &self.cells
    }

    /// Cells whose record is durably stored.
    pub fn published_cells(&self) -> impl Iterator<Item = &CellOutcome> {
        self.cells.iter().filter(|cell| cell.status.is_published())
    }

    /// Cells whose record is not stored, whether rejected or cancelled.
    pub fn unpublished_cells(&self) -> impl Iterator<Item = &CellOutcome> {
        self.cells.iter().filter(|cell| !cell.status.is_published())
    }

    /// Cells the store rejected, with the store status code.
    pub fn failures(&self) -> impl Iterator<Item = (&RegionId, u16)> {
        self.cells.iter().filter_map(|cell| match &cell.status {
            CellStatus::Failed(err) => Some((&cell.region_id, err.status_code())),
            _ => None,
        })
    }

    /// Whether cancellation interrupted the fan-out.
    pub fn was_cancelled(&self) -> bool {
        self.cancelled
    }
}
