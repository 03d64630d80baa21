//! In-memory report store.

use dashmap::DashMap;
use tracing::trace;

use super::{ReportStore, StoreError};
use crate::region::{RegionBoundary, RegionId};
use crate::report::ReportRecord;

/// Partitioned in-memory store.
///
/// Each partition is a `DashMap` entry, so writes to different cells only
/// contend when they hash to the same shard.
#[derive(Debug, Default)]
pub struct InMemoryReportStore {
    partitions: DashMap<RegionId, Vec<ReportRecord>>,
}

impl InMemoryReportStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of non-empty partitions.
    pub fn partition_count(&self) -> usize {
        self.partitions.len()
    }

    /// Total number of records across partitions.
    pub fn record_count(&self) -> usize {
        self.partitions.iter().map(|entry| entry.value().len()).sum()
    }

    /// Copy of the records in one partition.
    pub fn partition(&self, id: &RegionId) -> Vec<ReportRecord> {
        self.partitions
            .get(id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    /// All partition keys, sorted.
    pub fn partition_keys(&self) -> Vec<RegionId> {
        let mut keys: Vec<RegionId> = self.partitions.iter().map(|e| e.key().clone()).collect();
        keys.sort();
        keys
    }

    fn insert(&self, record: ReportRecord) -> Result<(), StoreError> {
        let mut partition = self
            .partitions
            .entry(record.partition_key.clone())
            .or_default();
        if partition.iter().any(|existing| existing.id == record.id) {
            return Err(StoreError::Conflict {
                partition: record.partition_key,
                id: record.id.to_string(),
            });
        }
        trace!(partition = %record.partition_key, id = %record.id, "Record stored");
        partition.push(record);
        Ok(())
    }
}

impl ReportStore for InMemoryReportStore {
    async fn create_record(&self, record: ReportRecord) -> Result<(), StoreError> {
        self.insert(record)
    }

    async fn records_in_regions(
        &self,
        partitions: &[RegionId],
    ) -> Result<Vec<ReportRecord>, StoreError> {
        Ok(partitions
            .iter()
            .flat_map(|id| self.partition(id))
            .collect())
    }

    async fn records_in_range(
        &self,
        range: &RegionBoundary,
    ) -> Result<Vec<ReportRecord>, StoreError> {
        let mut records: Vec<ReportRecord> = self
            .partitions
            .iter()
            .flat_map(|entry| {
                entry
                    .value()
                    .iter()
                    .filter(|record| range.encloses(&record.boundary))
                    .cloned()
                    .collect::<Vec<_>>()
            })
            .collect();
        records.sort_by(|a, b| a.partition_key.cmp(&b.partition_key));
        Ok(records)
    }
}
