//! Proximity query planning and matching.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use futures::future::try_join_all;
use tracing::debug;
use uuid::Uuid;

use super::config::QueryConfig;
use crate::region::{
    connected_regions, connected_regions_range, Coordinate, Region, RegionBoundary, RegionId,
};
use crate::report::{Area, ReportRecord};
use crate::store::{ReportStore, StoreError};

/// A stored area that covers a queried point and time.
#[derive(Debug, Clone, PartialEq)]
pub struct Exposure {
    pub record_id: Uuid,
    pub region_id: RegionId,
    pub user_message: String,
    /// Position of `area` within its record.
    pub area_index: usize,
    pub area: Area,
}

/// A point in a location history.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Visit {
    pub location: Coordinate,
    pub at: DateTime<Utc>,
}

impl Visit {
    pub fn new(location: Coordinate, at: DateTime<Utc>) -> Self {
        Self { location, at }
    }
}

/// Turns a point into store lookups and filters the results.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryPlanner {
    config: QueryConfig,
}

impl QueryPlanner {
    pub fn new(config: QueryConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    fn query_cell(&self, coordinate: Coordinate) -> Region {
        Region::from_coordinate(coordinate, self.config.precision())
    }

    /// Partition keys to read for a search around `coordinate`.
    ///
    /// Keys are distinct and keep the neighbour enumeration order. The
    /// two-part identifier format can map cells of different precisions onto
    /// the same key; those collapse to one entry.
    pub fn plan_regions(&self, coordinate: Coordinate) -> Vec<RegionId> {
        let cell = self.query_cell(coordinate);
        let format = self.config.identifier_format();
        let mut seen = HashSet::new();
        connected_regions(
            &cell,
            self.config.extension(),
            self.config.precision(),
            self.config.precision_count(),
        )
        .into_iter()
        .map(|region| region.id(format))
        .filter(|id| seen.insert(id.clone()))
        .collect()
    }

    /// Boundary range to filter on for a search around `coordinate`.
    pub fn plan_range(&self, coordinate: Coordinate) -> RegionBoundary {
        connected_regions_range(
            &self.query_cell(coordinate),
            self.config.extension(),
            self.config.precision(),
        )
    }

    /// Areas near `coordinate` active at `at`, read by partition key.
    pub async fn find_nearby<S: ReportStore>(
        &self,
        store: &S,
        coordinate: Coordinate,
        at: DateTime<Utc>,
    ) -> Result<Vec<Exposure>, StoreError> {
        let partitions = self.plan_regions(coordinate);
        let records = store.records_in_regions(&partitions).await?;
        debug!(
            partitions = partitions.len(),
            records = records.len(),
            "Neighbourhood lookup"
        );
        Ok(matching(&records, coordinate, at))
    }

    /// Areas near `coordinate` active at `at`, read by boundary range.
    pub async fn find_in_range<S: ReportStore>(
        &self,
        store: &S,
        coordinate: Coordinate,
        at: DateTime<Utc>,
    ) -> Result<Vec<Exposure>, StoreError> {
        let range = self.plan_range(coordinate);
        let records = store.records_in_range(&range).await?;
        debug!(
            min_lat = range.min.latitude,
            min_lon = range.min.longitude,
            max_lat = range.max.latitude,
            max_lon = range.max.longitude,
            records = records.len(),
            "Range lookup"
        );
        Ok(matching(&records, coordinate, at))
    }

    /// Check a whole location history, one lookup per visit in parallel.
    ///
    /// An area matched by several visits is reported once, at its first match.
    pub async fn check_history<S: ReportStore>(
        &self,
        store: &S,
        visits: &[Visit],
    ) -> Result<Vec<Exposure>, StoreError> {
        let per_visit = try_join_all(
            visits
                .iter()
                .map(|visit| self.find_nearby(store, visit.location, visit.at)),
        )
        .await?;

        let mut seen = HashSet::new();
        Ok(per_visit
            .into_iter()
            .flatten()
            .filter(|exposure| seen.insert((exposure.record_id, exposure.area_index)))
            .collect())
    }
}

fn matching(records: &[ReportRecord], coordinate: Coordinate, at: DateTime<Utc>) -> Vec<Exposure> {
    records
        .iter()
        .flat_map(|record| {
            record
                .areas
                .iter()
                .enumerate()
                .filter(|(_, area)| area.is_active_at(at) && area.contains(&coordinate))
                .map(|(area_index, area)| Exposure {
                    record_id: record.id,
                    region_id: record.partition_key.clone(),
                    user_message: record.user_message.clone(),
                    area_index,
                    area: area.clone(),
                })
        })
        .collect()
}
