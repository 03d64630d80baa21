//! Report data model.
//!
//! A [`Report`] is what a caller submits: one user-facing message and the
//! risk [`Area`]s it applies to. Publishing splits it into one
//! [`ReportRecord`] per grid cell, each carrying only the areas stored in
//! that cell.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::region::{
    region_boundary, Coordinate, IdentifierFormat, Region, RegionBoundary, RegionId,
};

/// A circular risk zone active over a time window.
///
/// Coverage resolution treats an area as its center point. This is valid as
/// long as `radius_meters` is small relative to the grid step at the storage
/// precision (about 6.9 km of latitude at precision 4).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Area {
    pub center: Coordinate,
    pub radius_meters: f32,
    pub begin_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl Area {
    pub fn new(
        center: Coordinate,
        radius_meters: f32,
        begin_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> Self {
        Self {
            center,
            radius_meters,
            begin_time,
            end_time,
        }
    }

    /// Whether `point` lies within the area's radius.
    pub fn contains(&self, point: &Coordinate) -> bool {
        self.center.distance_to(point) <= f64::from(self.radius_meters)
    }

    /// Whether `at` falls inside `[begin_time, end_time]`.
    pub fn is_active_at(&self, at: DateTime<Utc>) -> bool {
        self.begin_time <= at && at <= self.end_time
    }
}

/// A submitted message and the areas it applies to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub user_message: String,
    pub areas: Vec<Area>,
}

impl Report {
    pub fn new(user_message: impl Into<String>, areas: Vec<Area>) -> Self {
        Self {
            user_message: user_message.into(),
            areas,
        }
    }
}

/// The copy of a report stored in one grid cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRecord {
    pub id: Uuid,
    /// Partition the record lives in.
    pub partition_key: RegionId,
    pub region: Region,
    /// Box of `region`, stored so range queries can filter on it.
    pub boundary: RegionBoundary,
    pub user_message: String,
    /// Only the areas that resolve to `region`.
    pub areas: Vec<Area>,
    pub timestamp: DateTime<Utc>,
}

impl ReportRecord {
    /// Build a record for `region` with a fresh id.
    pub fn for_region(
        region: Region,
        format: IdentifierFormat,
        user_message: impl Into<String>,
        areas: Vec<Area>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            partition_key: region.id(format),
            region,
            boundary: region_boundary(&region),
            user_message: user_message.into(),
            areas,
            timestamp,
        }
    }
}
