//! Serialization-boundary payloads.
//!
//! Clients have spoken two region schemas over time:
//!
//! - **v1**: `{ latitudePrefix, longitudePrefix }`, stored under the
//!   configured storage precision and addressed as `"{lat},{lon}"`
//! - **v2**: `{ latitudePrefix, longitudePrefix, precision }`, addressed as
//!   `"{lat},{lon},{precision}"`
//!
//! Both map onto the one canonical [`Region`]. Report submissions arrive as
//! [`ReportPayload`], whose fields are all optional on the wire so that a
//! missing field is reported as [`GridError::MissingInput`] instead of a
//! generic parse failure.
//!
//! This is the layer that range-checks coordinates and precision; the grid
//! arithmetic behind it accepts any finite value.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::precision::{MAX_PRECISION, MIN_PRECISION};
use crate::region::{adjust_to_precision, Coordinate, GridError, IdentifierFormat, Region};
use crate::report::{Area, Report};

/// Region schema version spoken by a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaVersion {
    V1,
    V2,
}

impl SchemaVersion {
    /// Partition key layout used by stores of this schema.
    pub fn identifier_format(&self) -> IdentifierFormat {
        match self {
            Self::V1 => IdentifierFormat::LatLon,
            Self::V2 => IdentifierFormat::LatLonPrecision,
        }
    }
}

/// Check that `precision` is inside the application range `[0, 8]`.
pub fn validate_precision(precision: i32) -> Result<i32, GridError> {
    if (MIN_PRECISION..=MAX_PRECISION).contains(&precision) {
        Ok(precision)
    } else {
        Err(GridError::invalid(
            "precision",
            precision,
            format!("must be between {} and {}", MIN_PRECISION, MAX_PRECISION),
        ))
    }
}

/// Check latitude/longitude ranges.
pub fn validate_coordinate(coordinate: &Coordinate) -> Result<(), GridError> {
    if !(-90.0..=90.0).contains(&coordinate.latitude) {
        return Err(GridError::invalid(
            "latitude",
            coordinate.latitude,
            "must be between -90 and 90",
        ));
    }
    if !(-180.0..=180.0).contains(&coordinate.longitude) {
        return Err(GridError::invalid(
            "longitude",
            coordinate.longitude,
            "must be between -180 and 180",
        ));
    }
    Ok(())
}

/// Schema-v1 region.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionV1 {
    #[serde(default)]
    pub latitude_prefix: Option<f64>,
    #[serde(default)]
    pub longitude_prefix: Option<f64>,
}

impl RegionV1 {
    /// Canonical region at `precision`, snapped onto the grid.
    pub fn into_region(self, precision: i32) -> Result<Region, GridError> {
        let precision = validate_precision(precision)?;
        let coordinate = prefixes(self.latitude_prefix, self.longitude_prefix)?;
        Ok(adjust_to_precision(&Region::new(
            coordinate.latitude,
            coordinate.longitude,
            precision,
        )))
    }
}

impl From<&Region> for RegionV1 {
    fn from(region: &Region) -> Self {
        Self {
            latitude_prefix: Some(region.latitude_prefix),
            longitude_prefix: Some(region.longitude_prefix),
        }
    }
}

/// Schema-v2 region.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionV2 {
    #[serde(default)]
    pub latitude_prefix: Option<f64>,
    #[serde(default)]
    pub longitude_prefix: Option<f64>,
    #[serde(default)]
    pub precision: Option<i32>,
}

impl TryFrom<RegionV2> for Region {
    type Error = GridError;

    fn try_from(payload: RegionV2) -> Result<Self, Self::Error> {
        let precision = payload.precision.ok_or(GridError::missing("precision"))?;
        let precision = validate_precision(precision)?;
        let coordinate = prefixes(payload.latitude_prefix, payload.longitude_prefix)?;
        Ok(adjust_to_precision(&Region::new(
            coordinate.latitude,
            coordinate.longitude,
            precision,
        )))
    }
}

impl From<&Region> for RegionV2 {
    fn from(region: &Region) -> Self {
        Self {
            latitude_prefix: Some(region.latitude_prefix),
            longitude_prefix: Some(region.longitude_prefix),
            precision: Some(region.precision),
        }
    }
}

fn prefixes(latitude: Option<f64>, longitude: Option<f64>) -> Result<Coordinate, GridError> {
    let coordinate = Coordinate::new(
        latitude.ok_or(GridError::missing("latitudePrefix"))?,
        longitude.ok_or(GridError::missing("longitudePrefix"))?,
    );
    validate_coordinate(&coordinate)?;
    Ok(coordinate)
}

/// One area of a submission.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaPayload {
    #[serde(default)]
    pub location: Option<Coordinate>,
    #[serde(default)]
    pub radius_meters: Option<f32>,
    #[serde(default)]
    pub begin_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
}

impl TryFrom<AreaPayload> for Area {
    type Error = GridError;

    fn try_from(payload: AreaPayload) -> Result<Self, Self::Error> {
        let center = payload.location.ok_or(GridError::missing("area.location"))?;
        validate_coordinate(&center)?;

        let radius = payload
            .radius_meters
            .ok_or(GridError::missing("area.radiusMeters"))?;
        if !radius.is_finite() || radius < 0.0 {
            return Err(GridError::invalid(
                "area.radiusMeters",
                radius,
                "must be a non-negative number",
            ));
        }

        let begin = payload.begin_time.ok_or(GridError::missing("area.beginTime"))?;
        let end = payload.end_time.ok_or(GridError::missing("area.endTime"))?;
        if end < begin {
            return Err(GridError::invalid(
                "area.endTime",
                end,
                "must not precede beginTime",
            ));
        }

        Ok(Area::new(center, radius, begin, end))
    }
}

impl From<&Area> for AreaPayload {
    fn from(area: &Area) -> Self {
        Self {
            location: Some(area.center),
            radius_meters: Some(area.radius_meters),
            begin_time: Some(area.begin_time),
            end_time: Some(area.end_time),
        }
    }
}

/// A report submission as received from a client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportPayload {
    #[serde(default)]
    pub user_message: Option<String>,
    #[serde(default)]
    pub areas: Option<Vec<AreaPayload>>,
}

impl TryFrom<ReportPayload> for Report {
    type Error = GridError;

    fn try_from(payload: ReportPayload) -> Result<Self, Self::Error> {
        let message = payload
            .user_message
            .ok_or(GridError::missing("userMessage"))?;
        if message.trim().is_empty() {
            return Err(GridError::invalid("userMessage", "\"\"", "must not be empty"));
        }

        let areas = payload.areas.ok_or(GridError::missing("areas"))?;
        if areas.is_empty() {
            return Err(GridError::invalid("areas", "[]", "must contain at least one area"));
        }

        let areas = areas
            .into_iter()
            .map(Area::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Report::new(message, areas))
    }
}

impl From<&Report> for ReportPayload {
    fn from(report: &Report) -> Self {
        Self {
            user_message: Some(report.user_message.clone()),
            areas: Some(report.areas.iter().map(AreaPayload::from).collect()),
        }
    }
}
