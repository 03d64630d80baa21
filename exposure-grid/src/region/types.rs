//! Region type definitions

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::precision;

/// A geographic point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// Mean earth radius in metres (IUGG).
pub const EARTH_RADIUS_METERS: f64 = 6_371_008.8;

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Great-circle distance to `other` in metres.
    ///
    /// Uses the haversine formula on a spherical earth, which is accurate
    /// enough for the few-kilometre radii of risk areas.
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let delta_lat = (other.latitude - self.latitude).to_radians();
        let delta_lon = (other.longitude - self.longitude).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_METERS * c
    }
}

/// One cell of the power-of-two grid.
///
/// `latitude_prefix` and `longitude_prefix` are the south-west corner of the
/// cell at `precision`. Two regions are the same cell only when all three
/// fields match exactly.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    pub latitude_prefix: f64,
    pub longitude_prefix: f64,
    pub precision: i32,
}

impl Region {
    /// Create a region from raw prefixes.
    ///
    /// The prefixes are taken as given; use [`Region::from_coordinate`] or
    /// [`super::adjust_to_precision`] to snap them onto the grid.
    pub fn new(latitude_prefix: f64, longitude_prefix: f64, precision: i32) -> Self {
        Self {
            latitude_prefix,
            longitude_prefix,
            precision,
        }
    }

    /// The cell containing `coordinate` at `precision`.
    pub fn from_coordinate(coordinate: Coordinate, precision: i32) -> Self {
        Self {
            latitude_prefix: precision::round(coordinate.latitude, precision),
            longitude_prefix: precision::round(coordinate.longitude, precision),
            precision,
        }
    }

    /// Partition identifier for this cell.
    pub fn id(&self, format: IdentifierFormat) -> RegionId {
        RegionId::new(self, format)
    }

    fn key(&self) -> (u64, u64, i32) {
        // +0.0 folds -0.0 onto 0.0 so both hash and compare alike.
        (
            (self.latitude_prefix + 0.0).to_bits(),
            (self.longitude_prefix + 0.0).to_bits(),
            self.precision,
        )
    }
}

impl PartialEq for Region {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Region {}

impl Hash for Region {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}) @ {}",
            self.latitude_prefix, self.longitude_prefix, self.precision
        )
    }
}

/// Half-open box `[min, max)` covered by a region or a group of regions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegionBoundary {
    pub min: Coordinate,
    pub max: Coordinate,
}

impl RegionBoundary {
    pub fn new(min: Coordinate, max: Coordinate) -> Self {
        Self { min, max }
    }

    /// Whether `coordinate` lies inside the half-open box.
    pub fn contains(&self, coordinate: &Coordinate) -> bool {
        (self.min.latitude..self.max.latitude).contains(&coordinate.latitude)
            && (self.min.longitude..self.max.longitude).contains(&coordinate.longitude)
    }

    /// Whether `other` lies entirely inside this box (edges inclusive).
    ///
    /// This is the range predicate applied to stored records' own boundaries.
    pub fn encloses(&self, other: &RegionBoundary) -> bool {
        self.min.latitude <= other.min.latitude
            && other.max.latitude <= self.max.latitude
            && self.min.longitude <= other.min.longitude
            && other.max.longitude <= self.max.longitude
    }
}

/// Layout of a [`RegionId`] string.
///
/// The layout decides physical partition placement, so it must match the
/// schema the store was created with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdentifierFormat {
    /// `"{lat},{lon}"` (schema v1 partitions).
    LatLon,
    /// `"{lat},{lon},{precision}"` (schema v2 partitions).
    #[default]
    LatLonPrecision,
}

impl IdentifierFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LatLon => "lat_lon",
            Self::LatLonPrecision => "lat_lon_precision",
        }
    }
}

impl fmt::Display for IdentifierFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for IdentifierFormat {
    type Err = ();

    /// Parse a format name (case-insensitive): "lat_lon" or "lat_lon_precision".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lat_lon" | "v1" => Ok(Self::LatLon),
            "lat_lon_precision" | "v2" => Ok(Self::LatLonPrecision),
            _ => Err(()),
        }
    }
}

/// Partition key derived from a region.
///
/// Numbers are written in their shortest round-trip form, e.g. `40.6875,-73.9375,4`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionId(String);

impl RegionId {
    pub fn new(region: &Region, format: IdentifierFormat) -> Self {
        let lat = region.latitude_prefix + 0.0;
        let lon = region.longitude_prefix + 0.0;
        let id = match format {
            IdentifierFormat::LatLon => format!("{},{}", lat, lon),
            IdentifierFormat::LatLonPrecision => {
                format!("{},{},{}", lat, lon, region.precision)
            }
        };
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RegionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
