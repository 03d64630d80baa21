//! Region grid.
//!
//! A [`Region`] is one cell of the power-of-two grid described in
//! [`crate::precision`]. This module computes cell boundaries, snaps
//! arbitrary prefixes onto the grid, and derives the [`RegionId`] partition
//! keys used by the store.
//!
//! # Architecture
//!
//! ```text
//! precision (round / range)
//!     └── region (boundary, adjust, id)
//!           ├── neighbors (connected cells, connected range)   ← query path
//!           └── coverage  (areas → distinct cells)             ← publish path
//! ```
//!
//! Everything here is pure arithmetic and safe to call from any thread.
//!
//! # Example
//!
//! ```
//! use exposure_grid::region::{region_boundary, Coordinate, IdentifierFormat, Region};
//!
//! let region = Region::from_coordinate(Coordinate::new(40.7306, -73.9352), 4);
//! let boundary = region_boundary(&region);
//!
//! assert_eq!(boundary.min, Coordinate::new(40.6875, -73.9375));
//! assert_eq!(boundary.max, Coordinate::new(40.75, -73.875));
//! assert_eq!(region.id(IdentifierFormat::LatLon).as_str(), "40.6875,-73.9375");
//! ```

pub mod coverage;
mod error;
pub mod neighbors;
mod types;

pub use coverage::{area_coverage, regions_coverage};
pub use error::GridError;
pub use neighbors::{connected_regions, connected_regions_range, neighborhood};
pub use types::{
    Coordinate, IdentifierFormat, Region, RegionBoundary, RegionId, EARTH_RADIUS_METERS,
};

use crate::precision;

/// Bounding box `[min, max)` of a single cell.
///
/// Each prefix is run through [`precision::range`] at the region's own
/// precision, so un-aligned prefixes yield the box of the cell containing them.
pub fn region_boundary(region: &Region) -> RegionBoundary {
    let (min_lat, max_lat) = precision::range(region.latitude_prefix, region.precision);
    let (min_lon, max_lon) = precision::range(region.longitude_prefix, region.precision);
    RegionBoundary {
        min: Coordinate::new(min_lat, min_lon),
        max: Coordinate::new(max_lat, max_lon),
    }
}

/// Re-quantize a region's prefixes onto its own grid.
pub fn adjust_to_precision(region: &Region) -> Region {
    Region {
        latitude_prefix: precision::round(region.latitude_prefix, region.precision),
        longitude_prefix: precision::round(region.longitude_prefix, region.precision),
        precision: region.precision,
    }
}
