//! Neighbor and range resolution around a cell.
//!
//! A proximity search centred in one cell can match areas stored just across
//! that cell's edge, because grid alignment is arbitrary relative to the
//! search point. Both resolvers here widen the queried cell by `extension`
//! steps of the target precision on every side:
//!
//! ```text
//!   extension = 1, same precision
//!
//!   +----+----+----+
//!   | NW | N  | NE |
//!   +----+----+----+
//!   | W  | R  | E  |      connected_regions → 9 cells (row-major, south first)
//!   +----+----+----+      connected_regions_range → one box around all 9
//!   | SW | S  | SE |
//!   +----+----+----+
//! ```
//!
//! Enumeration works on integer cell indices, so a wide neighbourhood never
//! accumulates floating-point drift.

use std::ops::Range;

use super::types::{Coordinate, Region, RegionBoundary};
use super::region_boundary;
use crate::precision;

/// Cells of one precision overlapping an extended boundary.
struct CellSpan {
    precision: i32,
    step: f64,
    lat: Range<i64>,
    lon: Range<i64>,
}

impl CellSpan {
    fn around(boundary: &RegionBoundary, extension: u32, precision: i32) -> Self {
        let step = precision::step(precision);
        let extension = i64::from(extension);
        let axis = |min: f64, max: f64| {
            let first = precision::cell_index(min, precision) - extension;
            let end = (max / step).ceil() as i64 + extension;
            first..end
        };
        Self {
            precision,
            step,
            lat: axis(boundary.min.latitude, boundary.max.latitude),
            lon: axis(boundary.min.longitude, boundary.max.longitude),
        }
    }

    fn len(&self) -> usize {
        let rows = (self.lat.end - self.lat.start).max(0) as usize;
        let cols = (self.lon.end - self.lon.start).max(0) as usize;
        rows * cols
    }

    fn coordinate(&self, index: i64) -> f64 {
        index as f64 * self.step + 0.0
    }

    fn regions(&self) -> impl Iterator<Item = Region> + '_ {
        self.lat.clone().flat_map(move |lat| {
            self.lon.clone().map(move |lon| {
                Region::new(self.coordinate(lat), self.coordinate(lon), self.precision)
            })
        })
    }

    fn boundary(&self) -> RegionBoundary {
        RegionBoundary {
            min: Coordinate::new(self.coordinate(self.lat.start), self.coordinate(self.lon.start)),
            max: Coordinate::new(self.coordinate(self.lat.end), self.coordinate(self.lon.end)),
        }
    }
}

/// Enumerate the cells around `region` at one or more precisions.
///
/// For each precision `q` in `precision_start..precision_start + precision_count`,
/// the region's boundary is widened by `extension * step(q)` on every side and
/// every `q`-cell overlapping the widened box is returned. Cells come out
/// precision by precision, latitude ascending in the outer loop and longitude
/// ascending in the inner loop.
///
/// Each precision contributes `(2 * extension + k)^2` cells, where `k` is the
/// number of `q`-cells spanned by one cell of the region's own precision
/// (1 when `q` is the same or coarser).
///
/// Precision bounds are not validated here.
pub fn connected_regions(
    region: &Region,
    extension: u32,
    precision_start: i32,
    precision_count: u32,
) -> Vec<Region> {
    let boundary = region_boundary(region);
    let spans: Vec<CellSpan> = (0..precision_count)
        .map(|offset| CellSpan::around(&boundary, extension, precision_start + offset as i32))
        .collect();

    let mut regions = Vec::with_capacity(spans.iter().map(CellSpan::len).sum());
    for span in &spans {
        regions.extend(span.regions());
    }
    regions
}

/// The cells around `region` at its own precision.
pub fn neighborhood(region: &Region, extension: u32) -> Vec<Region> {
    connected_regions(region, extension, region.precision, 1)
}

/// Overall bounding range of the neighbourhood of `region` at `precision`.
///
/// Cheaper than [`connected_regions`] when the store can filter on boundary
/// fields directly. Both `min` and `max` are widened on both axes, so the
/// result is exactly the bounding box of
/// `connected_regions(region, extension, precision, 1)`.
pub fn connected_regions_range(region: &Region, extension: u32, precision: i32) -> RegionBoundary {
    CellSpan::around(&region_boundary(region), extension, precision).boundary()
}
