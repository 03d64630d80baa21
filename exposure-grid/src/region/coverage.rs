//! Coverage resolution: which cells a risk area is stored under.
//!
//! An area is stored in the cell containing its center. True circle/cell
//! overlap is not computed; callers rely on the radius being small relative
//! to the storage grid step, and on queries searching neighbouring cells
//! (see [`super::neighbors`]) to pick up centers near an edge.

use std::collections::HashSet;

use super::types::Region;
use crate::report::Area;

/// The single cell covering `area` at `precision`.
pub fn area_coverage(area: &Area, precision: i32) -> Region {
    Region::from_coordinate(area.center, precision)
}

/// Distinct cells covering `areas` at `precision`, in first-seen order.
///
/// Areas resolving to the same cell contribute one entry.
pub fn regions_coverage(areas: &[Area], precision: i32) -> Vec<Region> {
    let mut seen = HashSet::with_capacity(areas.len());
    areas
        .iter()
        .map(|area| area_coverage(area, precision))
        .filter(|region| seen.insert(*region))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::Coordinate;
    use chrono::{TimeZone, Utc};

    fn area(lat: f64, lon: f64) -> Area {
        let begin = Utc.with_ymd_and_hms(2020, 6, 1, 8, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2020, 6, 1, 18, 0, 0).unwrap();
        Area::new(Coordinate::new(lat, lon), 100.0, begin, end)
    }

    #[test]
    fn test_area_coverage_is_center_cell() {
        let region = area_coverage(&area(40.7306, -73.9352), 4);
        assert_eq!(region, Region::new(40.6875, -73.9375, 4));
    }

    #[test]
    fn test_same_center_yields_one_cell() {
        let areas = [area(40.7306, -73.9352), area(40.7306, -73.9352)];
        assert_eq!(regions_coverage(&areas, 4).len(), 1);
    }

    #[test]
    fn test_same_cell_different_centers_deduplicate() {
        let areas = [area(40.70, -73.93), area(40.74, -73.88)];
        assert_eq!(
            regions_coverage(&areas, 4),
            vec![Region::new(40.6875, -73.9375, 4)]
        );
    }

    #[test]
    fn test_distinct_cells_keep_first_seen_order() {
        let areas = [
            area(51.5074, -0.1278),
            area(40.7306, -73.9352),
            area(51.5074, -0.1278),
        ];
        let regions = regions_coverage(&areas, 0);
        assert_eq!(
            regions,
            vec![Region::new(51.0, -1.0, 0), Region::new(40.0, -74.0, 0)]
        );
    }

    #[test]
    fn test_empty_areas_yield_no_cells() {
        assert!(regions_coverage(&[], 4).is_empty());
    }

    #[test]
    fn test_precision_changes_cell_identity() {
        let areas = [area(40.7306, -73.9352)];
        assert_ne!(regions_coverage(&areas, 3), regions_coverage(&areas, 4));
    }
}
