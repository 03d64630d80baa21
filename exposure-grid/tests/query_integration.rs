//! Integration tests for the publish → query round trip.
//!
//! Reports are published through `FanoutPublisher` into the in-memory store
//! and found again through `QueryPlanner`, by partition key and by range.

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};

use exposure_grid::config::ConfigFile;
use exposure_grid::publish::FanoutPublisher;
use exposure_grid::query::{QueryConfig, QueryPlanner, Visit};
use exposure_grid::region::{neighborhood, Coordinate, Region};
use exposure_grid::report::{Area, Report};
use exposure_grid::store::InMemoryReportStore;

// =============================================================================
// Test Helpers
// =============================================================================

// Just south of the 40.75 cell edge at precision 4.
const EDGE_AREA: Coordinate = Coordinate {
    latitude: 40.7499,
    longitude: -73.9,
};

// About 67 m north of EDGE_AREA, in the neighbouring cell.
const ACROSS_EDGE: Coordinate = Coordinate {
    latitude: 40.7505,
    longitude: -73.9,
};

fn noon() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2020, 6, 1, 12, 0, 0).unwrap()
}

async fn published_store() -> Arc<InMemoryReportStore> {
    let config = ConfigFile::default();
    let store = Arc::new(InMemoryReportStore::new());
    let publisher = FanoutPublisher::new(Arc::clone(&store), config.publish_config());

    let area = Area::new(
        EDGE_AREA,
        200.0,
        noon() - Duration::hours(1),
        noon() + Duration::hours(1),
    );
    publisher
        .publish(Report::new("Exposure near the park", vec![area]))
        .await
        .unwrap();
    store
}

// =============================================================================
// Integration Tests
// =============================================================================

#[tokio::test]
async fn test_find_nearby_in_same_cell() {
    let store = published_store().await;
    let planner = QueryPlanner::new(ConfigFile::default().query_config());

    let found = planner
        .find_nearby(store.as_ref(), EDGE_AREA, noon())
        .await
        .unwrap();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].user_message, "Exposure near the park");
    assert_eq!(found[0].region_id.as_str(), "40.6875,-73.9375,4");
}

#[tokio::test]
async fn test_find_nearby_across_cell_edge_needs_extension() {
    let store = published_store().await;

    let widened = QueryPlanner::new(QueryConfig::new(4).with_extension(1));
    let found = widened
        .find_nearby(store.as_ref(), ACROSS_EDGE, noon())
        .await
        .unwrap();
    assert_eq!(found.len(), 1);

    let own_cell_only = QueryPlanner::new(QueryConfig::new(4).with_extension(0));
    let found = own_cell_only
        .find_nearby(store.as_ref(), ACROSS_EDGE, noon())
        .await
        .unwrap();
    assert!(found.is_empty());
}

#[tokio::test]
async fn test_find_in_range_across_cell_edge() {
    let store = published_store().await;
    let planner = QueryPlanner::default();

    let found = planner
        .find_in_range(store.as_ref(), ACROSS_EDGE, noon())
        .await
        .unwrap();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].area.center, EDGE_AREA);
}

#[tokio::test]
async fn test_outside_time_window_is_ignored() {
    let store = published_store().await;
    let planner = QueryPlanner::default();

    let found = planner
        .find_nearby(store.as_ref(), EDGE_AREA, noon() + Duration::hours(2))
        .await
        .unwrap();

    assert!(found.is_empty());
}

#[tokio::test]
async fn test_outside_radius_is_ignored() {
    let store = published_store().await;
    let planner = QueryPlanner::default();

    // ~1.1 km south: same cell, outside the 200 m circle.
    let far = Coordinate::new(40.7399, -73.9);
    let found = planner.find_nearby(store.as_ref(), far, noon()).await.unwrap();

    assert!(found.is_empty());
}

#[tokio::test]
async fn test_empty_store_finds_nothing() {
    let store = InMemoryReportStore::new();
    let planner = QueryPlanner::default();

    let found = planner.find_nearby(&store, EDGE_AREA, noon()).await.unwrap();
    assert!(found.is_empty());
}

#[tokio::test]
async fn test_check_history_reports_each_area_once() {
    let store = published_store().await;
    let planner = QueryPlanner::default();

    let visits = [
        Visit::new(EDGE_AREA, noon()),
        Visit::new(ACROSS_EDGE, noon() + Duration::minutes(10)),
        Visit::new(Coordinate::new(0.0, 0.0), noon()),
    ];
    let found = planner.check_history(store.as_ref(), &visits).await.unwrap();

    assert_eq!(found.len(), 1);
}

#[test]
fn test_neighborhood_is_symmetric() {
    let centers = [
        Coordinate::new(40.7306, -73.9352),
        Coordinate::new(-33.8688, 151.2093),
        Coordinate::new(0.01, -0.01),
    ];
    for precision in [0, 4, 8] {
        for extension in [1, 2] {
            for center in centers {
                let a = Region::from_coordinate(center, precision);
                for b in neighborhood(&a, extension) {
                    assert!(
                        neighborhood(&b, extension).contains(&a),
                        "{} not in neighbourhood of {}",
                        a,
                        b
                    );
                }
            }
        }
    }
}
