//! Integration tests for report fan-out.
//!
//! These tests drive `FanoutPublisher` against real and instrumented stores:
//! - One record per distinct cell, with the shared message
//! - Per-cell failure reporting without rollback, including panicked inserts
//! - Cancellation of outstanding inserts
//! - Concurrency bound on inserts

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeZone, Utc};
use tokio_util::sync::CancellationToken;

use exposure_grid::publish::{
    CellStatus, FanoutPublisher, PublishConfig, PublishError, PublishStatus,
};
use exposure_grid::region::{Coordinate, IdentifierFormat, Region, RegionBoundary, RegionId};
use exposure_grid::report::{Area, Report, ReportRecord};
use exposure_grid::store::{InMemoryReportStore, ReportStore, StoreError};
use exposure_grid::wire::ReportPayload;

// =============================================================================
// Test Helpers
// =============================================================================

const NYC: Coordinate = Coordinate {
    latitude: 40.7306,
    longitude: -73.9352,
};

const LONDON: Coordinate = Coordinate {
    latitude: 51.5074,
    longitude: -0.1278,
};

fn area(center: Coordinate) -> Area {
    let begin = Utc.with_ymd_and_hms(2020, 6, 1, 8, 0, 0).unwrap();
    let end = Utc.with_ymd_and_hms(2020, 6, 1, 12, 0, 0).unwrap();
    Area::new(center, 100.0, begin, end)
}

fn nyc_id() -> RegionId {
    Region::from_coordinate(NYC, 4).id(IdentifierFormat::LatLonPrecision)
}

/// Store that rejects inserts into chosen partitions.
struct RejectingStore {
    inner: InMemoryReportStore,
    rejected: HashSet<RegionId>,
}

impl ReportStore for RejectingStore {
    async fn create_record(&self, record: ReportRecord) -> Result<(), StoreError> {
        if self.rejected.contains(&record.partition_key) {
            return Err(StoreError::Status {
                code: 503,
                message: "partition throttled".to_string(),
            });
        }
        self.inner.create_record(record).await
    }

    async fn records_in_regions(
        &self,
        partitions: &[RegionId],
    ) -> Result<Vec<ReportRecord>, StoreError> {
        self.inner.records_in_regions(partitions).await
    }

    async fn records_in_range(
        &self,
        range: &RegionBoundary,
    ) -> Result<Vec<ReportRecord>, StoreError> {
        self.inner.records_in_range(range).await
    }
}

/// Store whose inserts into chosen partitions take a long time.
struct SlowStore {
    inner: InMemoryReportStore,
    slow: HashSet<RegionId>,
}

impl ReportStore for SlowStore {
    async fn create_record(&self, record: ReportRecord) -> Result<(), StoreError> {
        if self.slow.contains(&record.partition_key) {
            tokio::time::sleep(Duration::from_secs(60)).await;
        }
        self.inner.create_record(record).await
    }

    async fn records_in_regions(
        &self,
        partitions: &[RegionId],
    ) -> Result<Vec<ReportRecord>, StoreError> {
        self.inner.records_in_regions(partitions).await
    }

    async fn records_in_range(
        &self,
        range: &RegionBoundary,
    ) -> Result<Vec<ReportRecord>, StoreError> {
        self.inner.records_in_range(range).await
    }
}

/// Store whose insert task panics for chosen partitions.
struct PanickingStore {
    inner: InMemoryReportStore,
    panicking: HashSet<RegionId>,
}

impl ReportStore for PanickingStore {
    async fn create_record(&self, record: ReportRecord) -> Result<(), StoreError> {
        if self.panicking.contains(&record.partition_key) {
            panic!("store driver crashed");
        }
        self.inner.create_record(record).await
    }

    async fn records_in_regions(
        &self,
        partitions: &[RegionId],
    ) -> Result<Vec<ReportRecord>, StoreError> {
        self.inner.records_in_regions(partitions).await
    }

    async fn records_in_range(
        &self,
        range: &RegionBoundary,
    ) -> Result<Vec<ReportRecord>, StoreError> {
        self.inner.records_in_range(range).await
    }
}

/// Store that records the highest number of inserts in flight at once.
#[derive(Default)]
struct CountingStore {
    inner: InMemoryReportStore,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

impl ReportStore for CountingStore {
    async fn create_record(&self, record: ReportRecord) -> Result<(), StoreError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(10)).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.inner.create_record(record).await
    }

    async fn records_in_regions(
        &self,
        partitions: &[RegionId],
    ) -> Result<Vec<ReportRecord>, StoreError> {
        self.inner.records_in_regions(partitions).await
    }

    async fn records_in_range(
        &self,
        range: &RegionBoundary,
    ) -> Result<Vec<ReportRecord>, StoreError> {
        self.inner.records_in_range(range).await
    }
}

// =============================================================================
// Integration Tests
// =============================================================================

#[tokio::test]
async fn test_two_distinct_cells_produce_two_records() {
    let store = Arc::new(InMemoryReportStore::new());
    let publisher = FanoutPublisher::new(Arc::clone(&store), PublishConfig::default());

    let report = Report::new("Please get tested", vec![area(NYC), area(LONDON)]);
    let outcome = publisher.publish(report).await.unwrap();

    assert_eq!(outcome.status(), PublishStatus::Published);
    assert_eq!(outcome.cells().len(), 2);
    assert_eq!(store.record_count(), 2);
    assert_eq!(store.partition_count(), 2);

    let nyc_records = store.partition(&nyc_id());
    assert_eq!(nyc_records.len(), 1);
    assert_eq!(nyc_records[0].areas, vec![area(NYC)]);
    assert_eq!(nyc_records[0].user_message, "Please get tested");

    let london_id = outcome.cells()[1].region_id.clone();
    let london_records = store.partition(&london_id);
    assert_eq!(london_records.len(), 1);
    assert_eq!(london_records[0].areas, vec![area(LONDON)]);
    assert_eq!(london_records[0].user_message, "Please get tested");
    assert_eq!(london_records[0].timestamp, nyc_records[0].timestamp);
}

#[tokio::test]
async fn test_areas_in_same_cell_share_one_record() {
    let store = Arc::new(InMemoryReportStore::new());
    let publisher = FanoutPublisher::new(Arc::clone(&store), PublishConfig::default());

    let nearby = Coordinate::new(40.7310, -73.9350);
    let report = Report::new("msg", vec![area(NYC), area(nearby)]);
    let outcome = publisher.publish(report).await.unwrap();

    assert_eq!(outcome.cells().len(), 1);
    assert_eq!(outcome.cells()[0].area_count, 2);
    assert_eq!(store.partition(&nyc_id())[0].areas.len(), 2);
}

#[tokio::test]
async fn test_empty_report_is_rejected() {
    let store = Arc::new(InMemoryReportStore::new());
    let publisher = FanoutPublisher::new(Arc::clone(&store), PublishConfig::default());

    let result = publisher.publish(Report::new("msg", vec![])).await;

    assert!(matches!(result, Err(PublishError::EmptyReport)));
    assert_eq!(store.record_count(), 0);
}

#[tokio::test]
async fn test_partial_failure_reports_failed_cells() {
    let store = Arc::new(RejectingStore {
        inner: InMemoryReportStore::new(),
        rejected: HashSet::from([nyc_id()]),
    });
    let publisher = FanoutPublisher::new(Arc::clone(&store), PublishConfig::default());

    let report = Report::new("msg", vec![area(NYC), area(LONDON)]);
    let outcome = publisher.publish(report).await.unwrap();

    assert_eq!(outcome.status(), PublishStatus::PartiallyPublished);
    assert!(!outcome.was_cancelled());

    let failures: Vec<_> = outcome.failures().collect();
    assert_eq!(failures, vec![(&nyc_id(), 503)]);

    // The successful cell is kept; there is no rollback.
    assert_eq!(store.inner.record_count(), 1);
    assert_eq!(outcome.published_cells().count(), 1);
}

#[tokio::test]
async fn test_all_cells_failing_is_failed() {
    let store = Arc::new(RejectingStore {
        inner: InMemoryReportStore::new(),
        rejected: HashSet::from([nyc_id()]),
    });
    let publisher = FanoutPublisher::new(store, PublishConfig::default());

    let outcome = publisher
        .publish(Report::new("msg", vec![area(NYC)]))
        .await
        .unwrap();

    assert_eq!(outcome.status(), PublishStatus::Failed);
}

#[tokio::test]
async fn test_panicked_insert_is_reported_as_aborted() {
    let store = Arc::new(PanickingStore {
        inner: InMemoryReportStore::new(),
        panicking: HashSet::from([nyc_id()]),
    });
    let publisher = FanoutPublisher::new(Arc::clone(&store), PublishConfig::default());

    let report = Report::new("msg", vec![area(NYC), area(LONDON)]);
    let outcome = publisher.publish(report).await.unwrap();

    assert_eq!(outcome.status(), PublishStatus::PartiallyPublished);
    assert!(!outcome.was_cancelled());
    assert!(matches!(
        &outcome.cells()[0].status,
        CellStatus::Failed(StoreError::Aborted(_))
    ));
    assert!(outcome.cells()[1].status.is_published());
    assert_eq!(outcome.failures().collect::<Vec<_>>(), vec![(&nyc_id(), 499)]);
    assert_eq!(store.inner.record_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_cancellation_stops_outstanding_inserts() {
    let store = Arc::new(SlowStore {
        inner: InMemoryReportStore::new(),
        slow: HashSet::from([nyc_id()]),
    });
    let publisher = FanoutPublisher::new(Arc::clone(&store), PublishConfig::default());

    let cancellation = CancellationToken::new();
    let trigger = cancellation.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(10)).await;
        trigger.cancel();
    });

    let report = Report::new("msg", vec![area(NYC), area(LONDON)]);
    let outcome = publisher
        .publish_with_cancellation(report, cancellation)
        .await
        .unwrap();

    assert!(outcome.was_cancelled());
    assert_eq!(outcome.status(), PublishStatus::PartiallyPublished);
    assert_eq!(outcome.cells()[0].status, CellStatus::Cancelled);
    assert!(outcome.cells()[1].status.is_published());
    assert_eq!(store.inner.record_count(), 1);
}

#[tokio::test]
async fn test_cancelled_before_start_writes_nothing() {
    let store = Arc::new(InMemoryReportStore::new());
    let publisher = FanoutPublisher::new(Arc::clone(&store), PublishConfig::default());

    let cancellation = CancellationToken::new();
    cancellation.cancel();

    let report = Report::new("msg", vec![area(NYC), area(LONDON)]);
    let outcome = publisher
        .publish_with_cancellation(report, cancellation)
        .await
        .unwrap();

    assert!(outcome.was_cancelled());
    assert_eq!(outcome.status(), PublishStatus::Failed);
    assert!(outcome
        .cells()
        .iter()
        .all(|cell| cell.status == CellStatus::Cancelled));
    assert_eq!(store.record_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_insert_concurrency_is_bounded() {
    let store = Arc::new(CountingStore::default());
    let config = PublishConfig::new(8).with_max_concurrent_inserts(2);
    let publisher = FanoutPublisher::new(Arc::clone(&store), config);

    // Six areas a degree apart land in six distinct cells.
    let areas = (0..6_i32)
        .map(|i| area(Coordinate::new(10.0 + f64::from(i), 20.0)))
        .collect();
    let outcome = publisher.publish(Report::new("msg", areas)).await.unwrap();

    assert_eq!(outcome.status(), PublishStatus::Published);
    assert_eq!(store.inner.record_count(), 6);
    assert!(store.peak.load(Ordering::SeqCst) <= 2);
}

#[tokio::test]
async fn test_publish_payload_validates_first() {
    let store = Arc::new(InMemoryReportStore::new());
    let publisher = FanoutPublisher::new(Arc::clone(&store), PublishConfig::default());

    let payload: ReportPayload = serde_json::from_str(r#"{ "areas": [] }"#).unwrap();
    let result = publisher.publish_payload(payload).await;

    assert!(matches!(result, Err(PublishError::InvalidPayload(_))));
    assert_eq!(store.record_count(), 0);
}

#[tokio::test]
async fn test_publish_payload_from_json() {
    let store = Arc::new(InMemoryReportStore::new());
    let publisher = FanoutPublisher::new(Arc::clone(&store), PublishConfig::default());

    let payload: ReportPayload = serde_json::from_str(
        r#"{
            "userMessage": "Exposure reported near you",
            "areas": [{
                "location": { "latitude": 40.7306, "longitude": -73.9352 },
                "radiusMeters": 50.0,
                "beginTime": "2020-06-01T08:00:00Z",
                "endTime": "2020-06-01T09:00:00Z"
            }]
        }"#,
    )
    .unwrap();
    let outcome = publisher.publish_payload(payload).await.unwrap();

    assert_eq!(outcome.status(), PublishStatus::Published);
    assert_eq!(store.partition(&nyc_id()).len(), 1);
}
