//! Report fan-out publisher.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::config::PublishConfig;
use super::error::PublishError;
use super::outcome::{CellOutcome, CellStatus, PublishOutcome};
use crate::region::{area_coverage, Region, RegionId};
use crate::report::{Area, Report, ReportRecord};
use crate::store::{ReportStore, StoreError};
use crate::wire::ReportPayload;

/// Areas of one report that resolve to the same cell.
#[derive(Debug, Clone, PartialEq)]
pub struct CellGroup {
    pub region: Region,
    pub region_id: RegionId,
    pub areas: Vec<Area>,
}

/// Group `areas` by the partition key of their covering cell.
///
/// Groups keep the order in which their cell first appears, and areas keep
/// their submission order within a group.
pub fn group_by_cell(areas: &[Area], config: &PublishConfig) -> Vec<CellGroup> {
    let mut groups: Vec<CellGroup> = Vec::new();
    let mut index: HashMap<RegionId, usize> = HashMap::new();

    for area in areas {
        let region = area_coverage(area, config.storage_precision());
        let region_id = region.id(config.identifier_format());
        match index.get(&region_id) {
            Some(&slot) => groups[slot].areas.push(area.clone()),
            None => {
                index.insert(region_id.clone(), groups.len());
                groups.push(CellGroup {
                    region,
                    region_id,
                    areas: vec![area.clone()],
                });
            }
        }
    }

    groups
}

/// Replicates reports into every grid cell their areas resolve to.
///
/// One record is written per distinct cell, each carrying the shared user
/// message and only that cell's areas. Inserts are independent: there is no
/// rollback when some cells fail, and the returned [`PublishOutcome`] says
/// exactly which cells hold the report.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use chrono::{Duration, Utc};
/// use exposure_grid::publish::{FanoutPublisher, PublishConfig, PublishStatus};
/// use exposure_grid::region::Coordinate;
/// use exposure_grid::report::{Area, Report};
/// use exposure_grid::store::InMemoryReportStore;
///
/// let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
/// runtime.block_on(async {
///     let store = Arc::new(InMemoryReportStore::new());
///     let publisher = FanoutPublisher::new(Arc::clone(&store), PublishConfig::default());
///
///     let now = Utc::now();
///     let center = Coordinate::new(40.7306, -73.9352);
///     let area = Area::new(center, 100.0, now - Duration::hours(1), now);
///     let report = Report::new("Possible exposure", vec![area]);
///
///     let outcome = publisher.publish(report).await.unwrap();
///     assert_eq!(outcome.status(), PublishStatus::Published);
///     assert_eq!(store.record_count(), 1);
/// });
/// ```
pub struct FanoutPublisher<S: ReportStore> {
    store: Arc<S>,
    config: PublishConfig,
    insert_limiter: Arc<Semaphore>,
}

impl<S: ReportStore> FanoutPublisher<S> {
    pub fn new(store: Arc<S>, config: PublishConfig) -> Self {
        let insert_limiter = Arc::new(Semaphore::new(config.max_concurrent_inserts().max(1)));
        Self {
            store,
            config,
            insert_limiter,
        }
    }

    pub fn config(&self) -> &PublishConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// The cells `report` would be written to, without writing anything.
    pub fn plan(&self, report: &Report) -> Result<Vec<CellGroup>, PublishError> {
        if report.areas.is_empty() {
            return Err(PublishError::EmptyReport);
        }
        Ok(group_by_cell(&report.areas, &self.config))
    }

    /// Validate a wire payload and publish it.
    pub async fn publish_payload(
        &self,
        payload: ReportPayload,
    ) -> Result<PublishOutcome, PublishError> {
        let report = Report::try_from(payload)?;
        self.publish(report).await
    }

    /// Publish `report` and wait for every cell's insert.
    pub async fn publish(&self, report: Report) -> Result<PublishOutcome, PublishError> {
        self.publish_with_cancellation(report, CancellationToken::new())
            .await
    }

    /// Publish `report`, stopping outstanding inserts if `cancellation` fires.
    ///
    /// Cells that finished before cancellation keep their result; the rest
    /// are reported as [`CellStatus::Cancelled`].
    pub async fn publish_with_cancellation(
        &self,
        report: Report,
        cancellation: CancellationToken,
    ) -> Result<PublishOutcome, PublishError> {
        let groups = self.plan(&report)?;
        let timestamp = Utc::now();

        info!(
            cells = groups.len(),
            areas = report.areas.len(),
            precision = self.config.storage_precision(),
            "Publishing report"
        );

        let mut statuses: Vec<Option<CellStatus>> = vec![None; groups.len()];
        let mut inserts = JoinSet::new();

        if !cancellation.is_cancelled() {
            for (index, group) in groups.iter().enumerate() {
                let record = ReportRecord::for_region(
                    group.region,
                    self.config.identifier_format(),
                    report.user_message.clone(),
                    group.areas.clone(),
                    timestamp,
                );
                let store = Arc::clone(&self.store);
                let limiter = Arc::clone(&self.insert_limiter);

                inserts.spawn(async move {
                    let record_id = record.id;
                    let result = match limiter.acquire_owned().await {
                        Ok(_permit) => store.create_record(record).await,
                        Err(_) => Err(StoreError::Aborted("insert limiter closed".to_string())),
                    };
                    (index, record_id, result)
                });
            }
        }

        let mut cancelled = cancellation.is_cancelled();
        while !inserts.is_empty() {
            tokio::select! {
                biased;

                _ = cancellation.cancelled(), if !cancelled => {
                    cancelled = true;
                    debug!(outstanding = inserts.len(), "Fan-out cancelled, aborting inserts");
                    inserts.abort_all();
                }

                Some(joined) = inserts.join_next() => {
                    match joined {
                        Ok((index, record_id, Ok(()))) => {
                            debug!(region = %groups[index].region_id, %record_id, "Cell published");
                            statuses[index] = Some(CellStatus::Published { record_id });
                        }
                        Ok((index, _, Err(err))) => {
                            warn!(
                                region = %groups[index].region_id,
                                status = err.status_code(),
                                error = %err,
                                "Cell insert failed"
                            );
                            statuses[index] = Some(CellStatus::Failed(err));
                        }
                        Err(join_err) if join_err.is_cancelled() => {}
                        Err(join_err) => {
                            warn!(error = %join_err, "Insert task panicked");
                        }
                    }
                }

                else => break,
            }
        }

        let cells: Vec<CellOutcome> = groups
            .into_iter()
            .zip(statuses)
            .map(|(group, status)| CellOutcome {
                region: group.region,
                region_id: group.region_id,
                area_count: group.areas.len(),
                status: status.unwrap_or_else(|| {
                    if cancelled {
                        CellStatus::Cancelled
                    } else {
                        CellStatus::Failed(StoreError::Aborted("insert task panicked".to_string()))
                    }
                }),
            })
            .collect();

        let outcome = PublishOutcome::new(cells, cancelled);
        info!(
            status = %outcome.status(),
            published = outcome.published_cells().count(),
            unpublished = outcome.unpublished_cells().count(),
            cancelled,
            "Report fan-out complete"
        );
        Ok(outcome)
    }
}
