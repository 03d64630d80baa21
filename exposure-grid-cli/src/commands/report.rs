//! Report commands: publish and query.
//!
//! Both run against a fresh in-memory store. `publish` shows how each report
//! fans out and whether every cell accepted its record; `query` publishes the
//! given reports first and then runs a proximity lookup against them.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use clap::Args;
use exposure_grid::config::ConfigFile;
use exposure_grid::publish::{CellStatus, FanoutPublisher, PublishOutcome, PublishStatus};
use exposure_grid::query::{Exposure, QueryPlanner};
use exposure_grid::report::Report;
use exposure_grid::store::InMemoryReportStore;
use exposure_grid::wire::ReportPayload;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use super::common::{start_logging, CoordinateArgs};
use crate::error::CliError;

/// Arguments for `publish`.
#[derive(Debug, Args)]
pub struct PublishArgs {
    /// Report payload files (JSON)
    #[arg(required = true)]
    pub reports: Vec<PathBuf>,

    /// Print the stored records as JSON after publishing
    #[arg(long)]
    pub dump: bool,
}

/// Arguments for `query`.
#[derive(Debug, Args)]
pub struct QueryArgs {
    /// Report payload files (JSON) to search
    #[arg(long = "report", required = true)]
    pub reports: Vec<PathBuf>,

    #[command(flatten)]
    pub point: CoordinateArgs,

    /// Time of the visit (RFC 3339); defaults to now
    #[arg(long)]
    pub at: Option<DateTime<Utc>>,

    /// Look up by boundary range instead of partition keys
    #[arg(long)]
    pub range: bool,

    /// Cells beyond the query cell on every side; defaults to query.extension
    #[arg(long, short)]
    pub extension: Option<u32>,
}

fn read_payload(path: &Path) -> Result<ReportPayload, CliError> {
    let content = std::fs::read_to_string(path).map_err(|error| CliError::FileRead {
        path: path.display().to_string(),
        error,
    })?;
    serde_json::from_str(&content).map_err(|error| CliError::Parse {
        path: path.display().to_string(),
        error,
    })
}

fn runtime() -> Result<tokio::runtime::Runtime, CliError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| CliError::Config(format!("Failed to start async runtime: {}", e)))
}

/// Cancel `token` on Ctrl+C.
fn cancel_on_interrupt(token: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling outstanding inserts");
            token.cancel();
        }
    });
}

fn print_outcome(path: &Path, outcome: &PublishOutcome) {
    println!("{}: {}", path.display(), outcome.status());
    for cell in outcome.cells() {
        let status = match &cell.status {
            CellStatus::Published { record_id } => format!("published {}", record_id),
            CellStatus::Failed(err) => format!("failed ({}): {}", err.status_code(), err),
            CellStatus::Cancelled => "cancelled".to_string(),
        };
        println!(
            "  {:<28} {:>3} area(s)  {}",
            cell.region_id.as_str(),
            cell.area_count,
            status
        );
    }
}

async fn publish_all(
    publisher: &FanoutPublisher<InMemoryReportStore>,
    paths: &[PathBuf],
    cancellation: &CancellationToken,
    verbose: bool,
) -> Result<(), CliError> {
    for path in paths {
        let report = Report::try_from(read_payload(path)?)?;
        let outcome = publisher
            .publish_with_cancellation(report, cancellation.child_token())
            .await?;
        if verbose {
            print_outcome(path, &outcome);
        }
        outcome_result(&outcome)?;
    }
    Ok(())
}

/// Map a fan-out outcome to the command result.
fn outcome_result(outcome: &PublishOutcome) -> Result<(), CliError> {
    let total = outcome.cells().len();
    match outcome.status() {
        PublishStatus::Published => Ok(()),
        PublishStatus::Failed => Err(CliError::Unpublished { total }),
        PublishStatus::PartiallyPublished => Err(CliError::Incomplete {
            published: outcome.published_cells().count(),
            total,
        }),
    }
}

/// Publish report files into an in-memory store.
pub fn run_publish(args: PublishArgs, config: &ConfigFile) -> Result<(), CliError> {
    let _logging = start_logging(config)?;
    let store = Arc::new(InMemoryReportStore::new());
    let publisher = FanoutPublisher::new(Arc::clone(&store), config.publish_config());

    runtime()?.block_on(async {
        let cancellation = CancellationToken::new();
        cancel_on_interrupt(cancellation.clone());
        publish_all(&publisher, &args.reports, &cancellation, true).await
    })?;

    info!(
        partitions = store.partition_count(),
        records = store.record_count(),
        "Publish complete"
    );

    if args.dump {
        let records: Vec<_> = store
            .partition_keys()
            .iter()
            .flat_map(|key| store.partition(key))
            .collect();
        let json = serde_json::to_string_pretty(&records)
            .map_err(|e| CliError::Config(format!("Failed to serialize records: {}", e)))?;
        println!("{}", json);
    }
    Ok(())
}

fn print_exposures(exposures: &[Exposure]) {
    if exposures.is_empty() {
        println!("No exposures found");
        return;
    }
    for exposure in exposures {
        println!(
            "{}  {}  {} - {}  {}",
            exposure.region_id,
            exposure.record_id,
            exposure.area.begin_time.to_rfc3339(),
            exposure.area.end_time.to_rfc3339(),
            exposure.user_message
        );
    }
}

/// Publish report files, then look for exposures at a point.
pub fn run_query(args: QueryArgs, config: &ConfigFile) -> Result<(), CliError> {
    let _logging = start_logging(config)?;
    let coordinate = args.point.coordinate()?;
    let at = args.at.unwrap_or_else(Utc::now);

    let mut query_config = config.query_config();
    if let Some(extension) = args.extension {
        query_config = query_config.with_extension(extension);
    }
    let planner = QueryPlanner::new(query_config);

    let store = Arc::new(InMemoryReportStore::new());
    let publisher = FanoutPublisher::new(Arc::clone(&store), config.publish_config());

    let exposures = runtime()?.block_on(async {
        let cancellation = CancellationToken::new();
        cancel_on_interrupt(cancellation.clone());
        publish_all(&publisher, &args.reports, &cancellation, false).await?;

        let found = if args.range {
            planner.find_in_range(store.as_ref(), coordinate, at).await?
        } else {
            planner.find_nearby(store.as_ref(), coordinate, at).await?
        };
        Ok::<_, CliError>(found)
    })?;

    print_exposures(&exposures);
    Ok(())
}
