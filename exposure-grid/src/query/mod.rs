//! Proximity queries over published reports.
//!
//! A query point is snapped to its cell at the storage precision and widened
//! to its neighbourhood. The store is then read either by partition key
//! ([`QueryPlanner::find_nearby`]) or by boundary range
//! ([`QueryPlanner::find_in_range`]), and only areas whose circle and time
//! window cover the query are returned. Finding nothing is not an error.

mod config;
mod planner;

pub use config::{QueryConfig, DEFAULT_QUERY_EXTENSION, DEFAULT_QUERY_PRECISION_COUNT};
pub use planner::{Exposure, QueryPlanner, Visit};
