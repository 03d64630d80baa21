//! exposure-grid - region quantization and report fan-out for geotagged
//! exposure notifications.
//!
//! Reports carry a message and a set of circular risk areas. Each area is
//! stored under the cell of a power-of-two latitude/longitude grid that
//! contains its center, and proximity queries read the cells around the
//! query point.
//!
//! # Modules
//!
//! - [`precision`]: scalar quantization onto the grid
//! - [`region`]: cells, boundaries, neighbour and coverage resolution
//! - [`report`]: reports, areas and per-cell records
//! - [`store`]: partitioned storage abstraction and an in-memory store
//! - [`publish`]: concurrent per-cell fan-out of a report
//! - [`query`]: proximity query planning and matching
//! - [`wire`]: schema-versioned payloads and input validation
//! - [`config`]: INI configuration
//! - [`logging`]: tracing subscriber setup

pub mod config;
pub mod logging;
pub mod precision;
pub mod publish;
pub mod query;
pub mod region;
pub mod report;
pub mod store;
pub mod wire;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
