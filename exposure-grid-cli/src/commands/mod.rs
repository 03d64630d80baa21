//! CLI command implementations.
//!
//! # Command Modules
//!
//! - [`grid`] - Grid inspection (region, neighbors, range, legacy)
//! - [`report`] - Report fan-out and proximity queries
//! - [`config`] - Configuration management (path, show, init)

pub mod common;
pub mod config;
pub mod grid;
pub mod report;
