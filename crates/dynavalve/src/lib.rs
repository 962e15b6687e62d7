//! Paginated DynamoDB scans with stackable table addressing.
//!
//! The core abstractions live in `dynavalve_core` and are re-exported here;
//! this crate adds the store backends and environment configuration.

pub mod config;
pub mod storage;

pub use config::Config;
pub use dynavalve_core::{region, retry, scan};
