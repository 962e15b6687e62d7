//! Store backends.
//!
//! Each backend is behind its own feature flag and provides a
//! [`Credentials`](dynavalve_core::scan::Credentials) implementation that the
//! region stack is built on.

#[cfg(feature = "dynamodb")]
pub mod dynamodb;

#[cfg(feature = "inmemory")]
pub mod inmemory;
