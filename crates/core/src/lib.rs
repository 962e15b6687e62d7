//! Client-side pagination over a remote document store's scan operation.
//!
//! The crate is organised around three pieces:
//!
//! - [`scan`]: the data model, the [`scan::ScanValve`] request policy and the
//!   [`scan::Dosage`] cursor that walks a scan one page at a time.
//! - [`region`]: resolution of logical table names to [`region::Table`]
//!   handles, composable through decorators such as [`region::PrefixedRegion`].
//! - [`retry`]: the seam where a retry policy wraps individual page fetches.
//!
//! Everything that talks to the network sits behind the
//! [`scan::Credentials`] and [`scan::RemoteClient`] traits; concrete backends
//! live in the `dynavalve` crate.

pub mod region;
pub mod retry;
pub mod scan;

#[cfg(test)]
pub(crate) mod mock;
