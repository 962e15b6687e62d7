use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;

use super::condition::Conditions;
use super::types::{Item, Page, ScanSpec};
use super::Result;

/// A live handle to the remote store.
///
/// Handles are short-lived: one is resolved per page fetch and shut down as
/// soon as the fetch completes. See [`super::ClientLease`].
#[async_trait]
pub trait RemoteClient: Send + Sync {
    /// Issues one scan call and returns the page it produced.
    async fn scan(&self, spec: &ScanSpec) -> Result<Page>;

    /// Releases open resources and terminates pending work on this handle.
    fn shutdown(&self);
}

/// Resolves remote client handles on demand.
pub trait Credentials: Send + Sync + Debug {
    /// Returns a usable client handle. May be called repeatedly; each call
    /// may return a fresh handle.
    fn aws(&self) -> Result<Box<dyn RemoteClient>>;
}

/// Request policy that produces the first page of a scan.
#[async_trait]
pub trait Valve: Send + Sync + Debug {
    /// Fetches the first page of `table` under `conditions`.
    ///
    /// `keys` are attributes the caller intends to read from the items; they
    /// are always part of the projection sent to the store.
    async fn fetch(
        &self,
        credentials: Arc<dyn Credentials>,
        table: &str,
        conditions: &Conditions,
        keys: &[String],
    ) -> Result<Box<dyn Dosage>>;
}

/// Handle over one fetched page, able to fetch the following one.
///
/// A dosage is immutable: [`Dosage::next`] returns a new dosage and leaves the
/// receiver as it was, so a failed call can be reissued on the same value.
#[async_trait]
pub trait Dosage: Send + Sync + Debug {
    /// Items of this page in the order the store returned them.
    fn items(&self) -> &[Item];

    /// Whether the store reported more pages after this one.
    fn has_next(&self) -> bool;

    /// Fetches the next page.
    ///
    /// Fails with [`super::ScanError::NoNextPage`] when [`Dosage::has_next`]
    /// is `false`.
    async fn next(&self) -> Result<Box<dyn Dosage>>;
}
