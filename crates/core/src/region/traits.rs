use std::sync::Arc;

use crate::scan::{ClientLease, Result};

use super::table::Table;

/// Resolves logical table names to table handles.
///
/// Implementations are meant to be stacked: a decorator holds another region
/// and changes one aspect of it (see [`super::PrefixedRegion`] and
/// [`super::RetryingRegion`]). `table` must be referentially transparent:
/// two calls with the same name yield behaviourally equivalent handles.
pub trait Region: Send + Sync {
    /// Leases a client handle for direct access to the store.
    fn aws(&self) -> Result<ClientLease>;

    /// Gets one table.
    fn table(&self, name: &str) -> Table;
}

impl<R: Region + ?Sized> Region for Box<R> {
    fn aws(&self) -> Result<ClientLease> {
        (**self).aws()
    }

    fn table(&self, name: &str) -> Table {
        (**self).table(name)
    }
}

impl<R: Region + ?Sized> Region for Arc<R> {
    fn aws(&self) -> Result<ClientLease> {
        (**self).aws()
    }

    fn table(&self, name: &str) -> Table {
        (**self).table(name)
    }
}
