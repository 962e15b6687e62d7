use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;

use super::condition::summarize;
use super::lease::ClientLease;
use super::traits::{Credentials, Dosage};
use super::types::{Item, Page, ScanSpec};
use super::{Result, ScanError};

/// Issues one scan call for `spec` on a freshly leased client.
///
/// The lease is dropped, and the client shut down, before the result is
/// handed back, on success and on failure alike.
pub(crate) async fn load_page(
    operation: &'static str,
    credentials: &dyn Credentials,
    spec: &ScanSpec,
) -> Result<Page> {
    let lease = ClientLease::acquire(credentials)?;
    let start = Instant::now();
    let result = lease.scan(spec).await;
    drop(lease);
    let page = result?;

    tracing::info!(
        operation,
        table = spec.table(),
        count = page.items.len(),
        filter = %summarize(spec.conditions()),
        consumed_capacity = ?page.consumed_capacity,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Loaded {} item(s) from '{}'",
        page.items.len(),
        spec.table()
    );
    Ok(page)
}

/// Cursor over one page of a scan.
#[derive(Debug)]
pub struct ScanDosage {
    credentials: Arc<dyn Credentials>,
    spec: Arc<ScanSpec>,
    page: Page,
}

impl ScanDosage {
    pub(crate) fn new(credentials: Arc<dyn Credentials>, spec: Arc<ScanSpec>, page: Page) -> Self {
        Self {
            credentials,
            spec,
            page,
        }
    }

    /// The request that produced this page.
    pub fn spec(&self) -> &ScanSpec {
        &self.spec
    }

    pub fn page(&self) -> &Page {
        &self.page
    }
}

#[async_trait]
impl Dosage for ScanDosage {
    fn items(&self) -> &[Item] {
        &self.page.items
    }

    fn has_next(&self) -> bool {
        self.page.last_evaluated_key.is_some()
    }

    async fn next(&self) -> Result<Box<dyn Dosage>> {
        let key = self
            .page
            .last_evaluated_key
            .clone()
            .ok_or(ScanError::NoNextPage)?;
        let spec = Arc::new(self.spec.resume(key));
        let page = load_page("next", self.credentials.as_ref(), &spec).await?;

        Ok(Box::new(ScanDosage::new(
            Arc::clone(&self.credentials),
            spec,
            page,
        )))
    }
}

/// A cursor with no items and no following page.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyDosage;

#[async_trait]
impl Dosage for EmptyDosage {
    fn items(&self) -> &[Item] {
        &[]
    }

    fn has_next(&self) -> bool {
        false
    }

    async fn next(&self) -> Result<Box<dyn Dosage>> {
        Err(ScanError::NoNextPage)
    }
}
