//! Scripted remote store used by the unit tests.

use std::collections::{BTreeSet, HashMap};
use std::num::NonZeroU32;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::scan::{
    AttributeValue, Conditions, ContinuationKey, Credentials, Item, Page, RemoteClient, Result,
    ScanError, ScanSpec,
};

const PAGE_KEY: &str = "__page";

/// Builds an item from string attributes.
pub fn item(pairs: &[(&str, &str)]) -> Item {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), AttributeValue::s(*v)))
        .collect()
}

/// A first-page request on `table` with default settings.
pub fn spec(table: &str) -> ScanSpec {
    ScanSpec::new(
        table,
        BTreeSet::new(),
        Conditions::new(),
        NonZeroU32::new(100).unwrap(),
    )
}

/// Chains pages so that page `i` points at page `i + 1`.
pub fn chain(pages: Vec<Vec<Item>>) -> Vec<Page> {
    let total = pages.len();
    pages
        .into_iter()
        .enumerate()
        .map(|(i, items)| {
            if i + 1 < total {
                let key = HashMap::from([(PAGE_KEY.to_string(), AttributeValue::n(i + 1))]);
                Page::with_more(items, ContinuationKey::new(key))
            } else {
                Page::last(items)
            }
        })
        .collect()
}

#[derive(Debug, Default)]
struct MockInner {
    pages: Vec<Page>,
    acquired: AtomicUsize,
    released: AtomicUsize,
    failures_left: AtomicUsize,
    refuse_clients: bool,
    requests: Mutex<Vec<ScanSpec>>,
}

/// Credentials handing out clients that serve a fixed chain of pages.
///
/// The page served is chosen from the request's continuation key, so
/// reissuing a request always yields the same page.
#[derive(Debug, Clone, Default)]
pub struct MockCredentials {
    inner: Arc<MockInner>,
}

impl MockCredentials {
    pub fn with_pages(pages: Vec<Page>) -> Self {
        Self {
            inner: Arc::new(MockInner {
                pages,
                ..Default::default()
            }),
        }
    }

    pub fn with_items(pages: Vec<Vec<Item>>) -> Self {
        Self::with_pages(chain(pages))
    }

    /// Makes the first `n` scan calls fail with an I/O error.
    pub fn failing_first(self, n: usize) -> Self {
        self.inner.failures_left.store(n, Ordering::SeqCst);
        self
    }

    /// Makes every client resolution fail.
    pub fn refusing_clients(self) -> Self {
        let inner = MockInner {
            pages: self.inner.pages.clone(),
            refuse_clients: true,
            ..Default::default()
        };
        Self {
            inner: Arc::new(inner),
        }
    }

    /// Arms `n` more failing scan calls.
    pub fn fail_next(&self, n: usize) {
        self.inner.failures_left.store(n, Ordering::SeqCst);
    }

    pub fn acquired(&self) -> usize {
        self.inner.acquired.load(Ordering::SeqCst)
    }

    pub fn released(&self) -> usize {
        self.inner.released.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<ScanSpec> {
        self.inner.requests.lock().unwrap().clone()
    }
}

impl Credentials for MockCredentials {
    fn aws(&self) -> Result<Box<dyn RemoteClient>> {
        if self.inner.refuse_clients {
            return Err(ScanError::Credentials("no client for you".to_string()));
        }
        self.inner.acquired.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MockClient {
            inner: Arc::clone(&self.inner),
        }))
    }
}

struct MockClient {
    inner: Arc<MockInner>,
}

#[async_trait]
impl RemoteClient for MockClient {
    async fn scan(&self, spec: &ScanSpec) -> Result<Page> {
        self.inner.requests.lock().unwrap().push(spec.clone());

        let armed = self
            .inner
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1));
        if armed.is_ok() {
            return Err(ScanError::io("scan", spec.table(), "simulated throttling"));
        }

        let index = match spec.exclusive_start_key() {
            None => 0,
            Some(key) => key
                .as_item()
                .get(PAGE_KEY)
                .and_then(AttributeValue::as_n)
                .and_then(|n| n.parse::<usize>().ok())
                .ok_or_else(|| ScanError::io("scan", spec.table(), "unknown start key"))?,
        };
        Ok(self.inner.pages.get(index).cloned().unwrap_or_default())
    }

    fn shutdown(&self) {
        self.inner.released.fetch_add(1, Ordering::SeqCst);
    }
}
