//! Credentials and client handles for the in-memory store.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use dynavalve_core::scan::{Credentials, Page, RemoteClient, Result, ScanSpec};

use super::store::InMemoryStore;

#[derive(Debug, Default)]
struct Counters {
    acquired: AtomicUsize,
    released: AtomicUsize,
}

/// Hands out client handles bound to one [`InMemoryStore`].
///
/// Counts how many handles were resolved and how many were shut down, so
/// tests can check that every fetch releases its handle.
#[derive(Debug, Clone)]
pub struct InMemoryCredentials {
    store: InMemoryStore,
    counters: Arc<Counters>,
}

impl InMemoryCredentials {
    pub fn new(store: InMemoryStore) -> Self {
        Self {
            store,
            counters: Arc::new(Counters::default()),
        }
    }

    pub fn store(&self) -> &InMemoryStore {
        &self.store
    }

    /// Handles resolved so far.
    pub fn acquired(&self) -> usize {
        self.counters.acquired.load(Ordering::SeqCst)
    }

    /// Handles shut down so far.
    pub fn released(&self) -> usize {
        self.counters.released.load(Ordering::SeqCst)
    }
}

impl Credentials for InMemoryCredentials {
    fn aws(&self) -> Result<Box<dyn RemoteClient>> {
        self.counters.acquired.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(InMemoryClient {
            store: self.store.clone(),
            counters: Arc::clone(&self.counters),
        }))
    }
}

/// Client handle issued by [`InMemoryCredentials`].
struct InMemoryClient {
    store: InMemoryStore,
    counters: Arc<Counters>,
}

#[async_trait]
impl RemoteClient for InMemoryClient {
    async fn scan(&self, spec: &ScanSpec) -> Result<Page> {
        self.store.scan(spec).await
    }

    fn shutdown(&self) {
        self.counters.released.fetch_add(1, Ordering::SeqCst);
    }
}
