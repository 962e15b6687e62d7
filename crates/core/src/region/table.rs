use std::sync::Arc;

use crate::retry::{fetch_with_retry, RetryPolicy};
use crate::scan::{Conditions, Credentials, Dosage, Result, Valve};

/// Handle to one named table.
#[derive(Debug, Clone)]
pub struct Table {
    credentials: Arc<dyn Credentials>,
    name: String,
    retry: Option<Arc<dyn RetryPolicy>>,
}

impl Table {
    pub fn new(credentials: Arc<dyn Credentials>, name: impl Into<String>) -> Self {
        Self {
            credentials,
            name: name.into(),
            retry: None,
        }
    }

    /// Returns the same table with page fetches retried under `policy`.
    pub fn with_retry(self, policy: Arc<dyn RetryPolicy>) -> Self {
        Self {
            credentials: self.credentials,
            name: self.name,
            retry: Some(policy),
        }
    }

    /// Full table name as known to the store.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn retry_policy(&self) -> Option<&Arc<dyn RetryPolicy>> {
        self.retry.as_ref()
    }

    /// Fetches the first page of this table through `valve`.
    pub async fn scan(
        &self,
        valve: &dyn Valve,
        conditions: &Conditions,
        keys: &[String],
    ) -> Result<Box<dyn Dosage>> {
        let credentials = Arc::clone(&self.credentials);
        match &self.retry {
            Some(policy) => {
                fetch_with_retry(
                    valve,
                    Arc::clone(policy),
                    credentials,
                    &self.name,
                    conditions,
                    keys,
                )
                .await
            }
            None => valve.fetch(credentials, &self.name, conditions, keys).await,
        }
    }
}
