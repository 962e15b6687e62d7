use std::{env, num::NonZeroU32, sync::Arc};

use dynavalve_core::region::{PrefixedRegion, Region, RetryingRegion, SimpleRegion};
use dynavalve_core::retry::{Backoff, RetryPolicy};
use dynavalve_core::scan::{Credentials, ScanValve, DEFAULT_LIMIT};

/// Scan configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Custom store endpoint, e.g. DynamoDB Local (default: none)
    pub endpoint_url: Option<String>,
    /// AWS region (default: "us-east-1")
    pub region: String,
    /// Prefix prepended to every table name (default: "")
    pub table_prefix: String,
    /// Items evaluated per page (default: 100)
    pub page_limit: NonZeroU32,
    /// Attempts per page fetch, first one included (default: 3)
    pub max_attempts: u32,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `AWS_ENDPOINT_URL` - Custom endpoint (default: none)
    /// - `AWS_REGION` - AWS region (default: "us-east-1")
    /// - `DYNAVALVE_TABLE_PREFIX` - Table name prefix (default: "")
    /// - `DYNAVALVE_PAGE_LIMIT` - Items per page, must be positive (default: 100)
    /// - `DYNAVALVE_MAX_ATTEMPTS` - Attempts per page fetch (default: 3)
    pub fn from_env() -> Self {
        Self {
            endpoint_url: env::var("AWS_ENDPOINT_URL").ok().filter(|v| !v.is_empty()),
            region: env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".to_string()),
            table_prefix: env::var("DYNAVALVE_TABLE_PREFIX").unwrap_or_default(),
            page_limit: env::var("DYNAVALVE_PAGE_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_LIMIT),
            max_attempts: env::var("DYNAVALVE_MAX_ATTEMPTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3),
        }
    }

    /// Human-readable description of where scans go.
    pub fn target_display(&self) -> String {
        match &self.endpoint_url {
            Some(endpoint) => format!("{} ({})", endpoint, self.region),
            None => format!("AWS DynamoDB ({})", self.region),
        }
    }

    /// Valve with the configured page limit.
    pub fn valve(&self) -> ScanValve {
        ScanValve::new().with_limit(self.page_limit)
    }

    pub fn retry_policy(&self) -> Arc<dyn RetryPolicy> {
        Arc::new(Backoff::new(self.max_attempts))
    }

    /// Builds the region stack over `credentials`.
    ///
    /// The prefix layer is skipped when no prefix is configured; the retry
    /// layer is always outermost.
    pub fn region(&self, credentials: Arc<dyn Credentials>) -> Box<dyn Region> {
        let simple = SimpleRegion::new(credentials);
        if self.table_prefix.is_empty() {
            Box::new(RetryingRegion::new(simple, self.retry_policy()))
        } else {
            Box::new(RetryingRegion::new(
                PrefixedRegion::new(simple, self.table_prefix.clone()),
                self.retry_policy(),
            ))
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
