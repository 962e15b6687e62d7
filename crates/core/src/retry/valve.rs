use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::scan::{Conditions, Credentials, Dosage, Item, Result, Valve};

use super::policy::{retry, RetryPolicy};

/// Fetches the first page through `valve`, reissuing failed calls under
/// `policy`. The returned dosage retries its own `next()` the same way.
pub async fn fetch_with_retry(
    valve: &dyn Valve,
    policy: Arc<dyn RetryPolicy>,
    credentials: Arc<dyn Credentials>,
    table: &str,
    conditions: &Conditions,
    keys: &[String],
) -> Result<Box<dyn Dosage>> {
    let origin = retry(policy.as_ref(), "fetch", || {
        valve.fetch(Arc::clone(&credentials), table, conditions, keys)
    })
    .await?;
    Ok(Box::new(RetryingDosage::new(origin, policy)))
}

/// Valve decorator that retries transient failures of its origin.
#[derive(Debug)]
pub struct RetryingValve<V> {
    origin: V,
    policy: Arc<dyn RetryPolicy>,
}

impl<V: Valve> RetryingValve<V> {
    pub fn new(origin: V, policy: Arc<dyn RetryPolicy>) -> Self {
        Self { origin, policy }
    }
}

#[async_trait]
impl<V: Valve> Valve for RetryingValve<V> {
    async fn fetch(
        &self,
        credentials: Arc<dyn Credentials>,
        table: &str,
        conditions: &Conditions,
        keys: &[String],
    ) -> Result<Box<dyn Dosage>> {
        fetch_with_retry(
            &self.origin,
            Arc::clone(&self.policy),
            credentials,
            table,
            conditions,
            keys,
        )
        .await
    }
}

/// Dosage decorator that retries `next()` on the unchanged origin.
pub struct RetryingDosage {
    origin: Box<dyn Dosage>,
    policy: Arc<dyn RetryPolicy>,
}

impl RetryingDosage {
    pub fn new(origin: Box<dyn Dosage>, policy: Arc<dyn RetryPolicy>) -> Self {
        Self { origin, policy }
    }
}

impl fmt::Debug for RetryingDosage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryingDosage")
            .field("origin", &self.origin)
            .field("policy", &self.policy)
            .finish()
    }
}

#[async_trait]
impl Dosage for RetryingDosage {
    fn items(&self) -> &[Item] {
        self.origin.items()
    }

    fn has_next(&self) -> bool {
        self.origin.has_next()
    }

    async fn next(&self) -> Result<Box<dyn Dosage>> {
        let next = retry(self.policy.as_ref(), "next", || self.origin.next()).await?;
        Ok(Box::new(RetryingDosage::new(next, Arc::clone(&self.policy))))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::mock::{item, MockCredentials};
    use crate::retry::Backoff;
    use crate::scan::{collect_items, ScanError, ScanValve};

    fn quick(max_attempts: u32) -> Arc<dyn RetryPolicy> {
        Arc::new(Backoff {
            max_attempts,
            initial_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
        })
    }

    #[tokio::test]
    async fn test_retrying_valve_recovers_first_page() {
        let credentials =
            MockCredentials::with_items(vec![vec![item(&[("id", "1")])]]).failing_first(2);
        let valve = RetryingValve::new(ScanValve::new(), quick(3));

        let dosage = valve
            .fetch(Arc::new(credentials.clone()), "users", &Conditions::new(), &[])
            .await
            .unwrap();

        assert_eq!(dosage.items(), &[item(&[("id", "1")])]);
        assert_eq!(credentials.acquired(), 3);
        assert_eq!(credentials.released(), 3);
    }

    #[tokio::test]
    async fn test_retrying_dosage_recovers_next_page() {
        let credentials = MockCredentials::with_items(vec![
            vec![item(&[("id", "1")])],
            vec![item(&[("id", "2")])],
            vec![item(&[("id", "3")])],
        ]);
        let valve = RetryingValve::new(ScanValve::new(), quick(3));
        let first = valve
            .fetch(Arc::new(credentials.clone()), "users", &Conditions::new(), &[])
            .await
            .unwrap();
        credentials.fail_next(2);

        let items = collect_items(first).await.unwrap();

        assert_eq!(items.len(), 3);
        // Retried requests reissue the same continuation key.
        let requests = credentials.requests();
        assert_eq!(requests.len(), 5);
        assert_eq!(requests[1], requests[2]);
        assert_eq!(requests[2], requests[3]);
    }

    #[tokio::test]
    async fn test_retrying_dosage_gives_up_and_keeps_receiver() {
        let credentials = MockCredentials::with_items(vec![
            vec![item(&[("id", "1")])],
            vec![item(&[("id", "2")])],
        ]);
        let valve = RetryingValve::new(ScanValve::new(), quick(2));
        let first = valve
            .fetch(Arc::new(credentials.clone()), "users", &Conditions::new(), &[])
            .await
            .unwrap();
        credentials.fail_next(5);

        let err = first.next().await.unwrap_err();

        assert!(matches!(err, ScanError::Io { .. }));
        assert!(first.has_next());
        assert_eq!(first.items(), &[item(&[("id", "1")])]);
    }

    #[tokio::test]
    async fn test_retrying_dosage_does_not_retry_misuse() {
        let credentials = MockCredentials::with_items(vec![vec![]]);
        let valve = RetryingValve::new(ScanValve::new(), quick(5));
        let first = valve
            .fetch(Arc::new(credentials.clone()), "users", &Conditions::new(), &[])
            .await
            .unwrap();

        assert_eq!(first.next().await.unwrap_err(), ScanError::NoNextPage);
        assert_eq!(credentials.acquired(), 1);
    }
}
