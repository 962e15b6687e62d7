use std::fmt::Debug;
use std::future::Future;
use std::time::Duration;

use crate::scan::{Result, ScanError};

/// Decides whether, and after how long, a failed call is reissued.
///
/// Only errors for which [`ScanError::is_retriable`] holds are ever passed
/// in; misuse and invalid requests fail straight away.
pub trait RetryPolicy: Send + Sync + Debug {
    /// Delay before the next attempt, or `None` to give up.
    ///
    /// `attempt` is the number of attempts made so far, starting at 1.
    fn delay(&self, attempt: u32, error: &ScanError) -> Option<Duration>;
}

/// Never retries.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRetry;

impl RetryPolicy for NoRetry {
    fn delay(&self, _attempt: u32, _error: &ScanError) -> Option<Duration> {
        None
    }
}

/// Exponential backoff capped at `max_delay`, giving up after
/// `max_attempts` attempts in total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Backoff {
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
}

impl Default for Backoff {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_millis(2000),
        }
    }
}

impl Backoff {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            ..Default::default()
        }
    }
}

impl RetryPolicy for Backoff {
    fn delay(&self, attempt: u32, _error: &ScanError) -> Option<Duration> {
        if attempt >= self.max_attempts {
            return None;
        }
        let factor = 1u32
            .checked_shl(attempt.saturating_sub(1))
            .unwrap_or(u32::MAX);
        Some(self.initial_delay.saturating_mul(factor).min(self.max_delay))
    }
}

/// Runs `call` until it succeeds, fails with a non-retriable error, or the
/// policy gives up. The last error is returned unchanged.
pub async fn retry<T, F, Fut>(
    policy: &dyn RetryPolicy,
    operation: &'static str,
    mut call: F,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut attempt = 1;
    loop {
        let err = match call().await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };
        if !err.is_retriable() {
            return Err(err);
        }
        let Some(delay) = policy.delay(attempt, &err) else {
            return Err(err);
        };
        tracing::warn!(
            operation,
            attempt,
            delay_ms = delay.as_millis() as u64,
            error = %err,
            "Retrying failed call"
        );
        tokio::time::sleep(delay).await;
        attempt += 1;
    }
}
