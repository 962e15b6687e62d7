//! Retry seam for page fetches.
//!
//! Every page fetch is a single, idempotent remote call: the request that
//! produced a given dosage can always be reissued without touching earlier
//! dosages. The decorators here reissue exactly those calls under a
//! pluggable [`RetryPolicy`].

mod policy;
mod valve;

pub use policy::{retry, Backoff, NoRetry, RetryPolicy};
pub use valve::{fetch_with_retry, RetryingDosage, RetryingValve};
