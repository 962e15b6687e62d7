use std::fmt;
use std::sync::Arc;

use crate::retry::RetryPolicy;
use crate::scan::{ClientLease, Result};

use super::table::Table;
use super::traits::Region;

/// Region whose tables retry failed page fetches under a policy.
///
/// Stacks with [`super::PrefixedRegion`] in either order.
pub struct RetryingRegion<R> {
    origin: R,
    policy: Arc<dyn RetryPolicy>,
}

impl<R: Region> RetryingRegion<R> {
    pub fn new(origin: R, policy: Arc<dyn RetryPolicy>) -> Self {
        Self { origin, policy }
    }
}

impl<R: fmt::Debug> fmt::Debug for RetryingRegion<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryingRegion")
            .field("origin", &self.origin)
            .field("policy", &self.policy)
            .finish()
    }
}

impl<R: Region> Region for RetryingRegion<R> {
    fn aws(&self) -> Result<ClientLease> {
        self.origin.aws()
    }

    fn table(&self, name: &str) -> Table {
        self.origin.table(name).with_retry(Arc::clone(&self.policy))
    }
}
