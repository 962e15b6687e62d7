use std::fmt;
use std::ops::Deref;

use super::traits::{Credentials, RemoteClient};
use super::Result;

/// Scoped ownership of one remote client handle.
///
/// The handle is shut down exactly once when the lease is dropped, whichever
/// way the enclosing scope is left. Shutdown happens after the caller has
/// already taken the call's result, so it never replaces a failure.
pub struct ClientLease {
    client: Box<dyn RemoteClient>,
}

impl ClientLease {
    /// Resolves a fresh handle from `credentials`.
    pub fn acquire(credentials: &dyn Credentials) -> Result<Self> {
        Ok(Self::new(credentials.aws()?))
    }

    /// Takes ownership of an already resolved handle.
    pub fn new(client: Box<dyn RemoteClient>) -> Self {
        Self { client }
    }
}

impl Deref for ClientLease {
    type Target = dyn RemoteClient;

    fn deref(&self) -> &Self::Target {
        self.client.as_ref()
    }
}

impl Drop for ClientLease {
    fn drop(&mut self) {
        self.client.shutdown();
        tracing::debug!("Remote client released");
    }
}

impl fmt::Debug for ClientLease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientLease").finish_non_exhaustive()
    }
}
