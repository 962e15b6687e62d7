use crate::scan::{ClientLease, Result};

use super::table::Table;
use super::traits::Region;

/// All tables have a prefix in front of their names.
///
/// Has to be used in combination with another region:
///
/// ```
/// use std::sync::Arc;
/// # use dynavalve_core::scan::{Credentials, RemoteClient, Result, ScanError};
/// use dynavalve_core::region::{PrefixedRegion, Region, SimpleRegion};
/// # #[derive(Debug)]
/// # struct Nothing;
/// # impl Credentials for Nothing {
/// #     fn aws(&self) -> Result<Box<dyn RemoteClient>> {
/// #         Err(ScanError::Credentials("none".to_string()))
/// #     }
/// # }
///
/// let region = PrefixedRegion::new(SimpleRegion::new(Arc::new(Nothing)), "foo-");
/// assert_eq!(region.table("test").name(), "foo-test");
/// ```
///
/// Handy when tables of several projects share one account.
#[derive(Debug, Clone)]
pub struct PrefixedRegion<R> {
    origin: R,
    prefix: String,
}

impl<R: Region> PrefixedRegion<R> {
    pub fn new(origin: R, prefix: impl Into<String>) -> Self {
        Self {
            origin,
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl<R: Region> Region for PrefixedRegion<R> {
    fn aws(&self) -> Result<ClientLease> {
        self.origin.aws()
    }

    fn table(&self, name: &str) -> Table {
        self.origin.table(&format!("{}{}", self.prefix, name))
    }
}
