use std::collections::BTreeSet;
use std::num::NonZeroU32;
use std::sync::Arc;

use async_trait::async_trait;

use super::condition::Conditions;
use super::dosage::{load_page, ScanDosage};
use super::traits::{Credentials, Dosage, Valve};
use super::types::ScanSpec;
use super::{Result, ScanError};

/// Page size used when none is configured.
pub const DEFAULT_LIMIT: NonZeroU32 = match NonZeroU32::new(100) {
    Some(limit) => limit,
    None => unreachable!(),
};

/// Scan-based valve.
///
/// Holds the page limit and the attributes always fetched with every item.
/// The `with_*` methods return a new valve and leave the receiver unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanValve {
    limit: NonZeroU32,
    attributes: BTreeSet<String>,
}

impl Default for ScanValve {
    fn default() -> Self {
        Self::new()
    }
}

impl ScanValve {
    /// A valve with a limit of 100 and no preloaded attributes.
    pub fn new() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            attributes: BTreeSet::new(),
        }
    }

    /// With given page limit.
    pub fn with_limit(&self, limit: NonZeroU32) -> Self {
        Self {
            limit,
            attributes: self.attributes.clone(),
        }
    }

    /// With given page limit, rejecting zero.
    pub fn try_with_limit(&self, limit: u32) -> Result<Self> {
        let limit = NonZeroU32::new(limit)
            .ok_or_else(|| ScanError::InvalidRequest("limit must be positive".to_string()))?;
        Ok(self.with_limit(limit))
    }

    /// With this extra attribute to pre-fetch.
    pub fn with_attribute_to_get(&self, name: impl Into<String>) -> Self {
        let mut attributes = self.attributes.clone();
        attributes.insert(name.into());
        Self {
            limit: self.limit,
            attributes,
        }
    }

    /// With these extra attributes to pre-fetch.
    pub fn with_attributes_to_get<I, S>(&self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut attributes = self.attributes.clone();
        attributes.extend(names.into_iter().map(Into::into));
        Self {
            limit: self.limit,
            attributes,
        }
    }

    pub fn limit(&self) -> NonZeroU32 {
        self.limit
    }

    /// Attributes pre-fetched with every item.
    pub fn attributes(&self) -> &BTreeSet<String> {
        &self.attributes
    }

    /// Builds the first-page request for `table`.
    pub fn request(
        &self,
        table: &str,
        conditions: &Conditions,
        keys: &[String],
    ) -> Result<ScanSpec> {
        if table.is_empty() {
            return Err(ScanError::InvalidRequest("table name is empty".to_string()));
        }
        let mut attributes = self.attributes.clone();
        attributes.extend(keys.iter().cloned());
        Ok(ScanSpec::new(table, attributes, conditions.clone(), self.limit))
    }
}

#[async_trait]
impl Valve for ScanValve {
    async fn fetch(
        &self,
        credentials: Arc<dyn Credentials>,
        table: &str,
        conditions: &Conditions,
        keys: &[String],
    ) -> Result<Box<dyn Dosage>> {
        let spec = Arc::new(self.request(table, conditions, keys)?);
        let page = load_page("fetch", credentials.as_ref(), &spec).await?;
        Ok(Box::new(ScanDosage::new(credentials, spec, page)))
    }
}
