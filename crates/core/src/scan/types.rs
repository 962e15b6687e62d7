use std::collections::{BTreeSet, HashMap};
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use super::condition::Conditions;

/// A single attribute value as stored by the remote store.
///
/// Numbers travel as their decimal string representation, the same way the
/// store's wire format carries them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttributeValue {
    S(String),
    N(String),
    B(Vec<u8>),
    Bool(bool),
    Null(bool),
    L(Vec<AttributeValue>),
    M(HashMap<String, AttributeValue>),
    Ss(Vec<String>),
    Ns(Vec<String>),
    Bs(Vec<Vec<u8>>),
}

impl AttributeValue {
    /// Shorthand for a string value.
    pub fn s(value: impl Into<String>) -> Self {
        Self::S(value.into())
    }

    /// Shorthand for a number value.
    pub fn n(value: impl ToString) -> Self {
        Self::N(value.to_string())
    }

    pub fn as_s(&self) -> Option<&str> {
        match self {
            Self::S(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_n(&self) -> Option<&str> {
        match self {
            Self::N(n) => Some(n),
            _ => None,
        }
    }
}

/// One record returned by a scan: attribute name to value.
pub type Item = HashMap<String, AttributeValue>;

/// Opaque marker returned by the store where the next page should resume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContinuationKey(Item);

impl ContinuationKey {
    pub fn new(key: Item) -> Self {
        Self(key)
    }

    pub fn as_item(&self) -> &Item {
        &self.0
    }

    pub fn into_item(self) -> Item {
        self.0
    }
}

/// Immutable description of one bounded scan request.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanSpec {
    table: String,
    attributes: BTreeSet<String>,
    conditions: Conditions,
    limit: NonZeroU32,
    exclusive_start_key: Option<ContinuationKey>,
}

impl ScanSpec {
    /// Creates a request for the first page of a scan.
    pub fn new(
        table: impl Into<String>,
        attributes: BTreeSet<String>,
        conditions: Conditions,
        limit: NonZeroU32,
    ) -> Self {
        Self {
            table: table.into(),
            attributes,
            conditions,
            limit,
            exclusive_start_key: None,
        }
    }

    /// Returns a copy of this request that resumes after `key`.
    pub fn resume(&self, key: ContinuationKey) -> Self {
        Self {
            table: self.table.clone(),
            attributes: self.attributes.clone(),
            conditions: self.conditions.clone(),
            limit: self.limit,
            exclusive_start_key: Some(key),
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// Attributes to project; empty means every attribute.
    pub fn attributes(&self) -> &BTreeSet<String> {
        &self.attributes
    }

    pub fn conditions(&self) -> &Conditions {
        &self.conditions
    }

    pub fn limit(&self) -> NonZeroU32 {
        self.limit
    }

    pub fn exclusive_start_key(&self) -> Option<&ContinuationKey> {
        self.exclusive_start_key.as_ref()
    }
}

/// One batch of items returned by a single scan call.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Page {
    pub items: Vec<Item>,
    /// Present if and only if the store has more pages for this scan.
    pub last_evaluated_key: Option<ContinuationKey>,
    /// Capacity units the store reports for the call, if any.
    pub consumed_capacity: Option<f64>,
}

impl Page {
    /// A final page carrying `items`.
    pub fn last(items: Vec<Item>) -> Self {
        Self {
            items,
            last_evaluated_key: None,
            consumed_capacity: None,
        }
    }

    /// A page followed by more pages, resuming after `key`.
    pub fn with_more(items: Vec<Item>, key: ContinuationKey) -> Self {
        Self {
            items,
            last_evaluated_key: Some(key),
            consumed_capacity: None,
        }
    }
}
