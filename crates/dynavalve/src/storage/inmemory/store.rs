//! In-memory tables with the store's scan semantics.

use std::collections::{BTreeMap, HashMap};
use std::ops::Bound;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;

use dynavalve_core::scan::{
    AttributeValue, ContinuationKey, Item, Page, Result, ScanError, ScanSpec,
};

use super::filter::matches_all;

/// Capacity units charged per evaluated item.
const CAPACITY_PER_ITEM: f64 = 0.5;

/// Primary key attributes of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySchema {
    pub partition_key: String,
    pub sort_key: Option<String>,
}

impl KeySchema {
    pub fn new(partition_key: impl Into<String>) -> Self {
        Self {
            partition_key: partition_key.into(),
            sort_key: None,
        }
    }

    pub fn with_sort_key(self, sort_key: impl Into<String>) -> Self {
        Self {
            partition_key: self.partition_key,
            sort_key: Some(sort_key.into()),
        }
    }

    fn names(&self) -> impl Iterator<Item = &String> {
        std::iter::once(&self.partition_key).chain(self.sort_key.iter())
    }

    /// Extracts the key attributes of `item`.
    fn key_of(&self, item: &Item) -> Result<Item> {
        self.names()
            .map(|name| {
                item.get(name)
                    .map(|value| (name.clone(), value.clone()))
                    .ok_or_else(|| {
                        ScanError::InvalidRequest(format!("missing key attribute '{}'", name))
                    })
            })
            .collect()
    }

    /// Encodes key attributes into a sortable string.
    fn encode(&self, key: &Item) -> Result<String> {
        let values = self
            .names()
            .map(|name| {
                key.get(name)
                    .ok_or_else(|| {
                        ScanError::InvalidRequest(format!("missing key attribute '{}'", name))
                    })
                    .and_then(canonical)
            })
            .collect::<Result<Vec<AttributeValue>>>()?;
        serde_json::to_string(&values).map_err(|e| ScanError::Conversion(e.to_string()))
    }
}

/// Number key components compare by value, so `1` and `1.0` address the
/// same item.
fn canonical(value: &AttributeValue) -> Result<AttributeValue> {
    match value {
        AttributeValue::N(text) => {
            let number = text
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .ok_or_else(|| {
                    ScanError::InvalidRequest(format!("invalid number '{}' in key", text))
                })?;
            // -0 and 0 are the same key.
            let number = if number == 0.0 { 0.0 } else { number };
            Ok(AttributeValue::N(number.to_string()))
        }
        other => Ok(other.clone()),
    }
}

#[derive(Debug)]
struct TableData {
    schema: KeySchema,
    items: BTreeMap<String, Item>,
}

/// In-memory document store for testing.
///
/// Items are kept in primary-key order, and scans resume strictly after the
/// key passed as exclusive start key, so items written or deleted between
/// pages behave as they would on the real store. Data is lost when the last
/// clone is dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<HashMap<String, TableData>>>,
    failures_left: Arc<AtomicUsize>,
}

impl InMemoryStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates `name`, replacing any table with that name.
    pub async fn create_table(&self, name: impl Into<String>, schema: KeySchema) {
        let mut tables = self.tables.write().await;
        tables.insert(
            name.into(),
            TableData {
                schema,
                items: BTreeMap::new(),
            },
        );
    }

    /// Inserts `item`, replacing any item with the same primary key.
    pub async fn put_item(&self, table: &str, item: Item) -> Result<()> {
        let mut tables = self.tables.write().await;
        let data = tables.get_mut(table).ok_or_else(|| not_found("put", table))?;
        let key = data.schema.key_of(&item)?;
        let encoded = data.schema.encode(&key)?;
        data.items.insert(encoded, item);
        Ok(())
    }

    /// Removes the item with primary key `key`. Returns whether it existed.
    pub async fn delete_item(&self, table: &str, key: &Item) -> Result<bool> {
        let mut tables = self.tables.write().await;
        let data = tables
            .get_mut(table)
            .ok_or_else(|| not_found("delete", table))?;
        let encoded = data.schema.encode(key)?;
        Ok(data.items.remove(&encoded).is_some())
    }

    /// Number of items in `table`.
    pub async fn count_items(&self, table: &str) -> Result<usize> {
        let tables = self.tables.read().await;
        tables
            .get(table)
            .map(|data| data.items.len())
            .ok_or_else(|| not_found("count", table))
    }

    /// Makes the next `n` scans fail with an I/O error.
    pub fn fail_next_scans(&self, n: usize) {
        self.failures_left.store(n, Ordering::SeqCst);
    }

    /// Runs one scan call.
    ///
    /// `limit` bounds the number of items *evaluated*, before filtering, so a
    /// page may hold fewer items than the limit, even none, while more pages
    /// remain. A continuation key is returned only when unevaluated items are
    /// left.
    pub async fn scan(&self, spec: &ScanSpec) -> Result<Page> {
        let injected = self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1));
        if injected.is_ok() {
            return Err(ScanError::io("scan", spec.table(), "injected failure"));
        }

        let tables = self.tables.read().await;
        let data = tables
            .get(spec.table())
            .ok_or_else(|| not_found("scan", spec.table()))?;

        let lower = match spec.exclusive_start_key() {
            Some(key) => Bound::Excluded(data.schema.encode(key.as_item())?),
            None => Bound::Unbounded,
        };
        let mut remaining = data.items.range((lower, Bound::Unbounded));
        let limit = spec.limit().get() as usize;

        let mut items = Vec::new();
        let mut evaluated = 0;
        let mut last = None;
        for (_, item) in remaining.by_ref().take(limit) {
            evaluated += 1;
            last = Some(item);
            if matches_all(item, spec.conditions())? {
                items.push(project(item, spec));
            }
        }

        let last_evaluated_key = match (last, remaining.next()) {
            (Some(item), Some(_)) => Some(ContinuationKey::new(data.schema.key_of(item)?)),
            _ => None,
        };

        Ok(Page {
            items,
            last_evaluated_key,
            consumed_capacity: Some(evaluated as f64 * CAPACITY_PER_ITEM),
        })
    }
}

fn project(item: &Item, spec: &ScanSpec) -> Item {
    if spec.attributes().is_empty() {
        return item.clone();
    }
    item.iter()
        .filter(|(name, _)| spec.attributes().contains(*name))
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect()
}

fn not_found(operation: &'static str, table: &str) -> ScanError {
    ScanError::io(operation, table, "table not found")
}
