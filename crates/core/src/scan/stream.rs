use async_stream::try_stream;
use futures_util::{Stream, TryStreamExt};

use super::traits::Dosage;
use super::types::Item;
use super::Result;

/// Flattens a chain of dosages into a stream of items.
///
/// Pages are fetched lazily: the next remote call only happens once every
/// item of the current page has been yielded. The stream ends after the
/// page without a continuation key and stops at the first error.
pub fn into_item_stream(first: Box<dyn Dosage>) -> impl Stream<Item = Result<Item>> + Send {
    try_stream! {
        let mut dosage = first;
        loop {
            for item in dosage.items() {
                yield item.clone();
            }
            if !dosage.has_next() {
                break;
            }
            let next = dosage.next().await?;
            dosage = next;
        }
    }
}

/// Drains every page into one vector, preserving store order.
pub async fn collect_items(first: Box<dyn Dosage>) -> Result<Vec<Item>> {
    into_item_stream(first).try_collect().await
}
