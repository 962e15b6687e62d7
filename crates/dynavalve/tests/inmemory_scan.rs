//! End-to-end scans over the in-memory store through the configured region
//! stack.

#![cfg(feature = "inmemory")]

use std::collections::HashMap;
use std::num::NonZeroU32;
use std::sync::Arc;

use futures_util::{pin_mut, TryStreamExt};

use dynavalve::region::Region;
use dynavalve::scan::{
    collect_items, into_item_stream, AttributeValue, Condition, Conditions, Item, ScanError,
};
use dynavalve::storage::inmemory::{InMemoryCredentials, InMemoryStore, KeySchema};
use dynavalve::Config;

fn config(prefix: &str, page_limit: u32) -> Config {
    Config {
        endpoint_url: None,
        region: "us-east-1".to_string(),
        table_prefix: prefix.to_string(),
        page_limit: NonZeroU32::new(page_limit).unwrap(),
        max_attempts: 3,
    }
}

fn user(id: &str, status: &str) -> Item {
    HashMap::from([
        ("id".to_string(), AttributeValue::s(id)),
        ("status".to_string(), AttributeValue::s(status)),
        ("email".to_string(), AttributeValue::s(format!("{}@example.com", id))),
    ])
}

async fn seeded(table: &str, users: &[(&str, &str)]) -> InMemoryCredentials {
    let store = InMemoryStore::new();
    store.create_table(table, KeySchema::new("id")).await;
    for (id, status) in users {
        store.put_item(table, user(id, status)).await.unwrap();
    }
    InMemoryCredentials::new(store)
}

fn ids(items: &[Item]) -> Vec<&str> {
    items.iter().map(|i| i["id"].as_s().unwrap()).collect()
}

#[tokio::test]
async fn test_prefixed_scan_walks_every_page() {
    let credentials = seeded(
        "prod-users",
        &[("e", "active"), ("a", "active"), ("c", "active"), ("b", "active"), ("d", "active")],
    )
    .await;
    let config = config("prod-", 2);
    let region = config.region(Arc::new(credentials.clone()));

    let first = region
        .table("users")
        .scan(&config.valve(), &Conditions::new(), &[])
        .await
        .unwrap();
    let items = collect_items(first).await.unwrap();

    assert_eq!(ids(&items), vec!["a", "b", "c", "d", "e"]);
    assert_eq!(credentials.acquired(), 3);
    assert_eq!(credentials.released(), 3);
}

#[tokio::test]
async fn test_filter_and_projection() {
    let credentials = seeded(
        "users",
        &[("a", "active"), ("b", "banned"), ("c", "active")],
    )
    .await;
    let config = config("", 100);
    let region = config.region(Arc::new(credentials));
    let mut conditions = Conditions::new();
    conditions.insert("status".to_string(), Condition::eq(AttributeValue::s("active")));
    let valve = config.valve().with_attribute_to_get("email");

    let first = region
        .table("users")
        .scan(&valve, &conditions, &["id".to_string()])
        .await
        .unwrap();
    let items = collect_items(first).await.unwrap();

    assert_eq!(ids(&items), vec!["a", "c"]);
    for item in &items {
        let mut names: Vec<&str> = item.keys().map(String::as_str).collect();
        names.sort_unstable();
        assert_eq!(names, vec!["email", "id"]);
    }
}

#[tokio::test]
async fn test_transient_failure_mid_scan_is_retried() {
    let credentials = seeded("users", &[("a", "active"), ("b", "active"), ("c", "active")]).await;
    let config = config("", 1);
    let region = config.region(Arc::new(credentials.clone()));

    let first = region
        .table("users")
        .scan(&config.valve(), &Conditions::new(), &[])
        .await
        .unwrap();
    credentials.store().fail_next_scans(1);

    let items = into_item_stream(first);
    pin_mut!(items);
    let mut seen = Vec::new();
    while let Some(item) = items.try_next().await.unwrap() {
        seen.push(item);
    }

    assert_eq!(ids(&seen), vec!["a", "b", "c"]);
    assert_eq!(credentials.acquired(), credentials.released());
}

#[tokio::test]
async fn test_exhausted_cursor_reports_misuse() {
    let credentials = seeded("users", &[("a", "active")]).await;
    let config = config("", 10);
    let region = config.region(Arc::new(credentials.clone()));

    let dosage = region
        .table("users")
        .scan(&config.valve(), &Conditions::new(), &[])
        .await
        .unwrap();

    assert!(!dosage.has_next());
    assert_eq!(dosage.next().await.unwrap_err(), ScanError::NoNextPage);
    assert_eq!(credentials.acquired(), 1);
    assert_eq!(credentials.released(), 1);
}

#[tokio::test]
async fn test_missing_table_gives_up_after_max_attempts() {
    let credentials = InMemoryCredentials::new(InMemoryStore::new());
    let config = config("", 10);
    let region = config.region(Arc::new(credentials.clone()));

    let err = region
        .table("ghosts")
        .scan(&config.valve(), &Conditions::new(), &[])
        .await
        .unwrap_err();

    assert!(matches!(err, ScanError::Io { .. }));
    assert_eq!(credentials.acquired(), 3);
    assert_eq!(credentials.released(), 3);
}

#[tokio::test]
async fn test_direct_lease_reaches_store() {
    let credentials = seeded("users", &[("a", "active")]).await;
    let region = config("", 10).region(Arc::new(credentials.clone()));

    let lease = region.aws().unwrap();
    drop(lease);

    assert_eq!(credentials.acquired(), 1);
    assert_eq!(credentials.released(), 1);
}
