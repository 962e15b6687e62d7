//! Scans one table page by page and prints every item as a JSON line.
//!
//! ```text
//! AWS_ENDPOINT_URL=http://localhost:8000 \
//!   cargo run -p dynavalve --features dynamodb --example scan-table -- \
//!     users --filter status=active
//! ```

use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use futures_util::{pin_mut, TryStreamExt};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dynavalve::region::Region;
use dynavalve::scan::{into_item_stream, AttributeValue, Condition, Conditions};
use dynavalve::storage::dynamodb::DynamoDbCredentials;
use dynavalve::Config;

/// Scan a DynamoDB table
#[derive(Debug, Parser)]
#[command(name = "scan-table")]
struct Cli {
    /// Logical table name, before any configured prefix
    table: String,

    /// Attributes to fetch, all of them when omitted
    #[arg(long = "attribute", short = 'a')]
    attributes: Vec<String>,

    /// Equality filter in `name=value` form, repeatable
    #[arg(long = "filter", short = 'f')]
    filters: Vec<String>,

    /// Items evaluated per page
    #[arg(long, env = "DYNAVALVE_PAGE_LIMIT")]
    limit: Option<u32>,

    /// Prefix prepended to the table name
    #[arg(long, env = "DYNAVALVE_TABLE_PREFIX")]
    prefix: Option<String>,
}

fn parse_filters(filters: &[String]) -> Result<Conditions> {
    filters
        .iter()
        .map(|filter| {
            let (name, value) = filter
                .split_once('=')
                .ok_or_else(|| anyhow!("invalid filter '{}', expected name=value", filter))?;
            Ok((name.to_string(), Condition::eq(AttributeValue::s(value))))
        })
        .collect()
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dynavalve=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = Config::from_env();
    if let Some(prefix) = cli.prefix {
        config.table_prefix = prefix;
    }

    let mut valve = config.valve().with_attributes_to_get(cli.attributes.iter().cloned());
    if let Some(limit) = cli.limit {
        valve = valve.try_with_limit(limit)?;
    }
    let conditions = parse_filters(&cli.filters)?;

    tracing::info!(endpoint = %config.target_display(), "Connecting to DynamoDB");
    let credentials = DynamoDbCredentials::load(&config).await;
    let region = config.region(Arc::new(credentials));
    let table = region.table(&cli.table);

    let first = table
        .scan(&valve, &conditions, &[])
        .await
        .with_context(|| format!("failed to scan {}", table.name()))?;

    let items = into_item_stream(first);
    pin_mut!(items);
    let mut count = 0usize;
    while let Some(item) = items.try_next().await? {
        println!("{}", serde_json::to_string(&item)?);
        count += 1;
    }

    tracing::info!(table = %table.name(), count, "Scan complete");
    Ok(())
}
