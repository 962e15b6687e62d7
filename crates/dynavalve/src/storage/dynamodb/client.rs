//! AWS SDK client setup.

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::operation::scan::ScanInput;
use aws_sdk_dynamodb::types::ReturnConsumedCapacity;
use aws_sdk_dynamodb::Client;

use dynavalve_core::scan::{Credentials, Page, RemoteClient, Result, ScanError, ScanSpec};

use super::conversions::{from_sdk_item, to_continuation_key, to_sdk_condition, to_sdk_item};
use super::error::map_scan_error;
use crate::config::Config;

/// Credentials backed by a loaded AWS SDK configuration.
///
/// Each call to [`Credentials::aws`] builds a new [`Client`] from the shared
/// configuration, which is cheap and keeps handles independent.
#[derive(Debug, Clone)]
pub struct DynamoDbCredentials {
    sdk_config: aws_config::SdkConfig,
}

impl DynamoDbCredentials {
    pub fn new(sdk_config: aws_config::SdkConfig) -> Self {
        Self { sdk_config }
    }

    /// Loads the SDK configuration using the default credential chain,
    /// overriding region and endpoint from `config`.
    pub async fn load(config: &Config) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(config.region.clone()));

        if let Some(endpoint) = &config.endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }

        Self::new(loader.load().await)
    }
}

impl Credentials for DynamoDbCredentials {
    fn aws(&self) -> Result<Box<dyn RemoteClient>> {
        Ok(Box::new(DynamoDbClient {
            client: Client::new(&self.sdk_config),
        }))
    }
}

/// One DynamoDB client handle.
pub struct DynamoDbClient {
    client: Client,
}

/// Builds the legacy-parameter `Scan` input for `spec`.
///
/// `AttributesToGet` and `ScanFilter` are left unset when empty, which
/// fetches every attribute of every item.
pub(crate) fn scan_input(spec: &ScanSpec) -> Result<ScanInput> {
    let attributes = if spec.attributes().is_empty() {
        None
    } else {
        Some(spec.attributes().iter().cloned().collect())
    };
    let filter = if spec.conditions().is_empty() {
        None
    } else {
        Some(
            spec.conditions()
                .iter()
                .map(|(name, condition)| Ok((name.clone(), to_sdk_condition(condition)?)))
                .collect::<Result<HashMap<_, _>>>()?,
        )
    };

    ScanInput::builder()
        .table_name(spec.table())
        .limit(i32::try_from(spec.limit().get()).unwrap_or(i32::MAX))
        .return_consumed_capacity(ReturnConsumedCapacity::Total)
        .set_attributes_to_get(attributes)
        .set_scan_filter(filter)
        .set_exclusive_start_key(spec.exclusive_start_key().map(|key| to_sdk_item(key.as_item())))
        .build()
        .map_err(|e| ScanError::Conversion(e.to_string()))
}

#[async_trait]
impl RemoteClient for DynamoDbClient {
    async fn scan(&self, spec: &ScanSpec) -> Result<Page> {
        let input = scan_input(spec)?;
        let output = self
            .client
            .scan()
            .set_table_name(input.table_name)
            .set_attributes_to_get(input.attributes_to_get)
            .set_limit(input.limit)
            .set_scan_filter(input.scan_filter)
            .set_exclusive_start_key(input.exclusive_start_key)
            .set_return_consumed_capacity(input.return_consumed_capacity)
            .send()
            .await
            .map_err(|e| map_scan_error(e, spec.table()))?;

        let items = output
            .items()
            .iter()
            .map(from_sdk_item)
            .collect::<Result<Vec<_>>>()?;

        Ok(Page {
            items,
            last_evaluated_key: to_continuation_key(output.last_evaluated_key())?,
            consumed_capacity: output.consumed_capacity().and_then(|c| c.capacity_units()),
        })
    }

    fn shutdown(&self) {
        tracing::trace!("DynamoDB client handle shut down");
    }
}
