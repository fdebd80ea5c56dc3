//! DynamoDB [`StoreClient`] implementation.

use std::time::Duration;

use async_trait::async_trait;
use aws_config::timeout::TimeoutConfig;
use aws_sdk_dynamodb::Client;
use vivah_core::storage::{Item, KeyCondition, QueryPage, Result, StoreClient};

use super::conversions::{from_dynamo_item, to_attribute_value, to_dynamo_item};
use super::error::{map_get_item_error, map_put_item_error, map_query_error};
use crate::config::Config;

/// DynamoDB-backed store.
///
/// One table per entity kind, addressed by name on every call.
#[derive(Debug, Clone)]
pub struct DynamoDbStore {
    client: Client,
    page_size: i32,
}

impl DynamoDbStore {
    /// Creates a new store with the given DynamoDB client.
    pub fn new(client: Client, page_size: usize) -> Self {
        Self {
            client,
            page_size: i32::try_from(page_size).unwrap_or(i32::MAX),
        }
    }

    /// Creates a new store from configuration.
    ///
    /// Uses the AWS SDK default credential chain. `AWS_ENDPOINT_URL` points
    /// the client at a local DynamoDB. Every operation, retries included, is
    /// bounded by `store_timeout` so a stalled call fails as `Unavailable`
    /// before the request deadline.
    pub async fn from_config(config: &Config) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(config.aws_region.clone()))
            .timeout_config(timeout_config(config.store_timeout));
        if let Some(endpoint) = &config.aws_endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }
        let sdk_config = loader.load().await;

        tracing::info!(
            region = %config.aws_region,
            endpoint = config.aws_endpoint_url.as_deref().unwrap_or("default"),
            timeout = ?config.store_timeout,
            "Connected DynamoDB client"
        );
        Self::new(Client::new(&sdk_config), config.query_page_size)
    }
}

fn timeout_config(timeout: Duration) -> TimeoutConfig {
    TimeoutConfig::builder()
        .operation_timeout(timeout)
        .operation_attempt_timeout(timeout)
        .build()
}

#[async_trait]
impl StoreClient for DynamoDbStore {
    async fn put_item(&self, table: &str, item: Item) -> Result<()> {
        self.client
            .put_item()
            .table_name(table)
            .set_item(Some(to_dynamo_item(item)))
            .send()
            .await
            .map_err(|e| map_put_item_error(e, table))?;

        Ok(())
    }

    async fn get_item(&self, table: &str, key: Item) -> Result<Option<Item>> {
        let result = self
            .client
            .get_item()
            .table_name(table)
            .set_key(Some(to_dynamo_item(key)))
            .send()
            .await
            .map_err(|e| map_get_item_error(e, table))?;

        result.item.map(from_dynamo_item).transpose()
    }

    async fn query(
        &self,
        table: &str,
        index: Option<&str>,
        condition: &KeyCondition,
        exclusive_start_key: Option<Item>,
    ) -> Result<QueryPage> {
        let result = self
            .client
            .query()
            .table_name(table)
            .set_index_name(index.map(str::to_string))
            .key_condition_expression("#pk = :pk")
            .expression_attribute_names("#pk", condition.attribute.as_str())
            .expression_attribute_values(":pk", to_attribute_value(condition.value.clone()))
            .limit(self.page_size)
            .set_exclusive_start_key(exclusive_start_key.map(to_dynamo_item))
            .send()
            .await
            .map_err(|e| map_query_error(e, table))?;

        let items = result
            .items
            .unwrap_or_default()
            .into_iter()
            .map(from_dynamo_item)
            .collect::<Result<Vec<_>>>()?;

        let last_evaluated_key = result
            .last_evaluated_key
            .filter(|key| !key.is_empty())
            .map(from_dynamo_item)
            .transpose()?;

        Ok(QueryPage {
            items,
            last_evaluated_key,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_config_bounds_operation_and_attempt() {
        let config = timeout_config(Duration::from_millis(2500));

        assert_eq!(config.operation_timeout(), Some(Duration::from_millis(2500)));
        assert_eq!(
            config.operation_attempt_timeout(),
            Some(Duration::from_millis(2500))
        );
    }
}
