use std::collections::HashMap;

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_dynamodb::{Client as DynamoDbClient, types::AttributeValue};
use tracing::debug;

use super::ProfileStore;
use crate::core::models::ProfileItem;
use crate::errors::StorageError;

/// Profile table backed by DynamoDB. Items are converted between JSON and
/// attribute maps with `serde_dynamo`.
pub struct DynamoProfileStore {
    client: DynamoDbClient,
}

impl DynamoProfileStore {
    #[must_use]
    pub const fn new(client: DynamoDbClient) -> Self {
        Self { client }
    }

    pub async fn from_region(region: &str) -> Self {
        let shared = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .load()
            .await;
        Self::new(DynamoDbClient::new(&shared))
    }
}

#[async_trait]
impl ProfileStore for DynamoProfileStore {
    async fn get_item(
        &self,
        table_name: &str,
        key: ProfileItem,
    ) -> Result<Option<ProfileItem>, StorageError> {
        let key: HashMap<String, AttributeValue> = serde_dynamo::to_item(key)?;
        debug!(table = %table_name, "GetItem");

        let response = self
            .client
            .get_item()
            .table_name(table_name)
            .set_key(Some(key))
            .send()
            .await?;

        match response.item {
            Some(item) => Ok(Some(serde_dynamo::from_item(item)?)),
            None => Ok(None),
        }
    }

    async fn put_item(&self, table_name: &str, item: ProfileItem) -> Result<(), StorageError> {
        let item: HashMap<String, AttributeValue> = serde_dynamo::to_item(item)?;
        debug!(table = %table_name, attributes = item.len(), "PutItem");

        self.client
            .put_item()
            .table_name(table_name)
            .set_item(Some(item))
            .send()
            .await?;

        Ok(())
    }
}
