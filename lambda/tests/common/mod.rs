#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use cloudlink::core::config::{ProfileConfig, StorageConfig};
use cloudlink::core::keys::ProfileKeySchema;
use cloudlink::core::models::ProfileItem;
use cloudlink::errors::StorageError;
use cloudlink::storage::{ObjectSigner, ProfileStore, SignedOperation, SignedUrlGrant};
use serde_json::Value;

/// One call made against `FakeSigner`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningCall {
    pub operation: SignedOperation,
    pub bucket: String,
    pub key: String,
    pub content_type: Option<String>,
    pub expires_in: Duration,
}

/// Object signer that fabricates URLs and records every request.
#[derive(Default)]
pub struct FakeSigner {
    fail_with: Option<String>,
    calls: Mutex<Vec<SigningCall>>,
}

impl FakeSigner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<SigningCall> {
        self.calls.lock().unwrap().clone()
    }

    fn sign(
        &self,
        operation: SignedOperation,
        bucket: &str,
        key: &str,
        content_type: Option<&str>,
        expires_in: Duration,
    ) -> Result<SignedUrlGrant, StorageError> {
        self.calls.lock().unwrap().push(SigningCall {
            operation,
            bucket: bucket.to_string(),
            key: key.to_string(),
            content_type: content_type.map(ToString::to_string),
            expires_in,
        });

        if let Some(message) = &self.fail_with {
            return Err(StorageError::Presign(message.clone()));
        }

        let url = format!(
            "https://{bucket}.s3.test/{key}?X-Op={:?}&X-Expires={}",
            operation,
            expires_in.as_secs()
        );
        Ok(SignedUrlGrant::new(operation, key, url, expires_in))
    }
}

#[async_trait]
impl ObjectSigner for FakeSigner {
    async fn presign_get(
        &self,
        bucket: &str,
        key: &str,
        expires_in: Duration,
    ) -> Result<SignedUrlGrant, StorageError> {
        self.sign(SignedOperation::Get, bucket, key, None, expires_in)
    }

    async fn presign_put(
        &self,
        bucket: &str,
        key: &str,
        content_type: Option<&str>,
        expires_in: Duration,
    ) -> Result<SignedUrlGrant, StorageError> {
        self.sign(SignedOperation::Put, bucket, key, content_type, expires_in)
    }
}

/// Profile table held in memory, keyed by (table, partition key, sort key).
pub struct InMemoryProfileStore {
    schema: ProfileKeySchema,
    fail_with: Option<String>,
    items: Mutex<HashMap<(String, String, String), ProfileItem>>,
}

impl InMemoryProfileStore {
    pub fn new(schema: ProfileKeySchema) -> Self {
        Self {
            schema,
            fail_with: None,
            items: Mutex::new(HashMap::new()),
        }
    }

    pub fn failing(schema: ProfileKeySchema, message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Self::new(schema)
        }
    }

    pub fn len(&self) -> usize {
        self.items.lock().unwrap().len()
    }

    pub fn stored(&self, table: &str, pk: &str, sk: &str) -> Option<ProfileItem> {
        self.items
            .lock()
            .unwrap()
            .get(&(table.to_string(), pk.to_string(), sk.to_string()))
            .cloned()
    }

    fn key_of(&self, table: &str, item: &ProfileItem) -> (String, String, String) {
        let attr = |name: &str| match item.get(name) {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => String::new(),
        };
        (
            table.to_string(),
            attr(&self.schema.primary_key),
            attr(&self.schema.sort_key),
        )
    }

    fn check_failure(&self) -> Result<(), StorageError> {
        match &self.fail_with {
            Some(message) => Err(StorageError::Serialization(
                <serde_dynamo::Error as serde::de::Error>::custom(message.clone()),
            )),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn get_item(
        &self,
        table_name: &str,
        key: ProfileItem,
    ) -> Result<Option<ProfileItem>, StorageError> {
        self.check_failure()?;
        let key = self.key_of(table_name, &key);
        Ok(self.items.lock().unwrap().get(&key).cloned())
    }

    async fn put_item(&self, table_name: &str, item: ProfileItem) -> Result<(), StorageError> {
        self.check_failure()?;
        let key = self.key_of(table_name, &item);
        self.items.lock().unwrap().insert(key, item);
        Ok(())
    }
}

pub fn storage_config(vars: &[(&str, &str)]) -> StorageConfig {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    StorageConfig::from_lookup(|name| vars.get(name).cloned()).unwrap()
}

pub fn profile_config(vars: &[(&str, &str)]) -> ProfileConfig {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    ProfileConfig::from_lookup(|name| vars.get(name).cloned()).unwrap()
}

/// Decodes the JSON-string body of a proxy response.
pub fn body(response: &Value) -> Value {
    serde_json::from_str(response["body"].as_str().expect("body is a string"))
        .expect("body is JSON")
}

pub fn status(response: &Value) -> u64 {
    response["statusCode"].as_u64().expect("statusCode")
}
