//! Capabilities the handlers call out to: signing object URLs and reading or
//! writing the profile table. Handlers only see the traits, so tests can swap
//! in fakes.

pub mod dynamodb;
pub mod s3;

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};

use crate::core::models::ProfileItem;
use crate::errors::StorageError;

pub use dynamodb::DynamoProfileStore;
pub use s3::S3Signer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignedOperation {
    Get,
    Put,
}

/// A time-limited signed URL. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedUrlGrant {
    pub operation: SignedOperation,
    pub key: String,
    pub url: String,
    pub expires_at: DateTime<Utc>,
}

impl SignedUrlGrant {
    #[must_use]
    pub fn new(
        operation: SignedOperation,
        key: &str,
        url: impl Into<String>,
        expires_in: Duration,
    ) -> Self {
        Self {
            operation,
            key: key.to_string(),
            url: url.into(),
            expires_at: Utc::now() + TimeDelta::from_std(expires_in).unwrap_or_default(),
        }
    }
}

#[async_trait]
pub trait ObjectSigner: Send + Sync {
    /// Signs a read of `key` in `bucket`, valid for `expires_in`.
    async fn presign_get(
        &self,
        bucket: &str,
        key: &str,
        expires_in: Duration,
    ) -> Result<SignedUrlGrant, StorageError>;

    /// Signs a write of `key` in `bucket`. When `content_type` is given the
    /// upload must send the same `Content-Type`.
    async fn presign_put(
        &self,
        bucket: &str,
        key: &str,
        content_type: Option<&str>,
        expires_in: Duration,
    ) -> Result<SignedUrlGrant, StorageError>;
}

#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Fetches the item addressed by `key`, which carries exactly the key attributes.
    async fn get_item(
        &self,
        table_name: &str,
        key: ProfileItem,
    ) -> Result<Option<ProfileItem>, StorageError>;

    /// Unconditionally replaces the item with the same key.
    async fn put_item(&self, table_name: &str, item: ProfileItem) -> Result<(), StorageError>;
}
