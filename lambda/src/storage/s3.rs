use std::time::Duration;

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::{Client, error::DisplayErrorContext, presigning::PresigningConfig};
use tracing::debug;

use super::{ObjectSigner, SignedOperation, SignedUrlGrant};
use crate::errors::StorageError;

/// Presigns S3 requests locally from the client's credentials. No request is
/// sent to S3.
pub struct S3Signer {
    client: Client,
}

impl S3Signer {
    #[must_use]
    pub const fn new(client: Client) -> Self {
        Self { client }
    }

    /// Loads the default credential chain with an explicit region.
    pub async fn from_region(region: &str) -> Self {
        let shared = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .load()
            .await;
        Self::new(Client::new(&shared))
    }
}

fn presigning_config(expires_in: Duration) -> Result<PresigningConfig, StorageError> {
    PresigningConfig::expires_in(expires_in)
        .map_err(|e| StorageError::PresignConfig(format!("{}", DisplayErrorContext(&e))))
}

#[async_trait]
impl ObjectSigner for S3Signer {
    async fn presign_get(
        &self,
        bucket: &str,
        key: &str,
        expires_in: Duration,
    ) -> Result<SignedUrlGrant, StorageError> {
        debug!(bucket = %bucket, key = %key, "Presigning GetObject");

        let presigned = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .presigned(presigning_config(expires_in)?)
            .await
            .map_err(|e| StorageError::Presign(format!("{}", DisplayErrorContext(&e))))?;

        Ok(SignedUrlGrant::new(
            SignedOperation::Get,
            key,
            presigned.uri(),
            expires_in,
        ))
    }

    async fn presign_put(
        &self,
        bucket: &str,
        key: &str,
        content_type: Option<&str>,
        expires_in: Duration,
    ) -> Result<SignedUrlGrant, StorageError> {
        debug!(bucket = %bucket, key = %key, content_type = ?content_type, "Presigning PutObject");

        let presigned = self
            .client
            .put_object()
            .bucket(bucket)
            .key(key)
            .set_content_type(content_type.map(ToString::to_string))
            .presigned(presigning_config(expires_in)?)
            .await
            .map_err(|e| StorageError::Presign(format!("{}", DisplayErrorContext(&e))))?;

        Ok(SignedUrlGrant::new(
            SignedOperation::Put,
            key,
            presigned.uri(),
            expires_in,
        ))
    }
}
