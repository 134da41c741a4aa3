//! Upload-link issuer: signs a PUT for `uploads/<filename>` together with a
//! matching GET and the object's permanent URL.

use lambda_runtime::{Error, LambdaEvent};
use serde_json::Value;
use tracing::{error, info, warn};

use super::{helpers, parsing};
use crate::core::{config::StorageConfig, keys, models::UploadLinks};
use crate::errors::HandlerError;
use crate::storage::ObjectSigner;

const TRACE_LINES: usize = 15;
const FAILURE_CONTEXT: &str = "failed to generate presigned url";

/// Filename and optional content type, as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub filename: String,
    pub content_type: Option<String>,
}

impl UploadRequest {
    /// Reads the request from query parameters, falling back to a JSON body.
    ///
    /// The body is only consulted when the query carries no filename; a body
    /// `contentType` then overrides the query one.
    pub fn from_event(event: &Value) -> Option<Self> {
        let query_content_type = parsing::query_param(event, "contentType");

        if let Some(filename) = parsing::query_param(event, "filename") {
            return Some(Self {
                filename: filename.to_string(),
                content_type: query_content_type.map(ToString::to_string),
            });
        }

        let body = parsing::json_body(event);
        let filename = parsing::field_str(&body, "filename")?;
        let content_type = parsing::field_str(&body, "contentType").or(query_content_type);

        Some(Self {
            filename: filename.to_string(),
            content_type: content_type.map(ToString::to_string),
        })
    }
}

pub async fn function_handler(
    config: &StorageConfig,
    signer: &dyn ObjectSigner,
    event: LambdaEvent<Value>,
) -> Result<Value, Error> {
    Ok(handle_upload(config, signer, &event.payload).await)
}

#[tracing::instrument(level = "info", skip_all)]
pub async fn handle_upload(
    config: &StorageConfig,
    signer: &dyn ObjectSigner,
    event: &Value,
) -> Value {
    match issue_upload_links(config, signer, event).await {
        Ok(links) => {
            let body = serde_json::to_value(&links).unwrap_or_default();
            helpers::proxy_response(200, &body)
        }
        Err(e) => {
            if e.status_code() >= 500 {
                error!(error = %e, "Upload link request failed");
            } else {
                warn!(status = e.status_code(), error = %e, "Upload link request rejected");
            }
            helpers::error_response(&e, config.expose_error_details, TRACE_LINES)
        }
    }
}

async fn issue_upload_links(
    config: &StorageConfig,
    signer: &dyn ObjectSigner,
    event: &Value,
) -> Result<UploadLinks, HandlerError> {
    let Some(bucket) = config.bucket_name.as_deref() else {
        return Err(HandlerError::Config("Missing BUCKET_NAME env var".to_string()));
    };

    let request = UploadRequest::from_event(event).ok_or_else(|| {
        HandlerError::BadRequest("filename required (query param or JSON body)".to_string())
    })?;

    let key = keys::upload_key(&request.filename);

    let upload = signer
        .presign_put(
            bucket,
            &key,
            request.content_type.as_deref(),
            config.presign_expiry,
        )
        .await
        .map_err(|e| HandlerError::backend(FAILURE_CONTEXT, e))?;

    let download = signer
        .presign_get(bucket, &key, config.presign_expiry)
        .await
        .map_err(|e| HandlerError::backend(FAILURE_CONTEXT, e))?;

    info!(
        key = %key,
        content_type = ?request.content_type,
        expires_at = %upload.expires_at,
        "Issued upload link"
    );

    Ok(UploadLinks {
        upload_url: upload.url,
        download_url: download.url,
        object_url: keys::object_url(bucket, &config.region, &key),
        key,
    })
}
