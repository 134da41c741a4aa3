//! Download-link issuer: signs a time-limited GET for one object.

use lambda_runtime::{Error, LambdaEvent};
use serde_json::Value;
use tracing::{error, info, warn};

use super::{helpers, parsing};
use crate::core::{config::StorageConfig, keys, models::DownloadLink};
use crate::errors::HandlerError;
use crate::storage::ObjectSigner;

const TRACE_LINES: usize = 15;
const FAILURE_CONTEXT: &str = "failed to generate presigned get";

/// Lambda entry point. Request-level failures become proxy responses, so this
/// never returns `Err`.
pub async fn function_handler(
    config: &StorageConfig,
    signer: &dyn ObjectSigner,
    event: LambdaEvent<Value>,
) -> Result<Value, Error> {
    Ok(handle_download(config, signer, &event.payload).await)
}

#[tracing::instrument(level = "info", skip_all)]
pub async fn handle_download(
    config: &StorageConfig,
    signer: &dyn ObjectSigner,
    event: &Value,
) -> Value {
    match issue_download_link(config, signer, event).await {
        Ok(link) => {
            let body = serde_json::to_value(&link).unwrap_or_default();
            helpers::proxy_response(200, &body)
        }
        Err(e) => {
            if e.status_code() >= 500 {
                error!(error = %e, "Download link request failed");
            } else {
                warn!(status = e.status_code(), error = %e, "Download link request rejected");
            }
            helpers::error_response(&e, config.expose_error_details, TRACE_LINES)
        }
    }
}

async fn issue_download_link(
    config: &StorageConfig,
    signer: &dyn ObjectSigner,
    event: &Value,
) -> Result<DownloadLink, HandlerError> {
    let Some(bucket) = config.bucket_name.as_deref() else {
        return Err(HandlerError::Config("Missing BUCKET_NAME env var".to_string()));
    };

    let key = keys::resolve_download_key(
        parsing::query_param(event, "key"),
        parsing::query_param(event, "objectUrl"),
    )
    .ok_or_else(|| {
        HandlerError::BadRequest("Missing key (use ?key=uploads/...) or objectUrl".to_string())
    })?;

    let grant = signer
        .presign_get(bucket, &key, config.presign_expiry)
        .await
        .map_err(|e| HandlerError::backend(FAILURE_CONTEXT, e))?;

    info!(key = %key, expires_at = %grant.expires_at, "Issued download link");

    Ok(DownloadLink {
        download_url: grant.url,
        key,
    })
}
