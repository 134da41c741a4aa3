//! Profile service: reads or overwrites the single profile record owned by the
//! authenticated caller.

use std::str::FromStr;

use lambda_runtime::{Error, LambdaEvent};
use serde_json::{Value, json};
use tracing::{error, info, warn};

use super::{helpers, parsing};
use crate::core::{config::ProfileConfig, keys::is_truthy};
use crate::errors::HandlerError;
use crate::storage::ProfileStore;

const TRACE_LINES: usize = 10;
const FAILURE_CONTEXT: &str = "Internal server error";

/// Methods the profile service answers. Anything else is a 405.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileMethod {
    Get,
    Post,
}

impl FromStr for ProfileMethod {
    type Err = HandlerError;

    fn from_str(method: &str) -> Result<Self, Self::Err> {
        match method.to_ascii_uppercase().as_str() {
            "GET" => Ok(ProfileMethod::Get),
            "POST" => Ok(ProfileMethod::Post),
            _ => Err(HandlerError::MethodNotAllowed),
        }
    }
}

pub async fn function_handler(
    config: &ProfileConfig,
    store: &dyn ProfileStore,
    event: LambdaEvent<Value>,
) -> Result<Value, Error> {
    Ok(handle_profile(config, store, &event.payload).await)
}

#[tracing::instrument(level = "info", skip_all)]
pub async fn handle_profile(
    config: &ProfileConfig,
    store: &dyn ProfileStore,
    event: &Value,
) -> Value {
    let method = parsing::http_method(event);
    let result = match method.as_deref().map(ProfileMethod::from_str) {
        Some(Ok(ProfileMethod::Get)) => get_profile(config, store, event).await,
        Some(Ok(ProfileMethod::Post)) => put_profile(config, store, event).await,
        Some(Err(e)) => Err(e),
        None => Err(HandlerError::MethodNotAllowed),
    };

    match result {
        Ok(body) => helpers::proxy_response(200, &body),
        Err(e) => {
            if e.status_code() >= 500 {
                error!(error = ?e, "Profile request failed");
            } else {
                warn!(status = e.status_code(), error = %e, "Profile request rejected");
            }
            helpers::error_response(&e, config.expose_error_details, TRACE_LINES)
        }
    }
}

fn table_name(config: &ProfileConfig) -> Result<&str, HandlerError> {
    config.table_name.as_deref().ok_or_else(|| {
        HandlerError::Config("Server misconfigured: TABLE_NAME env var missing".to_string())
    })
}

/// Returns the caller's record, or `{}` when none has been written yet.
async fn get_profile(
    config: &ProfileConfig,
    store: &dyn ProfileStore,
    event: &Value,
) -> Result<Value, HandlerError> {
    let subject = parsing::subject_claim(event).ok_or_else(|| {
        HandlerError::Unauthorized("Unauthorized - no Cognito sub found".to_string())
    })?;
    let table = table_name(config)?;

    let key = config.key_schema.lookup_key(&subject);
    let item = store
        .get_item(table, key)
        .await
        .map_err(|e| HandlerError::backend(FAILURE_CONTEXT, e))?;

    info!(found = item.is_some(), "Fetched profile");
    Ok(Value::Object(item.unwrap_or_default()))
}

/// Overwrites the caller's record with the request body. No merge with the
/// previous record and no conditional write: the last writer wins.
async fn put_profile(
    config: &ProfileConfig,
    store: &dyn ProfileStore,
    event: &Value,
) -> Result<Value, HandlerError> {
    let subject = parsing::subject_claim(event);
    let schema = &config.key_schema;

    let Value::Object(mut item) = parsing::json_body(event) else {
        return Err(HandlerError::BadRequest(
            "Bad Request: body must be a JSON object".to_string(),
        ));
    };

    if subject.is_none() && !item.get(&schema.primary_key).is_some_and(is_truthy) {
        return Err(HandlerError::Unauthorized(
            "Unauthorized - no Cognito sub and no primary key in body".to_string(),
        ));
    }

    if !schema.stamp_keys(&mut item, subject.as_deref()) {
        return Err(HandlerError::BadRequest(format!(
            "Missing primary key {} and no Cognito sub provided",
            schema.primary_key
        )));
    }

    let table = table_name(config)?;
    store
        .put_item(table, item)
        .await
        .map_err(|e| HandlerError::backend(FAILURE_CONTEXT, e))?;

    info!("Stored profile");
    Ok(json!({ "ok": true }))
}
