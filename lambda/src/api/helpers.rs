//! Proxy-response builders shared by every handler.

use serde_json::{Value, json};

use crate::errors::HandlerError;

/// Wraps `body` in an API Gateway proxy response with the JSON and CORS headers
/// every handler sends.
#[must_use]
pub fn proxy_response(status_code: u16, body: &Value) -> Value {
    json!({
        "statusCode": status_code,
        "headers": {
            "Content-Type": "application/json",
            "Access-Control-Allow-Origin": "*",
            "Access-Control-Allow-Credentials": "true"
        },
        "body": body.to_string()
    })
}

/// Renders a `HandlerError` as a proxy response.
///
/// Backend failures carry the cause text and the last `trace_lines` lines of
/// its report only when `expose_details` is set.
#[must_use]
pub fn error_response(error: &HandlerError, expose_details: bool, trace_lines: usize) -> Value {
    let mut body = json!({ "message": error.message() });

    if expose_details && let HandlerError::Backend { source, .. } = error {
        body["error"] = Value::String(source.to_string());
        body["traceback_last_lines"] = json!(error.diagnostic_lines(trace_lines));
    }

    proxy_response(error.status_code(), &body)
}
