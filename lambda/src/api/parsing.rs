//! Field access on API Gateway proxy events (REST v1 and HTTP API v2).

use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde_json::{Map, Value};

use crate::core::keys::is_truthy;

pub fn v_path<'a>(root: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut cur = root;
    for key in path {
        cur = cur.get(*key)?;
    }
    Some(cur)
}

pub fn v_str<'a>(root: &'a Value, path: &[&str]) -> Option<&'a str> {
    v_path(root, path).and_then(|v| v.as_str())
}

/// A query-string parameter. Empty values count as absent.
pub fn query_param<'a>(event: &'a Value, name: &str) -> Option<&'a str> {
    v_str(event, &["queryStringParameters", name]).filter(|v| !v.is_empty())
}

/// A string field of a JSON object. Empty values count as absent.
pub fn field_str<'a>(object: &'a Value, name: &str) -> Option<&'a str> {
    object
        .get(name)
        .and_then(Value::as_str)
        .filter(|v| !v.is_empty())
}

/// Parses the request body without ever failing.
///
/// A missing body, malformed JSON, or an undecodable base64 payload all yield
/// an empty object. Well-formed JSON that is not an object is returned as is so
/// callers can reject it.
pub fn json_body(event: &Value) -> Value {
    let empty = || Value::Object(Map::new());

    match event.get("body") {
        None | Some(Value::Null) => empty(),
        Some(Value::String(raw)) => {
            if raw.is_empty() {
                return empty();
            }
            let is_base64 = event
                .get("isBase64Encoded")
                .and_then(Value::as_bool)
                .unwrap_or(false);
            let parsed: Option<Value> = if is_base64 {
                STANDARD
                    .decode(raw.as_bytes())
                    .ok()
                    .and_then(|bytes| serde_json::from_slice(&bytes).ok())
            } else {
                serde_json::from_str(raw).ok()
            };
            parsed.unwrap_or_else(empty)
        }
        Some(object @ Value::Object(_)) => object.clone(),
        Some(_) => empty(),
    }
}

/// Upper-cased HTTP method from `httpMethod` (v1) or `requestContext.http.method` (v2).
pub fn http_method(event: &Value) -> Option<String> {
    v_str(event, &["httpMethod"])
        .filter(|m| !m.is_empty())
        .or_else(|| v_str(event, &["requestContext", "http", "method"]))
        .filter(|m| !m.is_empty())
        .map(str::to_ascii_uppercase)
}

/// The caller's subject identifier asserted by the authorizer.
///
/// Looks at Cognito user-pool claims first, then HTTP API JWT claims; within a
/// claim set a truthy `sub` is preferred over `username`. Numeric claims are
/// rendered as their decimal text.
pub fn subject_claim(event: &Value) -> Option<String> {
    const CLAIM_SETS: [&[&str]; 2] = [
        &["requestContext", "authorizer", "claims"],
        &["requestContext", "authorizer", "jwt", "claims"],
    ];

    CLAIM_SETS.iter().find_map(|path| {
        let claims = v_path(event, path)?;
        claim_text(claims, "sub").or_else(|| claim_text(claims, "username"))
    })
}

fn claim_text(claims: &Value, name: &str) -> Option<String> {
    match claims.get(name)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        n @ Value::Number(_) if is_truthy(n) => Some(n.to_string()),
        _ => None,
    }
}
