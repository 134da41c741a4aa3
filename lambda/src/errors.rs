use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::{get_item::GetItemError, put_item::PutItemError};
use thiserror::Error;

/// Failures raised by the storage capabilities (object signing and the profile table).
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to build presigning config: {0}")]
    PresignConfig(String),

    #[error("Failed to presign S3 request: {0}")]
    Presign(String),

    #[error("Failed to read item from DynamoDB: {0}")]
    DynamoDbGet(#[from] SdkError<GetItemError>),

    #[error("Failed to write item to DynamoDB: {0}")]
    DynamoDbPut(#[from] SdkError<PutItemError>),

    #[error("Failed to convert DynamoDB item: {0}")]
    Serialization(#[from] serde_dynamo::Error),
}

/// Request-level failures. Every variant is turned into a proxy response;
/// none of them reach the Lambda runtime as an invocation error.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// A required environment value is missing.
    #[error("{0}")]
    Config(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("Method not allowed")]
    MethodNotAllowed,

    /// The storage or database call failed. `context` is the client-facing message.
    #[error("{context}: {source}")]
    Backend {
        context: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

impl HandlerError {
    pub fn backend(context: &'static str, source: impl Into<anyhow::Error>) -> Self {
        HandlerError::Backend {
            context,
            source: source.into(),
        }
    }

    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            HandlerError::BadRequest(_) => 400,
            HandlerError::Unauthorized(_) => 401,
            HandlerError::MethodNotAllowed => 405,
            HandlerError::Config(_) | HandlerError::Backend { .. } => 500,
        }
    }

    /// Human-readable message placed in the `message` field of the response body.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            HandlerError::Backend { context, .. } => (*context).to_string(),
            other => other.to_string(),
        }
    }

    /// The last `limit` lines of the cause's debug report: the cause chain, plus a
    /// backtrace when one was captured (`RUST_BACKTRACE=1`).
    ///
    /// Empty for every variant other than `Backend`.
    #[must_use]
    pub fn diagnostic_lines(&self, limit: usize) -> Vec<String> {
        let HandlerError::Backend { source, .. } = self else {
            return Vec::new();
        };
        let report = format!("{source:?}");
        let lines: Vec<&str> = report.lines().collect();
        let start = lines.len().saturating_sub(limit);
        lines[start..].iter().map(|l| (*l).to_string()).collect()
    }
}
