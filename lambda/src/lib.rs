//! Cloudlink - Lambda handlers fronting S3 and a DynamoDB profile table.
//!
//! This crate builds three independent Lambda functions behind API Gateway:
//! 1. A download-link issuer that signs a time-limited GET for one object
//! 2. An upload-link issuer that signs a PUT under `uploads/` plus a matching GET
//! 3. A profile service that reads or overwrites one record per authenticated user
//!
//! # Architecture
//!
//! The system uses:
//! - AWS Lambda (`lambda_runtime`) with API Gateway proxy events
//! - `aws-sdk-s3` presigning, computed locally from the function's credentials
//! - `aws-sdk-dynamodb` with `serde_dynamo` for the profile table
//! - Tokio for async runtime
//!
//! Configuration is read once at cold start and handed to every invocation by
//! reference, together with the storage capabilities from [`storage`].
//!
//! # Example
//!
//! ```no_run
//! use cloudlink::api::download;
//! use cloudlink::core::config::StorageConfig;
//! use cloudlink::storage::S3Signer;
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     cloudlink::setup_logging();
//!
//!     let config = StorageConfig::from_env()?;
//!     let signer = S3Signer::from_region(&config.region).await;
//!
//!     let event = json!({ "queryStringParameters": { "key": "uploads/report.pdf" } });
//!     let response = download::handle_download(&config, &signer, &event).await;
//!     println!("{}", response["body"]);
//!
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod api;
pub mod core;
pub mod errors;
pub mod storage;

pub use errors::{HandlerError, StorageError};

/// Configure structured logging with JSON format for AWS Lambda environments.
///
/// Installs a tracing-subscriber registry with a JSON formatter suitable for
/// `CloudWatch` Logs. The level comes from `RUST_LOG` and defaults to `info`.
/// Call it once at the start of each Lambda binary.
///
/// # Example
///
/// ```
/// cloudlink::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::{EnvFilter, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}
