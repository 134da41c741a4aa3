// Lambda bootstrap for the upload-link issuer

use cloudlink::api::upload;
use cloudlink::core::config::StorageConfig;
use cloudlink::storage::S3Signer;
use lambda_runtime::{Error, LambdaEvent, run, service_fn};
use serde_json::Value;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Error> {
    cloudlink::setup_logging();

    let config = StorageConfig::from_env().map_err(|e| {
        error!("Config error: {}", e);
        Error::from(e)
    })?;
    let signer = S3Signer::from_region(&config.region).await;
    info!(region = %config.region, bucket = ?config.bucket_name, "Upload link issuer ready");

    run(service_fn(|event: LambdaEvent<Value>| {
        upload::function_handler(&config, &signer, event)
    }))
    .await
}
