// Lambda bootstrap for the profile service

use cloudlink::api::profile;
use cloudlink::core::config::ProfileConfig;
use cloudlink::storage::DynamoProfileStore;
use lambda_runtime::{Error, LambdaEvent, run, service_fn};
use serde_json::Value;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Error> {
    cloudlink::setup_logging();

    let config = ProfileConfig::from_env().map_err(|e| {
        error!("Config error: {}", e);
        Error::from(e)
    })?;
    let store = DynamoProfileStore::from_region(&config.region).await;
    info!(
        region = %config.region,
        table = ?config.table_name,
        primary_key = %config.key_schema.primary_key,
        sort_key = %config.key_schema.sort_key,
        "Profile service ready"
    );

    run(service_fn(|event: LambdaEvent<Value>| {
        profile::function_handler(&config, &store, event)
    }))
    .await
}
