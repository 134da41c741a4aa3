use std::env;
use std::time::Duration;

use super::keys::ProfileKeySchema;

pub const DEFAULT_PRESIGN_EXPIRY_SECS: u64 = 300;
pub const DEFAULT_REGION: &str = "us-east-1";

/// Configuration shared by the download-link and upload-link issuers.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub bucket_name: Option<String>,
    pub presign_expiry: Duration,
    pub region: String,
    pub expose_error_details: bool,
}

/// Configuration for the profile service.
#[derive(Debug, Clone)]
pub struct ProfileConfig {
    pub table_name: Option<String>,
    pub key_schema: ProfileKeySchema,
    pub region: String,
    pub expose_error_details: bool,
}

impl StorageConfig {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the config from an arbitrary variable source.
    ///
    /// A missing bucket is not an error here: each invocation reports it as a 500
    /// so the function still answers instead of failing to start.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let presign_expiry = match non_empty(&lookup, "PRESIGN_EXPIRY") {
            Some(raw) => raw
                .parse::<u64>()
                .map_err(|e| format!("PRESIGN_EXPIRY: {}", e))?,
            None => DEFAULT_PRESIGN_EXPIRY_SECS,
        };

        Ok(Self {
            bucket_name: non_empty(&lookup, "BUCKET_NAME"),
            presign_expiry: Duration::from_secs(presign_expiry),
            region: resolve_region(&lookup),
            expose_error_details: flag(&lookup, "EXPOSE_ERROR_DETAILS"),
        })
    }
}

impl ProfileConfig {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let primary_key = non_empty(&lookup, "PRIMARY_KEY").unwrap_or_else(|| "PK".to_string());
        let sort_key = non_empty(&lookup, "SORT_KEY").unwrap_or_else(|| "SK".to_string());

        Ok(Self {
            table_name: non_empty(&lookup, "TABLE_NAME"),
            key_schema: ProfileKeySchema::new(primary_key, sort_key),
            region: resolve_region(&lookup),
            expose_error_details: flag(&lookup, "EXPOSE_ERROR_DETAILS"),
        })
    }
}

fn non_empty<F>(lookup: &F, name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn resolve_region<F>(lookup: &F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    non_empty(lookup, "AWS_REGION")
        .or_else(|| non_empty(lookup, "AWS_DEFAULT_REGION"))
        .unwrap_or_else(|| DEFAULT_REGION.to_string())
}

fn flag<F>(lookup: &F, name: &str) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    non_empty(lookup, name).is_some_and(|v| {
        matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes")
    })
}
