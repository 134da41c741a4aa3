use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One profile record: key attributes plus whatever fields the caller supplied.
pub type ProfileItem = Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadLink {
    pub download_url: String,
    pub key: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadLinks {
    pub upload_url: String,
    pub download_url: String,
    /// Permanent, unsigned address of the object.
    pub object_url: String,
    pub key: String,
}
