//! Stored photo metadata models.

use serde::{Deserialize, Serialize};

/// Metadata for a stored photo; the bytes live on disk under the photo directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub id: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_name: Option<String>,
    pub content_type: String,
    pub size_bytes: i64,
    /// Compression tier the client was told to apply before upload.
    pub tier: String,
    pub created_at: String,
}

/// Response body for a successful upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResult {
    pub url: String,
    pub id: String,
    pub tier: String,
}

/// Storage health and usage, served by the photo status endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoStatus {
    pub configured: bool,
    pub photo_count: i64,
    pub total_bytes: i64,
}
