//! Journal entry model matching the frontend JournalEntry interface.

use serde::{Deserialize, Serialize};

/// A single journal entry describing one adventure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    pub id: String,
    pub title: String,
    pub content: String,
    /// Date of the adventure, ISO format (YYYY-MM-DD).
    pub entry_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mood: Option<String>,
    /// Miles traveled for this entry; 0 when not recorded.
    pub distance_miles: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket_info: Option<String>,
    pub dog_friendly: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub photo_urls: Vec<String>,
    pub like_count: i64,
    pub created_at: String,
    pub updated_at: String,
    /// Internal version for optimistic concurrency control
    #[serde(default)]
    pub version: i64,
}

/// Request body for creating a new journal entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateJournalEntryRequest {
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub entry_date: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub weather: Option<String>,
    #[serde(default)]
    pub mood: Option<String>,
    #[serde(default)]
    pub distance_miles: Option<f64>,
    #[serde(default)]
    pub ticket_info: Option<String>,
    #[serde(default)]
    pub dog_friendly: bool,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub photo_urls: Option<Vec<String>>,
}

/// Request body for updating an existing journal entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateJournalEntryRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub entry_date: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub weather: Option<String>,
    #[serde(default)]
    pub mood: Option<String>,
    #[serde(default)]
    pub distance_miles: Option<f64>,
    #[serde(default)]
    pub ticket_info: Option<String>,
    #[serde(default)]
    pub dog_friendly: Option<bool>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub photo_urls: Option<Vec<String>>,
    /// Expected version for optimistic concurrency control
    #[serde(default)]
    pub expected_version: Option<i64>,
}

/// Request body for toggling a like on a journal entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleLikeRequest {
    pub visitor_name: String,
}

/// Result of a like toggle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeStatus {
    pub like_count: i64,
    pub liked: bool,
}
