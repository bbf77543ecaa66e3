//! Munro catalog and completion models.

use serde::{Deserialize, Serialize};

/// A Munro completion record. At most one per peak.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MunroCompletion {
    /// Date of the climb, ISO format (YYYY-MM-DD).
    pub climbed_on: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub updated_at: String,
}

/// A Scottish peak over 3,000 ft, with its optional completion record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Munro {
    pub id: String,
    pub name: String,
    pub height_m: f64,
    pub region: String,
    /// Difficulty rating, 1 (easy) to 5 (serious scramble).
    pub difficulty: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion: Option<MunroCompletion>,
}

/// Request body for adding a Munro to the catalog.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMunroRequest {
    pub name: String,
    pub height_m: f64,
    pub region: String,
    pub difficulty: i32,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

/// Request body for recording a completed climb.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordCompletionRequest {
    pub climbed_on: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Summary of bagging progress across the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MunroSummary {
    pub total: i64,
    pub climbed: i64,
}
