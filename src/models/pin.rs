//! Map pin models.

use serde::{Deserialize, Serialize};

/// A pin on the family adventure map. Pins can stand alone or point back at
/// the journal entry they came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapPin {
    pub id: String,
    pub label: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_id: Option<String>,
    pub created_at: String,
}

/// Request body for dropping a new pin.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMapPinRequest {
    pub label: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub entry_id: Option<String>,
}
