//! Place catalog models: castles, lochs and hidden gems share one shape.

use serde::{Deserialize, Serialize};

/// Catalog category for a place.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum PlaceKind {
    Castle,
    Loch,
    HiddenGem,
}

impl PlaceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlaceKind::Castle => "castle",
            PlaceKind::Loch => "loch",
            PlaceKind::HiddenGem => "hidden-gem",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "castle" | "castles" => Some(PlaceKind::Castle),
            "loch" | "lochs" => Some(PlaceKind::Loch),
            "hidden-gem" | "hidden-gems" | "gems" => Some(PlaceKind::HiddenGem),
            _ => None,
        }
    }
}

/// A visit record for a catalog place. At most one per place.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceVisit {
    /// Date of the visit, ISO format (YYYY-MM-DD).
    pub visited_on: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub recommended: bool,
    pub updated_at: String,
}

/// A catalog place (castle, loch or hidden gem) with its optional visit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    pub id: String,
    pub kind: PlaceKind,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visit: Option<PlaceVisit>,
}

/// Request body for adding a place to the catalog.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlaceRequest {
    pub name: String,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

/// Request body for recording (or re-recording) a visit.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordVisitRequest {
    pub visited_on: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub recommended: bool,
}
