//! App settings model.

use serde::{Deserialize, Serialize};

/// One stored setting. Values are free-form strings; clients decide the shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Setting {
    pub key: String,
    pub value: String,
    pub updated_at: String,
}

/// Request body for storing a setting value.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PutSettingRequest {
    pub value: String,
}
