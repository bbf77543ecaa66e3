//! Revision metadata used by the client polling loop.

use serde::{Deserialize, Serialize};

/// Current revision info. Clients poll this and refetch wholesale on change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevisionInfo {
    pub revision_id: i64,
    pub generated_at: String,
}
