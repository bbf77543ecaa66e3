//! Milestone API endpoints.

use axum::extract::State;

use super::{error, success, ApiResult};
use crate::milestones;
use crate::models::MilestoneProgress;
use crate::AppState;

/// GET /api/milestones - Progress for every achievement in the catalog.
///
/// Computed live from the journal; the persisted rows written after journal
/// mutations are a cache for consumers that want progress without the entries.
pub async fn list_milestones(State(state): State<AppState>) -> ApiResult<Vec<MilestoneProgress>> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    match state.repo.list_entries().await {
        Ok(entries) => success(milestones::compute_progress(&entries), revision_id),
        Err(e) => error(e, revision_id),
    }
}
