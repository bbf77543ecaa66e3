//! Journal entry API endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{error, success, ApiResult};
use crate::errors::AppError;
use crate::milestones;
use crate::models::{
    CreateJournalEntryRequest, JournalEntry, LikeStatus, ToggleLikeRequest,
    UpdateJournalEntryRequest,
};
use crate::AppState;

/// Recompute and persist milestone progress from the full entry list.
/// Failures are logged, never surfaced; the journal write already succeeded.
pub(crate) async fn refresh_milestones(state: &AppState) {
    match state.repo.list_entries().await {
        Ok(entries) => {
            let progress = milestones::compute_progress(&entries);
            if let Err(e) = state.repo.upsert_milestone_progress(&progress).await {
                tracing::warn!("Failed to persist milestone progress: {}", e);
            }
        }
        Err(e) => tracing::warn!("Failed to load entries for milestone refresh: {}", e),
    }
}

/// GET /api/journal - List all journal entries.
pub async fn list_entries(State(state): State<AppState>) -> ApiResult<Vec<JournalEntry>> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    match state.repo.list_entries().await {
        Ok(entries) => success(entries, revision_id),
        Err(e) => error(e, revision_id),
    }
}

/// GET /api/journal/:id - Get a single journal entry.
pub async fn get_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<JournalEntry> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    match state.repo.get_entry(&id).await {
        Ok(Some(entry)) => success(entry, revision_id),
        Ok(None) => error(
            AppError::NotFound(format!("Journal entry {} not found", id)),
            revision_id,
        ),
        Err(e) => error(e, revision_id),
    }
}

/// POST /api/journal - Create a new journal entry.
pub async fn create_entry(
    State(state): State<AppState>,
    Json(request): Json<CreateJournalEntryRequest>,
) -> ApiResult<JournalEntry> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    // Validate required fields
    if request.title.trim().is_empty() {
        return error(
            AppError::Validation("Title is required".to_string()),
            revision_id,
        );
    }
    if request.entry_date.trim().is_empty() {
        return error(
            AppError::Validation("Entry date is required".to_string()),
            revision_id,
        );
    }

    match state.repo.create_entry(&request).await {
        Ok(entry) => {
            refresh_milestones(&state).await;

            let new_revision = state.repo.get_revision_id().await.unwrap_or(revision_id);
            success(entry, new_revision)
        }
        Err(e) => error(e, revision_id),
    }
}

/// PUT /api/journal/:id - Update a journal entry.
pub async fn update_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateJournalEntryRequest>,
) -> ApiResult<JournalEntry> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    match state.repo.update_entry(&id, &request).await {
        Ok(entry) => {
            refresh_milestones(&state).await;

            let new_revision = state.repo.get_revision_id().await.unwrap_or(revision_id);
            success(entry, new_revision)
        }
        Err(e) => error(e, revision_id),
    }
}

/// DELETE /api/journal/:id - Delete a journal entry.
pub async fn delete_entry(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<()> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    match state.repo.delete_entry(&id).await {
        Ok(()) => {
            refresh_milestones(&state).await;

            let new_revision = state.repo.get_revision_id().await.unwrap_or(revision_id);
            success((), new_revision)
        }
        Err(e) => error(e, revision_id),
    }
}

/// POST /api/journal/:id/likes - Toggle a visitor's like on an entry.
pub async fn toggle_like(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<ToggleLikeRequest>,
) -> ApiResult<LikeStatus> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    match state.repo.toggle_like(&id, &request.visitor_name).await {
        Ok(status) => {
            let new_revision = state.repo.get_revision_id().await.unwrap_or(revision_id);
            success(status, new_revision)
        }
        Err(e) => error(e, revision_id),
    }
}
