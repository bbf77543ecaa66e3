//! Munro catalog API endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{error, success, ApiResult};
use crate::errors::AppError;
use crate::models::{CreateMunroRequest, Munro, MunroSummary, RecordCompletionRequest};
use crate::AppState;

/// GET /api/munros - List the catalog with completion records.
pub async fn list_munros(State(state): State<AppState>) -> ApiResult<Vec<Munro>> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    match state.repo.list_munros().await {
        Ok(munros) => success(munros, revision_id),
        Err(e) => error(e, revision_id),
    }
}

/// GET /api/munros/summary - Bagging progress across the catalog.
pub async fn munro_summary(State(state): State<AppState>) -> ApiResult<MunroSummary> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    match state.repo.munro_summary().await {
        Ok(summary) => success(summary, revision_id),
        Err(e) => error(e, revision_id),
    }
}

/// GET /api/munros/:id - Get a single Munro.
pub async fn get_munro(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Munro> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    match state.repo.get_munro(&id).await {
        Ok(Some(munro)) => success(munro, revision_id),
        Ok(None) => error(
            AppError::NotFound(format!("Munro {} not found", id)),
            revision_id,
        ),
        Err(e) => error(e, revision_id),
    }
}

/// POST /api/munros - Add a Munro to the catalog.
pub async fn create_munro(
    State(state): State<AppState>,
    Json(request): Json<CreateMunroRequest>,
) -> ApiResult<Munro> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    if request.name.trim().is_empty() {
        return error(
            AppError::Validation("Name is required".to_string()),
            revision_id,
        );
    }
    if !(1..=5).contains(&request.difficulty) {
        return error(
            AppError::Validation("Difficulty must be between 1 and 5".to_string()),
            revision_id,
        );
    }

    match state.repo.create_munro(&request).await {
        Ok(munro) => {
            let new_revision = state.repo.get_revision_id().await.unwrap_or(revision_id);
            success(munro, new_revision)
        }
        Err(e) => error(e, revision_id),
    }
}

/// PUT /api/munros/:id/completion - Record (or replace) a completed climb.
pub async fn record_completion(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<RecordCompletionRequest>,
) -> ApiResult<Munro> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    if request.climbed_on.trim().is_empty() {
        return error(
            AppError::Validation("Climb date is required".to_string()),
            revision_id,
        );
    }

    match state.repo.upsert_completion(&id, &request).await {
        Ok(munro) => {
            let new_revision = state.repo.get_revision_id().await.unwrap_or(revision_id);
            success(munro, new_revision)
        }
        Err(e) => error(e, revision_id),
    }
}

/// DELETE /api/munros/:id/completion - Remove a completion record.
pub async fn delete_completion(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Munro> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    match state.repo.delete_completion(&id).await {
        Ok(munro) => {
            let new_revision = state.repo.get_revision_id().await.unwrap_or(revision_id);
            success(munro, new_revision)
        }
        Err(e) => error(e, revision_id),
    }
}
