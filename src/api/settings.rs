//! App settings API endpoints.
//!
//! A small key-value store for client preferences (theme, map defaults and
//! the like). Reads are open; writes sit behind the edit gate.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{error, success, ApiResult};
use crate::errors::AppError;
use crate::models::{PutSettingRequest, Setting};
use crate::AppState;

/// GET /api/settings - List all stored settings.
pub async fn list_settings(State(state): State<AppState>) -> ApiResult<Vec<Setting>> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    match state.repo.list_settings().await {
        Ok(settings) => success(settings, revision_id),
        Err(e) => error(e, revision_id),
    }
}

/// PUT /api/settings/:key - Store (or replace) a setting value.
pub async fn put_setting(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(request): Json<PutSettingRequest>,
) -> ApiResult<Setting> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    let key = key.trim();
    if key.is_empty() {
        return error(
            AppError::Validation("Setting key is required".to_string()),
            revision_id,
        );
    }

    match state.repo.upsert_setting(key, &request.value).await {
        Ok(setting) => {
            let new_revision = state.repo.get_revision_id().await.unwrap_or(revision_id);
            success(setting, new_revision)
        }
        Err(e) => error(e, revision_id),
    }
}

/// DELETE /api/settings/:key - Remove a stored setting.
pub async fn delete_setting(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> ApiResult<()> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    match state.repo.delete_setting(&key).await {
        Ok(()) => {
            let new_revision = state.repo.get_revision_id().await.unwrap_or(revision_id);
            success((), new_revision)
        }
        Err(e) => error(e, revision_id),
    }
}
