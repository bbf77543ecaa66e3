//! Map pin API endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{error, success, ApiResult};
use crate::errors::AppError;
use crate::models::{CreateMapPinRequest, MapPin};
use crate::AppState;

/// GET /api/pins - List all map pins.
pub async fn list_pins(State(state): State<AppState>) -> ApiResult<Vec<MapPin>> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    match state.repo.list_pins().await {
        Ok(pins) => success(pins, revision_id),
        Err(e) => error(e, revision_id),
    }
}

/// POST /api/pins - Drop a new pin on the map.
pub async fn create_pin(
    State(state): State<AppState>,
    Json(request): Json<CreateMapPinRequest>,
) -> ApiResult<MapPin> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    if request.label.trim().is_empty() {
        return error(
            AppError::Validation("Label is required".to_string()),
            revision_id,
        );
    }
    if !(-90.0..=90.0).contains(&request.latitude) {
        return error(
            AppError::Validation("Latitude must be between -90 and 90".to_string()),
            revision_id,
        );
    }
    if !(-180.0..=180.0).contains(&request.longitude) {
        return error(
            AppError::Validation("Longitude must be between -180 and 180".to_string()),
            revision_id,
        );
    }

    match state.repo.create_pin(&request).await {
        Ok(pin) => {
            let new_revision = state.repo.get_revision_id().await.unwrap_or(revision_id);
            success(pin, new_revision)
        }
        Err(e) => error(e, revision_id),
    }
}

/// DELETE /api/pins/:id - Remove a map pin.
pub async fn delete_pin(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<()> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    match state.repo.delete_pin(&id).await {
        Ok(()) => {
            let new_revision = state.repo.get_revision_id().await.unwrap_or(revision_id);
            success((), new_revision)
        }
        Err(e) => error(e, revision_id),
    }
}
