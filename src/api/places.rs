//! Place catalog API endpoints: castles, lochs and hidden gems.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{error, success, ApiResult};
use crate::errors::AppError;
use crate::models::{CreatePlaceRequest, Place, PlaceKind, RecordVisitRequest};
use crate::AppState;

fn parse_kind(kind: &str) -> Result<PlaceKind, AppError> {
    PlaceKind::from_str(kind)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown place kind: {}", kind)))
}

/// GET /api/places/:kind - List the catalog for one kind with visit records.
pub async fn list_places(
    State(state): State<AppState>,
    Path(kind): Path<String>,
) -> ApiResult<Vec<Place>> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    let kind = match parse_kind(&kind) {
        Ok(k) => k,
        Err(e) => return error(e, revision_id),
    };

    match state.repo.list_places(kind).await {
        Ok(places) => success(places, revision_id),
        Err(e) => error(e, revision_id),
    }
}

/// GET /api/places/:kind/:id - Get a single place.
pub async fn get_place(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, String)>,
) -> ApiResult<Place> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    let kind = match parse_kind(&kind) {
        Ok(k) => k,
        Err(e) => return error(e, revision_id),
    };

    match state.repo.get_place(kind, &id).await {
        Ok(Some(place)) => success(place, revision_id),
        Ok(None) => error(
            AppError::NotFound(format!("{} {} not found", kind.as_str(), id)),
            revision_id,
        ),
        Err(e) => error(e, revision_id),
    }
}

/// POST /api/places/:kind - Add a place to the catalog.
pub async fn create_place(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Json(request): Json<CreatePlaceRequest>,
) -> ApiResult<Place> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    let kind = match parse_kind(&kind) {
        Ok(k) => k,
        Err(e) => return error(e, revision_id),
    };

    if request.name.trim().is_empty() {
        return error(
            AppError::Validation("Name is required".to_string()),
            revision_id,
        );
    }

    match state.repo.create_place(kind, &request).await {
        Ok(place) => {
            let new_revision = state.repo.get_revision_id().await.unwrap_or(revision_id);
            success(place, new_revision)
        }
        Err(e) => error(e, revision_id),
    }
}

/// PUT /api/places/:kind/:id/visit - Record (or replace) a visit.
pub async fn record_visit(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, String)>,
    Json(request): Json<RecordVisitRequest>,
) -> ApiResult<Place> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    let kind = match parse_kind(&kind) {
        Ok(k) => k,
        Err(e) => return error(e, revision_id),
    };

    if request.visited_on.trim().is_empty() {
        return error(
            AppError::Validation("Visit date is required".to_string()),
            revision_id,
        );
    }

    match state.repo.upsert_visit(kind, &id, &request).await {
        Ok(place) => {
            let new_revision = state.repo.get_revision_id().await.unwrap_or(revision_id);
            success(place, new_revision)
        }
        Err(e) => error(e, revision_id),
    }
}

/// DELETE /api/places/:kind/:id/visit - Remove a visit record.
pub async fn delete_visit(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, String)>,
) -> ApiResult<Place> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    let kind = match parse_kind(&kind) {
        Ok(k) => k,
        Err(e) => return error(e, revision_id),
    };

    match state.repo.delete_visit(kind, &id).await {
        Ok(place) => {
            let new_revision = state.repo.get_revision_id().await.unwrap_or(revision_id);
            success(place, new_revision)
        }
        Err(e) => error(e, revision_id),
    }
}
