//! Family member API endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{error, success, ApiResult};
use crate::errors::AppError;
use crate::models::{CreateFamilyMemberRequest, FamilyMember, UpdateFamilyMemberRequest};
use crate::AppState;

/// GET /api/family - List all family members.
pub async fn list_family(State(state): State<AppState>) -> ApiResult<Vec<FamilyMember>> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    match state.repo.list_family().await {
        Ok(members) => success(members, revision_id),
        Err(e) => error(e, revision_id),
    }
}

/// GET /api/family/:id - Get a single family member.
pub async fn get_family_member(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<FamilyMember> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    match state.repo.get_family_member(&id).await {
        Ok(Some(member)) => success(member, revision_id),
        Ok(None) => error(
            AppError::NotFound(format!("Family member {} not found", id)),
            revision_id,
        ),
        Err(e) => error(e, revision_id),
    }
}

/// POST /api/family - Create a new family member.
pub async fn create_family_member(
    State(state): State<AppState>,
    Json(request): Json<CreateFamilyMemberRequest>,
) -> ApiResult<FamilyMember> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    // Validate required fields
    if request.name.trim().is_empty() {
        return error(
            AppError::Validation("Name is required".to_string()),
            revision_id,
        );
    }

    match state.repo.create_family_member(&request).await {
        Ok(member) => {
            let new_revision = state.repo.get_revision_id().await.unwrap_or(revision_id);
            success(member, new_revision)
        }
        Err(e) => error(e, revision_id),
    }
}

/// PUT /api/family/:id - Update a family member.
pub async fn update_family_member(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateFamilyMemberRequest>,
) -> ApiResult<FamilyMember> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    match state.repo.update_family_member(&id, &request).await {
        Ok(member) => {
            let new_revision = state.repo.get_revision_id().await.unwrap_or(revision_id);
            success(member, new_revision)
        }
        Err(e) => error(e, revision_id),
    }
}

/// DELETE /api/family/:id - Delete a family member.
pub async fn delete_family_member(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    match state.repo.delete_family_member(&id).await {
        Ok(()) => {
            let new_revision = state.repo.get_revision_id().await.unwrap_or(revision_id);
            success((), new_revision)
        }
        Err(e) => error(e, revision_id),
    }
}
