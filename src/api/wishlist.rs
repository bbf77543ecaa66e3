//! Wishlist API endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{error, success, ApiResult};
use crate::errors::AppError;
use crate::models::{CreateWishlistItemRequest, UpdateWishlistItemRequest, WishlistItem};
use crate::AppState;

/// GET /api/wishlist - List all wishlist items.
pub async fn list_wishlist(State(state): State<AppState>) -> ApiResult<Vec<WishlistItem>> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    match state.repo.list_wishlist().await {
        Ok(items) => success(items, revision_id),
        Err(e) => error(e, revision_id),
    }
}

/// POST /api/wishlist - Create a new wishlist item.
pub async fn create_wishlist_item(
    State(state): State<AppState>,
    Json(request): Json<CreateWishlistItemRequest>,
) -> ApiResult<WishlistItem> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    if request.title.trim().is_empty() {
        return error(
            AppError::Validation("Title is required".to_string()),
            revision_id,
        );
    }

    match state.repo.create_wishlist_item(&request).await {
        Ok(item) => {
            let new_revision = state.repo.get_revision_id().await.unwrap_or(revision_id);
            success(item, new_revision)
        }
        Err(e) => error(e, revision_id),
    }
}

/// PUT /api/wishlist/:id - Update a wishlist item.
pub async fn update_wishlist_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateWishlistItemRequest>,
) -> ApiResult<WishlistItem> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    match state.repo.update_wishlist_item(&id, &request).await {
        Ok(item) => {
            let new_revision = state.repo.get_revision_id().await.unwrap_or(revision_id);
            success(item, new_revision)
        }
        Err(e) => error(e, revision_id),
    }
}

/// DELETE /api/wishlist/:id - Delete a wishlist item.
pub async fn delete_wishlist_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    match state.repo.delete_wishlist_item(&id).await {
        Ok(()) => {
            let new_revision = state.repo.get_revision_id().await.unwrap_or(revision_id);
            success((), new_revision)
        }
        Err(e) => error(e, revision_id),
    }
}

/// POST /api/wishlist/:id/vote - Add a vote. Open to visitors, like likes.
pub async fn vote_wishlist_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<WishlistItem> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    match state.repo.vote_wishlist_item(&id).await {
        Ok(item) => {
            let new_revision = state.repo.get_revision_id().await.unwrap_or(revision_id);
            success(item, new_revision)
        }
        Err(e) => error(e, revision_id),
    }
}
