//! Photo API endpoints.
//!
//! Uploads are multipart; bytes land on disk, metadata in the database, and
//! the journal stores the returned stable URL.

use axum::{
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use super::{error, success, ApiResult};
use crate::errors::AppError;
use crate::models::{Photo, PhotoStatus, UploadResult};
use crate::photos::{placeholder_svg, tier_for_size, validate_upload};
use crate::AppState;

/// POST /api/photos/upload - Store an uploaded image and return its URL.
pub async fn upload_photo(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<UploadResult> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    // Find the image part; the frontend sends it as "photo".
    let mut part: Option<(Option<String>, String, Vec<u8>)> = None;
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                return error(
                    AppError::BadRequest(format!("Malformed multipart body: {}", e)),
                    revision_id,
                )
            }
        };

        let name = field.name().unwrap_or_default();
        if name != "photo" && name != "file" {
            continue;
        }

        let original_name = field.file_name().map(|s| s.to_string());
        let content_type = field.content_type().unwrap_or_default().to_string();
        let bytes = match field.bytes().await {
            Ok(b) => b.to_vec(),
            Err(e) => {
                return error(
                    AppError::BadRequest(format!("Failed to read upload: {}", e)),
                    revision_id,
                )
            }
        };
        part = Some((original_name, content_type, bytes));
        break;
    }

    let Some((original_name, content_type, bytes)) = part else {
        return error(
            AppError::Validation("No photo field in upload".to_string()),
            revision_id,
        );
    };

    if let Err(e) = validate_upload(&content_type, bytes.len() as u64) {
        return error(e, revision_id);
    }

    let tier = tier_for_size(bytes.len() as u64);
    let id = uuid::Uuid::new_v4().to_string();

    let file_name = match state.photos.save(&id, &content_type, &bytes).await {
        Ok(name) => name,
        Err(e) => return error(e, revision_id),
    };

    let url = state.config.photo_url(&id);
    let insert = state
        .repo
        .insert_photo(
            &id,
            &file_name,
            original_name.as_deref(),
            &content_type,
            bytes.len() as i64,
            tier.name,
            &url,
        )
        .await;

    match insert {
        Ok(photo) => {
            let new_revision = state.repo.get_revision_id().await.unwrap_or(revision_id);
            success(
                UploadResult {
                    url: photo.url,
                    id: photo.id,
                    tier: photo.tier,
                },
                new_revision,
            )
        }
        Err(e) => {
            // Roll back the file so disk and metadata stay in step.
            if let Err(cleanup) = state.photos.remove(&file_name).await {
                tracing::warn!("Failed to clean up orphaned photo file: {}", cleanup);
            }
            error(e, revision_id)
        }
    }
}

/// GET /api/photos - List stored photo metadata.
pub async fn list_photos(State(state): State<AppState>) -> ApiResult<Vec<Photo>> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    let config = state.config.clone();
    match state.repo.list_photos(|id| config.photo_url(id)).await {
        Ok(photos) => success(photos, revision_id),
        Err(e) => error(e, revision_id),
    }
}

/// GET /api/photos/:id - Serve the photo bytes.
pub async fn serve_photo(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let result = async {
        let (file_name, content_type) = state
            .repo
            .get_photo_file(&id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Photo {} not found", id)))?;
        let bytes = state.photos.load(&file_name).await?;
        Ok::<_, AppError>((content_type, bytes))
    }
    .await;

    match result {
        Ok((content_type, bytes)) => {
            ([(header::CONTENT_TYPE, content_type)], bytes).into_response()
        }
        Err(e) => (e.status_code(), e.message()).into_response(),
    }
}

/// GET /api/photos/placeholder/:id - Deterministic SVG placeholder.
pub async fn photo_placeholder(Path(id): Path<String>) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "image/svg+xml")],
        placeholder_svg(&id),
    )
        .into_response()
}

/// DELETE /api/photos/:imageId - Delete a photo and its file.
pub async fn delete_photo(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<()> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    match state.repo.delete_photo(&id).await {
        Ok(file_name) => {
            if let Err(e) = state.photos.remove(&file_name).await {
                tracing::warn!("Failed to remove photo file {}: {}", file_name, e);
            }

            let new_revision = state.repo.get_revision_id().await.unwrap_or(revision_id);
            success((), new_revision)
        }
        Err(e) => error(e, revision_id),
    }
}

/// GET /api/photos/status - Storage health and usage.
pub async fn photo_status(State(state): State<AppState>) -> ApiResult<PhotoStatus> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    let configured = state.photos.is_ready().await;
    match state.repo.photo_stats().await {
        Ok((photo_count, total_bytes)) => success(
            PhotoStatus {
                configured,
                photo_count,
                total_bytes,
            },
            revision_id,
        ),
        Err(e) => error(e, revision_id),
    }
}
