//! Edit-session API endpoints.

use axum::{
    extract::{Request, State},
    Json,
};
use serde::{Deserialize, Serialize};

use super::{error, success, ApiResult};
use crate::auth::{constant_time_compare, extract_token};
use crate::errors::AppError;
use crate::AppState;

/// Request body for unlocking an edit session.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnlockRequest {
    pub password: String,
}

/// A freshly minted edit session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    pub token: String,
    pub expires_at: String,
}

/// Validity report for an existing token.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionCheck {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
}

/// POST /api/auth/unlock - Exchange the shared password for a session token.
pub async fn unlock(
    State(state): State<AppState>,
    Json(request): Json<UnlockRequest>,
) -> ApiResult<SessionInfo> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    let Some(expected) = state.config.edit_password.as_deref() else {
        return error(
            AppError::BadRequest("Edit password is not configured; editing is open".to_string()),
            revision_id,
        );
    };

    if !constant_time_compare(&request.password, expected) {
        return error(
            AppError::Unauthorized("Wrong password".to_string()),
            revision_id,
        );
    }

    let (token, expires_at) = state.sessions.create(state.config.session_ttl_hours).await;

    success(
        SessionInfo {
            token,
            expires_at: expires_at.to_rfc3339(),
        },
        revision_id,
    )
}

/// GET /api/auth/session - Report whether the presented token is still live.
pub async fn check_session(State(state): State<AppState>, request: Request) -> ApiResult<SessionCheck> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    // With no password configured every token is as good as any other.
    if state.config.edit_password.is_none() {
        return success(
            SessionCheck {
                valid: true,
                expires_at: None,
            },
            revision_id,
        );
    }

    let check = match extract_token(&request) {
        Some(token) => match state.sessions.expiry(&token).await {
            Some(expiry) => SessionCheck {
                valid: true,
                expires_at: Some(expiry.to_rfc3339()),
            },
            None => SessionCheck {
                valid: false,
                expires_at: None,
            },
        },
        None => SessionCheck {
            valid: false,
            expires_at: None,
        },
    };

    success(check, revision_id)
}
