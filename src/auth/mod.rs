//! Edit-session authentication module.
//!
//! A fixed shared password unlocks a time-limited edit session. The password
//! check uses constant-time comparison to mitigate timing attacks. This is a
//! convenience gate for a family app, not a security boundary.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::Request,
    http::{self, header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Duration, Utc};
use subtle::ConstantTimeEq;
use tokio::sync::RwLock;

use crate::errors::{codes, ErrorDetails, ErrorResponse};

/// Header name for the session token.
pub const SESSION_TOKEN_HEADER: &str = "x-session-token";

/// In-memory store of unlocked edit sessions.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, DateTime<Utc>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a new session token valid for `ttl_hours`.
    pub async fn create(&self, ttl_hours: i64) -> (String, DateTime<Utc>) {
        let token = uuid::Uuid::new_v4().to_string();
        let expires_at = Utc::now() + Duration::hours(ttl_hours);

        let mut sessions = self.sessions.write().await;
        // Opportunistic cleanup keeps the map from growing forever.
        let now = Utc::now();
        sessions.retain(|_, expiry| *expiry > now);
        sessions.insert(token.clone(), expires_at);

        (token, expires_at)
    }

    /// Expiry of a live session, if the token is valid.
    pub async fn expiry(&self, token: &str) -> Option<DateTime<Utc>> {
        let sessions = self.sessions.read().await;
        sessions
            .get(token)
            .copied()
            .filter(|expiry| *expiry > Utc::now())
    }

    /// Whether the token names a live session.
    pub async fn is_valid(&self, token: &str) -> bool {
        self.expiry(token).await.is_some()
    }
}

/// Writes that stay open to visitors: unlocking itself, like toggles and
/// wishlist votes (visitor-name features, same as the source app).
fn is_open_write(path: &str) -> bool {
    // Nested routers see the path with the mount prefix stripped.
    path.ends_with("/auth/unlock") || path.ends_with("/likes") || path.ends_with("/vote")
}

/// Middleware gating mutating routes behind a live edit session. Reads pass
/// through untouched.
pub async fn edit_session_layer(
    password_configured: bool,
    sessions: Arc<SessionStore>,
    request: Request,
    next: Next,
) -> Response {
    // No password configured means the gate is off (dev mode).
    if !password_configured {
        return next.run(request).await;
    }

    let method = request.method();
    if method == http::Method::GET || method == http::Method::HEAD || method == http::Method::OPTIONS
    {
        return next.run(request).await;
    }

    if is_open_write(request.uri().path()) {
        return next.run(request).await;
    }

    match extract_token(&request) {
        Some(token) if sessions.is_valid(&token).await => next.run(request).await,
        Some(_) => unauthorized_response("Edit session expired or invalid"),
        None => unauthorized_response("Edit session required"),
    }
}

/// Pull the session token from the dedicated header or a bearer token.
pub fn extract_token(request: &Request) -> Option<String> {
    let from_header = request
        .headers()
        .get(SESSION_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());

    from_header.or_else(|| {
        request
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.strip_prefix("Bearer "))
            .map(|s| s.to_string())
    })
}

/// Perform constant-time string comparison.
pub fn constant_time_compare(a: &str, b: &str) -> bool {
    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    // Constant-time comparison
    a_bytes.ct_eq(b_bytes).into()
}

/// Create an unauthorized response.
fn unauthorized_response(message: &str) -> Response {
    let body = ErrorResponse {
        success: false,
        error: ErrorDetails {
            code: codes::UNAUTHORIZED.to_string(),
            message: message.to_string(),
            details: None,
        },
        revision_id: 0,
    };

    (StatusCode::UNAUTHORIZED, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_time_compare_equal() {
        assert!(constant_time_compare("wee-password", "wee-password"));
    }

    #[test]
    fn test_constant_time_compare_not_equal() {
        assert!(!constant_time_compare("wee-password", "wee-passw0rd"));
    }

    #[test]
    fn test_constant_time_compare_different_lengths() {
        assert!(!constant_time_compare("short", "much-longer-password"));
    }

    #[test]
    fn test_constant_time_compare_empty() {
        assert!(constant_time_compare("", ""));
        assert!(!constant_time_compare("", "not-empty"));
    }

    #[test]
    fn test_open_writes() {
        assert!(is_open_write("/auth/unlock"));
        assert!(is_open_write("/journal/abc/likes"));
        assert!(is_open_write("/wishlist/abc/vote"));
        assert!(!is_open_write("/journal"));
        assert!(!is_open_write("/photos/upload"));
    }

    #[tokio::test]
    async fn test_session_lifecycle() {
        let store = SessionStore::new();
        let (token, expires_at) = store.create(24).await;

        assert!(expires_at > Utc::now());
        assert!(store.is_valid(&token).await);
        assert!(!store.is_valid("no-such-token").await);
    }

    #[tokio::test]
    async fn test_expired_session_rejected() {
        let store = SessionStore::new();
        let (token, _) = store.create(-1).await;
        assert!(!store.is_valid(&token).await);
    }
}
