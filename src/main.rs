//! A Wee Adventure Backend
//!
//! REST backend for a family travel journal: journal entries with photos,
//! castle/loch/Munro/hidden-gem visit tracking, a wishlist, milestones and
//! family profiles, all persisted in SQLite.

mod api;
mod auth;
mod config;
mod db;
mod errors;
mod milestones;
mod models;
mod photos;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use auth::SessionStore;
use config::Config;
use db::Repository;
use photos::PhotoStore;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub sessions: Arc<SessionStore>,
    pub photos: Arc<PhotoStore>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting A Wee Adventure Backend");
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Photo directory: {:?}", config.photo_dir);
    tracing::info!("Bind address: {}", config.bind_addr);

    // Warn if the edit password is not configured
    if config.edit_password.is_none() {
        tracing::warn!("No edit password configured (WEE_EDIT_PASSWORD). Editing is open!");
    }

    milestones::validate_catalog();

    // Initialize database
    let pool = db::init_database(&config.db_path).await?;
    let repo = Arc::new(Repository::new(pool));

    // Initialize photo storage
    let photos = Arc::new(PhotoStore::open(&config.photo_dir).await?);

    // Create application state
    let state = AppState {
        repo,
        sessions: Arc::new(SessionStore::new()),
        photos,
        config: Arc::new(config.clone()),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Clone pieces for the auth layer
    let password_configured = state.config.edit_password.is_some();
    let sessions = state.sessions.clone();

    // API routes
    let api_routes = Router::new()
        // Sync/polling
        .route("/ping", get(api::ping))
        .route("/revision", get(api::get_revision))
        // Edit sessions
        .route("/auth/unlock", post(api::unlock))
        .route("/auth/session", get(api::check_session))
        // Journal
        .route("/journal", get(api::list_entries).post(api::create_entry))
        .route(
            "/journal/{id}",
            get(api::get_entry)
                .put(api::update_entry)
                .delete(api::delete_entry),
        )
        .route("/journal/{id}/likes", post(api::toggle_like))
        // Places (castles, lochs, hidden gems)
        .route(
            "/places/{kind}",
            get(api::list_places).post(api::create_place),
        )
        .route("/places/{kind}/{id}", get(api::get_place))
        .route(
            "/places/{kind}/{id}/visit",
            put(api::record_visit).delete(api::delete_visit),
        )
        // Munros
        .route("/munros", get(api::list_munros).post(api::create_munro))
        .route("/munros/summary", get(api::munro_summary))
        .route("/munros/{id}", get(api::get_munro))
        .route(
            "/munros/{id}/completion",
            put(api::record_completion).delete(api::delete_completion),
        )
        // Wishlist
        .route(
            "/wishlist",
            get(api::list_wishlist).post(api::create_wishlist_item),
        )
        .route(
            "/wishlist/{id}",
            put(api::update_wishlist_item).delete(api::delete_wishlist_item),
        )
        .route("/wishlist/{id}/vote", post(api::vote_wishlist_item))
        // Family
        .route(
            "/family",
            get(api::list_family).post(api::create_family_member),
        )
        .route(
            "/family/{id}",
            get(api::get_family_member)
                .put(api::update_family_member)
                .delete(api::delete_family_member),
        )
        // Milestones
        .route("/milestones", get(api::list_milestones))
        // App settings
        .route("/settings", get(api::list_settings))
        .route(
            "/settings/{key}",
            put(api::put_setting).delete(api::delete_setting),
        )
        // Map pins
        .route("/pins", get(api::list_pins).post(api::create_pin))
        .route("/pins/{id}", delete(api::delete_pin))
        // Spinning wheel
        .route("/spin", get(api::spin_wheel))
        // Photos
        .route("/photos", get(api::list_photos))
        .route("/photos/upload", post(api::upload_photo))
        .route("/photos/status", get(api::photo_status))
        .route("/photos/placeholder/{id}", get(api::photo_placeholder))
        .route(
            "/photos/{id}",
            get(api::serve_photo).delete(api::delete_photo),
        )
        // Uploads may reach 15MB; leave headroom for multipart framing
        .layer(DefaultBodyLimit::max(16 * 1024 * 1024))
        // Apply edit-session middleware to mutating routes
        .layer(middleware::from_fn(move |req, next| {
            auth::edit_session_layer(password_configured, sessions.clone(), req, next)
        }));

    // Health check (no auth required)
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests;
