//! Celebration Invitation Backend
//!
//! A REST backend with SQLite persistence and filesystem-backed photo storage,
//! plus the local-first submission client used by the invitation site.

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod db;
pub mod errors;
pub mod media;
pub mod models;
pub mod service;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use db::Repository;
use media::MediaStore;
use service::SubmissionService;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub service: Arc<SubmissionService>,
    pub config: Arc<Config>,
}

/// Load configuration, initialize storage and run the server.
pub async fn serve() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Celebration Invitation Backend");
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Media path: {:?}", config.media_path);
    tracing::info!("Bind address: {}", config.bind_addr);

    // Warn if the admin passphrase is not configured
    if config.admin_passphrase.is_none() {
        tracing::warn!(
            "No admin passphrase configured (PARTY_ADMIN_PASSPHRASE). Admin view is locked out!"
        );
    }

    // Initialize database
    let pool = db::init_database(&config.db_path).await?;
    let repo = Arc::new(Repository::new(pool));

    // Initialize photo storage
    let media = Arc::new(MediaStore::new(
        config.media_path.clone(),
        config.public_url.clone(),
    ));

    // Create application state
    let state = AppState {
        repo: Arc::clone(&repo),
        service: Arc::new(SubmissionService::new(repo, media)),
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

    // API routes. The list endpoints are intentionally unauthenticated; the
    // admin view gates access on the client side only.
    let api_routes = Router::new()
        .route("/rsvp", post(api::create_rsvp))
        .route("/rsvps", get(api::list_rsvps))
        .route("/memories", post(api::create_memory))
        .route("/memories", get(api::list_memories));

    // Health check
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .nest_service("/media", ServeDir::new(&state.config.media_path))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
