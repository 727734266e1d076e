pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::db::Database;
use crate::services::sessions::SessionStore;
use crate::services::uploads::UploadStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub sessions: Arc<SessionStore>,
    pub uploads: Arc<UploadStore>,
}

/// Build the full API router
pub fn build_router(state: AppState) -> Router {
    // Review routes carry a session cursor
    let today_routes = Router::new()
        .route("/api/today", get(routes::today::view))
        .route("/api/today/known", post(routes::today::known))
        .route("/api/today/unknown", post(routes::today::unknown))
        .route("/api/today/skip", post(routes::today::skip))
        .route("/api/today/reset", post(routes::today::reset))
        .layer(middleware::from_fn(routes::session::session_middleware));

    Router::new()
        .route("/health", get(health_check))
        .merge(today_routes)
        // Stats routes
        .route("/api/stats", get(routes::stats::get))
        // Library routes
        .route("/api/library", get(routes::library::list))
        .route("/api/library/import", post(routes::library::import))
        // Upload routes
        .route(
            "/api/uploads",
            get(routes::uploads::list).post(routes::uploads::save),
        )
        .route(
            "/api/uploads/:name",
            get(routes::uploads::preview).delete(routes::uploads::delete),
        )
        .route("/api/uploads/:name/import", post(routes::uploads::import))
        // Settings routes
        .route(
            "/api/settings",
            get(routes::settings::get_all).put(routes::settings::update),
        )
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    tracing::info!("Connecting to database at {}...", config.database.describe());
    let db = Database::connect(&config.database).await?;

    tracing::info!("Initializing schema...");
    db.init_schema().await?;

    tracing::info!("Using upload directory {}", config.upload_dir.display());
    let state = AppState {
        db: Arc::new(db),
        sessions: Arc::new(SessionStore::new()),
        uploads: Arc::new(UploadStore::new(config.upload_dir.clone())),
    };

    let app = build_router(state);

    tracing::info!("Starting server on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
