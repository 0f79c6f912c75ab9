mod config;
mod db;
mod handlers;
mod models;
mod services;
mod storage;
mod token;

use anyhow::Result;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use tracing::info;

use shared::observability::{init_logging, LogConfig};

use crate::config::Config;
use crate::db::{PgRecordStore, RecordStore};
use crate::services::{MediaService, MediaServiceConfig};

/// Request body ceiling when no file-size limit is configured.
const DEFAULT_BODY_LIMIT: u64 = 100 * 1024 * 1024;
/// Slack for multipart framing on top of the file-size ceiling.
const MULTIPART_OVERHEAD: u64 = 1024 * 1024;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub media_service: Arc<MediaService>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    init_logging(LogConfig::from_env("media-service"))?;

    info!("Starting Media Service...");

    // Load configuration
    let config = Config::from_env()?;
    info!("Configuration loaded successfully");

    // Initialize database connection pool
    let db_pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    info!("Database connection pool established");

    // Run migrations
    sqlx::migrate!("./migrations").run(&db_pool).await?;
    info!("Database migrations completed");

    // Initialize storage adapters
    let blob_store = storage::build_blob_store(config.storage.provider, &config.storage).await?;
    let backup_store = match config.storage.backup_provider {
        Some(provider) => Some(storage::build_blob_store(provider, &config.storage).await?),
        None => None,
    };
    info!(provider = ?config.storage.provider, "Blob store initialized");

    let record_store: Arc<dyn RecordStore> = Arc::new(PgRecordStore::new(db_pool));

    let media_service = Arc::new(MediaService::new(
        blob_store,
        backup_store,
        record_store,
        MediaServiceConfig {
            max_file_size_bytes: config.limits.max_file_size_bytes,
            public_base_url: config.public_base_url.clone(),
            verify_blob_on_resolve: config.verify_blob_on_resolve,
        },
    ));
    info!("Media service initialized");

    // Configure CORS (uploads come from a browser UI on another origin)
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let body_limit = (config
        .limits
        .max_file_size_bytes
        .unwrap_or(DEFAULT_BODY_LIMIT)
        + MULTIPART_OVERHEAD) as usize;

    // Build router
    let app = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/api/v1/media/upload", post(handlers::upload::upload_media))
        .route(
            "/api/v1/media",
            get(handlers::media::get_media).post(handlers::media::resolve_media),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(AppState { media_service });

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!("Media Service listening on {}", addr);

    // Run the server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
