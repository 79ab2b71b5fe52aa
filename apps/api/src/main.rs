mod auth;
mod config;
mod db;
mod documents;
mod errors;
mod export;
mod letters;
mod llm_client;
mod models;
mod profiles;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::auth::IdentityToolkitVerifier;
use crate::config::Config;
use crate::db::create_pool;
use crate::documents::archive::UploadArchive;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Coverly API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL (runs migrations)
    let db = create_pool(&config.database_url).await?;

    // Initialize LLM client
    let llm = LlmClient::new(config.openai_api_key.clone(), config.openai_base_url.clone())?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Initialize identity verifier
    let identity = Arc::new(IdentityToolkitVerifier::new(
        config.identity_api_key.clone(),
        config.identity_base_url.clone(),
    )?);
    info!("Identity verifier initialized");

    // Initialize S3 / MinIO upload archive (optional)
    let archive = UploadArchive::from_config(&config).await;
    if archive.is_none() {
        info!("Upload archive disabled (S3_BUCKET not set)");
    }

    // Build app state
    let state = AppState {
        db,
        llm,
        identity,
        archive,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins to the web frontend

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
