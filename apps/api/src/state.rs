use std::sync::Arc;

use sqlx::PgPool;

use crate::auth::IdentityVerifier;
use crate::config::Config;
use crate::documents::archive::UploadArchive;
use crate::llm_client::LlmClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub llm: LlmClient,
    /// Pluggable token verifier. Default: Identity Toolkit `accounts:lookup`.
    pub identity: Arc<dyn IdentityVerifier>,
    /// `None` when no S3 bucket is configured.
    pub archive: Option<UploadArchive>,
    pub config: Config,
}
