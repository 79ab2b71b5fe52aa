//! Axum extractors for the caller's identity.

use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};
use tracing::warn;

use crate::auth::{bearer_token, Identity};
use crate::errors::AppError;
use crate::state::AppState;

/// Caller identity; rejects with 401 when the token is missing or invalid.
pub struct RequireIdentity(pub Identity);

/// Verifies the bearer token in `headers`, if any.
/// An invalid token degrades to the anonymous flow instead of failing the request.
pub async fn identify(state: &AppState, headers: &HeaderMap) -> Option<Identity> {
    let token = bearer_token(headers)?;
    match state.identity.verify(token).await {
        Ok(identity) => Some(identity),
        Err(e) => {
            warn!("Ignoring bearer token that failed verification: {e}");
            None
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for RequireIdentity {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        identify(state, &parts.headers)
            .await
            .map(RequireIdentity)
            .ok_or(AppError::Unauthorized)
    }
}
