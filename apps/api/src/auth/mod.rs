//! Identity verification: bearer token → user id (+ optional email).
//!
//! Sign-up and sign-in happen against the external identity provider; this
//! service only verifies the ID tokens it is handed. `AppState` holds an
//! `Arc<dyn IdentityVerifier>` so handlers never talk to the provider directly.

pub mod extract;

use async_trait::async_trait;
use axum::http::{header::AUTHORIZATION, HeaderMap};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A verified caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub uid: String,
    pub email: Option<String>,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("token rejected (status {status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("token did not resolve to a user")]
    UnknownUser,
}

#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    async fn verify(&self, id_token: &str) -> Result<Identity, AuthError>;
}

/// Extracts the token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LookupRequest<'a> {
    id_token: &'a str,
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    #[serde(default)]
    users: Vec<LookupUser>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupUser {
    local_id: String,
    email: Option<String>,
}

/// Verifies ID tokens with the Identity Toolkit `accounts:lookup` endpoint.
pub struct IdentityToolkitVerifier {
    client: Client,
    api_key: String,
    base_url: String,
}

impl IdentityToolkitVerifier {
    pub fn new(api_key: String, base_url: String) -> Result<Self, AuthError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(10))
                .build()?,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl IdentityVerifier for IdentityToolkitVerifier {
    async fn verify(&self, id_token: &str) -> Result<Identity, AuthError> {
        let response = self
            .client
            .post(format!("{}/accounts:lookup", self.base_url))
            .query(&[("key", self.api_key.as_str())])
            .json(&LookupRequest { id_token })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AuthError::Rejected {
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }

        let lookup: LookupResponse = response.json().await?;
        identity_from_lookup(lookup)
    }
}

fn identity_from_lookup(lookup: LookupResponse) -> Result<Identity, AuthError> {
    let user = lookup
        .users
        .into_iter()
        .next()
        .ok_or(AuthError::UnknownUser)?;

    Ok(Identity {
        uid: user.local_id,
        email: user.email.filter(|e| !e.trim().is_empty()),
    })
}

#[cfg(test)]
pub mod testing {
    use super::*;

    /// Accepts exactly one token; everything else is rejected.
    pub struct StaticVerifier {
        pub token: &'static str,
        pub identity: Identity,
    }

    #[async_trait]
    impl IdentityVerifier for StaticVerifier {
        async fn verify(&self, id_token: &str) -> Result<Identity, AuthError> {
            if id_token == self.token {
                Ok(self.identity.clone())
            } else {
                Err(AuthError::Rejected {
                    status: 400,
                    message: "INVALID_ID_TOKEN".to_string(),
                })
            }
        }
    }
}
