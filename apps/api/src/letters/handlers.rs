//! Axum route handlers for the Letters API.

use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::extract::{identify, RequireIdentity};
use crate::errors::AppError;
use crate::letters::generator::{
    generate_cover_letter, validate_request, GenerateRequest, GenerateResponse,
};
use crate::letters::store::{get_letter, list_letters, page_size};
use crate::models::letter::LetterRow;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListLettersQuery {
    pub limit: Option<i64>,
}

/// POST /api/v1/letters/generate
///
/// Input is validated before the bearer token is verified, so a bad request
/// never reaches the identity provider or the LLM. A token that fails
/// verification falls back to the anonymous flow.
pub async fn handle_generate(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    validate_request(&request)?;

    let identity = identify(&state, &headers).await;
    let today = Utc::now().date_naive();

    let response =
        generate_cover_letter(&state.db, &state.llm, identity.as_ref(), &request, today).await?;

    Ok(Json(response))
}

/// GET /api/v1/letters
///
/// The caller's letter history, newest first.
pub async fn handle_list_letters(
    State(state): State<AppState>,
    RequireIdentity(identity): RequireIdentity,
    Query(query): Query<ListLettersQuery>,
) -> Result<Json<Vec<LetterRow>>, AppError> {
    let letters = list_letters(&state.db, &identity.uid, page_size(query.limit)).await?;
    Ok(Json(letters))
}

/// GET /api/v1/letters/:id
pub async fn handle_get_letter(
    State(state): State<AppState>,
    RequireIdentity(identity): RequireIdentity,
    Path(letter_id): Path<Uuid>,
) -> Result<Json<LetterRow>, AppError> {
    let letter = get_letter(&state.db, &identity.uid, letter_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Letter {letter_id} not found")))?;
    Ok(Json(letter))
}
