use axum::{
    extract::{Path, State},
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::auth::extract::RequireIdentity;
use crate::errors::AppError;
use crate::export::pdf::render_letter_pdf;
use crate::letters::store::get_letter;
use crate::state::AppState;

const PDF_FILE_NAME: &str = "cover-letter.pdf";

#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    #[serde(default)]
    pub cover_letter: String,
}

/// POST /api/v1/letters/export
///
/// Renders arbitrary (possibly edited) letter text. No sign-in required.
pub async fn handle_export(Json(request): Json<ExportRequest>) -> Result<Response, AppError> {
    if request.cover_letter.trim().is_empty() {
        return Err(AppError::Validation(
            "Missing input: cover_letter is required".to_string(),
        ));
    }
    pdf_response(request.cover_letter).await
}

/// GET /api/v1/letters/:id/pdf
pub async fn handle_letter_pdf(
    State(state): State<AppState>,
    RequireIdentity(identity): RequireIdentity,
    Path(letter_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let letter = get_letter(&state.db, &identity.uid, letter_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Letter {letter_id} not found")))?;
    pdf_response(letter.cover_letter).await
}

async fn pdf_response(letter: String) -> Result<Response, AppError> {
    let bytes = tokio::task::spawn_blocking(move || render_letter_pdf(&letter))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in export: {e}")))?
        .map_err(|e| AppError::Export(e.to_string()))?;

    info!("Rendered PDF: {} bytes", bytes.len());

    Ok((
        [
            (CONTENT_TYPE, "application/pdf".to_string()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{PDF_FILE_NAME}\""),
            ),
        ],
        bytes,
    )
        .into_response())
}
