use axum::{
    extract::{Multipart, State},
    http::HeaderMap,
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::{info, warn};

use crate::auth::extract::identify;
use crate::documents::extractor::{detect_kind, extract_text};
use crate::errors::AppError;
use crate::state::AppState;

/// Multipart field carrying the document.
const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived_key: Option<String>,
}

struct UploadedFile {
    bytes: Bytes,
    content_type: Option<String>,
    file_name: Option<String>,
}

async fn read_file_field(multipart: &mut Multipart) -> Result<Option<UploadedFile>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed upload: {e}")))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let content_type = field.content_type().map(String::from);
        let file_name = field.file_name().map(String::from);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Malformed upload: {e}")))?;
        return Ok(Some(UploadedFile {
            bytes,
            content_type,
            file_name,
        }));
    }
    Ok(None)
}

/// POST /api/v1/documents/upload
///
/// Returns the plain text of the uploaded résumé. For signed-in callers the
/// original file is also archived when an archive bucket is configured;
/// archive failures are logged and do not fail the request.
pub async fn handle_upload(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let upload = read_file_field(&mut multipart)
        .await?
        .filter(|f| !f.bytes.is_empty())
        .ok_or_else(|| AppError::Validation("No file uploaded".to_string()))?;

    info!("File received: {} bytes", upload.bytes.len());

    let kind = detect_kind(
        &upload.bytes,
        upload.content_type.as_deref(),
        upload.file_name.as_deref(),
    )?;

    // pdf-extract is CPU-bound and may panic on malformed input.
    let body = upload.bytes.clone();
    let text = tokio::task::spawn_blocking(move || extract_text(&body, kind))
        .await
        .map_err(|e| {
            if e.is_panic() {
                AppError::UnprocessableEntity("failed to process PDF".to_string())
            } else {
                AppError::Internal(anyhow::anyhow!("spawn_blocking failed in extraction: {e}"))
            }
        })??;

    info!("Extracted {} characters of text ({:?})", text.len(), kind);

    let mut archived_key = None;
    if let Some(archive) = &state.archive {
        if let Some(identity) = identify(&state, &headers).await {
            match archive.store(&identity.uid, upload.bytes, kind).await {
                Ok(key) => archived_key = Some(key),
                Err(e) => warn!("Upload archive failed for user {}: {e:?}", identity.uid),
            }
        }
    }

    Ok(Json(UploadResponse { text, archived_key }))
}
