//! Document Text Extractor: uploaded bytes → plain text.
//!
//! PDFs go through `pdf-extract`; UTF-8 text files pass through as-is.
//! Extraction is CPU-bound; callers run it inside `tokio::task::spawn_blocking`.

use thiserror::Error;

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    PlainText,
}

impl DocumentKind {
    pub fn extension(self) -> &'static str {
        match self {
            DocumentKind::Pdf => "pdf",
            DocumentKind::PlainText => "txt",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            DocumentKind::Pdf => "application/pdf",
            DocumentKind::PlainText => "text/plain; charset=utf-8",
        }
    }
}

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("unsupported document type: {0}")]
    Unsupported(String),

    #[error("failed to process PDF: {0}")]
    Pdf(String),

    #[error("text file is not valid UTF-8")]
    NotUtf8,

    #[error("no text could be extracted from the document")]
    Empty,
}

impl From<ExtractError> for AppError {
    fn from(e: ExtractError) -> Self {
        match e {
            ExtractError::Unsupported(_) | ExtractError::NotUtf8 => {
                AppError::UnsupportedMediaType(e.to_string())
            }
            ExtractError::Pdf(_) | ExtractError::Empty => AppError::UnprocessableEntity(e.to_string()),
        }
    }
}

const PDF_MAGIC: &[u8] = b"%PDF";

/// Decides how to read an upload. The `%PDF` signature wins over whatever the
/// client claimed; otherwise the declared content type, then the file extension.
pub fn detect_kind(
    bytes: &[u8],
    content_type: Option<&str>,
    file_name: Option<&str>,
) -> Result<DocumentKind, ExtractError> {
    if bytes.starts_with(PDF_MAGIC) {
        return Ok(DocumentKind::Pdf);
    }

    let content_type = content_type
        .map(|ct| ct.split(';').next().unwrap_or(ct).trim().to_ascii_lowercase())
        .unwrap_or_default();
    let extension = file_name
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    if content_type == "application/pdf" || extension == "pdf" {
        return Ok(DocumentKind::Pdf);
    }
    if content_type.starts_with("text/") || matches!(extension.as_str(), "txt" | "md" | "text") {
        return Ok(DocumentKind::PlainText);
    }

    let described = match (content_type.is_empty(), file_name) {
        (false, _) => content_type,
        (true, Some(name)) => name.to_string(),
        (true, None) => "unknown".to_string(),
    };
    Err(ExtractError::Unsupported(described))
}

/// Extracts plain text. Whitespace-only output counts as a failure.
pub fn extract_text(bytes: &[u8], kind: DocumentKind) -> Result<String, ExtractError> {
    let text = match kind {
        DocumentKind::Pdf => pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| ExtractError::Pdf(e.to_string()))?,
        DocumentKind::PlainText => std::str::from_utf8(bytes)
            .map_err(|_| ExtractError::NotUtf8)?
            .to_string(),
    };

    if text.trim().is_empty() {
        return Err(ExtractError::Empty);
    }
    Ok(text)
}
