use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One persisted generation result. Append-only: inserted once, never updated.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LetterRow {
    pub id: Uuid,
    pub uid: String,
    pub cover_letter: String,
    pub resume_text: String,
    pub job_description: String,
    /// The exact header block injected into the prompt for this letter.
    pub header_block: String,
    pub model: String,
    pub created_at: DateTime<Utc>,
}
