//! Letter history. Append-only: this module only ever INSERTs and SELECTs.

use sqlx::{PgExecutor, PgPool};
use tracing::info;
use uuid::Uuid;

use crate::models::letter::LetterRow;

pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const MAX_PAGE_SIZE: i64 = 100;

/// Inputs and output of one successful generation.
pub struct NewLetter<'a> {
    pub uid: &'a str,
    pub cover_letter: &'a str,
    pub resume_text: &'a str,
    pub job_description: &'a str,
    pub header_block: &'a str,
    pub model: &'a str,
}

pub async fn insert_letter<'e, E>(executor: E, letter: NewLetter<'_>) -> Result<LetterRow, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let NewLetter {
        uid,
        cover_letter,
        resume_text,
        job_description,
        header_block,
        model,
    } = letter;

    let row = sqlx::query_as::<_, LetterRow>(
        r#"
        INSERT INTO letters
            (id, uid, cover_letter, resume_text, job_description, header_block, model)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(uid)
    .bind(cover_letter)
    .bind(resume_text)
    .bind(job_description)
    .bind(header_block)
    .bind(model)
    .fetch_one(executor)
    .await?;

    info!("Stored letter {} for user {uid}", row.id);
    Ok(row)
}

/// Newest first.
pub async fn list_letters(pool: &PgPool, uid: &str, limit: i64) -> Result<Vec<LetterRow>, sqlx::Error> {
    sqlx::query_as::<_, LetterRow>(
        "SELECT * FROM letters WHERE uid = $1 ORDER BY created_at DESC, id LIMIT $2",
    )
    .bind(uid)
    .bind(limit)
    .fetch_all(pool)
    .await
}

/// Scoped to the owner: another user's letter id reads as not found.
pub async fn get_letter(pool: &PgPool, uid: &str, id: Uuid) -> Result<Option<LetterRow>, sqlx::Error> {
    sqlx::query_as::<_, LetterRow>("SELECT * FROM letters WHERE id = $1 AND uid = $2")
        .bind(id)
        .bind(uid)
        .fetch_optional(pool)
        .await
}

/// Clamps a requested page size into `1..=MAX_PAGE_SIZE`.
pub fn page_size(requested: Option<i64>) -> i64 {
    requested
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE)
}
