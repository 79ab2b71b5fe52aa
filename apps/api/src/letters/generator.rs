//! Cover letter generation: orchestrates the full pipeline.
//!
//! Flow: validate → (verify caller) → load profile → header block → prompt →
//!       LLM generate → phone normalization → persist (signed-in callers) → respond.
//!
//! Nothing is persisted unless generation and post-processing succeed.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::auth::Identity;
use crate::errors::AppError;
use crate::letters::header::{build_header_block, HeaderFields};
use crate::letters::phone::normalize_phones_in_text;
use crate::letters::prompts::build_prompt;
use crate::letters::store::{insert_letter, NewLetter};
use crate::llm_client::{LlmClient, MODEL};
use crate::models::letter::LetterRow;
use crate::models::profile::UserProfileRow;
use crate::profiles::store::{get_profile, upsert_profile, ProfilePatch};

/// Request body for letter generation. Missing fields read as empty and are
/// rejected by [`validate_request`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub resume_text: String,
    #[serde(default)]
    pub job_description: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerateResponse {
    pub cover_letter: String,
    /// The header block injected into the prompt.
    pub used_header: String,
    /// `None` for anonymous callers, whose letters are not stored.
    pub letter_id: Option<Uuid>,
}

/// Rejects a request with no resume text or no job description.
/// Runs before any external call is made.
pub fn validate_request(request: &GenerateRequest) -> Result<(), AppError> {
    if request.resume_text.trim().is_empty() || request.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "Missing input: resume_text and job_description are required".to_string(),
        ));
    }
    Ok(())
}

/// Header inputs: profile fields, with the token's email as fallback.
fn header_fields<'a>(
    profile: Option<&'a UserProfileRow>,
    identity: Option<&'a Identity>,
) -> HeaderFields<'a> {
    let token_email = identity.and_then(|i| i.email.as_deref());

    HeaderFields {
        full_name: profile.and_then(|p| p.full_name.as_deref()).unwrap_or(""),
        address: profile.and_then(|p| p.address.as_deref()).unwrap_or(""),
        city_state_zip: profile
            .and_then(|p| p.city_state_zip.as_deref())
            .unwrap_or(""),
        email: profile
            .and_then(|p| p.email.as_deref())
            .or(token_email)
            .unwrap_or(""),
        phone: profile.and_then(|p| p.phone.as_deref()).unwrap_or(""),
    }
}

/// Runs the generation pipeline. `request` must already have passed
/// [`validate_request`].
///
/// Steps:
/// 1. get_profile() for signed-in callers
/// 2. build_header_block() with `today`
/// 3. build_prompt() → LLM call (single attempt)
/// 4. normalize_phones_in_text() on the raw output
/// 5. INSERT into letters (signed-in callers only; creates the profile row if missing)
pub async fn generate_cover_letter(
    pool: &PgPool,
    llm: &LlmClient,
    identity: Option<&Identity>,
    request: &GenerateRequest,
    today: NaiveDate,
) -> Result<GenerateResponse, AppError> {
    // Step 1: Profile
    let profile = match identity {
        Some(identity) => get_profile(pool, &identity.uid).await?,
        None => None,
    };

    // Step 2: Header block
    let header_block = build_header_block(&header_fields(profile.as_ref(), identity), today);

    // Step 3: Generate
    let prompt = build_prompt(&header_block, &request.job_description, &request.resume_text);
    info!(
        "Generating cover letter (signed_in={}, prompt_chars={})",
        identity.is_some(),
        prompt.len()
    );
    let response = llm
        .call(&prompt)
        .await
        .map_err(|e| AppError::Llm(format!("Cover letter generation failed: {e}")))?;

    // Step 4: Post-process
    let cover_letter = normalize_phones_in_text(response.text());

    // Step 5: Persist
    let letter_id = match identity {
        Some(identity) => {
            let row = persist_letter(
                pool,
                identity,
                profile.is_none(),
                NewLetter {
                    uid: &identity.uid,
                    cover_letter: &cover_letter,
                    resume_text: &request.resume_text,
                    job_description: &request.job_description,
                    header_block: &header_block,
                    model: MODEL,
                },
            )
            .await?;
            Some(row.id)
        }
        None => None,
    };

    Ok(GenerateResponse {
        cover_letter,
        used_header: header_block,
        letter_id,
    })
}

/// Stores the letter, first creating an email-only profile when the caller
/// has none. Both writes share one transaction: either both land or neither.
pub async fn persist_letter(
    pool: &PgPool,
    identity: &Identity,
    create_profile: bool,
    letter: NewLetter<'_>,
) -> Result<LetterRow, sqlx::Error> {
    let mut tx = pool.begin().await?;

    if create_profile {
        upsert_profile(
            &mut *tx,
            &identity.uid,
            &ProfilePatch::email_only(identity.email.as_deref()),
        )
        .await?;
    }
    let row = insert_letter(&mut *tx, letter).await?;

    tx.commit().await?;
    Ok(row)
}
