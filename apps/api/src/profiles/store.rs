//! Profile persistence. Upserts merge: a field left `None` keeps its stored value.
//! Profiles are never deleted.

use sqlx::{PgExecutor, PgPool};
use tracing::info;

use crate::models::profile::UserProfileRow;

/// Fields to merge into a profile. `None` means "leave as stored".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfilePatch {
    pub full_name: Option<String>,
    pub address: Option<String>,
    pub city_state_zip: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl ProfilePatch {
    /// Only the email, as recorded on login / Google sign-in.
    pub fn email_only(email: Option<&str>) -> Self {
        ProfilePatch {
            email: non_blank(email),
            ..Default::default()
        }
    }
}

/// Trims, and maps blank input to `None` so it never erases a stored value.
pub fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

/// Creates the profile on first sight, otherwise merges `patch` into it.
/// `created_at` is only written on insert; `updated_at` on every call.
pub async fn upsert_profile<'e, E>(
    executor: E,
    uid: &str,
    patch: &ProfilePatch,
) -> Result<UserProfileRow, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let row = sqlx::query_as::<_, UserProfileRow>(
        r#"
        INSERT INTO user_profiles (uid, full_name, address, city_state_zip, phone, email)
        VALUES ($1, $2, $3, $4, $5, $6)
        ON CONFLICT (uid) DO UPDATE SET
            full_name      = COALESCE(EXCLUDED.full_name, user_profiles.full_name),
            address        = COALESCE(EXCLUDED.address, user_profiles.address),
            city_state_zip = COALESCE(EXCLUDED.city_state_zip, user_profiles.city_state_zip),
            phone          = COALESCE(EXCLUDED.phone, user_profiles.phone),
            email          = COALESCE(EXCLUDED.email, user_profiles.email),
            updated_at     = now()
        RETURNING *
        "#,
    )
    .bind(uid)
    .bind(&patch.full_name)
    .bind(&patch.address)
    .bind(&patch.city_state_zip)
    .bind(&patch.phone)
    .bind(&patch.email)
    .fetch_one(executor)
    .await?;

    info!("Upserted profile for user {uid}");
    Ok(row)
}

pub async fn get_profile(pool: &PgPool, uid: &str) -> Result<Option<UserProfileRow>, sqlx::Error> {
    sqlx::query_as::<_, UserProfileRow>("SELECT * FROM user_profiles WHERE uid = $1")
        .bind(uid)
        .fetch_optional(pool)
        .await
}
