use axum::{extract::State, Json};
use serde::Deserialize;

use crate::auth::extract::RequireIdentity;
use crate::auth::Identity;
use crate::errors::AppError;
use crate::models::profile::UserProfileRow;
use crate::profiles::store::{get_profile, non_blank, upsert_profile, ProfilePatch};
use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthEvent {
    Signup,
    Login,
    GoogleSignIn,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProfileFields {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city_state_zip: String,
    #[serde(default)]
    pub phone: String,
}

#[derive(Debug, Deserialize)]
pub struct AuthEventRequest {
    pub event: AuthEvent,
    #[serde(default)]
    pub profile: Option<ProfileFields>,
}

/// Decides what an auth event writes to the profile.
///
/// Signup records every contact field (all four must be present); login and
/// Google sign-in only make sure the email from the verified token is on file.
pub fn patch_for_event(
    event: AuthEvent,
    profile: Option<&ProfileFields>,
    identity: &Identity,
) -> Result<ProfilePatch, AppError> {
    match event {
        AuthEvent::Signup => {
            let fields = profile.ok_or_else(missing_profile_fields)?;
            let patch = ProfilePatch {
                full_name: non_blank(Some(&fields.full_name)),
                address: non_blank(Some(&fields.address)),
                city_state_zip: non_blank(Some(&fields.city_state_zip)),
                phone: non_blank(Some(&fields.phone)),
                email: non_blank(identity.email.as_deref()),
            };
            if patch.full_name.is_none()
                || patch.address.is_none()
                || patch.city_state_zip.is_none()
                || patch.phone.is_none()
            {
                return Err(missing_profile_fields());
            }
            Ok(patch)
        }
        AuthEvent::Login | AuthEvent::GoogleSignIn => {
            Ok(ProfilePatch::email_only(identity.email.as_deref()))
        }
    }
}

fn missing_profile_fields() -> AppError {
    AppError::Validation("Please fill all profile fields.".to_string())
}

/// POST /api/v1/auth/events
pub async fn handle_auth_event(
    State(state): State<AppState>,
    RequireIdentity(identity): RequireIdentity,
    Json(req): Json<AuthEventRequest>,
) -> Result<Json<UserProfileRow>, AppError> {
    let patch = patch_for_event(req.event, req.profile.as_ref(), &identity)?;
    let profile = upsert_profile(&state.db, &identity.uid, &patch).await?;
    Ok(Json(profile))
}

/// GET /api/v1/profile
pub async fn handle_get_profile(
    State(state): State<AppState>,
    RequireIdentity(identity): RequireIdentity,
) -> Result<Json<UserProfileRow>, AppError> {
    let profile = get_profile(&state.db, &identity.uid)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Profile for user {} not found", identity.uid)))?;
    Ok(Json(profile))
}
