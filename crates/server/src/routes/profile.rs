//! Profile and language-preference route handlers.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use dabeeha_core::{Email, GeoPoint, Language};

use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::User;
use crate::services::AuthService;
use crate::state::AppState;

/// `GET /profile`
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(current): RequireAuth,
) -> Result<Json<User>> {
    state
        .read_account(&current.id, |account| account.user.clone())
        .await
        .map(Json)
        .ok_or_else(|| AppError::Unauthorized("no such account".into()))
}

/// Profile replacement form. The id always stays the session's.
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub location: Option<GeoPoint>,
}

/// `PUT /profile` - replaces the profile wholesale.
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(current): RequireAuth,
    Json(form): Json<UpdateProfileRequest>,
) -> Result<Json<User>> {
    if form.name.trim().is_empty() {
        return Err(AppError::BadRequest("name is required".into()));
    }
    let email = Email::parse(&form.email).map_err(|e| AppError::BadRequest(e.to_string()))?;

    let user = User {
        id: current.id.clone(),
        name: form.name.trim().to_owned(),
        email,
        location: form.location,
    };
    let user = AuthService::new(&state).update_profile(&current.id, user).await?;
    Ok(Json(user))
}

/// Language preference body.
#[derive(Debug, Serialize, Deserialize)]
pub struct LanguagePreference {
    pub language: Language,
}

/// `GET /lang`
pub async fn language(
    State(state): State<AppState>,
    RequireAuth(current): RequireAuth,
) -> Result<Json<LanguagePreference>> {
    state
        .read_account(&current.id, |account| LanguagePreference {
            language: account.language,
        })
        .await
        .map(Json)
        .ok_or_else(|| AppError::Unauthorized("no such account".into()))
}

/// `PUT /lang`
pub async fn set_language(
    State(state): State<AppState>,
    RequireAuth(current): RequireAuth,
    Json(pref): Json<LanguagePreference>,
) -> Result<Json<LanguagePreference>> {
    AuthService::new(&state)
        .set_language(&current.id, pref.language)
        .await?;
    Ok(Json(pref))
}
