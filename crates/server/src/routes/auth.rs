//! Auth route handlers (mocked credentials).

use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use dabeeha_core::Email;

use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::{CurrentUser, User, session_keys};
use crate::services::AuthService;
use crate::state::AppState;

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    /// Accepted but never checked; auth is mocked.
    #[serde(default)]
    pub password: String,
}

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Store the logged-in identity in the session.
async fn establish_session(session: &Session, user: &User) -> Result<()> {
    let current = CurrentUser {
        id: user.id.clone(),
        email: user.email.clone(),
    };
    session
        .insert(session_keys::CURRENT_USER, current)
        .await
        .map_err(|e| AppError::Internal(format!("session error: {e}")))
}

/// `POST /auth/register`
#[instrument(skip_all, fields(email = %form.email))]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<RegisterRequest>,
) -> Result<Json<User>> {
    if form.name.trim().is_empty() {
        return Err(AppError::BadRequest("name is required".into()));
    }
    let email = Email::parse(&form.email).map_err(|e| AppError::BadRequest(e.to_string()))?;

    let user = AuthService::new(&state).register(form.name.trim(), email).await?;
    establish_session(&session, &user).await?;
    Ok(Json(user))
}

/// `POST /auth/login`
#[instrument(skip_all, fields(email = %form.email))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<LoginRequest>,
) -> Result<Json<User>> {
    let email = Email::parse(&form.email).map_err(|e| AppError::BadRequest(e.to_string()))?;

    let user = AuthService::new(&state).login(email).await?;
    establish_session(&session, &user).await?;
    Ok(Json(user))
}

/// `POST /auth/logout`
pub async fn logout(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(user): RequireAuth,
) -> Result<StatusCode> {
    AuthService::new(&state).logout(&user.id).await;
    session
        .flush()
        .await
        .map_err(|e| AppError::Internal(format!("session error: {e}")))?;
    Ok(StatusCode::NO_CONTENT)
}
