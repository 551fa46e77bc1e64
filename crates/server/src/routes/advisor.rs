//! Advisory chat route handler.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::services::FALLBACK_REPLY;
use crate::state::AppState;

/// Advisor question body.
#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub message: String,
}

/// Advisor reply body.
#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub reply: String,
}

/// `POST /advisor`
///
/// Upstream failures never surface to the customer; the canned apology
/// goes back with a 200 instead so the chat keeps flowing.
pub async fn ask(
    State(state): State<AppState>,
    RequireAuth(_): RequireAuth,
    Json(form): Json<AskRequest>,
) -> Result<Json<AskResponse>> {
    let message = form.message.trim();
    if message.is_empty() {
        return Err(AppError::BadRequest("message is required".into()));
    }

    let reply = match state.advisor() {
        Some(client) => match client.advise(message).await {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "advisor request failed");
                FALLBACK_REPLY.to_owned()
            }
        },
        None => FALLBACK_REPLY.to_owned(),
    };

    Ok(Json(AskResponse { reply }))
}
