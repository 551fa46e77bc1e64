//! Notification feed route handlers.

use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;

use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::models::Notification;
use crate::services::NotificationService;
use crate::state::AppState;

/// Feed response: entries newest first plus the unread badge count.
#[derive(Debug, Serialize)]
pub struct FeedView {
    pub notifications: Vec<Notification>,
    pub unread_count: usize,
}

/// `GET /notifications`
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(current): RequireAuth,
) -> Result<Json<FeedView>> {
    let service = NotificationService::new(&state);
    let notifications = service.list(&current.id).await?;
    let unread_count = notifications.iter().filter(|n| !n.read).count();
    Ok(Json(FeedView {
        notifications,
        unread_count,
    }))
}

/// `POST /notifications/read-all`
pub async fn read_all(
    State(state): State<AppState>,
    RequireAuth(current): RequireAuth,
) -> Result<StatusCode> {
    NotificationService::new(&state)
        .mark_all_read(&current.id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /notifications`
pub async fn clear(
    State(state): State<AppState>,
    RequireAuth(current): RequireAuth,
) -> Result<StatusCode> {
    NotificationService::new(&state).clear(&current.id).await?;
    Ok(StatusCode::NO_CONTENT)
}
