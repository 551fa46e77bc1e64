//! Order route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use dabeeha_core::{OrderId, UserId};

use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::{Checkout, Order};
use crate::services::{NewMediaUpdate, OrderService};
use crate::state::AppState;

/// `POST /orders` - checkout the cart.
#[instrument(skip_all, fields(user_id = %current.id))]
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(current): RequireAuth,
    Json(checkout): Json<Checkout>,
) -> Result<(StatusCode, Json<Order>)> {
    let order = OrderService::new(&state).place(&current.id, checkout).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// `GET /orders/user/{id}` - order history, newest first.
///
/// Customers can only read their own history; any other id is rejected
/// rather than revealed as existing or not.
pub async fn history(
    State(state): State<AppState>,
    RequireAuth(current): RequireAuth,
    Path(user_id): Path<UserId>,
) -> Result<Json<Vec<Order>>> {
    if user_id != current.id {
        return Err(AppError::Unauthorized(
            "orders belong to another customer".into(),
        ));
    }
    let orders = OrderService::new(&state).list(&current.id).await?;
    Ok(Json(orders))
}

/// `GET /orders/{id}`
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(current): RequireAuth,
    Path(order_id): Path<OrderId>,
) -> Result<Json<Order>> {
    let order = OrderService::new(&state).get(&current.id, &order_id).await?;
    Ok(Json(order))
}

/// `POST /orders/{id}/cancel`
#[instrument(skip_all, fields(order_id = %order_id))]
pub async fn cancel(
    State(state): State<AppState>,
    RequireAuth(current): RequireAuth,
    Path(order_id): Path<OrderId>,
) -> Result<Json<Order>> {
    let order = OrderService::new(&state)
        .cancel(&current.id, &order_id)
        .await?;
    Ok(Json(order))
}

/// `POST /orders/{id}/advance`
#[instrument(skip_all, fields(order_id = %order_id))]
pub async fn advance(
    State(state): State<AppState>,
    RequireAuth(current): RequireAuth,
    Path(order_id): Path<OrderId>,
) -> Result<Json<Order>> {
    let order = OrderService::new(&state)
        .advance(&current.id, &order_id)
        .await?;
    Ok(Json(order))
}

/// `POST /orders/{id}/media`
pub async fn add_media(
    State(state): State<AppState>,
    RequireAuth(current): RequireAuth,
    Path(order_id): Path<OrderId>,
    Json(media): Json<NewMediaUpdate>,
) -> Result<Json<Order>> {
    let order = OrderService::new(&state)
        .add_media_update(&current.id, &order_id, media)
        .await?;
    Ok(Json(order))
}
