//! HTTP route handlers for the ordering API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (store reachable)
//!
//! # Auth (mocked)
//! POST /auth/register          - Register and log in
//! POST /auth/login             - Log in (unknown emails become customers)
//! POST /auth/logout            - Log out
//!
//! # Profile
//! GET  /profile                - Current profile
//! PUT  /profile                - Replace profile wholesale
//! GET  /lang                   - Language preference
//! PUT  /lang                   - Set language preference
//!
//! # Catalog
//! GET  /products               - Product listing (?category=Sheep|Calf)
//! GET  /products/{id}          - Product detail
//! GET  /meeting-points         - Slaughter points ranked by distance
//!                                (?lat=&lng= or ?district=)
//!
//! # Cart
//! GET  /cart                   - Cart with totals and payment split
//! POST /cart/add               - Add a line (merges by key)
//! POST /cart/update            - Replace a line's quantity
//! POST /cart/remove            - Remove a line
//! GET  /cart/count             - Total item count
//!
//! # Orders
//! POST /orders                 - Checkout the cart
//! GET  /orders/user/{id}       - Order history (own orders only)
//! GET  /orders/{id}            - Order detail
//! POST /orders/{id}/cancel     - Cancel (marks CANCELLED, keeps record)
//! POST /orders/{id}/advance    - Move to the next lifecycle stage
//! POST /orders/{id}/media      - Append a farm media update
//!
//! # Notifications
//! GET    /notifications        - Feed, newest first, with unread count
//! POST   /notifications/read-all
//! DELETE /notifications        - Clear feed and persisted copy
//!
//! # Advisor
//! POST /advisor                - Livestock advice (canned reply on failure)
//! ```

pub mod advisor;
pub mod auth;
pub mod cart;
pub mod meeting_points;
pub mod notifications;
pub mod orders;
pub mod products;
pub mod profile;

use axum::http::StatusCode;
use axum::{
    Router,
    extract::State,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(orders::create))
        .route("/user/{id}", get(orders::history))
        .route("/{id}", get(orders::show))
        .route("/{id}/cancel", post(orders::cancel))
        .route("/{id}/advance", post(orders::advance))
        .route("/{id}/media", post(orders::add_media))
}

/// Create the notification routes router.
pub fn notification_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(notifications::index).delete(notifications::clear))
        .route("/read-all", post(notifications::read_all))
}

/// Create all routes for the ordering API.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth_routes())
        .route("/profile", get(profile::show).put(profile::update))
        .route("/lang", get(profile::language).put(profile::set_language))
        .nest("/products", product_routes())
        .route("/meeting-points", get(meeting_points::index))
        .nest("/cart", cart_routes())
        .nest("/orders", order_routes())
        .nest("/notifications", notification_routes())
        .route("/advisor", post(advisor::ask))
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
pub async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Verifies the store directory is reachable before returning OK.
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    match tokio::fs::metadata(state.store().root()).await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}
