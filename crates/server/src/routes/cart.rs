//! Cart route handlers.
//!
//! The cart is session-scoped and never persisted; only the order that
//! results from checkout reaches the store. Lines are addressed by their
//! structural key in update and remove requests.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use dabeeha_core::{Fulfillment, Money, ProductId, ShareCount};

use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::{Cart, CartKey, CartLine};
use crate::state::AppState;

/// Cart line display data.
#[derive(Debug, Serialize)]
pub struct CartLineView {
    /// Structural identity, echoed back in update/remove requests.
    pub key: CartKey,
    pub name: String,
    pub fulfillment: Fulfillment,
    pub share: Option<ShareCount>,
    pub quantity: u32,
    pub effective_price: Money,
    pub line_total: Money,
    pub image_url: String,
}

/// Cart display data with the payment split.
#[derive(Debug, Serialize)]
pub struct CartView {
    pub items: Vec<CartLineView>,
    pub total: Money,
    pub down_payment: Money,
    pub balance: Money,
    pub item_count: u32,
    /// Formatted total, e.g. `EGP 27,857.14`.
    pub total_display: String,
    /// Whether checkout will require a slaughter meeting point.
    pub requires_meeting_point: bool,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        let total = cart.total();
        Self {
            items: cart.lines().iter().map(CartLineView::from).collect(),
            total,
            down_payment: total.down_payment(),
            balance: total.balance(),
            item_count: cart.item_count(),
            total_display: total.to_string(),
            requires_meeting_point: cart.has_alive(),
        }
    }
}

impl From<&CartLine> for CartLineView {
    fn from(line: &CartLine) -> Self {
        Self {
            key: line.key(),
            name: line.name.clone(),
            fulfillment: line.fulfillment,
            share: line.share,
            quantity: line.quantity,
            effective_price: line.effective_price,
            line_total: line.subtotal(),
            image_url: line.image_url.clone(),
        }
    }
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: ProductId,
    /// Defaults to the product's catalog fulfillment.
    pub fulfillment: Option<Fulfillment>,
    /// Sevenths of a calf; 7 or absence is a full purchase.
    pub share: Option<u32>,
    pub quantity: Option<u32>,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub key: CartKey,
    pub quantity: u32,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub key: CartKey,
}

/// Read the current cart view.
async fn view(state: &AppState, user_id: &dabeeha_core::UserId) -> Result<CartView> {
    state
        .read_account(user_id, |account| CartView::from(&account.cart))
        .await
        .ok_or_else(|| AppError::Unauthorized("no such account".into()))
}

/// `GET /cart`
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(current): RequireAuth,
) -> Result<Json<CartView>> {
    Ok(Json(view(&state, &current.id).await?))
}

/// `POST /cart/add`
#[instrument(skip_all, fields(product_id = %form.product_id))]
pub async fn add(
    State(state): State<AppState>,
    RequireAuth(current): RequireAuth,
    Json(form): Json<AddToCartForm>,
) -> Result<Json<CartView>> {
    let product = state
        .catalog()
        .get(&form.product_id)
        .ok_or_else(|| AppError::NotFound(format!("product {}", form.product_id)))?
        .clone();

    let share = form
        .share
        .map(ShareCount::new)
        .transpose()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    let fulfillment = form.fulfillment.unwrap_or(product.fulfillment);
    let line = CartLine::new(&product, fulfillment, share, form.quantity.unwrap_or(1))?;

    state
        .mutate_account(&current.id, |account| account.cart.add(line))
        .await
        .ok_or_else(|| AppError::Unauthorized("no such account".into()))?;

    Ok(Json(view(&state, &current.id).await?))
}

/// `POST /cart/update`
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(current): RequireAuth,
    Json(form): Json<UpdateCartForm>,
) -> Result<Json<CartView>> {
    state
        .mutate_account(&current.id, |account| {
            account.cart.update_quantity(&form.key, form.quantity);
        })
        .await
        .ok_or_else(|| AppError::Unauthorized("no such account".into()))?;

    Ok(Json(view(&state, &current.id).await?))
}

/// `POST /cart/remove`
pub async fn remove(
    State(state): State<AppState>,
    RequireAuth(current): RequireAuth,
    Json(form): Json<RemoveFromCartForm>,
) -> Result<Json<CartView>> {
    state
        .mutate_account(&current.id, |account| account.cart.remove(&form.key))
        .await
        .ok_or_else(|| AppError::Unauthorized("no such account".into()))?;

    Ok(Json(view(&state, &current.id).await?))
}

/// Cart count response.
#[derive(Debug, Serialize)]
pub struct CountView {
    pub count: u32,
}

/// `GET /cart/count`
pub async fn count(
    State(state): State<AppState>,
    RequireAuth(current): RequireAuth,
) -> Result<Json<CountView>> {
    state
        .read_account(&current.id, |account| CountView {
            count: account.cart.item_count(),
        })
        .await
        .map(Json)
        .ok_or_else(|| AppError::Unauthorized("no such account".into()))
}
