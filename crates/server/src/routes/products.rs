//! Catalog route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use dabeeha_core::{Category, ProductId};

use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::Product;
use crate::state::AppState;

/// Product listing query string.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// `Sheep` or `Calf`; `All` and absence both mean everything.
    pub category: Option<String>,
}

/// `GET /products`
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(_): RequireAuth,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Product>>> {
    let category = match query.category.as_deref() {
        None | Some("All") => None,
        Some(raw) => Some(
            raw.parse::<Category>()
                .map_err(AppError::BadRequest)?,
        ),
    };

    let products = state
        .catalog()
        .by_category(category)
        .into_iter()
        .cloned()
        .collect();
    Ok(Json(products))
}

/// `GET /products/{id}`
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(_): RequireAuth,
    Path(id): Path<ProductId>,
) -> Result<Json<Product>> {
    state
        .catalog()
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))
}
