//! Catalog product entity.

use serde::{Deserialize, Serialize};

use dabeeha_core::{Category, Fulfillment, Money, ProductId};

/// An immutable catalog entry.
///
/// Products never change after seeding; carts and orders snapshot the
/// fields they need rather than referencing back into the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: Category,
    pub fulfillment: Fulfillment,
    /// Live weight or cut weight, e.g. `"45-55kg"`.
    pub weight_range: String,
    /// Unit price for the whole animal or cut.
    pub price: Money,
    pub description: String,
    pub image_url: String,
    pub origin: String,
}
