//! Shopping cart engine.
//!
//! A cart is a list of lines, each identified by a composite key of
//! product, fulfillment, and share count. The key is compared structurally
//! rather than via a concatenated string, so product ids containing a
//! separator can never collide with another line's key.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use dabeeha_core::{Category, Fulfillment, Money, ProductId, ShareCount};

use super::product::Product;

/// Errors that can occur when admitting a line into the cart.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CartError {
    /// A share count was given for a product that is sold whole only.
    #[error("{category} is sold whole and cannot be split into shares")]
    ShareNotAllowed {
        /// Category of the offending product.
        category: Category,
    },
}

/// Identity of a cart line.
///
/// Two additions with the same key merge into one line. A share count of
/// seven sevenths is a whole animal and normalizes to the same key as a
/// full purchase, so the two can never sit on separate lines.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CartKey {
    pub product_id: ProductId,
    pub fulfillment: Fulfillment,
    pub share: Option<ShareCount>,
}

impl CartKey {
    /// Build a key, normalizing a full share count to `None`.
    #[must_use]
    pub fn new(product_id: ProductId, fulfillment: Fulfillment, share: Option<ShareCount>) -> Self {
        Self {
            product_id,
            fulfillment,
            share: share.filter(|s| !s.is_full()),
        }
    }
}

/// One line of the cart: a product snapshot plus purchase terms.
///
/// The effective price is computed once at admission and frozen, so later
/// catalog price changes never reprice a cart or an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    pub category: Category,
    pub fulfillment: Fulfillment,
    /// Sevenths of the animal, for calf shares. `None` means a full purchase.
    pub share: Option<ShareCount>,
    pub weight_range: String,
    pub image_url: String,
    /// Catalog unit price at admission time.
    pub unit_price: Money,
    /// Price of one quantity of this line: the unit price, scaled by the
    /// share fraction for partial calf shares.
    pub effective_price: Money,
    pub quantity: u32,
}

impl CartLine {
    /// Build a line from a catalog product and purchase terms.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ShareNotAllowed`] if a share count is given for
    /// a product whose category does not support shares.
    pub fn new(
        product: &Product,
        fulfillment: Fulfillment,
        share: Option<ShareCount>,
        quantity: u32,
    ) -> Result<Self, CartError> {
        if share.is_some() && !product.category.supports_shares() {
            return Err(CartError::ShareNotAllowed {
                category: product.category,
            });
        }

        let share = share.filter(|s| !s.is_full());
        let effective_price = match share {
            Some(s) => product.price.share_price(s),
            None => product.price,
        };

        Ok(Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            category: product.category,
            fulfillment,
            share,
            weight_range: product.weight_range.clone(),
            image_url: product.image_url.clone(),
            unit_price: product.price,
            effective_price,
            quantity: quantity.max(1),
        })
    }

    /// The identity key of this line.
    #[must_use]
    pub fn key(&self) -> CartKey {
        CartKey::new(self.product_id.clone(), self.fulfillment, self.share)
    }

    /// Line subtotal: effective price times quantity.
    #[must_use]
    pub fn subtotal(&self) -> Money {
        self.effective_price * self.quantity
    }
}

/// An ordered collection of cart lines.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// The lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Add a line, merging with an existing line of the same key.
    ///
    /// Merging adds the incoming quantity to the existing line; a fresh key
    /// appends the line at the end.
    pub fn add(&mut self, line: CartLine) {
        let key = line.key();
        if let Some(existing) = self.lines.iter_mut().find(|l| l.key() == key) {
            existing.quantity += line.quantity;
        } else {
            self.lines.push(line);
        }
    }

    /// Replace the quantity of the line with `key`.
    ///
    /// A quantity of zero removes the line. An unknown key is a no-op.
    pub fn update_quantity(&mut self, key: &CartKey, quantity: u32) {
        if quantity == 0 {
            self.remove(key);
            return;
        }
        if let Some(line) = self.lines.iter_mut().find(|l| l.key() == *key) {
            line.quantity = quantity;
        }
    }

    /// Remove the line with `key`. An unknown key is a no-op.
    pub fn remove(&mut self, key: &CartKey) {
        self.lines.retain(|l| l.key() != *key);
    }

    /// Drop every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of line subtotals.
    #[must_use]
    pub fn total(&self) -> Money {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    /// Total quantity across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Whether any line is handed over alive.
    ///
    /// Such carts require a slaughter meeting point at checkout.
    #[must_use]
    pub fn has_alive(&self) -> bool {
        self.lines
            .iter()
            .any(|l| l.fulfillment == Fulfillment::Alive)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use dabeeha_core::ShareCount;

    fn sheep() -> Product {
        Product {
            id: ProductId::new("1"),
            name: "Rahmani Sheep".into(),
            category: Category::Sheep,
            fulfillment: Fulfillment::Alive,
            weight_range: "45-55kg".into(),
            price: Money::from_pounds(8_500),
            description: String::new(),
            image_url: String::new(),
            origin: "Sharkia, Egypt".into(),
        }
    }

    fn calf() -> Product {
        Product {
            id: ProductId::new("2"),
            name: "Baladi Calf".into(),
            category: Category::Calf,
            fulfillment: Fulfillment::Alive,
            weight_range: "350-400kg".into(),
            price: Money::from_pounds(65_000),
            description: String::new(),
            image_url: String::new(),
            origin: "Monufia, Egypt".into(),
        }
    }

    fn line(product: &Product, share: Option<u32>) -> CartLine {
        let share = share.map(|s| ShareCount::new(s).unwrap());
        CartLine::new(product, product.fulfillment, share, 1).unwrap()
    }

    #[test]
    fn test_same_key_merges_into_one_line() {
        let mut cart = Cart::new();
        cart.add(line(&calf(), Some(3)));
        cart.add(line(&calf(), Some(3)));

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 2);
    }

    #[test]
    fn test_different_share_counts_stay_separate() {
        let mut cart = Cart::new();
        cart.add(line(&calf(), Some(3)));
        cart.add(line(&calf(), Some(2)));

        assert_eq!(cart.lines().len(), 2);
    }

    #[test]
    fn test_full_share_and_whole_purchase_share_a_key() {
        let mut cart = Cart::new();
        cart.add(line(&calf(), Some(7)));
        cart.add(line(&calf(), None));

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 2);
        assert_eq!(cart.lines()[0].effective_price, Money::from_pounds(65_000));
    }

    #[test]
    fn test_share_on_sheep_rejected() {
        let share = Some(ShareCount::new(3).unwrap());
        let err = CartLine::new(&sheep(), Fulfillment::Alive, share, 1).unwrap_err();
        assert_eq!(
            err,
            CartError::ShareNotAllowed {
                category: Category::Sheep
            }
        );
    }

    #[test]
    fn test_remove_targets_exactly_one_line() {
        let mut cart = Cart::new();
        cart.add(line(&sheep(), None));
        cart.add(line(&calf(), Some(3)));
        cart.add(line(&calf(), Some(2)));

        cart.remove(&line(&calf(), Some(3)).key());

        assert_eq!(cart.lines().len(), 2);
        assert!(cart.lines().iter().all(|l| l.share
            != Some(ShareCount::new(3).unwrap())));
    }

    #[test]
    fn test_remove_unknown_key_is_noop() {
        let mut cart = Cart::new();
        cart.add(line(&sheep(), None));
        cart.remove(&line(&calf(), None).key());
        assert_eq!(cart.lines().len(), 1);
    }

    #[test]
    fn test_update_quantity_zero_removes() {
        let mut cart = Cart::new();
        cart.add(line(&sheep(), None));
        cart.update_quantity(&line(&sheep(), None).key(), 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity_replaces_in_place() {
        let mut cart = Cart::new();
        cart.add(line(&sheep(), None));
        cart.update_quantity(&line(&sheep(), None).key(), 4);
        assert_eq!(cart.lines()[0].quantity, 4);
        assert_eq!(cart.total(), Money::from_pounds(34_000));
    }

    #[test]
    fn test_total_sums_effective_prices() {
        let mut cart = Cart::new();
        cart.add(line(&sheep(), None));
        cart.add(line(&calf(), Some(3)));

        let expected = Money::from_pounds(8_500)
            + Money::from_pounds(65_000).share_price(ShareCount::new(3).unwrap());
        assert_eq!(cart.total(), expected);
    }

    #[test]
    fn test_has_alive_drives_meeting_point_requirement() {
        let mut slaughtered_only = Cart::new();
        let mut slaughtered = calf();
        slaughtered.fulfillment = Fulfillment::Slaughtered;
        slaughtered_only.add(
            CartLine::new(&slaughtered, Fulfillment::Slaughtered, None, 1).unwrap(),
        );
        assert!(!slaughtered_only.has_alive());

        let mut with_alive = slaughtered_only.clone();
        with_alive.add(line(&sheep(), None));
        assert!(with_alive.has_alive());
    }
}
