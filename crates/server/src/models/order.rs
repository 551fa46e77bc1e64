//! Order entity and checkout validation.
//!
//! An order is an atomic snapshot of the cart plus the checkout form.
//! Quantities and prices are frozen at creation; after that only the
//! status moves, and farm media updates may be appended.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use dabeeha_core::{MediaUpdateId, Money, OrderId, OrderStatus};

use super::cart::{Cart, CartLine};

/// The holiday days available as delivery/slaughter slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EidDay {
    #[serde(rename = "1st Day of Eid")]
    First,
    #[serde(rename = "2nd Day of Eid")]
    Second,
    #[serde(rename = "3rd Day of Eid")]
    Third,
    #[serde(rename = "4th Day of Eid")]
    Fourth,
}

impl EidDay {
    /// Customer-facing label, identical to the wire form.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::First => "1st Day of Eid",
            Self::Second => "2nd Day of Eid",
            Self::Third => "3rd Day of Eid",
            Self::Fourth => "4th Day of Eid",
        }
    }
}

/// Time-of-day delivery slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeSlot {
    #[serde(rename = "Early Morning (6 AM - 10 AM)")]
    EarlyMorning,
    #[serde(rename = "Late Morning (10 AM - 2 PM)")]
    LateMorning,
    #[serde(rename = "Afternoon (2 PM - 6 PM)")]
    Afternoon,
}

/// Where a slaughtered order is delivered, or an alive order's paperwork
/// address plus its designated hand-off point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryAddress {
    pub building: String,
    pub street: String,
    /// Must name a known locality.
    pub district: String,
    pub floor: String,
    /// Designated slaughter meeting point. Required only when the order
    /// contains an item handed over alive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meeting_point: Option<String>,
}

/// Contact and identity details collected at checkout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillingDetails {
    pub full_name: String,
    pub phone: String,
    /// Reference to an uploaded national ID photo.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub national_id_photo: Option<String>,
}

/// Media type of a farm update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

/// A photo or video pushed by the farm while the animal is being prepared.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaUpdate {
    pub id: MediaUpdateId,
    pub kind: MediaKind,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub description: String,
}

/// The checkout form accompanying the cart at order placement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Checkout {
    pub address: DeliveryAddress,
    pub billing: BillingDetails,
    pub eid_day: EidDay,
    pub time_slot: TimeSlot,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Validation errors raised before any state is touched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    /// The cart has no lines.
    #[error("cart is empty")]
    EmptyCart,

    /// A required form field is blank.
    #[error("missing required field: {field}")]
    MissingField {
        /// Name of the blank field.
        field: &'static str,
    },

    /// The district does not name a known locality.
    #[error("unknown district: {0}")]
    UnknownDistrict(String),

    /// The cart contains an alive item but no meeting point was chosen.
    #[error("orders with a live animal require a slaughter meeting point")]
    MeetingPointRequired,
}

impl Checkout {
    /// Validate this form against the cart being checked out.
    ///
    /// `districts` is the set of known locality names. Rejection here
    /// guarantees no state was mutated.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule as a [`CheckoutError`].
    pub fn validate(&self, cart: &Cart, districts: &[&str]) -> Result<(), CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        require(&self.address.building, "address.building")?;
        require(&self.address.street, "address.street")?;
        require(&self.billing.full_name, "billing.full_name")?;
        require(&self.billing.phone, "billing.phone")?;

        if !districts.contains(&self.address.district.as_str()) {
            return Err(CheckoutError::UnknownDistrict(self.address.district.clone()));
        }

        if cart.has_alive()
            && self
                .address
                .meeting_point
                .as_deref()
                .is_none_or(|p| p.trim().is_empty())
        {
            return Err(CheckoutError::MeetingPointRequired);
        }

        Ok(())
    }
}

fn require(value: &str, field: &'static str) -> Result<(), CheckoutError> {
    if value.trim().is_empty() {
        Err(CheckoutError::MissingField { field })
    } else {
        Ok(())
    }
}

/// A placed order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    /// Cart lines as they were at checkout.
    pub items: Vec<CartLine>,
    pub total: Money,
    /// 25% reservation fee collected at order time.
    pub down_payment: Money,
    /// Remainder due on delivery.
    pub balance: Money,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub address: DeliveryAddress,
    pub billing: BillingDetails,
    pub eid_day: EidDay,
    pub time_slot: TimeSlot,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub media_updates: Vec<MediaUpdate>,
}

impl Order {
    /// Assemble an order from a validated cart snapshot and checkout form.
    ///
    /// The caller is responsible for having run [`Checkout::validate`];
    /// this constructor only freezes the data.
    #[must_use]
    pub fn place(items: Vec<CartLine>, checkout: Checkout, now: DateTime<Utc>) -> Self {
        let total: Money = items.iter().map(CartLine::subtotal).sum();
        let notes = checkout
            .notes
            .map(|n| n.trim().to_owned())
            .filter(|n| !n.is_empty());

        Self {
            id: new_order_id(),
            items,
            total,
            down_payment: total.down_payment(),
            balance: total.balance(),
            status: OrderStatus::Pending,
            created_at: now,
            address: checkout.address,
            billing: checkout.billing,
            eid_day: checkout.eid_day,
            time_slot: checkout.time_slot,
            notes,
            media_updates: Vec::new(),
        }
    }
}

/// Generate a customer-facing order id like `DBH-482910`.
fn new_order_id() -> OrderId {
    let n: u32 = rand::rng().random_range(0..1_000_000);
    OrderId::new(format!("DBH-{n:06}"))
}
