//! Order lifecycle service.
//!
//! Placing an order is atomic: validation runs first against the live
//! cart, and only a fully valid checkout clears the cart, appends the
//! order, persists, and emits notifications. Cancellation marks the order
//! `Cancelled` and keeps the record for the customer's history.

use std::time::Duration;

use chrono::Utc;
use tracing::{info, warn};

use dabeeha_core::{Language, NotificationKind, OrderId, OrderStatus, UserId};

use crate::catalog;
use crate::error::{AppError, Result};
use crate::models::{Checkout, MediaKind, MediaUpdate, Order};
use crate::services::NotificationService;
use crate::state::AppState;
use crate::store::keys;

/// Delay before the simulated farm health-check update fires.
///
/// Stands in for a real event pushed by the farm; the task is tied to the
/// order and aborted if the order is cancelled first.
pub const FARM_UPDATE_DELAY: Duration = Duration::from_secs(5);

/// Service for placing, cancelling, and progressing orders.
pub struct OrderService<'a> {
    state: &'a AppState,
}

/// Input for appending a farm media update to an order.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct NewMediaUpdate {
    pub kind: MediaKind,
    pub url: String,
    #[serde(default)]
    pub thumbnail: Option<String>,
    pub description: String,
}

impl<'a> OrderService<'a> {
    /// Create a new order service.
    #[must_use]
    pub const fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Place an order from the customer's cart and checkout form.
    ///
    /// # Errors
    ///
    /// Returns a `Checkout` error if validation fails; in that case
    /// nothing was mutated. Returns a store error if persistence fails
    /// after the in-memory mutation.
    pub async fn place(&self, user_id: &UserId, checkout: Checkout) -> Result<Order> {
        let districts = catalog::district_names();

        // Validation, snapshot, and clear all run under the one write
        // lock, so a cart edit can never slip in between and be lost.
        let (order, orders, language) = self
            .state
            .mutate_account(user_id, |account| {
                checkout.validate(&account.cart, &districts)?;
                let order = Order::place(account.cart.lines().to_vec(), checkout, Utc::now());
                account.cart.clear();
                account.orders.insert(0, order.clone());
                Ok::<_, AppError>((order, account.orders.clone(), account.language))
            })
            .await
            .ok_or_else(|| AppError::Unauthorized("no such account".into()))??;

        self.state.store().put(&keys::orders(user_id), &orders).await?;

        info!(order_id = %order.id, total = %order.total, "order placed");

        let (title, message) = texts::confirmed(language, &order.id);
        NotificationService::new(self.state)
            .push(
                user_id,
                title,
                message,
                NotificationKind::Order,
                Some(order.id.clone()),
            )
            .await?;

        self.schedule_farm_update(user_id.clone(), order.id.clone(), language)
            .await;

        Ok(order)
    }

    /// Schedule the delayed farm health-check notification for an order.
    async fn schedule_farm_update(&self, user_id: UserId, order_id: OrderId, language: Language) {
        let state = self.state.clone();
        let timer_order_id = order_id.clone();

        let handle = tokio::spawn(async move {
            tokio::time::sleep(FARM_UPDATE_DELAY).await;

            let (title, message) = texts::farm_update(language);
            let result = NotificationService::new(&state)
                .push(
                    &user_id,
                    title,
                    message,
                    NotificationKind::Farm,
                    Some(timer_order_id.clone()),
                )
                .await;
            if let Err(e) = result {
                warn!(order_id = %timer_order_id, error = %e, "farm update notification failed");
            }
            state.clear_farm_timer(&timer_order_id).await;
        });

        self.state.register_farm_timer(order_id, handle).await;
    }

    /// The customer's orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` for an unknown account.
    pub async fn list(&self, user_id: &UserId) -> Result<Vec<Order>> {
        self.state
            .read_account(user_id, |account| account.orders.clone())
            .await
            .ok_or_else(|| AppError::Unauthorized("no such account".into()))
    }

    /// Look up one order.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the id does not belong to this customer.
    pub async fn get(&self, user_id: &UserId, order_id: &OrderId) -> Result<Order> {
        self.state
            .read_account(user_id, |account| {
                account.orders.iter().find(|o| &o.id == order_id).cloned()
            })
            .await
            .ok_or_else(|| AppError::Unauthorized("no such account".into()))?
            .ok_or_else(|| AppError::NotFound(format!("order {order_id}")))
    }

    /// Cancel an order, keeping the record with status `Cancelled`.
    ///
    /// Aborts the pending farm-update task so a cancelled order never
    /// receives a health-check notification afterwards.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id and `BadRequest` if the order
    /// is already terminal.
    pub async fn cancel(&self, user_id: &UserId, order_id: &OrderId) -> Result<Order> {
        let (cancelled, orders, language) = self
            .state
            .mutate_account(user_id, |account| {
                let language = account.language;
                let Some(order) = account.orders.iter_mut().find(|o| &o.id == order_id) else {
                    return Err(AppError::NotFound(format!("order {order_id}")));
                };
                if order.status.is_terminal() {
                    return Err(AppError::BadRequest(format!(
                        "order {order_id} is already {}",
                        order.status
                    )));
                }
                order.status = OrderStatus::Cancelled;
                Ok((order.clone(), account.orders.clone(), language))
            })
            .await
            .ok_or_else(|| AppError::Unauthorized("no such account".into()))??;

        self.state.abort_farm_timer(order_id).await;
        self.state.store().put(&keys::orders(user_id), &orders).await?;

        info!(order_id = %order_id, "order cancelled");

        let (title, message) = texts::cancelled(language, order_id);
        NotificationService::new(self.state)
            .push(
                user_id,
                title,
                message,
                NotificationKind::Order,
                Some(order_id.clone()),
            )
            .await?;

        Ok(cancelled)
    }

    /// Move an order one step along the delivery progression.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id and `BadRequest` if the order
    /// is already terminal.
    pub async fn advance(&self, user_id: &UserId, order_id: &OrderId) -> Result<Order> {
        let (advanced, orders) = self
            .state
            .mutate_account(user_id, |account| {
                let Some(order) = account.orders.iter_mut().find(|o| &o.id == order_id) else {
                    return Err(AppError::NotFound(format!("order {order_id}")));
                };
                let Some(next) = order.status.advance() else {
                    return Err(AppError::BadRequest(format!(
                        "order {order_id} is already {}",
                        order.status
                    )));
                };
                order.status = next;
                Ok((order.clone(), account.orders.clone()))
            })
            .await
            .ok_or_else(|| AppError::Unauthorized("no such account".into()))??;

        self.state.store().put(&keys::orders(user_id), &orders).await?;
        info!(order_id = %order_id, status = %advanced.status, "order advanced");
        Ok(advanced)
    }

    /// Append a farm media update to an order.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id or a store error if
    /// persistence fails.
    pub async fn add_media_update(
        &self,
        user_id: &UserId,
        order_id: &OrderId,
        media: NewMediaUpdate,
    ) -> Result<Order> {
        let update = MediaUpdate {
            id: dabeeha_core::MediaUpdateId::new(format!("MED-{}", uuid::Uuid::new_v4())),
            kind: media.kind,
            url: media.url,
            thumbnail: media.thumbnail,
            timestamp: Utc::now(),
            description: media.description,
        };

        let (updated, orders) = self
            .state
            .mutate_account(user_id, |account| {
                let Some(order) = account.orders.iter_mut().find(|o| &o.id == order_id) else {
                    return Err(AppError::NotFound(format!("order {order_id}")));
                };
                order.media_updates.push(update);
                Ok((order.clone(), account.orders.clone()))
            })
            .await
            .ok_or_else(|| AppError::Unauthorized("no such account".into()))??;

        self.state.store().put(&keys::orders(user_id), &orders).await?;
        Ok(updated)
    }
}

/// Bilingual notification copy for the order lifecycle.
mod texts {
    use dabeeha_core::{Language, OrderId};

    pub fn confirmed(language: Language, order_id: &OrderId) -> (String, String) {
        match language {
            Language::En => (
                "Reservation Confirmed".to_owned(),
                format!(
                    "Your order {order_id} has been successfully reserved. We will start \
                     preparing your sacrifice soon."
                ),
            ),
            Language::Ar => (
                "تأكيد الحجز".to_owned(),
                format!("تم حجز طلبك {order_id} بنجاح. سنبدأ في تجهيز أضحيتك قريباً."),
            ),
        }
    }

    pub fn farm_update(language: Language) -> (String, String) {
        match language {
            Language::En => (
                "Farm Update".to_owned(),
                "The veterinarian has completed the health check for your sacrifice. All looks \
                 perfect!"
                    .to_owned(),
            ),
            Language::Ar => (
                "تحديث المزرعة".to_owned(),
                "أتم الطبيب البيطري فحص أضحيتك. كل شيء يبدو مثالياً!".to_owned(),
            ),
        }
    }

    pub fn cancelled(language: Language, order_id: &OrderId) -> (String, String) {
        match language {
            Language::En => (
                "Order Cancelled".to_owned(),
                format!(
                    "Order {order_id} has been successfully cancelled and your reservation fee \
                     is being processed."
                ),
            ),
            Language::Ar => (
                "تم إلغاء الطلب".to_owned(),
                format!("تم إلغاء الطلب {order_id} بنجاح وجاري استرجاع مبلغ الحجز."),
            ),
        }
    }
}
