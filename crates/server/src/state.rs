//! Application state shared across handlers.
//!
//! All per-customer mutable state (profile, cart, orders, notifications)
//! lives behind this one controller. Handlers never hold raw setters; they
//! go through the services, which in turn use the accessors here. The
//! single `RwLock` serializes writers, and every mutation is followed by a
//! store write of the affected documents.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;

use dabeeha_core::{Language, OrderId, UserId};

use crate::catalog::Catalog;
use crate::config::ServerConfig;
use crate::models::{Cart, Notification, Order, User};
use crate::services::advisor::AdvisorClient;
use crate::store::Store;

/// Everything the server knows about one logged-in customer.
#[derive(Debug, Clone)]
pub struct Account {
    pub user: User,
    pub cart: Cart,
    /// Newest order first.
    pub orders: Vec<Order>,
    /// Newest notification first.
    pub notifications: Vec<Notification>,
    pub language: Language,
}

impl Account {
    /// A fresh account with an empty cart and feeds.
    #[must_use]
    pub fn new(user: User) -> Self {
        Self {
            user,
            cart: Cart::new(),
            orders: Vec::new(),
            notifications: Vec::new(),
            language: Language::default(),
        }
    }
}

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    store: Store,
    catalog: Catalog,
    advisor: Option<AdvisorClient>,
    accounts: RwLock<HashMap<UserId, Account>>,
    /// Pending delayed farm-update tasks, keyed by order.
    farm_timers: Mutex<HashMap<OrderId, JoinHandle<()>>>,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: ServerConfig, store: Store, catalog: Catalog) -> Self {
        let advisor = config.advisor.as_ref().map(AdvisorClient::new);
        Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                catalog,
                advisor,
                accounts: RwLock::new(HashMap::new()),
                farm_timers: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a reference to the JSON store.
    #[must_use]
    pub fn store(&self) -> &Store {
        &self.inner.store
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get the advisory-chat client, if one is configured.
    #[must_use]
    pub fn advisor(&self) -> Option<&AdvisorClient> {
        self.inner.advisor.as_ref()
    }

    /// Install (or replace) the in-memory account for a customer.
    pub async fn insert_account(&self, id: UserId, account: Account) {
        self.inner.accounts.write().await.insert(id, account);
    }

    /// Drop the in-memory account for a customer (logout).
    ///
    /// Persisted documents are untouched; only the session-scoped cart is
    /// lost, matching the original behavior of clearing the cart on logout.
    pub async fn remove_account(&self, id: &UserId) {
        self.inner.accounts.write().await.remove(id);
    }

    /// Read from a customer's account. Returns `None` for unknown ids.
    pub async fn read_account<R>(&self, id: &UserId, f: impl FnOnce(&Account) -> R) -> Option<R> {
        self.inner.accounts.read().await.get(id).map(f)
    }

    /// Mutate a customer's account. Returns `None` for unknown ids.
    ///
    /// The closure runs under the write lock; persistence happens after
    /// the lock is released, from the closure's return value.
    pub async fn mutate_account<R>(
        &self,
        id: &UserId,
        f: impl FnOnce(&mut Account) -> R,
    ) -> Option<R> {
        self.inner.accounts.write().await.get_mut(id).map(f)
    }

    /// Track the delayed farm-update task for an order.
    pub async fn register_farm_timer(&self, order_id: OrderId, handle: JoinHandle<()>) {
        self.inner.farm_timers.lock().await.insert(order_id, handle);
    }

    /// Abort the delayed farm-update task for an order, if still pending.
    ///
    /// Called on cancellation so a cancelled order never receives a
    /// health-check notification afterwards.
    pub async fn abort_farm_timer(&self, order_id: &OrderId) {
        if let Some(handle) = self.inner.farm_timers.lock().await.remove(order_id) {
            handle.abort();
        }
    }

    /// Forget a farm-update task that has fired.
    pub async fn clear_farm_timer(&self, order_id: &OrderId) {
        self.inner.farm_timers.lock().await.remove(order_id);
    }

    /// Whether an order still has a pending farm-update task.
    ///
    /// Used by tests to observe timer lifecycle.
    pub async fn has_farm_timer(&self, order_id: &OrderId) -> bool {
        self.inner.farm_timers.lock().await.contains_key(order_id)
    }
}
