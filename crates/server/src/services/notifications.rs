//! Notification feed service.
//!
//! The feed is newest-first. Entries are immutable after creation except
//! for the read flag, and the feed is only ever emptied wholesale.

use chrono::Utc;

use dabeeha_core::{NotificationKind, OrderId, UserId};

use crate::error::{AppError, Result};
use crate::models::Notification;
use crate::state::AppState;
use crate::store::keys;

/// Service for the per-customer notification feed.
pub struct NotificationService<'a> {
    state: &'a AppState,
}

impl<'a> NotificationService<'a> {
    /// Create a new notification service.
    #[must_use]
    pub const fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Prepend a fresh unread notification and persist the feed.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` for an unknown account or a store error if
    /// persistence fails.
    pub async fn push(
        &self,
        user_id: &UserId,
        title: impl Into<String>,
        message: impl Into<String>,
        kind: NotificationKind,
        order_id: Option<OrderId>,
    ) -> Result<Notification> {
        let notification = Notification::new(title, message, kind, order_id, Utc::now());

        let feed = self
            .state
            .mutate_account(user_id, |account| {
                account.notifications.insert(0, notification.clone());
                account.notifications.clone()
            })
            .await
            .ok_or_else(|| AppError::Unauthorized("no such account".into()))?;

        self.state
            .store()
            .put(&keys::notifications(user_id), &feed)
            .await?;
        Ok(notification)
    }

    /// The feed, newest first.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` for an unknown account.
    pub async fn list(&self, user_id: &UserId) -> Result<Vec<Notification>> {
        self.state
            .read_account(user_id, |account| account.notifications.clone())
            .await
            .ok_or_else(|| AppError::Unauthorized("no such account".into()))
    }

    /// Count of unread entries, recomputed on demand.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` for an unknown account.
    pub async fn unread_count(&self, user_id: &UserId) -> Result<usize> {
        self.state
            .read_account(user_id, |account| {
                account.notifications.iter().filter(|n| !n.read).count()
            })
            .await
            .ok_or_else(|| AppError::Unauthorized("no such account".into()))
    }

    /// Mark every entry read. Ordering and content are untouched.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` for an unknown account or a store error if
    /// persistence fails.
    pub async fn mark_all_read(&self, user_id: &UserId) -> Result<()> {
        let feed = self
            .state
            .mutate_account(user_id, |account| {
                for n in &mut account.notifications {
                    n.read = true;
                }
                account.notifications.clone()
            })
            .await
            .ok_or_else(|| AppError::Unauthorized("no such account".into()))?;

        self.state
            .store()
            .put(&keys::notifications(user_id), &feed)
            .await?;
        Ok(())
    }

    /// Empty the feed and delete its persisted copy.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` for an unknown account or a store error if
    /// the delete fails.
    pub async fn clear(&self, user_id: &UserId) -> Result<()> {
        self.state
            .mutate_account(user_id, |account| account.notifications.clear())
            .await
            .ok_or_else(|| AppError::Unauthorized("no such account".into()))?;

        self.state
            .store()
            .delete(&keys::notifications(user_id))
            .await?;
        Ok(())
    }
}
