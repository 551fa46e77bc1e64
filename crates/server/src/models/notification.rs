//! Customer notification entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use dabeeha_core::{NotificationId, NotificationKind, OrderId};

/// A timestamped alert on the customer's feed.
///
/// Immutable after creation except for the read flag; the feed is only
/// ever emptied wholesale, never edited entry by entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub title: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub read: bool,
    pub kind: NotificationKind,
    /// The order this alert refers to, for order and farm notifications.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<OrderId>,
}

impl Notification {
    /// Create a fresh unread notification stamped with `now`.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        message: impl Into<String>,
        kind: NotificationKind,
        order_id: Option<OrderId>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: NotificationId::new(format!("NTF-{}", uuid::Uuid::new_v4())),
            title: title.into(),
            message: message.into(),
            timestamp: now,
            read: false,
            kind,
            order_id,
        }
    }
}
