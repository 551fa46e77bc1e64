//! Status and classification enums for the ordering domain.

use serde::{Deserialize, Serialize};

/// Livestock category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Sheep,
    Calf,
}

impl Category {
    /// Only calves may be split into sevenths.
    #[must_use]
    pub const fn supports_shares(&self) -> bool {
        matches!(self, Self::Calf)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sheep => write!(f, "Sheep"),
            Self::Calf => write!(f, "Calf"),
        }
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Sheep" | "sheep" => Ok(Self::Sheep),
            "Calf" | "calf" => Ok(Self::Calf),
            _ => Err(format!("invalid category: {s}")),
        }
    }
}

/// How the animal is handed over.
///
/// `Alive` orders are collected at a designated slaughter meeting point;
/// `Slaughtered` orders are delivered to the door.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Fulfillment {
    Alive,
    Slaughtered,
}

impl std::fmt::Display for Fulfillment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Alive => write!(f, "Alive"),
            Self::Slaughtered => write!(f, "Slaughtered"),
        }
    }
}

/// Order lifecycle status.
///
/// The happy path is a linear progression:
///
/// ```text
/// Pending -> Processing -> OutForDelivery -> Delivered
/// ```
///
/// `Cancelled` is a second terminal state. A cancelled order stays on the
/// customer's history rather than being deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    OutForDelivery,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// The next stage along the delivery progression, if any.
    ///
    /// Terminal states have no next stage.
    #[must_use]
    pub const fn advance(&self) -> Option<Self> {
        match self {
            Self::Pending => Some(Self::Processing),
            Self::Processing => Some(Self::OutForDelivery),
            Self::OutForDelivery => Some(Self::Delivered),
            Self::Delivered | Self::Cancelled => None,
        }
    }

    /// Whether the order can no longer change state.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }

    /// Customer-facing label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending Reservation",
            Self::Processing => "Preparing Sacrifice",
            Self::OutForDelivery => "Out for Delivery",
            Self::Delivered => "Delivered",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Source classification for a customer notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// Emitted by the order lifecycle (confirmation, cancellation).
    Order,
    /// General announcements.
    System,
    /// Updates from the farm about the reserved animal.
    Farm,
}

/// Customer interface language preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ar,
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" => Ok(Self::En),
            "ar" => Ok(Self::Ar),
            _ => Err(format!("invalid language: {s}")),
        }
    }
}
