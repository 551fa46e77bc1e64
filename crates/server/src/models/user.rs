//! Customer profile entity.

use serde::{Deserialize, Serialize};

use dabeeha_core::{Email, GeoPoint, UserId};

/// A registered customer.
///
/// Profile edits replace the record wholesale; there is no field-level
/// patching.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    /// Last known GPS fix, used to pre-select the nearest meeting point.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoPoint>,
}

impl User {
    /// Create a new customer with a generated id.
    #[must_use]
    pub fn new(name: impl Into<String>, email: Email) -> Self {
        Self {
            id: UserId::new(format!("u-{}", uuid::Uuid::new_v4())),
            name: name.into(),
            email,
            location: None,
        }
    }
}
