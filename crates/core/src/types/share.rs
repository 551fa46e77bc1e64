//! Share counts for fractional calf ownership.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`ShareCount`].
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareCountError {
    /// The value is outside 1..=7.
    #[error("share count must be between 1 and 7, got {0}")]
    OutOfRange(u32),
}

/// The number of sevenths of a whole animal bought by one customer.
///
/// Islamic practice allows up to seven households to split one calf, so a
/// share count is always an integer in `1..=7`. Seven sevenths is the whole
/// animal and prices identically to a full purchase.
///
/// ## Examples
///
/// ```
/// use dabeeha_core::ShareCount;
///
/// let three = ShareCount::new(3).expect("in range");
/// assert!(!three.is_full());
/// assert!(ShareCount::new(7).expect("in range").is_full());
/// assert!(ShareCount::new(0).is_err());
/// assert!(ShareCount::new(8).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct ShareCount(u32);

impl ShareCount {
    /// The whole animal.
    pub const FULL: Self = Self(7);

    /// Construct a share count, validating the 1..=7 range.
    ///
    /// # Errors
    ///
    /// Returns [`ShareCountError::OutOfRange`] for 0 or anything above 7.
    pub const fn new(value: u32) -> Result<Self, ShareCountError> {
        if value >= 1 && value <= 7 {
            Ok(Self(value))
        } else {
            Err(ShareCountError::OutOfRange(value))
        }
    }

    /// The raw count of sevenths.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Whether this share count amounts to the whole animal.
    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.0 == 7
    }
}

impl TryFrom<u32> for ShareCount {
    type Error = ShareCountError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ShareCount> for u32 {
    fn from(share: ShareCount) -> Self {
        share.0
    }
}

impl fmt::Display for ShareCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/7", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_range() {
        for v in 1..=7 {
            assert_eq!(ShareCount::new(v).unwrap().get(), v);
        }
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert_eq!(ShareCount::new(0), Err(ShareCountError::OutOfRange(0)));
        assert_eq!(ShareCount::new(8), Err(ShareCountError::OutOfRange(8)));
    }

    #[test]
    fn test_only_seven_is_full() {
        for v in 1..7 {
            assert!(!ShareCount::new(v).unwrap().is_full());
        }
        assert!(ShareCount::FULL.is_full());
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: ShareCount = serde_json::from_str("3").unwrap();
        assert_eq!(ok.get(), 3);
        assert!(serde_json::from_str::<ShareCount>("9").is_err());
    }
}
