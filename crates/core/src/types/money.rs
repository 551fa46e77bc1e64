//! Money arithmetic for the ordering domain.
//!
//! All amounts are Egyptian pounds held as [`rust_decimal::Decimal`] so that
//! share pricing and the reservation split never accumulate float error.
//!
//! Two domain rules live here:
//!
//! - A calf can be sold in sevenths. A line priced for `s` shares costs
//!   `unit * s / 7`, except `s = 7` which is a full purchase at the unit
//!   price exactly.
//! - Checkout collects a 25% down payment; the balance is the remainder,
//!   so `down_payment + balance` always equals the total to the piaster.

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, AddAssign, Mul, Sub};

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::share::ShareCount;

/// Number of shares in a whole animal.
pub const SHARES_PER_ANIMAL: u32 = 7;

/// Down payment fraction collected at reservation time.
const DOWN_PAYMENT_RATE: Decimal = Decimal::from_parts(25, 0, 0, false, 2);

/// An amount of money in Egyptian pounds.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Zero pounds.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a money value from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a money value from a whole number of pounds.
    #[must_use]
    pub fn from_pounds(pounds: i64) -> Self {
        Self(Decimal::from(pounds))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Price of `share` sevenths of an animal sold whole at this unit price.
    ///
    /// Seven sevenths is a full purchase and returns the unit price exactly,
    /// with no division round trip.
    #[must_use]
    pub fn share_price(&self, share: ShareCount) -> Self {
        if share.is_full() {
            return *self;
        }
        Self(self.0 * Decimal::from(share.get()) / Decimal::from(SHARES_PER_ANIMAL))
    }

    /// The 25% reservation fee, rounded to the piaster.
    #[must_use]
    pub fn down_payment(&self) -> Self {
        Self(
            (self.0 * DOWN_PAYMENT_RATE)
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    /// The balance due on delivery.
    ///
    /// Defined as `total - down_payment` so the two always sum back to the
    /// total regardless of rounding.
    #[must_use]
    pub fn balance(&self) -> Self {
        *self - self.down_payment()
    }

    /// Round to the piaster (two decimal places) for display.
    #[must_use]
    pub fn rounded(&self) -> Self {
        Self(
            self.0
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        )
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Mul<u32> for Money {
    type Output = Self;

    fn mul(self, rhs: u32) -> Self {
        Self(self.0 * Decimal::from(rhs))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for Money {
    /// Format as `EGP 8,500.00` with thousands separators.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self.rounded().0;
        let negative = rounded.is_sign_negative();
        let text = rounded.abs().to_string();
        let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), ""));

        let mut grouped = String::new();
        let digits: Vec<char> = int_part.chars().collect();
        for (i, c) in digits.iter().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(*c);
        }

        let sign = if negative { "-" } else { "" };
        write!(f, "{sign}EGP {grouped}.{frac_part:0<2}")
    }
}
