//! Price representation using decimal arithmetic.
//!
//! The catalog reports prices as decimal strings (`"49.90"`), or an empty
//! string for products without a price. `Price` keeps the exact scale so the
//! value is echoed back to the shopper unchanged.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error parsing a price string.
#[derive(Debug, Error)]
#[error("invalid price {0:?}")]
pub struct PriceError(String);

/// A catalog price in the store's currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Get the decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Parse a catalog price string, treating blank input as "no price".
    ///
    /// # Errors
    ///
    /// Returns `PriceError` if the string is non-blank and not a decimal number.
    pub fn parse_optional(s: &str) -> Result<Option<Self>, PriceError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        trimmed.parse().map(Some)
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s.trim())
            .map(Self)
            .map_err(|_| PriceError(s.to_string()))
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
