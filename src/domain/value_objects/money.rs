//! # Money Types
//!
//! Validated decimal newtypes for transfer amounts and spot rates.
//!
//! Both types reject zero and negative values at construction, so the
//! fee model never sees a non-positive amount or rate.
//!
//! # Examples
//!
//! ```
//! use remit_rank::domain::value_objects::money::{Amount, SpotRate};
//! use rust_decimal::Decimal;
//!
//! let amount = Amount::new(Decimal::new(1000, 0)).unwrap();
//! let rate = SpotRate::new(Decimal::new(110, 2)).unwrap();
//! assert_eq!(amount.get(), Decimal::new(1000, 0));
//! assert_eq!(rate.get(), Decimal::new(11, 1));
//!
//! assert!(Amount::new(Decimal::ZERO).is_err());
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A strictly positive amount in the source currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Amount(Decimal);

impl Amount {
    /// Creates a new amount.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidAmount` if `value <= 0`.
    pub fn new(value: Decimal) -> DomainResult<Self> {
        if value <= Decimal::ZERO {
            return Err(DomainError::InvalidAmount("amount must be > 0".to_string()));
        }
        Ok(Self(value))
    }

    /// Returns the inner decimal value.
    #[inline]
    #[must_use]
    pub const fn get(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = DomainError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A strictly positive spot exchange rate (target units per source unit).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct SpotRate(Decimal);

impl SpotRate {
    /// Creates a new spot rate.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRate` if `value <= 0`.
    pub fn new(value: Decimal) -> DomainResult<Self> {
        if value <= Decimal::ZERO {
            return Err(DomainError::InvalidRate(format!(
                "spot rate must be > 0, got {value}"
            )));
        }
        Ok(Self(value))
    }

    /// Returns the inner decimal value.
    #[inline]
    #[must_use]
    pub const fn get(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for SpotRate {
    type Error = DomainError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SpotRate> for Decimal {
    fn from(rate: SpotRate) -> Self {
        rate.0
    }
}

impl fmt::Display for SpotRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn amount_rejects_zero_and_negative() {
        assert!(matches!(
            Amount::new(Decimal::ZERO),
            Err(DomainError::InvalidAmount(_))
        ));
        assert!(Amount::new(Decimal::new(-1, 0)).is_err());
    }

    #[test]
    fn rate_rejects_zero() {
        assert!(matches!(
            SpotRate::new(Decimal::ZERO),
            Err(DomainError::InvalidRate(_))
        ));
    }

    #[test]
    fn amount_deserialize_validates() {
        let ok: Amount = serde_json::from_str("\"250.50\"").unwrap();
        assert_eq!(ok.get(), Decimal::new(25050, 2));

        let err = serde_json::from_str::<Amount>("\"-3\"");
        assert!(err.is_err());
    }

    #[test]
    fn display() {
        let rate = SpotRate::new(Decimal::new(91, 2)).unwrap();
        assert_eq!(rate.to_string(), "0.91");
    }
}
