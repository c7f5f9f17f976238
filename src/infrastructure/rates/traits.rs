//! # Exchange Rate Source Trait
//!
//! Port definition for spot rate lookups.
//!
//! A source returns a [`RateTable`]: every rate it knows for one base
//! currency, stamped with the time it was fetched.

use crate::domain::value_objects::currency::CurrencyCode;
use crate::domain::value_objects::money::SpotRate;
use crate::infrastructure::rates::error::RateResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Spot rates from one base currency.
///
/// # Examples
///
/// ```
/// use remit_rank::domain::value_objects::CurrencyCode;
/// use remit_rank::infrastructure::rates::traits::RateTable;
/// use rust_decimal::Decimal;
/// use std::collections::BTreeMap;
///
/// let usd = CurrencyCode::new("USD").unwrap();
/// let eur = CurrencyCode::new("EUR").unwrap();
/// let table = RateTable::new(usd.clone(), BTreeMap::from([(eur.clone(), Decimal::new(91, 2))]));
///
/// assert_eq!(table.rate_for(&eur).unwrap().get(), Decimal::new(91, 2));
/// assert_eq!(table.rate_for(&usd).unwrap().get(), Decimal::ONE);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateTable {
    /// Base currency.
    pub base: CurrencyCode,
    /// Units of each target currency per unit of base.
    pub rates: BTreeMap<CurrencyCode, Decimal>,
    /// When the table was fetched.
    pub fetched_at: DateTime<Utc>,
}

impl RateTable {
    /// Creates a table stamped with the current time.
    #[must_use]
    pub fn new(base: CurrencyCode, rates: BTreeMap<CurrencyCode, Decimal>) -> Self {
        Self {
            base,
            rates,
            fetched_at: Utc::now(),
        }
    }

    /// Returns the spot rate from the base to `target`.
    ///
    /// The base converts to itself at 1. Returns `None` if the target is
    /// missing or its rate is not strictly positive.
    #[must_use]
    pub fn rate_for(&self, target: &CurrencyCode) -> Option<SpotRate> {
        if *target == self.base {
            return SpotRate::new(Decimal::ONE).ok();
        }
        self.rates
            .get(target)
            .and_then(|rate| SpotRate::new(*rate).ok())
    }

    /// Returns the number of target currencies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// Returns true if the table has no target currencies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

/// Source of spot exchange rates.
#[async_trait]
pub trait ExchangeRateSource: Send + Sync + fmt::Debug {
    /// Fetches the latest rates from `base`.
    ///
    /// # Errors
    ///
    /// Returns a `RateSourceError` if the rates cannot be obtained.
    async fn latest(&self, base: &CurrencyCode) -> RateResult<RateTable>;

    /// Returns the name of this source.
    fn name(&self) -> &'static str;
}
