//! # Static Exchange Rate Source
//!
//! Serves a fixed [`RateTable`]. Used by the CLI when a rate is given on the
//! command line, and by tests.

use crate::domain::value_objects::currency::CurrencyCode;
use crate::domain::value_objects::money::SpotRate;
use crate::infrastructure::rates::error::{RateResult, RateSourceError};
use crate::infrastructure::rates::traits::{ExchangeRateSource, RateTable};
use async_trait::async_trait;
use std::collections::BTreeMap;

/// Fixed-table [`ExchangeRateSource`].
#[derive(Debug, Clone)]
pub struct StaticExchangeRateSource {
    table: RateTable,
}

impl StaticExchangeRateSource {
    /// Serves `table` for its base currency.
    #[must_use]
    pub fn new(table: RateTable) -> Self {
        Self { table }
    }

    /// Serves a single pair.
    #[must_use]
    pub fn single(from: CurrencyCode, to: CurrencyCode, rate: SpotRate) -> Self {
        Self::new(RateTable::new(from, BTreeMap::from([(to, rate.get())])))
    }

    /// Returns the served table.
    #[must_use]
    pub fn table(&self) -> &RateTable {
        &self.table
    }
}

#[async_trait]
impl ExchangeRateSource for StaticExchangeRateSource {
    async fn latest(&self, base: &CurrencyCode) -> RateResult<RateTable> {
        if *base == self.table.base {
            Ok(self.table.clone())
        } else {
            Err(RateSourceError::unsupported_base(base.as_str()))
        }
    }

    fn name(&self) -> &'static str {
        "static"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn code(s: &str) -> CurrencyCode {
        CurrencyCode::new(s).unwrap()
    }

    #[tokio::test]
    async fn serves_single_pair() {
        let source = StaticExchangeRateSource::single(
            code("USD"),
            code("EUR"),
            SpotRate::new(Decimal::new(91, 2)).unwrap(),
        );
        let table = source.latest(&code("USD")).await.unwrap();
        assert_eq!(
            table.rate_for(&code("EUR")).unwrap().get(),
            Decimal::new(91, 2)
        );
        assert_eq!(source.name(), "static");
    }

    #[tokio::test]
    async fn other_base_is_unsupported() {
        let source = StaticExchangeRateSource::new(RateTable::new(code("USD"), BTreeMap::new()));
        let err = source.latest(&code("GBP")).await.unwrap_err();
        assert!(matches!(err, RateSourceError::UnsupportedBase { .. }));
    }
}
