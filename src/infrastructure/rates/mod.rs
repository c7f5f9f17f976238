//! # Exchange Rates
//!
//! Spot rate port and implementations.
//!
//! - [`ExchangeRateSource`]: Port returning a [`RateTable`] per base currency
//! - [`HttpExchangeRateSource`]: JSON rates API with retries
//! - [`StaticExchangeRateSource`]: Fixed table

pub mod error;
pub mod http_source;
pub mod static_source;
pub mod traits;

pub use error::{RateResult, RateSourceError};
pub use http_source::HttpExchangeRateSource;
pub use static_source::StaticExchangeRateSource;
pub use traits::{ExchangeRateSource, RateTable};
