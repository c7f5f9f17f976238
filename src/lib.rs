//! # remit-rank
//!
//! Ranking engine for money-transfer providers.
//!
//! Given a transfer (amount, source and target currency), the engine
//! applies every provider's fee model to the live spot rate, works out how
//! much the recipient lands, and ranks providers by a weighted composite of
//! a financial sub-score and five quality metrics.
//!
//! ## Architecture
//!
//! - [`domain`]: Value objects, the provider entity and pure scoring services
//! - [`application`]: Quote service, ranking strategies and DTOs
//! - [`infrastructure`]: Provider store and exchange rate sources
//! - [`config`]: Layered settings
//! - [`telemetry`]: Tracing subscriber setup
//!
//! ## Numeric Policy
//!
//! Money (amounts, rates, fees, landing) is `rust_decimal::Decimal`; scores
//! are `f64`. The financial sub-scorer is the only place a decimal ratio
//! becomes a float.
//!
//! ## Example
//!
//! ```
//! use remit_rank::application::{QuoteRequest, QuoteService};
//! use remit_rank::domain::entities::{Provider, ProviderId, QualityMetrics};
//! use remit_rank::domain::value_objects::{CurrencyCode, FeeRule, FeeRuleSet, SpotRate};
//! use remit_rank::infrastructure::persistence::InMemoryProviderRepository;
//! use remit_rank::infrastructure::rates::StaticExchangeRateSource;
//! use rust_decimal::Decimal;
//! use std::sync::Arc;
//!
//! let providers = InMemoryProviderRepository::from_providers(vec![
//!     Provider::new(ProviderId::new(1), "P1", "Provider One", "US")
//!         .with_fee_rules(FeeRuleSet::new(vec![FeeRule::fixed(Decimal::new(5, 0))]).unwrap())
//!         .with_metrics(QualityMetrics::uniform(80.0)),
//! ])
//! .unwrap();
//! let rates = StaticExchangeRateSource::single(
//!     CurrencyCode::new("USD").unwrap(),
//!     CurrencyCode::new("EUR").unwrap(),
//!     SpotRate::new(Decimal::new(110, 2)).unwrap(),
//! );
//! let service = QuoteService::with_defaults(Arc::new(providers), Arc::new(rates));
//!
//! let runtime = tokio::runtime::Runtime::new().unwrap();
//! let response = runtime
//!     .block_on(service.quote(QuoteRequest::new("usd", "eur", Decimal::new(1000, 0))))
//!     .unwrap();
//! assert_eq!(response.results[0].landing, Decimal::new(10945, 1));
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod telemetry;
