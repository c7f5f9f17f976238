//! # Quote Service
//!
//! Orchestrates one ranking request.
//!
//! This module provides the [`QuoteService`], which validates a
//! [`QuoteRequest`], loads providers, looks up the spot rate, applies each
//! provider's fee model and hands the candidates to a [`RankingStrategy`].
//!
//! # Validation Order
//!
//! 1. amount must be positive, `top_n` at least 1, currency codes well formed
//! 2. the provider store must be non-empty
//! 3. the rate table must hold a positive rate for the target currency

use crate::application::dto::{QuoteRequest, QuoteResponse, ScoredCandidateView};
use crate::application::error::{ApplicationError, ApplicationResult, InfrastructureError};
use crate::application::services::ranking_strategy::{
    CompositeScoreStrategy, RankingCandidate, RankingStrategy,
};
use crate::domain::errors::DomainError;
use crate::domain::services::fee_model::FeeModelEvaluator;
use crate::domain::services::weight_resolver::WeightResolver;
use crate::domain::value_objects::arithmetic::ArithmeticError;
use crate::domain::value_objects::currency::CurrencyCode;
use crate::domain::value_objects::money::{Amount, SpotRate};
use crate::infrastructure::persistence::ProviderRepository;
use crate::infrastructure::rates::{ExchangeRateSource, RateSourceError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

/// Configuration for the quote service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteConfig {
    /// Result limit when the request does not set one.
    pub default_top_n: usize,
    /// Overall bound on one rate lookup, retries included, in milliseconds.
    pub rate_timeout_ms: u64,
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self {
            default_top_n: 3,
            rate_timeout_ms: 20_000,
        }
    }
}

impl QuoteConfig {
    /// Sets the default result limit.
    #[must_use]
    pub fn with_default_top_n(mut self, top_n: usize) -> Self {
        self.default_top_n = top_n;
        self
    }

    /// Sets the rate lookup bound.
    #[must_use]
    pub fn with_rate_timeout(mut self, timeout_ms: u64) -> Self {
        self.rate_timeout_ms = timeout_ms;
        self
    }
}

/// Service answering [`QuoteRequest`]s.
#[derive(Debug)]
pub struct QuoteService {
    providers: Arc<dyn ProviderRepository>,
    rates: Arc<dyn ExchangeRateSource>,
    ranker: Arc<dyn RankingStrategy>,
    evaluator: FeeModelEvaluator,
    weight_resolver: WeightResolver,
    config: QuoteConfig,
}

impl QuoteService {
    /// Creates a new QuoteService.
    #[must_use]
    pub fn new(
        providers: Arc<dyn ProviderRepository>,
        rates: Arc<dyn ExchangeRateSource>,
        ranker: Arc<dyn RankingStrategy>,
        weight_resolver: WeightResolver,
        config: QuoteConfig,
    ) -> Self {
        Self {
            providers,
            rates,
            ranker,
            evaluator: FeeModelEvaluator::new(),
            weight_resolver,
            config,
        }
    }

    /// Creates a service with the composite ranker and default settings.
    #[must_use]
    pub fn with_defaults(
        providers: Arc<dyn ProviderRepository>,
        rates: Arc<dyn ExchangeRateSource>,
    ) -> Self {
        Self::new(
            providers,
            rates,
            Arc::new(CompositeScoreStrategy::default()),
            WeightResolver::default(),
            QuoteConfig::default(),
        )
    }

    /// Returns the current configuration.
    #[must_use]
    pub fn config(&self) -> &QuoteConfig {
        &self.config
    }

    /// Returns the ranking strategy name.
    #[must_use]
    pub fn ranking_strategy_name(&self) -> &'static str {
        self.ranker.name()
    }

    /// Ranks providers for one transfer.
    ///
    /// # Errors
    ///
    /// - `Validation` for a non-positive amount, `top_n == 0` or a malformed
    ///   currency code
    /// - `NoProvidersAvailable` if the store is empty
    /// - `UnsupportedCurrencyPair` if no positive rate exists for the pair
    /// - `Infrastructure` if the store or rate source fails or times out
    pub async fn quote(&self, request: QuoteRequest) -> ApplicationResult<QuoteResponse> {
        let amount = Amount::new(request.amount).map_err(|_| invalid_amount())?;
        let top_n = request.top_n.unwrap_or(self.config.default_top_n);
        if top_n == 0 {
            return Err(ApplicationError::validation("top_n must be >= 1"));
        }
        let from = parse_currency(&request.from_currency)?;
        let to = parse_currency(&request.to_currency)?;

        let providers = self.providers.list_all().await?;
        if providers.is_empty() {
            return Err(ApplicationError::NoProvidersAvailable);
        }

        let rate = self.spot_rate(&from, &to).await?;
        let weights = self.weight_resolver.resolve(request.weights.as_ref());

        let candidates = providers
            .into_iter()
            .map(|p| {
                let fee_result = self.evaluator.evaluate(amount, rate, p.fee_rules())?;
                Ok(RankingCandidate::new(p, fee_result))
            })
            .collect::<Result<Vec<_>, ArithmeticError>>()
            .map_err(DomainError::from)?;

        let ranked = self.ranker.rank(&candidates, &weights, top_n);

        tracing::info!(
            from = %from,
            to = %to,
            amount = %amount,
            rate = %rate,
            providers = candidates.len(),
            best = ranked.first().map_or("-", |c| c.provider.code()),
            "quote ranked"
        );

        Ok(QuoteResponse {
            from_currency: from.to_string(),
            to_currency: to.to_string(),
            amount: amount.get(),
            rate: rate.get(),
            weights: weights.to_map(),
            criteria: request.criteria,
            results: ranked.iter().map(ScoredCandidateView::from).collect(),
        })
    }

    async fn spot_rate(&self, from: &CurrencyCode, to: &CurrencyCode) -> ApplicationResult<SpotRate> {
        let limit = Duration::from_millis(self.config.rate_timeout_ms);
        let table = match timeout(limit, self.rates.latest(from)).await {
            Ok(Ok(table)) => table,
            Ok(Err(RateSourceError::UnsupportedBase { .. })) => {
                return Err(ApplicationError::unsupported_pair(from.as_str(), to.as_str()));
            }
            Ok(Err(e)) => return Err(e.into()),
            Err(_) => {
                return Err(InfrastructureError::timeout(format!(
                    "rate lookup for {from} exceeded {}ms",
                    self.config.rate_timeout_ms
                ))
                .into());
            }
        };

        table
            .rate_for(to)
            .ok_or_else(|| ApplicationError::unsupported_pair(from.as_str(), to.as_str()))
    }
}

fn invalid_amount() -> ApplicationError {
    ApplicationError::validation("amount must be > 0")
}

fn parse_currency(raw: &str) -> ApplicationResult<CurrencyCode> {
    CurrencyCode::new(raw).map_err(|e| ApplicationError::validation(e.to_string()))
}
