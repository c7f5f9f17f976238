//! # Configuration
//!
//! Layered application settings.
//!
//! Sources, lowest precedence first:
//!
//! 1. serde defaults on every field (an empty configuration is valid)
//! 2. an optional TOML/YAML/JSON file
//! 3. environment variables prefixed `REMIT_RANK__`, e.g.
//!    `REMIT_RANK__RATES__TIMEOUT_MS=2000`
//!
//! A `.env` file in the working directory is loaded into the environment
//! first if present.

use crate::application::services::{CompositeScoreStrategy, QuoteConfig};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::services::financial_score::{FinancialScoreConfig, FinancialScorer};
use crate::domain::services::normalizer::MetricNormalizer;
use crate::domain::services::weight_resolver::WeightResolver;
use crate::domain::value_objects::enums::Criterion;
use crate::domain::value_objects::metric_scale::MetricScale;
use crate::domain::value_objects::weights::CriteriaWeights;
use crate::infrastructure::rates::{HttpExchangeRateSource, RateResult};
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "REMIT_RANK";

/// Top-level settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Ranking engine settings.
    pub ranking: RankingSettings,
    /// Exchange rate source settings.
    pub rates: RateSourceSettings,
}

impl AppConfig {
    /// Loads settings from `.env`, an optional file and the environment.
    ///
    /// `path` is passed to [`config::File::with_name`], so the extension may
    /// be omitted. A missing file is not an error.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if a source is malformed or a value has the
    /// wrong type.
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        if let Err(e) = dotenvy::dotenv() {
            tracing::debug!(error = %e, "no .env file loaded");
        }

        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::with_name(path).required(false));
        }
        let s = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        s.try_deserialize()
    }

    /// Builds the quote service configuration.
    ///
    /// The rate lookup bound covers every retry and backoff the HTTP source
    /// may perform, plus one extra timeout of slack.
    #[must_use]
    pub fn quote_config(&self) -> QuoteConfig {
        QuoteConfig::default()
            .with_default_top_n(self.ranking.default_top_n)
            .with_rate_timeout(self.rates.worst_case_ms())
    }
}

/// Ranking engine settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingSettings {
    /// Result limit when a request omits `top_n`.
    pub default_top_n: usize,
    /// Raw range of provider quality metrics.
    pub metric_scale: MetricScale,
    /// Financial sub-score coefficients.
    pub financial: FinancialScoreConfig,
    /// Default criteria weights, renormalised on use.
    pub default_weights: BTreeMap<Criterion, f64>,
}

impl Default for RankingSettings {
    fn default() -> Self {
        Self {
            default_top_n: 3,
            metric_scale: MetricScale::default(),
            financial: FinancialScoreConfig::default(),
            default_weights: CriteriaWeights::default().to_map(),
        }
    }
}

impl RankingSettings {
    /// Validates the settings.
    ///
    /// # Errors
    ///
    /// Returns a `DomainError` describing the first invalid field.
    pub fn validate(&self) -> DomainResult<()> {
        if self.default_top_n == 0 {
            return Err(DomainError::InvalidScoringConfig(
                "default_top_n must be >= 1".to_string(),
            ));
        }
        self.financial.validate()?;
        CriteriaWeights::normalized(&self.default_weights)?;
        Ok(())
    }

    /// Builds the weight resolver holding the configured defaults.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidWeights` if the defaults are negative,
    /// non-finite or sum to zero.
    pub fn weight_resolver(&self) -> DomainResult<WeightResolver> {
        CriteriaWeights::normalized(&self.default_weights).map(WeightResolver::new)
    }

    /// Builds the composite ranking strategy.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidScoringConfig` if the financial
    /// coefficients are invalid.
    pub fn strategy(&self) -> DomainResult<CompositeScoreStrategy> {
        let scorer = FinancialScorer::new(self.financial)?;
        Ok(CompositeScoreStrategy::new(
            MetricNormalizer::new(self.metric_scale),
            scorer,
        ))
    }
}

/// Exchange rate source settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateSourceSettings {
    /// API root serving `GET /latest?base=XXX`.
    pub base_url: String,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Linear backoff unit in milliseconds.
    pub retry_backoff_ms: u64,
}

impl Default for RateSourceSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.exchangerate.host".to_string(),
            timeout_ms: 5000,
            max_retries: 2,
            retry_backoff_ms: 200,
        }
    }
}

impl RateSourceSettings {
    /// Builds the HTTP rate source.
    ///
    /// # Errors
    ///
    /// Returns `RateSourceError::Internal` if the HTTP client cannot be built.
    pub fn http_source(&self) -> RateResult<HttpExchangeRateSource> {
        Ok(HttpExchangeRateSource::new(&self.base_url, self.timeout_ms)?
            .with_retries(self.max_retries, self.retry_backoff_ms))
    }

    /// Longest a lookup can take: every attempt timing out, every backoff
    /// served, plus one timeout of slack.
    #[must_use]
    pub fn worst_case_ms(&self) -> u64 {
        let retries = u64::from(self.max_retries);
        let attempts = retries.saturating_add(2);
        let backoff_units = retries.saturating_mul(retries.saturating_add(1)) / 2;
        self.timeout_ms
            .saturating_mul(attempts)
            .saturating_add(self.retry_backoff_ms.saturating_mul(backoff_units))
    }
}
