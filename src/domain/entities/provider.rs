//! # Provider Entity
//!
//! A money-transfer provider as supplied by the provider store.
//!
//! Providers are read-only input to the ranking engine: identity, fee rules,
//! five raw quality metrics and free-text notes.
//!
//! # Examples
//!
//! ```
//! use remit_rank::domain::entities::provider::{Provider, ProviderId, QualityMetrics};
//! use remit_rank::domain::value_objects::{FeeRule, FeeRuleSet};
//! use rust_decimal::Decimal;
//!
//! let provider = Provider::new(ProviderId::new(1), "WISE", "Wise", "GB")
//!     .with_fee_rules(FeeRuleSet::new(vec![FeeRule::fixed(Decimal::new(5, 0))]).unwrap())
//!     .with_metrics(QualityMetrics::uniform(80.0))
//!     .with_notes("mid-market rate");
//!
//! assert_eq!(provider.code(), "WISE");
//! assert_eq!(provider.notes(), Some("mid-market rate"));
//! ```

use crate::domain::value_objects::enums::Criterion;
use crate::domain::value_objects::fee_rule::FeeRuleSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Provider identifier assigned by the provider store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProviderId(u64);

impl ProviderId {
    /// Wraps a raw identifier.
    #[inline]
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier.
    #[inline]
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Raw quality metrics on the store's scale (0–100 by default).
///
/// Values are externally sourced and may fall slightly outside the scale;
/// the metric normalizer clamps them.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct QualityMetrics {
    /// Trust score.
    #[serde(alias = "trust_score")]
    pub trust: f64,
    /// Service quality score.
    #[serde(alias = "service_quality")]
    pub service: f64,
    /// Customer satisfaction score.
    pub customer_satisfaction: f64,
    /// Reliability score.
    pub reliability: f64,
    /// Speed score.
    #[serde(alias = "speed_score")]
    pub speed: f64,
}

impl QualityMetrics {
    /// Creates metrics with every field set to `value`.
    #[must_use]
    pub const fn uniform(value: f64) -> Self {
        Self {
            trust: value,
            service: value,
            customer_satisfaction: value,
            reliability: value,
            speed: value,
        }
    }

    /// Returns the raw metric for a quality criterion.
    ///
    /// Returns `None` for [`Criterion::FeesFx`], which is not a quality metric.
    #[must_use]
    pub const fn get(&self, criterion: Criterion) -> Option<f64> {
        match criterion {
            Criterion::FeesFx => None,
            Criterion::Trust => Some(self.trust),
            Criterion::Service => Some(self.service),
            Criterion::CustomerSatisfaction => Some(self.customer_satisfaction),
            Criterion::Reliability => Some(self.reliability),
            Criterion::Speed => Some(self.speed),
        }
    }
}

/// A money-transfer provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provider {
    /// Store identifier.
    id: ProviderId,
    /// Short unique code, e.g. `WISE`.
    code: String,
    /// Display name.
    name: String,
    /// Country of registration.
    country: String,
    /// How the provider charges.
    #[serde(default)]
    fee_rules: FeeRuleSet,
    /// Raw quality metrics.
    #[serde(default)]
    metrics: QualityMetrics,
    /// Free-text notes shown alongside results.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    notes: Option<String>,
}

impl Provider {
    /// Creates a provider with no fees, zeroed metrics and no notes.
    #[must_use]
    pub fn new(
        id: ProviderId,
        code: impl Into<String>,
        name: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            id,
            code: code.into(),
            name: name.into(),
            country: country.into(),
            fee_rules: FeeRuleSet::default(),
            metrics: QualityMetrics::default(),
            notes: None,
        }
    }

    /// Sets the fee rules.
    #[must_use]
    pub fn with_fee_rules(mut self, fee_rules: FeeRuleSet) -> Self {
        self.fee_rules = fee_rules;
        self
    }

    /// Sets the quality metrics.
    #[must_use]
    pub fn with_metrics(mut self, metrics: QualityMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Sets the notes.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Returns the store identifier.
    #[inline]
    #[must_use]
    pub fn id(&self) -> ProviderId {
        self.id
    }

    /// Returns the provider code.
    #[inline]
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Returns the display name.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the country.
    #[inline]
    #[must_use]
    pub fn country(&self) -> &str {
        &self.country
    }

    /// Returns the fee rules.
    #[inline]
    #[must_use]
    pub fn fee_rules(&self) -> &FeeRuleSet {
        &self.fee_rules
    }

    /// Returns the raw quality metrics.
    #[inline]
    #[must_use]
    pub fn metrics(&self) -> &QualityMetrics {
        &self.metrics
    }

    /// Returns the notes, if any.
    #[inline]
    #[must_use]
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Provider({} {} [{}])", self.code, self.name, self.country)
    }
}
