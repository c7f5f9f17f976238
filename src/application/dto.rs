//! # Data Transfer Objects
//!
//! Request and response contracts of the quote service.
//!
//! Both contracts derive [`JsonSchema`] so their schemas can be exported for
//! downstream consumers.
//!
//! # Examples
//!
//! ```
//! use remit_rank::application::dto::QuoteRequest;
//!
//! let request: QuoteRequest = serde_json::from_str(
//!     r#"{"from_currency": "usd", "to_currency": "eur", "amount": "1000"}"#,
//! )
//! .unwrap();
//!
//! assert_eq!(request.criteria, vec!["best_landing", "lowest_fees"]);
//! assert_eq!(request.top_n, None);
//! ```

use crate::application::services::ranking_strategy::ScoredCandidate;
pub use crate::application::services::ranking_strategy::{SCORE_DECIMALS, round_score};
use crate::domain::services::fee_model::FeeComponent;
use crate::domain::value_objects::enums::Criterion;
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

fn default_criteria() -> Vec<String> {
    vec!["best_landing".to_string(), "lowest_fees".to_string()]
}

/// A request to rank providers for one transfer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct QuoteRequest {
    /// Source currency, case-insensitive.
    pub from_currency: String,
    /// Target currency, case-insensitive.
    pub to_currency: String,
    /// Amount to send in the source currency. Must be positive.
    #[schemars(with = "String")]
    pub amount: Decimal,
    /// Free-form criteria labels, echoed in the response.
    #[serde(default = "default_criteria")]
    pub criteria: Vec<String>,
    /// Maximum number of results. Defaults to the configured value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_n: Option<usize>,
    /// Partial weight overrides keyed by criterion name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weights: Option<BTreeMap<String, f64>>,
}

impl QuoteRequest {
    /// Creates a request with default criteria, `top_n` and weights.
    #[must_use]
    pub fn new(from: impl Into<String>, to: impl Into<String>, amount: Decimal) -> Self {
        Self {
            from_currency: from.into(),
            to_currency: to.into(),
            amount,
            criteria: default_criteria(),
            top_n: None,
            weights: None,
        }
    }

    /// Sets the result limit.
    #[must_use]
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = Some(top_n);
        self
    }

    /// Sets weight overrides.
    #[must_use]
    pub fn with_weights(mut self, weights: BTreeMap<String, f64>) -> Self {
        self.weights = Some(weights);
        self
    }

    /// Sets the criteria labels.
    #[must_use]
    pub fn with_criteria(mut self, criteria: Vec<String>) -> Self {
        self.criteria = criteria;
        self
    }
}

/// One ranked provider as presented to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ScoredCandidateView {
    /// Provider store identifier.
    pub provider_id: u64,
    /// Provider code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Country of registration.
    pub country: String,
    /// 1-based rank.
    pub rank: usize,
    /// Amount received in the target currency.
    #[schemars(with = "String")]
    pub landing: Decimal,
    /// Rate after fx margins.
    #[schemars(with = "String")]
    pub effective_rate: Decimal,
    /// Total fees in the source currency.
    #[schemars(with = "String")]
    pub fees: Decimal,
    /// Ordered fee components.
    pub fee_breakdown: Vec<FeeComponent>,
    /// Per-criterion scores.
    pub component_scores: BTreeMap<Criterion, f64>,
    /// Weighted composite.
    pub composite_score: f64,
    /// Provider notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl From<&ScoredCandidate> for ScoredCandidateView {
    fn from(c: &ScoredCandidate) -> Self {
        let component_scores = Criterion::ALL
            .iter()
            .map(|&criterion| (criterion, round_score(c.components.get(criterion))))
            .collect();
        Self {
            provider_id: c.provider.id().get(),
            code: c.provider.code().to_string(),
            name: c.provider.name().to_string(),
            country: c.provider.country().to_string(),
            rank: c.rank,
            landing: c.fee_result.landing,
            effective_rate: c.fee_result.effective_rate,
            fees: c.fee_result.total_fees,
            fee_breakdown: c.fee_result.fee_breakdown.clone(),
            component_scores,
            composite_score: round_score(c.composite),
            notes: c.provider.notes().map(str::to_string),
        }
    }
}

/// Ranked providers for one transfer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct QuoteResponse {
    /// Normalised source currency.
    #[serde(rename = "from")]
    pub from_currency: String,
    /// Normalised target currency.
    #[serde(rename = "to")]
    pub to_currency: String,
    /// Amount to send.
    #[schemars(with = "String")]
    pub amount: Decimal,
    /// Spot rate used.
    #[schemars(with = "String")]
    pub rate: Decimal,
    /// Resolved weights.
    pub weights: BTreeMap<Criterion, f64>,
    /// Criteria labels from the request.
    pub criteria: Vec<String>,
    /// Ranked results, best first.
    pub results: Vec<ScoredCandidateView>,
}

impl QuoteResponse {
    /// Returns the best result, if any.
    #[must_use]
    pub fn best(&self) -> Option<&ScoredCandidateView> {
        self.results.first()
    }
}
