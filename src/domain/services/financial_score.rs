//! # Financial Sub-Scorer
//!
//! Scores a provider's landing amount and fees relative to the best values
//! observed in the same request.
//!
//! # Formula
//!
//! ```text
//! landing_ratio = clamp01(landing / best_landing)        (neutral if best_landing == 0)
//! fee_ratio     = clamp01(best_fees / max(fees, epsilon))
//! score         = (lw × landing_ratio + fw × fee_ratio) / (lw + fw)
//! ```
//!
//! Both ratios are formed in `Decimal` and converted to `f64` exactly once
//! here; everything downstream of this module is `f64` scoring math.

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::services::fee_model::FeeModelResult;
use crate::domain::value_objects::arithmetic::CheckedArithmetic;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tunable coefficients of the financial sub-score.
///
/// # Examples
///
/// ```
/// use remit_rank::domain::services::financial_score::FinancialScoreConfig;
///
/// let config = FinancialScoreConfig::default();
/// assert_eq!(config.landing_weight, 0.5);
/// assert_eq!(config.fee_weight, 0.5);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinancialScoreConfig {
    /// Weight of the landing ratio.
    pub landing_weight: f64,
    /// Weight of the fee ratio.
    pub fee_weight: f64,
    /// Floor applied to a provider's fees before dividing.
    pub epsilon: Decimal,
    /// Landing ratio used when no provider lands a positive amount.
    pub neutral_landing_ratio: f64,
    /// Fee baseline used when no provider charges a positive fee.
    pub fee_baseline_fallback: Decimal,
}

impl Default for FinancialScoreConfig {
    fn default() -> Self {
        Self {
            landing_weight: 0.5,
            fee_weight: 0.5,
            epsilon: Decimal::new(1, 9),
            neutral_landing_ratio: 0.5,
            fee_baseline_fallback: Decimal::ONE,
        }
    }
}

impl FinancialScoreConfig {
    /// Checks coefficient ranges.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidScoringConfig` if a blend weight is
    /// negative or non-finite, both blend weights are zero, the neutral
    /// ratio is outside `[0, 1]`, or `epsilon` / the fee fallback are not
    /// strictly positive.
    pub fn validate(&self) -> DomainResult<()> {
        let weights_ok = [self.landing_weight, self.fee_weight]
            .iter()
            .all(|w| w.is_finite() && *w >= 0.0);
        if !weights_ok || self.landing_weight + self.fee_weight <= 0.0 {
            return Err(DomainError::InvalidScoringConfig(format!(
                "blend weights must be >= 0 and not both zero, got landing={} fee={}",
                self.landing_weight, self.fee_weight
            )));
        }
        if !(0.0..=1.0).contains(&self.neutral_landing_ratio) {
            return Err(DomainError::InvalidScoringConfig(format!(
                "neutral_landing_ratio must be within [0, 1], got {}",
                self.neutral_landing_ratio
            )));
        }
        if self.epsilon <= Decimal::ZERO || self.fee_baseline_fallback <= Decimal::ZERO {
            return Err(DomainError::InvalidScoringConfig(
                "epsilon and fee_baseline_fallback must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Best landing and lowest fees across one request's candidate pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeBaselines {
    /// Highest landing amount (0 for an empty pool).
    pub best_landing: Decimal,
    /// Lowest fee, or the lowest positive fee if some provider is free, or
    /// the configured fallback if none charges a positive fee.
    pub best_fees: Decimal,
}

impl FeeBaselines {
    /// Computes the baselines for a candidate pool.
    ///
    /// # Examples
    ///
    /// ```
    /// use remit_rank::domain::services::fee_model::FeeModelResult;
    /// use remit_rank::domain::services::financial_score::FeeBaselines;
    /// use rust_decimal::Decimal;
    ///
    /// let result = |landing: i64, fees: i64| FeeModelResult {
    ///     landing: Decimal::new(landing, 0),
    ///     effective_rate: Decimal::ONE,
    ///     total_fees: Decimal::new(fees, 0),
    ///     fee_breakdown: vec![],
    /// };
    /// let pool = [result(990, 0), result(995, 5), result(980, 3)];
    /// let baselines = FeeBaselines::from_results(pool.iter(), Decimal::ONE);
    ///
    /// assert_eq!(baselines.best_landing, Decimal::new(995, 0));
    /// // A free provider exists, so the lowest positive fee is the baseline.
    /// assert_eq!(baselines.best_fees, Decimal::new(3, 0));
    /// ```
    pub fn from_results<'a, I>(results: I, fee_fallback: Decimal) -> Self
    where
        I: IntoIterator<Item = &'a FeeModelResult>,
    {
        let mut best_landing = Decimal::ZERO;
        let mut min_fee: Option<Decimal> = None;
        let mut min_positive_fee: Option<Decimal> = None;

        for r in results {
            best_landing = best_landing.max(r.landing);
            min_fee = Some(min_fee.map_or(r.total_fees, |m| m.min(r.total_fees)));
            if r.total_fees > Decimal::ZERO {
                min_positive_fee =
                    Some(min_positive_fee.map_or(r.total_fees, |m| m.min(r.total_fees)));
            }
        }

        let best_fees = match min_fee {
            Some(fee) if fee > Decimal::ZERO => fee,
            _ => min_positive_fee.unwrap_or(fee_fallback),
        };

        Self {
            best_landing,
            best_fees,
        }
    }

    /// Returns true if no candidate lands a positive amount.
    #[must_use]
    pub fn landing_is_degenerate(&self) -> bool {
        self.best_landing <= Decimal::ZERO
    }
}

impl fmt::Display for FeeBaselines {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FeeBaselines(best_landing={}, best_fees={})",
            self.best_landing, self.best_fees
        )
    }
}

/// Computes the financial sub-score of a candidate.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FinancialScorer {
    config: FinancialScoreConfig,
}

impl FinancialScorer {
    /// Creates a scorer.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidScoringConfig` if the config is invalid.
    pub fn new(config: FinancialScoreConfig) -> DomainResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &FinancialScoreConfig {
        &self.config
    }

    /// Scores one candidate against the pool baselines. Always in `[0, 1]`.
    ///
    /// # Examples
    ///
    /// ```
    /// use remit_rank::domain::services::financial_score::{FeeBaselines, FinancialScorer};
    /// use rust_decimal::Decimal;
    ///
    /// let scorer = FinancialScorer::default();
    /// let baselines = FeeBaselines {
    ///     best_landing: Decimal::new(1000, 0),
    ///     best_fees: Decimal::new(2, 0),
    /// };
    ///
    /// let best = scorer.score(Decimal::new(1000, 0), Decimal::new(2, 0), &baselines);
    /// assert!((best - 1.0).abs() < 1e-12);
    ///
    /// let worse = scorer.score(Decimal::new(900, 0), Decimal::new(4, 0), &baselines);
    /// assert!((worse - 0.7).abs() < 1e-12);
    /// ```
    #[must_use]
    pub fn score(&self, landing: Decimal, fees: Decimal, baselines: &FeeBaselines) -> f64 {
        let landing_ratio = if baselines.landing_is_degenerate() {
            self.config.neutral_landing_ratio
        } else {
            unit_ratio(landing, baselines.best_landing)
        };

        let fee_floor = fees.max(self.config.epsilon);
        let fee_ratio = unit_ratio(baselines.best_fees, fee_floor);

        let FinancialScoreConfig {
            landing_weight,
            fee_weight,
            ..
        } = self.config;
        let blended =
            (landing_weight * landing_ratio + fee_weight * fee_ratio) / (landing_weight + fee_weight);
        blended.clamp(0.0, 1.0)
    }
}

/// `numerator / denominator` clamped into `[0, 1]` and converted to `f64`.
///
/// A zero denominator or a quotient too large to represent saturates at 1.
fn unit_ratio(numerator: Decimal, denominator: Decimal) -> f64 {
    if denominator.is_sign_negative() {
        return 1.0;
    }
    numerator
        .safe_div(denominator)
        .map_or(Decimal::ONE, |q| q.clamp(Decimal::ZERO, Decimal::ONE))
        .to_f64()
        .unwrap_or(0.0)
}
