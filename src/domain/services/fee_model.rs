//! # Fee Model Evaluator
//!
//! Applies a provider's [`FeeRuleSet`] to a transfer.
//!
//! # Landing Formula
//!
//! ```text
//! effective_rate = spot_rate × max(0, 1 − Σ fx_margin)
//! total_fees     = Σ fee_breakdown
//! landing        = max(0, amount − total_fees) × effective_rate
//! ```
//!
//! Fees are charged in the source currency and subtracted before
//! conversion, for every provider alike. Percentage fees are always
//! computed on the raw amount.
//!
//! # Examples
//!
//! ```
//! use remit_rank::domain::services::fee_model::FeeModelEvaluator;
//! use remit_rank::domain::value_objects::{Amount, FeeRule, FeeRuleSet, SpotRate};
//! use rust_decimal::Decimal;
//!
//! let rules = FeeRuleSet::new(vec![FeeRule::fixed(Decimal::new(5, 0))]).unwrap();
//! let result = FeeModelEvaluator::new()
//!     .evaluate(
//!         Amount::new(Decimal::new(1000, 0)).unwrap(),
//!         SpotRate::new(Decimal::new(110, 2)).unwrap(),
//!         &rules,
//!     )
//!     .unwrap();
//!
//! assert_eq!(result.total_fees, Decimal::new(5, 0));
//! assert_eq!(result.landing, Decimal::new(10945, 1));
//! ```

use crate::domain::value_objects::arithmetic::{
    ArithmeticResult, CheckedArithmetic, clamp_decimal, safe_sum,
};
use crate::domain::value_objects::fee_rule::{FeeRule, FeeRuleSet};
use crate::domain::value_objects::money::{Amount, SpotRate};
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One named entry of a fee breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FeeComponent {
    /// Component name, e.g. `fixed_fee`.
    pub name: String,
    /// Amount in the source currency.
    #[schemars(with = "String")]
    pub amount: Decimal,
}

impl FeeComponent {
    /// Creates a fee component.
    #[must_use]
    pub fn new(name: impl Into<String>, amount: Decimal) -> Self {
        Self {
            name: name.into(),
            amount,
        }
    }
}

/// Outcome of applying a fee rule set to one transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeModelResult {
    /// Amount the recipient receives, in the target currency.
    pub landing: Decimal,
    /// Rate applied after fx margins.
    pub effective_rate: Decimal,
    /// Sum of the breakdown, in the source currency.
    pub total_fees: Decimal,
    /// Ordered fee components.
    pub fee_breakdown: Vec<FeeComponent>,
}

impl fmt::Display for FeeModelResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FeeModelResult(landing={}, rate={}, fees={})",
            self.landing, self.effective_rate, self.total_fees
        )
    }
}

/// What a single rule contributes.
enum RuleEffect {
    Fee(Decimal),
    Margin(Decimal),
}

/// Stateless fee model evaluator.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeeModelEvaluator;

impl FeeModelEvaluator {
    /// Creates an evaluator.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Computes landing amount, effective rate and fees for one provider.
    ///
    /// # Errors
    ///
    /// Returns an `ArithmeticError` only if decimal arithmetic overflows.
    pub fn evaluate(
        &self,
        amount: Amount,
        spot_rate: SpotRate,
        fee_rules: &FeeRuleSet,
    ) -> ArithmeticResult<FeeModelResult> {
        let amount = amount.get();
        let mut fee_breakdown = Vec::with_capacity(fee_rules.len());
        let mut margin = Decimal::ZERO;

        for rule in fee_rules.rules() {
            match apply(rule, amount)? {
                RuleEffect::Fee(fee) => {
                    fee_breakdown.push(FeeComponent::new(rule.name(), fee.normalize()));
                }
                RuleEffect::Margin(m) => margin = margin.safe_add(m)?,
            }
        }

        let total_fees = safe_sum(fee_breakdown.iter().map(|c| c.amount))?;
        let rate_factor = Decimal::ONE.safe_sub(margin)?.max(Decimal::ZERO);
        let effective_rate = spot_rate.get().safe_mul(rate_factor)?;
        let net = amount.safe_sub(total_fees)?.max(Decimal::ZERO);
        let landing = net.safe_mul(effective_rate)?;

        Ok(FeeModelResult {
            landing: landing.normalize(),
            effective_rate: effective_rate.normalize(),
            total_fees: total_fees.normalize(),
            fee_breakdown,
        })
    }
}

fn apply(rule: &FeeRule, amount: Decimal) -> ArithmeticResult<RuleEffect> {
    Ok(match rule {
        FeeRule::Fixed { amount: fee, .. } => RuleEffect::Fee(*fee),
        FeeRule::Percentage { rate, .. } => RuleEffect::Fee(rate.safe_mul(amount)?),
        FeeRule::FxMargin { rate } => RuleEffect::Margin(*rate),
        FeeRule::Clamped { rule, min, max } => match apply(rule, amount)? {
            RuleEffect::Fee(fee) => RuleEffect::Fee(clamp_decimal(fee, *min, *max)),
            RuleEffect::Margin(m) => RuleEffect::Margin(clamp_decimal(m, *min, *max)),
        },
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn eval(amount: &str, rate: &str, rules: Vec<FeeRule>) -> FeeModelResult {
        FeeModelEvaluator::new()
            .evaluate(
                Amount::new(dec(amount)).unwrap(),
                SpotRate::new(dec(rate)).unwrap(),
                &FeeRuleSet::new(rules).unwrap(),
            )
            .unwrap()
    }

    #[test]
    fn no_rules_converts_at_spot() {
        let r = eval("1000", "1.10", vec![]);
        assert_eq!(r.landing, dec("1100"));
        assert_eq!(r.effective_rate, dec("1.1"));
        assert_eq!(r.total_fees, Decimal::ZERO);
        assert!(r.fee_breakdown.is_empty());
    }

    #[test]
    fn fixed_fee_subtracted_before_conversion() {
        let r = eval("1000", "1.10", vec![FeeRule::fixed(dec("5"))]);
        assert_eq!(r.landing, dec("1094.5"));
        assert_eq!(r.fee_breakdown, vec![FeeComponent::new("fixed_fee", dec("5"))]);
    }

    #[test]
    fn fx_margin_reduces_effective_rate() {
        let r = eval("1000", "1.10", vec![FeeRule::fx_margin(dec("0.01"))]);
        assert_eq!(r.effective_rate, dec("1.089"));
        assert_eq!(r.landing, dec("1089"));
        assert_eq!(r.total_fees, Decimal::ZERO);
    }

    #[test]
    fn percentage_fee_on_raw_amount() {
        let r = eval("200", "2", vec![FeeRule::percentage(dec("0.015"))]);
        assert_eq!(r.total_fees, dec("3"));
        assert_eq!(r.landing, dec("394"));
    }

    #[test]
    fn clamped_percentage_respects_min_and_max() {
        let rule = FeeRule::clamped(
            FeeRule::percentage(dec("0.01")),
            Some(dec("2")),
            Some(dec("10")),
        );
        assert_eq!(eval("50", "1", vec![rule.clone()]).total_fees, dec("2"));
        assert_eq!(eval("500", "1", vec![rule.clone()]).total_fees, dec("5"));
        assert_eq!(eval("5000", "1", vec![rule]).total_fees, dec("10"));
    }

    #[test]
    fn clamped_margin_caps_spread() {
        let rule = FeeRule::clamped(FeeRule::fx_margin(dec("0.05")), None, Some(dec("0.02")));
        let r = eval("100", "1", vec![rule]);
        assert_eq!(r.effective_rate, dec("0.98"));
    }

    #[test]
    fn multiple_margins_accumulate() {
        let r = eval(
            "100",
            "2",
            vec![FeeRule::fx_margin(dec("0.01")), FeeRule::fx_margin(dec("0.02"))],
        );
        assert_eq!(r.effective_rate, dec("1.94"));
    }

    #[test]
    fn fees_exceeding_amount_clamp_landing_to_zero() {
        let r = eval("10", "1.5", vec![FeeRule::fixed(dec("25"))]);
        assert_eq!(r.landing, Decimal::ZERO);
        assert_eq!(r.total_fees, dec("25"));
    }

    #[test]
    fn margins_summing_past_one_floor_rate_at_zero() {
        let r = eval(
            "100",
            "1",
            vec![FeeRule::fx_margin(dec("0.6")), FeeRule::fx_margin(dec("0.6"))],
        );
        assert_eq!(r.effective_rate, Decimal::ZERO);
        assert_eq!(r.landing, Decimal::ZERO);
    }

    #[test]
    fn breakdown_preserves_rule_order_and_sums_to_total() {
        let r = eval(
            "1000",
            "1",
            vec![
                FeeRule::percentage(dec("0.002")),
                FeeRule::fx_margin(dec("0.01")),
                FeeRule::fixed(dec("1.25")),
            ],
        );
        assert_eq!(r.fee_breakdown.len(), 2);
        assert_eq!(r.fee_breakdown[0].name, "percentage_fee");
        assert_eq!(r.fee_breakdown[1].name, "fixed_fee");
        let sum: Decimal = r.fee_breakdown.iter().map(|c| c.amount).sum();
        assert_eq!(sum, r.total_fees);
        assert_eq!(r.total_fees, dec("3.25"));
    }
}
