//! # Fee Rules
//!
//! Declarative description of how a provider charges for a transfer.
//!
//! A provider's [`FeeRuleSet`] is an ordered list of [`FeeRule`] variants.
//! Fee-producing rules contribute one named entry to the fee breakdown;
//! `fx_margin` rules instead widen the spread applied to the spot rate.
//!
//! # Wire Format
//!
//! ```json
//! [
//!   { "kind": "fixed", "amount": "4.99" },
//!   { "kind": "clamped", "rule": { "kind": "percentage", "rate": "0.005" }, "min": "1", "max": "25" },
//!   { "kind": "fx_margin", "rate": "0.0035" }
//! ]
//! ```
//!
//! # Examples
//!
//! ```
//! use remit_rank::domain::value_objects::fee_rule::{FeeRule, FeeRuleSet};
//! use rust_decimal::Decimal;
//!
//! let rules = FeeRuleSet::new(vec![
//!     FeeRule::fixed(Decimal::new(5, 0)),
//!     FeeRule::fx_margin(Decimal::new(1, 2)),
//! ])
//! .unwrap();
//! assert_eq!(rules.len(), 2);
//!
//! assert!(FeeRuleSet::new(vec![FeeRule::fixed(Decimal::new(-1, 0))]).is_err());
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Breakdown name for fixed fees.
pub const FIXED_FEE: &str = "fixed_fee";
/// Breakdown name for percentage fees.
pub const PERCENTAGE_FEE: &str = "percentage_fee";
/// Name used for fx margin rules in logs and errors.
pub const FX_MARGIN: &str = "fx_margin";

/// A single fee rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FeeRule {
    /// Flat fee in the source currency.
    Fixed {
        /// Fee amount (`>= 0`).
        amount: Decimal,
        /// Optional breakdown name; defaults to `fixed_fee`.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },
    /// Fee proportional to the transfer amount.
    Percentage {
        /// Fraction of the amount, `0.01` = 1% (`0 <= rate <= 1`).
        rate: Decimal,
        /// Optional breakdown name; defaults to `percentage_fee`.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },
    /// Spread applied to the spot rate.
    FxMargin {
        /// Fraction taken off the spot rate (`0 <= rate < 1`).
        rate: Decimal,
    },
    /// Inner rule with its computed value clamped into `[min, max]`.
    ///
    /// For an inner fee rule the fee amount is clamped; for an inner
    /// `fx_margin` the margin fraction is clamped.
    Clamped {
        /// The wrapped rule.
        rule: Box<FeeRule>,
        /// Lower bound.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<Decimal>,
        /// Upper bound.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<Decimal>,
    },
}

impl FeeRule {
    /// Creates an unlabelled fixed fee rule.
    #[must_use]
    pub fn fixed(amount: Decimal) -> Self {
        Self::Fixed {
            amount,
            label: None,
        }
    }

    /// Creates an unlabelled percentage fee rule.
    #[must_use]
    pub fn percentage(rate: Decimal) -> Self {
        Self::Percentage { rate, label: None }
    }

    /// Creates an fx margin rule.
    #[must_use]
    pub fn fx_margin(rate: Decimal) -> Self {
        Self::FxMargin { rate }
    }

    /// Wraps a rule with clamping bounds.
    #[must_use]
    pub fn clamped(rule: FeeRule, min: Option<Decimal>, max: Option<Decimal>) -> Self {
        Self::Clamped {
            rule: Box::new(rule),
            min,
            max,
        }
    }

    /// Returns the name this rule contributes to a fee breakdown.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Fixed { label, .. } => label.as_deref().unwrap_or(FIXED_FEE),
            Self::Percentage { label, .. } => label.as_deref().unwrap_or(PERCENTAGE_FEE),
            Self::FxMargin { .. } => FX_MARGIN,
            Self::Clamped { rule, .. } => rule.name(),
        }
    }

    /// Returns true if this rule adjusts the rate rather than charging a fee.
    #[must_use]
    pub fn is_fx_margin(&self) -> bool {
        match self {
            Self::FxMargin { .. } => true,
            Self::Clamped { rule, .. } => rule.is_fx_margin(),
            Self::Fixed { .. } | Self::Percentage { .. } => false,
        }
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidFeeRule` describing the first violation.
    pub fn validate(&self) -> DomainResult<()> {
        match self {
            Self::Fixed { amount, .. } => {
                if amount.is_sign_negative() {
                    return Err(invalid(format!("{} must be >= 0, got {amount}", self.name())));
                }
            }
            Self::Percentage { rate, .. } => {
                if rate.is_sign_negative() || *rate > Decimal::ONE {
                    return Err(invalid(format!(
                        "{} rate must be within [0, 1], got {rate}",
                        self.name()
                    )));
                }
            }
            Self::FxMargin { rate } => {
                if rate.is_sign_negative() || *rate >= Decimal::ONE {
                    return Err(invalid(format!(
                        "{FX_MARGIN} rate must be within [0, 1), got {rate}"
                    )));
                }
            }
            Self::Clamped { rule, min, max } => {
                rule.validate()?;
                for bound in [min, max].into_iter().flatten() {
                    if bound.is_sign_negative() {
                        return Err(invalid(format!("clamp bound must be >= 0, got {bound}")));
                    }
                }
                if let (Some(lo), Some(hi)) = (min, max) {
                    if lo > hi {
                        return Err(invalid(format!("clamp min {lo} exceeds max {hi}")));
                    }
                }
                if rule.is_fx_margin()
                    && [min, max].into_iter().flatten().any(|b| *b >= Decimal::ONE)
                {
                    return Err(invalid(format!("{FX_MARGIN} clamp bounds must be < 1")));
                }
            }
        }
        Ok(())
    }
}

fn invalid(message: String) -> DomainError {
    DomainError::InvalidFeeRule(message)
}

impl fmt::Display for FeeRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed { amount, .. } => write!(f, "{}({amount})", self.name()),
            Self::Percentage { rate, .. } => write!(f, "{}({rate})", self.name()),
            Self::FxMargin { rate } => write!(f, "{FX_MARGIN}({rate})"),
            Self::Clamped { rule, min, max } => {
                write!(f, "clamp({rule}")?;
                if let Some(lo) = min {
                    write!(f, ", min={lo}")?;
                }
                if let Some(hi) = max {
                    write!(f, ", max={hi}")?;
                }
                write!(f, ")")
            }
        }
    }
}

/// A validated, ordered list of fee rules.
///
/// The rule order is the order of the resulting fee breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<FeeRule>", into = "Vec<FeeRule>")]
pub struct FeeRuleSet(Vec<FeeRule>);

impl FeeRuleSet {
    /// Creates a rule set, validating every rule.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidFeeRule` if any rule is out of range.
    pub fn new(rules: Vec<FeeRule>) -> DomainResult<Self> {
        for rule in &rules {
            rule.validate()?;
        }
        Ok(Self(rules))
    }

    /// Returns the rules in order.
    #[must_use]
    pub fn rules(&self) -> &[FeeRule] {
        &self.0
    }

    /// Returns the number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the provider charges nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<Vec<FeeRule>> for FeeRuleSet {
    type Error = DomainError;

    fn try_from(rules: Vec<FeeRule>) -> Result<Self, Self::Error> {
        Self::new(rules)
    }
}

impl From<FeeRuleSet> for Vec<FeeRule> {
    fn from(set: FeeRuleSet) -> Self {
        set.0
    }
}
