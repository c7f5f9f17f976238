//! # Criteria Weights
//!
//! A complete, non-negative weight distribution over every [`Criterion`].
//!
//! # Invariants
//!
//! - Every criterion has an entry
//! - Every weight is finite and `>= 0`
//! - Weights sum to 1 (within floating tolerance)
//!
//! # Examples
//!
//! ```
//! use remit_rank::domain::value_objects::enums::Criterion;
//! use remit_rank::domain::value_objects::weights::CriteriaWeights;
//! use std::collections::BTreeMap;
//!
//! let defaults = CriteriaWeights::default();
//! assert!((defaults.get(Criterion::FeesFx) - 0.5).abs() < 1e-12);
//!
//! let raw = BTreeMap::from([(Criterion::Trust, 2.0), (Criterion::Speed, 2.0)]);
//! let weights = CriteriaWeights::normalized(&raw).unwrap();
//! assert!((weights.get(Criterion::Trust) - 0.5).abs() < 1e-12);
//! assert_eq!(weights.get(Criterion::FeesFx), 0.0);
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::enums::Criterion;
use schemars::JsonSchema;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Tolerance used when checking that weights sum to 1.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Resolved per-criterion weights.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
#[serde(transparent)]
pub struct CriteriaWeights(BTreeMap<Criterion, f64>);

impl CriteriaWeights {
    /// Builds a distribution by dividing each raw weight by the total.
    ///
    /// Criteria missing from `raw` get weight 0.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidWeights` if any weight is negative or
    /// non-finite, or if the weights sum to zero.
    pub fn normalized(raw: &BTreeMap<Criterion, f64>) -> DomainResult<Self> {
        if let Some((c, w)) = raw.iter().find(|(_, w)| !w.is_finite() || **w < 0.0) {
            return Err(DomainError::InvalidWeights(format!(
                "weight for {c} must be finite and >= 0, got {w}"
            )));
        }

        // Scale by the largest weight first so the total cannot overflow.
        let largest = raw.values().copied().fold(0.0_f64, f64::max);
        if largest <= 0.0 {
            return Err(DomainError::InvalidWeights(
                "weights must not sum to zero".to_string(),
            ));
        }
        let total: f64 = raw.values().map(|w| w / largest).sum();

        let weights = Criterion::ALL
            .iter()
            .map(|c| (*c, raw.get(c).copied().unwrap_or(0.0) / largest / total))
            .collect();
        Ok(Self(weights))
    }

    /// Returns the weight for a criterion.
    #[inline]
    #[must_use]
    pub fn get(&self, criterion: Criterion) -> f64 {
        self.0.get(&criterion).copied().unwrap_or(0.0)
    }

    /// Returns the sum of all weights.
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.0.values().sum()
    }

    /// Iterates over `(criterion, weight)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Criterion, f64)> + '_ {
        self.0.iter().map(|(c, w)| (*c, *w))
    }

    /// Returns the weights as a plain map, e.g. to merge overrides into.
    #[must_use]
    pub fn to_map(&self) -> BTreeMap<Criterion, f64> {
        self.0.clone()
    }
}

impl Default for CriteriaWeights {
    /// fees_fx 0.5, trust 0.15, service 0.15, customer_satisfaction 0.10,
    /// reliability 0.06, speed 0.04.
    fn default() -> Self {
        Self(BTreeMap::from([
            (Criterion::FeesFx, 0.5),
            (Criterion::Trust, 0.15),
            (Criterion::Service, 0.15),
            (Criterion::CustomerSatisfaction, 0.10),
            (Criterion::Reliability, 0.06),
            (Criterion::Speed, 0.04),
        ]))
    }
}

impl fmt::Display for CriteriaWeights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CriteriaWeights(")?;
        for (i, (c, w)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{c}={w:.4}")?;
        }
        write!(f, ")")
    }
}
