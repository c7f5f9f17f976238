//! # Weight Resolver
//!
//! Merges caller-supplied criteria weights over the configured defaults and
//! renormalises the result to sum to 1.
//!
//! # Resolution Rules
//!
//! - No overrides (or an empty map): the defaults pass through unchanged
//! - Recognised keys replace the default for that criterion
//! - Unrecognised keys are dropped
//! - Negative or non-finite values count as 0
//! - A merged total of 0 falls back to the defaults
//!
//! # Examples
//!
//! ```
//! use remit_rank::domain::services::weight_resolver::WeightResolver;
//! use remit_rank::domain::value_objects::{CriteriaWeights, Criterion};
//! use std::collections::BTreeMap;
//!
//! let resolver = WeightResolver::new(CriteriaWeights::default());
//! let overrides = BTreeMap::from([("fees_fx".to_string(), 0.0)]);
//! let weights = resolver.resolve(Some(&overrides));
//!
//! assert_eq!(weights.get(Criterion::FeesFx), 0.0);
//! assert!((weights.get(Criterion::Trust) - 0.3).abs() < 1e-9);
//! assert!((weights.sum() - 1.0).abs() < 1e-9);
//! ```

use crate::domain::value_objects::enums::Criterion;
use crate::domain::value_objects::weights::CriteriaWeights;
use std::collections::BTreeMap;
use std::str::FromStr;

/// Resolves per-request weights against injected defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeightResolver {
    defaults: CriteriaWeights,
}

impl WeightResolver {
    /// Creates a resolver with the given defaults.
    #[must_use]
    pub fn new(defaults: CriteriaWeights) -> Self {
        Self { defaults }
    }

    /// Returns the defaults.
    #[must_use]
    pub fn defaults(&self) -> &CriteriaWeights {
        &self.defaults
    }

    /// Resolves a caller's partial weight map into a full distribution.
    #[must_use]
    pub fn resolve(&self, overrides: Option<&BTreeMap<String, f64>>) -> CriteriaWeights {
        let Some(overrides) = overrides.filter(|o| !o.is_empty()) else {
            return self.defaults.clone();
        };

        let mut merged = self.defaults.to_map();
        for (key, value) in overrides {
            let Ok(criterion) = Criterion::from_str(key) else {
                tracing::debug!(key = %key, "ignoring unknown weight key");
                continue;
            };
            let weight = if value.is_finite() && *value >= 0.0 {
                *value
            } else {
                tracing::debug!(criterion = %criterion, value = %value, "weight clamped to 0");
                0.0
            };
            merged.insert(criterion, weight);
        }

        match CriteriaWeights::normalized(&merged) {
            Ok(weights) => weights,
            Err(e) => {
                tracing::warn!(error = %e, "weight overrides sum to zero, using defaults");
                self.defaults.clone()
            }
        }
    }
}
