//! # Metric Scale
//!
//! The known raw range of provider quality metrics.

use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed raw range `[min, max]` that quality metrics are reported on.
///
/// # Examples
///
/// ```
/// use remit_rank::domain::value_objects::metric_scale::MetricScale;
///
/// let scale = MetricScale::default();
/// assert_eq!(scale.min(), 0.0);
/// assert_eq!(scale.max(), 100.0);
/// assert!(MetricScale::new(5.0, 5.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawMetricScale")]
pub struct MetricScale {
    min: f64,
    max: f64,
}

#[derive(Deserialize)]
struct RawMetricScale {
    min: f64,
    max: f64,
}

impl MetricScale {
    /// Creates a scale.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidMetricScale` if a bound is not finite
    /// or `max <= min`.
    pub fn new(min: f64, max: f64) -> DomainResult<Self> {
        if !min.is_finite() || !max.is_finite() || max <= min {
            return Err(DomainError::InvalidMetricScale(format!(
                "expected finite min < max, got [{min}, {max}]"
            )));
        }
        Ok(Self { min, max })
    }

    /// Lower bound.
    #[inline]
    #[must_use]
    pub const fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound.
    #[inline]
    #[must_use]
    pub const fn max(&self) -> f64 {
        self.max
    }

    /// Width of the range (always positive).
    #[inline]
    #[must_use]
    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

impl TryFrom<RawMetricScale> for MetricScale {
    type Error = DomainError;

    fn try_from(raw: RawMetricScale) -> Result<Self, Self::Error> {
        Self::new(raw.min, raw.max)
    }
}

impl Default for MetricScale {
    /// The 0–100 scale providers report on.
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 100.0,
        }
    }
}

impl fmt::Display for MetricScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}
