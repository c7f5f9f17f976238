//! # Metric Normalizer
//!
//! Maps raw quality metrics onto `[0, 1]`.

use crate::domain::value_objects::metric_scale::MetricScale;

/// Linear rescale from a [`MetricScale`] to `[0, 1]`, clamping out-of-range
/// input.
///
/// NaN normalises to 0 so that a corrupt metric never lifts a provider's
/// score; infinities clamp like any other out-of-range value.
///
/// # Examples
///
/// ```
/// use remit_rank::domain::services::normalizer::MetricNormalizer;
///
/// let n = MetricNormalizer::default();
/// assert_eq!(n.normalize(80.0), 0.8);
/// assert_eq!(n.normalize(104.0), 1.0);
/// assert_eq!(n.normalize(-3.0), 0.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MetricNormalizer {
    scale: MetricScale,
}

impl MetricNormalizer {
    /// Creates a normalizer for the given scale.
    #[must_use]
    pub const fn new(scale: MetricScale) -> Self {
        Self { scale }
    }

    /// Returns the configured scale.
    #[must_use]
    pub const fn scale(&self) -> MetricScale {
        self.scale
    }

    /// Normalises one raw metric.
    #[must_use]
    pub fn normalize(&self, raw: f64) -> f64 {
        if raw.is_nan() {
            return 0.0;
        }
        ((raw - self.scale.min()) / self.scale.span()).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn maps_bounds_to_unit_interval() {
        let n = MetricNormalizer::default();
        assert_eq!(n.normalize(0.0), 0.0);
        assert_eq!(n.normalize(100.0), 1.0);
        assert!((n.normalize(60.0) - 0.6).abs() < 1e-12);
    }

    #[test]
    fn custom_scale() {
        let n = MetricNormalizer::new(MetricScale::new(1.0, 5.0).unwrap());
        assert!((n.normalize(3.0) - 0.5).abs() < 1e-12);
        assert_eq!(n.normalize(0.5), 0.0);
        assert_eq!(n.normalize(7.0), 1.0);
    }

    #[test]
    fn nan_is_zero_and_infinities_clamp() {
        let n = MetricNormalizer::default();
        assert_eq!(n.normalize(f64::NAN), 0.0);
        assert_eq!(n.normalize(f64::INFINITY), 1.0);
        assert_eq!(n.normalize(f64::NEG_INFINITY), 0.0);
    }

    #[test]
    fn monotonic_over_a_sweep() {
        let n = MetricNormalizer::default();
        let mut prev = f64::NEG_INFINITY;
        for i in -20..=130 {
            let v = n.normalize(f64::from(i));
            assert!(v >= prev);
            assert!((0.0..=1.0).contains(&v));
            prev = v;
        }
    }
}
