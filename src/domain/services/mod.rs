//! # Domain Services
//!
//! Pure ranking logic that doesn't naturally belong to a single entity or
//! value object.
//!
//! ## Services
//!
//! - [`fee_model::FeeModelEvaluator`]: Landing amount, effective rate and fees
//! - [`normalizer::MetricNormalizer`]: Raw quality metric to `[0, 1]`
//! - [`financial_score::FinancialScorer`]: Landing and fees relative to the pool
//! - [`weight_resolver::WeightResolver`]: Caller weights merged over defaults

pub mod fee_model;
pub mod financial_score;
pub mod normalizer;
pub mod weight_resolver;

pub use fee_model::{FeeComponent, FeeModelEvaluator, FeeModelResult};
pub use financial_score::{FeeBaselines, FinancialScoreConfig, FinancialScorer};
pub use normalizer::MetricNormalizer;
pub use weight_resolver::WeightResolver;
